//! Client-side route table
//!
//! Maps URL paths to catalog pages, history-mode style: the location path is
//! matched after removing the configured base path.
//!
//! | Path       | Page       |
//! |------------|------------|
//! | `/`        | Categories |
//! | `/book`    | Books      |
//! | `/grocery` | Groceries  |
//!
//! Matching ignores the query string and fragment, treats one trailing slash
//! as optional and is case-insensitive. There are no guards, redirects or
//! parameterized routes.

use std::fmt;

use crate::documents::{QueryDocument, BOOKS_QUERY, CATEGORIES_QUERY, GROCERIES_QUERY};

/// Page components reachable through the router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Category,
    Book,
    Grocery,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Category, Page::Book, Page::Grocery];

    /// Route path of the page
    pub fn path(&self) -> &'static str {
        match self {
            Page::Category => "/",
            Page::Book => "/book",
            Page::Grocery => "/grocery",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Category => "Categories",
            Page::Book => "Books",
            Page::Grocery => "Groceries",
        }
    }

    /// Query the page issues when it is shown
    pub fn document(&self) -> &'static QueryDocument {
        match self {
            Page::Category => &CATEGORIES_QUERY,
            Page::Book => &BOOKS_QUERY,
            Page::Grocery => &GROCERIES_QUERY,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.title())
    }
}

/// A single path → page entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub page: Page,
}

/// The catalog's routes, in declaration order
pub const ROUTES: [Route; 3] = [
    Route {
        path: "/",
        page: Page::Category,
    },
    Route {
        path: "/book",
        page: Page::Book,
    },
    Route {
        path: "/grocery",
        page: Page::Grocery,
    },
];

/// Route table bound to a base path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    base: String,
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new("/")
    }
}

impl RouteTable {
    /// Build the table for the given base path (`"/"` when served at the root)
    pub fn new(base: &str) -> Self {
        Self {
            base: normalize_base(base),
            routes: ROUTES.to_vec(),
        }
    }

    /// Normalized base path: leading slash, no trailing slash, `""` for root
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve a location (path, optionally with query and fragment) to a page
    pub fn resolve(&self, location: &str) -> Option<Page> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        let path = self.strip_base(path)?;
        let path = match path {
            "" => "/",
            p if p.len() > 1 => p.strip_suffix('/').unwrap_or(p),
            p => p,
        };

        let page = self
            .routes
            .iter()
            .find(|route| route.path.eq_ignore_ascii_case(path))
            .map(|route| route.page);

        tracing::trace!(location, ?page, "Resolved route");
        page
    }

    /// Link target for a page, including the base path
    pub fn href(&self, page: Page) -> String {
        match page.path() {
            "/" if !self.base.is_empty() => format!("{}/", self.base),
            path => format!("{}{}", self.base, path),
        }
    }

    fn strip_base<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.base.is_empty() {
            return Some(path);
        }

        let prefix = path.get(..self.base.len())?;
        if !prefix.eq_ignore_ascii_case(&self.base) {
            return None;
        }

        let rest = &path[self.base.len()..];
        // "/app" must not match "/application"
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}

fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
