//! Catalog view models
//!
//! Read-only projections of the server's books, categories and groceries,
//! plus the payloads of the catalog documents.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Stock status flag
///
/// Sent as a Boolean by the server. String forms are accepted too since the
/// book input type declares the field as a String.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Available,
    Unavailable,
}

impl Status {
    pub fn is_available(&self) -> bool {
        matches!(self, Status::Available)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::Unavailable => "unavailable",
        }
    }
}

impl From<bool> for Status {
    fn from(flag: bool) -> Self {
        if flag {
            Status::Available
        } else {
            Status::Unavailable
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "true" | "available" | "1" => Ok(Status::Available),
            "false" | "unavailable" | "0" => Ok(Status::Unavailable),
            other => Err(format!("Invalid status: {}", other)),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.is_available())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(flag) => Ok(flag.into()),
            Raw::Label(label) => label.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// A book listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub pages: i64,
    pub price: i64,
    pub quantity: i64,
    pub description: String,
    pub status: Status,
    pub date_created: NaiveDate,
}

/// A product category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
}

/// A grocery listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grocery {
    pub product_tag: String,
    pub name: String,
    pub category: Category,
    pub price: i64,
    pub quantity: i64,
    pub imageurl: String,
    pub status: Status,
    pub date_created: NaiveDate,
}

/// Input of the book mutations; unset fields are left out of the request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "status_as_string")]
    pub status: Option<Status>,
}

// `BookInput.status` is declared as a String on the server
fn status_as_string<S: Serializer>(status: &Option<Status>, serializer: S) -> Result<S::Ok, S::Error> {
    match status {
        Some(status) => serializer.serialize_str(if status.is_available() { "true" } else { "false" }),
        None => serializer.serialize_none(),
    }
}

impl BookInput {
    pub fn is_empty(&self) -> bool {
        *self == BookInput::default()
    }
}

// ============ Document payloads ============

#[derive(Debug, Clone, Deserialize)]
pub struct BooksData {
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesData {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroceriesData {
    pub groceries: Vec<Grocery>,
}

/// `{ category { ... } }` mutation payload
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPayload {
    pub category: Option<Category>,
}

/// `{ book { ... } }` mutation payload
#[derive(Debug, Clone, Deserialize)]
pub struct BookPayload {
    pub book: Option<Book>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryData {
    pub create_category: Option<CategoryPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryData {
    pub update_category: Option<CategoryPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCategoryData {
    pub delete_category: Option<CategoryPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookData {
    pub create_book: Option<BookPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookData {
    pub update_book: Option<BookPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBookData {
    pub delete_book: Option<BookPayload>,
}
