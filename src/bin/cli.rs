//! Catalog CLI
//!
//! Command-line front end for the catalog:
//! - Open a page by URL path
//! - List books, categories and groceries
//! - Create, update and delete categories and books
//! - Generate a config file

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;

use catalog::documents::{
    CREATE_BOOK, CREATE_CATEGORY, DELETE_BOOK, DELETE_CATEGORY, UPDATE_BOOK, UPDATE_CATEGORY,
};
use catalog::models::{
    CreateBookData, CreateCategoryData, DeleteBookData, DeleteCategoryData, UpdateBookData,
    UpdateCategoryData,
};
use catalog::{
    AppContext, Book, BookInput, BooksData, CategoriesData, Category, Config, ConfigSource,
    GraphQLClient, GraphQLLink, GroceriesData, Grocery, HttpLink, Page, Status,
};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse and edit the books and groceries catalog")]
#[command(long_about = "Catalog talks to the catalog GraphQL endpoint.\nPages are addressed by the same paths the web UI uses: /, /book, /grocery.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// GraphQL endpoint (overrides config and CATALOG_GRAPHQL_URL)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the page served at a URL path
    Open {
        /// Path such as /, /book or /grocery
        path: String,
    },

    /// List books
    Books,

    /// List categories
    Categories,

    /// List groceries
    Groceries,

    /// Show the route table
    Routes,

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Manage books
    Book {
        #[command(subcommand)]
        action: BookAction,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Create a category
    Create {
        /// Category title
        title: String,
    },
    /// Rename a category
    Update {
        /// Category ID
        id: String,
        /// New title
        title: String,
    },
    /// Delete a category
    Delete {
        /// Category ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum BookAction {
    /// Create a book
    Create {
        #[command(flatten)]
        fields: BookFields,
    },
    /// Update fields of a book
    Update {
        /// Book ID
        id: String,
        #[command(flatten)]
        fields: BookFields,
    },
    /// Delete a book
    Delete {
        /// Book ID
        id: String,
    },
}

#[derive(Args)]
pub struct BookFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub pages: Option<i64>,
    #[arg(long)]
    pub price: Option<i64>,
    #[arg(long)]
    pub quantity: Option<i64>,
    #[arg(long)]
    pub description: Option<String>,
    /// available or unavailable
    #[arg(long)]
    pub status: Option<Status>,
}

impl From<BookFields> for BookInput {
    fn from(fields: BookFields) -> Self {
        BookInput {
            title: fields.title,
            author: fields.author,
            pages: fields.pages,
            price: fields.price,
            quantity: fields.quantity,
            description: fields.description,
            status: fields.status,
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    fn parse(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => bail!("Unknown output format: {}. Use: table, json", other),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let config = catalog::config::generate_default_config();

        match output {
            Some(path) => {
                // Create parent directory if needed
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &config)?;
                println!("Config written to {:?}", path);
            }
            None => {
                print!("{}", config);
            }
        }
        return Ok(());
    }

    let (mut config, source) = match &cli.config {
        Some(path) => {
            let config = Config::load_with_env(path)?;
            let source = ConfigSource::File {
                path: path.clone(),
                skipped: Vec::new(),
            };
            (config, source)
        }
        None => Config::discover(),
    };
    if let Some(endpoint) = cli.endpoint {
        config.graphql.url = endpoint;
    }

    catalog::logging::init(&config.logging)?;
    source.log();

    let format = OutputFormat::parse(&cli.format)?;
    let app = AppContext::bootstrap(&config)?;

    match cli.command {
        Commands::Open { path } => match app.routes.resolve(&path) {
            Some(page) => show_page(&app, page, format).await?,
            None => {
                eprintln!("No page at {}", path);
                eprintln!();
                eprintln!("Available paths:");
                for route in app.routes.routes() {
                    eprintln!("  {}", app.routes.href(route.page));
                }
                std::process::exit(1);
            }
        },

        Commands::Books => show_page(&app, Page::Book, format).await?,
        Commands::Categories => show_page(&app, Page::Category, format).await?,
        Commands::Groceries => show_page(&app, Page::Grocery, format).await?,

        Commands::Routes => {
            println!("{:<20} {:<12} {}", "Path", "Page", "Query");
            println!("{}", "-".repeat(45));
            for route in app.routes.routes() {
                println!(
                    "{:<20} {:<12} {}",
                    app.routes.href(route.page),
                    route.page.title(),
                    route.page.document().operation_name
                );
            }
        }

        Commands::Category { action } => run_category(&app, action, format).await?,
        Commands::Book { action } => run_book(&app, action, format).await?,

        Commands::Config { .. } => unreachable!("handled before bootstrap"),
    }

    Ok(())
}

async fn show_page(app: &AppContext<HttpLink>, page: Page, format: OutputFormat) -> anyhow::Result<()> {
    let document = page.document();

    match page {
        Page::Category => {
            let data: CategoriesData = app
                .client
                .query(document, None)
                .await
                .context("Failed to fetch categories")?;
            match format {
                OutputFormat::Json => print_json(&data.categories)?,
                OutputFormat::Table => print_categories(&data.categories),
            }
        }
        Page::Book => {
            let data: BooksData = app
                .client
                .query(document, None)
                .await
                .context("Failed to fetch books")?;
            match format {
                OutputFormat::Json => print_json(&data.books)?,
                OutputFormat::Table => print_books(&data.books),
            }
        }
        Page::Grocery => {
            let data: GroceriesData = app
                .client
                .query(document, None)
                .await
                .context("Failed to fetch groceries")?;
            match format {
                OutputFormat::Json => print_json(&data.groceries)?,
                OutputFormat::Table => print_groceries(&data.groceries),
            }
        }
    }

    Ok(())
}

/// Result of a mutation command
enum Outcome<T> {
    Saved(Option<T>),
    Deleted(String),
}

async fn run_category(
    app: &AppContext<HttpLink>,
    action: CategoryAction,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match mutate_category(&app.client, action).await? {
        Outcome::Saved(Some(category)) => match format {
            OutputFormat::Json => print_json(&category)?,
            OutputFormat::Table => print_categories(&[category]),
        },
        Outcome::Saved(None) => println!("Server returned no category"),
        Outcome::Deleted(id) => println!("Deleted category {}", id),
    }
    Ok(())
}

async fn run_book(app: &AppContext<HttpLink>, action: BookAction, format: OutputFormat) -> anyhow::Result<()> {
    match mutate_book(&app.client, action).await? {
        Outcome::Saved(Some(book)) => match format {
            OutputFormat::Json => print_json(&book)?,
            OutputFormat::Table => print_books(&[book]),
        },
        Outcome::Saved(None) => println!("Server returned no book"),
        Outcome::Deleted(id) => println!("Deleted book {}", id),
    }
    Ok(())
}

async fn mutate_category<L: GraphQLLink>(
    client: &GraphQLClient<L>,
    action: CategoryAction,
) -> anyhow::Result<Outcome<Category>> {
    let outcome = match action {
        CategoryAction::Create { title } => {
            let data: CreateCategoryData = client
                .mutate(&CREATE_CATEGORY, Some(json!({ "title": title })))
                .await
                .context("Failed to create category")?;
            Outcome::Saved(data.create_category.and_then(|p| p.category))
        }
        CategoryAction::Update { id, title } => {
            let data: UpdateCategoryData = client
                .mutate(&UPDATE_CATEGORY, Some(json!({ "id": id, "title": title })))
                .await
                .context("Failed to update category")?;
            Outcome::Saved(data.update_category.and_then(|p| p.category))
        }
        CategoryAction::Delete { id } => {
            let _: DeleteCategoryData = client
                .mutate(&DELETE_CATEGORY, Some(json!({ "id": id })))
                .await
                .context("Failed to delete category")?;
            Outcome::Deleted(id)
        }
    };

    // Listings fetched earlier in this process are now stale
    client.reset_store();
    Ok(outcome)
}

async fn mutate_book<L: GraphQLLink>(
    client: &GraphQLClient<L>,
    action: BookAction,
) -> anyhow::Result<Outcome<Book>> {
    let outcome = match action {
        BookAction::Create { fields } => {
            if fields.title.is_none() {
                bail!("A new book needs --title");
            }
            let input = BookInput::from(fields);
            let data: CreateBookData = client
                .mutate(&CREATE_BOOK, Some(json!({ "input": input })))
                .await
                .context("Failed to create book")?;
            Outcome::Saved(data.create_book.and_then(|p| p.book))
        }
        BookAction::Update { id, fields } => {
            let input = BookInput::from(fields);
            if input.is_empty() {
                bail!("Nothing to update: pass at least one field");
            }
            let data: UpdateBookData = client
                .mutate(&UPDATE_BOOK, Some(json!({ "id": id, "input": input })))
                .await
                .context("Failed to update book")?;
            Outcome::Saved(data.update_book.and_then(|p| p.book))
        }
        BookAction::Delete { id } => {
            let _: DeleteBookData = client
                .mutate(&DELETE_BOOK, Some(json!({ "id": id })))
                .await
                .context("Failed to delete book")?;
            Outcome::Deleted(id)
        }
    };

    client.reset_store();
    Ok(outcome)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories yet.");
        return;
    }

    println!("{:<8} {}", "ID", "Title");
    println!("{}", "-".repeat(40));

    for category in categories {
        println!("{:<8} {}", category.id, category.title);
    }
}

fn print_books(books: &[Book]) {
    if books.is_empty() {
        println!("No books yet.");
        return;
    }

    println!(
        "{:<6} {:<30} {:<20} {:<14} {:>6} {:>7} {:>5} {:<12} {}",
        "ID", "Title", "Author", "ISBN", "Pages", "Price", "Qty", "Status", "Created"
    );
    println!("{}", "-".repeat(116));

    for book in books {
        println!(
            "{:<6} {:<30} {:<20} {:<14} {:>6} {:>7} {:>5} {:<12} {}",
            book.id,
            truncate(&book.title, 30),
            truncate(&book.author, 20),
            book.isbn,
            book.pages,
            book.price,
            book.quantity,
            book.status,
            book.date_created.format("%Y-%m-%d")
        );
    }
}

fn print_groceries(groceries: &[Grocery]) {
    if groceries.is_empty() {
        println!("No groceries yet.");
        return;
    }

    println!(
        "{:<10} {:<24} {:<16} {:>7} {:>5} {:<12} {}",
        "Tag", "Name", "Category", "Price", "Qty", "Status", "Created"
    );
    println!("{}", "-".repeat(90));

    for grocery in groceries {
        println!(
            "{:<10} {:<24} {:<16} {:>7} {:>5} {:<12} {}",
            grocery.product_tag,
            truncate(&grocery.name, 24),
            truncate(&grocery.category.title, 16),
            grocery.price,
            grocery.quantity,
            grocery.status,
            grocery.date_created.format("%Y-%m-%d")
        );
    }
}

/// Shorten to `width` characters, marking the cut with an ellipsis
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let kept: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_book_update() {
        let cli = Cli::try_parse_from([
            "catalog", "book", "update", "4", "--price", "15", "--status", "unavailable",
        ])
        .unwrap();

        match cli.command {
            Commands::Book {
                action: BookAction::Update { id, fields },
            } => {
                assert_eq!(id, "4");
                let input = BookInput::from(fields);
                assert_eq!(input.price, Some(15));
                assert_eq!(input.status, Some(Status::Unavailable));
                assert!(input.title.is_none());
            }
            _ => panic!("expected book update"),
        }
    }

    #[test]
    fn test_output_format() {
        assert!(OutputFormat::parse("JSON").unwrap() == OutputFormat::Json);
        assert!(OutputFormat::parse("csv").is_err());
    }

    async fn spawn_catalog_server() -> HttpLink {
        use axum::{routing::post, Json, Router};
        use serde_json::Value;

        let router = Router::new().route(
            "/graphql",
            post(|Json(body): Json<Value>| async move {
                let data = match body["operationName"].as_str() {
                    Some("Categories") => json!({ "categories": [{ "id": "1", "title": "Fruits" }] }),
                    Some("DeleteCategory") => json!({ "deleteCategory": { "category": null } }),
                    Some("DeleteBook") => json!({ "deleteBook": { "book": null } }),
                    Some("UpdateCategory") => json!({
                        "updateCategory": { "category": { "id": "1", "title": "Fresh fruit" } }
                    }),
                    _ => Value::Null,
                };
                Json(json!({ "data": data }))
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        HttpLink::with_uri(format!("http://{}/graphql", addr)).unwrap()
    }

    async fn prime_cache(client: &GraphQLClient<HttpLink>) {
        let _: CategoriesData = client.query(&catalog::CATEGORIES_QUERY, None).await.unwrap();
        assert_eq!(client.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_every_mutation_clears_cached_listings() {
        let client = GraphQLClient::new(spawn_catalog_server().await);

        prime_cache(&client).await;
        let outcome = mutate_category(&client, CategoryAction::Delete { id: "1".to_string() })
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Deleted(id) if id == "1"));
        assert!(client.cache().is_empty());

        prime_cache(&client).await;
        let outcome = mutate_book(&client, BookAction::Delete { id: "7".to_string() })
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Deleted(id) if id == "7"));
        assert!(client.cache().is_empty());

        prime_cache(&client).await;
        let outcome = mutate_category(
            &client,
            CategoryAction::Update {
                id: "1".to_string(),
                title: "Fresh fruit".to_string(),
            },
        )
        .await
        .unwrap();
        match outcome {
            Outcome::Saved(Some(category)) => assert_eq!(category.title, "Fresh fruit"),
            _ => panic!("expected saved category"),
        }
        assert!(client.cache().is_empty());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Dune", 10), "Dune");
        assert_eq!(truncate("The Left Hand of Darkness", 10), "The Left …");
    }
}
