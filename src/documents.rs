//! Catalog GraphQL documents
//!
//! The fixed set of operations the catalog sends to the backend. Documents
//! are passed to the endpoint unmodified.

use crate::graphql::{parse_document, Document, GraphQLResult, OperationKind};

/// A hard-coded GraphQL operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDocument {
    /// Name of the single operation in `source`
    pub operation_name: &'static str,
    pub kind: OperationKind,
    pub source: &'static str,
}

impl QueryDocument {
    /// Parse the document text
    pub fn parse(&self) -> GraphQLResult<Document> {
        parse_document(self.source)
    }
}

pub const BOOKS_QUERY: QueryDocument = QueryDocument {
    operation_name: "Books",
    kind: OperationKind::Query,
    source: r#"
    query Books {
        books {
            id
            title
            author
            isbn
            pages
            price
            quantity
            description
            status
            dateCreated
        }
    }
"#,
};

pub const CATEGORIES_QUERY: QueryDocument = QueryDocument {
    operation_name: "Categories",
    kind: OperationKind::Query,
    source: r#"
    query Categories {
        categories {
            id
            title
        }
    }
"#,
};

pub const GROCERIES_QUERY: QueryDocument = QueryDocument {
    operation_name: "Groceries",
    kind: OperationKind::Query,
    source: r#"
    query Groceries {
        groceries {
            productTag
            name
            category {
                id
                title
            }
            price
            quantity
            imageurl
            status
            dateCreated
        }
    }
"#,
};

pub const CREATE_CATEGORY: QueryDocument = QueryDocument {
    operation_name: "CreateCategory",
    kind: OperationKind::Mutation,
    source: r#"
    mutation CreateCategory($title: String!) {
        createCategory(title: $title) {
            category {
                id
                title
            }
        }
    }
"#,
};

pub const UPDATE_CATEGORY: QueryDocument = QueryDocument {
    operation_name: "UpdateCategory",
    kind: OperationKind::Mutation,
    source: r#"
    mutation UpdateCategory($id: ID, $title: String!) {
        updateCategory(id: $id, title: $title) {
            category {
                id
                title
            }
        }
    }
"#,
};

pub const DELETE_CATEGORY: QueryDocument = QueryDocument {
    operation_name: "DeleteCategory",
    kind: OperationKind::Mutation,
    source: r#"
    mutation DeleteCategory($id: ID) {
        deleteCategory(id: $id) {
            category {
                id
            }
        }
    }
"#,
};

pub const CREATE_BOOK: QueryDocument = QueryDocument {
    operation_name: "CreateBook",
    kind: OperationKind::Mutation,
    source: r#"
    mutation CreateBook($input: BookInput!) {
        createBook(input: $input) {
            book {
                id
                title
                author
                isbn
                pages
                price
                quantity
                description
                status
                dateCreated
            }
        }
    }
"#,
};

pub const UPDATE_BOOK: QueryDocument = QueryDocument {
    operation_name: "UpdateBook",
    kind: OperationKind::Mutation,
    source: r#"
    mutation UpdateBook($id: ID, $input: BookInput!) {
        updateBook(id: $id, input: $input) {
            book {
                id
                title
                author
                isbn
                pages
                price
                quantity
                description
                status
                dateCreated
            }
        }
    }
"#,
};

pub const DELETE_BOOK: QueryDocument = QueryDocument {
    operation_name: "DeleteBook",
    kind: OperationKind::Mutation,
    source: r#"
    mutation DeleteBook($id: ID) {
        deleteBook(id: $id) {
            book {
                id
            }
        }
    }
"#,
};

/// Every document, queries first
pub const ALL: [QueryDocument; 9] = [
    BOOKS_QUERY,
    CATEGORIES_QUERY,
    GROCERIES_QUERY,
    CREATE_CATEGORY,
    UPDATE_CATEGORY,
    DELETE_CATEGORY,
    CREATE_BOOK,
    UPDATE_BOOK,
    DELETE_BOOK,
];
