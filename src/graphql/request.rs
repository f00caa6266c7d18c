//! GraphQL-over-HTTP envelope
//!
//! JSON shapes sent to and received from the endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{GraphQLError, GraphQLResult};

/// Request body posted to the GraphQL endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

impl GraphQLRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables: None,
        }
    }

    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Attach variables; `null` and empty objects are dropped
    pub fn variables(mut self, variables: Value) -> Self {
        self.variables = match variables {
            Value::Null => None,
            Value::Object(ref map) if map.is_empty() => None,
            other => Some(other),
        };
        self
    }
}

/// Response body returned by the GraphQL endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ServerError>,
}

impl GraphQLResponse {
    pub fn from_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<ServerError>) -> Self {
        Self { data: None, errors }
    }

    /// Extract `data`, failing when the server reported errors without any.
    ///
    /// Partial results (data alongside errors) are returned as data; the
    /// errors are logged.
    pub fn into_data(self) -> GraphQLResult<Value> {
        match (self.data, self.errors.is_empty()) {
            (Some(Value::Null), false) | (None, false) => Err(GraphQLError::Server(self.errors)),
            (Some(data), true) => Ok(data),
            (Some(data), false) => {
                for error in &self.errors {
                    tracing::warn!(message = %error.message, path = ?error.path, "Partial GraphQL result");
                }
                Ok(data)
            }
            (None, true) => Err(GraphQLError::MissingData),
        }
    }
}

/// A single entry of the `errors` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
}

impl ServerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: None,
        }
    }
}

/// Position of an error in the request document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = GraphQLRequest::new("query Books { books { id } }")
            .operation_name("Books")
            .variables(json!({}));

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "query": "query Books { books { id } }",
                "operationName": "Books",
            })
        );
    }

    #[test]
    fn test_request_keeps_variables() {
        let request = GraphQLRequest::new("mutation").variables(json!({ "id": "4" }));
        assert_eq!(request.variables, Some(json!({ "id": "4" })));
    }

    #[test]
    fn test_response_with_errors_only() {
        let response: GraphQLResponse = serde_json::from_value(json!({
            "errors": [{
                "message": "Cannot query field \"isbn\" on type \"CategoryType\".",
                "locations": [{ "line": 3, "column": 13 }]
            }],
            "data": null
        }))
        .unwrap();

        assert_eq!(response.errors[0].locations[0], Location { line: 3, column: 13 });
        assert!(matches!(response.into_data(), Err(GraphQLError::Server(_))));
    }

    #[test]
    fn test_partial_response_returns_data() {
        let response = GraphQLResponse {
            data: Some(json!({ "books": [] })),
            errors: vec![ServerError::new("deprecated")],
        };
        assert_eq!(response.into_data().unwrap(), json!({ "books": [] }));
    }

    #[test]
    fn test_empty_response_is_missing_data() {
        let response: GraphQLResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(response.into_data(), Err(GraphQLError::MissingData)));
    }
}
