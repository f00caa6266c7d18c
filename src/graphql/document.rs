//! GraphQL Document Parser
//!
//! Parses the executable subset of GraphQL used by the catalog documents.
//!
//! # Supported Syntax
//!
//! ```text
//! query Books { books { id title } }
//! { categories { id } }
//! mutation UpdateCategory($id: ID, $title: String!) {
//!     updateCategory(id: $id, title: $title) { category { id title } }
//! }
//! ```
//!
//! Fields may carry aliases, arguments and nested selection sets. Argument
//! values cover variables, numbers, quoted and `"""` block strings, booleans,
//! `null`, enums, lists and objects. Commas and `#` comments are ignored.
//! Nesting is limited to [`MAX_DEPTH`] levels. Fragments and directives are
//! not supported.

use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace1, not_line_ending, one_of},
    combinator::{eof, map, map_res, opt, recognize, value},
    error::{Error as NomError, ErrorKind},
    multi::{many0, many1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use super::error::{GraphQLError, GraphQLResult};

/// A parsed executable document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub operations: Vec<Operation>,
}

/// Operation type keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single operation definition
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,
    pub name: Option<String>,
    pub variables: Vec<VariableDefinition>,
    pub selection_set: Vec<Field>,
}

/// `$name: Type = default`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDefinition {
    pub name: String,
    pub ty: TypeRef,
    pub default_value: Option<Value>,
}

/// Variable type reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            TypeRef::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

/// A selected field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<Argument>,
    pub selection_set: Vec<Field>,
}

impl Field {
    /// Key under which the field appears in the response
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// `name: value` argument
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub value: Value,
}

/// Literal or variable value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Variable(String),
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Document {
    /// Find an operation by name, or the only operation when `name` is `None`
    pub fn operation(&self, name: Option<&str>) -> Option<&Operation> {
        match name {
            Some(name) => self
                .operations
                .iter()
                .find(|op| op.name.as_deref() == Some(name)),
            None if self.operations.len() == 1 => self.operations.first(),
            None => None,
        }
    }
}

impl Operation {
    /// Dotted response paths of every selected leaf field, in document order
    pub fn field_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&self.selection_set, "", &mut paths);
        paths
    }

    /// Names of the top-level fields
    pub fn root_fields(&self) -> Vec<&str> {
        self.selection_set.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn variable(&self, name: &str) -> Option<&VariableDefinition> {
        self.variables.iter().find(|v| v.name == name)
    }
}

fn collect_paths(fields: &[Field], prefix: &str, out: &mut Vec<String>) {
    for field in fields {
        let path = if prefix.is_empty() {
            field.response_key().to_string()
        } else {
            format!("{}.{}", prefix, field.response_key())
        };

        if field.selection_set.is_empty() {
            out.push(path);
        } else {
            collect_paths(&field.selection_set, &path, out);
        }
    }
}

/// Deepest nesting of selection sets, list types or input values
pub const MAX_DEPTH: usize = 64;

/// Parse a document string
pub fn parse_document(input: &str) -> GraphQLResult<Document> {
    let operations = match parse_operations(input) {
        Ok((_, operations)) => operations,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let (line, column) = position(input, e.input);
            let near: String = e.input.trim_start().chars().take(16).collect();
            return Err(GraphQLError::Parse(if e.code == ErrorKind::TooLarge {
                format!(
                    "Document nests deeper than {} levels at line {}, column {}",
                    MAX_DEPTH, line, column
                )
            } else if near.is_empty() {
                format!("Unexpected end of document at line {}, column {}", line, column)
            } else {
                format!("Unexpected '{}' at line {}, column {}", near, line, column)
            }));
        }
        Err(nom::Err::Incomplete(_)) => {
            return Err(GraphQLError::Parse("Unexpected end of document".to_string()));
        }
    };

    if operations.len() > 1 {
        if operations.iter().any(|op| op.name.is_none()) {
            return Err(GraphQLError::Parse(
                "Anonymous operation must be the only operation in a document".to_string(),
            ));
        }
        for (i, op) in operations.iter().enumerate() {
            if operations[..i].iter().any(|prev| prev.name == op.name) {
                return Err(GraphQLError::Parse(format!(
                    "Duplicate operation name '{}'",
                    op.name.as_deref().unwrap_or_default()
                )));
            }
        }
    }

    Ok(Document { operations })
}

/// Line and column (both 1-based) of `rest` inside `source`
fn position(source: &str, rest: &str) -> (usize, usize) {
    let offset = source.len().saturating_sub(rest.len());
    let consumed = &source[..offset];
    let line = consumed.matches('\n').count() + 1;
    let column = consumed
        .rsplit('\n')
        .next()
        .map(|l| l.chars().count())
        .unwrap_or(0)
        + 1;
    (line, column)
}

fn parse_operations(input: &str) -> IResult<&str, Vec<Operation>> {
    terminated(many1(parse_operation), pair(ignored, eof))(input)
}

/// Whitespace, commas and comments
fn ignored(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0(alt((
            value((), multispace1),
            value((), char(',')),
            value((), pair(char('#'), not_line_ending)),
        ))),
    )(input)
}

fn punct<'a>(c: char) -> impl FnMut(&'a str) -> IResult<&'a str, char> {
    preceded(ignored, char(c))
}

fn parse_bare_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn parse_name(input: &str) -> IResult<&str, &str> {
    preceded(ignored, parse_bare_name)(input)
}

fn parse_operation(input: &str) -> IResult<&str, Operation> {
    alt((parse_shorthand_operation, parse_full_operation))(input)
}

/// Run `parser` one level deeper, failing hard past [`MAX_DEPTH`]
fn nested<'a, O>(
    depth: usize,
    mut parser: impl FnMut(&'a str, usize) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    move |input| {
        if depth >= MAX_DEPTH {
            Err(nom::Err::Failure(NomError::new(input, ErrorKind::TooLarge)))
        } else {
            parser(input, depth + 1)
        }
    }
}

/// `{ ... }` shorthand for an anonymous query
fn parse_shorthand_operation(input: &str) -> IResult<&str, Operation> {
    map(
        |i| parse_selection_set(i, 0),
        |selection_set| Operation {
            kind: OperationKind::Query,
            name: None,
            variables: Vec::new(),
            selection_set,
        },
    )(input)
}

fn parse_full_operation(input: &str) -> IResult<&str, Operation> {
    let (input, kind) = parse_operation_kind(input)?;
    let (input, name) = opt(parse_name)(input)?;
    let (input, variables) = opt(parse_variable_definitions)(input)?;
    let (input, selection_set) = parse_selection_set(input, 0)?;

    Ok((
        input,
        Operation {
            kind,
            name: name.map(str::to_string),
            variables: variables.unwrap_or_default(),
            selection_set,
        },
    ))
}

fn parse_operation_kind(input: &str) -> IResult<&str, OperationKind> {
    let (rest, word) = parse_name(input)?;
    let kind = match word {
        "query" => OperationKind::Query,
        "mutation" => OperationKind::Mutation,
        "subscription" => OperationKind::Subscription,
        _ => return Err(nom::Err::Error(NomError::new(input, ErrorKind::Tag))),
    };
    Ok((rest, kind))
}

fn parse_variable_definitions(input: &str) -> IResult<&str, Vec<VariableDefinition>> {
    delimited(punct('('), many1(parse_variable_definition), punct(')'))(input)
}

fn parse_variable_definition(input: &str) -> IResult<&str, VariableDefinition> {
    let (input, _) = punct('$')(input)?;
    let (input, name) = parse_bare_name(input)?;
    let (input, _) = punct(':')(input)?;
    let (input, ty) = parse_type(input, 0)?;
    let (input, default_value) = opt(preceded(punct('='), |i| parse_value(i, 0)))(input)?;

    Ok((
        input,
        VariableDefinition {
            name: name.to_string(),
            ty,
            default_value,
        },
    ))
}

fn parse_type(input: &str, depth: usize) -> IResult<&str, TypeRef> {
    let (input, base) = alt((
        map(
            delimited(punct('['), nested(depth, parse_type), punct(']')),
            |inner| TypeRef::List(Box::new(inner)),
        ),
        map(parse_name, |name| TypeRef::Named(name.to_string())),
    ))(input)?;
    let (input, bang) = opt(punct('!'))(input)?;

    let ty = match bang {
        Some(_) => TypeRef::NonNull(Box::new(base)),
        None => base,
    };
    Ok((input, ty))
}

fn parse_selection_set(input: &str, depth: usize) -> IResult<&str, Vec<Field>> {
    delimited(punct('{'), many1(nested(depth, parse_field)), punct('}'))(input)
}

fn parse_field(input: &str, depth: usize) -> IResult<&str, Field> {
    let (input, first) = parse_name(input)?;
    let (input, second) = opt(preceded(punct(':'), parse_name))(input)?;
    let (input, arguments) = opt(parse_arguments)(input)?;
    let (input, selection_set) = opt(|i| parse_selection_set(i, depth))(input)?;

    let (alias, name) = match second {
        Some(name) => (Some(first.to_string()), name.to_string()),
        None => (None, first.to_string()),
    };

    Ok((
        input,
        Field {
            alias,
            name,
            arguments: arguments.unwrap_or_default(),
            selection_set: selection_set.unwrap_or_default(),
        },
    ))
}

fn parse_arguments(input: &str) -> IResult<&str, Vec<Argument>> {
    delimited(
        punct('('),
        many1(map(
            pair(parse_name, preceded(punct(':'), |i| parse_value(i, 0))),
            |(name, value)| Argument {
                name: name.to_string(),
                value,
            },
        )),
        punct(')'),
    )(input)
}

fn parse_value(input: &str, depth: usize) -> IResult<&str, Value> {
    preceded(
        ignored,
        alt((
            map(preceded(char('$'), parse_bare_name), |name| {
                Value::Variable(name.to_string())
            }),
            parse_number,
            map(alt((parse_block_string, parse_string)), Value::String),
            map(
                delimited(char('['), many0(nested(depth, parse_value)), punct(']')),
                Value::List,
            ),
            map(
                delimited(
                    char('{'),
                    many0(pair(
                        map(parse_name, str::to_string),
                        preceded(punct(':'), nested(depth, parse_value)),
                    )),
                    punct('}'),
                ),
                Value::Object,
            ),
            map(parse_bare_name, |word| match word {
                "true" => Value::Boolean(true),
                "false" => Value::Boolean(false),
                "null" => Value::Null,
                other => Value::Enum(other.to_string()),
            }),
        )),
    )(input)
}

fn parse_number(input: &str) -> IResult<&str, Value> {
    map_res(
        recognize(tuple((
            opt(char('-')),
            digit1,
            opt(pair(char('.'), digit1)),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |s: &str| {
            if s.contains(['.', 'e', 'E']) {
                s.parse::<f64>().map(Value::Float).map_err(|e| e.to_string())
            } else {
                s.parse::<i64>().map(Value::Int).map_err(|e| e.to_string())
            }
        },
    )(input)
}

fn string_error(input: &str, kind: ErrorKind) -> nom::Err<NomError<&str>> {
    nom::Err::Failure(NomError::new(input, kind))
}

/// Double-quoted string with JSON-style escapes
fn parse_string(input: &str) -> IResult<&str, String> {
    let (mut rest, _) = char('"')(input)?;
    let mut out = String::new();

    loop {
        let mut chars = rest.chars();
        match chars.next() {
            None | Some('\n') | Some('\r') => return Err(string_error(rest, ErrorKind::Char)),
            Some('"') => return Ok((chars.as_str(), out)),
            Some('\\') => {
                let escaped = match chars.next() {
                    Some('"') => '"',
                    Some('\\') => '\\',
                    Some('/') => '/',
                    Some('b') => '\u{8}',
                    Some('f') => '\u{c}',
                    Some('n') => '\n',
                    Some('r') => '\r',
                    Some('t') => '\t',
                    Some('u') => {
                        let (c, after) = unicode_escape(chars.as_str())
                            .ok_or_else(|| string_error(rest, ErrorKind::Escaped))?;
                        out.push(c);
                        rest = after;
                        continue;
                    }
                    _ => return Err(string_error(rest, ErrorKind::Escaped)),
                };
                out.push(escaped);
                rest = chars.as_str();
            }
            Some(c) => {
                out.push(c);
                rest = chars.as_str();
            }
        }
    }
}

/// Four hex digits after `\u`, joining a UTF-16 surrogate pair when one follows
fn unicode_escape(input: &str) -> Option<(char, &str)> {
    let (high, rest) = hex4(input)?;
    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high).map(|c| (c, rest));
    }

    let (low, rest) = hex4(rest.strip_prefix("\\u")?)?;
    if !(0xDC00..0xE000).contains(&low) {
        return None;
    }
    char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)).map(|c| (c, rest))
}

fn hex4(input: &str) -> Option<(u32, &str)> {
    let hex = input.get(..4)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some((value, &input[4..]))
}

/// `"""` block string: raw text where only `\"""` is an escape
fn parse_block_string(input: &str) -> IResult<&str, String> {
    let (mut rest, _) = tag("\"\"\"")(input)?;
    let mut raw = String::new();

    loop {
        if let Some(after) = rest.strip_prefix("\"\"\"") {
            return Ok((after, block_string_value(&raw)));
        }
        if let Some(after) = rest.strip_prefix("\\\"\"\"") {
            raw.push_str("\"\"\"");
            rest = after;
            continue;
        }

        let mut chars = rest.chars();
        match chars.next() {
            Some(c) => {
                raw.push(c);
                rest = chars.as_str();
            }
            None => return Err(string_error(rest, ErrorKind::Char)),
        }
    }
}

/// Drops the common indentation of all lines but the first, then leading
/// and trailing blank lines
fn block_string_value(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .split("\r\n")
        .flat_map(|line| line.split(['\n', '\r']))
        .collect();

    let indent = lines
        .iter()
        .skip(1)
        .filter(|line| !is_blank(line))
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min();

    let mut lines: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, &line)| match indent {
            Some(width) if i > 0 => line.get(width..).unwrap_or(""),
            _ => line,
        })
        .collect();

    while lines.first().is_some_and(|line| is_blank(line)) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| is_blank(line)) {
        lines.pop();
    }

    lines.join("\n")
}

fn is_blank(line: &str) -> bool {
    line.trim_matches([' ', '\t']).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_query() {
        let doc = parse_document("query Books { books { id title } }").unwrap();
        let op = doc.operation(Some("Books")).unwrap();

        assert_eq!(op.kind, OperationKind::Query);
        assert_eq!(op.root_fields(), vec!["books"]);
        assert_eq!(op.field_paths(), vec!["books.id", "books.title"]);
    }

    #[test]
    fn test_parse_shorthand_query() {
        let doc = parse_document("{ categories { id, title } }").unwrap();
        let op = doc.operation(None).unwrap();

        assert_eq!(op.kind, OperationKind::Query);
        assert!(op.name.is_none());
        assert_eq!(op.field_paths(), vec!["categories.id", "categories.title"]);
    }

    #[test]
    fn test_parse_mutation_with_variables() {
        let doc = parse_document(
            r#"
            # rename a category
            mutation UpdateCategory($id: ID, $title: String! = "Untitled") {
                updateCategory(id: $id, title: $title) {
                    category { id title }
                }
            }
            "#,
        )
        .unwrap();
        let op = &doc.operations[0];

        assert_eq!(op.kind, OperationKind::Mutation);
        assert_eq!(op.variable("id").unwrap().ty.to_string(), "ID");

        let title = op.variable("title").unwrap();
        assert_eq!(title.ty.to_string(), "String!");
        assert_eq!(title.default_value, Some(Value::String("Untitled".to_string())));

        let root = &op.selection_set[0];
        assert_eq!(root.arguments[0].value, Value::Variable("id".to_string()));
        assert_eq!(
            op.field_paths(),
            vec!["updateCategory.category.id", "updateCategory.category.title"]
        );
    }

    #[test]
    fn test_parse_literal_values() {
        let doc = parse_document(
            r#"{ search(limit: 10, ratio: -1.5e2, exact: true, tag: null, sort: DESC,
                 ids: [1, 2], input: { title: "a \"b\" A" }) { id } }"#,
        )
        .unwrap();
        let args = &doc.operations[0].selection_set[0].arguments;

        assert_eq!(args[0].value, Value::Int(10));
        assert_eq!(args[1].value, Value::Float(-150.0));
        assert_eq!(args[2].value, Value::Boolean(true));
        assert_eq!(args[3].value, Value::Null);
        assert_eq!(args[4].value, Value::Enum("DESC".to_string()));
        assert_eq!(args[5].value, Value::List(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(
            args[6].value,
            Value::Object(vec![(
                "title".to_string(),
                Value::String("a \"b\" A".to_string())
            )])
        );
    }

    #[test]
    fn test_alias_uses_response_key() {
        let doc = parse_document("{ shelf: books { bookId: id } }").unwrap();
        let op = &doc.operations[0];

        assert_eq!(op.root_fields(), vec!["books"]);
        assert_eq!(op.field_paths(), vec!["shelf.bookId"]);
    }

    #[test]
    fn test_list_type() {
        let doc = parse_document("query Q($ids: [ID!]!) { books { id } }").unwrap();
        assert_eq!(doc.operations[0].variables[0].ty.to_string(), "[ID!]!");
    }

    #[test]
    fn test_empty_selection_set_rejected() {
        assert!(parse_document("query Books { }").is_err());
    }

    #[test]
    fn test_trailing_input_rejected() {
        let err = parse_document("query Books { books { id } } }").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_unclosed_selection_reports_position() {
        let err = parse_document("query Books {\n  books {\n    id\n").unwrap_err();
        assert!(matches!(err, GraphQLError::Parse(_)));
    }

    #[test]
    fn test_unknown_keyword_rejected() {
        assert!(parse_document("fetch Books { books { id } }").is_err());
    }

    #[test]
    fn test_fragments_not_supported() {
        assert!(parse_document("{ books { ...BookFields } }").is_err());
    }

    #[test]
    fn test_multiple_operations() {
        let doc = parse_document("query A { books { id } } query B { categories { id } }").unwrap();

        assert_eq!(doc.operations.len(), 2);
        assert!(doc.operation(None).is_none());
        assert_eq!(doc.operation(Some("B")).unwrap().root_fields(), vec!["categories"]);
    }

    #[test]
    fn test_anonymous_operation_must_be_alone() {
        assert!(parse_document("{ books { id } } query B { categories { id } }").is_err());
        assert!(parse_document("query A { books { id } } query A { books { id } }").is_err());
    }

    #[test]
    fn test_unterminated_string_rejected() {
        assert!(parse_document(r#"{ books(title: "abc) { id } }"#).is_err());
    }

    #[test]
    fn test_string_error_keeps_position() {
        let err = parse_document("query Books {\n  books(title: \"abc\n) { id }\n}").unwrap_err();
        assert!(err.to_string().contains("line 2, column 20"), "{}", err);
    }

    #[test]
    fn test_block_string() {
        let doc = parse_document(
            r#"{ books(description: """
                First line
                  indented
                Last \""" quote
            """) { id } }"#,
        )
        .unwrap();

        assert_eq!(
            doc.operations[0].selection_set[0].arguments[0].value,
            Value::String("First line\n  indented\nLast \"\"\" quote".to_string())
        );
    }

    #[test]
    fn test_block_string_on_one_line() {
        let doc = parse_document(r#"{ books(description: """multi "quoted" text""") { id } }"#).unwrap();
        assert_eq!(
            doc.operations[0].selection_set[0].arguments[0].value,
            Value::String("multi \"quoted\" text".to_string())
        );
        assert!(parse_document(r#"{ books(description: """open) { id } }"#).is_err());
    }

    #[test]
    fn test_unicode_escapes() {
        let doc = parse_document(r#"{ books(title: "caf\u00e9 \uD83D\uDE00") { id } }"#).unwrap();
        assert_eq!(
            doc.operations[0].selection_set[0].arguments[0].value,
            Value::String("café 😀".to_string())
        );

        assert!(parse_document(r#"{ books(title: "\uD83D") { id } }"#).is_err());
        assert!(parse_document(r#"{ books(title: "\uD83D\u0041") { id } }"#).is_err());
        assert!(parse_document(r#"{ books(title: "\u00g1") { id } }"#).is_err());
    }

    #[test]
    fn test_nesting_is_bounded() {
        let shallow = format!("{}{}", "{ a ".repeat(10), "}".repeat(10));
        assert!(parse_document(&shallow).is_ok());

        let deep = format!("{}{}", "{ a ".repeat(10_000), "}".repeat(10_000));
        let err = parse_document(&deep).unwrap_err();
        assert!(err.to_string().contains("nests deeper than 64"), "{}", err);

        let deep_list = format!("{{ books(ids: {}1{}) {{ id }} }}", "[".repeat(10_000), "]".repeat(10_000));
        assert!(parse_document(&deep_list).unwrap_err().to_string().contains("nests deeper"));

        let deep_type = format!("query Q($ids: {}ID{}) {{ books {{ id }} }}", "[".repeat(10_000), "]".repeat(10_000));
        assert!(parse_document(&deep_type).unwrap_err().to_string().contains("nests deeper"));
    }
}
