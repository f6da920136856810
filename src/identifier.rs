//! Typed names of Snowflake objects.
//!
//! Every identifier renders to its fully-qualified form with each part in double quotes,
//! e.g. `"DB"."SCHEMA"."TABLE"`, and parses back from quoted or unquoted dotted text.

use std::fmt;
use std::str::FromStr;

use snowflake_driver::DeserializeFromStr;

use crate::sql::{Quotes, SqlValue};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier `{input}` contains a newline")]
    Newline { input: String },
    #[error("identifier `{input}` has an unterminated quote")]
    UnterminatedQuote { input: String },
    #[error("identifier `{input}` has an empty part")]
    EmptyPart { input: String },
    #[error("unable to classify identifier `{input}`: {parts} parts")]
    Unclassifiable { input: String, parts: usize },
    #[error("unexpected number of parts {actual} in identifier `{input}`, expected {expected} in a form of `{form}`")]
    UnexpectedParts {
        input: String,
        actual: usize,
        expected: usize,
        form: &'static str,
    },
    #[error("identifier `{input}` has malformed arguments")]
    MalformedArguments { input: String },
}

/// Shared behavior of every identifier shape.
pub trait ObjectIdentifier: fmt::Display {
    /// Last part of the identifier.
    fn name(&self) -> &str;

    /// All parts, outermost first.
    fn parts(&self) -> Vec<&str>;

    fn fully_qualified_name(&self) -> String {
        self.parts()
            .into_iter()
            .map(quote_part)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Every part is non-empty.
    fn is_valid(&self) -> bool {
        self.parts().iter().all(|part| !part.is_empty())
    }
}

/// Wraps `part` in double quotes, doubling embedded ones.
pub fn quote_part(part: &str) -> String {
    format!("\"{}\"", part.replace('"', "\"\""))
}

/// Trims whitespace and one pair of surrounding double quotes.
fn clean_part(part: impl AsRef<str>) -> String {
    let part = part.as_ref().trim();
    match part
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => part.to_string(),
    }
}

/// Splits dotted text into parts, honoring double-quoted sections.
///
/// Returns the parts and, when present, the raw text of a trailing parenthesized argument list.
fn split_parts(input: &str) -> Result<(Vec<String>, Option<String>), IdentifierError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IdentifierError::Empty);
    }
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut arguments = None;
    let mut finish = |current: &mut String, quoted: &mut bool| {
        let part = std::mem::take(current);
        parts.push(if *quoted { part } else { part.trim().to_string() });
        *quoted = false;
    };
    let mut chars = trimmed.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        match c {
            '"' if in_quotes => {
                if matches!(chars.peek(), Some((_, '"'))) {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => {
                if current.trim().is_empty() {
                    current.clear();
                }
                in_quotes = true;
                quoted = true;
            }
            '\n' | '\r' if !in_quotes => {
                return Err(IdentifierError::Newline {
                    input: input.to_string(),
                })
            }
            '.' if !in_quotes => finish(&mut current, &mut quoted),
            '(' if !in_quotes => {
                arguments = Some(trimmed[index..].to_string());
                break;
            }
            c if quoted && !in_quotes && c.is_whitespace() => {}
            c => current.push(c),
        }
    }
    if in_quotes {
        return Err(IdentifierError::UnterminatedQuote {
            input: input.to_string(),
        });
    }
    finish(&mut current, &mut quoted);
    if parts.iter().any(String::is_empty) {
        return Err(IdentifierError::EmptyPart {
            input: input.to_string(),
        });
    }
    Ok((parts, arguments))
}

fn parse_exact<const N: usize>(input: &str, form: &'static str) -> Result<[String; N], IdentifierError> {
    let (parts, arguments) = split_parts(input)?;
    if arguments.is_some() {
        return Err(IdentifierError::MalformedArguments {
            input: input.to_string(),
        });
    }
    if parts.len() > MAX_PARTS {
        return Err(IdentifierError::Unclassifiable {
            input: input.to_string(),
            parts: parts.len(),
        });
    }
    let actual = parts.len();
    parts
        .try_into()
        .map_err(|_| IdentifierError::UnexpectedParts {
            input: input.to_string(),
            actual,
            expected: N,
            form,
        })
}

const MAX_PARTS: usize = 4;

fn parse_arguments(input: &str, raw: &str) -> Result<Vec<String>, IdentifierError> {
    let inner = raw
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| IdentifierError::MalformedArguments {
            input: input.to_string(),
        })?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut arguments = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in inner.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| IdentifierError::MalformedArguments {
                    input: input.to_string(),
                })?;
                current.push(c);
            }
            ',' if depth == 0 => arguments.push(std::mem::take(&mut current).trim().to_string()),
            c => current.push(c),
        }
    }
    arguments.push(current.trim().to_string());
    if depth != 0 || arguments.iter().any(String::is_empty) {
        return Err(IdentifierError::MalformedArguments {
            input: input.to_string(),
        });
    }
    Ok(arguments)
}

macro_rules! impl_identifier_traits {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.fully_qualified_name())
            }
        }

        impl SqlValue for $ty {
            fn write_value(&self, out: &mut String, _quotes: Quotes) {
                out.push_str(&self.fully_qualified_name());
            }
        }

        impl DeserializeFromStr for $ty {
            type Error = IdentifierError;
            fn deserialize_from_str(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

/// Warehouse, database, role, resource monitor, integration, share.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountObjectIdentifier {
    name: String,
}

impl AccountObjectIdentifier {
    pub fn new(name: impl AsRef<str>) -> Self {
        AccountObjectIdentifier {
            name: clean_part(name),
        }
    }
}

impl ObjectIdentifier for AccountObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }
    fn parts(&self) -> Vec<&str> {
        vec![&self.name]
    }
}

impl FromStr for AccountObjectIdentifier {
    type Err = IdentifierError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [name] = parse_exact::<1>(s, "<name>")?;
        Ok(AccountObjectIdentifier { name })
    }
}

impl_identifier_traits!(AccountObjectIdentifier);

/// Schema, database role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DatabaseObjectIdentifier {
    database: String,
    name: String,
}

impl DatabaseObjectIdentifier {
    pub fn new(database: impl AsRef<str>, name: impl AsRef<str>) -> Self {
        DatabaseObjectIdentifier {
            database: clean_part(database),
            name: clean_part(name),
        }
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    pub fn database_id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.database)
    }
}

impl ObjectIdentifier for DatabaseObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }
    fn parts(&self) -> Vec<&str> {
        vec![&self.database, &self.name]
    }
}

impl FromStr for DatabaseObjectIdentifier {
    type Err = IdentifierError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [database, name] = parse_exact::<2>(s, "<database_name>.<name>")?;
        Ok(DatabaseObjectIdentifier { database, name })
    }
}

impl_identifier_traits!(DatabaseObjectIdentifier);

/// Table, view, stage, pipe, task, stream, sequence, tag, masking policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SchemaObjectIdentifier {
    database: String,
    schema: String,
    name: String,
}

impl SchemaObjectIdentifier {
    pub fn new(database: impl AsRef<str>, schema: impl AsRef<str>, name: impl AsRef<str>) -> Self {
        SchemaObjectIdentifier {
            database: clean_part(database),
            schema: clean_part(schema),
            name: clean_part(name),
        }
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    pub fn database_id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.database)
    }

    pub fn schema_id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(&self.database, &self.schema)
    }

    pub fn with_arguments<A: AsRef<str>>(
        &self,
        argument_types: impl IntoIterator<Item = A>,
    ) -> SchemaObjectIdentifierWithArguments {
        SchemaObjectIdentifierWithArguments {
            id: self.clone(),
            argument_types: argument_types
                .into_iter()
                .map(|argument| argument.as_ref().trim().to_string())
                .collect(),
        }
    }
}

impl ObjectIdentifier for SchemaObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }
    fn parts(&self) -> Vec<&str> {
        vec![&self.database, &self.schema, &self.name]
    }
}

impl FromStr for SchemaObjectIdentifier {
    type Err = IdentifierError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [database, schema, name] =
            parse_exact::<3>(s, "<database_name>.<schema_name>.<name>")?;
        Ok(SchemaObjectIdentifier {
            database,
            schema,
            name,
        })
    }
}

impl_identifier_traits!(SchemaObjectIdentifier);

/// Overloaded functions and procedures, ex. `"DB"."SC"."ADD"(NUMBER, NUMBER)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SchemaObjectIdentifierWithArguments {
    id: SchemaObjectIdentifier,
    argument_types: Vec<String>,
}

impl SchemaObjectIdentifierWithArguments {
    pub fn new<A: AsRef<str>>(
        database: impl AsRef<str>,
        schema: impl AsRef<str>,
        name: impl AsRef<str>,
        argument_types: impl IntoIterator<Item = A>,
    ) -> Self {
        SchemaObjectIdentifier::new(database, schema, name).with_arguments(argument_types)
    }

    pub fn schema_object_id(&self) -> &SchemaObjectIdentifier {
        &self.id
    }

    pub fn argument_types(&self) -> &[String] {
        &self.argument_types
    }

    pub fn database_name(&self) -> &str {
        self.id.database_name()
    }

    pub fn schema_name(&self) -> &str {
        self.id.schema_name()
    }

    pub fn schema_id(&self) -> DatabaseObjectIdentifier {
        self.id.schema_id()
    }
}

impl ObjectIdentifier for SchemaObjectIdentifierWithArguments {
    fn name(&self) -> &str {
        self.id.name()
    }
    fn parts(&self) -> Vec<&str> {
        self.id.parts()
    }
    fn fully_qualified_name(&self) -> String {
        format!(
            "{}({})",
            self.id.fully_qualified_name(),
            self.argument_types.join(", ")
        )
    }
}

impl FromStr for SchemaObjectIdentifierWithArguments {
    type Err = IdentifierError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (parts, arguments) = split_parts(s)?;
        let raw = arguments.ok_or_else(|| IdentifierError::MalformedArguments {
            input: s.to_string(),
        })?;
        let argument_types = parse_arguments(s, &raw)?;
        let actual = parts.len();
        let [database, schema, name]: [String; 3] =
            parts
                .try_into()
                .map_err(|_| IdentifierError::UnexpectedParts {
                    input: s.to_string(),
                    actual,
                    expected: 3,
                    form: "<database_name>.<schema_name>.<name>(<argname> <argtype>...)",
                })?;
        Ok(SchemaObjectIdentifierWithArguments {
            id: SchemaObjectIdentifier {
                database,
                schema,
                name,
            },
            argument_types,
        })
    }
}

impl_identifier_traits!(SchemaObjectIdentifierWithArguments);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TableColumnIdentifier {
    database: String,
    schema: String,
    table: String,
    column: String,
}

impl TableColumnIdentifier {
    pub fn new(
        database: impl AsRef<str>,
        schema: impl AsRef<str>,
        table: impl AsRef<str>,
        column: impl AsRef<str>,
    ) -> Self {
        TableColumnIdentifier {
            database: clean_part(database),
            schema: clean_part(schema),
            table: clean_part(table),
            column: clean_part(column),
        }
    }

    pub fn table_id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database, &self.schema, &self.table)
    }
}

impl ObjectIdentifier for TableColumnIdentifier {
    fn name(&self) -> &str {
        &self.column
    }
    fn parts(&self) -> Vec<&str> {
        vec![&self.database, &self.schema, &self.table, &self.column]
    }
}

impl FromStr for TableColumnIdentifier {
    type Err = IdentifierError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [database, schema, table, column] = parse_exact::<4>(
            s,
            "<database_name>.<schema_name>.<table_name>.<column_name>",
        )?;
        Ok(TableColumnIdentifier {
            database,
            schema,
            table,
            column,
        })
    }
}

impl_identifier_traits!(TableColumnIdentifier);

/// `<organization>.<account>`, the account half of an [`ExternalObjectIdentifier`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountIdentifier {
    organization: String,
    account: String,
}

impl AccountIdentifier {
    pub fn new(organization: impl AsRef<str>, account: impl AsRef<str>) -> Self {
        AccountIdentifier {
            organization: clean_part(organization),
            account: clean_part(account),
        }
    }

    pub fn organization_name(&self) -> &str {
        &self.organization
    }

    pub fn account_name(&self) -> &str {
        &self.account
    }
}

impl ObjectIdentifier for AccountIdentifier {
    fn name(&self) -> &str {
        &self.account
    }
    fn parts(&self) -> Vec<&str> {
        vec![&self.organization, &self.account]
    }
}

impl FromStr for AccountIdentifier {
    type Err = IdentifierError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [organization, account] = parse_exact::<2>(s, "<organization_name>.<account_name>")?;
        Ok(AccountIdentifier {
            organization,
            account,
        })
    }
}

impl_identifier_traits!(AccountIdentifier);

/// Object owned by another account, ex. an inbound share.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ExternalObjectIdentifier {
    account: AccountIdentifier,
    name: String,
}

impl ExternalObjectIdentifier {
    pub fn new(account: AccountIdentifier, name: impl AsRef<str>) -> Self {
        ExternalObjectIdentifier {
            account,
            name: clean_part(name),
        }
    }

    pub fn account_identifier(&self) -> &AccountIdentifier {
        &self.account
    }
}

impl ObjectIdentifier for ExternalObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }
    fn parts(&self) -> Vec<&str> {
        vec![&self.account.organization, &self.account.account, &self.name]
    }
}

impl FromStr for ExternalObjectIdentifier {
    type Err = IdentifierError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [organization, account, name] =
            parse_exact::<3>(s, "<organization_name>.<account_name>.<name>")?;
        Ok(ExternalObjectIdentifier {
            account: AccountIdentifier {
                organization,
                account,
            },
            name,
        })
    }
}

impl_identifier_traits!(ExternalObjectIdentifier);

/// Any identifier, classified by the shape of its text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Account(AccountObjectIdentifier),
    Database(DatabaseObjectIdentifier),
    Schema(SchemaObjectIdentifier),
    SchemaWithArguments(SchemaObjectIdentifierWithArguments),
    TableColumn(TableColumnIdentifier),
    External(ExternalObjectIdentifier),
}

impl Identifier {
    fn inner(&self) -> &dyn ObjectIdentifier {
        match self {
            Identifier::Account(id) => id,
            Identifier::Database(id) => id,
            Identifier::Schema(id) => id,
            Identifier::SchemaWithArguments(id) => id,
            Identifier::TableColumn(id) => id,
            Identifier::External(id) => id,
        }
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Identifier {
                fn from(id: $ty) -> Self {
                    Identifier::$variant(id)
                }
            }
        )*
    };
}

impl_from_shape!(
    Account(AccountObjectIdentifier),
    Database(DatabaseObjectIdentifier),
    Schema(SchemaObjectIdentifier),
    SchemaWithArguments(SchemaObjectIdentifierWithArguments),
    TableColumn(TableColumnIdentifier),
    External(ExternalObjectIdentifier),
);

impl ObjectIdentifier for Identifier {
    fn name(&self) -> &str {
        self.inner().name()
    }
    fn parts(&self) -> Vec<&str> {
        self.inner().parts()
    }
    fn fully_qualified_name(&self) -> String {
        self.inner().fully_qualified_name()
    }
}

/// Picks the smallest shape that fits. Three parts are read as a schema object, never as an
/// external object, since the two are indistinguishable in text.
impl FromStr for Identifier {
    type Err = IdentifierError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (parts, arguments) = split_parts(s)?;
        if arguments.is_some() {
            return s.parse().map(Identifier::SchemaWithArguments);
        }
        let mut parts = parts.into_iter();
        match (parts.next(), parts.next(), parts.next(), parts.next(), parts.len()) {
            (Some(name), None, None, None, 0) => {
                Ok(Identifier::Account(AccountObjectIdentifier { name }))
            }
            (Some(database), Some(name), None, None, 0) => {
                Ok(Identifier::Database(DatabaseObjectIdentifier { database, name }))
            }
            (Some(database), Some(schema), Some(name), None, 0) => {
                Ok(Identifier::Schema(SchemaObjectIdentifier {
                    database,
                    schema,
                    name,
                }))
            }
            (Some(database), Some(schema), Some(table), Some(column), 0) => {
                Ok(Identifier::TableColumn(TableColumnIdentifier {
                    database,
                    schema,
                    table,
                    column,
                }))
            }
            (_, _, _, _, rest) => Err(IdentifierError::Unclassifiable {
                input: s.to_string(),
                parts: MAX_PARTS + rest,
            }),
        }
    }
}

impl_identifier_traits!(Identifier);
