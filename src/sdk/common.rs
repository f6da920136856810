//! Clauses shared by many statements.

use snowflake_driver::chrono::{DateTime, Utc};
use snowflake_sdk_derive::{SnowflakeDeserialize, ToSql};

use crate::identifier::{AccountObjectIdentifier, DatabaseObjectIdentifier, ObjectIdentifier, SchemaObjectIdentifier};
use crate::sql::{Quotes, SqlValue};

/// `LIKE '<pattern>'`, case-insensitive with `%` and `_` wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Default, ToSql)]
pub struct Like {
    #[ddl(parameter, no_equals, single_quotes, sql = "LIKE")]
    pub pattern: String,
}

impl Like {
    pub fn new(pattern: impl Into<String>) -> Self {
        Like {
            pattern: pattern.into(),
        }
    }

    /// Matches exactly `name`; wildcards in it are not escaped, callers filter the rows again.
    pub fn name<I: ObjectIdentifier>(id: &I) -> Self {
        Like::new(id.name())
    }
}

/// `STARTS WITH '<prefix>'`, case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Default, ToSql)]
pub struct StartsWith {
    #[ddl(parameter, no_equals, single_quotes, sql = "STARTS WITH")]
    pub prefix: String,
}

impl StartsWith {
    pub fn new(prefix: impl Into<String>) -> Self {
        StartsWith {
            prefix: prefix.into(),
        }
    }
}

/// `IN ACCOUNT`, `IN DATABASE <db>` or `IN SCHEMA <db>.<schema>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum In {
    Account,
    Database(AccountObjectIdentifier),
    Schema(DatabaseObjectIdentifier),
}

impl SqlValue for In {
    fn write_value(&self, out: &mut String, _quotes: Quotes) {
        match self {
            In::Account => out.push_str("IN ACCOUNT"),
            In::Database(id) => {
                out.push_str("IN DATABASE ");
                out.push_str(&id.fully_qualified_name());
            }
            In::Schema(id) => {
                out.push_str("IN SCHEMA ");
                out.push_str(&id.fully_qualified_name());
            }
        }
    }
}

/// `LIMIT <rows> [FROM '<name>']`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ToSql)]
pub struct LimitFrom {
    #[ddl(parameter, no_equals, sql = "LIMIT")]
    pub rows: u32,
    #[ddl(parameter, no_equals, single_quotes, sql = "FROM")]
    pub from: Option<String>,
}

impl LimitFrom {
    pub fn new(rows: u32) -> Self {
        LimitFrom { rows, from: None }
    }

    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

/// `<tag> = '<value>'` inside `TAG (...)` and `SET TAG ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAssociation {
    pub name: SchemaObjectIdentifier,
    pub value: String,
}

impl TagAssociation {
    pub fn new(name: SchemaObjectIdentifier, value: impl Into<String>) -> Self {
        TagAssociation {
            name,
            value: value.into(),
        }
    }
}

impl SqlValue for TagAssociation {
    fn write_value(&self, out: &mut String, _quotes: Quotes) {
        out.push_str(&self.name.fully_qualified_name());
        out.push_str(" = ");
        Quotes::Single.write(out, &self.value);
    }
}

crate::sql_enum! {
    /// Object kinds accepted by `ALTER <kind> ... SET TAG`, `SYSTEM$GET_TAG` and grants.
    pub enum ObjectType {
        Account => "ACCOUNT",
        Database => "DATABASE",
        DatabaseRole => "DATABASE ROLE",
        Schema => "SCHEMA",
        Table => "TABLE",
        Column => "COLUMN",
        View => "VIEW",
        MaterializedView => "MATERIALIZED VIEW",
        Warehouse => "WAREHOUSE",
        Role => "ROLE",
        User => "USER",
        ResourceMonitor => "RESOURCE MONITOR",
        Integration => "INTEGRATION",
        Share => "SHARE",
        Stage => "STAGE",
        Pipe => "PIPE",
        Task => "TASK",
        Stream => "STREAM",
        Sequence => "SEQUENCE",
        Tag => "TAG",
        MaskingPolicy => "MASKING POLICY",
        RowAccessPolicy => "ROW ACCESS POLICY",
        Function => "FUNCTION",
        Procedure => "PROCEDURE",
        FileFormat => "FILE FORMAT",
    }
}

/// Row of `DESCRIBE` statements that return `property | value | default | description`.
#[derive(Debug, Clone, PartialEq, Eq, SnowflakeDeserialize)]
pub struct PropertyRow {
    pub property: String,
    pub value: Option<String>,
    pub default: Option<String>,
    pub description: Option<String>,
}

/// Properties of a `DESCRIBE` result keyed by property name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Properties(Vec<PropertyRow>);

impl Properties {
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|row| row.property.eq_ignore_ascii_case(property))
            .and_then(|row| row.value.as_deref())
            .filter(|value| !value.is_empty() && *value != "null")
    }

    pub fn rows(&self) -> &[PropertyRow] {
        &self.0
    }
}

impl From<Vec<PropertyRow>> for Properties {
    fn from(rows: Vec<PropertyRow>) -> Self {
        Properties(rows)
    }
}

/// Splits the comma-separated lists found in `SHOW` output, ex. `A, B,C`.
pub fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|value| {
            value
                .trim()
                .trim_start_matches('[')
                .trim_end_matches(']')
                .split(',')
                .map(|item| item.trim().trim_matches('"').to_string())
                .filter(|item| !item.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Empty strings in `SHOW` output mean "not set".
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

pub type Timestamp = DateTime<Utc>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::ToSql;

    #[test]
    fn shared_clauses_render() {
        assert_eq!(Like::new("W%").to_sql(), "LIKE 'W%'");
        assert_eq!(StartsWith::new("A").to_sql(), "STARTS WITH 'A'");
        assert_eq!(LimitFrom::new(10).from("DB").to_sql(), "LIMIT 10 FROM 'DB'");

        let mut out = String::new();
        In::Schema(DatabaseObjectIdentifier::new("DB", "SC")).write_value(&mut out, Quotes::None);
        assert_eq!(out, r#"IN SCHEMA "DB"."SC""#);

        let mut out = String::new();
        TagAssociation::new(SchemaObjectIdentifier::new("DB", "SC", "COST"), "it's").write_value(&mut out, Quotes::None);
        assert_eq!(out, r#""DB"."SC"."COST" = 'it''s'"#);
    }

    #[test]
    fn lists_from_show_output() {
        assert_eq!(split_list(Some("A, B,C")), ["A", "B", "C"]);
        assert_eq!(split_list(Some("[\"X\",\"Y\"]")), ["X", "Y"]);
        assert!(split_list(Some("")).is_empty());
        assert!(split_list(None).is_empty());
    }
}
