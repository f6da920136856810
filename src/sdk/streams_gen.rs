// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{In, Like, LimitFrom, StartsWith, TagAssociation};
use crate::identifier::SchemaObjectIdentifier;
use snowflake_sdk_derive::{ToSql, Validate};

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateStreamOnTableOptions {
    #[ddl(static, sql = "CREATE")]
    pub(crate) create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "STREAM")]
    pub(crate) stream: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(list, sql = "WITH TAG")]
    pub tag: Vec<TagAssociation>,
    #[ddl(keyword, sql = "COPY GRANTS")]
    pub copy_grants: bool,
    #[ddl(static, sql = "ON TABLE")]
    pub(crate) on_table: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub table_id: SchemaObjectIdentifier,
    #[ddl(keyword)]
    #[validate(nested)]
    pub on: Option<OnStream>,
    #[ddl(parameter, sql = "APPEND_ONLY")]
    pub append_only: Option<bool>,
    #[ddl(parameter, sql = "SHOW_INITIAL_ROWS")]
    pub show_initial_rows: Option<bool>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateStreamOnExternalTableOptions {
    #[ddl(static, sql = "CREATE")]
    pub(crate) create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "STREAM")]
    pub(crate) stream: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(list, sql = "WITH TAG")]
    pub tag: Vec<TagAssociation>,
    #[ddl(keyword, sql = "COPY GRANTS")]
    pub copy_grants: bool,
    #[ddl(static, sql = "ON EXTERNAL TABLE")]
    pub(crate) on_external_table: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub external_table_id: SchemaObjectIdentifier,
    #[ddl(keyword)]
    #[validate(nested)]
    pub on: Option<OnStream>,
    #[ddl(parameter, sql = "INSERT_ONLY")]
    pub insert_only: Option<bool>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateStreamOnViewOptions {
    #[ddl(static, sql = "CREATE")]
    pub(crate) create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "STREAM")]
    pub(crate) stream: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(list, sql = "WITH TAG")]
    pub tag: Vec<TagAssociation>,
    #[ddl(keyword, sql = "COPY GRANTS")]
    pub copy_grants: bool,
    #[ddl(static, sql = "ON VIEW")]
    pub(crate) on_view: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub view_id: SchemaObjectIdentifier,
    #[ddl(keyword)]
    #[validate(nested)]
    pub on: Option<OnStream>,
    #[ddl(parameter, sql = "APPEND_ONLY")]
    pub append_only: Option<bool>,
    #[ddl(parameter, sql = "SHOW_INITIAL_ROWS")]
    pub show_initial_rows: Option<bool>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct CloneStreamOptions {
    #[ddl(static, sql = "CREATE")]
    pub(crate) create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "STREAM")]
    pub(crate) stream: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(identifier, sql = "CLONE")]
    #[validate(identifier)]
    pub source_stream: SchemaObjectIdentifier,
    #[ddl(keyword, sql = "COPY GRANTS")]
    pub copy_grants: bool,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(set_comment, unset_comment, set_tag, unset_tag))]
pub struct AlterStreamOptions {
    #[ddl(static, sql = "ALTER STREAM")]
    pub(crate) alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(parameter, single_quotes, sql = "SET COMMENT")]
    pub set_comment: Option<String>,
    #[ddl(keyword, sql = "UNSET COMMENT")]
    pub unset_comment: bool,
    #[ddl(list, no_parentheses, sql = "SET TAG")]
    pub set_tag: Vec<TagAssociation>,
    #[ddl(list, no_parentheses, sql = "UNSET TAG")]
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DropStreamOptions {
    #[ddl(static, sql = "DROP STREAM")]
    pub(crate) drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowStreamOptions {
    #[ddl(static, sql = "SHOW")]
    pub(crate) show: (),
    #[ddl(keyword, sql = "TERSE")]
    pub terse: bool,
    #[ddl(static, sql = "STREAMS")]
    pub(crate) streams: (),
    #[ddl(keyword)]
    pub like: Option<Like>,
    #[ddl(keyword)]
    pub r#in: Option<In>,
    #[ddl(keyword)]
    pub starts_with: Option<StartsWith>,
    #[ddl(keyword)]
    pub limit: Option<LimitFrom>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DescribeStreamOptions {
    #[ddl(static, sql = "DESCRIBE STREAM")]
    pub(crate) describe: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
}

/// `AT (...)` or `BEFORE (...)`, the point the stream starts tracking from.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(at, before))]
pub struct OnStream {
    #[ddl(keyword, sql = "AT")]
    pub at: bool,
    #[ddl(keyword, sql = "BEFORE")]
    pub before: bool,
    #[ddl(list)]
    #[validate(nested)]
    pub statement: OnStreamStatement,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(timestamp, offset, statement, stream))]
pub struct OnStreamStatement {
    #[ddl(parameter, arrow_equals, sql = "TIMESTAMP")]
    pub timestamp: Option<String>,
    #[ddl(parameter, arrow_equals, sql = "OFFSET")]
    pub offset: Option<String>,
    #[ddl(parameter, arrow_equals, single_quotes, sql = "STATEMENT")]
    pub statement: Option<String>,
    #[ddl(parameter, arrow_equals, single_quotes, sql = "STREAM")]
    pub stream: Option<String>,
}
