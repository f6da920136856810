// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{In, Like, LimitFrom, StartsWith, TagAssociation};
use crate::identifier::SchemaObjectIdentifier;
use crate::sql::RawSql;
use snowflake_sdk_derive::{ToSql, Validate};

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateViewOptions {
    #[ddl(static, sql = "CREATE")]
    pub(crate) create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(keyword, sql = "SECURE")]
    pub secure: bool,
    #[ddl(keyword, sql = "TEMPORARY")]
    pub temporary: bool,
    #[ddl(keyword, sql = "RECURSIVE")]
    pub recursive: bool,
    #[ddl(static, sql = "VIEW")]
    pub(crate) view: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    /// Renames the query's columns; all of them or none.
    #[ddl(list)]
    #[validate(nested)]
    pub columns: Vec<ViewColumn>,
    #[ddl(keyword, sql = "COPY GRANTS")]
    pub copy_grants: bool,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
    #[ddl(parameter, sql = "CHANGE_TRACKING")]
    pub change_tracking: Option<bool>,
    #[ddl(list, sql = "TAG")]
    pub tag: Vec<TagAssociation>,
    #[ddl(parameter, no_equals, sql = "AS")]
    pub sql: RawSql,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(rename_to, set_comment, unset_comment, set_secure, unset_secure, set_change_tracking, set_tag, unset_tag))]
pub struct AlterViewOptions {
    #[ddl(static, sql = "ALTER VIEW")]
    pub(crate) alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(identifier, sql = "RENAME TO")]
    #[validate(identifier_if_set)]
    pub rename_to: Option<SchemaObjectIdentifier>,
    #[ddl(parameter, single_quotes, sql = "SET COMMENT")]
    pub set_comment: Option<String>,
    #[ddl(keyword, sql = "UNSET COMMENT")]
    pub unset_comment: bool,
    #[ddl(keyword, sql = "SET SECURE")]
    pub set_secure: bool,
    #[ddl(keyword, sql = "UNSET SECURE")]
    pub unset_secure: bool,
    #[ddl(parameter, sql = "SET CHANGE_TRACKING")]
    pub set_change_tracking: Option<bool>,
    #[ddl(list, no_parentheses, sql = "SET TAG")]
    pub set_tag: Vec<TagAssociation>,
    #[ddl(list, no_parentheses, sql = "UNSET TAG")]
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DropViewOptions {
    #[ddl(static, sql = "DROP VIEW")]
    pub(crate) drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowViewOptions {
    #[ddl(static, sql = "SHOW")]
    pub(crate) show: (),
    #[ddl(keyword, sql = "TERSE")]
    pub terse: bool,
    #[ddl(static, sql = "VIEWS")]
    pub(crate) views: (),
    #[ddl(keyword)]
    pub like: Option<Like>,
    #[ddl(keyword)]
    pub r#in: Option<In>,
    #[ddl(keyword)]
    pub starts_with: Option<StartsWith>,
    #[ddl(keyword)]
    pub limit: Option<LimitFrom>,
}

/// One row per column of the view.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DescribeViewOptions {
    #[ddl(static, sql = "DESCRIBE VIEW")]
    pub(crate) describe: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(name))]
pub struct ViewColumn {
    #[ddl(parameter, double_quotes)]
    pub name: String,
    #[ddl(identifier, sql = "MASKING POLICY")]
    #[validate(identifier_if_set)]
    pub masking_policy: Option<SchemaObjectIdentifier>,
    #[ddl(parameter, no_equals, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}
