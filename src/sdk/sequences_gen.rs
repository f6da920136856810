// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{In, Like};
use super::sequences_ext::ValuesBehavior;
use crate::identifier::SchemaObjectIdentifier;
use snowflake_sdk_derive::{ToSql, Validate};

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateSequenceOptions {
    #[ddl(static, sql = "CREATE")]
    pub(crate) create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "SEQUENCE")]
    pub(crate) sequence: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(parameter, sql = "START")]
    pub start: Option<i64>,
    #[ddl(parameter, sql = "INCREMENT")]
    pub increment: Option<i64>,
    #[ddl(keyword)]
    pub values_behavior: Option<ValuesBehavior>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(rename_to, set_increment, set, unset_comment))]
pub struct AlterSequenceOptions {
    #[ddl(static, sql = "ALTER SEQUENCE")]
    pub(crate) alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(identifier, sql = "RENAME TO")]
    #[validate(identifier_if_set)]
    pub rename_to: Option<SchemaObjectIdentifier>,
    #[ddl(parameter, sql = "SET INCREMENT")]
    pub set_increment: Option<i64>,
    #[ddl(keyword, sql = "SET")]
    #[validate(nested)]
    pub set: Option<SequenceSet>,
    #[ddl(keyword, sql = "UNSET COMMENT")]
    pub unset_comment: bool,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(cascade, restrict))]
pub struct DropSequenceOptions {
    #[ddl(static, sql = "DROP SEQUENCE")]
    pub(crate) drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(keyword, sql = "CASCADE")]
    pub cascade: bool,
    #[ddl(keyword, sql = "RESTRICT")]
    pub restrict: bool,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowSequenceOptions {
    #[ddl(static, sql = "SHOW SEQUENCES")]
    pub(crate) show: (),
    #[ddl(keyword)]
    pub like: Option<Like>,
    #[ddl(keyword)]
    pub r#in: Option<In>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DescribeSequenceOptions {
    #[ddl(static, sql = "DESCRIBE SEQUENCE")]
    pub(crate) describe: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(values_behavior, comment))]
pub struct SequenceSet {
    #[ddl(keyword)]
    pub values_behavior: Option<ValuesBehavior>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}
