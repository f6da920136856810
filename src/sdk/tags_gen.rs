// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{In, Like};
use crate::identifier::SchemaObjectIdentifier;
use snowflake_sdk_derive::{ToSql, Validate};

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateTagOptions {
    #[ddl(static, sql = "CREATE")]
    pub(crate) create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "TAG")]
    pub(crate) tag: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(keyword)]
    #[validate(nested)]
    pub allowed_values: Option<AllowedValues>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

/// A rename keeps the tag in its database.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(rename, add, drop, set, unset))]
#[validate(custom = "super::tags_ext::validate_alter_tag")]
pub struct AlterTagOptions {
    #[ddl(static, sql = "ALTER TAG")]
    pub(crate) alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(identifier, sql = "RENAME TO")]
    #[validate(identifier_if_set)]
    pub rename: Option<SchemaObjectIdentifier>,
    #[ddl(keyword, sql = "ADD")]
    #[validate(nested)]
    pub add: Option<AllowedValues>,
    #[ddl(keyword, sql = "DROP")]
    #[validate(nested)]
    pub drop: Option<AllowedValues>,
    #[ddl(keyword, sql = "SET")]
    #[validate(nested)]
    pub set: Option<TagSet>,
    #[ddl(keyword, sql = "UNSET")]
    #[validate(nested)]
    pub unset: Option<TagUnset>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DropTagOptions {
    #[ddl(static, sql = "DROP TAG")]
    pub(crate) drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct UndropTagOptions {
    #[ddl(static, sql = "UNDROP TAG")]
    pub(crate) undrop: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowTagOptions {
    #[ddl(static, sql = "SHOW TAGS")]
    pub(crate) show: (),
    #[ddl(keyword)]
    pub like: Option<Like>,
    #[ddl(keyword)]
    pub r#in: Option<In>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(values))]
pub struct AllowedValues {
    #[ddl(list, no_parentheses, single_quotes, sql = "ALLOWED_VALUES")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct TagMaskingPolicy {
    #[ddl(identifier, sql = "MASKING POLICY")]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(masking_policies, comment))]
pub struct TagSet {
    #[ddl(list, no_parentheses)]
    #[validate(nested)]
    pub masking_policies: Vec<TagMaskingPolicy>,
    #[ddl(keyword, sql = "FORCE")]
    pub force: bool,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(allowed_values, masking_policies, comment))]
pub struct TagUnset {
    #[ddl(keyword, sql = "ALLOWED_VALUES")]
    pub allowed_values: bool,
    #[ddl(list, no_parentheses)]
    #[validate(nested)]
    pub masking_policies: Vec<TagMaskingPolicy>,
    #[ddl(keyword, sql = "COMMENT")]
    pub comment: bool,
}
