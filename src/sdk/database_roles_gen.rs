// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{Like, LimitFrom, TagAssociation};
use crate::identifier::{AccountObjectIdentifier, DatabaseObjectIdentifier, SchemaObjectIdentifier};
use snowflake_sdk_derive::{ToSql, Validate};

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateDatabaseRoleOptions {
    #[ddl(static, sql = "CREATE")]
    pub(crate) create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "DATABASE ROLE")]
    pub(crate) database_role: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: DatabaseObjectIdentifier,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

/// The new name must stay in the database of the role.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(rename, set, unset, set_tag, unset_tag))]
#[validate(custom = "super::database_roles_ext::validate_alter_database_role")]
pub struct AlterDatabaseRoleOptions {
    #[ddl(static, sql = "ALTER DATABASE ROLE")]
    pub(crate) alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: DatabaseObjectIdentifier,
    #[ddl(identifier, sql = "RENAME TO")]
    #[validate(identifier_if_set)]
    pub rename: Option<DatabaseObjectIdentifier>,
    #[ddl(keyword, sql = "SET")]
    #[validate(nested)]
    pub set: Option<DatabaseRoleSet>,
    #[ddl(keyword, sql = "UNSET")]
    #[validate(nested)]
    pub unset: Option<DatabaseRoleUnset>,
    #[ddl(list, no_parentheses, sql = "SET TAG")]
    pub set_tag: Vec<TagAssociation>,
    #[ddl(list, no_parentheses, sql = "UNSET TAG")]
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DropDatabaseRoleOptions {
    #[ddl(static, sql = "DROP DATABASE ROLE")]
    pub(crate) drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: DatabaseObjectIdentifier,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowDatabaseRoleOptions {
    #[ddl(static, sql = "SHOW DATABASE ROLES")]
    pub(crate) show: (),
    #[ddl(keyword)]
    pub like: Option<Like>,
    #[ddl(identifier, sql = "IN DATABASE")]
    #[validate(identifier)]
    pub database: AccountObjectIdentifier,
    #[ddl(keyword)]
    pub limit: Option<LimitFrom>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DescribeDatabaseRoleOptions {
    #[ddl(static, sql = "DESCRIBE DATABASE ROLE")]
    pub(crate) describe: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: DatabaseObjectIdentifier,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct GrantDatabaseRoleOptions {
    #[ddl(static, sql = "GRANT DATABASE ROLE")]
    pub(crate) grant: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: DatabaseObjectIdentifier,
    #[ddl(keyword, sql = "TO")]
    #[validate(nested)]
    pub to: DatabaseRoleGrantee,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct RevokeDatabaseRoleOptions {
    #[ddl(static, sql = "REVOKE DATABASE ROLE")]
    pub(crate) revoke: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: DatabaseObjectIdentifier,
    #[ddl(keyword, sql = "FROM")]
    #[validate(nested)]
    pub from: DatabaseRoleGrantee,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(comment))]
pub struct DatabaseRoleSet {
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(comment))]
pub struct DatabaseRoleUnset {
    #[ddl(keyword, sql = "COMMENT")]
    pub comment: bool,
}

/// `ROLE <role>` or `DATABASE ROLE <database role>`.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(role, database_role))]
pub struct DatabaseRoleGrantee {
    #[ddl(identifier, sql = "ROLE")]
    #[validate(identifier_if_set)]
    pub role: Option<AccountObjectIdentifier>,
    #[ddl(identifier, sql = "DATABASE ROLE")]
    #[validate(identifier_if_set)]
    pub database_role: Option<DatabaseObjectIdentifier>,
}
