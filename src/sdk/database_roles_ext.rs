use snowflake_sdk_derive::SnowflakeDeserialize;

use super::common::{non_empty, Like, Timestamp};
use super::database_roles_dto_gen::ShowDatabaseRoleRequest;
use super::database_roles_gen::{AlterDatabaseRoleOptions, DatabaseRoleGrantee, DatabaseRoleSet, DatabaseRoleUnset};
use super::database_roles_impl_gen::DatabaseRoles;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{AccountObjectIdentifier, DatabaseObjectIdentifier, ObjectIdentifier};
use crate::validation::{same_database, ValidationErrors};

pub(crate) fn validate_alter_database_role(opts: &AlterDatabaseRoleOptions, errors: &mut ValidationErrors) {
    if let Some(rename) = &opts.rename {
        same_database(
            errors,
            "AlterDatabaseRoleOptions",
            "rename",
            opts.name.database_name(),
            rename.database_name(),
        );
    }
}

impl DatabaseRoleGrantee {
    pub fn role(role: AccountObjectIdentifier) -> Self {
        DatabaseRoleGrantee {
            role: Some(role),
            database_role: None,
        }
    }

    pub fn database_role(database_role: DatabaseObjectIdentifier) -> Self {
        DatabaseRoleGrantee {
            role: None,
            database_role: Some(database_role),
        }
    }
}

impl DatabaseRoleSet {
    pub fn comment(comment: impl Into<String>) -> Self {
        DatabaseRoleSet {
            comment: comment.into(),
        }
    }
}

impl DatabaseRoleUnset {
    pub fn comment() -> Self {
        DatabaseRoleUnset { comment: true }
    }
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
pub(crate) struct DatabaseRoleRow {
    created_on: Timestamp,
    name: String,
    is_default: Option<bool>,
    is_current: Option<bool>,
    is_inherited: Option<bool>,
    granted_to_roles: Option<u64>,
    granted_to_database_roles: Option<u64>,
    granted_database_roles: Option<u64>,
    owner: Option<String>,
    comment: Option<String>,
    owner_role_type: Option<String>,
}

/// Row of `SHOW DATABASE ROLES`; the database is the one the statement was scoped to.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseRole {
    pub created_on: Timestamp,
    pub name: String,
    pub is_default: bool,
    pub is_current: bool,
    pub is_inherited: bool,
    pub granted_to_roles: u64,
    pub granted_to_database_roles: u64,
    pub granted_database_roles: u64,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub owner_role_type: Option<String>,
}

impl DatabaseRole {
    pub fn id(&self, database: &AccountObjectIdentifier) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(database.name(), &self.name)
    }
}

impl From<DatabaseRoleRow> for DatabaseRole {
    fn from(row: DatabaseRoleRow) -> Self {
        DatabaseRole {
            created_on: row.created_on,
            name: row.name,
            is_default: row.is_default.unwrap_or_default(),
            is_current: row.is_current.unwrap_or_default(),
            is_inherited: row.is_inherited.unwrap_or_default(),
            granted_to_roles: row.granted_to_roles.unwrap_or_default(),
            granted_to_database_roles: row.granted_to_database_roles.unwrap_or_default(),
            granted_database_roles: row.granted_database_roles.unwrap_or_default(),
            owner: non_empty(row.owner),
            comment: non_empty(row.comment),
            owner_role_type: non_empty(row.owner_role_type),
        }
    }
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
pub(crate) struct DatabaseRoleDetailsRow {
    created_on: Timestamp,
    name: String,
    comment: Option<String>,
    owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseRoleDetails {
    pub created_on: Timestamp,
    pub name: String,
    pub comment: Option<String>,
    pub owner: Option<String>,
}

impl From<DatabaseRoleDetailsRow> for DatabaseRoleDetails {
    fn from(row: DatabaseRoleDetailsRow) -> Self {
        DatabaseRoleDetails {
            created_on: row.created_on,
            name: row.name,
            comment: non_empty(row.comment),
            owner: non_empty(row.owner),
        }
    }
}

impl DatabaseRoles<'_> {
    pub async fn show_by_id(&self, ctx: &Context, id: &DatabaseObjectIdentifier) -> Result<DatabaseRole> {
        let request = ShowDatabaseRoleRequest::new(id.database_id()).with_like(Like::name(id));
        self.show(ctx, &request)
            .await?
            .into_iter()
            .find(|role| role.name == id.name())
            .ok_or_else(|| Error::object_not_found(id))
    }
}
