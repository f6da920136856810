use snowflake_sdk_derive::{SnowflakeDeserialize, ToSql, Validate};

use super::common::{non_empty, Like, TagAssociation, Timestamp};
use crate::client::Client;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{AccountObjectIdentifier, ObjectIdentifier, SchemaObjectIdentifier};

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateRoleOptions {
    #[ddl(static, sql = "CREATE")]
    create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "ROLE")]
    role: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
    #[ddl(list, sql = "WITH TAG")]
    pub tag: Vec<TagAssociation>,
}

impl CreateRoleOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        CreateRoleOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(new_name, set_comment, unset_comment, set_tag, unset_tag))]
pub struct AlterRoleOptions {
    #[ddl(static, sql = "ALTER ROLE")]
    alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(identifier, sql = "RENAME TO")]
    #[validate(identifier_if_set)]
    pub new_name: Option<AccountObjectIdentifier>,
    #[ddl(parameter, single_quotes, sql = "SET COMMENT")]
    pub set_comment: Option<String>,
    #[ddl(keyword, sql = "UNSET COMMENT")]
    pub unset_comment: bool,
    #[ddl(list, no_parentheses, sql = "SET TAG")]
    pub set_tag: Vec<TagAssociation>,
    #[ddl(list, no_parentheses, sql = "UNSET TAG")]
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl AlterRoleOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        AlterRoleOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DropRoleOptions {
    #[ddl(static, sql = "DROP ROLE")]
    drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
}

impl DropRoleOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        DropRoleOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowRolesOptions {
    #[ddl(static, sql = "SHOW ROLES")]
    show: (),
    #[ddl(keyword)]
    pub like: Option<Like>,
}

/// Grantee of `GRANT ROLE` and `REVOKE ROLE`.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(role, user))]
pub struct RoleGrantee {
    #[ddl(identifier, sql = "ROLE")]
    #[validate(identifier_if_set)]
    pub role: Option<AccountObjectIdentifier>,
    #[ddl(identifier, sql = "USER")]
    #[validate(identifier_if_set)]
    pub user: Option<AccountObjectIdentifier>,
}

impl RoleGrantee {
    pub fn role(role: AccountObjectIdentifier) -> Self {
        RoleGrantee {
            role: Some(role),
            user: None,
        }
    }

    pub fn user(user: AccountObjectIdentifier) -> Self {
        RoleGrantee {
            role: None,
            user: Some(user),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct GrantRoleOptions {
    #[ddl(static, sql = "GRANT ROLE")]
    grant: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(keyword, sql = "TO")]
    #[validate(nested)]
    pub grant_to: RoleGrantee,
}

impl GrantRoleOptions {
    pub fn new(name: AccountObjectIdentifier, grant_to: RoleGrantee) -> Self {
        GrantRoleOptions {
            name,
            grant_to,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct RevokeRoleOptions {
    #[ddl(static, sql = "REVOKE ROLE")]
    revoke: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(keyword, sql = "FROM")]
    #[validate(nested)]
    pub revoke_from: RoleGrantee,
}

impl RevokeRoleOptions {
    pub fn new(name: AccountObjectIdentifier, revoke_from: RoleGrantee) -> Self {
        RevokeRoleOptions {
            name,
            revoke_from,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct RoleRow {
    created_on: Timestamp,
    name: String,
    is_default: Option<bool>,
    is_current: Option<bool>,
    is_inherited: Option<bool>,
    assigned_to_users: Option<u64>,
    granted_to_roles: Option<u64>,
    granted_roles: Option<u64>,
    owner: Option<String>,
    comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub created_on: Timestamp,
    pub name: String,
    pub is_default: bool,
    pub is_current: bool,
    pub is_inherited: bool,
    pub assigned_to_users: u64,
    pub granted_to_roles: u64,
    pub granted_roles: u64,
    pub owner: Option<String>,
    pub comment: Option<String>,
}

impl Role {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            created_on: row.created_on,
            name: row.name,
            is_default: row.is_default.unwrap_or_default(),
            is_current: row.is_current.unwrap_or_default(),
            is_inherited: row.is_inherited.unwrap_or_default(),
            assigned_to_users: row.assigned_to_users.unwrap_or_default(),
            granted_to_roles: row.granted_to_roles.unwrap_or_default(),
            granted_roles: row.granted_roles.unwrap_or_default(),
            owner: non_empty(row.owner),
            comment: non_empty(row.comment),
        }
    }
}

pub struct Roles<'a> {
    client: &'a Client,
}

impl<'a> Roles<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Roles { client }
    }

    pub async fn create(&self, ctx: &Context, opts: &CreateRoleOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn alter(&self, ctx: &Context, opts: &AlterRoleOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn drop(&self, ctx: &Context, opts: &DropRoleOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn show(&self, ctx: &Context, opts: &ShowRolesOptions) -> Result<Vec<Role>> {
        let rows: Vec<RoleRow> = self.client.validate_and_query(ctx, opts).await?;
        Ok(rows.into_iter().map(Role::from).collect())
    }

    pub async fn show_by_id(&self, ctx: &Context, id: &AccountObjectIdentifier) -> Result<Role> {
        let opts = ShowRolesOptions {
            like: Some(Like::name(id)),
            ..Default::default()
        };
        self.show(ctx, &opts)
            .await?
            .into_iter()
            .find(|role| role.name == id.name())
            .ok_or_else(|| Error::object_not_found(id))
    }

    pub async fn grant(&self, ctx: &Context, opts: &GrantRoleOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn revoke(&self, ctx: &Context, opts: &RevokeRoleOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }
}
