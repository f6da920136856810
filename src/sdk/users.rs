use snowflake_sdk_derive::{SnowflakeDeserialize, ToSql, Validate};

use super::common::{non_empty, split_list, Like, LimitFrom, Properties, PropertyRow, StartsWith, TagAssociation, Timestamp};
use crate::client::Client;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{AccountObjectIdentifier, ObjectIdentifier, SchemaObjectIdentifier};
use crate::validation::{ValidationError, ValidationErrors};

/// Properties accepted by `CREATE USER` and `ALTER USER ... SET`.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct UserProperties {
    #[ddl(parameter, single_quotes, sql = "PASSWORD")]
    pub password: Option<String>,
    #[ddl(parameter, single_quotes, sql = "LOGIN_NAME")]
    pub login_name: Option<String>,
    #[ddl(parameter, single_quotes, sql = "DISPLAY_NAME")]
    pub display_name: Option<String>,
    #[ddl(parameter, single_quotes, sql = "FIRST_NAME")]
    pub first_name: Option<String>,
    #[ddl(parameter, single_quotes, sql = "MIDDLE_NAME")]
    pub middle_name: Option<String>,
    #[ddl(parameter, single_quotes, sql = "LAST_NAME")]
    pub last_name: Option<String>,
    #[ddl(parameter, single_quotes, sql = "EMAIL")]
    pub email: Option<String>,
    #[ddl(parameter, sql = "MUST_CHANGE_PASSWORD")]
    pub must_change_password: Option<bool>,
    #[ddl(parameter, sql = "DISABLED")]
    pub disabled: Option<bool>,
    #[ddl(parameter, sql = "DAYS_TO_EXPIRY")]
    pub days_to_expiry: Option<u32>,
    #[ddl(parameter, sql = "MINS_TO_UNLOCK")]
    pub mins_to_unlock: Option<u32>,
    #[ddl(identifier, equals, sql = "DEFAULT_WAREHOUSE")]
    #[validate(identifier_if_set)]
    pub default_warehouse: Option<AccountObjectIdentifier>,
    #[ddl(parameter, single_quotes, sql = "DEFAULT_NAMESPACE")]
    pub default_namespace: Option<String>,
    #[ddl(identifier, equals, sql = "DEFAULT_ROLE")]
    #[validate(identifier_if_set)]
    pub default_role: Option<AccountObjectIdentifier>,
    #[ddl(list, equals, single_quotes, sql = "DEFAULT_SECONDARY_ROLES")]
    pub default_secondary_roles: Vec<String>,
    #[ddl(parameter, single_quotes, sql = "RSA_PUBLIC_KEY")]
    pub rsa_public_key: Option<String>,
    #[ddl(parameter, single_quotes, sql = "RSA_PUBLIC_KEY_2")]
    pub rsa_public_key_2: Option<String>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateUserOptions {
    #[ddl(static, sql = "CREATE")]
    create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "USER")]
    user: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(keyword)]
    #[validate(nested)]
    pub properties: Option<UserProperties>,
    #[ddl(list, sql = "WITH TAG")]
    pub tag: Vec<TagAssociation>,
}

impl CreateUserOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        CreateUserOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(
    new_name,
    reset_password,
    abort_all_queries,
    set,
    unset,
    set_tag,
    unset_tag
))]
#[validate(custom = "validate_set")]
pub struct AlterUserOptions {
    #[ddl(static, sql = "ALTER USER")]
    alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(identifier, sql = "RENAME TO")]
    #[validate(identifier_if_set)]
    pub new_name: Option<AccountObjectIdentifier>,
    #[ddl(keyword, sql = "RESET PASSWORD")]
    pub reset_password: bool,
    #[ddl(keyword, sql = "ABORT ALL QUERIES")]
    pub abort_all_queries: bool,
    #[ddl(keyword, sql = "SET")]
    #[validate(nested)]
    pub set: Option<UserProperties>,
    #[ddl(list, no_parentheses, sql = "UNSET")]
    #[validate(nested)]
    pub unset: Option<UserUnset>,
    #[ddl(list, no_parentheses, sql = "SET TAG")]
    pub set_tag: Vec<TagAssociation>,
    #[ddl(list, no_parentheses, sql = "UNSET TAG")]
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl AlterUserOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        AlterUserOptions {
            name,
            ..Default::default()
        }
    }
}

fn validate_set(opts: &AlterUserOptions, errors: &mut ValidationErrors) {
    if opts.set.as_ref().is_some_and(|set| *set == UserProperties::default()) {
        errors.push(ValidationError::Invalid {
            struct_name: "AlterUserOptions",
            message: "set must change at least one property".to_string(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(
    password,
    login_name,
    display_name,
    first_name,
    middle_name,
    last_name,
    email,
    must_change_password,
    disabled,
    days_to_expiry,
    mins_to_unlock,
    default_warehouse,
    default_namespace,
    default_role,
    default_secondary_roles,
    rsa_public_key,
    rsa_public_key_2,
    comment
))]
pub struct UserUnset {
    #[ddl(keyword, sql = "PASSWORD")]
    pub password: bool,
    #[ddl(keyword, sql = "LOGIN_NAME")]
    pub login_name: bool,
    #[ddl(keyword, sql = "DISPLAY_NAME")]
    pub display_name: bool,
    #[ddl(keyword, sql = "FIRST_NAME")]
    pub first_name: bool,
    #[ddl(keyword, sql = "MIDDLE_NAME")]
    pub middle_name: bool,
    #[ddl(keyword, sql = "LAST_NAME")]
    pub last_name: bool,
    #[ddl(keyword, sql = "EMAIL")]
    pub email: bool,
    #[ddl(keyword, sql = "MUST_CHANGE_PASSWORD")]
    pub must_change_password: bool,
    #[ddl(keyword, sql = "DISABLED")]
    pub disabled: bool,
    #[ddl(keyword, sql = "DAYS_TO_EXPIRY")]
    pub days_to_expiry: bool,
    #[ddl(keyword, sql = "MINS_TO_UNLOCK")]
    pub mins_to_unlock: bool,
    #[ddl(keyword, sql = "DEFAULT_WAREHOUSE")]
    pub default_warehouse: bool,
    #[ddl(keyword, sql = "DEFAULT_NAMESPACE")]
    pub default_namespace: bool,
    #[ddl(keyword, sql = "DEFAULT_ROLE")]
    pub default_role: bool,
    #[ddl(keyword, sql = "DEFAULT_SECONDARY_ROLES")]
    pub default_secondary_roles: bool,
    #[ddl(keyword, sql = "RSA_PUBLIC_KEY")]
    pub rsa_public_key: bool,
    #[ddl(keyword, sql = "RSA_PUBLIC_KEY_2")]
    pub rsa_public_key_2: bool,
    #[ddl(keyword, sql = "COMMENT")]
    pub comment: bool,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DropUserOptions {
    #[ddl(static, sql = "DROP USER")]
    drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
}

impl DropUserOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        DropUserOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowUsersOptions {
    #[ddl(static, sql = "SHOW")]
    show: (),
    #[ddl(keyword, sql = "TERSE")]
    pub terse: bool,
    #[ddl(static, sql = "USERS")]
    users: (),
    #[ddl(keyword)]
    pub like: Option<Like>,
    #[ddl(keyword)]
    pub starts_with: Option<StartsWith>,
    #[ddl(keyword)]
    pub limit: Option<LimitFrom>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
struct DescribeUserOptions {
    #[ddl(static, sql = "DESCRIBE USER")]
    describe: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    name: AccountObjectIdentifier,
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct UserRow {
    name: String,
    created_on: Option<Timestamp>,
    login_name: Option<String>,
    display_name: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    mins_to_unlock: Option<String>,
    days_to_expiry: Option<String>,
    comment: Option<String>,
    disabled: Option<bool>,
    must_change_password: Option<bool>,
    snowflake_lock: Option<bool>,
    default_warehouse: Option<String>,
    default_namespace: Option<String>,
    default_role: Option<String>,
    default_secondary_roles: Option<String>,
    owner: Option<String>,
    last_success_login: Option<Timestamp>,
    expires_at_time: Option<Timestamp>,
    locked_until_time: Option<Timestamp>,
    has_password: Option<bool>,
    has_rsa_public_key: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub name: String,
    pub created_on: Option<Timestamp>,
    pub login_name: Option<String>,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mins_to_unlock: Option<u32>,
    pub days_to_expiry: Option<f64>,
    pub comment: Option<String>,
    pub disabled: bool,
    pub must_change_password: bool,
    pub snowflake_lock: bool,
    pub default_warehouse: Option<String>,
    pub default_namespace: Option<String>,
    pub default_role: Option<String>,
    pub default_secondary_roles: Vec<String>,
    pub owner: Option<String>,
    pub last_success_login: Option<Timestamp>,
    pub expires_at_time: Option<Timestamp>,
    pub locked_until_time: Option<Timestamp>,
    pub has_password: bool,
    pub has_rsa_public_key: bool,
}

impl User {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            name: row.name,
            created_on: row.created_on,
            login_name: non_empty(row.login_name),
            display_name: non_empty(row.display_name),
            first_name: non_empty(row.first_name),
            last_name: non_empty(row.last_name),
            email: non_empty(row.email),
            mins_to_unlock: row.mins_to_unlock.and_then(|value| value.trim().parse().ok()),
            days_to_expiry: row.days_to_expiry.and_then(|value| value.trim().parse().ok()),
            comment: non_empty(row.comment),
            disabled: row.disabled.unwrap_or_default(),
            must_change_password: row.must_change_password.unwrap_or_default(),
            snowflake_lock: row.snowflake_lock.unwrap_or_default(),
            default_warehouse: non_empty(row.default_warehouse),
            default_namespace: non_empty(row.default_namespace),
            default_role: non_empty(row.default_role),
            default_secondary_roles: split_list(row.default_secondary_roles.as_deref()),
            owner: non_empty(row.owner),
            last_success_login: row.last_success_login,
            expires_at_time: row.expires_at_time,
            locked_until_time: row.locked_until_time,
            has_password: row.has_password.unwrap_or_default(),
            has_rsa_public_key: row.has_rsa_public_key.unwrap_or_default(),
        }
    }
}

pub struct Users<'a> {
    client: &'a Client,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Users { client }
    }

    pub async fn create(&self, ctx: &Context, opts: &CreateUserOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn alter(&self, ctx: &Context, opts: &AlterUserOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn drop(&self, ctx: &Context, opts: &DropUserOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn show(&self, ctx: &Context, opts: &ShowUsersOptions) -> Result<Vec<User>> {
        let rows: Vec<UserRow> = self.client.validate_and_query(ctx, opts).await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    pub async fn show_by_id(&self, ctx: &Context, id: &AccountObjectIdentifier) -> Result<User> {
        let opts = ShowUsersOptions {
            like: Some(Like::name(id)),
            ..Default::default()
        };
        self.show(ctx, &opts)
            .await?
            .into_iter()
            .find(|user| user.name == id.name())
            .ok_or_else(|| Error::object_not_found(id))
    }

    pub async fn describe(&self, ctx: &Context, id: &AccountObjectIdentifier) -> Result<Properties> {
        let opts = DescribeUserOptions {
            name: id.clone(),
            ..Default::default()
        };
        let rows: Vec<PropertyRow> = self.client.validate_and_query(ctx, &opts).await?;
        Ok(rows.into())
    }
}
