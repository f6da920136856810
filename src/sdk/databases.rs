use snowflake_sdk_derive::{SnowflakeDeserialize, ToSql, Validate};

use super::common::{Like, LimitFrom, StartsWith, TagAssociation, Timestamp};
use crate::client::Client;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{AccountObjectIdentifier, ExternalObjectIdentifier, ObjectIdentifier, SchemaObjectIdentifier};

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateDatabaseOptions {
    #[ddl(static, sql = "CREATE")]
    create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(keyword, sql = "TRANSIENT")]
    pub transient: bool,
    #[ddl(static, sql = "DATABASE")]
    database: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(identifier, sql = "CLONE")]
    #[validate(identifier_if_set)]
    pub clone: Option<AccountObjectIdentifier>,
    #[ddl(parameter, sql = "DATA_RETENTION_TIME_IN_DAYS")]
    pub data_retention_time_in_days: Option<u32>,
    #[ddl(parameter, sql = "MAX_DATA_EXTENSION_TIME_IN_DAYS")]
    pub max_data_extension_time_in_days: Option<u32>,
    #[ddl(parameter, single_quotes, sql = "DEFAULT_DDL_COLLATION")]
    pub default_ddl_collation: Option<String>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
    #[ddl(list, sql = "TAG")]
    pub tag: Vec<TagAssociation>,
}

impl CreateDatabaseOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        CreateDatabaseOptions {
            name,
            ..Default::default()
        }
    }
}

/// `CREATE DATABASE ... FROM SHARE <provider>.<share>`.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateSharedDatabaseOptions {
    #[ddl(static, sql = "CREATE")]
    create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "DATABASE")]
    database: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(identifier, sql = "FROM SHARE")]
    #[validate(identifier)]
    pub from_share: ExternalObjectIdentifier,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

impl CreateSharedDatabaseOptions {
    pub fn new(name: AccountObjectIdentifier, from_share: ExternalObjectIdentifier) -> Self {
        CreateSharedDatabaseOptions {
            name,
            from_share,
            ..Default::default()
        }
    }
}

/// `CREATE DATABASE ... AS REPLICA OF <account>.<primary>`.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct CreateSecondaryDatabaseOptions {
    #[ddl(static, sql = "CREATE")]
    create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(keyword, sql = "TRANSIENT")]
    pub transient: bool,
    #[ddl(static, sql = "DATABASE")]
    database: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(identifier, sql = "AS REPLICA OF")]
    #[validate(identifier)]
    pub primary_database: ExternalObjectIdentifier,
    #[ddl(parameter, sql = "DATA_RETENTION_TIME_IN_DAYS")]
    pub data_retention_time_in_days: Option<u32>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

impl CreateSecondaryDatabaseOptions {
    pub fn new(name: AccountObjectIdentifier, primary_database: ExternalObjectIdentifier) -> Self {
        CreateSecondaryDatabaseOptions {
            name,
            primary_database,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(new_name, swap_with, set, unset, set_tag, unset_tag))]
pub struct AlterDatabaseOptions {
    #[ddl(static, sql = "ALTER DATABASE")]
    alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(identifier, sql = "RENAME TO")]
    #[validate(identifier_if_set)]
    pub new_name: Option<AccountObjectIdentifier>,
    #[ddl(identifier, sql = "SWAP WITH")]
    #[validate(identifier_if_set)]
    pub swap_with: Option<AccountObjectIdentifier>,
    #[ddl(keyword, sql = "SET")]
    #[validate(nested)]
    pub set: Option<DatabaseSet>,
    #[ddl(list, no_parentheses, sql = "UNSET")]
    #[validate(nested)]
    pub unset: Option<DatabaseUnset>,
    #[ddl(list, no_parentheses, sql = "SET TAG")]
    pub set_tag: Vec<TagAssociation>,
    #[ddl(list, no_parentheses, sql = "UNSET TAG")]
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl AlterDatabaseOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        AlterDatabaseOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(
    data_retention_time_in_days,
    max_data_extension_time_in_days,
    default_ddl_collation,
    comment
))]
pub struct DatabaseSet {
    #[ddl(parameter, sql = "DATA_RETENTION_TIME_IN_DAYS")]
    pub data_retention_time_in_days: Option<u32>,
    #[ddl(parameter, sql = "MAX_DATA_EXTENSION_TIME_IN_DAYS")]
    pub max_data_extension_time_in_days: Option<u32>,
    #[ddl(parameter, single_quotes, sql = "DEFAULT_DDL_COLLATION")]
    pub default_ddl_collation: Option<String>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(
    data_retention_time_in_days,
    max_data_extension_time_in_days,
    default_ddl_collation,
    comment
))]
pub struct DatabaseUnset {
    #[ddl(keyword, sql = "DATA_RETENTION_TIME_IN_DAYS")]
    pub data_retention_time_in_days: bool,
    #[ddl(keyword, sql = "MAX_DATA_EXTENSION_TIME_IN_DAYS")]
    pub max_data_extension_time_in_days: bool,
    #[ddl(keyword, sql = "DEFAULT_DDL_COLLATION")]
    pub default_ddl_collation: bool,
    #[ddl(keyword, sql = "COMMENT")]
    pub comment: bool,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(cascade, restrict))]
pub struct DropDatabaseOptions {
    #[ddl(static, sql = "DROP DATABASE")]
    drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(keyword, sql = "CASCADE")]
    pub cascade: bool,
    #[ddl(keyword, sql = "RESTRICT")]
    pub restrict: bool,
}

impl DropDatabaseOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        DropDatabaseOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct UndropDatabaseOptions {
    #[ddl(static, sql = "UNDROP DATABASE")]
    undrop: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
}

impl UndropDatabaseOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        UndropDatabaseOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowDatabasesOptions {
    #[ddl(static, sql = "SHOW")]
    show: (),
    #[ddl(keyword, sql = "TERSE")]
    pub terse: bool,
    #[ddl(static, sql = "DATABASES")]
    databases: (),
    #[ddl(keyword, sql = "HISTORY")]
    pub history: bool,
    #[ddl(keyword)]
    pub like: Option<Like>,
    #[ddl(keyword)]
    pub starts_with: Option<StartsWith>,
    #[ddl(keyword)]
    pub limit: Option<LimitFrom>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DescribeDatabaseOptions {
    #[ddl(static, sql = "DESCRIBE DATABASE")]
    describe: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct DatabaseRow {
    created_on: Timestamp,
    name: String,
    is_default: Option<bool>,
    is_current: Option<bool>,
    origin: Option<String>,
    owner: Option<String>,
    comment: Option<String>,
    options: Option<String>,
    retention_time: Option<String>,
    dropped_on: Option<Timestamp>,
    kind: Option<String>,
    owner_role_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    pub created_on: Timestamp,
    pub name: String,
    pub is_default: bool,
    pub is_current: bool,
    pub origin: Option<String>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub transient: bool,
    pub retention_time: Option<u32>,
    pub dropped_on: Option<Timestamp>,
    pub kind: Option<String>,
    pub owner_role_type: Option<String>,
}

impl Database {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

impl From<DatabaseRow> for Database {
    fn from(row: DatabaseRow) -> Self {
        Database {
            created_on: row.created_on,
            name: row.name,
            is_default: row.is_default.unwrap_or_default(),
            is_current: row.is_current.unwrap_or_default(),
            origin: super::common::non_empty(row.origin),
            owner: super::common::non_empty(row.owner),
            comment: super::common::non_empty(row.comment),
            transient: row
                .options
                .is_some_and(|options| options.contains("TRANSIENT")),
            retention_time: row.retention_time.and_then(|value| value.trim().parse().ok()),
            dropped_on: row.dropped_on,
            kind: super::common::non_empty(row.kind),
            owner_role_type: super::common::non_empty(row.owner_role_type),
        }
    }
}

/// Row of `DESCRIBE DATABASE`: one per schema in the database.
#[derive(Debug, Clone, PartialEq, SnowflakeDeserialize)]
pub struct DatabaseDetailsRow {
    pub created_on: Timestamp,
    pub name: String,
    pub kind: String,
}

pub struct Databases<'a> {
    client: &'a Client,
}

impl<'a> Databases<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Databases { client }
    }

    pub async fn create(&self, ctx: &Context, opts: &CreateDatabaseOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn create_shared(&self, ctx: &Context, opts: &CreateSharedDatabaseOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn create_secondary(
        &self,
        ctx: &Context,
        opts: &CreateSecondaryDatabaseOptions,
    ) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn alter(&self, ctx: &Context, opts: &AlterDatabaseOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn drop(&self, ctx: &Context, opts: &DropDatabaseOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn undrop(&self, ctx: &Context, id: &AccountObjectIdentifier) -> Result<()> {
        self.client
            .validate_and_exec(ctx, &UndropDatabaseOptions::new(id.clone()))
            .await
    }

    pub async fn show(&self, ctx: &Context, opts: &ShowDatabasesOptions) -> Result<Vec<Database>> {
        let rows: Vec<DatabaseRow> = self.client.validate_and_query(ctx, opts).await?;
        Ok(rows.into_iter().map(Database::from).collect())
    }

    pub async fn show_by_id(&self, ctx: &Context, id: &AccountObjectIdentifier) -> Result<Database> {
        let opts = ShowDatabasesOptions {
            like: Some(Like::name(id)),
            ..Default::default()
        };
        self.show(ctx, &opts)
            .await?
            .into_iter()
            .find(|database| database.name == id.name())
            .ok_or_else(|| Error::object_not_found(id))
    }

    pub async fn describe(
        &self,
        ctx: &Context,
        id: &AccountObjectIdentifier,
    ) -> Result<Vec<DatabaseDetailsRow>> {
        let opts = DescribeDatabaseOptions {
            name: id.clone(),
            ..Default::default()
        };
        self.client.validate_and_query(ctx, &opts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::AccountIdentifier;
    use crate::sdk::testing::{assert_opts_invalid_joined_errors, assert_opts_valid_and_sql_equals};
    use crate::validation::ValidationError;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("db")
    }

    #[test]
    fn create_with_everything() {
        let mut opts = CreateDatabaseOptions::new(id());
        opts.or_replace = true;
        opts.transient = true;
        opts.clone = Some(AccountObjectIdentifier::new("source"));
        opts.data_retention_time_in_days = Some(1);
        opts.max_data_extension_time_in_days = Some(10);
        opts.default_ddl_collation = Some("en_US".into());
        opts.comment = Some("test".into());
        opts.tag = vec![TagAssociation::new(SchemaObjectIdentifier::new("db", "sc", "cost"), "v")];
        assert_opts_valid_and_sql_equals(
            &opts,
            r#"CREATE OR REPLACE TRANSIENT DATABASE "db" CLONE "source" DATA_RETENTION_TIME_IN_DAYS = 1 MAX_DATA_EXTENSION_TIME_IN_DAYS = 10 DEFAULT_DDL_COLLATION = 'en_US' COMMENT = 'test' TAG ("db"."sc"."cost" = 'v')"#,
        );
    }

    #[test]
    fn create_rejects_or_replace_with_if_not_exists() {
        let mut opts = CreateDatabaseOptions::new(id());
        opts.or_replace = true;
        opts.if_not_exists = true;
        assert_opts_invalid_joined_errors(
            &opts,
            &[ValidationError::Conflicting {
                struct_name: "CreateDatabaseOptions",
                fields: vec!["or_replace", "if_not_exists"],
            }],
        );
    }

    #[test]
    fn create_from_share_and_replica() {
        let share = ExternalObjectIdentifier::new(AccountIdentifier::new("org", "acc"), "share");
        assert_opts_valid_and_sql_equals(
            &CreateSharedDatabaseOptions::new(id(), share.clone()),
            r#"CREATE DATABASE "db" FROM SHARE "org"."acc"."share""#,
        );
        assert_opts_valid_and_sql_equals(
            &CreateSecondaryDatabaseOptions::new(id(), share),
            r#"CREATE DATABASE "db" AS REPLICA OF "org"."acc"."share""#,
        );
    }

    #[test]
    fn alter_requires_exactly_one_action() {
        let opts = AlterDatabaseOptions::new(id());
        assert_opts_invalid_joined_errors(
            &opts,
            &[ValidationError::ExactlyOneOf {
                struct_name: "AlterDatabaseOptions",
                fields: vec!["new_name", "swap_with", "set", "unset", "set_tag", "unset_tag"],
            }],
        );

        let mut opts = AlterDatabaseOptions::new(id());
        opts.set = Some(DatabaseSet::default());
        assert_opts_invalid_joined_errors(
            &opts,
            &[ValidationError::AtLeastOneOf {
                struct_name: "DatabaseSet",
                fields: vec![
                    "data_retention_time_in_days",
                    "max_data_extension_time_in_days",
                    "default_ddl_collation",
                    "comment",
                ],
            }],
        );
    }

    #[test]
    fn alter_actions() {
        let mut opts = AlterDatabaseOptions::new(id());
        opts.if_exists = true;
        opts.new_name = Some(AccountObjectIdentifier::new("db2"));
        assert_opts_valid_and_sql_equals(&opts, r#"ALTER DATABASE IF EXISTS "db" RENAME TO "db2""#);

        let mut opts = AlterDatabaseOptions::new(id());
        opts.set = Some(DatabaseSet {
            data_retention_time_in_days: Some(0),
            comment: Some("c".into()),
            ..Default::default()
        });
        assert_opts_valid_and_sql_equals(
            &opts,
            r#"ALTER DATABASE "db" SET DATA_RETENTION_TIME_IN_DAYS = 0 COMMENT = 'c'"#,
        );

        let mut opts = AlterDatabaseOptions::new(id());
        opts.unset = Some(DatabaseUnset {
            data_retention_time_in_days: true,
            comment: true,
            ..Default::default()
        });
        assert_opts_valid_and_sql_equals(
            &opts,
            r#"ALTER DATABASE "db" UNSET DATA_RETENTION_TIME_IN_DAYS, COMMENT"#,
        );

        let mut opts = AlterDatabaseOptions::new(id());
        opts.unset_tag = vec![
            SchemaObjectIdentifier::new("db", "sc", "t1"),
            SchemaObjectIdentifier::new("db", "sc", "t2"),
        ];
        assert_opts_valid_and_sql_equals(
            &opts,
            r#"ALTER DATABASE "db" UNSET TAG "db"."sc"."t1", "db"."sc"."t2""#,
        );
    }

    #[test]
    fn drop_undrop_and_show() {
        let mut opts = DropDatabaseOptions::new(id());
        opts.if_exists = true;
        opts.cascade = true;
        assert_opts_valid_and_sql_equals(&opts, r#"DROP DATABASE IF EXISTS "db" CASCADE"#);
        opts.restrict = true;
        assert!(crate::sql::validate_and_build(Some(&opts)).is_err());

        assert_opts_valid_and_sql_equals(&UndropDatabaseOptions::new(id()), r#"UNDROP DATABASE "db""#);

        assert_opts_valid_and_sql_equals(&ShowDatabasesOptions::default(), "SHOW DATABASES");
        let opts = ShowDatabasesOptions {
            terse: true,
            history: true,
            like: Some(Like::new("db%")),
            starts_with: Some(StartsWith::new("d")),
            limit: Some(LimitFrom::new(5).from("da")),
            ..Default::default()
        };
        assert_opts_valid_and_sql_equals(
            &opts,
            "SHOW TERSE DATABASES HISTORY LIKE 'db%' STARTS WITH 'd' LIMIT 5 FROM 'da'",
        );
    }

    #[test]
    fn invalid_identifiers_are_reported() {
        let opts = DropDatabaseOptions::new(AccountObjectIdentifier::default());
        assert_opts_invalid_joined_errors(
            &opts,
            &[ValidationError::InvalidObjectIdentifier {
                struct_name: "DropDatabaseOptions",
                field: "name",
            }],
        );
    }
}
