use snowflake_sdk_derive::{SnowflakeDeserialize, ToSql, Validate};

use super::common::{non_empty, In, Like, LimitFrom, StartsWith, TagAssociation, Timestamp};
use crate::client::Client;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{AccountObjectIdentifier, DatabaseObjectIdentifier, SchemaObjectIdentifier};

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateSchemaOptions {
    #[ddl(static, sql = "CREATE")]
    create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(keyword, sql = "TRANSIENT")]
    pub transient: bool,
    #[ddl(static, sql = "SCHEMA")]
    schema: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: DatabaseObjectIdentifier,
    #[ddl(identifier, sql = "CLONE")]
    #[validate(identifier_if_set)]
    pub clone: Option<DatabaseObjectIdentifier>,
    #[ddl(keyword, sql = "WITH MANAGED ACCESS")]
    pub with_managed_access: bool,
    #[ddl(parameter, sql = "DATA_RETENTION_TIME_IN_DAYS")]
    pub data_retention_time_in_days: Option<u32>,
    #[ddl(parameter, sql = "MAX_DATA_EXTENSION_TIME_IN_DAYS")]
    pub max_data_extension_time_in_days: Option<u32>,
    #[ddl(parameter, single_quotes, sql = "DEFAULT_DDL_COLLATION")]
    pub default_ddl_collation: Option<String>,
    #[ddl(list, sql = "TAG")]
    pub tag: Vec<TagAssociation>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

impl CreateSchemaOptions {
    pub fn new(name: DatabaseObjectIdentifier) -> Self {
        CreateSchemaOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(
    new_name,
    swap_with,
    set,
    unset,
    set_tag,
    unset_tag,
    enable_managed_access,
    disable_managed_access
))]
pub struct AlterSchemaOptions {
    #[ddl(static, sql = "ALTER SCHEMA")]
    alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: DatabaseObjectIdentifier,
    #[ddl(identifier, sql = "RENAME TO")]
    #[validate(identifier_if_set)]
    pub new_name: Option<DatabaseObjectIdentifier>,
    #[ddl(identifier, sql = "SWAP WITH")]
    #[validate(identifier_if_set)]
    pub swap_with: Option<DatabaseObjectIdentifier>,
    #[ddl(keyword, sql = "SET")]
    #[validate(nested)]
    pub set: Option<SchemaSet>,
    #[ddl(list, no_parentheses, sql = "UNSET")]
    #[validate(nested)]
    pub unset: Option<SchemaUnset>,
    #[ddl(list, no_parentheses, sql = "SET TAG")]
    pub set_tag: Vec<TagAssociation>,
    #[ddl(list, no_parentheses, sql = "UNSET TAG")]
    pub unset_tag: Vec<SchemaObjectIdentifier>,
    #[ddl(keyword, sql = "ENABLE MANAGED ACCESS")]
    pub enable_managed_access: bool,
    #[ddl(keyword, sql = "DISABLE MANAGED ACCESS")]
    pub disable_managed_access: bool,
}

impl AlterSchemaOptions {
    pub fn new(name: DatabaseObjectIdentifier) -> Self {
        AlterSchemaOptions {
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
pub struct SchemaSet {
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
pub struct SchemaUnset {
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
pub struct DropSchemaOptions {
    #[ddl(static, sql = "DROP SCHEMA")]
    drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: DatabaseObjectIdentifier,
    #[ddl(keyword, sql = "CASCADE")]
    pub cascade: bool,
    #[ddl(keyword, sql = "RESTRICT")]
    pub restrict: bool,
}

impl DropSchemaOptions {
    pub fn new(name: DatabaseObjectIdentifier) -> Self {
        DropSchemaOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
struct UndropSchemaOptions {
    #[ddl(static, sql = "UNDROP SCHEMA")]
    undrop: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    name: DatabaseObjectIdentifier,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowSchemasOptions {
    #[ddl(static, sql = "SHOW")]
    show: (),
    #[ddl(keyword, sql = "TERSE")]
    pub terse: bool,
    #[ddl(static, sql = "SCHEMAS")]
    schemas: (),
    #[ddl(keyword, sql = "HISTORY")]
    pub history: bool,
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
struct DescribeSchemaOptions {
    #[ddl(static, sql = "DESCRIBE SCHEMA")]
    describe: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    name: DatabaseObjectIdentifier,
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct SchemaRow {
    created_on: Timestamp,
    name: String,
    is_default: Option<bool>,
    is_current: Option<bool>,
    database_name: String,
    owner: Option<String>,
    comment: Option<String>,
    options: Option<String>,
    retention_time: Option<String>,
    owner_role_type: Option<String>,
    dropped_on: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub created_on: Timestamp,
    pub name: String,
    pub is_default: bool,
    pub is_current: bool,
    pub database_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub transient: bool,
    pub managed_access: bool,
    pub retention_time: Option<u32>,
    pub owner_role_type: Option<String>,
    pub dropped_on: Option<Timestamp>,
}

impl Schema {
    pub fn id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(&self.database_name, &self.name)
    }
}

impl From<SchemaRow> for Schema {
    fn from(row: SchemaRow) -> Self {
        let options = row.options.unwrap_or_default();
        Schema {
            created_on: row.created_on,
            name: row.name,
            is_default: row.is_default.unwrap_or_default(),
            is_current: row.is_current.unwrap_or_default(),
            database_name: row.database_name,
            owner: non_empty(row.owner),
            comment: non_empty(row.comment),
            transient: options.contains("TRANSIENT"),
            managed_access: options.contains("MANAGED ACCESS"),
            retention_time: row.retention_time.and_then(|value| value.trim().parse().ok()),
            owner_role_type: non_empty(row.owner_role_type),
            dropped_on: row.dropped_on,
        }
    }
}

/// Row of `DESCRIBE SCHEMA`: one per object in the schema.
#[derive(Debug, Clone, PartialEq, SnowflakeDeserialize)]
pub struct SchemaDetailsRow {
    pub created_on: Timestamp,
    pub name: String,
    pub kind: String,
}

pub struct Schemas<'a> {
    client: &'a Client,
}

impl<'a> Schemas<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Schemas { client }
    }

    pub async fn create(&self, ctx: &Context, opts: &CreateSchemaOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn alter(&self, ctx: &Context, opts: &AlterSchemaOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn drop(&self, ctx: &Context, opts: &DropSchemaOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn undrop(&self, ctx: &Context, id: &DatabaseObjectIdentifier) -> Result<()> {
        let opts = UndropSchemaOptions {
            name: id.clone(),
            ..Default::default()
        };
        self.client.validate_and_exec(ctx, &opts).await
    }

    pub async fn show(&self, ctx: &Context, opts: &ShowSchemasOptions) -> Result<Vec<Schema>> {
        let rows: Vec<SchemaRow> = self.client.validate_and_query(ctx, opts).await?;
        Ok(rows.into_iter().map(Schema::from).collect())
    }

    pub async fn show_by_id(&self, ctx: &Context, id: &DatabaseObjectIdentifier) -> Result<Schema> {
        let opts = ShowSchemasOptions {
            like: Some(Like::name(id)),
            r#in: Some(In::Database(AccountObjectIdentifier::new(id.database_name()))),
            ..Default::default()
        };
        self.show(ctx, &opts)
            .await?
            .into_iter()
            .find(|schema| schema.id() == *id)
            .ok_or_else(|| Error::object_not_found(id))
    }

    pub async fn describe(
        &self,
        ctx: &Context,
        id: &DatabaseObjectIdentifier,
    ) -> Result<Vec<SchemaDetailsRow>> {
        let opts = DescribeSchemaOptions {
            name: id.clone(),
            ..Default::default()
        };
        self.client.validate_and_query(ctx, &opts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::testing::{assert_opts_invalid_joined_errors, assert_opts_valid_and_sql_equals};
    use crate::validation::ValidationError;

    fn id() -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new("db", "sc")
    }

    #[test]
    fn create_clone_with_managed_access() {
        let mut opts = CreateSchemaOptions::new(id());
        opts.transient = true;
        opts.if_not_exists = true;
        opts.clone = Some(DatabaseObjectIdentifier::new("db", "source"));
        opts.with_managed_access = true;
        opts.data_retention_time_in_days = Some(7);
        opts.comment = Some("c".into());
        assert_opts_valid_and_sql_equals(
            &opts,
            r#"CREATE TRANSIENT SCHEMA IF NOT EXISTS "db"."sc" CLONE "db"."source" WITH MANAGED ACCESS DATA_RETENTION_TIME_IN_DAYS = 7 COMMENT = 'c'"#,
        );
    }

    #[test]
    fn alter_managed_access_and_swap() {
        let mut opts = AlterSchemaOptions::new(id());
        opts.enable_managed_access = true;
        assert_opts_valid_and_sql_equals(&opts, r#"ALTER SCHEMA "db"."sc" ENABLE MANAGED ACCESS"#);

        let mut opts = AlterSchemaOptions::new(id());
        opts.swap_with = Some(DatabaseObjectIdentifier::new("db", "other"));
        assert_opts_valid_and_sql_equals(&opts, r#"ALTER SCHEMA "db"."sc" SWAP WITH "db"."other""#);

        opts.disable_managed_access = true;
        assert_opts_invalid_joined_errors(
            &opts,
            &[ValidationError::ExactlyOneOf {
                struct_name: "AlterSchemaOptions",
                fields: vec![
                    "new_name",
                    "swap_with",
                    "set",
                    "unset",
                    "set_tag",
                    "unset_tag",
                    "enable_managed_access",
                    "disable_managed_access",
                ],
            }],
        );
    }

    #[test]
    fn show_in_database() {
        let opts = ShowSchemasOptions {
            like: Some(Like::new("sc")),
            r#in: Some(In::Database(AccountObjectIdentifier::new("db"))),
            ..Default::default()
        };
        assert_opts_valid_and_sql_equals(&opts, r#"SHOW SCHEMAS LIKE 'sc' IN DATABASE "db""#);
    }

    #[test]
    fn drop_and_undrop() {
        let mut opts = DropSchemaOptions::new(id());
        opts.restrict = true;
        assert_opts_valid_and_sql_equals(&opts, r#"DROP SCHEMA "db"."sc" RESTRICT"#);
        let opts = UndropSchemaOptions {
            name: id(),
            ..Default::default()
        };
        assert_opts_valid_and_sql_equals(&opts, r#"UNDROP SCHEMA "db"."sc""#);
    }

    #[test]
    fn rows_map_options() {
        let row = SchemaRow {
            created_on: Timestamp::default(),
            name: "sc".into(),
            is_default: None,
            is_current: Some(true),
            database_name: "db".into(),
            owner: Some(String::new()),
            comment: Some("c".into()),
            options: Some("TRANSIENT, MANAGED ACCESS".into()),
            retention_time: Some("1".into()),
            owner_role_type: None,
            dropped_on: None,
        };
        let schema = Schema::from(row);
        assert_eq!(schema.id(), id());
        assert!(schema.transient && schema.managed_access && schema.is_current);
        assert_eq!(schema.owner, None);
        assert_eq!(schema.retention_time, Some(1));
    }
}
