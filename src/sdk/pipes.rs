use snowflake_sdk_derive::{SnowflakeDeserialize, ToSql, Validate};

use super::common::{non_empty, In, Like, TagAssociation, Timestamp};
use crate::client::Client;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{AccountObjectIdentifier, SchemaObjectIdentifier};
use crate::validation::{ValidationError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
#[validate(custom = "validate_copy_statement")]
pub struct CreatePipeOptions {
    #[ddl(static, sql = "CREATE")]
    create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "PIPE")]
    pipe: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(parameter, sql = "AUTO_INGEST")]
    pub auto_ingest: Option<bool>,
    #[ddl(identifier, equals, sql = "ERROR_INTEGRATION")]
    #[validate(identifier_if_set)]
    pub error_integration: Option<AccountObjectIdentifier>,
    #[ddl(parameter, single_quotes, sql = "AWS_SNS_TOPIC")]
    pub aws_sns_topic: Option<String>,
    #[ddl(parameter, single_quotes, sql = "INTEGRATION")]
    pub integration: Option<String>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
    #[ddl(parameter, no_equals, sql = "AS")]
    pub copy_statement: String,
}

impl CreatePipeOptions {
    pub fn new(name: SchemaObjectIdentifier, copy_statement: impl Into<String>) -> Self {
        CreatePipeOptions {
            name,
            copy_statement: copy_statement.into(),
            ..Default::default()
        }
    }
}

fn validate_copy_statement(opts: &CreatePipeOptions, errors: &mut ValidationErrors) {
    if opts.copy_statement.trim().is_empty() {
        errors.push(ValidationError::Empty {
            struct_name: "CreatePipeOptions",
            field: "copy_statement",
        });
    }
}

/// `REFRESH [PREFIX = '<path>'] [MODIFIED_AFTER = '<timestamp>']`.
#[derive(Debug, Clone, PartialEq, Default, ToSql)]
pub struct PipeRefresh {
    #[ddl(parameter, single_quotes, sql = "PREFIX")]
    pub prefix: Option<String>,
    #[ddl(parameter, single_quotes, sql = "MODIFIED_AFTER")]
    pub modified_after: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(set, unset, set_tag, unset_tag, refresh))]
pub struct AlterPipeOptions {
    #[ddl(static, sql = "ALTER PIPE")]
    alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(keyword, sql = "SET")]
    #[validate(nested)]
    pub set: Option<PipeSet>,
    #[ddl(list, no_parentheses, sql = "UNSET")]
    #[validate(nested)]
    pub unset: Option<PipeUnset>,
    #[ddl(list, no_parentheses, sql = "SET TAG")]
    pub set_tag: Vec<TagAssociation>,
    #[ddl(list, no_parentheses, sql = "UNSET TAG")]
    pub unset_tag: Vec<SchemaObjectIdentifier>,
    #[ddl(keyword, sql = "REFRESH")]
    pub refresh: Option<PipeRefresh>,
}

impl AlterPipeOptions {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        AlterPipeOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(error_integration, pipe_execution_paused, comment))]
pub struct PipeSet {
    #[ddl(identifier, equals, sql = "ERROR_INTEGRATION")]
    #[validate(identifier_if_set)]
    pub error_integration: Option<AccountObjectIdentifier>,
    #[ddl(parameter, sql = "PIPE_EXECUTION_PAUSED")]
    pub pipe_execution_paused: Option<bool>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(pipe_execution_paused, comment))]
pub struct PipeUnset {
    #[ddl(keyword, sql = "PIPE_EXECUTION_PAUSED")]
    pub pipe_execution_paused: bool,
    #[ddl(keyword, sql = "COMMENT")]
    pub comment: bool,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DropPipeOptions {
    #[ddl(static, sql = "DROP PIPE")]
    drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
}

impl DropPipeOptions {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        DropPipeOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowPipesOptions {
    #[ddl(static, sql = "SHOW PIPES")]
    show: (),
    #[ddl(keyword)]
    pub like: Option<Like>,
    #[ddl(keyword)]
    pub r#in: Option<In>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
struct DescribePipeOptions {
    #[ddl(static, sql = "DESCRIBE PIPE")]
    describe: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    name: SchemaObjectIdentifier,
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct PipeRow {
    created_on: Timestamp,
    name: String,
    database_name: String,
    schema_name: String,
    definition: Option<String>,
    owner: Option<String>,
    notification_channel: Option<String>,
    comment: Option<String>,
    integration: Option<String>,
    pattern: Option<String>,
    error_integration: Option<String>,
    owner_role_type: Option<String>,
    invalid_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub created_on: Timestamp,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub definition: String,
    pub owner: Option<String>,
    pub notification_channel: Option<String>,
    pub comment: Option<String>,
    pub integration: Option<String>,
    pub pattern: Option<String>,
    pub error_integration: Option<String>,
    pub owner_role_type: Option<String>,
    pub invalid_reason: Option<String>,
}

impl Pipe {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

impl From<PipeRow> for Pipe {
    fn from(row: PipeRow) -> Self {
        Pipe {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            definition: row.definition.unwrap_or_default(),
            owner: non_empty(row.owner),
            notification_channel: non_empty(row.notification_channel),
            comment: non_empty(row.comment),
            integration: non_empty(row.integration),
            pattern: non_empty(row.pattern),
            error_integration: non_empty(row.error_integration).filter(|value| value != "null"),
            owner_role_type: non_empty(row.owner_role_type),
            invalid_reason: non_empty(row.invalid_reason).filter(|value| value != "NULL"),
        }
    }
}

pub struct Pipes<'a> {
    client: &'a Client,
}

impl<'a> Pipes<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Pipes { client }
    }

    pub async fn create(&self, ctx: &Context, opts: &CreatePipeOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn alter(&self, ctx: &Context, opts: &AlterPipeOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn drop(&self, ctx: &Context, opts: &DropPipeOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    /// `ALTER PIPE ... SET PIPE_EXECUTION_PAUSED = true`.
    pub async fn pause(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<()> {
        self.set_paused(ctx, id, true).await
    }

    pub async fn resume(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<()> {
        self.set_paused(ctx, id, false).await
    }

    async fn set_paused(&self, ctx: &Context, id: &SchemaObjectIdentifier, paused: bool) -> Result<()> {
        let mut opts = AlterPipeOptions::new(id.clone());
        opts.set = Some(PipeSet {
            pipe_execution_paused: Some(paused),
            ..Default::default()
        });
        self.alter(ctx, &opts).await
    }

    pub async fn show(&self, ctx: &Context, opts: &ShowPipesOptions) -> Result<Vec<Pipe>> {
        let rows: Vec<PipeRow> = self.client.validate_and_query(ctx, opts).await?;
        Ok(rows.into_iter().map(Pipe::from).collect())
    }

    pub async fn show_by_id(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<Pipe> {
        let opts = ShowPipesOptions {
            like: Some(Like::name(id)),
            r#in: Some(In::Schema(id.schema_id())),
            ..Default::default()
        };
        self.show(ctx, &opts)
            .await?
            .into_iter()
            .find(|pipe| pipe.id() == *id)
            .ok_or_else(|| Error::object_not_found(id))
    }

    pub async fn describe(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<Pipe> {
        let opts = DescribePipeOptions {
            name: id.clone(),
            ..Default::default()
        };
        let row: PipeRow = self.client.validate_and_query_one(ctx, &opts).await?;
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::testing::{assert_opts_invalid_joined_errors, assert_opts_valid_and_sql_equals};

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("db", "sc", "p")
    }

    #[test]
    fn create_with_copy_statement() {
        let mut opts = CreatePipeOptions::new(id(), r#"COPY INTO "db"."sc"."t" FROM @"db"."sc"."stage""#);
        opts.if_not_exists = true;
        opts.auto_ingest = Some(true);
        opts.comment = Some("ingest".into());
        assert_opts_valid_and_sql_equals(
            &opts,
            r#"CREATE PIPE IF NOT EXISTS "db"."sc"."p" AUTO_INGEST = true COMMENT = 'ingest' AS COPY INTO "db"."sc"."t" FROM @"db"."sc"."stage""#,
        );

        assert_opts_invalid_joined_errors(
            &CreatePipeOptions::new(id(), ""),
            &[ValidationError::Empty {
                struct_name: "CreatePipeOptions",
                field: "copy_statement",
            }],
        );
    }

    #[test]
    fn alter_refresh_and_unset() {
        let mut opts = AlterPipeOptions::new(id());
        opts.refresh = Some(PipeRefresh {
            prefix: Some("/d1".into()),
            ..Default::default()
        });
        assert_opts_valid_and_sql_equals(&opts, r#"ALTER PIPE "db"."sc"."p" REFRESH PREFIX = '/d1'"#);

        let mut opts = AlterPipeOptions::new(id());
        opts.unset = Some(PipeUnset {
            pipe_execution_paused: true,
            comment: true,
        });
        assert_opts_valid_and_sql_equals(
            &opts,
            r#"ALTER PIPE "db"."sc"."p" UNSET PIPE_EXECUTION_PAUSED, COMMENT"#,
        );
    }

    #[tokio::test]
    async fn pause_and_resume() {
        let client = Client::dry_run();
        let ctx = Context::background();
        client.pipes().pause(&ctx, &id()).await.unwrap();
        client.pipes().resume(&ctx, &id()).await.unwrap();
        assert_eq!(
            client.trace_logs(),
            [
                r#"ALTER PIPE "db"."sc"."p" SET PIPE_EXECUTION_PAUSED = true"#,
                r#"ALTER PIPE "db"."sc"."p" SET PIPE_EXECUTION_PAUSED = false"#,
            ]
        );
    }
}
