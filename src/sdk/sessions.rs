//! Session parameters and session defaults.
//!
//! `USE ...` changes state of the connection that runs it. Connections are not pinned, so these
//! calls belong to initialization.

use snowflake_sdk_derive::{SnowflakeDeserialize, ToSql, Validate};
use snowflake_driver::serde_json;
use tracing::info;

use super::common::{non_empty, split_list, Like};
use crate::client::Client;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{AccountObjectIdentifier, DatabaseObjectIdentifier, ObjectIdentifier, SchemaObjectIdentifier};
use crate::sql::{Quotes, SqlValue, ToSql};
use crate::validation::{ValidationError, ValidationErrors};

crate::sql_enum! {
    pub enum SecondaryRoles {
        All => "ALL",
        None => "NONE",
    }
}

crate::sql_enum! {
    pub enum ParameterLevel {
        Account => "ACCOUNT",
        User => "USER",
        Session => "SESSION",
        Warehouse => "WAREHOUSE",
        Database => "DATABASE",
        Schema => "SCHEMA",
        Task => "TASK",
        Table => "TABLE",
        System => "SYSTEM",
    }
}

/// Session parameters settable with `ALTER SESSION SET`.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct SessionParameters {
    #[ddl(parameter, sql = "ABORT_DETACHED_QUERY")]
    pub abort_detached_query: Option<bool>,
    #[ddl(parameter, sql = "AUTOCOMMIT")]
    pub autocommit: Option<bool>,
    #[ddl(parameter, single_quotes, sql = "BINARY_INPUT_FORMAT")]
    pub binary_input_format: Option<String>,
    #[ddl(parameter, single_quotes, sql = "DATE_INPUT_FORMAT")]
    pub date_input_format: Option<String>,
    #[ddl(parameter, single_quotes, sql = "DATE_OUTPUT_FORMAT")]
    pub date_output_format: Option<String>,
    #[ddl(parameter, sql = "ERROR_ON_NONDETERMINISTIC_MERGE")]
    pub error_on_nondeterministic_merge: Option<bool>,
    #[ddl(parameter, sql = "JSON_INDENT")]
    pub json_indent: Option<u32>,
    #[ddl(parameter, sql = "LOCK_TIMEOUT")]
    pub lock_timeout: Option<u32>,
    #[ddl(parameter, single_quotes, sql = "QUERY_TAG")]
    pub query_tag: Option<String>,
    #[ddl(parameter, sql = "ROWS_PER_RESULTSET")]
    pub rows_per_resultset: Option<u64>,
    #[ddl(parameter, sql = "STATEMENT_TIMEOUT_IN_SECONDS")]
    pub statement_timeout_in_seconds: Option<u32>,
    #[ddl(parameter, sql = "STATEMENT_QUEUED_TIMEOUT_IN_SECONDS")]
    pub statement_queued_timeout_in_seconds: Option<u32>,
    #[ddl(parameter, single_quotes, sql = "TIMESTAMP_OUTPUT_FORMAT")]
    pub timestamp_output_format: Option<String>,
    #[ddl(parameter, single_quotes, sql = "TIMEZONE")]
    pub timezone: Option<String>,
    #[ddl(parameter, sql = "USE_CACHED_RESULT")]
    pub use_cached_result: Option<bool>,
    #[ddl(parameter, sql = "WEEK_START")]
    pub week_start: Option<u32>,
}

/// Parameters reset to their defaults with `ALTER SESSION UNSET`.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct SessionParametersUnset {
    #[ddl(keyword, sql = "ABORT_DETACHED_QUERY")]
    pub abort_detached_query: bool,
    #[ddl(keyword, sql = "AUTOCOMMIT")]
    pub autocommit: bool,
    #[ddl(keyword, sql = "BINARY_INPUT_FORMAT")]
    pub binary_input_format: bool,
    #[ddl(keyword, sql = "DATE_INPUT_FORMAT")]
    pub date_input_format: bool,
    #[ddl(keyword, sql = "DATE_OUTPUT_FORMAT")]
    pub date_output_format: bool,
    #[ddl(keyword, sql = "ERROR_ON_NONDETERMINISTIC_MERGE")]
    pub error_on_nondeterministic_merge: bool,
    #[ddl(keyword, sql = "JSON_INDENT")]
    pub json_indent: bool,
    #[ddl(keyword, sql = "LOCK_TIMEOUT")]
    pub lock_timeout: bool,
    #[ddl(keyword, sql = "QUERY_TAG")]
    pub query_tag: bool,
    #[ddl(keyword, sql = "ROWS_PER_RESULTSET")]
    pub rows_per_resultset: bool,
    #[ddl(keyword, sql = "STATEMENT_TIMEOUT_IN_SECONDS")]
    pub statement_timeout_in_seconds: bool,
    #[ddl(keyword, sql = "STATEMENT_QUEUED_TIMEOUT_IN_SECONDS")]
    pub statement_queued_timeout_in_seconds: bool,
    #[ddl(keyword, sql = "TIMESTAMP_OUTPUT_FORMAT")]
    pub timestamp_output_format: bool,
    #[ddl(keyword, sql = "TIMEZONE")]
    pub timezone: bool,
    #[ddl(keyword, sql = "USE_CACHED_RESULT")]
    pub use_cached_result: bool,
    #[ddl(keyword, sql = "WEEK_START")]
    pub week_start: bool,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(set, unset))]
#[validate(custom = "validate_alter_session")]
pub struct AlterSessionOptions {
    #[ddl(static, sql = "ALTER SESSION")]
    alter: (),
    #[ddl(keyword, sql = "SET")]
    pub set: Option<SessionParameters>,
    #[ddl(list, no_parentheses, sql = "UNSET")]
    pub unset: Option<SessionParametersUnset>,
}

impl AlterSessionOptions {
    pub fn set(parameters: SessionParameters) -> Self {
        AlterSessionOptions {
            set: Some(parameters),
            ..Default::default()
        }
    }

    pub fn unset(parameters: SessionParametersUnset) -> Self {
        AlterSessionOptions {
            unset: Some(parameters),
            ..Default::default()
        }
    }
}

fn validate_alter_session(opts: &AlterSessionOptions, errors: &mut ValidationErrors) {
    if opts.set.as_ref().is_some_and(|set| *set == SessionParameters::default()) {
        errors.push(ValidationError::Empty {
            struct_name: "AlterSessionOptions",
            field: "set",
        });
    }
    if opts
        .unset
        .as_ref()
        .is_some_and(|unset| *unset == SessionParametersUnset::default())
    {
        errors.push(ValidationError::Empty {
            struct_name: "AlterSessionOptions",
            field: "unset",
        });
    }
}

/// Scope of `SHOW PARAMETERS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParametersIn {
    Session,
    Account,
    User(AccountObjectIdentifier),
    Warehouse(AccountObjectIdentifier),
    Database(AccountObjectIdentifier),
    Schema(DatabaseObjectIdentifier),
    Task(SchemaObjectIdentifier),
    Table(SchemaObjectIdentifier),
}

impl SqlValue for ParametersIn {
    fn write_value(&self, out: &mut String, _quotes: Quotes) {
        let (kind, id) = match self {
            ParametersIn::Session => ("SESSION", None),
            ParametersIn::Account => ("ACCOUNT", None),
            ParametersIn::User(id) => ("USER", Some(id.fully_qualified_name())),
            ParametersIn::Warehouse(id) => ("WAREHOUSE", Some(id.fully_qualified_name())),
            ParametersIn::Database(id) => ("DATABASE", Some(id.fully_qualified_name())),
            ParametersIn::Schema(id) => ("SCHEMA", Some(id.fully_qualified_name())),
            ParametersIn::Task(id) => ("TASK", Some(id.fully_qualified_name())),
            ParametersIn::Table(id) => ("TABLE", Some(id.fully_qualified_name())),
        };
        out.push_str("IN ");
        out.push_str(kind);
        if let Some(id) = id {
            out.push(' ');
            out.push_str(&id);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowParametersOptions {
    #[ddl(static, sql = "SHOW PARAMETERS")]
    show: (),
    #[ddl(keyword)]
    pub like: Option<Like>,
    #[ddl(keyword)]
    pub r#in: Option<ParametersIn>,
}

/// `USE <kind> <name>`, one kind per statement.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(role, secondary_roles, warehouse, database, schema))]
pub struct UseOptions {
    #[ddl(static, sql = "USE")]
    use_: (),
    #[ddl(identifier, sql = "ROLE")]
    #[validate(identifier_if_set)]
    pub role: Option<AccountObjectIdentifier>,
    #[ddl(keyword, sql = "SECONDARY ROLES")]
    pub secondary_roles: Option<SecondaryRoles>,
    #[ddl(identifier, sql = "WAREHOUSE")]
    #[validate(identifier_if_set)]
    pub warehouse: Option<AccountObjectIdentifier>,
    #[ddl(identifier, sql = "DATABASE")]
    #[validate(identifier_if_set)]
    pub database: Option<AccountObjectIdentifier>,
    #[ddl(identifier, sql = "SCHEMA")]
    #[validate(identifier_if_set)]
    pub schema: Option<DatabaseObjectIdentifier>,
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct ParameterRow {
    key: String,
    value: Option<String>,
    default: Option<String>,
    level: Option<String>,
    description: Option<String>,
    #[snowflake(rename = "type")]
    parameter_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub key: String,
    pub value: String,
    pub default: String,
    /// `None` when the parameter still has its default.
    pub level: Option<ParameterLevel>,
    pub description: Option<String>,
    pub parameter_type: Option<String>,
}

impl From<ParameterRow> for Parameter {
    fn from(row: ParameterRow) -> Self {
        Parameter {
            key: row.key,
            value: row.value.unwrap_or_default(),
            default: row.default.unwrap_or_default(),
            level: non_empty(row.level).and_then(|level| level.parse().ok()),
            description: non_empty(row.description),
            parameter_type: non_empty(row.parameter_type),
        }
    }
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct CurrentValueRow {
    value: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
struct SecondaryRolesRow {
    #[serde(default)]
    roles: String,
    #[serde(default)]
    value: String,
}

/// Result of `CURRENT_SECONDARY_ROLES()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSecondaryRoles {
    pub value: Option<SecondaryRoles>,
    pub roles: Vec<AccountObjectIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, SnowflakeDeserialize)]
pub struct CurrentSessionDetails {
    pub current_account: String,
    pub current_role: Option<String>,
    pub current_region: Option<String>,
    pub current_session: Option<String>,
    pub current_user: String,
    pub current_warehouse: Option<String>,
    pub current_database: Option<String>,
    pub current_schema: Option<String>,
}

pub struct Sessions<'a> {
    client: &'a Client,
}

impl<'a> Sessions<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Sessions { client }
    }

    pub async fn alter_session(&self, ctx: &Context, opts: &AlterSessionOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn show_parameters(&self, ctx: &Context, opts: &ShowParametersOptions) -> Result<Vec<Parameter>> {
        let rows: Vec<ParameterRow> = self.client.validate_and_query(ctx, opts).await?;
        Ok(rows.into_iter().map(Parameter::from).collect())
    }

    /// One parameter by exact key, as seen in `scope`.
    pub async fn show_parameter(&self, ctx: &Context, key: &str, scope: ParametersIn) -> Result<Parameter> {
        let opts = ShowParametersOptions {
            like: Some(Like::new(key)),
            r#in: Some(scope),
            ..Default::default()
        };
        self.show_parameters(ctx, &opts)
            .await?
            .into_iter()
            .find(|parameter| parameter.key.eq_ignore_ascii_case(key))
            .ok_or_else(|| Error::object_not_found(format!("parameter {key}")))
    }

    async fn use_object(&self, ctx: &Context, opts: UseOptions) -> Result<()> {
        info!(sql = %opts.to_sql(), "changing session defaults");
        self.client.validate_and_exec(ctx, &opts).await
    }

    pub async fn use_role(&self, ctx: &Context, role: &AccountObjectIdentifier) -> Result<()> {
        self.use_object(
            ctx,
            UseOptions {
                role: Some(role.clone()),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn use_secondary_roles(&self, ctx: &Context, roles: SecondaryRoles) -> Result<()> {
        self.use_object(
            ctx,
            UseOptions {
                secondary_roles: Some(roles),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn use_warehouse(&self, ctx: &Context, warehouse: &AccountObjectIdentifier) -> Result<()> {
        self.use_object(
            ctx,
            UseOptions {
                warehouse: Some(warehouse.clone()),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn use_database(&self, ctx: &Context, database: &AccountObjectIdentifier) -> Result<()> {
        self.use_object(
            ctx,
            UseOptions {
                database: Some(database.clone()),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn use_schema(&self, ctx: &Context, schema: &DatabaseObjectIdentifier) -> Result<()> {
        self.use_object(
            ctx,
            UseOptions {
                schema: Some(schema.clone()),
                ..Default::default()
            },
        )
        .await
    }

    async fn current(&self, ctx: &Context, function: &str) -> Result<Option<String>> {
        let row: CurrentValueRow = self
            .client
            .query_one(ctx, &format!("SELECT {function}() AS \"VALUE\""))
            .await?;
        Ok(non_empty(row.value))
    }

    pub async fn current_account(&self, ctx: &Context) -> Result<Option<String>> {
        self.current(ctx, "CURRENT_ACCOUNT").await
    }

    pub async fn current_role(&self, ctx: &Context) -> Result<Option<AccountObjectIdentifier>> {
        Ok(self.current(ctx, "CURRENT_ROLE").await?.map(AccountObjectIdentifier::new))
    }

    pub async fn current_user(&self, ctx: &Context) -> Result<Option<AccountObjectIdentifier>> {
        Ok(self.current(ctx, "CURRENT_USER").await?.map(AccountObjectIdentifier::new))
    }

    pub async fn current_warehouse(&self, ctx: &Context) -> Result<Option<AccountObjectIdentifier>> {
        Ok(self
            .current(ctx, "CURRENT_WAREHOUSE")
            .await?
            .map(AccountObjectIdentifier::new))
    }

    pub async fn current_database(&self, ctx: &Context) -> Result<Option<AccountObjectIdentifier>> {
        Ok(self
            .current(ctx, "CURRENT_DATABASE")
            .await?
            .map(AccountObjectIdentifier::new))
    }

    /// `None` unless both a database and a schema are in use.
    pub async fn current_schema(&self, ctx: &Context) -> Result<Option<DatabaseObjectIdentifier>> {
        let Some(database) = self.current(ctx, "CURRENT_DATABASE").await? else {
            return Ok(None);
        };
        Ok(self
            .current(ctx, "CURRENT_SCHEMA")
            .await?
            .map(|schema| DatabaseObjectIdentifier::new(database, schema)))
    }

    pub async fn current_secondary_roles(&self, ctx: &Context) -> Result<CurrentSecondaryRoles> {
        let raw = self.current(ctx, "CURRENT_SECONDARY_ROLES").await?;
        Ok(parse_secondary_roles(raw.as_deref()))
    }

    pub async fn current_session_details(&self, ctx: &Context) -> Result<CurrentSessionDetails> {
        self.client
            .query_one(
                ctx,
                "SELECT CURRENT_ACCOUNT() AS CURRENT_ACCOUNT, CURRENT_ROLE() AS CURRENT_ROLE, \
                 CURRENT_REGION() AS CURRENT_REGION, CURRENT_SESSION() AS CURRENT_SESSION, \
                 CURRENT_USER() AS CURRENT_USER, CURRENT_WAREHOUSE() AS CURRENT_WAREHOUSE, \
                 CURRENT_DATABASE() AS CURRENT_DATABASE, CURRENT_SCHEMA() AS CURRENT_SCHEMA",
            )
            .await
    }
}

/// `{"roles":"R1,R2","value":"ALL"}`; anything unreadable counts as no secondary roles.
fn parse_secondary_roles(raw: Option<&str>) -> CurrentSecondaryRoles {
    let row = raw.and_then(|raw| serde_json::from_str::<SecondaryRolesRow>(raw).ok());
    match row {
        Some(row) => CurrentSecondaryRoles {
            value: non_empty(Some(row.value)).and_then(|value| value.parse().ok()),
            roles: split_list(Some(&row.roles))
                .into_iter()
                .map(AccountObjectIdentifier::new)
                .collect(),
        },
        None => CurrentSecondaryRoles {
            value: None,
            roles: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::testing::{assert_opts_invalid_joined_errors, assert_opts_valid_and_sql_equals};
    use snowflake_driver::ResultSet;

    #[test]
    fn alter_session_set_and_unset() {
        let opts = AlterSessionOptions::set(SessionParameters {
            autocommit: Some(false),
            query_tag: Some("etl".into()),
            week_start: Some(1),
            ..Default::default()
        });
        assert_opts_valid_and_sql_equals(
            &opts,
            "ALTER SESSION SET AUTOCOMMIT = false QUERY_TAG = 'etl' WEEK_START = 1",
        );

        let opts = AlterSessionOptions::unset(SessionParametersUnset {
            query_tag: true,
            timezone: true,
            ..Default::default()
        });
        assert_opts_valid_and_sql_equals(&opts, "ALTER SESSION UNSET QUERY_TAG, TIMEZONE");

        assert_opts_invalid_joined_errors(
            &AlterSessionOptions::set(SessionParameters::default()),
            &[ValidationError::Empty {
                struct_name: "AlterSessionOptions",
                field: "set",
            }],
        );
        assert_opts_invalid_joined_errors(
            &AlterSessionOptions::default(),
            &[ValidationError::ExactlyOneOf {
                struct_name: "AlterSessionOptions",
                fields: vec!["set", "unset"],
            }],
        );
    }

    #[test]
    fn show_parameters_scopes() {
        let opts = ShowParametersOptions {
            like: Some(Like::new("AUTOCOMMIT")),
            r#in: Some(ParametersIn::Session),
            ..Default::default()
        };
        assert_opts_valid_and_sql_equals(&opts, "SHOW PARAMETERS LIKE 'AUTOCOMMIT' IN SESSION");

        let opts = ShowParametersOptions {
            r#in: Some(ParametersIn::Schema(DatabaseObjectIdentifier::new("db", "sc"))),
            ..Default::default()
        };
        assert_opts_valid_and_sql_equals(&opts, r#"SHOW PARAMETERS IN SCHEMA "db"."sc""#);
    }

    #[tokio::test]
    async fn use_statements() {
        let client = Client::dry_run();
        let ctx = Context::background();
        let sessions = client.sessions();
        sessions.use_role(&ctx, &AccountObjectIdentifier::new("ANALYST")).await.unwrap();
        sessions.use_secondary_roles(&ctx, SecondaryRoles::All).await.unwrap();
        sessions.use_warehouse(&ctx, &AccountObjectIdentifier::new("WH")).await.unwrap();
        sessions.use_database(&ctx, &AccountObjectIdentifier::new("DB")).await.unwrap();
        sessions
            .use_schema(&ctx, &DatabaseObjectIdentifier::new("DB", "SC"))
            .await
            .unwrap();
        assert_eq!(
            client.trace_logs(),
            [
                r#"USE ROLE "ANALYST""#,
                "USE SECONDARY ROLES ALL",
                r#"USE WAREHOUSE "WH""#,
                r#"USE DATABASE "DB""#,
                r#"USE SCHEMA "DB"."SC""#,
            ]
        );
    }

    #[test]
    fn use_needs_exactly_one_target() {
        let opts = UseOptions {
            role: Some(AccountObjectIdentifier::new("R")),
            warehouse: Some(AccountObjectIdentifier::new("W")),
            ..Default::default()
        };
        assert_opts_invalid_joined_errors(
            &opts,
            &[ValidationError::ExactlyOneOf {
                struct_name: "UseOptions",
                fields: vec!["role", "secondary_roles", "warehouse", "database", "schema"],
            }],
        );
    }

    #[test]
    fn parameter_rows() {
        let rows = ResultSet::from_rows(
            ["key", "value", "default", "level", "description", "type"],
            [
                [Some("AUTOCOMMIT"), Some("false"), Some("true"), Some("SESSION"), Some("d"), Some("BOOLEAN")],
                [Some("TIMEZONE"), Some("America/Los_Angeles"), Some("America/Los_Angeles"), Some(""), Some(""), Some("STRING")],
            ],
        );
        let parameters: Vec<Parameter> = rows
            .deserialize::<ParameterRow>()
            .unwrap()
            .into_iter()
            .map(Parameter::from)
            .collect();
        assert_eq!(parameters[0].level, Some(ParameterLevel::Session));
        assert_eq!(parameters[0].value, "false");
        assert_eq!(parameters[1].level, None);
        assert_eq!(parameters[1].parameter_type.as_deref(), Some("STRING"));
    }

    #[test]
    fn secondary_roles_json() {
        let roles = parse_secondary_roles(Some(r#"{"roles":"R1,R2","value":"ALL"}"#));
        assert_eq!(roles.value, Some(SecondaryRoles::All));
        assert_eq!(
            roles.roles,
            [AccountObjectIdentifier::new("R1"), AccountObjectIdentifier::new("R2")]
        );
        assert!(parse_secondary_roles(None).roles.is_empty());
    }
}
