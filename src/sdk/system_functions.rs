//! `SYSTEM$...` functions.

use snowflake_sdk_derive::SnowflakeDeserialize;

use super::common::{non_empty, ObjectType};
use crate::client::Client;
use crate::context::Context;
use crate::error::Result;
use crate::identifier::{ObjectIdentifier, SchemaObjectIdentifier};
use crate::sql::Quotes;

crate::sql_enum! {
    pub enum PipeExecutionState {
        Running => "RUNNING",
        Paused => "PAUSED",
        ReadOnly => "READ_ONLY",
        StoppedCloned => "STOPPED_CLONED",
        StoppedFeatureDisabled => "STOPPED_FEATURE_DISABLED",
        StoppedStageAltered => "STOPPED_STAGE_ALTERED",
        StoppedStageDropped => "STOPPED_STAGE_DROPPED",
        StoppedFileFormatDropped => "STOPPED_FILE_FORMAT_DROPPED",
        StoppedNotificationIntegrationDropped => "STOPPED_NOTIFICATION_INTEGRATION_DROPPED",
        StoppedMissingPipe => "STOPPED_MISSING_PIPE",
        StoppedMissingTable => "STOPPED_MISSING_TABLE",
        StalledCompilationError => "STALLED_COMPILATION_ERROR",
        StalledInitializationError => "STALLED_INITIALIZATION_ERROR",
        StalledExecutionError => "STALLED_EXECUTION_ERROR",
        StalledInternalError => "STALLED_INTERNAL_ERROR",
        StalledStagePermissionError => "STALLED_STAGE_PERMISSION_ERROR",
    }
}

/// JSON document returned by `SYSTEM$PIPE_STATUS`.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipeStatus {
    pub execution_state: String,
    pub pending_file_count: u64,
    pub last_ingested_timestamp: Option<String>,
    pub last_ingested_file_path: Option<String>,
    pub notification_channel_name: Option<String>,
    pub num_outstanding_messages_on_channel: Option<u64>,
    pub last_received_message_timestamp: Option<String>,
    pub last_forwarded_message_timestamp: Option<String>,
    pub last_pulled_from_channel_timestamp: Option<String>,
    pub last_forwarded_file_path: Option<String>,
    pub error: Option<String>,
    pub fault: Option<String>,
}

impl PipeStatus {
    /// `None` for states this SDK does not know yet.
    pub fn state(&self) -> Option<PipeExecutionState> {
        self.execution_state.parse().ok()
    }
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct TagValueRow {
    tag: Option<String>,
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct PipeStatusRow {
    #[snowflake(json)]
    status: PipeStatus,
}

fn quoted(value: &str) -> String {
    let mut out = String::new();
    Quotes::Single.write(&mut out, value);
    out
}

/// `SELECT SYSTEM$GET_TAG('<tag>', '<object>', '<domain>')`.
pub fn get_tag_sql<I: ObjectIdentifier>(tag: &SchemaObjectIdentifier, object: &I, object_type: ObjectType) -> String {
    format!(
        "SELECT SYSTEM$GET_TAG({}, {}, {}) AS \"TAG\"",
        quoted(&tag.fully_qualified_name()),
        quoted(&object.fully_qualified_name()),
        quoted(tag_domain(object_type)),
    )
}

/// `SYSTEM$GET_TAG` names some kinds differently than DDL does.
fn tag_domain(object_type: ObjectType) -> &'static str {
    match object_type {
        ObjectType::DatabaseRole => "DATABASE ROLE",
        ObjectType::View | ObjectType::MaterializedView => "TABLE",
        ObjectType::MaskingPolicy | ObjectType::RowAccessPolicy => "POLICY",
        other => other.as_str(),
    }
}

pub struct SystemFunctions<'a> {
    client: &'a Client,
}

impl<'a> SystemFunctions<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        SystemFunctions { client }
    }

    /// Value of `tag` on `object`, `None` when the tag is not set.
    pub async fn get_tag<I: ObjectIdentifier>(
        &self,
        ctx: &Context,
        tag: &SchemaObjectIdentifier,
        object: &I,
        object_type: ObjectType,
    ) -> Result<Option<String>> {
        let sql = get_tag_sql(tag, object, object_type);
        let rows: Vec<TagValueRow> = self.client.query(ctx, &sql).await?;
        Ok(rows.into_iter().next().and_then(|row| non_empty(row.tag)))
    }

    pub async fn pipe_status(&self, ctx: &Context, pipe: &SchemaObjectIdentifier) -> Result<PipeStatus> {
        let sql = format!(
            "SELECT SYSTEM$PIPE_STATUS({}) AS \"STATUS\"",
            quoted(&pipe.fully_qualified_name())
        );
        let row: PipeStatusRow = self.client.query_one(ctx, &sql).await?;
        Ok(row.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::AccountObjectIdentifier;
    use snowflake_driver::ResultSet;

    #[test]
    fn get_tag_statement() {
        let tag = SchemaObjectIdentifier::new("db", "sc", "cost");
        assert_eq!(
            get_tag_sql(&tag, &AccountObjectIdentifier::new("WH"), ObjectType::Warehouse),
            r#"SELECT SYSTEM$GET_TAG('"db"."sc"."cost"', '"WH"', 'WAREHOUSE') AS "TAG""#
        );
        assert_eq!(
            get_tag_sql(&tag, &SchemaObjectIdentifier::new("db", "sc", "v"), ObjectType::View),
            r#"SELECT SYSTEM$GET_TAG('"db"."sc"."cost"', '"db"."sc"."v"', 'TABLE') AS "TAG""#
        );
    }

    #[tokio::test]
    async fn get_tag_without_rows_is_none() {
        let client = Client::dry_run();
        let value = client
            .system_functions()
            .get_tag(
                &Context::background(),
                &SchemaObjectIdentifier::new("db", "sc", "cost"),
                &AccountObjectIdentifier::new("WH"),
                ObjectType::Warehouse,
            )
            .await
            .unwrap();
        assert_eq!(value, None);
        assert_eq!(client.trace_logs().len(), 1);
    }

    #[test]
    fn pipe_status_json() {
        let rows = ResultSet::from_rows(
            ["STATUS"],
            [[Some(
                r#"{"executionState":"RUNNING","pendingFileCount":2,"lastIngestedFilePath":"a.csv","unknownField":1}"#,
            )]],
        );
        let status = rows.deserialize::<PipeStatusRow>().unwrap().remove(0).status;
        assert_eq!(status.state(), Some(PipeExecutionState::Running));
        assert_eq!(status.pending_file_count, 2);
        assert_eq!(status.last_ingested_file_path.as_deref(), Some("a.csv"));
        assert_eq!(status.error, None);
    }
}
