use snowflake_sdk_derive::SnowflakeDeserialize;

use super::common::{non_empty, split_list, In, Like, Timestamp};
use super::streams_dto_gen::ShowStreamRequest;
use super::streams_gen::{OnStream, OnStreamStatement};
use super::streams_impl_gen::Streams;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{ObjectIdentifier, SchemaObjectIdentifier};

crate::sql_enum! {
    pub enum StreamSourceType {
        Table => "Table",
        ExternalTable => "External Table",
        View => "View",
        Stage => "Stage",
    }
}

crate::sql_enum! {
    pub enum StreamMode {
        Default => "DEFAULT",
        AppendOnly => "APPEND_ONLY",
        InsertOnly => "INSERT_ONLY",
    }
}

impl OnStream {
    pub fn at(statement: OnStreamStatement) -> Self {
        OnStream {
            at: true,
            statement,
            ..Default::default()
        }
    }

    pub fn before(statement: OnStreamStatement) -> Self {
        OnStream {
            before: true,
            statement,
            ..Default::default()
        }
    }
}

impl OnStreamStatement {
    /// A timestamp expression, ex. `TO_TIMESTAMP_TZ('2024-01-01 00:00:00')`.
    pub fn timestamp(expression: impl Into<String>) -> Self {
        OnStreamStatement {
            timestamp: Some(expression.into()),
            ..Default::default()
        }
    }

    /// Difference in seconds from the current time, ex. `-3600`.
    pub fn offset(seconds: impl Into<String>) -> Self {
        OnStreamStatement {
            offset: Some(seconds.into()),
            ..Default::default()
        }
    }

    pub fn statement(query_id: impl Into<String>) -> Self {
        OnStreamStatement {
            statement: Some(query_id.into()),
            ..Default::default()
        }
    }

    /// Starts from the current offset of another stream.
    pub fn stream(name: impl Into<String>) -> Self {
        OnStreamStatement {
            stream: Some(name.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
pub(crate) struct StreamRow {
    created_on: Timestamp,
    name: String,
    database_name: String,
    schema_name: String,
    owner: Option<String>,
    comment: Option<String>,
    table_name: Option<String>,
    source_type: Option<String>,
    base_tables: Option<String>,
    #[snowflake(rename = "type")]
    kind: Option<String>,
    stale: Option<String>,
    mode: Option<String>,
    stale_after: Option<String>,
    invalid_reason: Option<String>,
    owner_role_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    pub created_on: Timestamp,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    /// Fully qualified source object, missing for stages.
    pub table_name: Option<SchemaObjectIdentifier>,
    pub source_type: Option<StreamSourceType>,
    pub base_tables: Vec<SchemaObjectIdentifier>,
    /// Always `DELTA`.
    pub kind: Option<String>,
    pub stale: bool,
    pub mode: Option<StreamMode>,
    pub stale_after: Option<String>,
    pub invalid_reason: Option<String>,
    pub owner_role_type: Option<String>,
}

impl Stream {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    pub fn is_append_only(&self) -> bool {
        self.mode == Some(StreamMode::AppendOnly)
    }
}

impl From<StreamRow> for Stream {
    fn from(row: StreamRow) -> Self {
        Stream {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            owner: non_empty(row.owner),
            comment: non_empty(row.comment),
            table_name: row.table_name.as_deref().and_then(|name| name.parse().ok()),
            source_type: row.source_type.as_deref().and_then(|value| value.parse().ok()),
            base_tables: split_list(row.base_tables.as_deref())
                .iter()
                .filter_map(|table| table.parse().ok())
                .collect(),
            kind: non_empty(row.kind),
            stale: row.stale.is_some_and(|value| value.eq_ignore_ascii_case("true")),
            mode: row.mode.as_deref().and_then(|value| value.parse().ok()),
            stale_after: non_empty(row.stale_after),
            invalid_reason: non_empty(row.invalid_reason),
            owner_role_type: non_empty(row.owner_role_type),
        }
    }
}

impl Streams<'_> {
    pub async fn show_by_id(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<Stream> {
        let request = ShowStreamRequest::new()
            .with_like(Like::name(id))
            .with_in(In::Schema(id.schema_id()));
        self.show(ctx, &request)
            .await?
            .into_iter()
            .find(|stream| stream.name == id.name())
            .ok_or_else(|| Error::object_not_found(id))
    }
}
