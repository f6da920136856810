use snowflake_sdk_derive::SnowflakeDeserialize;

use super::common::{non_empty, In, Like, Timestamp};
use super::views_dto_gen::ShowViewRequest;
use super::views_gen::ViewColumn;
use super::views_impl_gen::Views;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{ObjectIdentifier, SchemaObjectIdentifier};

impl ViewColumn {
    pub fn new(name: impl Into<String>) -> Self {
        ViewColumn {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_masking_policy(mut self, policy: SchemaObjectIdentifier) -> Self {
        self.masking_policy = Some(policy);
        self
    }
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
pub(crate) struct ViewRow {
    created_on: Timestamp,
    name: String,
    kind: Option<String>,
    reserved: Option<String>,
    database_name: String,
    schema_name: String,
    owner: Option<String>,
    comment: Option<String>,
    text: Option<String>,
    is_secure: Option<bool>,
    is_materialized: Option<bool>,
    owner_role_type: Option<String>,
    change_tracking: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub created_on: Timestamp,
    pub name: String,
    pub kind: Option<String>,
    pub reserved: Option<String>,
    pub database_name: String,
    pub schema_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    /// Full `CREATE VIEW` text, missing for `SHOW TERSE VIEWS`.
    pub text: Option<String>,
    pub is_secure: bool,
    pub is_materialized: bool,
    pub owner_role_type: Option<String>,
    pub change_tracking: bool,
}

impl View {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

impl From<ViewRow> for View {
    fn from(row: ViewRow) -> Self {
        View {
            created_on: row.created_on,
            name: row.name,
            kind: non_empty(row.kind),
            reserved: non_empty(row.reserved),
            database_name: row.database_name,
            schema_name: row.schema_name,
            owner: non_empty(row.owner),
            comment: non_empty(row.comment),
            text: non_empty(row.text),
            is_secure: row.is_secure.unwrap_or_default(),
            is_materialized: row.is_materialized.unwrap_or_default(),
            owner_role_type: non_empty(row.owner_role_type),
            change_tracking: row
                .change_tracking
                .is_some_and(|value| value.eq_ignore_ascii_case("on")),
        }
    }
}

/// Row of `DESCRIBE VIEW`.
#[derive(Debug, Clone, SnowflakeDeserialize)]
pub(crate) struct ViewColumnRow {
    name: String,
    #[snowflake(rename = "type")]
    data_type: String,
    kind: Option<String>,
    #[snowflake(rename = "null?")]
    nullable: Option<bool>,
    default: Option<String>,
    expression: Option<String>,
    comment: Option<String>,
    #[snowflake(rename = "policy name")]
    policy_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewColumnDetails {
    pub name: String,
    pub data_type: String,
    pub kind: Option<String>,
    pub nullable: bool,
    pub default: Option<String>,
    pub expression: Option<String>,
    pub comment: Option<String>,
    pub policy_name: Option<SchemaObjectIdentifier>,
}

impl From<ViewColumnRow> for ViewColumnDetails {
    fn from(row: ViewColumnRow) -> Self {
        ViewColumnDetails {
            name: row.name,
            data_type: row.data_type,
            kind: non_empty(row.kind),
            nullable: row.nullable.unwrap_or(true),
            default: non_empty(row.default),
            expression: non_empty(row.expression),
            comment: non_empty(row.comment),
            policy_name: row.policy_name.as_deref().and_then(|name| name.parse().ok()),
        }
    }
}

impl Views<'_> {
    pub async fn show_by_id(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<View> {
        let request = ShowViewRequest::new()
            .with_like(Like::name(id))
            .with_in(In::Schema(id.schema_id()));
        self.show(ctx, &request)
            .await?
            .into_iter()
            .find(|view| view.name == id.name())
            .ok_or_else(|| Error::object_not_found(id))
    }
}
