use snowflake_sdk_derive::SnowflakeDeserialize;

use super::common::{non_empty, In, Like, Timestamp};
use super::sequences_dto_gen::ShowSequenceRequest;
use super::sequences_gen::SequenceSet;
use super::sequences_impl_gen::Sequences;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{ObjectIdentifier, SchemaObjectIdentifier};

crate::sql_enum! {
    /// Whether generated values are guaranteed to increase.
    pub enum ValuesBehavior {
        Order => "ORDER",
        NoOrder => "NOORDER",
    }
}

impl SequenceSet {
    pub fn values_behavior(values_behavior: ValuesBehavior) -> Self {
        SequenceSet {
            values_behavior: Some(values_behavior),
            ..Default::default()
        }
    }

    pub fn comment(comment: impl Into<String>) -> Self {
        SequenceSet {
            comment: Some(comment.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
pub(crate) struct SequenceRow {
    created_on: Timestamp,
    name: String,
    database_name: String,
    schema_name: String,
    next_value: i64,
    interval: i64,
    owner: Option<String>,
    owner_role_type: Option<String>,
    comment: Option<String>,
    ordered: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub created_on: Timestamp,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub next_value: i64,
    pub interval: i64,
    pub owner: Option<String>,
    pub owner_role_type: Option<String>,
    pub comment: Option<String>,
    pub ordered: bool,
}

impl Sequence {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    pub fn values_behavior(&self) -> ValuesBehavior {
        if self.ordered {
            ValuesBehavior::Order
        } else {
            ValuesBehavior::NoOrder
        }
    }
}

impl From<SequenceRow> for Sequence {
    fn from(row: SequenceRow) -> Self {
        Sequence {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            next_value: row.next_value,
            interval: row.interval,
            owner: non_empty(row.owner),
            owner_role_type: non_empty(row.owner_role_type),
            comment: non_empty(row.comment),
            ordered: row.ordered.unwrap_or_default(),
        }
    }
}

impl Sequences<'_> {
    pub async fn show_by_id(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<Sequence> {
        let request = ShowSequenceRequest::new()
            .with_like(Like::name(id))
            .with_in(In::Schema(id.schema_id()));
        self.show(ctx, &request)
            .await?
            .into_iter()
            .find(|sequence| sequence.name == id.name())
            .ok_or_else(|| Error::object_not_found(id))
    }
}
