use snowflake_sdk_derive::SnowflakeDeserialize;
use tracing::debug;

use super::common::{non_empty, In, Like, Timestamp};
use super::tasks_dto_gen::{AlterTaskRequest, ShowTaskRequest};
use super::tasks_gen::{TaskSet, TaskUnset};
use super::tasks_impl_gen::Tasks;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{ObjectIdentifier, SchemaObjectIdentifier};

crate::sql_enum! {
    pub enum TaskState {
        Started => "started",
        Suspended => "suspended",
    }
}

impl TaskSet {
    pub fn comment(comment: impl Into<String>) -> Self {
        TaskSet {
            comment: Some(comment.into()),
            ..Default::default()
        }
    }

    pub fn schedule(schedule: impl Into<String>) -> Self {
        TaskSet {
            schedule: Some(schedule.into()),
            ..Default::default()
        }
    }
}

impl TaskUnset {
    pub fn comment() -> Self {
        TaskUnset {
            comment: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
pub(crate) struct TaskRow {
    created_on: Timestamp,
    name: String,
    id: Option<String>,
    database_name: String,
    schema_name: String,
    owner: Option<String>,
    comment: Option<String>,
    warehouse: Option<String>,
    schedule: Option<String>,
    #[snowflake(json)]
    predecessors: Option<Vec<String>>,
    state: Option<String>,
    definition: Option<String>,
    condition: Option<String>,
    allow_overlapping_execution: Option<String>,
    error_integration: Option<String>,
    last_committed_on: Option<String>,
    last_suspended_on: Option<String>,
    owner_role_type: Option<String>,
    config: Option<String>,
    last_suspended_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub created_on: Timestamp,
    pub name: String,
    pub id: Option<String>,
    pub database_name: String,
    pub schema_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub warehouse: Option<String>,
    pub schedule: Option<String>,
    /// Tasks that must finish before this one runs; empty for root tasks.
    pub predecessors: Vec<SchemaObjectIdentifier>,
    pub state: Option<TaskState>,
    pub definition: Option<String>,
    pub condition: Option<String>,
    pub allow_overlapping_execution: bool,
    pub error_integration: Option<String>,
    pub last_committed_on: Option<String>,
    pub last_suspended_on: Option<String>,
    pub owner_role_type: Option<String>,
    pub config: Option<String>,
    pub last_suspended_reason: Option<String>,
}

impl Task {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    pub fn is_started(&self) -> bool {
        self.state == Some(TaskState::Started)
    }

    pub fn is_root(&self) -> bool {
        self.predecessors.is_empty()
    }
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        let predecessors = row
            .predecessors
            .unwrap_or_default()
            .iter()
            .filter_map(|predecessor| predecessor.parse().ok())
            .collect();
        Task {
            created_on: row.created_on,
            name: row.name,
            id: non_empty(row.id),
            database_name: row.database_name,
            schema_name: row.schema_name,
            owner: non_empty(row.owner),
            comment: non_empty(row.comment),
            warehouse: non_empty(row.warehouse),
            schedule: non_empty(row.schedule),
            predecessors,
            state: row.state.as_deref().and_then(|state| state.parse().ok()),
            definition: non_empty(row.definition),
            condition: non_empty(row.condition),
            allow_overlapping_execution: row
                .allow_overlapping_execution
                .is_some_and(|value| value.eq_ignore_ascii_case("true")),
            error_integration: non_empty(row.error_integration).filter(|value| value != "null"),
            last_committed_on: non_empty(row.last_committed_on),
            last_suspended_on: non_empty(row.last_suspended_on),
            owner_role_type: non_empty(row.owner_role_type),
            config: non_empty(row.config),
            last_suspended_reason: non_empty(row.last_suspended_reason),
        }
    }
}

impl Tasks<'_> {
    pub async fn show_by_id(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<Task> {
        let request = ShowTaskRequest::new()
            .with_like(Like::name(id))
            .with_in(In::Schema(id.schema_id()));
        self.show(ctx, &request)
            .await?
            .into_iter()
            .find(|task| task.name == id.name())
            .ok_or_else(|| Error::object_not_found(id))
    }

    /// Suspends the started root tasks of the graph `id` belongs to, so the graph can be altered.
    /// Returns the suspended tasks for [`Tasks::resume_tasks`].
    pub async fn suspend_root_tasks(
        &self,
        ctx: &Context,
        id: &SchemaObjectIdentifier,
    ) -> Result<Vec<SchemaObjectIdentifier>> {
        let mut pending = vec![id.clone()];
        let mut visited = Vec::new();
        let mut suspended = Vec::new();
        while let Some(current) = pending.pop() {
            if visited.contains(&current) {
                continue;
            }
            visited.push(current.clone());
            let task = self.show_by_id(ctx, &current).await?;
            if !task.is_root() {
                pending.extend(task.predecessors.iter().cloned());
                continue;
            }
            if task.is_started() {
                debug!(task = %current, "suspending root task");
                self.alter(ctx, &AlterTaskRequest::new(current.clone()).with_suspend(true))
                    .await?;
                suspended.push(current);
            }
        }
        Ok(suspended)
    }

    pub async fn resume_tasks(&self, ctx: &Context, ids: &[SchemaObjectIdentifier]) -> Result<()> {
        for id in ids {
            self.alter(ctx, &AlterTaskRequest::new(id.clone()).with_resume(true))
                .await?;
        }
        Ok(())
    }
}
