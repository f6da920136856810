// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{In, Like, LimitFrom, StartsWith, TagAssociation};
use super::sessions::SessionParameters;
use super::warehouses::WarehouseSize;
use crate::identifier::{AccountObjectIdentifier, SchemaObjectIdentifier};
use crate::sql::RawSql;
use super::tasks_dto_gen::*;
use super::tasks_ext::*;
use super::tasks_gen::*;
use crate::client::Client;
use crate::context::Context;
use crate::error::Result;

impl CreateTaskRequest {
    pub(crate) fn to_opts(&self) -> CreateTaskOptions {
        CreateTaskOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name.clone(),
            warehouse: self.warehouse.clone(),
            user_task_managed_initial_warehouse_size: self.user_task_managed_initial_warehouse_size.clone(),
            schedule: self.schedule.clone(),
            config: self.config.clone(),
            allow_overlapping_execution: self.allow_overlapping_execution.clone(),
            session_parameters: self.session_parameters.clone(),
            user_task_timeout_ms: self.user_task_timeout_ms.clone(),
            suspend_task_after_num_failures: self.suspend_task_after_num_failures.clone(),
            error_integration: self.error_integration.clone(),
            comment: self.comment.clone(),
            finalize: self.finalize.clone(),
            task_auto_retry_attempts: self.task_auto_retry_attempts.clone(),
            tag: self.tag.clone(),
            after: self.after.clone(),
            when: self.when.clone(),
            definition: self.definition.clone(),
            ..Default::default()
        }
    }
}

impl AlterTaskRequest {
    pub(crate) fn to_opts(&self) -> AlterTaskOptions {
        AlterTaskOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            resume: self.resume,
            suspend: self.suspend,
            remove_after: self.remove_after.clone(),
            add_after: self.add_after.clone(),
            set: self.set.clone(),
            unset: self.unset.clone(),
            set_tag: self.set_tag.clone(),
            unset_tag: self.unset_tag.clone(),
            modify_as: self.modify_as.clone(),
            modify_when: self.modify_when.clone(),
            ..Default::default()
        }
    }
}

impl DropTaskRequest {
    pub(crate) fn to_opts(&self) -> DropTaskOptions {
        DropTaskOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            ..Default::default()
        }
    }
}

impl ShowTaskRequest {
    pub(crate) fn to_opts(&self) -> ShowTaskOptions {
        ShowTaskOptions {
            terse: self.terse,
            like: self.like.clone(),
            r#in: self.r#in.clone(),
            starts_with: self.starts_with.clone(),
            root_only: self.root_only,
            limit: self.limit.clone(),
            ..Default::default()
        }
    }
}

impl ExecuteTaskRequest {
    pub(crate) fn to_opts(&self) -> ExecuteTaskOptions {
        ExecuteTaskOptions {
            name: self.name.clone(),
            retry_last: self.retry_last,
            ..Default::default()
        }
    }
}

/// `TASK` statements. Tasks are created suspended; `RESUME` starts them.
pub struct Tasks<'a> {
    pub(crate) client: &'a Client,
}

impl<'a> Tasks<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Tasks { client }
    }

    pub async fn create(&self, ctx: &Context, request: &CreateTaskRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn alter(&self, ctx: &Context, request: &AlterTaskRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn drop(&self, ctx: &Context, request: &DropTaskRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn show(&self, ctx: &Context, request: &ShowTaskRequest) -> Result<Vec<Task>> {
        let rows: Vec<TaskRow> = self.client.validate_and_query(ctx, &request.to_opts()).await?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    pub async fn describe(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<Task> {
        let opts = DescribeTaskOptions {
            name: id.clone(),
            ..Default::default()
        };
        let row: TaskRow = self.client.validate_and_query_one(ctx, &opts).await?;
        Ok(row.into())
    }

    /// Runs the task once, even when it is suspended.
    pub async fn execute(&self, ctx: &Context, request: &ExecuteTaskRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }
}
