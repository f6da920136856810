// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{In, Like, LimitFrom, StartsWith, TagAssociation};
use super::sessions::SessionParameters;
use super::warehouses::WarehouseSize;
use crate::identifier::{AccountObjectIdentifier, SchemaObjectIdentifier};
use crate::sql::RawSql;
use super::tasks_gen::*;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    pub(crate) or_replace: bool,
    pub(crate) if_not_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
    pub(crate) warehouse: Option<AccountObjectIdentifier>,
    pub(crate) user_task_managed_initial_warehouse_size: Option<WarehouseSize>,
    pub(crate) schedule: Option<String>,
    pub(crate) config: Option<RawSql>,
    pub(crate) allow_overlapping_execution: Option<bool>,
    pub(crate) session_parameters: Option<SessionParameters>,
    pub(crate) user_task_timeout_ms: Option<u64>,
    pub(crate) suspend_task_after_num_failures: Option<u32>,
    pub(crate) error_integration: Option<AccountObjectIdentifier>,
    pub(crate) comment: Option<String>,
    pub(crate) finalize: Option<SchemaObjectIdentifier>,
    pub(crate) task_auto_retry_attempts: Option<u32>,
    pub(crate) tag: Vec<TagAssociation>,
    pub(crate) after: Vec<SchemaObjectIdentifier>,
    pub(crate) when: Option<RawSql>,
    pub(crate) definition: RawSql,
}

impl CreateTaskRequest {
    pub fn new(name: SchemaObjectIdentifier, definition: RawSql) -> Self {
        Self {
            or_replace: false,
            if_not_exists: false,
            name,
            warehouse: None,
            user_task_managed_initial_warehouse_size: None,
            schedule: None,
            config: None,
            allow_overlapping_execution: None,
            session_parameters: None,
            user_task_timeout_ms: None,
            suspend_task_after_num_failures: None,
            error_integration: None,
            comment: None,
            finalize: None,
            task_auto_retry_attempts: None,
            tag: Vec::new(),
            after: Vec::new(),
            when: None,
            definition,
        }
    }

    pub fn with_or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = or_replace;
        self
    }

    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = if_not_exists;
        self
    }

    pub fn with_warehouse(mut self, warehouse: impl Into<AccountObjectIdentifier>) -> Self {
        self.warehouse = Some(warehouse.into());
        self
    }

    pub fn with_user_task_managed_initial_warehouse_size(mut self, user_task_managed_initial_warehouse_size: impl Into<WarehouseSize>) -> Self {
        self.user_task_managed_initial_warehouse_size = Some(user_task_managed_initial_warehouse_size.into());
        self
    }

    pub fn with_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.schedule = Some(schedule.into());
        self
    }

    pub fn with_config(mut self, config: impl Into<RawSql>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn with_allow_overlapping_execution(mut self, allow_overlapping_execution: bool) -> Self {
        self.allow_overlapping_execution = Some(allow_overlapping_execution);
        self
    }

    pub fn with_session_parameters(mut self, session_parameters: impl Into<SessionParameters>) -> Self {
        self.session_parameters = Some(session_parameters.into());
        self
    }

    pub fn with_user_task_timeout_ms(mut self, user_task_timeout_ms: u64) -> Self {
        self.user_task_timeout_ms = Some(user_task_timeout_ms);
        self
    }

    pub fn with_suspend_task_after_num_failures(mut self, suspend_task_after_num_failures: u32) -> Self {
        self.suspend_task_after_num_failures = Some(suspend_task_after_num_failures);
        self
    }

    pub fn with_error_integration(mut self, error_integration: impl Into<AccountObjectIdentifier>) -> Self {
        self.error_integration = Some(error_integration.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_finalize(mut self, finalize: impl Into<SchemaObjectIdentifier>) -> Self {
        self.finalize = Some(finalize.into());
        self
    }

    pub fn with_task_auto_retry_attempts(mut self, task_auto_retry_attempts: u32) -> Self {
        self.task_auto_retry_attempts = Some(task_auto_retry_attempts);
        self
    }

    pub fn with_tag(mut self, tag: Vec<TagAssociation>) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_after(mut self, after: Vec<SchemaObjectIdentifier>) -> Self {
        self.after = after;
        self
    }

    pub fn with_when(mut self, when: impl Into<RawSql>) -> Self {
        self.when = Some(when.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlterTaskRequest {
    pub(crate) if_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
    pub(crate) resume: bool,
    pub(crate) suspend: bool,
    pub(crate) remove_after: Vec<SchemaObjectIdentifier>,
    pub(crate) add_after: Vec<SchemaObjectIdentifier>,
    pub(crate) set: Option<TaskSet>,
    pub(crate) unset: Option<TaskUnset>,
    pub(crate) set_tag: Vec<TagAssociation>,
    pub(crate) unset_tag: Vec<SchemaObjectIdentifier>,
    pub(crate) modify_as: Option<RawSql>,
    pub(crate) modify_when: Option<RawSql>,
}

impl AlterTaskRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            if_exists: false,
            name,
            resume: false,
            suspend: false,
            remove_after: Vec::new(),
            add_after: Vec::new(),
            set: None,
            unset: None,
            set_tag: Vec::new(),
            unset_tag: Vec::new(),
            modify_as: None,
            modify_when: None,
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }

    pub fn with_resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }

    pub fn with_suspend(mut self, suspend: bool) -> Self {
        self.suspend = suspend;
        self
    }

    pub fn with_remove_after(mut self, remove_after: Vec<SchemaObjectIdentifier>) -> Self {
        self.remove_after = remove_after;
        self
    }

    pub fn with_add_after(mut self, add_after: Vec<SchemaObjectIdentifier>) -> Self {
        self.add_after = add_after;
        self
    }

    pub fn with_set(mut self, set: impl Into<TaskSet>) -> Self {
        self.set = Some(set.into());
        self
    }

    pub fn with_unset(mut self, unset: impl Into<TaskUnset>) -> Self {
        self.unset = Some(unset.into());
        self
    }

    pub fn with_set_tag(mut self, set_tag: Vec<TagAssociation>) -> Self {
        self.set_tag = set_tag;
        self
    }

    pub fn with_unset_tag(mut self, unset_tag: Vec<SchemaObjectIdentifier>) -> Self {
        self.unset_tag = unset_tag;
        self
    }

    pub fn with_modify_as(mut self, modify_as: impl Into<RawSql>) -> Self {
        self.modify_as = Some(modify_as.into());
        self
    }

    pub fn with_modify_when(mut self, modify_when: impl Into<RawSql>) -> Self {
        self.modify_when = Some(modify_when.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropTaskRequest {
    pub(crate) if_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
}

impl DropTaskRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            if_exists: false,
            name,
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowTaskRequest {
    pub(crate) terse: bool,
    pub(crate) like: Option<Like>,
    pub(crate) r#in: Option<In>,
    pub(crate) starts_with: Option<StartsWith>,
    pub(crate) root_only: bool,
    pub(crate) limit: Option<LimitFrom>,
}

impl ShowTaskRequest {
    pub fn new() -> Self {
        Self {
            terse: false,
            like: None,
            r#in: None,
            starts_with: None,
            root_only: false,
            limit: None,
        }
    }

    pub fn with_terse(mut self, terse: bool) -> Self {
        self.terse = terse;
        self
    }

    pub fn with_like(mut self, like: impl Into<Like>) -> Self {
        self.like = Some(like.into());
        self
    }

    pub fn with_in(mut self, r#in: impl Into<In>) -> Self {
        self.r#in = Some(r#in.into());
        self
    }

    pub fn with_starts_with(mut self, starts_with: impl Into<StartsWith>) -> Self {
        self.starts_with = Some(starts_with.into());
        self
    }

    pub fn with_root_only(mut self, root_only: bool) -> Self {
        self.root_only = root_only;
        self
    }

    pub fn with_limit(mut self, limit: impl Into<LimitFrom>) -> Self {
        self.limit = Some(limit.into());
        self
    }
}

/// Runs the task once, even when it is suspended.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteTaskRequest {
    pub(crate) name: SchemaObjectIdentifier,
    pub(crate) retry_last: bool,
}

impl ExecuteTaskRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            name,
            retry_last: false,
        }
    }

    pub fn with_retry_last(mut self, retry_last: bool) -> Self {
        self.retry_last = retry_last;
        self
    }
}
