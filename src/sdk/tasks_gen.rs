// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{In, Like, LimitFrom, StartsWith, TagAssociation};
use super::sessions::SessionParameters;
use super::warehouses::WarehouseSize;
use crate::identifier::{AccountObjectIdentifier, SchemaObjectIdentifier};
use crate::sql::RawSql;
use snowflake_sdk_derive::{ToSql, Validate};

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
#[validate(conflicting(warehouse, user_task_managed_initial_warehouse_size))]
pub struct CreateTaskOptions {
    #[ddl(static, sql = "CREATE")]
    pub(crate) create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "TASK")]
    pub(crate) task: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(identifier, equals, sql = "WAREHOUSE")]
    #[validate(identifier_if_set)]
    pub warehouse: Option<AccountObjectIdentifier>,
    /// Serverless task, mutually exclusive with `warehouse`.
    #[ddl(parameter, single_quotes, sql = "USER_TASK_MANAGED_INITIAL_WAREHOUSE_SIZE")]
    pub user_task_managed_initial_warehouse_size: Option<WarehouseSize>,
    /// `<n> MINUTE` or `USING CRON <expr> <time zone>`.
    #[ddl(parameter, single_quotes, sql = "SCHEDULE")]
    pub schedule: Option<String>,
    #[ddl(parameter, sql = "CONFIG")]
    pub config: Option<RawSql>,
    #[ddl(parameter, sql = "ALLOW_OVERLAPPING_EXECUTION")]
    pub allow_overlapping_execution: Option<bool>,
    #[ddl(keyword)]
    pub session_parameters: Option<SessionParameters>,
    #[ddl(parameter, sql = "USER_TASK_TIMEOUT_MS")]
    pub user_task_timeout_ms: Option<u64>,
    #[ddl(parameter, sql = "SUSPEND_TASK_AFTER_NUM_FAILURES")]
    pub suspend_task_after_num_failures: Option<u32>,
    #[ddl(identifier, equals, sql = "ERROR_INTEGRATION")]
    #[validate(identifier_if_set)]
    pub error_integration: Option<AccountObjectIdentifier>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
    #[ddl(identifier, equals, sql = "FINALIZE")]
    #[validate(identifier_if_set)]
    pub finalize: Option<SchemaObjectIdentifier>,
    #[ddl(parameter, sql = "TASK_AUTO_RETRY_ATTEMPTS")]
    pub task_auto_retry_attempts: Option<u32>,
    #[ddl(list, sql = "WITH TAG")]
    pub tag: Vec<TagAssociation>,
    #[ddl(list, no_parentheses, sql = "AFTER")]
    pub after: Vec<SchemaObjectIdentifier>,
    #[ddl(parameter, no_equals, sql = "WHEN")]
    pub when: Option<RawSql>,
    #[ddl(parameter, no_equals, sql = "AS")]
    pub definition: RawSql,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(resume, suspend, remove_after, add_after, set, unset, set_tag, unset_tag, modify_as, modify_when))]
pub struct AlterTaskOptions {
    #[ddl(static, sql = "ALTER TASK")]
    pub(crate) alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(keyword, sql = "RESUME")]
    pub resume: bool,
    #[ddl(keyword, sql = "SUSPEND")]
    pub suspend: bool,
    #[ddl(list, no_parentheses, sql = "REMOVE AFTER")]
    pub remove_after: Vec<SchemaObjectIdentifier>,
    #[ddl(list, no_parentheses, sql = "ADD AFTER")]
    pub add_after: Vec<SchemaObjectIdentifier>,
    #[ddl(keyword, sql = "SET")]
    #[validate(nested)]
    pub set: Option<TaskSet>,
    #[ddl(list, no_parentheses, sql = "UNSET")]
    #[validate(nested)]
    pub unset: Option<TaskUnset>,
    #[ddl(list, no_parentheses, sql = "SET TAG")]
    pub set_tag: Vec<TagAssociation>,
    #[ddl(list, no_parentheses, sql = "UNSET TAG")]
    pub unset_tag: Vec<SchemaObjectIdentifier>,
    #[ddl(parameter, no_equals, sql = "MODIFY AS")]
    pub modify_as: Option<RawSql>,
    #[ddl(parameter, no_equals, sql = "MODIFY WHEN")]
    pub modify_when: Option<RawSql>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DropTaskOptions {
    #[ddl(static, sql = "DROP TASK")]
    pub(crate) drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowTaskOptions {
    #[ddl(static, sql = "SHOW")]
    pub(crate) show: (),
    #[ddl(keyword, sql = "TERSE")]
    pub terse: bool,
    #[ddl(static, sql = "TASKS")]
    pub(crate) tasks: (),
    #[ddl(keyword)]
    pub like: Option<Like>,
    #[ddl(keyword)]
    pub r#in: Option<In>,
    #[ddl(keyword)]
    pub starts_with: Option<StartsWith>,
    #[ddl(keyword, sql = "ROOT ONLY")]
    pub root_only: bool,
    #[ddl(keyword)]
    pub limit: Option<LimitFrom>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DescribeTaskOptions {
    #[ddl(static, sql = "DESCRIBE TASK")]
    pub(crate) describe: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
}

/// Runs the task once, even when it is suspended.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ExecuteTaskOptions {
    #[ddl(static, sql = "EXECUTE TASK")]
    pub(crate) execute: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(keyword, sql = "RETRY LAST")]
    pub retry_last: bool,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(warehouse, user_task_managed_initial_warehouse_size, schedule, config, allow_overlapping_execution, user_task_timeout_ms, suspend_task_after_num_failures, error_integration, comment, session_parameters))]
#[validate(conflicting(warehouse, user_task_managed_initial_warehouse_size))]
pub struct TaskSet {
    #[ddl(identifier, equals, sql = "WAREHOUSE")]
    #[validate(identifier_if_set)]
    pub warehouse: Option<AccountObjectIdentifier>,
    #[ddl(parameter, single_quotes, sql = "USER_TASK_MANAGED_INITIAL_WAREHOUSE_SIZE")]
    pub user_task_managed_initial_warehouse_size: Option<WarehouseSize>,
    #[ddl(parameter, single_quotes, sql = "SCHEDULE")]
    pub schedule: Option<String>,
    #[ddl(parameter, sql = "CONFIG")]
    pub config: Option<RawSql>,
    #[ddl(parameter, sql = "ALLOW_OVERLAPPING_EXECUTION")]
    pub allow_overlapping_execution: Option<bool>,
    #[ddl(parameter, sql = "USER_TASK_TIMEOUT_MS")]
    pub user_task_timeout_ms: Option<u64>,
    #[ddl(parameter, sql = "SUSPEND_TASK_AFTER_NUM_FAILURES")]
    pub suspend_task_after_num_failures: Option<u32>,
    #[ddl(identifier, equals, sql = "ERROR_INTEGRATION")]
    #[validate(identifier_if_set)]
    pub error_integration: Option<AccountObjectIdentifier>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
    #[ddl(keyword)]
    pub session_parameters: Option<SessionParameters>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(warehouse, schedule, config, allow_overlapping_execution, user_task_timeout_ms, suspend_task_after_num_failures, error_integration, comment))]
pub struct TaskUnset {
    #[ddl(keyword, sql = "WAREHOUSE")]
    pub warehouse: bool,
    #[ddl(keyword, sql = "SCHEDULE")]
    pub schedule: bool,
    #[ddl(keyword, sql = "CONFIG")]
    pub config: bool,
    #[ddl(keyword, sql = "ALLOW_OVERLAPPING_EXECUTION")]
    pub allow_overlapping_execution: bool,
    #[ddl(keyword, sql = "USER_TASK_TIMEOUT_MS")]
    pub user_task_timeout_ms: bool,
    #[ddl(keyword, sql = "SUSPEND_TASK_AFTER_NUM_FAILURES")]
    pub suspend_task_after_num_failures: bool,
    #[ddl(keyword, sql = "ERROR_INTEGRATION")]
    pub error_integration: bool,
    #[ddl(keyword, sql = "COMMENT")]
    pub comment: bool,
}
