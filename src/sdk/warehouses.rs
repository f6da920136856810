use snowflake_sdk_derive::{SnowflakeDeserialize, ToSql, Validate};

use super::common::{non_empty, Like, TagAssociation, Timestamp};
use crate::client::Client;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{AccountObjectIdentifier, ObjectIdentifier, SchemaObjectIdentifier};
use crate::validation::{ValidationError, ValidationErrors};

crate::sql_enum! {
    pub enum WarehouseType {
        Standard => "STANDARD",
        SnowparkOptimized => "SNOWPARK-OPTIMIZED" | "SNOWPARK_OPTIMIZED",
    }
}

crate::sql_enum! {
    pub enum WarehouseSize {
        XSmall => "XSMALL" | "X-SMALL",
        Small => "SMALL",
        Medium => "MEDIUM",
        Large => "LARGE",
        XLarge => "XLARGE" | "X-LARGE",
        XXLarge => "XXLARGE" | "X2LARGE" | "2X-LARGE",
        XXXLarge => "XXXLARGE" | "X3LARGE" | "3X-LARGE",
        X4Large => "X4LARGE" | "4X-LARGE",
        X5Large => "X5LARGE" | "5X-LARGE",
        X6Large => "X6LARGE" | "6X-LARGE",
    }
}

crate::sql_enum! {
    pub enum ScalingPolicy {
        Standard => "STANDARD",
        Economy => "ECONOMY",
    }
}

crate::sql_enum! {
    /// `state` column of `SHOW WAREHOUSES`.
    pub enum WarehouseState {
        Suspended => "SUSPENDED",
        Starting => "STARTING",
        Started => "STARTED",
        Suspending => "SUSPENDING",
        Resuming => "RESUMING",
        Resizing => "RESIZING",
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateWarehouseOptions {
    #[ddl(static, sql = "CREATE")]
    create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "WAREHOUSE")]
    warehouse: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(parameter, single_quotes, sql = "WAREHOUSE_TYPE")]
    pub warehouse_type: Option<WarehouseType>,
    #[ddl(parameter, sql = "WAREHOUSE_SIZE")]
    pub warehouse_size: Option<WarehouseSize>,
    #[ddl(parameter, sql = "MAX_CLUSTER_COUNT")]
    pub max_cluster_count: Option<u32>,
    #[ddl(parameter, sql = "MIN_CLUSTER_COUNT")]
    pub min_cluster_count: Option<u32>,
    #[ddl(parameter, sql = "SCALING_POLICY")]
    pub scaling_policy: Option<ScalingPolicy>,
    #[ddl(parameter, sql = "AUTO_SUSPEND")]
    pub auto_suspend: Option<u32>,
    #[ddl(parameter, sql = "AUTO_RESUME")]
    pub auto_resume: Option<bool>,
    #[ddl(parameter, sql = "INITIALLY_SUSPENDED")]
    pub initially_suspended: Option<bool>,
    #[ddl(identifier, equals, sql = "RESOURCE_MONITOR")]
    #[validate(identifier_if_set)]
    pub resource_monitor: Option<AccountObjectIdentifier>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
    #[ddl(parameter, sql = "ENABLE_QUERY_ACCELERATION")]
    pub enable_query_acceleration: Option<bool>,
    #[ddl(parameter, sql = "QUERY_ACCELERATION_MAX_SCALE_FACTOR")]
    pub query_acceleration_max_scale_factor: Option<u32>,
    #[ddl(parameter, sql = "MAX_CONCURRENCY_LEVEL")]
    pub max_concurrency_level: Option<u32>,
    #[ddl(parameter, sql = "STATEMENT_QUEUED_TIMEOUT_IN_SECONDS")]
    pub statement_queued_timeout_in_seconds: Option<u32>,
    #[ddl(parameter, sql = "STATEMENT_TIMEOUT_IN_SECONDS")]
    pub statement_timeout_in_seconds: Option<u32>,
    #[ddl(list, sql = "TAG")]
    pub tag: Vec<TagAssociation>,
}

impl CreateWarehouseOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        CreateWarehouseOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(
    suspend,
    resume,
    abort_all_queries,
    new_name,
    set,
    unset,
    set_tag,
    unset_tag
))]
#[validate(custom = "validate_resume")]
pub struct AlterWarehouseOptions {
    #[ddl(static, sql = "ALTER WAREHOUSE")]
    alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(keyword, sql = "SUSPEND")]
    pub suspend: bool,
    #[ddl(keyword, sql = "RESUME")]
    pub resume: bool,
    #[ddl(keyword, sql = "IF SUSPENDED")]
    pub if_suspended: bool,
    #[ddl(keyword, sql = "ABORT ALL QUERIES")]
    pub abort_all_queries: bool,
    #[ddl(identifier, sql = "RENAME TO")]
    #[validate(identifier_if_set)]
    pub new_name: Option<AccountObjectIdentifier>,
    #[ddl(keyword, sql = "SET")]
    #[validate(nested)]
    pub set: Option<WarehouseSet>,
    #[ddl(list, no_parentheses, sql = "UNSET")]
    #[validate(nested)]
    pub unset: Option<WarehouseUnset>,
    #[ddl(list, no_parentheses, sql = "SET TAG")]
    pub set_tag: Vec<TagAssociation>,
    #[ddl(list, no_parentheses, sql = "UNSET TAG")]
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl AlterWarehouseOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        AlterWarehouseOptions {
            name,
            ..Default::default()
        }
    }
}

fn validate_resume(opts: &AlterWarehouseOptions, errors: &mut ValidationErrors) {
    if opts.if_suspended && !opts.resume {
        errors.push(ValidationError::Invalid {
            struct_name: "AlterWarehouseOptions",
            message: "if_suspended can only be set together with resume".to_string(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(
    warehouse_type,
    warehouse_size,
    max_cluster_count,
    min_cluster_count,
    scaling_policy,
    auto_suspend,
    auto_resume,
    resource_monitor,
    comment,
    enable_query_acceleration,
    query_acceleration_max_scale_factor,
    max_concurrency_level,
    statement_queued_timeout_in_seconds,
    statement_timeout_in_seconds
))]
pub struct WarehouseSet {
    #[ddl(parameter, single_quotes, sql = "WAREHOUSE_TYPE")]
    pub warehouse_type: Option<WarehouseType>,
    #[ddl(parameter, sql = "WAREHOUSE_SIZE")]
    pub warehouse_size: Option<WarehouseSize>,
    /// Only with `warehouse_size`: block until the resize finished.
    #[ddl(parameter, sql = "WAIT_FOR_COMPLETION")]
    pub wait_for_completion: Option<bool>,
    #[ddl(parameter, sql = "MAX_CLUSTER_COUNT")]
    pub max_cluster_count: Option<u32>,
    #[ddl(parameter, sql = "MIN_CLUSTER_COUNT")]
    pub min_cluster_count: Option<u32>,
    #[ddl(parameter, sql = "SCALING_POLICY")]
    pub scaling_policy: Option<ScalingPolicy>,
    #[ddl(parameter, sql = "AUTO_SUSPEND")]
    pub auto_suspend: Option<u32>,
    #[ddl(parameter, sql = "AUTO_RESUME")]
    pub auto_resume: Option<bool>,
    #[ddl(identifier, equals, sql = "RESOURCE_MONITOR")]
    #[validate(identifier_if_set)]
    pub resource_monitor: Option<AccountObjectIdentifier>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
    #[ddl(parameter, sql = "ENABLE_QUERY_ACCELERATION")]
    pub enable_query_acceleration: Option<bool>,
    #[ddl(parameter, sql = "QUERY_ACCELERATION_MAX_SCALE_FACTOR")]
    pub query_acceleration_max_scale_factor: Option<u32>,
    #[ddl(parameter, sql = "MAX_CONCURRENCY_LEVEL")]
    pub max_concurrency_level: Option<u32>,
    #[ddl(parameter, sql = "STATEMENT_QUEUED_TIMEOUT_IN_SECONDS")]
    pub statement_queued_timeout_in_seconds: Option<u32>,
    #[ddl(parameter, sql = "STATEMENT_TIMEOUT_IN_SECONDS")]
    pub statement_timeout_in_seconds: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(
    warehouse_type,
    max_cluster_count,
    min_cluster_count,
    scaling_policy,
    auto_suspend,
    auto_resume,
    resource_monitor,
    comment,
    enable_query_acceleration,
    query_acceleration_max_scale_factor,
    max_concurrency_level,
    statement_queued_timeout_in_seconds,
    statement_timeout_in_seconds
))]
pub struct WarehouseUnset {
    #[ddl(keyword, sql = "WAREHOUSE_TYPE")]
    pub warehouse_type: bool,
    #[ddl(keyword, sql = "MAX_CLUSTER_COUNT")]
    pub max_cluster_count: bool,
    #[ddl(keyword, sql = "MIN_CLUSTER_COUNT")]
    pub min_cluster_count: bool,
    #[ddl(keyword, sql = "SCALING_POLICY")]
    pub scaling_policy: bool,
    #[ddl(keyword, sql = "AUTO_SUSPEND")]
    pub auto_suspend: bool,
    #[ddl(keyword, sql = "AUTO_RESUME")]
    pub auto_resume: bool,
    #[ddl(keyword, sql = "RESOURCE_MONITOR")]
    pub resource_monitor: bool,
    #[ddl(keyword, sql = "COMMENT")]
    pub comment: bool,
    #[ddl(keyword, sql = "ENABLE_QUERY_ACCELERATION")]
    pub enable_query_acceleration: bool,
    #[ddl(keyword, sql = "QUERY_ACCELERATION_MAX_SCALE_FACTOR")]
    pub query_acceleration_max_scale_factor: bool,
    #[ddl(keyword, sql = "MAX_CONCURRENCY_LEVEL")]
    pub max_concurrency_level: bool,
    #[ddl(keyword, sql = "STATEMENT_QUEUED_TIMEOUT_IN_SECONDS")]
    pub statement_queued_timeout_in_seconds: bool,
    #[ddl(keyword, sql = "STATEMENT_TIMEOUT_IN_SECONDS")]
    pub statement_timeout_in_seconds: bool,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DropWarehouseOptions {
    #[ddl(static, sql = "DROP WAREHOUSE")]
    drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
}

impl DropWarehouseOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        DropWarehouseOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowWarehousesOptions {
    #[ddl(static, sql = "SHOW WAREHOUSES")]
    show: (),
    #[ddl(keyword)]
    pub like: Option<Like>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
struct DescribeWarehouseOptions {
    #[ddl(static, sql = "DESCRIBE WAREHOUSE")]
    describe: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    name: AccountObjectIdentifier,
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct WarehouseRow {
    name: String,
    state: WarehouseState,
    #[snowflake(rename = "type")]
    warehouse_type: WarehouseType,
    size: WarehouseSize,
    min_cluster_count: Option<u32>,
    max_cluster_count: Option<u32>,
    started_clusters: Option<u32>,
    running: Option<u32>,
    queued: Option<u32>,
    is_default: Option<bool>,
    is_current: Option<bool>,
    auto_suspend: Option<String>,
    auto_resume: Option<bool>,
    created_on: Timestamp,
    resumed_on: Option<Timestamp>,
    updated_on: Option<Timestamp>,
    owner: Option<String>,
    comment: Option<String>,
    enable_query_acceleration: Option<bool>,
    query_acceleration_max_scale_factor: Option<u32>,
    resource_monitor: Option<String>,
    scaling_policy: Option<ScalingPolicy>,
    owner_role_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Warehouse {
    pub name: String,
    pub state: WarehouseState,
    pub warehouse_type: WarehouseType,
    pub size: WarehouseSize,
    pub min_cluster_count: Option<u32>,
    pub max_cluster_count: Option<u32>,
    pub started_clusters: u32,
    pub running: u32,
    pub queued: u32,
    pub is_default: bool,
    pub is_current: bool,
    /// `None` when the warehouse never suspends.
    pub auto_suspend: Option<u32>,
    pub auto_resume: bool,
    pub created_on: Timestamp,
    pub resumed_on: Option<Timestamp>,
    pub updated_on: Option<Timestamp>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub enable_query_acceleration: bool,
    pub query_acceleration_max_scale_factor: Option<u32>,
    pub resource_monitor: Option<AccountObjectIdentifier>,
    pub scaling_policy: Option<ScalingPolicy>,
    pub owner_role_type: Option<String>,
}

impl Warehouse {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

impl From<WarehouseRow> for Warehouse {
    fn from(row: WarehouseRow) -> Self {
        Warehouse {
            name: row.name,
            state: row.state,
            warehouse_type: row.warehouse_type,
            size: row.size,
            min_cluster_count: row.min_cluster_count,
            max_cluster_count: row.max_cluster_count,
            started_clusters: row.started_clusters.unwrap_or_default(),
            running: row.running.unwrap_or_default(),
            queued: row.queued.unwrap_or_default(),
            is_default: row.is_default.unwrap_or_default(),
            is_current: row.is_current.unwrap_or_default(),
            auto_suspend: row.auto_suspend.and_then(|value| value.trim().parse().ok()),
            auto_resume: row.auto_resume.unwrap_or_default(),
            created_on: row.created_on,
            resumed_on: row.resumed_on,
            updated_on: row.updated_on,
            owner: non_empty(row.owner),
            comment: non_empty(row.comment),
            enable_query_acceleration: row.enable_query_acceleration.unwrap_or_default(),
            query_acceleration_max_scale_factor: row.query_acceleration_max_scale_factor,
            resource_monitor: non_empty(row.resource_monitor)
                .filter(|monitor| monitor != "null")
                .map(AccountObjectIdentifier::new),
            scaling_policy: row.scaling_policy,
            owner_role_type: non_empty(row.owner_role_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, SnowflakeDeserialize)]
pub struct WarehouseDetails {
    pub created_on: Timestamp,
    pub name: String,
    pub kind: String,
}

pub struct Warehouses<'a> {
    client: &'a Client,
}

impl<'a> Warehouses<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Warehouses { client }
    }

    pub async fn create(&self, ctx: &Context, opts: &CreateWarehouseOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn alter(&self, ctx: &Context, opts: &AlterWarehouseOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn drop(&self, ctx: &Context, opts: &DropWarehouseOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn show(&self, ctx: &Context, opts: &ShowWarehousesOptions) -> Result<Vec<Warehouse>> {
        let rows: Vec<WarehouseRow> = self.client.validate_and_query(ctx, opts).await?;
        Ok(rows.into_iter().map(Warehouse::from).collect())
    }

    pub async fn show_by_id(&self, ctx: &Context, id: &AccountObjectIdentifier) -> Result<Warehouse> {
        let opts = ShowWarehousesOptions {
            like: Some(Like::name(id)),
            ..Default::default()
        };
        self.show(ctx, &opts)
            .await?
            .into_iter()
            .find(|warehouse| warehouse.name == id.name())
            .ok_or_else(|| Error::object_not_found(id))
    }

    pub async fn describe(&self, ctx: &Context, id: &AccountObjectIdentifier) -> Result<WarehouseDetails> {
        let opts = DescribeWarehouseOptions {
            name: id.clone(),
            ..Default::default()
        };
        self.client.validate_and_query_one(ctx, &opts).await
    }
}
