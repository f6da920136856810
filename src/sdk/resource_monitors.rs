use snowflake_sdk_derive::{SnowflakeDeserialize, ToSql, Validate};

use super::common::{non_empty, split_list, Like, Timestamp};
use crate::client::Client;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{AccountObjectIdentifier, ObjectIdentifier};
use crate::sql::{Quotes, SqlValue};

crate::sql_enum! {
    pub enum Frequency {
        Monthly => "MONTHLY",
        Daily => "DAILY",
        Weekly => "WEEKLY",
        Yearly => "YEARLY",
        Never => "NEVER",
    }
}

crate::sql_enum! {
    pub enum TriggerAction {
        Suspend => "SUSPEND",
        SuspendImmediate => "SUSPEND_IMMEDIATE",
        Notify => "NOTIFY",
    }
}

crate::sql_enum! {
    pub enum ResourceMonitorLevel {
        Account => "ACCOUNT",
        Warehouse => "WAREHOUSE",
    }
}

/// `START_TIMESTAMP` is either `IMMEDIATELY` or a quoted timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartTimestamp {
    Immediately,
    At(String),
}

impl SqlValue for StartTimestamp {
    fn write_value(&self, out: &mut String, _quotes: Quotes) {
        match self {
            StartTimestamp::Immediately => out.push_str("IMMEDIATELY"),
            StartTimestamp::At(timestamp) => Quotes::Single.write(out, timestamp),
        }
    }
}

/// `ON <threshold> PERCENT DO <action>`.
#[derive(Debug, Clone, PartialEq, Eq, ToSql)]
pub struct TriggerDefinition {
    #[ddl(parameter, no_equals, sql = "ON")]
    pub threshold: u32,
    #[ddl(static, sql = "PERCENT DO")]
    percent_do: (),
    #[ddl(keyword)]
    pub action: TriggerAction,
}

impl TriggerDefinition {
    pub fn new(threshold: u32, action: TriggerAction) -> Self {
        TriggerDefinition {
            threshold,
            percent_do: (),
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ResourceMonitorWith {
    #[ddl(parameter, sql = "CREDIT_QUOTA")]
    pub credit_quota: Option<u32>,
    #[ddl(parameter, sql = "FREQUENCY")]
    pub frequency: Option<Frequency>,
    #[ddl(parameter, sql = "START_TIMESTAMP")]
    pub start_timestamp: Option<StartTimestamp>,
    #[ddl(parameter, single_quotes, sql = "END_TIMESTAMP")]
    pub end_timestamp: Option<String>,
    #[ddl(list, equals, double_quotes, sql = "NOTIFY_USERS")]
    pub notify_users: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateResourceMonitorOptions {
    #[ddl(static, sql = "CREATE")]
    create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "RESOURCE MONITOR")]
    resource_monitor: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(keyword, sql = "WITH")]
    pub with: Option<ResourceMonitorWith>,
    #[ddl(list, no_parentheses, no_comma, sql = "TRIGGERS")]
    pub triggers: Vec<TriggerDefinition>,
}

impl CreateResourceMonitorOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        CreateResourceMonitorOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(set, unset, triggers))]
#[validate(conflicting(set, unset))]
pub struct AlterResourceMonitorOptions {
    #[ddl(static, sql = "ALTER RESOURCE MONITOR")]
    alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(keyword, sql = "SET")]
    #[validate(nested)]
    pub set: Option<ResourceMonitorSet>,
    #[ddl(list, no_parentheses, sql = "UNSET")]
    #[validate(nested)]
    pub unset: Option<ResourceMonitorUnset>,
    #[ddl(list, no_parentheses, no_comma, sql = "TRIGGERS")]
    pub triggers: Vec<TriggerDefinition>,
}

impl AlterResourceMonitorOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        AlterResourceMonitorOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(credit_quota, frequency, start_timestamp, end_timestamp, notify_users))]
pub struct ResourceMonitorSet {
    #[ddl(parameter, sql = "CREDIT_QUOTA")]
    pub credit_quota: Option<u32>,
    #[ddl(parameter, sql = "FREQUENCY")]
    pub frequency: Option<Frequency>,
    #[ddl(parameter, sql = "START_TIMESTAMP")]
    pub start_timestamp: Option<StartTimestamp>,
    #[ddl(parameter, single_quotes, sql = "END_TIMESTAMP")]
    pub end_timestamp: Option<String>,
    #[ddl(list, equals, double_quotes, sql = "NOTIFY_USERS")]
    pub notify_users: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(credit_quota, end_timestamp, notify_users))]
pub struct ResourceMonitorUnset {
    #[ddl(keyword, sql = "CREDIT_QUOTA")]
    pub credit_quota: bool,
    #[ddl(keyword, sql = "END_TIMESTAMP")]
    pub end_timestamp: bool,
    #[ddl(keyword, sql = "NOTIFY_USERS")]
    pub notify_users: bool,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DropResourceMonitorOptions {
    #[ddl(static, sql = "DROP RESOURCE MONITOR")]
    drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
}

impl DropResourceMonitorOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        DropResourceMonitorOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowResourceMonitorsOptions {
    #[ddl(static, sql = "SHOW RESOURCE MONITORS")]
    show: (),
    #[ddl(keyword)]
    pub like: Option<Like>,
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct ResourceMonitorRow {
    name: String,
    credit_quota: Option<f64>,
    used_credits: Option<f64>,
    remaining_credits: Option<f64>,
    level: Option<String>,
    frequency: Option<Frequency>,
    start_time: Option<Timestamp>,
    end_time: Option<Timestamp>,
    notify_at: Option<String>,
    suspend_at: Option<String>,
    suspend_immediately_at: Option<String>,
    created_on: Timestamp,
    owner: Option<String>,
    comment: Option<String>,
    notify_users: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceMonitor {
    pub name: String,
    pub credit_quota: Option<f64>,
    pub used_credits: f64,
    pub remaining_credits: f64,
    pub level: Option<ResourceMonitorLevel>,
    pub frequency: Option<Frequency>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub notify_at: Vec<u32>,
    pub suspend_at: Option<u32>,
    pub suspend_immediately_at: Option<u32>,
    pub created_on: Timestamp,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub notify_users: Vec<String>,
}

impl ResourceMonitor {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

/// `80%,90%` into `[80, 90]`, malformed entries are skipped.
fn percentages(value: Option<&str>) -> Vec<u32> {
    split_list(value)
        .iter()
        .filter_map(|item| item.trim_end_matches('%').trim().parse().ok())
        .collect()
}

impl From<ResourceMonitorRow> for ResourceMonitor {
    fn from(row: ResourceMonitorRow) -> Self {
        ResourceMonitor {
            name: row.name,
            credit_quota: row.credit_quota,
            used_credits: row.used_credits.unwrap_or_default(),
            remaining_credits: row.remaining_credits.unwrap_or_default(),
            level: row.level.and_then(|level| level.parse().ok()),
            frequency: row.frequency,
            start_time: row.start_time,
            end_time: row.end_time,
            notify_at: percentages(row.notify_at.as_deref()),
            suspend_at: percentages(row.suspend_at.as_deref()).first().copied(),
            suspend_immediately_at: percentages(row.suspend_immediately_at.as_deref())
                .first()
                .copied(),
            created_on: row.created_on,
            owner: non_empty(row.owner),
            comment: non_empty(row.comment),
            notify_users: split_list(row.notify_users.as_deref()),
        }
    }
}

pub struct ResourceMonitors<'a> {
    client: &'a Client,
}

impl<'a> ResourceMonitors<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        ResourceMonitors { client }
    }

    pub async fn create(&self, ctx: &Context, opts: &CreateResourceMonitorOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn alter(&self, ctx: &Context, opts: &AlterResourceMonitorOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn drop(&self, ctx: &Context, opts: &DropResourceMonitorOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn show(
        &self,
        ctx: &Context,
        opts: &ShowResourceMonitorsOptions,
    ) -> Result<Vec<ResourceMonitor>> {
        let rows: Vec<ResourceMonitorRow> = self.client.validate_and_query(ctx, opts).await?;
        Ok(rows.into_iter().map(ResourceMonitor::from).collect())
    }

    pub async fn show_by_id(
        &self,
        ctx: &Context,
        id: &AccountObjectIdentifier,
    ) -> Result<ResourceMonitor> {
        let opts = ShowResourceMonitorsOptions {
            like: Some(Like::name(id)),
            ..Default::default()
        };
        self.show(ctx, &opts)
            .await?
            .into_iter()
            .find(|monitor| monitor.name == id.name())
            .ok_or_else(|| Error::object_not_found(id))
    }
}
