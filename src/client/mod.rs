//! Statement execution with uniform error classification.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use snowflake_driver::{ResultSet, SnowflakeDeserialize, StatementError};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::sql::{validate_and_build, ToSql};
use crate::validation::Validate;

mod dry_run;
mod rest;

pub use dry_run::DryRunDriver;

/// Executes parameterless SQL strings.
#[async_trait]
pub trait Driver: Send + Sync {
    async fn exec(&self, statement: &str) -> Result<(), StatementError>;
    async fn query(&self, statement: &str) -> Result<ResultSet, StatementError>;
}

/// Entry point to every object family, ex. `client.warehouses().show(&ctx, &request)`.
///
/// Cloning is cheap and clones share the underlying connection.
#[derive(Clone)]
pub struct Client {
    driver: Arc<dyn Driver>,
    config: Option<Arc<Config>>,
    dry_run: Option<Arc<DryRunDriver>>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("dry_run", &self.dry_run.is_some())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Connects over the SQL API. Session defaults of `config` travel with every statement.
    pub async fn new(config: Config) -> Result<Self> {
        let connector = rest::connect(&config).await?;
        info!(
            account = %config.account,
            user = %config.user,
            authenticator = %config.authenticator,
            "connected to snowflake"
        );
        Ok(Client {
            driver: Arc::new(connector),
            config: Some(Arc::new(config)),
            dry_run: None,
        })
    }

    /// Configuration from the default profile and `SNOWFLAKE_*` environment variables.
    pub async fn from_env() -> Result<Self> {
        Self::new(Config::builder().build()?).await
    }

    pub fn with_driver(driver: Arc<dyn Driver>) -> Self {
        Client {
            driver,
            config: None,
            dry_run: None,
        }
    }

    /// Records statements instead of executing them; reads return no rows.
    pub fn dry_run() -> Self {
        let driver = Arc::new(DryRunDriver::default());
        Client {
            driver: driver.clone(),
            config: None,
            dry_run: Some(driver),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run.is_some()
    }

    /// Statements recorded so far in dry-run mode, oldest first.
    pub fn trace_logs(&self) -> Vec<String> {
        self.dry_run
            .as_ref()
            .map(|driver| driver.statements())
            .unwrap_or_default()
    }

    /// Like [`Client::trace_logs`], but clears the trace.
    pub fn take_trace_logs(&self) -> Vec<String> {
        self.dry_run
            .as_ref()
            .map(|driver| driver.take_statements())
            .unwrap_or_default()
    }

    pub fn config(&self) -> Option<&Config> {
        self.config.as_deref()
    }

    pub async fn ping(&self, ctx: &Context) -> Result<()> {
        self.exec(ctx, "SELECT 1").await
    }

    pub async fn exec(&self, ctx: &Context, sql: &str) -> Result<()> {
        debug!(target: "snowflake_sdk::sql", sql, "exec");
        match ctx.run(self.driver.exec(sql)).await {
            Ok(result) => result.map_err(|error| classify(sql, error)),
            Err(reason) => Err(cancelled(sql, reason)),
        }
    }

    /// Rows as returned by Snowflake, not yet scanned.
    pub async fn query_raw(&self, ctx: &Context, sql: &str) -> Result<ResultSet> {
        debug!(target: "snowflake_sdk::sql", sql, "query");
        match ctx.run(self.driver.query(sql)).await {
            Ok(result) => result.map_err(|error| classify(sql, error)),
            Err(reason) => Err(cancelled(sql, reason)),
        }
    }

    pub async fn query<T: SnowflakeDeserialize>(&self, ctx: &Context, sql: &str) -> Result<Vec<T>> {
        Ok(self.query_raw(ctx, sql).await?.deserialize()?)
    }

    /// First row of the result, [`Error::ObjectNotExistOrAuthorized`] when there is none.
    pub async fn query_one<T: SnowflakeDeserialize>(&self, ctx: &Context, sql: &str) -> Result<T> {
        self.query(ctx, sql)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::ObjectNotExistOrAuthorized {
                message: format!("query returned no rows: {sql}"),
            })
    }

    /// Releases the connection. Outstanding clones keep it alive until dropped.
    pub async fn close(self) {
        debug!(dry_run = self.is_dry_run(), "closing client");
    }

    pub(crate) async fn validate_and_exec<T: ToSql + Validate>(
        &self,
        ctx: &Context,
        opts: &T,
    ) -> Result<()> {
        let sql = validate_and_build(Some(opts))?;
        self.exec(ctx, &sql).await
    }

    pub(crate) async fn validate_and_query<T: ToSql + Validate, R: SnowflakeDeserialize>(
        &self,
        ctx: &Context,
        opts: &T,
    ) -> Result<Vec<R>> {
        let sql = validate_and_build(Some(opts))?;
        self.query(ctx, &sql).await
    }

    pub(crate) async fn validate_and_query_one<T: ToSql + Validate, R: SnowflakeDeserialize>(
        &self,
        ctx: &Context,
        opts: &T,
    ) -> Result<R> {
        let sql = validate_and_build(Some(opts))?;
        self.query_one(ctx, &sql).await
    }
}

fn classify(sql: &str, error: StatementError) -> Error {
    let error = Error::from(error);
    warn!(target: "snowflake_sdk::sql", sql, %error, "statement failed");
    error
}

fn cancelled(sql: &str, reason: crate::context::CancelReason) -> Error {
    warn!(target: "snowflake_sdk::sql", sql, %reason, "statement cancelled");
    Error::Cancelled(reason)
}
