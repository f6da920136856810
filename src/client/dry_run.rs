use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use snowflake_driver::{ResultSet, StatementError};
use tracing::info;

use super::Driver;

/// Collects statements instead of sending them.
#[derive(Debug, Default)]
pub struct DryRunDriver {
    statements: Mutex<Vec<String>>,
}

impl DryRunDriver {
    pub fn statements(&self) -> Vec<String> {
        self.statements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the recorded statements and starts a fresh trace.
    pub fn take_statements(&self) -> Vec<String> {
        std::mem::take(
            &mut *self
                .statements
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    fn record(&self, statement: &str) {
        info!(target: "snowflake_sdk::sql", sql = statement, "dry run");
        self.statements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(statement.to_string());
    }
}

#[async_trait]
impl Driver for DryRunDriver {
    async fn exec(&self, statement: &str) -> Result<(), StatementError> {
        self.record(statement);
        Ok(())
    }

    async fn query(&self, statement: &str) -> Result<ResultSet, StatementError> {
        self.record(statement);
        Ok(ResultSet::default())
    }
}
