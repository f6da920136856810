use std::time::Duration;

use async_trait::async_trait;
use snowflake_driver::oauth::{refresh_access_token, TokenRequest};
use snowflake_driver::{
    Authentication, ConnectionOptions, KeyPair, ResultSet, SessionDefaults, SnowflakeConnector,
    StatementError,
};

use super::Driver;
use crate::config::{Authenticator, Config, ConfigError};

const DEFAULT_JWT_TIMEOUT: Duration = Duration::from_secs(60);

#[async_trait]
impl Driver for SnowflakeConnector {
    async fn exec(&self, statement: &str) -> Result<(), StatementError> {
        self.sql(statement).execute().await.map(|_| ())
    }

    async fn query(&self, statement: &str) -> Result<ResultSet, StatementError> {
        self.sql(statement).execute().await
    }
}

pub(super) async fn connect(config: &Config) -> Result<SnowflakeConnector, ConfigError> {
    let authentication = authentication(config).await?;
    let mut options = ConnectionOptions::new(config.base_url(), authentication);
    options.defaults = SessionDefaults {
        role: config.role.clone(),
        warehouse: config.warehouse.clone(),
        database: config.database.clone(),
        schema: config.schema.clone(),
    };
    options.request_timeout = config.client_timeout;
    options.statement_timeout = config
        .client_timeout
        .map(|timeout| u32::try_from(timeout.as_secs()).unwrap_or(u32::MAX));
    options.parameters = config.params.clone();
    SnowflakeConnector::try_new(options).map_err(|error| ConfigError::Connection(error.to_string()))
}

async fn authentication(config: &Config) -> Result<Authentication, ConfigError> {
    let missing = |field| ConfigError::MissingCredential {
        authenticator: config.authenticator,
        field,
    };
    match config.authenticator {
        Authenticator::Jwt => {
            let private_key = config
                .private_key
                .as_deref()
                .ok_or_else(|| missing("private_key"))?;
            let key_pair = KeyPair::from_pem(
                private_key,
                config.private_key_passphrase.as_deref(),
                &config.account,
                &config.user,
                config.jwt_timeout.unwrap_or(DEFAULT_JWT_TIMEOUT),
            )
            .map_err(|error| ConfigError::Connection(error.to_string()))?;
            Ok(Authentication::KeyPair(key_pair))
        }
        Authenticator::OAuth => Ok(Authentication::OAuth {
            token: config.token.clone().ok_or_else(|| missing("token"))?,
        }),
        Authenticator::TokenAccessor => {
            let accessor = config
                .token_accessor
                .as_ref()
                .ok_or_else(|| missing("token_accessor"))?;
            let request = TokenRequest {
                token_endpoint: accessor.token_endpoint.to_string(),
                refresh_token: accessor.refresh_token.clone(),
                client_id: accessor.client_id.clone(),
                client_secret: accessor.client_secret.clone(),
                redirect_uri: accessor.redirect_uri.clone(),
            };
            let mut builder = snowflake_driver::reqwest::Client::builder();
            if let Some(timeout) = config.login_timeout {
                builder = builder.timeout(timeout);
            }
            let http = builder
                .build()
                .map_err(|error| ConfigError::Connection(error.to_string()))?;
            let token = refresh_access_token(&http, &request)
                .await
                .map_err(|error| ConfigError::Connection(error.to_string()))?;
            Ok(Authentication::OAuth { token })
        }
        other => Err(ConfigError::UnsupportedAuthenticator(other)),
    }
}
