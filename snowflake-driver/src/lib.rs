pub use chrono;
pub use reqwest;
pub use serde_json;

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

mod deserialize;
mod jwt;
pub mod oauth;
mod result;

pub use deserialize::{deserialize_cell, deserialize_json_cell, DeserializeFromStr};
pub use jwt::{KeyPair, KeyPairError};
pub use result::{DeserializeError, ResultSet, Row, SnowflakeDeserialize};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Everything needed to talk to the [SQL API](https://docs.snowflake.com/en/developer-guide/sql-api/reference).
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    /// Scheme, host and port, ex. `https://myaccount.snowflakecomputing.com:443`
    pub base_url: String,
    pub authentication: Authentication,
    pub defaults: SessionDefaults,
    pub request_timeout: Option<Duration>,
    /// Statement timeout in seconds, sent with every statement.
    pub statement_timeout: Option<u32>,
    pub poll_interval: Duration,
    /// Session parameters sent with every statement.
    pub parameters: BTreeMap<String, String>,
}

impl ConnectionOptions {
    pub fn new(base_url: impl Into<String>, authentication: Authentication) -> Self {
        ConnectionOptions {
            base_url: base_url.into(),
            authentication,
            defaults: SessionDefaults::default(),
            request_timeout: None,
            statement_timeout: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            parameters: BTreeMap::new(),
        }
    }
}

#[derive(Clone)]
pub enum Authentication {
    KeyPair(KeyPair),
    OAuth { token: String },
}

impl std::fmt::Debug for Authentication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Authentication::KeyPair(key_pair) => f.debug_tuple("KeyPair").field(key_pair).finish(),
            Authentication::OAuth { .. } => f.write_str("OAuth { token: <redacted> }"),
        }
    }
}

/// Context applied to every statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDefaults {
    pub role: Option<String>,
    pub warehouse: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
}

#[derive(Debug)]
pub struct SnowflakeConnector {
    base_url: String,
    host: String,
    client: reqwest::Client,
    authentication: Authentication,
    defaults: SessionDefaults,
    statement_timeout: Option<u32>,
    poll_interval: Duration,
    parameters: BTreeMap<String, String>,
}

impl SnowflakeConnector {
    pub fn try_new(options: ConnectionOptions) -> Result<Self, NewSnowflakeConnectorError> {
        let base_url = options.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(NewSnowflakeConnectorError::MissingBaseUrl);
        }
        let mut builder = reqwest::Client::builder().default_headers(Self::get_headers());
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(SnowflakeConnector {
            host: format!("{base_url}/api/v2/"),
            base_url,
            client,
            authentication: options.authentication,
            defaults: options.defaults,
            statement_timeout: options.statement_timeout,
            poll_interval: options.poll_interval,
            parameters: options.parameters,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn defaults(&self) -> &SessionDefaults {
        &self.defaults
    }

    /// Prepares a single statement, carrying the connector's session defaults.
    pub fn sql(&self, statement: impl Into<String>) -> SnowflakeSql<'_> {
        SnowflakeSql {
            connector: self,
            statement: StatementRequest {
                statement: statement.into(),
                timeout: self.statement_timeout,
                database: self.defaults.database.clone(),
                schema: self.defaults.schema.clone(),
                warehouse: self.defaults.warehouse.clone(),
                role: self.defaults.role.clone(),
                parameters: self.parameters.clone(),
            },
            request_id: uuid::Uuid::new_v4(),
        }
    }

    /// [Cancels](https://docs.snowflake.com/en/developer-guide/sql-api/reference#post-api-v2-statements-statementhandle-cancel) a running statement.
    pub async fn cancel(&self, handle: &StatementHandle) -> Result<(), QueryCancelError> {
        let url = format!("{}statements/{}/cancel", self.host, handle);
        let response = self
            .client
            .post(url)
            .headers(self.auth_headers().map_err(QueryCancelError::Token)?)
            .send()
            .await
            .map_err(QueryCancelError::Request)?;
        match response.status() {
            reqwest::StatusCode::OK => Ok(()),
            status => Err(QueryCancelError::Unknown(status)),
        }
    }

    fn get_headers() -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(3);
        headers.append(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.append(ACCEPT, HeaderValue::from_static("application/json"));
        headers.append(
            USER_AGENT,
            HeaderValue::from_static(concat!(
                env!("CARGO_PKG_NAME"),
                '/',
                env!("CARGO_PKG_VERSION")
            )),
        );
        headers
    }

    fn auth_headers(&self) -> Result<HeaderMap, KeyPairError> {
        let (token, token_type) = match &self.authentication {
            Authentication::KeyPair(key_pair) => (key_pair.token()?, "KEYPAIR_JWT"),
            Authentication::OAuth { token } => (token.clone(), "OAUTH"),
        };
        let mut headers = HeaderMap::with_capacity(2);
        headers.append(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|error| KeyPairError::Sign(error.into()))?,
        );
        headers.append(
            "X-Snowflake-Authorization-Token-Type",
            HeaderValue::from_static(token_type),
        );
        Ok(headers)
    }

    async fn read_response(
        &self,
        response: reqwest::Response,
    ) -> Result<StatementResponse, StatementError> {
        match response.status() {
            reqwest::StatusCode::OK => Ok(StatementResponse::Complete(
                response
                    .json::<SnowflakeSqlResponse>()
                    .await
                    .map_err(StatementError::Decode)?,
            )),
            reqwest::StatusCode::ACCEPTED | reqwest::StatusCode::REQUEST_TIMEOUT => {
                Ok(StatementResponse::Running(
                    response
                        .json::<QueryStatus>()
                        .await
                        .map_err(StatementError::Decode)?,
                ))
            }
            reqwest::StatusCode::UNPROCESSABLE_ENTITY => Err(StatementError::Query(
                response.json().await.map_err(StatementError::Decode)?,
            )),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(StatementError::Unknown { status, body })
            }
        }
    }

    async fn poll(&self, status: &QueryStatus) -> Result<StatementResponse, StatementError> {
        let url = match status.statement_status_url() {
            url if url.starts_with("http") => url.to_string(),
            url if !url.is_empty() => format!("{}{}", self.base_url, url),
            _ => format!("{}statements/{}", self.host, status.statement_handle()),
        };
        trace!(statement_handle = %status.statement_handle(), "polling statement status");
        let response = self
            .client
            .get(url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .map_err(StatementError::Request)?;
        self.read_response(response).await
    }

    async fn fetch_partition(
        &self,
        handle: &StatementHandle,
        partition: usize,
    ) -> Result<Vec<Vec<Option<String>>>, StatementError> {
        debug!(statement_handle = %handle, partition, "fetching result partition");
        let response = self
            .client
            .get(format!("{}statements/{}", self.host, handle))
            .query(&[("partition", partition)])
            .headers(self.auth_headers()?)
            .send()
            .await
            .map_err(StatementError::Request)?;
        match response.status() {
            reqwest::StatusCode::OK => Ok(response
                .json::<PartitionResponse>()
                .await
                .map_err(StatementError::Decode)?
                .data),
            reqwest::StatusCode::UNPROCESSABLE_ENTITY => Err(StatementError::Query(
                response.json().await.map_err(StatementError::Decode)?,
            )),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(StatementError::Unknown { status, body })
            }
        }
    }
}

/// Error creating a new [SnowflakeConnector]
#[derive(thiserror::Error, Debug)]
pub enum NewSnowflakeConnectorError {
    #[error("base url cannot be empty")]
    MissingBaseUrl,
    #[error(transparent)]
    KeyPair(#[from] KeyPairError),
    #[error(transparent)]
    ClientBuildError(#[from] reqwest::Error),
}

#[derive(Serialize, Debug, Clone)]
struct StatementRequest {
    statement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warehouse: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    parameters: BTreeMap<String, String>,
}

#[derive(Debug)]
pub struct SnowflakeSql<'a> {
    connector: &'a SnowflakeConnector,
    statement: StatementRequest,
    request_id: uuid::Uuid,
}

impl SnowflakeSql<'_> {
    pub fn with_timeout(mut self, timeout: u32) -> Self {
        self.statement.timeout = Some(timeout);
        self
    }
    pub fn with_role<R: ToString>(mut self, role: R) -> Self {
        self.statement.role = Some(role.to_string());
        self
    }
    pub fn with_warehouse<W: ToString>(mut self, warehouse: W) -> Self {
        self.statement.warehouse = Some(warehouse.to_string());
        self
    }
    pub fn with_database<D: ToString>(mut self, database: D) -> Self {
        self.statement.database = Some(database.to_string());
        self
    }
    pub fn with_schema<S: ToString>(mut self, schema: S) -> Self {
        self.statement.schema = Some(schema.to_string());
        self
    }

    pub fn request_id(&self) -> &uuid::Uuid {
        &self.request_id
    }

    /// Submits the statement, waits for it to finish and collects every result partition.
    pub async fn execute(self) -> Result<ResultSet, StatementError> {
        let connector = self.connector;
        debug!(request_id = %self.request_id, "submitting statement");
        let response = connector
            .client
            .post(get_url(&connector.host, &self.request_id))
            .headers(connector.auth_headers()?)
            .json(&self.statement)
            .send()
            .await
            .map_err(StatementError::Request)?;
        let mut response = connector.read_response(response).await?;
        let complete = loop {
            match response {
                StatementResponse::Complete(complete) => break complete,
                StatementResponse::Running(status) => {
                    tokio::time::sleep(connector.poll_interval).await;
                    response = connector.poll(&status).await?;
                }
            }
        };
        let SnowflakeSqlResponse {
            result_set_meta_data,
            mut data,
            statement_handle,
            ..
        } = complete;
        let Some(meta_data) = result_set_meta_data else {
            return Ok(ResultSet::new(Vec::new(), data));
        };
        for partition in 1..meta_data.partition_info.len() {
            data.extend(
                connector
                    .fetch_partition(&statement_handle, partition)
                    .await?,
            );
        }
        let columns = meta_data.row_type.into_iter().map(|row| row.name).collect();
        Ok(ResultSet::new(columns, data))
    }
}

pub(crate) fn get_url(host: &str, uuid: &uuid::Uuid) -> String {
    format!("{host}statements?requestId={uuid}")
}

/// Error executing a statement
#[derive(thiserror::Error, Debug)]
pub enum StatementError {
    #[error(transparent)]
    Token(#[from] KeyPairError),
    #[error(transparent)]
    Request(reqwest::Error),
    #[error(transparent)]
    Decode(reqwest::Error),
    #[error(transparent)]
    Query(QueryFailureStatus),
    #[error("unknown error with status code {status}: {body}")]
    Unknown {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Error canceling a query
#[derive(thiserror::Error, Debug)]
pub enum QueryCancelError {
    #[error(transparent)]
    Token(KeyPairError),
    #[error(transparent)]
    Request(reqwest::Error),
    #[error("unknown error with status code: {0}")]
    Unknown(reqwest::StatusCode),
}

#[derive(Debug)]
enum StatementResponse {
    Running(QueryStatus),
    Complete(SnowflakeSqlResponse),
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SnowflakeSqlResponse {
    pub result_set_meta_data: Option<MetaData>,
    #[serde(default)]
    pub data: Vec<Vec<Option<String>>>,
    pub code: Option<String>,
    pub statement_handle: StatementHandle,
    pub statement_status_url: Option<String>,
    pub sql_state: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct PartitionResponse {
    #[serde(default)]
    data: Vec<Vec<Option<String>>>,
}

/// [ResultSetMetaData](https://docs.snowflake.com/en/developer-guide/sql-api/reference#label-sql-api-reference-resultset-resultsetmetadata)
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    #[serde(default)]
    pub num_rows: usize,
    pub format: Option<String>,
    #[serde(default)]
    pub row_type: Vec<RowType>,
    #[serde(default)]
    pub partition_info: Vec<PartitionInfo>,
}

/// [RowType](https://docs.snowflake.com/en/developer-guide/sql-api/reference#label-sql-api-reference-resultset-resultsetmetadata-rowtype)
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RowType {
    pub name: String,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub table: String,
    pub precision: Option<u32>,
    pub byte_length: Option<usize>,
    #[serde(rename = "type", default)]
    pub data_type: String,
    pub scale: Option<i32>,
    #[serde(default)]
    pub nullable: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PartitionInfo {
    pub row_count: usize,
    pub uncompressed_size: Option<usize>,
}

/// A unique tag that identifies a SQL statement request
#[derive(serde::Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct StatementHandle(String);
impl StatementHandle {
    pub fn handle(&self) -> &str {
        &self.0
    }
}
impl std::fmt::Display for StatementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// [QueryStatus](https://docs.snowflake.com/en/developer-guide/sql-api/reference#label-sql-api-reference-querystatus)
#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QueryStatus {
    #[serde(default)]
    code: String,
    #[serde(default)]
    sql_state: String,
    #[serde(default)]
    message: String,
    statement_handle: StatementHandle,
    #[serde(default)]
    statement_status_url: String,
}

impl QueryStatus {
    pub fn code(&self) -> &str {
        &self.code
    }
    pub fn sql_state(&self) -> &str {
        &self.sql_state
    }
    pub fn message(&self) -> &str {
        &self.message
    }
    pub fn statement_handle(&self) -> &StatementHandle {
        &self.statement_handle
    }
    pub fn statement_status_url(&self) -> &str {
        &self.statement_status_url
    }
}

/// [QueryFailureStatus](https://docs.snowflake.com/en/developer-guide/sql-api/reference#label-sql-api-reference-queryfailurestatus)
#[derive(serde::Deserialize, thiserror::Error, Debug, Clone)]
#[serde(rename_all = "camelCase")]
#[error("{code} ({sql_state}): {message}")]
pub struct QueryFailureStatus {
    #[serde(default)]
    code: String,
    #[serde(default)]
    sql_state: String,
    message: String,
    #[serde(default)]
    statement_handle: Option<StatementHandle>,
}

impl QueryFailureStatus {
    pub fn new(
        code: impl Into<String>,
        sql_state: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        QueryFailureStatus {
            code: code.into(),
            sql_state: sql_state.into(),
            message: message.into(),
            statement_handle: None,
        }
    }
    pub fn code(&self) -> &str {
        &self.code
    }
    pub fn sql_state(&self) -> &str {
        &self.sql_state
    }
    pub fn message(&self) -> &str {
        &self.message
    }
    pub fn statement_handle(&self) -> Option<&StatementHandle> {
        self.statement_handle.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn connector(server: &MockServer) -> SnowflakeConnector {
        let mut options = ConnectionOptions::new(
            server.uri(),
            Authentication::OAuth {
                token: "token".into(),
            },
        );
        options.poll_interval = Duration::from_millis(1);
        options.defaults.warehouse = Some("COMPUTE_WH".into());
        SnowflakeConnector::try_new(options).unwrap()
    }

    fn result_body(handle: &str, partitions: usize) -> serde_json::Value {
        serde_json::json!({
            "resultSetMetaData": {
                "numRows": 2,
                "format": "jsonv2",
                "rowType": [
                    { "name": "name", "type": "text", "nullable": false },
                    { "name": "comment", "type": "text", "nullable": true }
                ],
                "partitionInfo": (0..partitions).map(|_| serde_json::json!({ "rowCount": 1 })).collect::<Vec<_>>()
            },
            "data": [["A", null]],
            "code": "090001",
            "statementHandle": handle,
            "statementStatusUrl": format!("/api/v2/statements/{handle}"),
            "sqlState": "00000",
            "message": "Statement executed successfully."
        })
    }

    #[tokio::test]
    async fn execute_sends_defaults_and_auth_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/statements"))
            .and(header("X-Snowflake-Authorization-Token-Type", "OAUTH"))
            .and(header("Authorization", "Bearer token"))
            .and(body_string_contains("\"warehouse\":\"COMPUTE_WH\""))
            .and(body_string_contains("SHOW ROLES"))
            .respond_with(ResponseTemplate::new(200).set_body_json(result_body("h1", 1)))
            .expect(1)
            .mount(&server)
            .await;

        let result = connector(&server).sql("SHOW ROLES").execute().await.unwrap();
        assert_eq!(result.columns(), ["name", "comment"]);
        let row = result.rows().next().unwrap();
        assert_eq!(row.get("NAME"), Some("A"));
        assert_eq!(row.get("comment"), None);
    }

    #[tokio::test]
    async fn execute_polls_until_complete_and_fetches_partitions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/statements"))
            .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
                "code": "333334",
                "message": "Asynchronous execution in progress.",
                "statementHandle": "h2",
                "statementStatusUrl": "/api/v2/statements/h2"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/statements/h2"))
            .and(query_param("partition", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "data": [["B", "second"]] })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/statements/h2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(result_body("h2", 2)))
            .mount(&server)
            .await;

        let result = connector(&server).sql("SHOW ROLES").execute().await.unwrap();
        let names: Vec<_> = result.rows().map(|row| row.get("name")).collect();
        assert_eq!(names, [Some("A"), Some("B")]);
    }

    #[tokio::test]
    async fn execute_reports_query_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/statements"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "code": "002003",
                "sqlState": "02000",
                "message": "SQL compilation error:\nDatabase 'NOPE' does not exist or not authorized.",
                "statementHandle": "h3"
            })))
            .mount(&server)
            .await;

        let error = connector(&server)
            .sql("DROP DATABASE \"NOPE\"")
            .execute()
            .await
            .unwrap_err();
        match error {
            StatementError::Query(status) => {
                assert_eq!(status.sql_state(), "02000");
                assert_eq!(status.code(), "002003");
                assert_eq!(status.statement_handle().unwrap().handle(), "h3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn execute_reports_unknown_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/statements"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let error = connector(&server).sql("SELECT 1").execute().await.unwrap_err();
        assert!(matches!(
            error,
            StatementError::Unknown { status, ref body } if status.as_u16() == 500 && body == "boom"
        ));
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let options = ConnectionOptions::new("", Authentication::OAuth { token: "t".into() });
        assert!(matches!(
            SnowflakeConnector::try_new(options),
            Err(NewSnowflakeConnectorError::MissingBaseUrl)
        ));
    }
}
