use std::time::Duration;

use snowflake_sdk::config::Protocol;
use snowflake_sdk::driver::serde_json;
use snowflake_sdk::{AccountObjectIdentifier, Authenticator, Client, Config, Context, Error};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> Config {
    Config::builder()
        .config_path("/nonexistent/snowflake/config")
        .env_lookup(|_| None)
        .account("xy12345")
        .user("ALICE")
        .authenticator(Authenticator::OAuth)
        .token("oauth-token")
        .role("SYSADMIN")
        .protocol(Protocol::Http)
        .host("127.0.0.1")
        .port(server.address().port())
        .build()
        .unwrap()
}

fn rows(columns: &[&str], data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "resultSetMetaData": {
            "numRows": data.as_array().map(Vec::len).unwrap_or_default(),
            "format": "jsonv2",
            "rowType": columns.iter().map(|name| serde_json::json!({ "name": name, "type": "text" })).collect::<Vec<_>>(),
            "partitionInfo": [{ "rowCount": 1 }]
        },
        "data": data,
        "code": "090001",
        "statementHandle": "01b2-0000",
        "sqlState": "00000",
        "message": "Statement executed successfully."
    })
}

#[tokio::test]
async fn statements_carry_oauth_and_session_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/statements"))
        .and(header("Authorization", "Bearer oauth-token"))
        .and(header("X-Snowflake-Authorization-Token-Type", "OAUTH"))
        .and(body_string_contains("\"role\":\"SYSADMIN\""))
        .and(body_string_contains("SHOW ROLES LIKE 'ANALYST'"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows(
            &["created_on", "name", "is_default", "assigned_to_users", "owner", "comment"],
            serde_json::json!([["1700000000.000000000", "ANALYST", "N", "3", "SECURITYADMIN", "reporting"]]),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(config(&server)).await.unwrap();
    let role = client
        .roles()
        .show_by_id(&Context::background(), &AccountObjectIdentifier::new("ANALYST"))
        .await
        .unwrap();
    assert_eq!(role.name, "ANALYST");
    assert_eq!(role.assigned_to_users, 3);
    assert_eq!(role.comment.as_deref(), Some("reporting"));
}

#[tokio::test]
async fn compilation_errors_become_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/statements"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "code": "002003",
            "sqlState": "02000",
            "message": "SQL compilation error:\nRole 'GHOST' does not exist or not authorized.",
            "statementHandle": "01b2-0001"
        })))
        .mount(&server)
        .await;

    let client = Client::new(config(&server)).await.unwrap();
    let error = client
        .exec(&Context::background(), r#"DROP ROLE "GHOST""#)
        .await
        .unwrap_err();
    assert!(error.is_object_not_exist_or_authorized(), "{error}");
}

#[tokio::test]
async fn other_failures_keep_their_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/statements"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "code": "001003",
            "sqlState": "42000",
            "message": "SQL compilation error:\nsyntax error line 1 at position 0 unexpected 'SELEC'.",
            "statementHandle": "01b2-0002"
        })))
        .mount(&server)
        .await;

    let client = Client::new(config(&server)).await.unwrap();
    let error = client.exec(&Context::background(), "SELEC 1").await.unwrap_err();
    match error {
        Error::Remote { code, sql_state, .. } => {
            assert_eq!(code, "001003");
            assert_eq!(sql_state, "42000");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn deadline_cancels_slow_statements() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/statements"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(rows(&["1"], serde_json::json!([["1"]]))),
        )
        .mount(&server)
        .await;

    let client = Client::new(config(&server)).await.unwrap();
    let ctx = Context::background().with_timeout(Duration::from_millis(50));
    let error = client.ping(&ctx).await.unwrap_err();
    assert!(error.is_cancelled());
}

#[tokio::test]
async fn undecodable_responses_are_remote_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/statements"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = Client::new(config(&server)).await.unwrap();
    let error = client.exec(&Context::background(), "SELECT 1").await.unwrap_err();
    assert!(!error.is_network(), "{error:?}");
    match error {
        Error::Remote { code, message, .. } => {
            assert!(code.is_empty());
            assert!(message.starts_with("failed to decode the response"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}
