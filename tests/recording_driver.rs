use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use snowflake_sdk::driver::{QueryFailureStatus, ResultSet, StatementError};
use snowflake_sdk::sdk::common::{In, Like, ObjectType, TagAssociation};
use snowflake_sdk::sdk::sequences::{
    AlterSequenceRequest, CreateSequenceRequest, SequenceSet, ShowSequenceRequest, ValuesBehavior,
};
use snowflake_sdk::sdk::tags::{SetTagOnObjectOptions, UnsetTagOnObjectOptions};
use snowflake_sdk::{
    AccountObjectIdentifier, Client, Context, DatabaseObjectIdentifier, Driver, SchemaObjectIdentifier,
    TableColumnIdentifier,
};

/// Replays canned results keyed by statement prefix and records every statement.
#[derive(Default)]
struct Recording {
    statements: Mutex<Vec<String>>,
    results: Vec<(&'static str, ResultSet)>,
    failures: Vec<(&'static str, &'static str)>,
}

impl Recording {
    fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }
}

#[async_trait]
impl Driver for Recording {
    async fn exec(&self, statement: &str) -> Result<(), StatementError> {
        self.query(statement).await.map(|_| ())
    }

    async fn query(&self, statement: &str) -> Result<ResultSet, StatementError> {
        self.statements.lock().unwrap().push(statement.to_string());
        if let Some((_, message)) = self
            .failures
            .iter()
            .find(|(prefix, _)| statement.starts_with(prefix))
        {
            return Err(StatementError::Query(QueryFailureStatus::new("002003", "02000", *message)));
        }
        Ok(self
            .results
            .iter()
            .find(|(prefix, _)| statement.starts_with(prefix))
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }
}

fn sequence_rows() -> ResultSet {
    ResultSet::from_rows(
        [
            "created_on",
            "name",
            "database_name",
            "schema_name",
            "next_value",
            "interval",
            "owner",
            "comment",
            "ordered",
        ],
        [
            [
                Some("1700000000.000000000"),
                Some("order_seq"),
                Some("db"),
                Some("sc"),
                Some("1"),
                Some("1"),
                Some("SYSADMIN"),
                Some(""),
                Some("Y"),
            ],
            [
                Some("1700000000.000000000"),
                Some("order_seq_2"),
                Some("db"),
                Some("sc"),
                Some("10"),
                Some("2"),
                Some("SYSADMIN"),
                Some("second"),
                Some("N"),
            ],
        ],
    )
}

#[tokio::test]
async fn sequences_round_trip_through_a_driver() {
    let driver = Arc::new(Recording {
        results: vec![("SHOW SEQUENCES", sequence_rows())],
        ..Recording::default()
    });
    let client = Client::with_driver(driver.clone());
    let ctx = Context::background();
    let id = SchemaObjectIdentifier::new("db", "sc", "order_seq");

    client
        .sequences()
        .create(&ctx, &CreateSequenceRequest::new(id.clone()).with_if_not_exists(true))
        .await
        .unwrap();
    client
        .sequences()
        .alter(
            &ctx,
            &AlterSequenceRequest::new(id.clone()).with_set(SequenceSet::values_behavior(ValuesBehavior::Order)),
        )
        .await
        .unwrap();
    let sequence = client.sequences().show_by_id(&ctx, &id).await.unwrap();
    assert_eq!(sequence.id(), id);
    assert!(sequence.ordered);

    assert_eq!(
        driver.statements(),
        [
            r#"CREATE SEQUENCE IF NOT EXISTS "db"."sc"."order_seq""#,
            r#"ALTER SEQUENCE "db"."sc"."order_seq" SET ORDER"#,
            r#"SHOW SEQUENCES LIKE 'order_seq' IN SCHEMA "db"."sc""#,
        ]
    );
}

#[tokio::test]
async fn missing_objects_are_classified() {
    let driver = Arc::new(Recording {
        failures: vec![("DESCRIBE SEQUENCE", "Sequence 'NOPE' does not exist or not authorized.")],
        ..Recording::default()
    });
    let client = Client::with_driver(driver);
    let ctx = Context::background();

    let error = client
        .sequences()
        .describe(&ctx, &SchemaObjectIdentifier::new("db", "sc", "NOPE"))
        .await
        .unwrap_err();
    assert!(error.is_object_not_exist_or_authorized());

    let error = client
        .sequences()
        .show_by_id(&ctx, &SchemaObjectIdentifier::new("db", "sc", "NOPE"))
        .await
        .unwrap_err();
    assert!(error.is_object_not_exist_or_authorized());
}

#[tokio::test]
async fn invalid_options_never_reach_the_driver() {
    let driver = Arc::new(Recording::default());
    let client = Client::with_driver(driver.clone());
    let ctx = Context::background();

    let error = client
        .sequences()
        .create(&ctx, &CreateSequenceRequest::new(SchemaObjectIdentifier::new("", "sc", "order_seq")))
        .await
        .unwrap_err();
    assert!(error.is_validation());
    assert!(error.is_invalid_identifier());

    let error = client
        .sequences()
        .alter(&ctx, &AlterSequenceRequest::new(SchemaObjectIdentifier::new("db", "sc", "order_seq")))
        .await
        .unwrap_err();
    assert!(error.is_validation());

    assert!(driver.statements().is_empty());
}

#[tokio::test]
async fn tags_on_columns_target_the_table() {
    let driver = Arc::new(Recording::default());
    let client = Client::with_driver(driver.clone());
    let ctx = Context::background();
    let tag = SchemaObjectIdentifier::new("db", "sc", "pii");
    let column = TableColumnIdentifier::new("db", "sc", "orders", "email");

    client
        .tags()
        .set_on_object(
            &ctx,
            &SetTagOnObjectOptions::new(ObjectType::Column, column, vec![TagAssociation::new(tag.clone(), "yes")]),
        )
        .await
        .unwrap();
    client
        .tags()
        .unset_on_object(
            &ctx,
            &UnsetTagOnObjectOptions::new(ObjectType::Warehouse, AccountObjectIdentifier::new("wh"), vec![tag]),
        )
        .await
        .unwrap();

    assert_eq!(
        driver.statements(),
        [
            r#"ALTER TABLE "db"."sc"."orders" MODIFY COLUMN "email" SET TAG "db"."sc"."pii" = 'yes'"#,
            r#"ALTER WAREHOUSE "wh" UNSET TAG "db"."sc"."pii""#,
        ]
    );
}

#[tokio::test]
async fn show_filters_render_in_order() {
    let driver = Arc::new(Recording::default());
    let client = Client::with_driver(driver.clone());
    let ctx = Context::background();

    let sequences = client
        .sequences()
        .show(
            &ctx,
            &ShowSequenceRequest::new()
                .with_like(Like::new("ORD%"))
                .with_in(In::Schema(DatabaseObjectIdentifier::new("db", "sc"))),
        )
        .await
        .unwrap();
    assert!(sequences.is_empty());
    assert_eq!(driver.statements(), [r#"SHOW SEQUENCES LIKE 'ORD%' IN SCHEMA "db"."sc""#]);
}
