use snowflake_driver::ResultSet;

use super::common::{In, TagAssociation};
use super::streams::*;
use super::streams_ext::StreamRow;
use crate::client::Client;
use crate::context::Context;
use crate::identifier::{DatabaseObjectIdentifier, SchemaObjectIdentifier};
use crate::sdk::testing::{assert_opts_invalid_joined_errors, assert_opts_valid_and_sql_equals};
use crate::validation::ValidationError;

fn id() -> SchemaObjectIdentifier {
    SchemaObjectIdentifier::new("db", "sc", "orders_stream")
}

fn table() -> SchemaObjectIdentifier {
    SchemaObjectIdentifier::new("db", "sc", "orders")
}

#[test]
fn create_on_table_default_options() {
    assert_opts_valid_and_sql_equals(
        &CreateStreamOnTableRequest::new(id(), table()).to_opts(),
        r#"CREATE STREAM "db"."sc"."orders_stream" ON TABLE "db"."sc"."orders""#,
    );

    let request = CreateStreamOnTableRequest::new(id(), table())
        .with_if_not_exists(true)
        .with_tag(vec![TagAssociation::new(SchemaObjectIdentifier::new("db", "sc", "team"), "etl")])
        .with_copy_grants(true)
        .with_on(OnStream::at(OnStreamStatement::offset("-3600")))
        .with_append_only(true)
        .with_show_initial_rows(false)
        .with_comment("orders changes");
    assert_opts_valid_and_sql_equals(
        &request.to_opts(),
        concat!(
            r#"CREATE STREAM IF NOT EXISTS "db"."sc"."orders_stream" WITH TAG ("db"."sc"."team" = 'etl') "#,
            r#"COPY GRANTS ON TABLE "db"."sc"."orders" AT (OFFSET => -3600) "#,
            r#"APPEND_ONLY = true SHOW_INITIAL_ROWS = false COMMENT = 'orders changes'"#,
        ),
    );
}

#[test]
fn create_on_table_on_stream_points() {
    let cases = [
        (
            OnStream::before(OnStreamStatement::statement("01b2c3")),
            r#"BEFORE (STATEMENT => '01b2c3')"#,
        ),
        (
            OnStream::at(OnStreamStatement::timestamp("TO_TIMESTAMP_TZ('2024-01-01')")),
            r#"AT (TIMESTAMP => TO_TIMESTAMP_TZ('2024-01-01'))"#,
        ),
        (OnStream::at(OnStreamStatement::stream("other")), r#"AT (STREAM => 'other')"#),
    ];
    for (on, expected) in cases {
        let request = CreateStreamOnTableRequest::new(id(), table()).with_on(on);
        assert_opts_valid_and_sql_equals(
            &request.to_opts(),
            &format!(r#"CREATE STREAM "db"."sc"."orders_stream" ON TABLE "db"."sc"."orders" {expected}"#),
        );
    }
}

#[test]
fn create_on_table_validation() {
    let request = CreateStreamOnTableRequest::new(id(), SchemaObjectIdentifier::default())
        .with_or_replace(true)
        .with_if_not_exists(true);
    assert_opts_invalid_joined_errors(
        &request.to_opts(),
        &[
            ValidationError::InvalidObjectIdentifier {
                struct_name: "CreateStreamOnTableOptions",
                field: "table_id",
            },
            ValidationError::Conflicting {
                struct_name: "CreateStreamOnTableOptions",
                fields: vec!["or_replace", "if_not_exists"],
            },
        ],
    );

    let on = OnStream {
        at: true,
        before: true,
        statement: OnStreamStatement {
            offset: Some("-1".into()),
            stream: Some("s".into()),
            ..Default::default()
        },
    };
    let request = CreateStreamOnTableRequest::new(id(), table()).with_on(on);
    assert_opts_invalid_joined_errors(
        &request.to_opts(),
        &[
            ValidationError::ExactlyOneOf {
                struct_name: "OnStream",
                fields: vec!["at", "before"],
            },
            ValidationError::ExactlyOneOf {
                struct_name: "OnStreamStatement",
                fields: vec!["timestamp", "offset", "statement", "stream"],
            },
        ],
    );
}

#[test]
fn create_on_external_table_default_options() {
    let request = CreateStreamOnExternalTableRequest::new(id(), SchemaObjectIdentifier::new("db", "sc", "ext"))
        .with_or_replace(true)
        .with_insert_only(true);
    assert_opts_valid_and_sql_equals(
        &request.to_opts(),
        r#"CREATE OR REPLACE STREAM "db"."sc"."orders_stream" ON EXTERNAL TABLE "db"."sc"."ext" INSERT_ONLY = true"#,
    );
}

#[test]
fn create_on_view_default_options() {
    let request = CreateStreamOnViewRequest::new(id(), SchemaObjectIdentifier::new("db", "sc", "v"))
        .with_show_initial_rows(true)
        .with_comment("c");
    assert_opts_valid_and_sql_equals(
        &request.to_opts(),
        r#"CREATE STREAM "db"."sc"."orders_stream" ON VIEW "db"."sc"."v" SHOW_INITIAL_ROWS = true COMMENT = 'c'"#,
    );
}

#[test]
fn clone_default_options() {
    let request = CloneStreamRequest::new(id(), SchemaObjectIdentifier::new("db", "other", "source"))
        .with_or_replace(true)
        .with_copy_grants(true);
    assert_opts_valid_and_sql_equals(
        &request.to_opts(),
        r#"CREATE OR REPLACE STREAM "db"."sc"."orders_stream" CLONE "db"."other"."source" COPY GRANTS"#,
    );
}

#[test]
fn alter_default_options() {
    assert_opts_valid_and_sql_equals(
        &AlterStreamRequest::new(id()).with_set_comment("new").to_opts(),
        r#"ALTER STREAM "db"."sc"."orders_stream" SET COMMENT = 'new'"#,
    );
    assert_opts_valid_and_sql_equals(
        &AlterStreamRequest::new(id())
            .with_if_exists(true)
            .with_unset_comment(true)
            .to_opts(),
        r#"ALTER STREAM IF EXISTS "db"."sc"."orders_stream" UNSET COMMENT"#,
    );
    assert_opts_valid_and_sql_equals(
        &AlterStreamRequest::new(id())
            .with_unset_tag(vec![SchemaObjectIdentifier::new("db", "sc", "team")])
            .to_opts(),
        r#"ALTER STREAM "db"."sc"."orders_stream" UNSET TAG "db"."sc"."team""#,
    );
}

#[test]
fn alter_exactly_one() {
    assert_opts_invalid_joined_errors(
        &AlterStreamRequest::new(id()).to_opts(),
        &[ValidationError::ExactlyOneOf {
            struct_name: "AlterStreamOptions",
            fields: vec!["set_comment", "unset_comment", "set_tag", "unset_tag"],
        }],
    );
}

#[test]
fn drop_default_options() {
    assert_opts_valid_and_sql_equals(
        &DropStreamRequest::new(id()).with_if_exists(true).to_opts(),
        r#"DROP STREAM IF EXISTS "db"."sc"."orders_stream""#,
    );
}

#[test]
fn show_default_options() {
    assert_opts_valid_and_sql_equals(&ShowStreamRequest::new().to_opts(), "SHOW STREAMS");
    let request = ShowStreamRequest::new()
        .with_terse(true)
        .with_in(In::Schema(DatabaseObjectIdentifier::new("db", "sc")));
    assert_opts_valid_and_sql_equals(&request.to_opts(), r#"SHOW TERSE STREAMS IN SCHEMA "db"."sc""#);
}

#[test]
fn describe_default_options() {
    let opts = DescribeStreamOptions {
        name: id(),
        ..Default::default()
    };
    assert_opts_valid_and_sql_equals(&opts, r#"DESCRIBE STREAM "db"."sc"."orders_stream""#);
}

#[test]
fn rows_map_to_streams() {
    let rows = ResultSet::from_rows(
        [
            "created_on",
            "name",
            "database_name",
            "schema_name",
            "table_name",
            "source_type",
            "base_tables",
            "type",
            "stale",
            "mode",
        ],
        [[
            Some("1700000000.000000000"),
            Some("orders_stream"),
            Some("db"),
            Some("sc"),
            Some("db.sc.orders"),
            Some("Table"),
            Some("db.sc.orders"),
            Some("DELTA"),
            Some("false"),
            Some("APPEND_ONLY"),
        ]],
    );
    let stream: Stream = rows.deserialize::<StreamRow>().unwrap().remove(0).into();
    assert_eq!(stream.id(), id());
    assert_eq!(stream.table_name, Some(table()));
    assert_eq!(stream.source_type, Some(StreamSourceType::Table));
    assert_eq!(stream.base_tables, [table()]);
    assert_eq!(stream.kind.as_deref(), Some("DELTA"));
    assert!(!stream.stale);
    assert!(stream.is_append_only());
}

#[tokio::test]
async fn dry_run_records_statements() {
    let client = Client::dry_run();
    let ctx = Context::background();
    let streams = client.streams();
    streams
        .create_on_table(&ctx, &CreateStreamOnTableRequest::new(id(), table()))
        .await
        .unwrap();
    streams
        .alter(&ctx, &AlterStreamRequest::new(id()).with_set_comment("c"))
        .await
        .unwrap();
    assert!(streams.describe(&ctx, &id()).await.unwrap_err().is_object_not_exist_or_authorized());
    streams.drop(&ctx, &DropStreamRequest::new(id())).await.unwrap();

    assert_eq!(
        client.trace_logs(),
        [
            r#"CREATE STREAM "db"."sc"."orders_stream" ON TABLE "db"."sc"."orders""#,
            r#"ALTER STREAM "db"."sc"."orders_stream" SET COMMENT = 'c'"#,
            r#"DESCRIBE STREAM "db"."sc"."orders_stream""#,
            r#"DROP STREAM "db"."sc"."orders_stream""#,
        ]
    );
}
