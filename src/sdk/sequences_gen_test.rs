use snowflake_driver::ResultSet;

use super::common::{In, Like};
use super::sequences::*;
use super::sequences_ext::SequenceRow;
use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::identifier::{AccountObjectIdentifier, SchemaObjectIdentifier};
use crate::sdk::testing::{assert_opts_invalid_joined_errors, assert_opts_valid_and_sql_equals};
use crate::validation::ValidationError;

fn id() -> SchemaObjectIdentifier {
    SchemaObjectIdentifier::new("db", "sc", "order_seq")
}

#[test]
fn create_default_options() {
    assert_opts_valid_and_sql_equals(
        &CreateSequenceRequest::new(id()).to_opts(),
        r#"CREATE SEQUENCE "db"."sc"."order_seq""#,
    );

    let request = CreateSequenceRequest::new(id())
        .with_or_replace(true)
        .with_start(100)
        .with_increment(-5)
        .with_values_behavior(ValuesBehavior::NoOrder)
        .with_comment("orders");
    assert_opts_valid_and_sql_equals(
        &request.to_opts(),
        r#"CREATE OR REPLACE SEQUENCE "db"."sc"."order_seq" START = 100 INCREMENT = -5 NOORDER COMMENT = 'orders'"#,
    );
}

#[test]
fn create_validation() {
    let request = CreateSequenceRequest::new(SchemaObjectIdentifier::new("db", "", "order_seq"))
        .with_or_replace(true)
        .with_if_not_exists(true);
    assert_opts_invalid_joined_errors(
        &request.to_opts(),
        &[
            ValidationError::InvalidObjectIdentifier {
                struct_name: "CreateSequenceOptions",
                field: "name",
            },
            ValidationError::Conflicting {
                struct_name: "CreateSequenceOptions",
                fields: vec!["or_replace", "if_not_exists"],
            },
        ],
    );
}

#[test]
fn alter_default_options() {
    let cases = [
        (
            AlterSequenceRequest::new(id()).with_rename_to(SchemaObjectIdentifier::new("db", "sc", "invoice_seq")),
            r#"ALTER SEQUENCE "db"."sc"."order_seq" RENAME TO "db"."sc"."invoice_seq""#,
        ),
        (
            AlterSequenceRequest::new(id()).with_if_exists(true).with_set_increment(10),
            r#"ALTER SEQUENCE IF EXISTS "db"."sc"."order_seq" SET INCREMENT = 10"#,
        ),
        (
            AlterSequenceRequest::new(id()).with_set(SequenceSet::values_behavior(ValuesBehavior::Order)),
            r#"ALTER SEQUENCE "db"."sc"."order_seq" SET ORDER"#,
        ),
        (
            AlterSequenceRequest::new(id()).with_set(SequenceSet::comment("renumbered")),
            r#"ALTER SEQUENCE "db"."sc"."order_seq" SET COMMENT = 'renumbered'"#,
        ),
        (
            AlterSequenceRequest::new(id()).with_unset_comment(true),
            r#"ALTER SEQUENCE "db"."sc"."order_seq" UNSET COMMENT"#,
        ),
    ];
    for (request, expected) in cases {
        assert_opts_valid_and_sql_equals(&request.to_opts(), expected);
    }
}

#[test]
fn alter_validation() {
    assert_opts_invalid_joined_errors(
        &AlterSequenceRequest::new(id()).to_opts(),
        &[ValidationError::ExactlyOneOf {
            struct_name: "AlterSequenceOptions",
            fields: vec!["rename_to", "set_increment", "set", "unset_comment"],
        }],
    );
    assert_opts_invalid_joined_errors(
        &AlterSequenceRequest::new(id()).with_set(SequenceSet::default()).to_opts(),
        &[ValidationError::AtLeastOneOf {
            struct_name: "SequenceSet",
            fields: vec!["values_behavior", "comment"],
        }],
    );
}

#[test]
fn drop_and_show_default_options() {
    assert_opts_valid_and_sql_equals(
        &DropSequenceRequest::new(id()).with_if_exists(true).with_cascade(true).to_opts(),
        r#"DROP SEQUENCE IF EXISTS "db"."sc"."order_seq" CASCADE"#,
    );
    assert_opts_invalid_joined_errors(
        &DropSequenceRequest::new(id()).with_cascade(true).with_restrict(true).to_opts(),
        &[ValidationError::Conflicting {
            struct_name: "DropSequenceOptions",
            fields: vec!["cascade", "restrict"],
        }],
    );
    assert_opts_valid_and_sql_equals(
        &ShowSequenceRequest::new()
            .with_like(Like::new("order%"))
            .with_in(In::Database(AccountObjectIdentifier::new("db")))
            .to_opts(),
        r#"SHOW SEQUENCES LIKE 'order%' IN DATABASE "db""#,
    );
}

#[test]
fn rows_map_to_sequences() {
    let rows = ResultSet::from_rows(
        [
            "created_on",
            "name",
            "database_name",
            "schema_name",
            "next_value",
            "interval",
            "owner",
            "owner_role_type",
            "comment",
            "ordered",
        ],
        [[
            Some("1700000000.000000000"),
            Some("order_seq"),
            Some("db"),
            Some("sc"),
            Some("105"),
            Some("5"),
            Some("SYSADMIN"),
            Some("ROLE"),
            Some(""),
            Some("N"),
        ]],
    );
    let sequence: Sequence = rows.deserialize::<SequenceRow>().unwrap().remove(0).into();
    assert_eq!(sequence.id(), id());
    assert_eq!(sequence.next_value, 105);
    assert_eq!(sequence.interval, 5);
    assert_eq!(sequence.comment, None);
    assert!(!sequence.ordered);
    assert_eq!(sequence.values_behavior(), ValuesBehavior::NoOrder);
}

#[tokio::test]
async fn dry_run_records_statements() {
    let client = Client::dry_run();
    let ctx = Context::background();
    let sequences = client.sequences();
    sequences
        .create(&ctx, &CreateSequenceRequest::new(id()).with_start(1))
        .await
        .unwrap();
    assert!(matches!(
        sequences.describe(&ctx, &id()).await,
        Err(Error::ObjectNotExistOrAuthorized { .. })
    ));
    assert!(matches!(
        sequences.show_by_id(&ctx, &id()).await,
        Err(Error::ObjectNotExistOrAuthorized { .. })
    ));

    assert_eq!(
        client.trace_logs(),
        [
            r#"CREATE SEQUENCE "db"."sc"."order_seq" START = 1"#,
            r#"DESCRIBE SEQUENCE "db"."sc"."order_seq""#,
            r#"SHOW SEQUENCES LIKE 'order_seq' IN SCHEMA "db"."sc""#,
        ]
    );
}
