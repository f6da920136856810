use snowflake_driver::ResultSet;

use super::common::{In, TagAssociation};
use super::views::*;
use super::views_ext::{ViewColumnRow, ViewRow};
use crate::client::Client;
use crate::context::Context;
use crate::identifier::{DatabaseObjectIdentifier, SchemaObjectIdentifier};
use crate::sdk::testing::{assert_opts_invalid_joined_errors, assert_opts_valid_and_sql_equals};
use crate::sql::RawSql;
use crate::validation::ValidationError;

fn id() -> SchemaObjectIdentifier {
    SchemaObjectIdentifier::new("db", "sc", "active_users")
}

#[test]
fn create_default_options() {
    assert_opts_valid_and_sql_equals(
        &CreateViewRequest::new(id(), RawSql::from("SELECT id FROM users")).to_opts(),
        r#"CREATE VIEW "db"."sc"."active_users" AS SELECT id FROM users"#,
    );

    let request = CreateViewRequest::new(id(), RawSql::from("SELECT id, email FROM users"))
        .with_or_replace(true)
        .with_secure(true)
        .with_temporary(true)
        .with_columns(vec![
            ViewColumn::new("ID").with_comment("key"),
            ViewColumn::new("EMAIL").with_masking_policy(SchemaObjectIdentifier::new("db", "sc", "mask_email")),
        ])
        .with_copy_grants(true)
        .with_comment("only active")
        .with_change_tracking(true)
        .with_tag(vec![TagAssociation::new(SchemaObjectIdentifier::new("db", "sc", "pii"), "yes")]);
    assert_opts_valid_and_sql_equals(
        &request.to_opts(),
        concat!(
            r#"CREATE OR REPLACE SECURE TEMPORARY VIEW "db"."sc"."active_users" "#,
            r#"("ID" COMMENT 'key', "EMAIL" MASKING POLICY "db"."sc"."mask_email") COPY GRANTS "#,
            r#"COMMENT = 'only active' CHANGE_TRACKING = true TAG ("db"."sc"."pii" = 'yes') "#,
            r#"AS SELECT id, email FROM users"#,
        ),
    );

    let request = CreateViewRequest::new(id(), RawSql::from("SELECT 1"))
        .with_recursive(true)
        .with_if_not_exists(true);
    assert_opts_valid_and_sql_equals(
        &request.to_opts(),
        r#"CREATE RECURSIVE VIEW IF NOT EXISTS "db"."sc"."active_users" AS SELECT 1"#,
    );
}

#[test]
fn create_validation() {
    let request = CreateViewRequest::new(id(), RawSql::from("SELECT 1"))
        .with_or_replace(true)
        .with_if_not_exists(true)
        .with_columns(vec![ViewColumn::new("")]);
    assert_opts_invalid_joined_errors(
        &request.to_opts(),
        &[
            ValidationError::AtLeastOneOf {
                struct_name: "ViewColumn",
                fields: vec!["name"],
            },
            ValidationError::Conflicting {
                struct_name: "CreateViewOptions",
                fields: vec!["or_replace", "if_not_exists"],
            },
        ],
    );
}

#[test]
fn alter_default_options() {
    let cases = [
        (
            AlterViewRequest::new(id()).with_rename_to(SchemaObjectIdentifier::new("db", "sc", "users_v")),
            r#"ALTER VIEW "db"."sc"."active_users" RENAME TO "db"."sc"."users_v""#,
        ),
        (
            AlterViewRequest::new(id()).with_set_comment("c"),
            r#"ALTER VIEW "db"."sc"."active_users" SET COMMENT = 'c'"#,
        ),
        (
            AlterViewRequest::new(id()).with_unset_comment(true),
            r#"ALTER VIEW "db"."sc"."active_users" UNSET COMMENT"#,
        ),
        (
            AlterViewRequest::new(id()).with_if_exists(true).with_set_secure(true),
            r#"ALTER VIEW IF EXISTS "db"."sc"."active_users" SET SECURE"#,
        ),
        (
            AlterViewRequest::new(id()).with_unset_secure(true),
            r#"ALTER VIEW "db"."sc"."active_users" UNSET SECURE"#,
        ),
        (
            AlterViewRequest::new(id()).with_set_change_tracking(false),
            r#"ALTER VIEW "db"."sc"."active_users" SET CHANGE_TRACKING = false"#,
        ),
        (
            AlterViewRequest::new(id()).with_set_tag(vec![TagAssociation::new(
                SchemaObjectIdentifier::new("db", "sc", "pii"),
                "no",
            )]),
            r#"ALTER VIEW "db"."sc"."active_users" SET TAG "db"."sc"."pii" = 'no'"#,
        ),
    ];
    for (request, expected) in cases {
        assert_opts_valid_and_sql_equals(&request.to_opts(), expected);
    }
}

#[test]
fn alter_exactly_one() {
    assert_opts_invalid_joined_errors(
        &AlterViewRequest::new(id())
            .with_set_secure(true)
            .with_unset_secure(true)
            .to_opts(),
        &[ValidationError::ExactlyOneOf {
            struct_name: "AlterViewOptions",
            fields: vec![
                "rename_to",
                "set_comment",
                "unset_comment",
                "set_secure",
                "unset_secure",
                "set_change_tracking",
                "set_tag",
                "unset_tag",
            ],
        }],
    );
}

#[test]
fn drop_show_describe_default_options() {
    assert_opts_valid_and_sql_equals(&DropViewRequest::new(id()).to_opts(), r#"DROP VIEW "db"."sc"."active_users""#);
    assert_opts_valid_and_sql_equals(
        &ShowViewRequest::new()
            .with_in(In::Schema(DatabaseObjectIdentifier::new("db", "sc")))
            .to_opts(),
        r#"SHOW VIEWS IN SCHEMA "db"."sc""#,
    );
    let opts = DescribeViewOptions {
        name: id(),
        ..Default::default()
    };
    assert_opts_valid_and_sql_equals(&opts, r#"DESCRIBE VIEW "db"."sc"."active_users""#);
}

#[test]
fn rows_map_to_views() {
    let rows = ResultSet::from_rows(
        [
            "created_on",
            "name",
            "database_name",
            "schema_name",
            "text",
            "is_secure",
            "is_materialized",
            "change_tracking",
        ],
        [[
            Some("1700000000.000000000"),
            Some("active_users"),
            Some("db"),
            Some("sc"),
            Some("CREATE VIEW active_users AS SELECT 1"),
            Some("true"),
            Some("false"),
            Some("ON"),
        ]],
    );
    let view: View = rows.deserialize::<ViewRow>().unwrap().remove(0).into();
    assert_eq!(view.id(), id());
    assert!(view.is_secure);
    assert!(!view.is_materialized);
    assert!(view.change_tracking);

    let rows = ResultSet::from_rows(
        ["name", "type", "kind", "null?", "default", "comment", "policy name"],
        [
            [Some("ID"), Some("NUMBER(38,0)"), Some("COLUMN"), Some("N"), None, Some("key"), None],
            [
                Some("EMAIL"),
                Some("VARCHAR(256)"),
                Some("COLUMN"),
                Some("Y"),
                None,
                None,
                Some("db.sc.mask_email"),
            ],
        ],
    );
    let columns: Vec<ViewColumnDetails> = rows
        .deserialize::<ViewColumnRow>()
        .unwrap()
        .into_iter()
        .map(ViewColumnDetails::from)
        .collect();
    assert_eq!(columns.len(), 2);
    assert!(!columns[0].nullable);
    assert_eq!(columns[0].comment.as_deref(), Some("key"));
    assert_eq!(
        columns[1].policy_name,
        Some(SchemaObjectIdentifier::new("db", "sc", "mask_email"))
    );
}

#[tokio::test]
async fn dry_run_records_statements() {
    let client = Client::dry_run();
    let ctx = Context::background();
    let views = client.views();
    views
        .create(&ctx, &CreateViewRequest::new(id(), RawSql::from("SELECT 1")))
        .await
        .unwrap();
    assert!(views.describe(&ctx, &id()).await.unwrap().is_empty());
    views.drop(&ctx, &DropViewRequest::new(id())).await.unwrap();

    assert_eq!(
        client.trace_logs(),
        [
            r#"CREATE VIEW "db"."sc"."active_users" AS SELECT 1"#,
            r#"DESCRIBE VIEW "db"."sc"."active_users""#,
            r#"DROP VIEW "db"."sc"."active_users""#,
        ]
    );
}
