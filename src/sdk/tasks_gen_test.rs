use snowflake_driver::ResultSet;

use super::common::{In, TagAssociation};
use super::sessions::SessionParameters;
use super::tasks::*;
use super::tasks_ext::TaskRow;
use super::warehouses::WarehouseSize;
use crate::client::Client;
use crate::context::Context;
use crate::identifier::{AccountObjectIdentifier, DatabaseObjectIdentifier, SchemaObjectIdentifier};
use crate::sdk::testing::{assert_opts_invalid_joined_errors, assert_opts_valid_and_sql_equals};
use crate::sql::RawSql;
use crate::validation::ValidationError;

fn id() -> SchemaObjectIdentifier {
    SchemaObjectIdentifier::new("db", "sc", "load")
}

#[test]
fn create_default_options() {
    let request = CreateTaskRequest::new(id(), RawSql::from("SELECT 1"));
    assert_opts_valid_and_sql_equals(&request.to_opts(), r#"CREATE TASK "db"."sc"."load" AS SELECT 1"#);

    let request = CreateTaskRequest::new(id(), RawSql::from("INSERT INTO t SELECT 1"))
        .with_or_replace(true)
        .with_warehouse(AccountObjectIdentifier::new("WH"))
        .with_schedule("5 MINUTE")
        .with_allow_overlapping_execution(false)
        .with_session_parameters(SessionParameters {
            timezone: Some("UTC".into()),
            ..Default::default()
        })
        .with_suspend_task_after_num_failures(3)
        .with_comment("loads")
        .with_tag(vec![TagAssociation::new(SchemaObjectIdentifier::new("db", "sc", "team"), "etl")])
        .with_when("SYSTEM$STREAM_HAS_DATA('s')");
    assert_opts_valid_and_sql_equals(
        &request.to_opts(),
        concat!(
            r#"CREATE OR REPLACE TASK "db"."sc"."load" WAREHOUSE = "WH" SCHEDULE = '5 MINUTE' "#,
            r#"ALLOW_OVERLAPPING_EXECUTION = false TIMEZONE = 'UTC' SUSPEND_TASK_AFTER_NUM_FAILURES = 3 "#,
            r#"COMMENT = 'loads' WITH TAG ("db"."sc"."team" = 'etl') "#,
            r#"WHEN SYSTEM$STREAM_HAS_DATA('s') AS INSERT INTO t SELECT 1"#,
        ),
    );

    let request = CreateTaskRequest::new(id(), RawSql::from("SELECT 1"))
        .with_user_task_managed_initial_warehouse_size(WarehouseSize::XSmall)
        .with_after(vec![
            SchemaObjectIdentifier::new("db", "sc", "a"),
            SchemaObjectIdentifier::new("db", "sc", "b"),
        ]);
    assert_opts_valid_and_sql_equals(
        &request.to_opts(),
        r#"CREATE TASK "db"."sc"."load" USER_TASK_MANAGED_INITIAL_WAREHOUSE_SIZE = 'XSMALL' AFTER "db"."sc"."a", "db"."sc"."b" AS SELECT 1"#,
    );
}

#[test]
fn create_conflicting() {
    let request = CreateTaskRequest::new(id(), RawSql::from("SELECT 1"))
        .with_or_replace(true)
        .with_if_not_exists(true)
        .with_warehouse(AccountObjectIdentifier::new("WH"))
        .with_user_task_managed_initial_warehouse_size(WarehouseSize::Small);
    assert_opts_invalid_joined_errors(
        &request.to_opts(),
        &[
            ValidationError::Conflicting {
                struct_name: "CreateTaskOptions",
                fields: vec!["or_replace", "if_not_exists"],
            },
            ValidationError::Conflicting {
                struct_name: "CreateTaskOptions",
                fields: vec!["warehouse", "user_task_managed_initial_warehouse_size"],
            },
        ],
    );
}

#[test]
fn alter_default_options() {
    let cases = [
        (AlterTaskRequest::new(id()).with_resume(true), r#"ALTER TASK "db"."sc"."load" RESUME"#),
        (
            AlterTaskRequest::new(id()).with_if_exists(true).with_suspend(true),
            r#"ALTER TASK IF EXISTS "db"."sc"."load" SUSPEND"#,
        ),
        (
            AlterTaskRequest::new(id()).with_add_after(vec![SchemaObjectIdentifier::new("db", "sc", "a")]),
            r#"ALTER TASK "db"."sc"."load" ADD AFTER "db"."sc"."a""#,
        ),
        (
            AlterTaskRequest::new(id()).with_set(TaskSet::schedule("USING CRON 0 9 * * * UTC")),
            r#"ALTER TASK "db"."sc"."load" SET SCHEDULE = 'USING CRON 0 9 * * * UTC'"#,
        ),
        (
            AlterTaskRequest::new(id()).with_unset(TaskUnset {
                schedule: true,
                comment: true,
                ..Default::default()
            }),
            r#"ALTER TASK "db"."sc"."load" UNSET SCHEDULE, COMMENT"#,
        ),
        (
            AlterTaskRequest::new(id()).with_modify_as("SELECT 2"),
            r#"ALTER TASK "db"."sc"."load" MODIFY AS SELECT 2"#,
        ),
        (
            AlterTaskRequest::new(id()).with_modify_when("1 = 1"),
            r#"ALTER TASK "db"."sc"."load" MODIFY WHEN 1 = 1"#,
        ),
    ];
    for (request, expected) in cases {
        assert_opts_valid_and_sql_equals(&request.to_opts(), expected);
    }
}

#[test]
fn alter_exactly_one() {
    assert_opts_invalid_joined_errors(
        &AlterTaskRequest::new(id()).with_resume(true).with_suspend(true).to_opts(),
        &[ValidationError::ExactlyOneOf {
            struct_name: "AlterTaskOptions",
            fields: vec![
                "resume",
                "suspend",
                "remove_after",
                "add_after",
                "set",
                "unset",
                "set_tag",
                "unset_tag",
                "modify_as",
                "modify_when",
            ],
        }],
    );

    let request = AlterTaskRequest::new(id()).with_set(TaskSet {
        warehouse: Some(AccountObjectIdentifier::new("WH")),
        user_task_managed_initial_warehouse_size: Some(WarehouseSize::Small),
        ..Default::default()
    });
    assert_opts_invalid_joined_errors(
        &request.to_opts(),
        &[ValidationError::Conflicting {
            struct_name: "TaskSet",
            fields: vec!["warehouse", "user_task_managed_initial_warehouse_size"],
        }],
    );

    let request = AlterTaskRequest::new(id()).with_unset(TaskUnset::default());
    assert_opts_invalid_joined_errors(
        &request.to_opts(),
        &[ValidationError::AtLeastOneOf {
            struct_name: "TaskUnset",
            fields: vec![
                "warehouse",
                "schedule",
                "config",
                "allow_overlapping_execution",
                "user_task_timeout_ms",
                "suspend_task_after_num_failures",
                "error_integration",
                "comment",
            ],
        }],
    );
}

#[test]
fn drop_default_options() {
    assert_opts_valid_and_sql_equals(&DropTaskRequest::new(id()).to_opts(), r#"DROP TASK "db"."sc"."load""#);
}

#[test]
fn show_default_options() {
    assert_opts_valid_and_sql_equals(&ShowTaskRequest::new().to_opts(), "SHOW TASKS");

    let request = ShowTaskRequest::new()
        .with_terse(true)
        .with_in(In::Schema(DatabaseObjectIdentifier::new("db", "sc")))
        .with_root_only(true);
    assert_opts_valid_and_sql_equals(&request.to_opts(), r#"SHOW TERSE TASKS IN SCHEMA "db"."sc" ROOT ONLY"#);
}

#[test]
fn describe_default_options() {
    let opts = DescribeTaskOptions {
        name: id(),
        ..Default::default()
    };
    assert_opts_valid_and_sql_equals(&opts, r#"DESCRIBE TASK "db"."sc"."load""#);
}

#[test]
fn execute_default_options() {
    assert_opts_valid_and_sql_equals(&ExecuteTaskRequest::new(id()).to_opts(), r#"EXECUTE TASK "db"."sc"."load""#);
    assert_opts_valid_and_sql_equals(
        &ExecuteTaskRequest::new(id()).with_retry_last(true).to_opts(),
        r#"EXECUTE TASK "db"."sc"."load" RETRY LAST"#,
    );
}

#[test]
fn rows_map_to_tasks() {
    let rows = ResultSet::from_rows(
        [
            "created_on",
            "name",
            "database_name",
            "schema_name",
            "warehouse",
            "predecessors",
            "state",
            "definition",
            "allow_overlapping_execution",
            "error_integration",
        ],
        [[
            Some("1700000000.000000000"),
            Some("load"),
            Some("db"),
            Some("sc"),
            Some("WH"),
            Some(r#"["\"db\".\"sc\".\"root\""]"#),
            Some("started"),
            Some("SELECT 1"),
            Some("null"),
            Some("null"),
        ]],
    );
    let task: Task = rows.deserialize::<TaskRow>().unwrap().remove(0).into();
    assert_eq!(task.id(), id());
    assert_eq!(task.predecessors, [SchemaObjectIdentifier::new("db", "sc", "root")]);
    assert!(task.is_started());
    assert!(!task.is_root());
    assert!(!task.allow_overlapping_execution);
    assert_eq!(task.error_integration, None);

    let rows = ResultSet::from_rows(
        ["created_on", "name", "database_name", "schema_name", "state"],
        [[Some("1700000000.000000000"), Some("root"), Some("db"), Some("sc"), Some("suspended")]],
    );
    let task: Task = rows.deserialize::<TaskRow>().unwrap().remove(0).into();
    assert!(task.is_root());
    assert_eq!(task.state, Some(TaskState::Suspended));
}

#[tokio::test]
async fn dry_run_records_statements() {
    let client = Client::dry_run();
    let ctx = Context::background();
    let tasks = client.tasks();
    tasks
        .create(&ctx, &CreateTaskRequest::new(id(), RawSql::from("SELECT 1")))
        .await
        .unwrap();
    tasks.resume_tasks(&ctx, &[id()]).await.unwrap();
    tasks.execute(&ctx, &ExecuteTaskRequest::new(id())).await.unwrap();
    assert!(tasks.show_by_id(&ctx, &id()).await.unwrap_err().is_object_not_exist_or_authorized());

    assert_eq!(
        client.trace_logs(),
        [
            r#"CREATE TASK "db"."sc"."load" AS SELECT 1"#,
            r#"ALTER TASK "db"."sc"."load" RESUME"#,
            r#"EXECUTE TASK "db"."sc"."load""#,
            r#"SHOW TASKS LIKE 'load' IN SCHEMA "db"."sc""#,
        ]
    );
}
