use snowflake_sdk_derive::{SnowflakeDeserialize, ToSql, Validate};

use super::common::{non_empty, In, Like, LimitFrom, StartsWith, TagAssociation, Timestamp};
use crate::client::Client;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{DatabaseObjectIdentifier, ObjectIdentifier, SchemaObjectIdentifier, TableColumnIdentifier};
use crate::sql::RawSql;

/// `"<name>" <type> [COLLATE '<c>'] [DEFAULT <expr>] [NOT NULL] [COMMENT '<c>']`.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct TableColumn {
    #[ddl(keyword, double_quotes)]
    pub name: String,
    #[ddl(keyword)]
    pub data_type: String,
    #[ddl(parameter, no_equals, single_quotes, sql = "COLLATE")]
    pub collate: Option<String>,
    #[ddl(parameter, no_equals, sql = "DEFAULT")]
    pub default: Option<RawSql>,
    #[ddl(keyword, sql = "NOT NULL")]
    pub not_null: bool,
    #[ddl(parameter, no_equals, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

impl TableColumn {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        TableColumn {
            name: name.into(),
            data_type: data_type.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
#[validate(conflicting(transient, temporary))]
pub struct CreateTableOptions {
    #[ddl(static, sql = "CREATE")]
    create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(keyword, sql = "TRANSIENT")]
    pub transient: bool,
    #[ddl(keyword, sql = "TEMPORARY")]
    pub temporary: bool,
    #[ddl(static, sql = "TABLE")]
    table: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(list, must_parentheses)]
    pub columns: Vec<TableColumn>,
    #[ddl(list, sql = "CLUSTER BY")]
    pub cluster_by: Vec<String>,
    #[ddl(parameter, sql = "DATA_RETENTION_TIME_IN_DAYS")]
    pub data_retention_time_in_days: Option<u32>,
    #[ddl(parameter, sql = "MAX_DATA_EXTENSION_TIME_IN_DAYS")]
    pub max_data_extension_time_in_days: Option<u32>,
    #[ddl(parameter, sql = "CHANGE_TRACKING")]
    pub change_tracking: Option<bool>,
    #[ddl(parameter, single_quotes, sql = "DEFAULT_DDL_COLLATION")]
    pub default_ddl_collation: Option<String>,
    #[ddl(keyword, sql = "COPY GRANTS")]
    pub copy_grants: bool,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
    #[ddl(list, sql = "WITH TAG")]
    pub tag: Vec<TagAssociation>,
}

impl CreateTableOptions {
    pub fn new(name: SchemaObjectIdentifier, columns: Vec<TableColumn>) -> Self {
        CreateTableOptions {
            name,
            columns,
            ..Default::default()
        }
    }
}

/// `RENAME COLUMN "<old>" TO "<new>"`.
#[derive(Debug, Clone, PartialEq, Default, ToSql)]
pub struct TableColumnRename {
    #[ddl(keyword, double_quotes)]
    pub old_name: String,
    #[ddl(parameter, no_equals, double_quotes, sql = "TO")]
    pub new_name: String,
}

/// `ALTER COLUMN "<name>" <action>`.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(set_data_type, set_not_null, drop_not_null, comment, unset_comment))]
pub struct TableColumnAlter {
    #[ddl(keyword, double_quotes)]
    pub name: String,
    #[ddl(parameter, no_equals, sql = "SET DATA TYPE")]
    pub set_data_type: Option<String>,
    #[ddl(keyword, sql = "SET NOT NULL")]
    pub set_not_null: bool,
    #[ddl(keyword, sql = "DROP NOT NULL")]
    pub drop_not_null: bool,
    #[ddl(parameter, no_equals, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
    #[ddl(keyword, sql = "UNSET COMMENT")]
    pub unset_comment: bool,
}

impl TableColumnAlter {
    pub fn new(name: impl Into<String>) -> Self {
        TableColumnAlter {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(
    new_name,
    swap_with,
    add_column,
    rename_column,
    alter_column,
    drop_columns,
    cluster_by,
    drop_clustering_key,
    suspend_recluster,
    resume_recluster,
    set,
    unset,
    set_tag,
    unset_tag
))]
pub struct AlterTableOptions {
    #[ddl(static, sql = "ALTER TABLE")]
    alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(identifier, sql = "RENAME TO")]
    #[validate(identifier_if_set)]
    pub new_name: Option<SchemaObjectIdentifier>,
    #[ddl(identifier, sql = "SWAP WITH")]
    #[validate(identifier_if_set)]
    pub swap_with: Option<SchemaObjectIdentifier>,
    #[ddl(keyword, sql = "ADD COLUMN")]
    pub add_column: Option<TableColumn>,
    #[ddl(keyword, sql = "RENAME COLUMN")]
    pub rename_column: Option<TableColumnRename>,
    #[ddl(keyword, sql = "ALTER COLUMN")]
    #[validate(nested)]
    pub alter_column: Option<TableColumnAlter>,
    #[ddl(list, no_parentheses, double_quotes, sql = "DROP COLUMN")]
    pub drop_columns: Vec<String>,
    #[ddl(list, sql = "CLUSTER BY")]
    pub cluster_by: Vec<String>,
    #[ddl(keyword, sql = "DROP CLUSTERING KEY")]
    pub drop_clustering_key: bool,
    #[ddl(keyword, sql = "SUSPEND RECLUSTER")]
    pub suspend_recluster: bool,
    #[ddl(keyword, sql = "RESUME RECLUSTER")]
    pub resume_recluster: bool,
    #[ddl(keyword, sql = "SET")]
    #[validate(nested)]
    pub set: Option<TableSet>,
    #[ddl(list, no_parentheses, sql = "UNSET")]
    #[validate(nested)]
    pub unset: Option<TableUnset>,
    #[ddl(list, no_parentheses, sql = "SET TAG")]
    pub set_tag: Vec<TagAssociation>,
    #[ddl(list, no_parentheses, sql = "UNSET TAG")]
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl AlterTableOptions {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        AlterTableOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(
    data_retention_time_in_days,
    max_data_extension_time_in_days,
    change_tracking,
    default_ddl_collation,
    comment
))]
pub struct TableSet {
    #[ddl(parameter, sql = "DATA_RETENTION_TIME_IN_DAYS")]
    pub data_retention_time_in_days: Option<u32>,
    #[ddl(parameter, sql = "MAX_DATA_EXTENSION_TIME_IN_DAYS")]
    pub max_data_extension_time_in_days: Option<u32>,
    #[ddl(parameter, sql = "CHANGE_TRACKING")]
    pub change_tracking: Option<bool>,
    #[ddl(parameter, single_quotes, sql = "DEFAULT_DDL_COLLATION")]
    pub default_ddl_collation: Option<String>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(
    data_retention_time_in_days,
    max_data_extension_time_in_days,
    change_tracking,
    default_ddl_collation,
    comment
))]
pub struct TableUnset {
    #[ddl(keyword, sql = "DATA_RETENTION_TIME_IN_DAYS")]
    pub data_retention_time_in_days: bool,
    #[ddl(keyword, sql = "MAX_DATA_EXTENSION_TIME_IN_DAYS")]
    pub max_data_extension_time_in_days: bool,
    #[ddl(keyword, sql = "CHANGE_TRACKING")]
    pub change_tracking: bool,
    #[ddl(keyword, sql = "DEFAULT_DDL_COLLATION")]
    pub default_ddl_collation: bool,
    #[ddl(keyword, sql = "COMMENT")]
    pub comment: bool,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(cascade, restrict))]
pub struct DropTableOptions {
    #[ddl(static, sql = "DROP TABLE")]
    drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(keyword, sql = "CASCADE")]
    pub cascade: bool,
    #[ddl(keyword, sql = "RESTRICT")]
    pub restrict: bool,
}

impl DropTableOptions {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        DropTableOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
struct UndropTableOptions {
    #[ddl(static, sql = "UNDROP TABLE")]
    undrop: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    name: SchemaObjectIdentifier,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowTablesOptions {
    #[ddl(static, sql = "SHOW")]
    show: (),
    #[ddl(keyword, sql = "TERSE")]
    pub terse: bool,
    #[ddl(static, sql = "TABLES")]
    tables: (),
    #[ddl(keyword, sql = "HISTORY")]
    pub history: bool,
    #[ddl(keyword)]
    pub like: Option<Like>,
    #[ddl(keyword)]
    pub r#in: Option<In>,
    #[ddl(keyword)]
    pub starts_with: Option<StartsWith>,
    #[ddl(keyword)]
    pub limit: Option<LimitFrom>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
struct DescribeTableColumnsOptions {
    #[ddl(static, sql = "DESCRIBE TABLE")]
    describe: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    name: SchemaObjectIdentifier,
    #[ddl(static, sql = "TYPE = COLUMNS")]
    columns: (),
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct TableRow {
    created_on: Timestamp,
    name: String,
    database_name: String,
    schema_name: String,
    kind: Option<String>,
    comment: Option<String>,
    cluster_by: Option<String>,
    rows: Option<u64>,
    bytes: Option<u64>,
    owner: Option<String>,
    retention_time: Option<String>,
    automatic_clustering: Option<bool>,
    change_tracking: Option<bool>,
    is_external: Option<bool>,
    owner_role_type: Option<String>,
    dropped_on: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub created_on: Timestamp,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub kind: Option<String>,
    pub comment: Option<String>,
    pub cluster_by: Option<String>,
    pub rows: u64,
    pub bytes: u64,
    pub owner: Option<String>,
    pub retention_time: Option<u32>,
    pub automatic_clustering: bool,
    pub change_tracking: bool,
    pub is_external: bool,
    pub owner_role_type: Option<String>,
    pub dropped_on: Option<Timestamp>,
}

impl Table {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

impl From<TableRow> for Table {
    fn from(row: TableRow) -> Self {
        Table {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            kind: non_empty(row.kind),
            comment: non_empty(row.comment),
            cluster_by: non_empty(row.cluster_by),
            rows: row.rows.unwrap_or_default(),
            bytes: row.bytes.unwrap_or_default(),
            owner: non_empty(row.owner),
            retention_time: row.retention_time.and_then(|value| value.trim().parse().ok()),
            automatic_clustering: row.automatic_clustering.unwrap_or_default(),
            change_tracking: row.change_tracking.unwrap_or_default(),
            is_external: row.is_external.unwrap_or_default(),
            owner_role_type: non_empty(row.owner_role_type),
            dropped_on: row.dropped_on,
        }
    }
}

/// Row of `DESCRIBE TABLE ... TYPE = COLUMNS`.
#[derive(Debug, Clone, PartialEq, SnowflakeDeserialize)]
pub struct TableColumnDetails {
    pub name: String,
    #[snowflake(rename = "type")]
    pub data_type: String,
    pub kind: Option<String>,
    #[snowflake(rename = "null?")]
    pub nullable: Option<bool>,
    pub default: Option<String>,
    #[snowflake(rename = "primary key")]
    pub primary_key: Option<bool>,
    #[snowflake(rename = "unique key")]
    pub unique_key: Option<bool>,
    pub comment: Option<String>,
}

pub struct Tables<'a> {
    client: &'a Client,
}

impl<'a> Tables<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Tables { client }
    }

    pub async fn create(&self, ctx: &Context, opts: &CreateTableOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn alter(&self, ctx: &Context, opts: &AlterTableOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn drop(&self, ctx: &Context, opts: &DropTableOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn undrop(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<()> {
        let opts = UndropTableOptions {
            name: id.clone(),
            ..Default::default()
        };
        self.client.validate_and_exec(ctx, &opts).await
    }

    pub async fn show(&self, ctx: &Context, opts: &ShowTablesOptions) -> Result<Vec<Table>> {
        let rows: Vec<TableRow> = self.client.validate_and_query(ctx, opts).await?;
        Ok(rows.into_iter().map(Table::from).collect())
    }

    pub async fn show_by_id(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<Table> {
        let opts = ShowTablesOptions {
            like: Some(Like::name(id)),
            r#in: Some(In::Schema(id.schema_id())),
            ..Default::default()
        };
        self.show(ctx, &opts)
            .await?
            .into_iter()
            .find(|table| table.id() == *id)
            .ok_or_else(|| Error::object_not_found(id))
    }

    pub async fn describe_columns(
        &self,
        ctx: &Context,
        id: &SchemaObjectIdentifier,
    ) -> Result<Vec<TableColumnDetails>> {
        let opts = DescribeTableColumnsOptions {
            name: id.clone(),
            ..Default::default()
        };
        self.client.validate_and_query(ctx, &opts).await
    }

    /// Details of a single column, [`Error::ObjectNotExistOrAuthorized`] when the table lacks it.
    pub async fn describe_column(
        &self,
        ctx: &Context,
        id: &TableColumnIdentifier,
    ) -> Result<TableColumnDetails> {
        self.describe_columns(ctx, &id.table_id())
            .await?
            .into_iter()
            .find(|column| column.name == id.name())
            .ok_or_else(|| Error::object_not_found(id))
    }

    pub async fn add_column(
        &self,
        ctx: &Context,
        table: &SchemaObjectIdentifier,
        column: TableColumn,
    ) -> Result<()> {
        let mut opts = AlterTableOptions::new(table.clone());
        opts.add_column = Some(column);
        self.alter(ctx, &opts).await
    }

    pub async fn set_column_comment(
        &self,
        ctx: &Context,
        id: &TableColumnIdentifier,
        comment: impl Into<String>,
    ) -> Result<()> {
        let mut opts = AlterTableOptions::new(id.table_id());
        opts.alter_column = Some(TableColumnAlter {
            comment: Some(comment.into()),
            ..TableColumnAlter::new(id.name())
        });
        self.alter(ctx, &opts).await
    }

    pub async fn drop_column(&self, ctx: &Context, id: &TableColumnIdentifier) -> Result<()> {
        let mut opts = AlterTableOptions::new(id.table_id());
        opts.drop_columns = vec![id.name().to_string()];
        self.alter(ctx, &opts).await
    }
}

/// `SHOW TABLES IN SCHEMA <schema>`.
pub fn tables_in_schema(schema: DatabaseObjectIdentifier) -> ShowTablesOptions {
    ShowTablesOptions {
        r#in: Some(In::Schema(schema)),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::testing::{assert_opts_invalid_joined_errors, assert_opts_valid_and_sql_equals};
    use crate::validation::ValidationError;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("db", "sc", "t")
    }

    #[test]
    fn create_with_columns_and_clustering() {
        let mut id_column = TableColumn::new("id", "NUMBER(38,0)");
        id_column.not_null = true;
        let mut created = TableColumn::new("created", "TIMESTAMP_NTZ");
        created.default = Some(RawSql("CURRENT_TIMESTAMP()".into()));
        created.comment = Some("insert time".into());
        let mut opts = CreateTableOptions::new(id(), vec![id_column, created]);
        opts.transient = true;
        opts.cluster_by = vec!["id".into()];
        opts.change_tracking = Some(true);
        assert_opts_valid_and_sql_equals(
            &opts,
            r#"CREATE TRANSIENT TABLE "db"."sc"."t" ("id" NUMBER(38,0) NOT NULL, "created" TIMESTAMP_NTZ DEFAULT CURRENT_TIMESTAMP() COMMENT 'insert time') CLUSTER BY (id) CHANGE_TRACKING = true"#,
        );
    }

    #[test]
    fn create_rejects_transient_temporary() {
        let mut opts = CreateTableOptions::new(id(), vec![TableColumn::new("a", "INT")]);
        opts.transient = true;
        opts.temporary = true;
        assert_opts_invalid_joined_errors(
            &opts,
            &[ValidationError::Conflicting {
                struct_name: "CreateTableOptions",
                fields: vec!["transient", "temporary"],
            }],
        );
    }

    #[test]
    fn alter_columns() {
        let mut opts = AlterTableOptions::new(id());
        opts.rename_column = Some(TableColumnRename {
            old_name: "a".into(),
            new_name: "b".into(),
        });
        assert_opts_valid_and_sql_equals(&opts, r#"ALTER TABLE "db"."sc"."t" RENAME COLUMN "a" TO "b""#);

        let mut opts = AlterTableOptions::new(id());
        opts.alter_column = Some(TableColumnAlter {
            set_data_type: Some("VARCHAR(200)".into()),
            ..TableColumnAlter::new("b")
        });
        assert_opts_valid_and_sql_equals(
            &opts,
            r#"ALTER TABLE "db"."sc"."t" ALTER COLUMN "b" SET DATA TYPE VARCHAR(200)"#,
        );

        let mut opts = AlterTableOptions::new(id());
        opts.drop_columns = vec!["a".into(), "b".into()];
        assert_opts_valid_and_sql_equals(&opts, r#"ALTER TABLE "db"."sc"."t" DROP COLUMN "a", "b""#);

        let mut opts = AlterTableOptions::new(id());
        opts.alter_column = Some(TableColumnAlter::new("b"));
        assert_opts_invalid_joined_errors(
            &opts,
            &[ValidationError::ExactlyOneOf {
                struct_name: "TableColumnAlter",
                fields: vec!["set_data_type", "set_not_null", "drop_not_null", "comment", "unset_comment"],
            }],
        );
    }

    #[test]
    fn alter_clustering_and_properties() {
        let mut opts = AlterTableOptions::new(id());
        opts.drop_clustering_key = true;
        assert_opts_valid_and_sql_equals(&opts, r#"ALTER TABLE "db"."sc"."t" DROP CLUSTERING KEY"#);

        let mut opts = AlterTableOptions::new(id());
        opts.unset = Some(TableUnset {
            comment: true,
            ..Default::default()
        });
        assert_opts_valid_and_sql_equals(&opts, r#"ALTER TABLE "db"."sc"."t" UNSET COMMENT"#);
    }

    #[test]
    fn show_in_schema() {
        let mut opts = tables_in_schema(DatabaseObjectIdentifier::new("db", "sc"));
        opts.like = Some(Like::new("t"));
        assert_opts_valid_and_sql_equals(&opts, r#"SHOW TABLES LIKE 't' IN SCHEMA "db"."sc""#);
        let opts = DescribeTableColumnsOptions {
            name: id(),
            ..Default::default()
        };
        assert_opts_valid_and_sql_equals(&opts, r#"DESCRIBE TABLE "db"."sc"."t" TYPE = COLUMNS"#);
    }

    #[tokio::test]
    async fn column_helpers_target_the_table() {
        let client = Client::dry_run();
        let ctx = Context::background();
        let column = TableColumnIdentifier::new("db", "sc", "t", "c");
        client.tables().set_column_comment(&ctx, &column, "note").await.unwrap();
        client.tables().drop_column(&ctx, &column).await.unwrap();
        assert_eq!(
            client.trace_logs(),
            [
                r#"ALTER TABLE "db"."sc"."t" ALTER COLUMN "c" COMMENT 'note'"#,
                r#"ALTER TABLE "db"."sc"."t" DROP COLUMN "c""#,
            ]
        );
    }
}
