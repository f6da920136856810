use snowflake_sdk_derive::{SnowflakeDeserialize, ToSql, Validate};

use super::common::{non_empty, In, Like, Properties, PropertyRow, TagAssociation, Timestamp};
use crate::client::Client;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{ObjectIdentifier, SchemaObjectIdentifier, SchemaObjectIdentifierWithArguments};
use crate::sql::RawSql;

crate::sql_enum! {
    pub enum NullInputBehavior {
        CalledOnNullInput => "CALLED ON NULL INPUT",
        ReturnsNullOnNullInput => "RETURNS NULL ON NULL INPUT" | "STRICT",
    }
}

crate::sql_enum! {
    pub enum ReturnResultsBehavior {
        Volatile => "VOLATILE",
        Immutable => "IMMUTABLE",
    }
}

/// `"<name>" <type> [DEFAULT <expr>]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, ToSql)]
pub struct FunctionArgument {
    #[ddl(keyword, double_quotes)]
    pub name: String,
    #[ddl(keyword)]
    pub data_type: String,
    #[ddl(parameter, no_equals, sql = "DEFAULT")]
    pub default: Option<RawSql>,
}

impl FunctionArgument {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        FunctionArgument {
            name: name.into(),
            data_type: data_type.into(),
            default: None,
        }
    }
}

/// SQL user-defined function.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateFunctionOptions {
    #[ddl(static, sql = "CREATE")]
    create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(keyword, sql = "TEMPORARY")]
    pub temporary: bool,
    #[ddl(keyword, sql = "SECURE")]
    pub secure: bool,
    #[ddl(static, sql = "FUNCTION")]
    function: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(list, must_parentheses)]
    pub arguments: Vec<FunctionArgument>,
    #[ddl(keyword, sql = "COPY GRANTS")]
    pub copy_grants: bool,
    #[ddl(parameter, no_equals, sql = "RETURNS")]
    pub returns: String,
    #[ddl(keyword, sql = "NOT NULL")]
    pub returns_not_null: bool,
    #[ddl(keyword)]
    pub null_input_behavior: Option<NullInputBehavior>,
    #[ddl(keyword)]
    pub return_results_behavior: Option<ReturnResultsBehavior>,
    #[ddl(keyword, sql = "MEMOIZABLE")]
    pub memoizable: bool,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
    #[ddl(parameter, no_equals, single_quotes, sql = "AS")]
    pub definition: String,
}

impl CreateFunctionOptions {
    pub fn new(
        name: SchemaObjectIdentifier,
        arguments: Vec<FunctionArgument>,
        returns: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        CreateFunctionOptions {
            name,
            arguments,
            returns: returns.into(),
            definition: definition.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(new_name, set_secure, unset_secure, set_comment, unset_comment, set_tag, unset_tag))]
pub struct AlterFunctionOptions {
    #[ddl(static, sql = "ALTER FUNCTION")]
    alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifierWithArguments,
    #[ddl(identifier, sql = "RENAME TO")]
    #[validate(identifier_if_set)]
    pub new_name: Option<SchemaObjectIdentifier>,
    #[ddl(keyword, sql = "SET SECURE")]
    pub set_secure: bool,
    #[ddl(keyword, sql = "UNSET SECURE")]
    pub unset_secure: bool,
    #[ddl(parameter, single_quotes, sql = "SET COMMENT")]
    pub set_comment: Option<String>,
    #[ddl(keyword, sql = "UNSET COMMENT")]
    pub unset_comment: bool,
    #[ddl(list, no_parentheses, sql = "SET TAG")]
    pub set_tag: Vec<TagAssociation>,
    #[ddl(list, no_parentheses, sql = "UNSET TAG")]
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl AlterFunctionOptions {
    pub fn new(name: SchemaObjectIdentifierWithArguments) -> Self {
        AlterFunctionOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DropFunctionOptions {
    #[ddl(static, sql = "DROP FUNCTION")]
    drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifierWithArguments,
}

impl DropFunctionOptions {
    pub fn new(name: SchemaObjectIdentifierWithArguments) -> Self {
        DropFunctionOptions {
            name,
            ..Default::default()
        }
    }
}

/// `SHOW USER FUNCTIONS`; built-in functions are never listed.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowFunctionsOptions {
    #[ddl(static, sql = "SHOW USER FUNCTIONS")]
    show: (),
    #[ddl(keyword)]
    pub like: Option<Like>,
    #[ddl(keyword)]
    pub r#in: Option<In>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
struct DescribeFunctionOptions {
    #[ddl(static, sql = "DESCRIBE FUNCTION")]
    describe: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    name: SchemaObjectIdentifierWithArguments,
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct FunctionRow {
    created_on: Timestamp,
    name: String,
    schema_name: String,
    catalog_name: String,
    is_builtin: Option<String>,
    is_aggregate: Option<String>,
    is_ansi: Option<String>,
    min_num_arguments: Option<u32>,
    max_num_arguments: Option<u32>,
    arguments: String,
    description: Option<String>,
    is_table_function: Option<String>,
    valid_for_clustering: Option<String>,
    is_secure: Option<String>,
    is_external_function: Option<String>,
    language: Option<String>,
    is_memoizable: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub created_on: Timestamp,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub is_builtin: bool,
    pub is_aggregate: bool,
    pub is_ansi: bool,
    pub min_num_arguments: u32,
    pub max_num_arguments: u32,
    /// `ADD(NUMBER, NUMBER) RETURN NUMBER` as shown by Snowflake.
    pub arguments: String,
    pub argument_types: Vec<String>,
    pub return_type: Option<String>,
    pub description: Option<String>,
    pub is_table_function: bool,
    pub valid_for_clustering: bool,
    pub is_secure: bool,
    pub is_external_function: bool,
    pub language: Option<String>,
    pub is_memoizable: bool,
}

impl Function {
    pub fn id(&self) -> SchemaObjectIdentifierWithArguments {
        SchemaObjectIdentifierWithArguments::new(
            &self.database_name,
            &self.schema_name,
            &self.name,
            &self.argument_types,
        )
    }
}

/// `SHOW FUNCTIONS` renders booleans as `Y`/`N`.
fn flag(value: Option<String>) -> bool {
    value.is_some_and(|value| value.eq_ignore_ascii_case("Y") || value.eq_ignore_ascii_case("true"))
}

/// Splits `ADD(NUMBER, [NUMBER]) RETURN NUMBER` into argument types and the return type.
/// Brackets mark arguments with defaults and are dropped.
pub fn parse_function_arguments(arguments: &str) -> (Vec<String>, Option<String>) {
    let (signature, return_type) = match arguments.rsplit_once(" RETURN ") {
        Some((signature, return_type)) => (signature, Some(return_type.trim().to_string())),
        None => (arguments, None),
    };
    let Some(open) = signature.find('(') else {
        return (Vec::new(), return_type);
    };
    let inner = signature[open + 1..].trim_end().trim_end_matches(')');
    let mut types = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                types.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    types.push(current);
    let types = types
        .into_iter()
        .map(|ty| ty.trim().trim_start_matches('[').trim_end_matches(']').trim().to_string())
        .filter(|ty| !ty.is_empty())
        .collect();
    (types, return_type)
}

impl From<FunctionRow> for Function {
    fn from(row: FunctionRow) -> Self {
        let (argument_types, return_type) = parse_function_arguments(&row.arguments);
        Function {
            created_on: row.created_on,
            name: row.name,
            database_name: row.catalog_name,
            schema_name: row.schema_name,
            is_builtin: flag(row.is_builtin),
            is_aggregate: flag(row.is_aggregate),
            is_ansi: flag(row.is_ansi),
            min_num_arguments: row.min_num_arguments.unwrap_or_default(),
            max_num_arguments: row.max_num_arguments.unwrap_or_default(),
            arguments: row.arguments,
            argument_types,
            return_type,
            description: non_empty(row.description).filter(|value| value != "user-defined function"),
            is_table_function: flag(row.is_table_function),
            valid_for_clustering: flag(row.valid_for_clustering),
            is_secure: flag(row.is_secure),
            is_external_function: flag(row.is_external_function),
            language: non_empty(row.language),
            is_memoizable: flag(row.is_memoizable),
        }
    }
}

pub struct Functions<'a> {
    client: &'a Client,
}

impl<'a> Functions<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Functions { client }
    }

    pub async fn create(&self, ctx: &Context, opts: &CreateFunctionOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn alter(&self, ctx: &Context, opts: &AlterFunctionOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn drop(&self, ctx: &Context, opts: &DropFunctionOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn show(&self, ctx: &Context, opts: &ShowFunctionsOptions) -> Result<Vec<Function>> {
        let rows: Vec<FunctionRow> = self.client.validate_and_query(ctx, opts).await?;
        Ok(rows.into_iter().map(Function::from).collect())
    }

    /// Overloads share a name, so the argument types must match too.
    pub async fn show_by_id(
        &self,
        ctx: &Context,
        id: &SchemaObjectIdentifierWithArguments,
    ) -> Result<Function> {
        let opts = ShowFunctionsOptions {
            like: Some(Like::name(id)),
            r#in: Some(In::Schema(id.schema_id())),
            ..Default::default()
        };
        self.show(ctx, &opts)
            .await?
            .into_iter()
            .find(|function| {
                function.name == id.name()
                    && function.argument_types.len() == id.argument_types().len()
                    && function
                        .argument_types
                        .iter()
                        .zip(id.argument_types())
                        .all(|(shown, wanted)| shown.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| Error::object_not_found(id))
    }

    pub async fn describe(
        &self,
        ctx: &Context,
        id: &SchemaObjectIdentifierWithArguments,
    ) -> Result<Properties> {
        let opts = DescribeFunctionOptions {
            name: id.clone(),
            ..Default::default()
        };
        let rows: Vec<PropertyRow> = self.client.validate_and_query(ctx, &opts).await?;
        Ok(rows.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::testing::{assert_opts_invalid_joined_errors, assert_opts_valid_and_sql_equals};
    use crate::validation::ValidationError;
    use snowflake_driver::ResultSet;

    fn id() -> SchemaObjectIdentifierWithArguments {
        SchemaObjectIdentifierWithArguments::new("db", "sc", "add", ["NUMBER", "NUMBER"])
    }

    #[test]
    fn create_sql_function() {
        let mut opts = CreateFunctionOptions::new(
            SchemaObjectIdentifier::new("db", "sc", "add"),
            vec![
                FunctionArgument::new("a", "NUMBER"),
                FunctionArgument {
                    default: Some(RawSql("1".into())),
                    ..FunctionArgument::new("b", "NUMBER")
                },
            ],
            "NUMBER",
            "a + b",
        );
        opts.secure = true;
        opts.return_results_behavior = Some(ReturnResultsBehavior::Immutable);
        opts.comment = Some("sum".into());
        assert_opts_valid_and_sql_equals(
            &opts,
            r#"CREATE SECURE FUNCTION "db"."sc"."add" ("a" NUMBER, "b" NUMBER DEFAULT 1) RETURNS NUMBER IMMUTABLE COMMENT = 'sum' AS 'a + b'"#,
        );
    }

    #[test]
    fn create_without_arguments_keeps_parentheses() {
        let mut opts = CreateFunctionOptions::new(
            SchemaObjectIdentifier::new("db", "sc", "pi"),
            vec![],
            "FLOAT",
            "3.14",
        );
        opts.null_input_behavior = Some(NullInputBehavior::ReturnsNullOnNullInput);
        assert_opts_valid_and_sql_equals(
            &opts,
            r#"CREATE FUNCTION "db"."sc"."pi" () RETURNS FLOAT RETURNS NULL ON NULL INPUT AS '3.14'"#,
        );
    }

    #[test]
    fn alter_by_signature() {
        let mut opts = AlterFunctionOptions::new(id());
        opts.set_secure = true;
        assert_opts_valid_and_sql_equals(&opts, r#"ALTER FUNCTION "db"."sc"."add"(NUMBER, NUMBER) SET SECURE"#);

        let mut opts = AlterFunctionOptions::new(id());
        opts.set_comment = Some("c".into());
        assert_opts_valid_and_sql_equals(
            &opts,
            r#"ALTER FUNCTION "db"."sc"."add"(NUMBER, NUMBER) SET COMMENT = 'c'"#,
        );

        let mut opts = AlterFunctionOptions::new(id());
        opts.set_secure = true;
        opts.unset_comment = true;
        assert_opts_invalid_joined_errors(
            &opts,
            &[ValidationError::ExactlyOneOf {
                struct_name: "AlterFunctionOptions",
                fields: vec![
                    "new_name",
                    "set_secure",
                    "unset_secure",
                    "set_comment",
                    "unset_comment",
                    "set_tag",
                    "unset_tag",
                ],
            }],
        );
    }

    #[test]
    fn drop_by_signature() {
        let mut opts = DropFunctionOptions::new(id());
        opts.if_exists = true;
        assert_opts_valid_and_sql_equals(&opts, r#"DROP FUNCTION IF EXISTS "db"."sc"."add"(NUMBER, NUMBER)"#);
    }

    #[test]
    fn arguments_column_is_parsed() {
        let (types, returns) = parse_function_arguments("ADD(NUMBER, [NUMBER]) RETURN NUMBER");
        assert_eq!(types, ["NUMBER", "NUMBER"]);
        assert_eq!(returns.as_deref(), Some("NUMBER"));

        let (types, returns) = parse_function_arguments("PI() RETURN FLOAT");
        assert!(types.is_empty());
        assert_eq!(returns.as_deref(), Some("FLOAT"));

        let (types, _) = parse_function_arguments("F(NUMBER(38,0), VARCHAR) RETURN TABLE (A NUMBER)");
        assert_eq!(types, ["NUMBER(38,0)", "VARCHAR"]);
    }

    #[test]
    fn rows_map_to_functions() {
        let rows = ResultSet::from_rows(
            ["created_on", "name", "schema_name", "catalog_name", "is_builtin", "arguments", "is_secure", "language"],
            [[
                Some("1700000000.000000000"),
                Some("ADD"),
                Some("SC"),
                Some("DB"),
                Some("N"),
                Some("ADD(NUMBER, NUMBER) RETURN NUMBER"),
                Some("Y"),
                Some("SQL"),
            ]],
        );
        let function: Function = rows.deserialize::<FunctionRow>().unwrap().remove(0).into();
        assert!(function.is_secure);
        assert!(!function.is_builtin);
        assert_eq!(
            function.id(),
            SchemaObjectIdentifierWithArguments::new("DB", "SC", "ADD", ["NUMBER", "NUMBER"])
        );
    }
}
