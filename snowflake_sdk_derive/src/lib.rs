extern crate proc_macro;

use proc_macro::TokenStream;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod deserialize;
mod to_sql;
mod validate;

/// Implements `ToSql` and `SqlValue` for an option struct.
///
/// Every field carrying `#[ddl(...)]` is rendered in declaration order:
///
/// - `#[ddl(static, sql = "CREATE")]` always emits `sql`
/// - `#[ddl(keyword, sql = "OR REPLACE")]` emits `sql` (followed by the value unless it is a flag) when the value is non-zero
/// - `#[ddl(parameter, single_quotes, sql = "COMMENT")]` emits `COMMENT = 'value'` when the value is set;
///   modifiers `double_quotes`, `no_equals`, `arrow_equals`, `parentheses`, `must_parentheses`
/// - `#[ddl(identifier, sql = "RENAME TO")]` emits the fully-qualified name, `equals` adds `=`
/// - `#[ddl(list, sql = "TAG")]` emits `TAG (a, b)`; modifiers `no_parentheses`, `no_comma`, `equals`,
///   `must_parentheses`, `single_quotes`, `double_quotes`
#[proc_macro_derive(ToSql, attributes(ddl))]
pub fn to_sql_derive(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = parse_macro_input!(input);
    to_sql::impl_to_sql(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Implements `Validate` from `#[validate(...)]` rules.
///
/// Struct rules: `exactly_one(a, b)`, `at_least_one(a, b)`, `conflicting(a, b)`, `custom = "path"`.
/// Field rules: `identifier`, `identifier_if_set`, `nested`.
#[proc_macro_derive(Validate, attributes(validate))]
pub fn validate_derive(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = parse_macro_input!(input);
    validate::impl_validate(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Implements `SnowflakeDeserialize` for a struct, scanning each field from the column of the same name.
///
/// Use `#[snowflake(rename = "column")]` for a different column and `#[snowflake(json)]` for JSON cells.
#[proc_macro_derive(SnowflakeDeserialize, attributes(snowflake))]
pub fn snowflake_deserialize_derive(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = parse_macro_input!(input);
    deserialize::impl_snowflake_deserialize(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn named_fields(ast: &DeriveInput) -> syn::Result<&syn::FieldsNamed> {
    match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(fields),
            _ => Err(syn::Error::new_spanned(&ast.ident, "named fields only")),
        },
        Data::Enum(_) => Err(syn::Error::new_spanned(
            &ast.ident,
            "this macro can only be derived in a struct, not enum",
        )),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &ast.ident,
            "this macro can only be derived in a struct, not union",
        )),
    }
}

/// Field name without a raw identifier prefix.
fn field_name(ident: &syn::Ident) -> String {
    let name = ident.to_string();
    name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
}
