//! Rust sources of one family.
//!
//! Generated modules are written line by line so the output never depends on a formatter's line
//! width; they carry `rustfmt::skip` so `cargo fmt` leaves them as written. Test scaffolds are
//! filled in by hand afterwards and go through `quote` and `prettyplease` instead.

use anyhow::{anyhow, Context, Result};
use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Ident, Type, UseTree};

use crate::model::{Definition, Field, FieldShape, Operation, OperationKind, StructDef};

pub const HEADER: &str = "// Code generated by snowflake-sdk-generator. DO NOT EDIT.\n\n";

/// Inner attributes of every generated module.
const PRELUDE: &str = "#![allow(unused_imports)]\n#![cfg_attr(rustfmt, rustfmt::skip)]\n";

/// A file of the family together with its name relative to the output directory.
pub struct Output {
    pub file_name: String,
    pub contents: String,
}

fn parse_type(ty: &str) -> Result<Type> {
    syn::parse_str(ty).with_context(|| format!("invalid type `{ty}`"))
}

fn parse_ident(name: &str) -> Result<Ident> {
    syn::parse_str(name).with_context(|| format!("invalid identifier `{name}`"))
}

fn parse_tokens(text: &str) -> Result<TokenStream> {
    text.parse()
        .map_err(|error| anyhow!("invalid attribute body `{text}`: {error}"))
}

/// Checked type text, written as it appears in the definition.
fn type_text(text: &str) -> Result<&str> {
    let text = text.trim();
    parse_type(text)?;
    Ok(text)
}

fn ident_text(text: &str) -> Result<&str> {
    let text = text.trim();
    parse_ident(text)?;
    Ok(text)
}

fn attr_body(text: &str) -> Result<&str> {
    let text = text.trim();
    parse_tokens(text)?;
    Ok(text)
}

/// `r#in` -> `in`.
fn bare(name: &str) -> &str {
    name.trim_start_matches("r#")
}

fn is_primitive(ty: &str) -> bool {
    matches!(
        ty,
        "bool" | "u8" | "u16" | "u32" | "u64" | "usize" | "i8" | "i16" | "i32" | "i64" | "isize" | "f32" | "f64"
    )
}

/// Indented line writer for the generated modules.
struct Writer {
    out: String,
    depth: usize,
}

impl Writer {
    fn new(imports: &[String]) -> Result<Self> {
        let mut writer = Writer {
            out: format!("{HEADER}{PRELUDE}"),
            depth: 0,
        };
        if !imports.is_empty() {
            writer.blank();
        }
        for path in imports {
            let path = path.trim();
            syn::parse_str::<UseTree>(path).with_context(|| format!("invalid import `{path}`"))?;
            writer.line(format!("use {path};"));
        }
        Ok(writer)
    }

    fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.out.push_str("    ");
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self, text: impl AsRef<str>) {
        self.depth -= 1;
        self.line(text);
    }

    fn doc(&mut self, doc: Option<&str>) {
        for line in doc.into_iter().flat_map(str::lines) {
            if line.is_empty() {
                self.line("///");
            } else {
                self.line(format!("/// {line}"));
            }
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

fn family_imports(definition: &Definition, extra: &[String]) -> Vec<String> {
    definition.imports.iter().chain(extra).cloned().collect()
}

fn write_field(w: &mut Writer, field: &Field) -> Result<()> {
    let name = ident_text(&field.name)?;
    let ty = type_text(&field.ty)?;
    w.doc(field.doc.as_deref());
    if let Some(ddl) = &field.ddl {
        w.line(format!("#[ddl({})]", attr_body(ddl)?));
    }
    if let Some(validate) = &field.validate {
        w.line(format!("#[validate({})]", attr_body(validate)?));
    }
    let vis = match field.shape() {
        FieldShape::Static => "pub(crate)",
        _ => "pub",
    };
    w.line(format!("{vis} {name}: {ty},"));
    Ok(())
}

fn write_options_struct(
    w: &mut Writer,
    name: &str,
    doc: Option<&str>,
    rules: &[String],
    fields: &[Field],
) -> Result<()> {
    w.blank();
    w.doc(doc);
    w.line("#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]");
    for rule in rules {
        w.line(format!("#[validate({})]", attr_body(rule)?));
    }
    w.open(format!("pub struct {} {{", ident_text(name)?));
    for field in fields {
        write_field(w, field)?;
    }
    w.close("}");
    Ok(())
}

/// `<file>_gen.rs`: option structs in operation order, then the nested structs.
pub fn render_options(definition: &Definition) -> Result<String> {
    let mut w = Writer::new(&family_imports(
        definition,
        &["snowflake_sdk_derive::{ToSql, Validate}".to_string()],
    ))?;
    for operation in &definition.operations {
        write_options_struct(
            &mut w,
            &operation.options,
            operation.doc.as_deref(),
            &operation.rules,
            &operation.fields,
        )?;
    }
    for StructDef { name, doc, rules, fields } in &definition.structs {
        write_options_struct(&mut w, name, doc.as_deref(), rules, fields)?;
    }
    Ok(w.finish())
}

fn request_fields(operation: &Operation) -> impl Iterator<Item = &Field> {
    operation
        .fields
        .iter()
        .filter(|field| field.shape() != FieldShape::Static)
}

fn write_request(w: &mut Writer, operation: &Operation) -> Result<()> {
    let request = operation.request();
    let request = ident_text(&request)?;

    let mut fields = Vec::new();
    let mut params = Vec::new();
    let mut inits = Vec::new();
    let mut builders = Vec::new();
    for field in request_fields(operation) {
        let name = ident_text(&field.name)?;
        let ty = type_text(&field.ty)?;
        fields.push(format!("pub(crate) {name}: {ty},"));
        let signature = |arg: &str| format!("pub fn with_{}(mut self, {name}: {arg}) -> Self {{", bare(name));
        match field.shape() {
            FieldShape::Static => {}
            FieldShape::Required => {
                params.push(format!("{name}: {ty}"));
                inits.push(format!("{name},"));
            }
            FieldShape::Flag => {
                inits.push(format!("{name}: false,"));
                builders.push((signature("bool"), format!("self.{name} = {name};")));
            }
            FieldShape::Optional => {
                let inner = field
                    .option_inner()
                    .ok_or_else(|| anyhow!("`{}` is not an Option", field.name))?;
                let inner = type_text(inner)?;
                inits.push(format!("{name}: None,"));
                // Integer literals would not infer through `impl Into<u32>`.
                if is_primitive(inner) {
                    builders.push((signature(inner), format!("self.{name} = Some({name});")));
                } else {
                    builders.push((
                        signature(&format!("impl Into<{inner}>")),
                        format!("self.{name} = Some({name}.into());"),
                    ));
                }
            }
            FieldShape::List => {
                inits.push(format!("{name}: Vec::new(),"));
                builders.push((signature(ty), format!("self.{name} = {name};")));
            }
        }
    }

    w.blank();
    w.doc(operation.doc.as_deref());
    w.line("#[derive(Debug, Clone, PartialEq)]");
    w.open(format!("pub struct {request} {{"));
    for field in &fields {
        w.line(field);
    }
    w.close("}");

    w.blank();
    w.open(format!("impl {request} {{"));
    w.open(format!("pub fn new({}) -> Self {{", params.join(", ")));
    if inits.is_empty() {
        w.line("Self {}");
    } else {
        w.open("Self {");
        for init in &inits {
            w.line(init);
        }
        w.close("}");
    }
    w.close("}");
    for (signature, assign) in &builders {
        w.blank();
        w.open(signature);
        w.line(assign);
        w.line("self");
        w.close("}");
    }
    w.close("}");
    Ok(())
}

/// `<file>_dto_gen.rs`: one request with builders per exec and show operation.
pub fn render_dto(definition: &Definition) -> Result<String> {
    let stem = definition.file_stem();
    let mut w = Writer::new(&family_imports(definition, &[format!("super::{stem}_gen::*")]))?;
    for operation in definition.operations.iter().filter(|operation| operation.has_request()) {
        write_request(&mut w, operation)?;
    }
    Ok(w.finish())
}

fn write_to_opts(w: &mut Writer, operation: &Operation) -> Result<()> {
    let request = operation.request();
    let request = ident_text(&request)?;
    let options = ident_text(&operation.options)?;
    w.blank();
    w.open(format!("impl {request} {{"));
    w.open(format!("pub(crate) fn to_opts(&self) -> {options} {{"));
    w.open(format!("{options} {{"));
    for field in request_fields(operation) {
        let name = ident_text(&field.name)?;
        match field.shape() {
            FieldShape::Flag => w.line(format!("{name}: self.{name},")),
            _ => w.line(format!("{name}: self.{name}.clone(),")),
        }
    }
    w.line("..Default::default()");
    w.close("}");
    w.close("}");
    w.close("}");
    Ok(())
}

fn write_method(w: &mut Writer, definition: &Definition, operation: &Operation) -> Result<()> {
    let method = ident_text(&operation.method)?;
    let options = ident_text(&operation.options)?;
    let identifier = type_text(&definition.identifier)?;
    let request = operation.request();
    let request = ident_text(&request)?;
    let row = operation.row.as_deref().map(type_text).transpose()?;
    let result = operation.result.as_deref().map(type_text).transpose()?;

    w.blank();
    w.doc(operation.doc.as_deref());
    match (operation.kind, row, result) {
        (OperationKind::Exec, _, _) => {
            w.open(format!(
                "pub async fn {method}(&self, ctx: &Context, request: &{request}) -> Result<()> {{"
            ));
            w.line("self.client.validate_and_exec(ctx, &request.to_opts()).await");
        }
        (OperationKind::Show, Some(row), Some(result)) => {
            w.open(format!(
                "pub async fn {method}(&self, ctx: &Context, request: &{request}) -> Result<Vec<{result}>> {{"
            ));
            w.line(format!(
                "let rows: Vec<{row}> = self.client.validate_and_query(ctx, &request.to_opts()).await?;"
            ));
            w.line(format!("Ok(rows.into_iter().map({result}::from).collect())"));
        }
        (OperationKind::Describe, Some(row), Some(result)) => {
            w.open(format!(
                "pub async fn {method}(&self, ctx: &Context, id: &{identifier}) -> Result<{result}> {{"
            ));
            write_describe_opts(w, options);
            w.line(format!("let row: {row} = self.client.validate_and_query_one(ctx, &opts).await?;"));
            w.line("Ok(row.into())");
        }
        (OperationKind::DescribeRows, Some(row), Some(result)) => {
            w.open(format!(
                "pub async fn {method}(&self, ctx: &Context, id: &{identifier}) -> Result<Vec<{result}>> {{"
            ));
            write_describe_opts(w, options);
            w.line(format!("let rows: Vec<{row}> = self.client.validate_and_query(ctx, &opts).await?;"));
            w.line(format!("Ok(rows.into_iter().map({result}::from).collect())"));
        }
        _ => return Err(anyhow!("`{}` reads rows and needs `row` and `result`", operation.method)),
    }
    w.close("}");
    Ok(())
}

fn write_describe_opts(w: &mut Writer, options: &str) {
    w.open(format!("let opts = {options} {{"));
    w.line("name: id.clone(),");
    w.line("..Default::default()");
    w.close("};");
}

/// `<file>_impl_gen.rs`: `to_opts` mappers and the accessor with one method per operation.
pub fn render_impl(definition: &Definition) -> Result<String> {
    let stem = definition.file_stem();
    let mut w = Writer::new(&family_imports(
        definition,
        &[
            format!("super::{stem}_dto_gen::*"),
            format!("super::{stem}_ext::*"),
            format!("super::{stem}_gen::*"),
            "crate::client::Client".to_string(),
            "crate::context::Context".to_string(),
            "crate::error::Result".to_string(),
        ],
    ))?;

    for operation in definition.operations.iter().filter(|operation| operation.has_request()) {
        write_to_opts(&mut w, operation)?;
    }

    let interface = ident_text(&definition.interface)?;
    w.blank();
    w.doc(definition.doc.as_deref());
    w.open(format!("pub struct {interface}<'a> {{"));
    w.line("pub(crate) client: &'a Client,");
    w.close("}");

    w.blank();
    w.open(format!("impl<'a> {interface}<'a> {{"));
    w.open("pub(crate) fn new(client: &'a Client) -> Self {");
    w.line(format!("{interface} {{ client }}"));
    w.close("}");
    for operation in &definition.operations {
        write_method(&mut w, definition, operation)?;
    }
    w.close("}");
    Ok(w.finish())
}

/// Scaffolds: imports packed together, a blank line between the tests.
fn format_scaffold(uses: TokenStream, items: Vec<TokenStream>) -> Result<String> {
    let mut out = String::new();
    let uses: syn::File = syn::parse2(uses).context("scaffold imports do not parse")?;
    out.push_str(&prettyplease::unparse(&uses));
    for item in items {
        let file: syn::File = syn::parse2(item).context("scaffold item does not parse")?;
        out.push('\n');
        out.push_str(&prettyplease::unparse(&file));
    }
    Ok(out)
}

fn rule_test_name(operation: &Operation, rule: &str) -> String {
    let kind = rule
        .split(|c: char| c == '(' || c == ' ' || c == '=')
        .next()
        .unwrap_or("rule");
    format!("{}_{}", operation.method, kind.to_snake_case())
}

/// `<file>_gen_test.rs`: a baseline and one case per validation rule, bodies left to fill in.
pub fn render_unit_scaffold(definition: &Definition) -> Result<String> {
    let stem = parse_ident(&definition.file_stem())?;
    let mut tests = Vec::new();
    for operation in &definition.operations {
        let options = parse_ident(&operation.options)?;
        let baseline = format_ident!("{}_default_options", operation.method);
        tests.push(quote! {
            #[test]
            fn #baseline() {
                let opts = #options::default();
                let _ = opts;
                todo!("assert the statement rendered for minimal options")
            }
        });
        let mut seen = Vec::new();
        for rule in &operation.rules {
            let name = rule_test_name(operation, rule);
            if seen.contains(&name) {
                continue;
            }
            let test = format_ident!("{}", name);
            let message = format!("assert the errors of `{rule}`");
            tests.push(quote! {
                #[test]
                fn #test() {
                    todo!(#message)
                }
            });
            seen.push(name);
        }
    }
    let uses = quote! {
        use super::#stem::*;
        use crate::sdk::testing::{assert_opts_invalid_joined_errors, assert_opts_valid_and_sql_equals};
        use crate::validation::ValidationError;
    };
    format_scaffold(uses, tests)
}

/// Integration scaffold covering the happy path of every operation against a live account.
pub fn render_integration_scaffold(definition: &Definition) -> Result<String> {
    let stem = parse_ident(&definition.file_stem())?;
    let tests = definition
        .operations
        .iter()
        .map(|operation| {
            let test = format_ident!("{}_{}", bare(&definition.file_stem()), operation.method);
            let message = format!("run `{}` against the test database", operation.method);
            quote! {
                #[tokio::test]
                #[ignore = "needs a Snowflake account"]
                async fn #test() {
                    let client = Client::from_env().await.unwrap();
                    let _ = &client;
                    todo!(#message)
                }
            }
        })
        .collect::<Vec<_>>();
    let uses = quote! {
        use snowflake_sdk::sdk::#stem::*;
        use snowflake_sdk::{Client, Context};
    };
    format_scaffold(uses, tests)
}

/// Every file the family owns; scaffolds are returned separately since they are only written once.
pub fn render_family(definition: &Definition) -> Result<Vec<Output>> {
    let stem = definition.file_stem();
    Ok(vec![
        Output {
            file_name: format!("{stem}_gen.rs"),
            contents: render_options(definition)?,
        },
        Output {
            file_name: format!("{stem}_dto_gen.rs"),
            contents: render_dto(definition)?,
        },
        Output {
            file_name: format!("{stem}_impl_gen.rs"),
            contents: render_impl(definition)?,
        },
    ])
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::model::load_definitions;

    fn definition() -> Definition {
        toml::from_str(
            r#"
            interface = "DatabaseRoles"
            identifier = "DatabaseObjectIdentifier"
            imports = ["crate::identifier::DatabaseObjectIdentifier"]

            [[operations]]
            method = "create"
            kind = "exec"
            options = "CreateDatabaseRoleOptions"
            rules = ["conflicting(or_replace, if_not_exists)"]
            fields = [
                { name = "create", ty = "()", ddl = 'static, sql = "CREATE"' },
                { name = "or_replace", ty = "bool", ddl = 'keyword, sql = "OR REPLACE"' },
                { name = "database_role", ty = "()", ddl = 'static, sql = "DATABASE ROLE"' },
                { name = "if_not_exists", ty = "bool", ddl = 'keyword, sql = "IF NOT EXISTS"' },
                { name = "name", ty = "DatabaseObjectIdentifier", ddl = "identifier", validate = "identifier", required = true },
                { name = "comment", ty = "Option<String>", ddl = 'parameter, single_quotes, sql = "COMMENT"' },
            ]

            [[operations]]
            method = "describe"
            kind = "describe"
            options = "DescribeDatabaseRoleOptions"
            row = "DatabaseRoleDetailsRow"
            result = "DatabaseRoleDetails"
            fields = [
                { name = "describe", ty = "()", ddl = 'static, sql = "DESCRIBE DATABASE ROLE"' },
                { name = "name", ty = "DatabaseObjectIdentifier", ddl = "identifier", validate = "identifier", required = true },
            ]
            "#,
        )
        .unwrap()
    }

    #[test]
    fn options_keep_attributes_in_order() {
        let text = render_options(&definition()).unwrap();
        assert!(text.starts_with(HEADER));
        assert!(text.contains("#![cfg_attr(rustfmt, rustfmt::skip)]\n"));
        assert!(text.contains("#[validate(conflicting(or_replace, if_not_exists))]"));
        assert!(text.contains("pub(crate) create: (),"));
        let or_replace = text.find("pub or_replace: bool").unwrap();
        let comment = text.find("pub comment: Option<String>").unwrap();
        assert!(or_replace < comment);
    }

    #[test]
    fn requests_skip_static_fields_and_describes() {
        let text = render_dto(&definition()).unwrap();
        assert!(text.contains("pub struct CreateDatabaseRoleRequest"));
        assert!(text.contains("pub fn new(name: DatabaseObjectIdentifier) -> Self"));
        assert!(text.contains("pub fn with_comment(mut self, comment: impl Into<String>) -> Self"));
        assert!(!text.contains("create: ()"));
        assert!(!text.contains("DescribeDatabaseRoleRequest"));
    }

    #[test]
    fn impl_maps_requests_and_reads_rows() {
        let text = render_impl(&definition()).unwrap();
        assert!(text.contains("pub(crate) fn to_opts(&self) -> CreateDatabaseRoleOptions"));
        assert!(text.contains("pub struct DatabaseRoles<'a>"));
        assert!(text.contains("validate_and_query_one(ctx, &opts)"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let first = render_family(&definition()).unwrap();
        let second = render_family(&definition()).unwrap();
        let names = first.iter().map(|output| output.file_name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["database_roles_gen.rs", "database_roles_dto_gen.rs", "database_roles_impl_gen.rs"]);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.contents, b.contents);
        }
    }

    #[test]
    fn scaffold_has_a_case_per_rule() {
        let text = render_unit_scaffold(&definition()).unwrap();
        assert!(text.contains("fn create_default_options()"));
        assert!(text.contains("fn create_conflicting()"));
        assert!(text.contains("fn describe_default_options()"));
    }

    #[test]
    fn long_lines_are_not_wrapped() {
        let text = render_impl(&definition()).unwrap();
        assert!(text.contains(
            "    pub async fn create(&self, ctx: &Context, request: &CreateDatabaseRoleRequest) -> Result<()> {\n"
        ));
        assert!(text.contains("use crate::identifier::DatabaseObjectIdentifier;\n"));
        // One blank line between methods, none between fields.
        assert!(text.contains("        }\n\n    pub async fn describe("));
        assert!(!text.contains("\n\n\n"));
        let dto = render_dto(&definition()).unwrap();
        assert!(dto.contains("    pub(crate) or_replace: bool,\n    pub(crate) if_not_exists: bool,\n"));
    }

    #[test]
    fn checked_in_families_match_their_definitions() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let definitions = load_definitions(&root.join("definitions")).unwrap();
        assert!(!definitions.is_empty());
        for (path, definition) in &definitions {
            for output in render_family(definition).unwrap() {
                let target = root.join("../src/sdk").join(&output.file_name);
                let committed = std::fs::read_to_string(&target).unwrap();
                assert_eq!(
                    committed,
                    output.contents,
                    "{} is out of date with {}, run the generator",
                    target.display(),
                    path.display()
                );
            }
        }
    }
}
