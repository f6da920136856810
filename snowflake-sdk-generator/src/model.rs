//! Family definitions read from `definitions/*.toml`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use heck::ToSnakeCase;
use serde::Deserialize;

/// One object family, ex. database roles.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Definition {
    /// Accessor type, ex. `DatabaseRoles`.
    pub interface: String,
    /// Output file stem, defaults to the snake-cased interface.
    #[serde(default)]
    pub file: Option<String>,
    pub identifier: String,
    #[serde(default)]
    pub doc: Option<String>,
    /// Paths imported by every generated file of the family.
    #[serde(default)]
    pub imports: Vec<String>,
    pub operations: Vec<Operation>,
    /// Clause groups nested under operation fields.
    #[serde(default)]
    pub structs: Vec<StructDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Operation {
    pub method: String,
    pub kind: OperationKind,
    pub options: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub rules: Vec<String>,
    pub fields: Vec<Field>,
    /// Raw row scanned by reads.
    #[serde(default)]
    pub row: Option<String>,
    /// User-facing record built from `row`.
    #[serde(default)]
    pub result: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Statement without rows.
    Exec,
    /// Rows mapped to records.
    Show,
    /// One row of the object named by its identifier.
    Describe,
    /// All rows of the object named by its identifier.
    DescribeRows,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructDef {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub rules: Vec<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Field {
    pub name: String,
    pub ty: String,
    /// Body of the `#[ddl(...)]` attribute.
    #[serde(default)]
    pub ddl: Option<String>,
    /// Body of the `#[validate(...)]` attribute.
    #[serde(default)]
    pub validate: Option<String>,
    /// Constructor argument of the request instead of a `with_` builder.
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub doc: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// `()` marker of a static keyword.
    Static,
    Required,
    Flag,
    Optional,
    List,
}

impl Field {
    pub fn shape(&self) -> FieldShape {
        let ty = self.ty.replace(' ', "");
        if ty == "()" {
            FieldShape::Static
        } else if self.required {
            FieldShape::Required
        } else if ty == "bool" {
            FieldShape::Flag
        } else if ty.starts_with("Option<") {
            FieldShape::Optional
        } else if ty.starts_with("Vec<") {
            FieldShape::List
        } else {
            FieldShape::Required
        }
    }

    /// `T` of `Option<T>`.
    pub fn option_inner(&self) -> Option<&str> {
        let ty = self.ty.trim();
        ty.strip_prefix("Option<")
            .and_then(|rest| rest.strip_suffix('>'))
            .map(str::trim)
    }
}

impl Definition {
    pub fn file_stem(&self) -> String {
        self.file
            .clone()
            .unwrap_or_else(|| self.interface.to_snake_case())
    }

    fn check(&self, path: &Path) -> Result<()> {
        for operation in &self.operations {
            if !operation.options.ends_with("Options") {
                bail!(
                    "{}: options struct `{}` must end with `Options`",
                    path.display(),
                    operation.options
                );
            }
            match operation.kind {
                OperationKind::Exec => {}
                OperationKind::Show | OperationKind::Describe | OperationKind::DescribeRows => {
                    if operation.row.is_none() || operation.result.is_none() {
                        bail!(
                            "{}: `{}` reads rows and needs `row` and `result`",
                            path.display(),
                            operation.method
                        );
                    }
                }
            }
            if matches!(operation.kind, OperationKind::Describe | OperationKind::DescribeRows)
                && !operation.fields.iter().any(|field| field.name == "name")
            {
                bail!(
                    "{}: `{}` needs a `name` field for the identifier",
                    path.display(),
                    operation.method
                );
            }
        }
        let mut names = self
            .operations
            .iter()
            .map(|operation| operation.options.as_str())
            .chain(self.structs.iter().map(|def| def.name.as_str()))
            .collect::<Vec<_>>();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
            bail!("{}: struct `{}` is defined twice", path.display(), pair[0]);
        }
        Ok(())
    }
}

impl Operation {
    /// `CreateDatabaseRoleOptions` -> `CreateDatabaseRoleRequest`.
    pub fn request(&self) -> String {
        let stem = self
            .options
            .strip_suffix("Options")
            .unwrap_or(&self.options);
        format!("{stem}Request")
    }

    /// Describes take the identifier directly.
    pub fn has_request(&self) -> bool {
        matches!(self.kind, OperationKind::Exec | OperationKind::Show)
    }
}

/// Every `*.toml` of `dir` in file-name order.
pub fn load_definitions(dir: &Path) -> Result<Vec<(PathBuf, Definition)>> {
    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("reading definitions from {}", dir.display()))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.retain(|path| path.extension().is_some_and(|extension| extension == "toml"));
    paths.sort();

    let mut definitions = Vec::with_capacity(paths.len());
    for path in paths {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let definition: Definition =
            toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        definition.check(&path)?;
        definitions.push((path, definition));
    }
    Ok(definitions)
}
