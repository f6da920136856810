/// Rows of a finished statement, every partition already collected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    data: Vec<Vec<Option<String>>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, data: Vec<Vec<Option<String>>>) -> Self {
        ResultSet { columns, data }
    }

    /// Builds a result set from string literals, handy for canned responses.
    pub fn from_rows<C, R, V>(columns: C, rows: R) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator<Item = V>,
        V: IntoIterator<Item = Option<&'static str>>,
    {
        ResultSet {
            columns: columns.into_iter().map(Into::into).collect(),
            data: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| cell.map(String::from)).collect())
                .collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.data.iter().map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    /// Scans every row into `T`, preserving order.
    pub fn deserialize<T: SnowflakeDeserialize>(&self) -> Result<Vec<T>, DeserializeError> {
        self.rows().map(|row| T::snowflake_deserialize(&row)).collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [Option<String>],
}

impl<'a> Row<'a> {
    /// Cell of `column`, matched case-insensitively. `None` for NULL or a missing column.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = self
            .columns
            .iter()
            .position(|name| name.eq_ignore_ascii_case(column))?;
        self.values.get(index)?.as_deref()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns
            .iter()
            .any(|name| name.eq_ignore_ascii_case(column))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Option<&'a str>)> {
        self.columns
            .iter()
            .zip(self.values.iter())
            .map(|(column, value)| (column.as_str(), value.as_deref()))
    }
}

pub trait SnowflakeDeserialize: Sized {
    fn snowflake_deserialize(row: &Row<'_>) -> Result<Self, DeserializeError>;
}

#[derive(thiserror::Error, Debug)]
pub enum DeserializeError {
    #[error("failed to deserialize column `{column}` from {value:?}: {error}")]
    Column {
        column: &'static str,
        value: Option<String>,
        error: anyhow::Error,
    },
    #[error("column `{column}` is NULL or missing")]
    Null { column: &'static str },
    #[error("failed to deserialize column `{column}` as json: {error}")]
    Json {
        column: &'static str,
        error: serde_json::Error,
    },
}

impl DeserializeError {
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Column { column, .. } | Self::Null { column } | Self::Json { column, .. } => {
                column
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{deserialize_cell, deserialize_json_cell};

    struct RoleRow {
        name: String,
        granted_to_roles: i32,
        comment: Option<String>,
        tags: Vec<String>,
    }

    impl SnowflakeDeserialize for RoleRow {
        fn snowflake_deserialize(row: &Row<'_>) -> Result<Self, DeserializeError> {
            Ok(RoleRow {
                name: deserialize_cell(row, "name")?,
                granted_to_roles: deserialize_cell(row, "granted_to_roles")?,
                comment: deserialize_cell(row, "comment")?,
                tags: deserialize_json_cell::<Option<Vec<String>>>(row, "tags")?.unwrap_or_default(),
            })
        }
    }

    #[test]
    fn rows_are_read_by_column_name() {
        let result = ResultSet::from_rows(
            ["NAME", "granted_to_roles", "comment"],
            [
                [Some("ANALYST"), Some("2"), None],
                [Some("LOADER"), Some("0"), Some("etl")],
            ],
        );
        let rows = result.deserialize::<RoleRow>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "ANALYST");
        assert_eq!(rows[0].granted_to_roles, 2);
        assert_eq!(rows[0].comment, None);
        assert!(rows[0].tags.is_empty());
        assert_eq!(rows[1].comment.as_deref(), Some("etl"));
    }

    #[test]
    fn failures_name_the_column() {
        let result = ResultSet::from_rows(
            ["name", "granted_to_roles"],
            [[Some("ANALYST"), Some("many")]],
        );
        let error = result.deserialize::<RoleRow>().err().unwrap();
        assert_eq!(error.column(), "granted_to_roles");

        let result = ResultSet::from_rows(["granted_to_roles"], [[Some("1")]]);
        let error = result.deserialize::<RoleRow>().err().unwrap();
        assert!(matches!(error, DeserializeError::Null { column: "name" }));
    }
}
