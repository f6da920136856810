//! Rendering of option structs into SQL text.
//!
//! Option structs derive [`ToSql`](snowflake_sdk_derive::ToSql); every `#[ddl(...)]` field calls one
//! of the [`SqlBuilder`] methods below in declaration order, and the collected clauses are joined
//! with single spaces.

use crate::error::Error;
use crate::validation::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quotes {
    #[default]
    None,
    Single,
    Double,
}

impl Quotes {
    pub fn write(self, out: &mut String, value: &str) {
        match self {
            Quotes::None => out.push_str(value),
            Quotes::Single => {
                out.push('\'');
                out.push_str(&value.replace('\\', "\\\\").replace('\'', "''"));
                out.push('\'');
            }
            Quotes::Double => {
                out.push('"');
                out.push_str(&value.replace('"', "\"\""));
                out.push('"');
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterEquals {
    Equals,
    Arrow,
    None,
}

#[derive(Debug, Clone, Copy)]
pub struct ParameterOptions {
    pub quotes: Quotes,
    pub equals: ParameterEquals,
    pub parentheses: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSeparator {
    Comma,
    Space,
}

impl ListSeparator {
    fn as_str(self) -> &'static str {
        match self {
            ListSeparator::Comma => ", ",
            ListSeparator::Space => " ",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    pub quotes: Quotes,
    pub separator: ListSeparator,
    pub parentheses: bool,
    /// Emit `()` even for an empty list.
    pub must_parentheses: bool,
    pub equals: bool,
}

/// A value that can appear in a rendered statement.
pub trait SqlValue {
    /// Rendered by `parameter`, `identifier` and `list` clauses.
    fn is_present(&self) -> bool {
        true
    }

    /// Non-zero, as counted by validation rules.
    fn is_set(&self) -> bool {
        self.is_present()
    }

    /// Rendered by `keyword` clauses.
    fn is_truthy(&self) -> bool {
        self.is_set()
    }

    /// Keyword clauses of flags emit only their text, never the value.
    fn is_flag(&self) -> bool {
        false
    }

    fn write_value(&self, out: &mut String, quotes: Quotes);

    fn write_items(&self, out: &mut String, _separator: &str, quotes: Quotes) {
        self.write_value(out, quotes);
    }
}

/// Root of a statement, or a clause group nested under another one.
pub trait ToSql {
    fn write_sql(&self, builder: &mut SqlBuilder);

    fn to_sql(&self) -> String {
        let mut builder = SqlBuilder::default();
        self.write_sql(&mut builder);
        builder.finish()
    }
}

#[derive(Debug, Default)]
pub struct SqlBuilder {
    clauses: Vec<String>,
}

impl SqlBuilder {
    pub fn static_keyword(&mut self, sql: &str) {
        self.push(sql.to_string());
    }

    pub fn keyword<V: SqlValue + ?Sized>(&mut self, sql: &str, value: &V, quotes: Quotes) {
        if !value.is_truthy() {
            return;
        }
        let mut clause = sql.to_string();
        if !value.is_flag() {
            let mut rendered = String::new();
            value.write_value(&mut rendered, quotes);
            append(&mut clause, &rendered);
        }
        self.push(clause);
    }

    pub fn parameter<V: SqlValue + ?Sized>(&mut self, sql: &str, value: &V, options: ParameterOptions) {
        if !value.is_present() {
            return;
        }
        let mut clause = sql.to_string();
        if !sql.is_empty() {
            match options.equals {
                ParameterEquals::Equals => append(&mut clause, "="),
                ParameterEquals::Arrow => append(&mut clause, "=>"),
                ParameterEquals::None => {}
            }
        }
        let mut rendered = String::new();
        if options.parentheses {
            rendered.push('(');
        }
        value.write_value(&mut rendered, options.quotes);
        if options.parentheses {
            rendered.push(')');
        }
        append(&mut clause, &rendered);
        self.push(clause);
    }

    pub fn identifier<V: SqlValue + ?Sized>(&mut self, sql: &str, value: &V, equals: bool) {
        if !value.is_present() {
            return;
        }
        let mut clause = sql.to_string();
        if equals {
            append(&mut clause, "=");
        }
        let mut rendered = String::new();
        value.write_value(&mut rendered, Quotes::None);
        append(&mut clause, &rendered);
        self.push(clause);
    }

    pub fn list<V: SqlValue + ?Sized>(&mut self, sql: &str, value: &V, options: ListOptions) {
        let present = value.is_present();
        if !present && !options.must_parentheses {
            return;
        }
        let mut clause = sql.to_string();
        if options.equals {
            append(&mut clause, "=");
        }
        let mut rendered = String::new();
        let parentheses = options.parentheses || options.must_parentheses;
        if parentheses {
            rendered.push('(');
        }
        if present {
            value.write_items(&mut rendered, options.separator.as_str(), options.quotes);
        }
        if parentheses {
            rendered.push(')');
        }
        append(&mut clause, &rendered);
        self.push(clause);
    }

    pub fn into_clauses(self) -> Vec<String> {
        self.clauses
    }

    pub fn finish(self) -> String {
        self.clauses.join(" ")
    }

    fn push(&mut self, clause: String) {
        if !clause.is_empty() {
            self.clauses.push(clause);
        }
    }
}

fn append(clause: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !clause.is_empty() {
        clause.push(' ');
    }
    clause.push_str(text);
}

/// Validates `opts` and renders it, `None` is rejected as [`Error::NilOptions`].
pub fn validate_and_build<T: ToSql + Validate>(opts: Option<&T>) -> Result<String, Error> {
    let opts = opts.ok_or(Error::NilOptions)?;
    opts.validate()?;
    Ok(opts.to_sql())
}

impl SqlValue for bool {
    fn is_set(&self) -> bool {
        *self
    }
    fn is_flag(&self) -> bool {
        true
    }
    fn write_value(&self, out: &mut String, quotes: Quotes) {
        quotes.write(out, if *self { "true" } else { "false" });
    }
}

impl SqlValue for str {
    fn is_set(&self) -> bool {
        !self.is_empty()
    }
    fn write_value(&self, out: &mut String, quotes: Quotes) {
        quotes.write(out, self);
    }
}

impl SqlValue for String {
    fn is_set(&self) -> bool {
        !self.is_empty()
    }
    fn write_value(&self, out: &mut String, quotes: Quotes) {
        quotes.write(out, self);
    }
}

macro_rules! impl_sql_value_number {
    ($($ty:ty),*) => {
        $(
            impl SqlValue for $ty {
                fn is_set(&self) -> bool {
                    *self != (0 as $ty)
                }
                fn write_value(&self, out: &mut String, quotes: Quotes) {
                    quotes.write(out, &self.to_string());
                }
            }
        )*
    };
}

impl_sql_value_number!(u8, u16, u32, u64, usize, i8, i16, i32, i64, f32, f64);

impl<T: SqlValue> SqlValue for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
    fn is_set(&self) -> bool {
        self.is_some()
    }
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(SqlValue::is_truthy)
    }
    fn is_flag(&self) -> bool {
        self.as_ref().is_some_and(SqlValue::is_flag)
    }
    fn write_value(&self, out: &mut String, quotes: Quotes) {
        if let Some(value) = self {
            value.write_value(out, quotes);
        }
    }
    fn write_items(&self, out: &mut String, separator: &str, quotes: Quotes) {
        if let Some(value) = self {
            value.write_items(out, separator, quotes);
        }
    }
}

impl<T: SqlValue> SqlValue for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
    fn write_value(&self, out: &mut String, quotes: Quotes) {
        self.write_items(out, ", ", quotes);
    }
    fn write_items(&self, out: &mut String, separator: &str, quotes: Quotes) {
        for (index, item) in self.iter().enumerate() {
            if index > 0 {
                out.push_str(separator);
            }
            item.write_value(out, quotes);
        }
    }
}

impl<T: SqlValue + ?Sized> SqlValue for Box<T> {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
    fn is_set(&self) -> bool {
        (**self).is_set()
    }
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
    fn is_flag(&self) -> bool {
        (**self).is_flag()
    }
    fn write_value(&self, out: &mut String, quotes: Quotes) {
        (**self).write_value(out, quotes);
    }
    fn write_items(&self, out: &mut String, separator: &str, quotes: Quotes) {
        (**self).write_items(out, separator, quotes);
    }
}

/// Raw SQL text, rendered as-is regardless of quoting, ex. a function body expression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSql(pub String);

impl From<&str> for RawSql {
    fn from(sql: &str) -> Self {
        RawSql(sql.to_string())
    }
}

impl From<String> for RawSql {
    fn from(sql: String) -> Self {
        RawSql(sql)
    }
}

impl SqlValue for RawSql {
    fn is_set(&self) -> bool {
        !self.0.is_empty()
    }
    fn write_value(&self, out: &mut String, _quotes: Quotes) {
        out.push_str(&self.0);
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariantError {
    pub kind: &'static str,
    pub value: String,
}

/// Declares an enum of SQL keywords.
///
/// ```ignore
/// sql_enum! {
///     pub enum WarehouseType {
///         Standard => "STANDARD",
///         SnowparkOptimized => "SNOWPARK-OPTIMIZED" | "SNOWPARK_OPTIMIZED",
///     }
/// }
/// ```
///
/// The first spelling is rendered, every spelling is accepted when parsing (case-insensitively).
#[macro_export]
macro_rules! sql_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $sql:literal $(| $alias:literal)*
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $sql,)*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::sql::UnknownVariantError;
            fn from_str(value: &str) -> ::std::result::Result<Self, Self::Err> {
                let value = value.trim();
                $(
                    if value.eq_ignore_ascii_case($sql) $(|| value.eq_ignore_ascii_case($alias))* {
                        return Ok($name::$variant);
                    }
                )*
                Err($crate::sql::UnknownVariantError {
                    kind: stringify!($name),
                    value: value.to_string(),
                })
            }
        }

        impl $crate::sql::SqlValue for $name {
            fn write_value(&self, out: &mut ::std::string::String, quotes: $crate::sql::Quotes) {
                quotes.write(out, self.as_str());
            }
        }

        impl $crate::driver::DeserializeFromStr for $name {
            type Error = $crate::sql::UnknownVariantError;
            fn deserialize_from_str(value: &str) -> ::std::result::Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMETER: ParameterOptions = ParameterOptions {
        quotes: Quotes::None,
        equals: ParameterEquals::Equals,
        parentheses: false,
    };

    const LIST: ListOptions = ListOptions {
        quotes: Quotes::None,
        separator: ListSeparator::Comma,
        parentheses: true,
        must_parentheses: false,
        equals: false,
    };

    crate::sql_enum! {
        enum Frequency {
            Monthly => "MONTHLY",
            Never => "NEVER",
        }
    }

    #[test]
    fn single_quotes_escape_quotes_and_backslashes() {
        let mut out = String::new();
        Quotes::Single.write(&mut out, r"it's C:\tmp");
        assert_eq!(out, r"'it''s C:\\tmp'");

        let mut out = String::new();
        Quotes::Double.write(&mut out, "a\"b");
        assert_eq!(out, "\"a\"\"b\"");
    }

    #[test]
    fn keyword_skips_zero_values() {
        let mut builder = SqlBuilder::default();
        builder.keyword("OR REPLACE", &false, Quotes::None);
        builder.keyword("SECURE", &Some(false), Quotes::None);
        builder.keyword("IF EXISTS", &true, Quotes::None);
        builder.keyword("FREQUENCY", &Some(Frequency::Monthly), Quotes::None);
        builder.keyword("", &String::new(), Quotes::Single);
        assert_eq!(builder.finish(), "IF EXISTS FREQUENCY MONTHLY");
    }

    #[test]
    fn parameter_renders_some_false_and_zero() {
        let mut builder = SqlBuilder::default();
        builder.parameter("AUTO_RESUME", &Some(false), PARAMETER);
        builder.parameter("MAX_CLUSTER_COUNT", &Some(0u32), PARAMETER);
        builder.parameter("COMMENT", &None::<String>, PARAMETER);
        assert_eq!(builder.finish(), "AUTO_RESUME = false MAX_CLUSTER_COUNT = 0");
    }

    #[test]
    fn parameter_modifiers() {
        let mut builder = SqlBuilder::default();
        builder.parameter(
            "AT",
            &Some("2024-01-01".to_string()),
            ParameterOptions {
                quotes: Quotes::Single,
                equals: ParameterEquals::Arrow,
                parentheses: true,
            },
        );
        builder.parameter(
            "WITH",
            &Some(1u32),
            ParameterOptions {
                equals: ParameterEquals::None,
                ..PARAMETER
            },
        );
        assert_eq!(builder.finish(), "AT => ('2024-01-01') WITH 1");
    }

    #[test]
    fn lists_join_items() {
        let mut builder = SqlBuilder::default();
        builder.list("ALLOWED_VALUES", &vec!["a".to_string(), "b".to_string()], ListOptions {
            quotes: Quotes::Single,
            parentheses: false,
            ..LIST
        });
        builder.list("COLUMNS", &Vec::<String>::new(), LIST);
        builder.list("ARGS", &Vec::<String>::new(), ListOptions {
            must_parentheses: true,
            ..LIST
        });
        builder.list("", &vec![1u32, 2], ListOptions {
            separator: ListSeparator::Space,
            ..LIST
        });
        assert_eq!(builder.finish(), "ALLOWED_VALUES 'a', 'b' ARGS () (1 2)");
    }

    #[test]
    fn sql_enum_parses_any_case() {
        assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!(Frequency::Never.to_string(), "NEVER");
        let error = "daily".parse::<Frequency>().unwrap_err();
        assert_eq!(error.to_string(), "unknown Frequency `daily`");
        assert_eq!(Frequency::ALL.len(), 2);
    }
}
