//! Pre-flight checks of option structs.
//!
//! Structs derive [`Validate`](snowflake_sdk_derive::Validate); nested option groups are checked
//! first, then the struct's own rules. Every failure is collected, never just the first.

use std::fmt;

use crate::identifier::ObjectIdentifier;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid object identifier in {struct_name}.{field}")]
    InvalidObjectIdentifier {
        struct_name: &'static str,
        field: &'static str,
    },
    #[error("exactly one of {struct_name} fields {fields:?} must be set")]
    ExactlyOneOf {
        struct_name: &'static str,
        fields: Vec<&'static str>,
    },
    #[error("at least one of {struct_name} fields {fields:?} must be set")]
    AtLeastOneOf {
        struct_name: &'static str,
        fields: Vec<&'static str>,
    },
    #[error("{struct_name} fields {fields:?} are incompatible and cannot be set at the same time")]
    Conflicting {
        struct_name: &'static str,
        fields: Vec<&'static str>,
    },
    #[error("{struct_name}.{field} must be in the same database as the object")]
    DifferentDatabase {
        struct_name: &'static str,
        field: &'static str,
    },
    #[error("{struct_name}.{field} must not be empty")]
    Empty {
        struct_name: &'static str,
        field: &'static str,
    },
    #[error("{struct_name}: {message}")]
    Invalid {
        struct_name: &'static str,
        message: String,
    },
}

/// Every failed rule of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    pub fn has_invalid_identifier(&self) -> bool {
        self.iter()
            .any(|error| matches!(error, ValidationError::InvalidObjectIdentifier { .. }))
    }

    pub fn has_different_database(&self) -> bool {
        self.iter()
            .any(|error| matches!(error, ValidationError::DifferentDatabase { .. }))
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

pub trait Validate {
    fn validate_into(&self, errors: &mut ValidationErrors);

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        self.validate_into(&mut errors);
        errors.into_result()
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate_into(&self, errors: &mut ValidationErrors) {
        if let Some(value) = self {
            value.validate_into(errors);
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate_into(&self, errors: &mut ValidationErrors) {
        for value in self {
            value.validate_into(errors);
        }
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate_into(&self, errors: &mut ValidationErrors) {
        (**self).validate_into(errors);
    }
}

pub fn valid_identifier<T: ObjectIdentifier>(
    errors: &mut ValidationErrors,
    struct_name: &'static str,
    field: &'static str,
    id: &T,
) {
    if !id.is_valid() {
        errors.push(ValidationError::InvalidObjectIdentifier { struct_name, field });
    }
}

pub fn valid_identifier_if_set<T: ObjectIdentifier>(
    errors: &mut ValidationErrors,
    struct_name: &'static str,
    field: &'static str,
    id: &Option<T>,
) {
    if let Some(id) = id {
        valid_identifier(errors, struct_name, field, id);
    }
}

pub fn exactly_one_value_set(
    errors: &mut ValidationErrors,
    struct_name: &'static str,
    fields: &[&'static str],
    set: &[bool],
) {
    if set.iter().filter(|set| **set).count() != 1 {
        errors.push(ValidationError::ExactlyOneOf {
            struct_name,
            fields: fields.to_vec(),
        });
    }
}

pub fn at_least_one_value_set(
    errors: &mut ValidationErrors,
    struct_name: &'static str,
    fields: &[&'static str],
    set: &[bool],
) {
    if !set.iter().any(|set| *set) {
        errors.push(ValidationError::AtLeastOneOf {
            struct_name,
            fields: fields.to_vec(),
        });
    }
}

pub fn conflicting_fields(
    errors: &mut ValidationErrors,
    struct_name: &'static str,
    fields: &[&'static str],
    set: &[bool],
) {
    if set.iter().filter(|set| **set).count() > 1 {
        errors.push(ValidationError::Conflicting {
            struct_name,
            fields: fields.to_vec(),
        });
    }
}

/// `renamed` must live in `database`, renames never cross databases.
pub fn same_database(
    errors: &mut ValidationErrors,
    struct_name: &'static str,
    field: &'static str,
    database: &str,
    renamed: &str,
) {
    if database != renamed {
        errors.push(ValidationError::DifferentDatabase { struct_name, field });
    }
}

pub fn not_empty<T>(
    errors: &mut ValidationErrors,
    struct_name: &'static str,
    field: &'static str,
    values: &[T],
) {
    if values.is_empty() {
        errors.push(ValidationError::Empty { struct_name, field });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::AccountObjectIdentifier;

    #[test]
    fn rules_collect_every_failure() {
        let mut errors = ValidationErrors::default();
        exactly_one_value_set(&mut errors, "AlterRoleOptions", &["set", "unset"], &[false, false]);
        conflicting_fields(
            &mut errors,
            "CreateRoleOptions",
            &["or_replace", "if_not_exists"],
            &[true, true],
        );
        at_least_one_value_set(&mut errors, "RoleSet", &["comment"], &[true]);
        valid_identifier(&mut errors, "CreateRoleOptions", "name", &AccountObjectIdentifier::new(""));
        assert_eq!(errors.len(), 3);
        assert!(errors.has_invalid_identifier());
        assert!(!errors.has_different_database());

        let message = errors.to_string();
        assert!(message.contains("exactly one of AlterRoleOptions fields [\"set\", \"unset\"] must be set"));
        assert!(message.contains("or_replace"));
        assert!(message.contains("if_not_exists"));
    }

    #[test]
    fn exactly_one_rejects_two() {
        let mut errors = ValidationErrors::default();
        exactly_one_value_set(&mut errors, "S", &["a", "b"], &[true, true]);
        exactly_one_value_set(&mut errors, "S", &["a", "b"], &[false, true]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn renames_stay_in_their_database() {
        let mut errors = ValidationErrors::default();
        same_database(&mut errors, "AlterDatabaseRoleOptions", "rename", "DB1", "DB1");
        assert!(errors.is_empty());
        same_database(&mut errors, "AlterDatabaseRoleOptions", "rename", "DB1", "DB2");
        assert!(errors.has_different_database());
    }
}
