use crate::error::Error;
use crate::sql::{validate_and_build, ToSql};
use crate::validation::{Validate, ValidationError};

#[track_caller]
pub(crate) fn assert_opts_valid_and_sql_equals<T: ToSql + Validate>(opts: &T, expected: &str) {
    match validate_and_build(Some(opts)) {
        Ok(sql) => assert_eq!(sql, expected),
        Err(error) => panic!("expected valid options, got: {error}"),
    }
}

#[track_caller]
pub(crate) fn assert_opts_invalid_joined_errors<T: ToSql + Validate>(
    opts: &T,
    expected: &[ValidationError],
) {
    match validate_and_build(Some(opts)) {
        Err(Error::Validation(errors)) => {
            for error in expected {
                assert!(
                    errors.contains(error),
                    "expected `{error}` among:\n{errors}"
                );
            }
        }
        Err(error) => panic!("expected validation errors, got: {error}"),
        Ok(sql) => panic!("expected validation errors, got sql: {sql}"),
    }
}
