//! Validation macros

/// Runs every check, collecting each failure under its field.
#[macro_export]
macro_rules! validate_fields {
    ($($field:expr => $validation:expr),* $(,)?) => {{
        let mut result = $crate::validation::ValidationResult::success();
        $(
            if let Err(err) = $validation {
                result.add_error($field, &err);
            }
        )*
        result
    }};
}
