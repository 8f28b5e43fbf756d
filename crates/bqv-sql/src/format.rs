//! SQL literal rendering of parameter values.
//!
//! Values are not escaped: a string containing `'` yields an unbalanced
//! literal.

use bqv_core::ParameterType;

use crate::error::{SqlError, SqlResult};

fn quote_string(value: &str) -> String {
    format!("'{value}'")
}

fn quote_date(value: &str) -> String {
    format!("date '{value}'")
}

fn passthrough(value: &str) -> String {
    value.to_string()
}

/// Look up the literal renderer for a parameter type.
///
/// Fails with `UnsupportedParameterType` for any type outside
/// `STRING`, `DATE`, `INT64`, `BOOL`.
pub fn value_formatter(param_type: &ParameterType) -> SqlResult<fn(&str) -> String> {
    let formatter: fn(&str) -> String = match param_type {
        ParameterType::String => quote_string,
        ParameterType::Date => quote_date,
        ParameterType::Int64 | ParameterType::Bool => passthrough,
        ParameterType::Other(tag) => {
            return Err(SqlError::UnsupportedParameterType {
                type_tag: tag.clone(),
            })
        }
    };
    Ok(formatter)
}

/// Render a raw string value as a SQL literal of the given type.
pub fn format_value(param_type: &ParameterType, value: &str) -> SqlResult<String> {
    Ok(value_formatter(param_type)?(value))
}
