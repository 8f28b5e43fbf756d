//! Inline bound parameter values into query text.
//!
//! Every whole-word `@name` placeholder is replaced with the parameter's SQL
//! literal followed by a `/* = @name */` trace comment. Unbound values become
//! a bare `null`. Placeholders without a matching parameter are left as-is.

use bqv_core::QueryParameter;
use regex::{NoExpand, Regex};

use crate::error::{SqlError, SqlResult};
use crate::format::value_formatter;

/// A parameter left unsubstituted, and why.
#[derive(Debug)]
pub struct SkippedParameter {
    pub name: String,
    pub reason: SqlError,
}

/// Result of substituting a list of parameters.
#[derive(Debug)]
pub struct Substitution {
    /// Query text with every supported parameter inlined
    pub sql: String,
    /// Parameters whose placeholders were left untouched
    pub skipped: Vec<SkippedParameter>,
}

/// Substitute all parameters, in list order.
///
/// A parameter that cannot be rendered is logged, recorded in
/// [`Substitution::skipped`], and its placeholder kept; the remaining
/// parameters are still processed.
pub fn substitute_parameters(query: &str, parameters: &[QueryParameter]) -> Substitution {
    let mut sql = query.to_string();
    let mut skipped = Vec::new();

    for parameter in parameters {
        match substitute_parameter(&sql, parameter) {
            Ok(rewritten) => sql = rewritten,
            Err(reason) => {
                log::warn!(
                    "Leaving @{} unsubstituted: {}",
                    parameter.name(),
                    reason
                );
                skipped.push(SkippedParameter {
                    name: parameter.name().to_string(),
                    reason,
                });
            }
        }
    }

    Substitution { sql, skipped }
}

/// Replace every placeholder of a single parameter.
pub fn substitute_parameter(query: &str, parameter: &QueryParameter) -> SqlResult<String> {
    let re = placeholder_pattern(parameter.name())?;
    let replacement = replacement_text(parameter)?;
    Ok(re.replace_all(query, NoExpand(&replacement)).into_owned())
}

fn placeholder_pattern(name: &str) -> SqlResult<Regex> {
    let pattern = format!(r"@\b{}\b", regex::escape(name));
    Regex::new(&pattern).map_err(|e| SqlError::InvalidPattern {
        pattern,
        message: e.to_string(),
    })
}

fn replacement_text(parameter: &QueryParameter) -> SqlResult<String> {
    match parameter {
        QueryParameter::Scalar(p) => match &p.value {
            None => Ok("null".to_string()),
            Some(value) => {
                let format = value_formatter(&p.param_type)?;
                Ok(annotate(&p.name, &format(value)))
            }
        },
        QueryParameter::Array(p) => match &p.values {
            None => Ok("null".to_string()),
            Some(values) => {
                let format = value_formatter(&p.element_type)?;
                let items: Vec<String> = values.iter().map(|v| format(v)).collect();
                Ok(annotate(&p.name, &format!("[{}]", items.join(", "))))
            }
        },
    }
}

fn annotate(name: &str, literal: &str) -> String {
    format!("{literal} /* = @{name} */")
}

#[cfg(test)]
#[path = "params_test.rs"]
mod tests;
