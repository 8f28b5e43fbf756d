//! Query parameter model.
//!
//! The warehouse API carries every parameter value as a string regardless of
//! its logical type. A parameter is either a scalar or an array of scalars,
//! distinguished by the declared type tag (`ARRAY` plus an element type).

use std::fmt;

/// Declared type of a scalar parameter, or of the elements of an array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterType {
    String,
    Date,
    Int64,
    Bool,
    /// A tag outside the supported set, kept verbatim for diagnostics
    Other(String),
}

impl ParameterType {
    /// Map a provider type tag (`STRING`, `INT64`, ...) to a parameter type.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "STRING" => ParameterType::String,
            "DATE" => ParameterType::Date,
            "INT64" => ParameterType::Int64,
            "BOOL" => ParameterType::Bool,
            other => ParameterType::Other(other.to_string()),
        }
    }

    /// The provider type tag.
    pub fn tag(&self) -> &str {
        match self {
            ParameterType::String => "STRING",
            ParameterType::Date => "DATE",
            ParameterType::Int64 => "INT64",
            ParameterType::Bool => "BOOL",
            ParameterType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single-valued parameter. `value` is `None` when nothing was bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarParameter {
    pub name: String,
    pub param_type: ParameterType,
    pub value: Option<String>,
}

/// An array parameter. `values` is `None` when the whole array is unbound,
/// which is distinct from an empty array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayParameter {
    pub name: String,
    pub element_type: ParameterType,
    pub values: Option<Vec<String>>,
}

/// A named query parameter bound to a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParameter {
    Scalar(ScalarParameter),
    Array(ArrayParameter),
}

impl QueryParameter {
    pub fn scalar(
        name: impl Into<String>,
        param_type: ParameterType,
        value: Option<impl Into<String>>,
    ) -> Self {
        QueryParameter::Scalar(ScalarParameter {
            name: name.into(),
            param_type,
            value: value.map(Into::into),
        })
    }

    pub fn array(
        name: impl Into<String>,
        element_type: ParameterType,
        values: Option<Vec<String>>,
    ) -> Self {
        QueryParameter::Array(ArrayParameter {
            name: name.into(),
            element_type,
            values,
        })
    }

    /// Parameter name as written after `@` in the query.
    pub fn name(&self) -> &str {
        match self {
            QueryParameter::Scalar(p) => &p.name,
            QueryParameter::Array(p) => &p.name,
        }
    }

    /// Raw value for display: arrays comma-joined, unbound values as `null`.
    pub fn display_value(&self) -> String {
        match self {
            QueryParameter::Scalar(p) => p.value.as_deref().unwrap_or("null").to_string(),
            QueryParameter::Array(p) => match &p.values {
                Some(values) => values.join(", "),
                None => "null".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_known() {
        assert_eq!(ParameterType::from_tag("STRING"), ParameterType::String);
        assert_eq!(ParameterType::from_tag("DATE"), ParameterType::Date);
        assert_eq!(ParameterType::from_tag("INT64"), ParameterType::Int64);
        assert_eq!(ParameterType::from_tag("BOOL"), ParameterType::Bool);
    }

    #[test]
    fn test_from_tag_unknown_keeps_tag() {
        let t = ParameterType::from_tag("NUMERIC");
        assert_eq!(t, ParameterType::Other("NUMERIC".to_string()));
        assert_eq!(t.tag(), "NUMERIC");
    }

    #[test]
    fn test_display_value() {
        let p = QueryParameter::scalar("id", ParameterType::Int64, Some("42"));
        assert_eq!(p.display_value(), "42");

        let p = QueryParameter::scalar("id", ParameterType::Int64, None::<String>);
        assert_eq!(p.display_value(), "null");

        let p = QueryParameter::array(
            "ids",
            ParameterType::Int64,
            Some(vec!["1".to_string(), "2".to_string()]),
        );
        assert_eq!(p.display_value(), "1, 2");

        let p = QueryParameter::array("ids", ParameterType::Int64, None);
        assert_eq!(p.display_value(), "null");

        let p = QueryParameter::array("ids", ParameterType::Int64, Some(vec![]));
        assert_eq!(p.display_value(), "");
    }
}
