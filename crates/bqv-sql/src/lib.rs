//! bqv-sql - SQL rewriting layer for bq-query-viewer
//!
//! Textual, regex-based rewriting of a stored query: bound parameter values
//! are inlined in place of their `@name` placeholders, and bare table names
//! are expanded to fully qualified ids. Nothing here parses SQL; occurrences
//! inside string literals or comments are rewritten too.

pub mod error;
pub mod format;
pub mod params;
pub mod qualify;

pub use error::{SqlError, SqlResult};
pub use format::{format_value, value_formatter};
pub use params::{substitute_parameter, substitute_parameters, SkippedParameter, Substitution};
pub use qualify::{qualify_table, qualify_tables};
