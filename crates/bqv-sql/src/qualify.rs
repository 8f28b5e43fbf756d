//! Table reference qualification for stored query text
//!
//! Rewrites bare table names to backquoted `project.dataset.table` ids using a
//! whole-word regex match. An occurrence directly preceded by `.` is already
//! part of a qualified name and is left unchanged, so qualifying twice gives
//! the same text as qualifying once.
//!
//! Table ids are interpolated into the pattern without escaping, and a table
//! id that is a substring of a dotted name segment can still be matched. A
//! bare name the query already wraps in backticks is matched too, which
//! leaves doubled backticks around the qualified id.

use bqv_core::TableRef;
use regex::{Captures, Regex};

use crate::error::{SqlError, SqlResult};

/// Qualify every table, in list order.
///
/// A table whose id does not compile into a pattern is logged and skipped.
pub fn qualify_tables(query: &str, tables: &[TableRef]) -> String {
    tables
        .iter()
        .fold(query.to_string(), |sql, table| match qualify_table(&sql, table) {
            Ok(rewritten) => rewritten,
            Err(e) => {
                log::warn!("Leaving table {} unqualified: {}", table.table_id, e);
                sql
            }
        })
}

/// Rewrite every bare occurrence of one table's id.
pub fn qualify_table(query: &str, table: &TableRef) -> SqlResult<String> {
    // The leading group re-emits the character before the name.
    let pattern = format!(r"(^|[^.]\b){}\b", table.table_id);
    let re = Regex::new(&pattern).map_err(|e| SqlError::InvalidPattern {
        pattern: pattern.clone(),
        message: e.to_string(),
    })?;

    let qualified = format!("`{}`", table);
    Ok(re
        .replace_all(query, |caps: &Captures| format!("{}{}", &caps[1], qualified))
        .into_owned())
}

#[cfg(test)]
#[path = "qualify_test.rs"]
mod tests;
