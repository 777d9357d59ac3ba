//! Deterministic natural-language to SQL translation for the tickets table.
//!
//! The pipeline is rule based rather than model based: the LLM only suggests
//! a column list, which is whitelisted by [`sanitize`]; every WHERE fragment
//! comes from the fixed vocabulary in [`conditions`]. [`assemble`] merges the
//! two into one statement and [`explain`] re-derives a human-readable
//! description from the finished SQL text.

pub mod assemble;
pub mod conditions;
pub mod explain;
pub mod keywords;
pub mod sanitize;

pub use assemble::AssembledQuery;

/// Builds the full query for a question plus the raw column expression
/// returned by the suggester. Pure string-in, query-out; no I/O.
pub fn generate_sql(question: &str, raw_expr: &str) -> AssembledQuery {
    let projection = sanitize::clean_columns_expression(raw_expr);
    let conditions = conditions::build_conditions(question);
    assemble::assemble(question, &projection, conditions)
}
