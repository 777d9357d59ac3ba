use regex::Regex;

/// Projection used whenever the suggester output cannot be trusted.
pub const DEFAULT_COLUMNS: &str = "id, text, category, priority, status, created_at";

/// Substrings that would let a column expression smuggle in extra clauses.
const FORBIDDEN: &[&str] = &["from", "where", "join", "limit", "tickets"];

/// Whitelists a candidate projection expression from the suggester.
///
/// Returns `COUNT(*)` as soon as the expression mentions count, otherwise
/// accepts only comma-separated parts made of alphanumerics, underscores,
/// parentheses and spaces, with none of the clause keywords anywhere in the
/// expression. Anything else falls back to [`DEFAULT_COLUMNS`]. This blocks
/// clause injection from the model; it is not a general SQL defense.
pub fn clean_columns_expression(raw: &str) -> String {
    let expr = raw.trim().to_lowercase();

    if expr.contains("count") {
        return "COUNT(*)".to_string();
    }

    let part = Regex::new(r"^[a-zA-Z0-9_() ]+$").unwrap();
    let parts: Vec<&str> = expr.split(',').map(str::trim).collect();

    if parts.iter().all(|p| part.is_match(p)) && !FORBIDDEN.iter().any(|f| expr.contains(f)) {
        return parts.join(", ");
    }

    DEFAULT_COLUMNS.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_short_circuits_everything_else() {
        assert_eq!(clean_columns_expression("COUNT(id), status"), "COUNT(*)");
        assert_eq!(clean_columns_expression("count"), "COUNT(*)");
    }

    #[test]
    fn accepts_simple_column_lists() {
        assert_eq!(clean_columns_expression(" id , status "), "id, status");
        assert_eq!(clean_columns_expression("ID, Created_At"), "id, created_at");
    }

    #[test]
    fn rejects_clause_keywords_case_insensitively() {
        for expr in [
            "id FROM somewhere",
            "id, text WHERE 1=1",
            "a JOIN b",
            "id LIMIT 1",
            "tickets",
        ] {
            assert_eq!(clean_columns_expression(expr), DEFAULT_COLUMNS);
        }
    }

    #[test]
    fn drop_table_suggestion_falls_back_on_table_name() {
        // Passes the character whitelist but names the table
        assert_eq!(clean_columns_expression("DROP TABLE tickets"), DEFAULT_COLUMNS);
    }

    #[test]
    fn rejects_non_whitelisted_characters() {
        assert_eq!(clean_columns_expression("id; --"), DEFAULT_COLUMNS);
        assert_eq!(clean_columns_expression("`id`"), DEFAULT_COLUMNS);
        assert_eq!(clean_columns_expression(""), DEFAULT_COLUMNS);
    }
}
