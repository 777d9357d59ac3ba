use super::conditions::SqlCondition;

/// A finished statement plus the values bound to its `?` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledQuery {
    pub sql: String,
    pub params: Vec<String>,
    pub is_count: bool,
}

/// Combines intent, sanitized projection and conditions into one statement.
///
/// COUNT intent comes from the question ("how many" / "count") or from the
/// projection already being a count expression; count queries get no LIMIT,
/// everything else is capped at 50 rows.
pub fn assemble(question: &str, projection: &str, conditions: Vec<SqlCondition>) -> AssembledQuery {
    let q = question.to_lowercase();
    let is_count =
        q.contains("how many") || q.contains("count") || projection.to_lowercase().contains("count(");

    let mut sql = if is_count {
        "SELECT COUNT(*) AS count".to_string()
    } else {
        format!("SELECT {projection}")
    };
    sql.push_str(" FROM tickets");

    let mut params = Vec::new();
    if !conditions.is_empty() {
        let fragments: Vec<&str> = conditions.iter().map(|c| c.fragment.as_str()).collect();
        sql.push_str(" WHERE ");
        sql.push_str(&fragments.join(" AND "));
        for condition in conditions {
            params.extend(condition.params);
        }
    }

    if !is_count {
        sql.push_str(" LIMIT 50");
    }
    sql.push(';');

    AssembledQuery { sql, params, is_count }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(fragment: &str) -> SqlCondition {
        SqlCondition {
            fragment: fragment.to_string(),
            params: Vec::new(),
        }
    }

    #[test]
    fn count_intent_from_question_skips_limit() {
        let query = assemble("how many tickets", "id, text", vec![]);
        assert_eq!(query.sql, "SELECT COUNT(*) AS count FROM tickets;");
        assert!(query.is_count);
    }

    #[test]
    fn count_intent_from_projection() {
        let query = assemble("tickets please", "COUNT(*)", vec![]);
        assert!(query.is_count);
        assert_eq!(query.sql, "SELECT COUNT(*) AS count FROM tickets;");
    }

    #[test]
    fn select_queries_end_with_limit() {
        let query = assemble("tickets please", "id, text", vec![]);
        assert_eq!(query.sql, "SELECT id, text FROM tickets LIMIT 50;");
        assert!(!query.is_count);
    }

    #[test]
    fn conditions_join_with_and_in_order() {
        let query = assemble(
            "irrelevant",
            "id",
            vec![fixed("priority = 'High'"), fixed("status = 'Open'")],
        );
        assert_eq!(
            query.sql,
            "SELECT id FROM tickets WHERE priority = 'High' AND status = 'Open' LIMIT 50;"
        );
    }

    #[test]
    fn params_follow_fragment_order() {
        let free_text = SqlCondition {
            fragment: "(LOWER(text) LIKE ? OR LOWER(text) LIKE ?)".to_string(),
            params: vec!["%vpn%".to_string(), "%wifi%".to_string()],
        };
        let query = assemble("irrelevant", "id", vec![fixed("status = 'Open'"), free_text]);
        assert_eq!(query.params, vec!["%vpn%", "%wifi%"]);
    }
}
