use super::keywords::extract_text_keywords;

/// One self-contained boolean WHERE fragment. Fixed-vocabulary fragments
/// carry no parameters; the free-text fragment binds one `%kw%` value per
/// `?` placeholder, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlCondition {
    pub fragment: String,
    pub params: Vec<String>,
}

impl SqlCondition {
    fn fixed(fragment: &str) -> Self {
        Self {
            fragment: fragment.to_string(),
            params: Vec::new(),
        }
    }
}

/// Maps question phrasing onto WHERE fragments.
///
/// Rule groups run in a fixed order: priority (first match wins), category
/// (all matches append), status (both may append), date range (first match
/// wins), free-text search (single OR group, appended last).
pub fn build_conditions(question: &str) -> Vec<SqlCondition> {
    let q = question.to_lowercase();
    let mut conditions = Vec::new();

    if q.contains("high") {
        conditions.push(SqlCondition::fixed("priority = 'High'"));
    } else if q.contains("medium") {
        conditions.push(SqlCondition::fixed("priority = 'Medium'"));
    } else if q.contains("low") {
        conditions.push(SqlCondition::fixed("priority = 'Low'"));
    }

    if q.contains("technical") || q.contains("tech") {
        conditions.push(SqlCondition::fixed("category = 'Technical'"));
    }
    if q.contains("billing") || q.contains("payment") || q.contains("refund") {
        conditions.push(SqlCondition::fixed("category = 'Billing'"));
    }
    if q.contains("general") || q.contains("account") || q.contains("profile") {
        conditions.push(SqlCondition::fixed("category = 'General'"));
    }

    if q.contains("open") {
        conditions.push(SqlCondition::fixed("status = 'Open'"));
    }
    if q.contains("closed") || q.contains("resolved") {
        conditions.push(SqlCondition::fixed("status = 'Closed'"));
    }

    if q.contains("today") {
        conditions.push(SqlCondition::fixed("CAST(created_at AS DATE) = CURRENT_DATE"));
    } else if q.contains("yesterday") {
        conditions.push(SqlCondition::fixed(
            "CAST(created_at AS DATE) = CURRENT_DATE - INTERVAL 1 DAY",
        ));
    } else if q.contains("this week") || q.contains("last 7 days") {
        conditions.push(SqlCondition::fixed(
            "created_at >= CURRENT_DATE - INTERVAL 7 DAY",
        ));
    } else if q.contains("this month") {
        conditions.push(SqlCondition::fixed(
            "created_at >= DATE_TRUNC('month', CURRENT_DATE)",
        ));
    }

    let mut keywords: Vec<String> = extract_text_keywords(question).into_iter().collect();
    if !keywords.is_empty() {
        // Stable placeholder order for tests and log comparison
        keywords.sort();
        let likes = vec!["LOWER(text) LIKE ?"; keywords.len()].join(" OR ");
        conditions.push(SqlCondition {
            fragment: format!("({likes})"),
            params: keywords.iter().map(|kw| format!("%{kw}%")).collect(),
        });
    }

    conditions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(question: &str) -> Vec<String> {
        build_conditions(question)
            .into_iter()
            .map(|c| c.fragment)
            .collect()
    }

    #[test]
    fn priority_is_first_match_wins() {
        assert_eq!(fragments("high and medium tickets"), vec!["priority = 'High'"]);
        assert_eq!(fragments("medium tickets"), vec!["priority = 'Medium'"]);
        assert_eq!(fragments("low tickets"), vec!["priority = 'Low'"]);
    }

    #[test]
    fn categories_are_not_mutually_exclusive() {
        assert_eq!(
            fragments("billing and technical tickets"),
            vec!["category = 'Technical'", "category = 'Billing'"]
        );
    }

    #[test]
    fn both_statuses_may_fire() {
        assert_eq!(
            fragments("open and resolved tickets"),
            vec!["status = 'Open'", "status = 'Closed'"]
        );
    }

    #[test]
    fn date_rules_are_first_match_wins() {
        assert_eq!(
            fragments("tickets from today"),
            vec!["CAST(created_at AS DATE) = CURRENT_DATE"]
        );
        assert_eq!(
            fragments("tickets from yesterday"),
            vec!["CAST(created_at AS DATE) = CURRENT_DATE - INTERVAL 1 DAY"]
        );
        assert_eq!(
            fragments("tickets from last 7 days"),
            vec!["created_at >= CURRENT_DATE - INTERVAL 7 DAY"]
        );
        assert_eq!(
            fragments("tickets from this month"),
            vec!["created_at >= DATE_TRUNC('month', CURRENT_DATE)"]
        );
    }

    #[test]
    fn free_text_group_is_appended_last_with_params() {
        let conditions = build_conditions("open tickets about printers");
        assert_eq!(conditions[0].fragment, "status = 'Open'");
        let free_text = conditions.last().unwrap();
        assert_eq!(
            free_text.fragment,
            "(LOWER(text) LIKE ? OR LOWER(text) LIKE ?)"
        );
        assert_eq!(free_text.params, vec!["%about%", "%printers%"]);
    }

    #[test]
    fn detection_is_monotonic_in_recognized_keywords() {
        let base = fragments("billing tickets");
        let extended = fragments("open billing tickets");
        for fragment in &base {
            assert!(extended.contains(fragment));
        }
        assert!(extended.contains(&"status = 'Open'".to_string()));
    }
}
