/// Explanation used when nothing in the SQL matched the known vocabulary.
pub const FALLBACK_EXPLANATION: &str =
    "This query retrieves ticket data based on the given conditions.";

/// Condition fragments the explainer knows how to phrase, checked in order.
/// Date windows and free-text LIKE groups are deliberately absent: the
/// explanation is best-effort and silently skips what it cannot phrase.
const CLAUSE_PHRASES: &[(&str, &str)] = &[
    ("priority = 'high'", "with high priority"),
    ("priority = 'medium'", "with medium priority"),
    ("priority = 'low'", "with low priority"),
    ("category = 'technical'", "related to technical issues"),
    ("category = 'billing'", "related to billing issues"),
    ("category = 'general'", "related to general issues"),
    ("status = 'open'", "that are currently open"),
    ("status = 'closed'", "that are closed"),
    ("limit", "and limits the results to 50 records"),
];

/// Re-derives a one-sentence description by scanning the assembled SQL for
/// known fragments. Returns `None` when no phrase at all could be produced;
/// callers substitute [`FALLBACK_EXPLANATION`] in that case.
pub fn explain_sql(sql: &str) -> Option<String> {
    let sql_lower = sql.to_lowercase();
    let mut phrases = Vec::new();

    if sql_lower.contains("count(*)") {
        phrases.push("this query counts the number of tickets");
    } else {
        phrases.push("this query retrieves ticket details");
    }

    for (fragment, phrase) in CLAUSE_PHRASES {
        if sql_lower.contains(fragment) {
            phrases.push(phrase);
        }
    }

    if phrases.is_empty() {
        return None;
    }

    Some(capitalize(&phrases.join(" ")) + ".")
}

fn capitalize(sentence: &str) -> String {
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
