pub mod providers;

use crate::config::LlmConfig;
use async_trait::async_trait;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum LlmError {
    ConnectionError(String),
    ResponseError(String),
    ConfigError(String),
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::ConnectionError(msg) => write!(f, "LLM connection error: {}", msg),
            LlmError::ResponseError(msg) => write!(f, "LLM response error: {}", msg),
            LlmError::ConfigError(msg) => write!(f, "LLM configuration error: {}", msg),
        }
    }
}

impl Error for LlmError {}

/// The model's only job: suggest a column list (or COUNT(*)) for a question.
/// The output is advisory text and is always run through the column
/// sanitizer before it goes anywhere near a statement.
#[async_trait]
pub trait ColumnSuggester: Send + Sync {
    async fn suggest_columns(&self, question: &str) -> Result<String, LlmError>;
}

pub struct LlmManager {
    suggester: Box<dyn ColumnSuggester + Send + Sync>,
}

impl LlmManager {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let suggester: Box<dyn ColumnSuggester + Send + Sync> = match config.backend.as_str() {
            "remote" => Box::new(providers::remote::RemoteSuggester::new(config)?),
            "ollama" => Box::new(providers::ollama::OllamaSuggester::new(config)?),
            _ => {
                return Err(LlmError::ConfigError(format!(
                    "Unsupported LLM backend: {}",
                    config.backend
                )))
            }
        };

        Ok(Self { suggester })
    }

    pub async fn suggest_columns(&self, question: &str) -> Result<String, LlmError> {
        self.suggester.suggest_columns(question).await
    }
}

/// Prompt shared by both backends. The model is told to output only a
/// projection expression; FROM/WHERE/JOIN/LIMIT are assembled in code.
pub(crate) fn column_prompt(question: &str) -> String {
    format!(
        r#"You are an assistant that helps build SELECT queries.

Database:
- Single table: tickets
- Columns: id, text, category, priority, status, created_at

Your job:
- Given a natural language question, suggest either:
  * a list of columns to select, or
  * a COUNT-style expression if the user is asking "how many".

Rules:
- DO NOT write full SQL.
- DO NOT include FROM, WHERE, JOIN, LIMIT.
- Output only column names or COUNT(*).

User question: {}
Expression:"#,
        question.trim()
    )
}

/// Reduces a chatty model reply to the single expression line we asked for.
pub(crate) fn first_expression_line(content: &str) -> String {
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("```") {
            continue;
        }
        return line.replace('`', "").trim().to_string();
    }

    content.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expression_line_skips_fences_and_blanks() {
        let content = "\n```\nid, status\n```\n";
        assert_eq!(first_expression_line(content), "id, status");
    }

    #[test]
    fn expression_line_strips_backticks() {
        assert_eq!(first_expression_line("`COUNT(*)`"), "COUNT(*)");
    }

    #[test]
    fn prompt_embeds_the_question() {
        let prompt = column_prompt("  how many tickets  ");
        assert!(prompt.contains("User question: how many tickets"));
        assert!(prompt.ends_with("Expression:"));
    }
}
