use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use r2d2::Pool;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::db::pool::DuckDbConnectionManager;
use crate::db::rows::value_to_json;
use crate::nlsql;
use crate::nlsql::explain::{explain_sql, FALLBACK_EXPLANATION};
use crate::web::state::AppState;

// Query types

#[derive(Debug, Deserialize, Clone)]
pub struct NlQueryRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct Insights {
    pub total_records: usize,
}

#[derive(Debug, Serialize)]
pub struct NlQueryResponse {
    pub sql: String,
    pub explanation: String,
    pub columns: Vec<String>,
    pub rows: Vec<serde_json::Map<String, Value>>,
    pub insights: Insights,
}

// System status

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime_seconds: i64,
    pub ticket_count: i64,
}

/// Everything that can abort an nl-query request. Each stage either fully
/// succeeds or fails here; explanation failures are absorbed instead and
/// never appear in this enum.
#[derive(Debug)]
pub enum QueryError {
    EmptyQuestion,
    Generation(String),
    NotReadOnly,
    Execution(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::EmptyQuestion => write!(f, "Question cannot be empty"),
            QueryError::Generation(msg) => write!(f, "SQL generation error: {}", msg),
            QueryError::NotReadOnly => write!(f, "Only SELECT queries are allowed"),
            QueryError::Execution(msg) => write!(f, "SQL execution error: {}", msg),
        }
    }
}

impl std::error::Error for QueryError {}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

// API Implementations

pub async fn root() -> Json<Value> {
    Json(serde_json::json!({ "message": "Ticket analytics API running" }))
}

/// Natural-language query endpoint: question in, SQL + rows + explanation out.
pub async fn nl_query(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NlQueryRequest>,
) -> Result<Json<NlQueryResponse>, QueryError> {
    if payload.question.trim().is_empty() {
        return Err(QueryError::EmptyQuestion);
    }
    debug!("NL-query: {}", payload.question);

    let raw_expr = state
        .llm_manager
        .suggest_columns(&payload.question)
        .await
        .map_err(|e| QueryError::Generation(e.to_string()))?;
    debug!("Suggested projection expression: {}", raw_expr);

    let query = nlsql::generate_sql(&payload.question, &raw_expr);
    info!("Generated SQL: {}", query.sql);

    // Statement-kind guard: everything this service runs must be a SELECT
    if !query.sql.trim().to_lowercase().starts_with("select") {
        error!("Refusing non-SELECT statement: {}", query.sql);
        return Err(QueryError::NotReadOnly);
    }

    let explanation = explain_sql(&query.sql).unwrap_or_else(|| FALLBACK_EXPLANATION.to_string());

    let pool = state.db_pool.clone();
    let sql = query.sql.clone();
    let params = query.params.clone();
    let (columns, rows) = tokio::task::spawn_blocking(move || run_query(&pool, &sql, &params))
        .await
        .map_err(|e| QueryError::Execution(e.to_string()))?
        .map_err(QueryError::Execution)?;

    let insights = Insights {
        total_records: rows.len(),
    };

    Ok(Json(NlQueryResponse {
        sql: query.sql,
        explanation,
        columns,
        rows,
        insights,
    }))
}

/// Executes the assembled statement on the blocking pool and shapes rows
/// into keyed JSON records.
fn run_query(
    pool: &Pool<DuckDbConnectionManager>,
    sql: &str,
    params: &[String],
) -> Result<(Vec<String>, Vec<serde_json::Map<String, Value>>), String> {
    let conn = pool.get().map_err(|e| e.to_string())?;
    let mut stmt = conn.prepare(sql).map_err(|e| e.to_string())?;

    let mut rows = stmt
        .query(duckdb::params_from_iter(params.iter()))
        .map_err(|e| e.to_string())?;

    let columns: Vec<String> = rows
        .as_ref()
        .map(|s| s.column_names().iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();

    let mut records = Vec::new();
    while let Some(row) = rows.next().map_err(|e| e.to_string())? {
        let mut record = serde_json::Map::new();
        for (idx, column) in columns.iter().enumerate() {
            let value = row.get_ref(idx).map_err(|e| e.to_string())?;
            record.insert(column.clone(), value_to_json(value));
        }
        records.push(record);
    }

    Ok((columns, records))
}

// System status
pub async fn system_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SystemStatus>, (StatusCode, String)> {
    let now = chrono::Utc::now();
    let uptime = now.signed_duration_since(state.startup_time).num_seconds();

    let pool = state.db_pool.clone();
    let ticket_count = tokio::task::spawn_blocking(move || -> Result<i64, String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| {
        error!("Status task failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
    })?
    .map_err(|e| {
        error!("Failed to count tickets: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
    })?;

    Ok(Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        ticket_count,
    }))
}
