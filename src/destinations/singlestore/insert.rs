//! Batch insert statement builder
//!
//! Converts an ordered batch of event records into a single parameterized
//! INSERT plus a flat positional argument list, then delegates execution to
//! the Data API exec endpoint.

use super::Settings;
use crate::error::{Error, Result};
use crate::http::{RequestClient, RequestConfig};
use crate::types::{EventRecord, JsonObject, JsonValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fixed column order of the target table. Argument ordering in
/// [`build_insert`] depends on this sequence and never on the input.
pub const COLUMNS: [&str; 11] = [
    "messageId",
    "timestamp",
    "type",
    "event",
    "name",
    "properties",
    "userId",
    "anonymousId",
    "groupId",
    "traits",
    "context",
];

/// A parameterized multi-row INSERT
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// SQL template with one `(?, … ?)` group per record
    pub sql: String,
    /// Flat positional arguments, record-major then column-major;
    /// length is exactly `records.len() * COLUMNS.len()`
    pub args: Vec<JsonValue>,
}

/// Request body for `POST /api/v2/exec`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecRequest {
    pub sql: String,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<JsonValue>>,
}

/// Response body from the exec endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ExecResponse {
    /// Present and `false` when the remote side rejected the statement
    #[serde(default)]
    pub ok: Option<bool>,
    /// Remote error message when `ok` is `false`
    #[serde(default)]
    pub error: Option<String>,
    /// Anything else the endpoint returned
    #[serde(flatten)]
    pub rest: JsonObject,
}

/// Validate a table identifier before it is interpolated into SQL.
///
/// The table name is spliced into the statement text, not bound as a
/// parameter: the Data API does not parameterize identifiers, and callers are
/// trusted to supply a validated one. This function is the single place that
/// trust boundary lives; identifier allow-listing would go here without
/// changing any caller.
pub fn validate_table_identifier(name: &str) -> Result<&str> {
    if name.is_empty() {
        return Err(Error::invalid_value("tableName", "must not be empty"));
    }
    if name.contains('`') {
        return Err(Error::invalid_value(
            "tableName",
            "must not contain backticks",
        ));
    }
    Ok(name)
}

/// Convert an ISO-8601 timestamp to a `YYYY-MM-DD HH:MM:SS.mmm` UTC string
///
/// Millisecond precision, no timezone suffix; what the DATETIME column
/// expects. `"2024-01-15T10:30:00.000Z"` becomes `"2024-01-15 10:30:00.000"`.
pub fn to_utc_datetime(timestamp: &str) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(timestamp).map_err(|_| Error::InvalidTimestamp {
        value: timestamp.to_string(),
    })?;
    Ok(parsed
        .with_timezone(&Utc)
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string())
}

fn opt_string(value: &Option<String>) -> JsonValue {
    value
        .as_ref()
        .map_or(JsonValue::Null, |s| JsonValue::String(s.clone()))
}

fn opt_json(value: &Option<JsonValue>) -> JsonValue {
    value.clone().unwrap_or(JsonValue::Null)
}

/// Build one parameterized INSERT for a non-empty batch
///
/// Column order is fixed by [`COLUMNS`]; absent optional fields become SQL
/// `NULL` arguments, never omitted, so positional alignment always holds.
pub fn build_insert(table: &str, records: &[EventRecord]) -> Result<InsertStatement> {
    if records.is_empty() {
        return Err(Error::EmptyBatch);
    }
    let table = validate_table_identifier(table)?;

    let group = format!("({})", vec!["?"; COLUMNS.len()].join(", "));
    let values_clause = vec![group; records.len()].join(", ");
    let sql = format!(
        "INSERT INTO `{table}` ({}) VALUES {values_clause}",
        COLUMNS.join(", ")
    );

    let mut args = Vec::with_capacity(records.len() * COLUMNS.len());
    for record in records {
        args.push(JsonValue::String(record.message_id.clone()));
        args.push(JsonValue::String(to_utc_datetime(&record.timestamp)?));
        args.push(JsonValue::String(record.event_type.as_str().to_string()));
        args.push(opt_string(&record.event));
        args.push(opt_string(&record.name));
        args.push(opt_json(&record.properties));
        args.push(opt_string(&record.user_id));
        args.push(opt_string(&record.anonymous_id));
        args.push(opt_string(&record.group_id));
        args.push(opt_json(&record.traits));
        args.push(opt_json(&record.context));
    }

    Ok(InsertStatement { sql, args })
}

/// Execute a statement against the exec endpoint and interpret the result
///
/// The endpoint reports failures in the body: `ok == false` is surfaced as a
/// remote rejection (status 400) carrying the remote message prefixed with
/// `failure_context`. Transport errors and malformed bodies propagate
/// unchanged.
pub async fn execute(
    client: &RequestClient,
    url: &str,
    credentials: &str,
    request: &ExecRequest,
    failure_context: &str,
) -> Result<ExecResponse> {
    let config = RequestConfig::new()
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Basic {credentials}"))
        .json(serde_json::to_value(request)?)
        .no_throw_http_errors();

    let response: ExecResponse = client.post_json(url, config).await?;

    if response.ok == Some(false) {
        let message = response.error.as_deref().unwrap_or("Unknown error");
        return Err(Error::remote_rejection(format!(
            "{failure_context}: {message}"
        )));
    }
    Ok(response)
}

/// Deliver a batch of events as one multi-row INSERT
///
/// The batch is atomic: any failure fails the whole call, and retries belong
/// to the caller.
pub async fn send(
    client: &RequestClient,
    settings: &Settings,
    records: &[EventRecord],
) -> Result<ExecResponse> {
    let statement = build_insert(&settings.table_name, records)?;
    debug!(
        records = records.len(),
        args = statement.args.len(),
        table = %settings.table_name,
        "sending batch insert"
    );

    let request = ExecRequest {
        sql: statement.sql,
        database: settings.db_name.clone(),
        args: Some(statement.args),
    };

    execute(
        client,
        &settings.exec_url()?,
        &settings.basic_credentials(),
        &request,
        "Failed to insert data",
    )
    .await
}
