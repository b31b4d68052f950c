use std::collections::HashMap;

use chrono::{DateTime, Utc};
use diesel::dsl::count_star;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use serde::Serialize;
use serde_json::json;

use crate::models::{EmailMetadata, NewAuditLogEntry, WooRequest};
use crate::schema::{email_audit_log, woo_email_matches, woo_requests};
use crate::search::{email_search_query, SearchFilters};

/// Identity recorded on audit entries; there is no authentication layer and
/// the acting user is a free-text placeholder.
pub const AUDIT_USER: &str = "demo_user";

pub const ACTION_SEARCH: &str = "search";
pub const ACTION_CREATED: &str = "created";

#[derive(Debug, QueryableByName, Serialize)]
pub struct DashboardStats {
    #[diesel(sql_type = BigInt)]
    pub total_emails: i64,
    #[diesel(sql_type = BigInt)]
    pub emails_last_week: i64,
    #[diesel(sql_type = BigInt)]
    pub confidential_emails: i64,
    #[diesel(sql_type = BigInt)]
    pub linked_to_cases: i64,
    #[diesel(sql_type = BigInt)]
    pub total_storage_bytes: i64,
}

/// One aggregate pass over the whole metadata table. Aggregates over zero
/// rows still produce zeros, not NULLs.
pub fn dashboard_stats(conn: &mut PgConnection) -> QueryResult<DashboardStats> {
    diesel::sql_query(
        "SELECT \
             COUNT(*) AS total_emails, \
             COUNT(*) FILTER (WHERE sent_date >= CURRENT_DATE - INTERVAL '7 days') AS emails_last_week, \
             COUNT(*) FILTER (WHERE classification = 'vertrouwelijk') AS confidential_emails, \
             COUNT(*) FILTER (WHERE zaak_id IS NOT NULL) AS linked_to_cases, \
             COALESCE(SUM(file_size_bytes), 0) AS total_storage_bytes \
         FROM email_metadata",
    )
    .get_result(conn)
}

pub fn recent_woo_requests(conn: &mut PgConnection, limit: i64) -> QueryResult<Vec<WooRequest>> {
    woo_requests::table
        .order(woo_requests::request_date.desc())
        .limit(limit)
        .load(conn)
}

/// The column subset the search API exposes per matching email.
#[derive(Debug, Serialize)]
pub struct EmailSearchRow {
    pub id: i32,
    pub message_id: String,
    pub sender_email: String,
    pub sender_name: Option<String>,
    pub recipient_email: String,
    pub subject: Option<String>,
    pub sent_date: Option<DateTime<Utc>>,
    pub classification: String,
    pub zaak_id: Option<String>,
    pub has_attachments: bool,
    pub file_size_bytes: Option<i32>,
}

impl From<EmailMetadata> for EmailSearchRow {
    fn from(email: EmailMetadata) -> Self {
        Self {
            id: email.id,
            message_id: email.message_id,
            sender_email: email.sender_email,
            sender_name: email.sender_name,
            recipient_email: email.recipient_email,
            subject: email.subject,
            sent_date: email.sent_date,
            classification: email.classification,
            zaak_id: email.zaak_id,
            has_attachments: email.has_attachments,
            file_size_bytes: email.file_size_bytes,
        }
    }
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub results: Vec<EmailSearchRow>,
    pub total: usize,
}

/// Runs the filtered search and appends one audit entry for the search
/// itself. The entry references no particular email.
pub fn search_emails(
    conn: &mut PgConnection,
    filters: &SearchFilters,
) -> QueryResult<SearchOutcome> {
    let rows: Vec<EmailMetadata> = email_search_query(filters).load(conn)?;
    let results: Vec<EmailSearchRow> = rows.into_iter().map(Into::into).collect();
    let total = results.len();

    let entry = NewAuditLogEntry {
        email_id: None,
        action: ACTION_SEARCH.to_string(),
        user_id: AUDIT_USER.to_string(),
        user_ip: None,
        details: Some(json!({
            "query": filters.query_text().unwrap_or(""),
            "results_count": total,
        })),
    };
    diesel::insert_into(email_audit_log::table)
        .values(&entry)
        .execute(conn)?;

    Ok(SearchOutcome { results, total })
}

#[derive(Debug)]
pub struct WooRequestSummary {
    pub request: WooRequest,
    pub matched_emails: i64,
}

/// Every request with its match count; requests without matches report 0.
pub fn woo_requests_with_match_counts(
    conn: &mut PgConnection,
) -> QueryResult<Vec<WooRequestSummary>> {
    let requests: Vec<WooRequest> = woo_requests::table
        .order(woo_requests::request_date.desc())
        .load(conn)?;

    let count_rows: Vec<(i32, i64)> = woo_email_matches::table
        .group_by(woo_email_matches::woo_request_id)
        .select((woo_email_matches::woo_request_id, count_star()))
        .load(conn)?;
    let count_map: HashMap<i32, i64> = count_rows.into_iter().collect();

    Ok(requests
        .into_iter()
        .map(|request| {
            let matched_emails = *count_map.get(&request.id).unwrap_or(&0);
            WooRequestSummary {
                request,
                matched_emails,
            }
        })
        .collect())
}

pub fn connectivity_probe(conn: &mut PgConnection) -> QueryResult<()> {
    diesel::sql_query("SELECT 1").execute(conn)?;
    Ok(())
}
