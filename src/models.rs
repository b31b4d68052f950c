use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

use crate::schema::*;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = email_metadata)]
pub struct EmailMetadata {
    pub id: i32,
    pub message_id: String,
    pub sender_email: String,
    pub sender_name: Option<String>,
    pub recipient_email: String,
    pub subject: Option<String>,
    pub sent_date: Option<DateTime<Utc>>,
    pub received_date: DateTime<Utc>,
    pub minio_bucket: String,
    pub minio_object_key: String,
    pub file_size_bytes: Option<i32>,
    pub has_attachments: bool,
    pub attachment_count: i32,
    pub email_hash: Option<String>,
    pub classification: String,
    pub retention_date: Option<NaiveDate>,
    pub zaak_id: Option<String>,
    pub is_confidential: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = email_metadata)]
pub struct NewEmailMetadata {
    pub message_id: String,
    pub sender_email: String,
    pub sender_name: Option<String>,
    pub recipient_email: String,
    pub subject: Option<String>,
    pub sent_date: Option<DateTime<Utc>>,
    pub minio_bucket: String,
    pub minio_object_key: String,
    pub file_size_bytes: Option<i32>,
    pub zaak_id: Option<String>,
    pub classification: String,
}

#[derive(Debug, Clone, Queryable, Identifiable, Associations)]
#[diesel(table_name = email_audit_log)]
#[diesel(belongs_to(EmailMetadata, foreign_key = email_id))]
pub struct AuditLogEntry {
    pub id: i32,
    pub email_id: Option<i32>,
    pub action: String,
    pub user_id: String,
    pub user_ip: Option<String>,
    pub action_timestamp: DateTime<Utc>,
    pub details: Option<Value>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = email_audit_log)]
pub struct NewAuditLogEntry {
    pub email_id: Option<i32>,
    pub action: String,
    pub user_id: String,
    pub user_ip: Option<String>,
    pub details: Option<Value>,
}

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = woo_requests)]
pub struct WooRequest {
    pub id: i32,
    pub request_id: String,
    pub requester_name: Option<String>,
    pub requester_email: Option<String>,
    pub request_description: Option<String>,
    pub search_terms: Option<String>,
    pub request_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = woo_requests)]
pub struct NewWooRequest {
    pub request_id: String,
    pub requester_name: Option<String>,
    pub requester_email: Option<String>,
    pub request_description: Option<String>,
    pub search_terms: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
}

#[derive(Debug, Clone, Queryable, Identifiable, Associations)]
#[diesel(table_name = woo_email_matches)]
#[diesel(belongs_to(WooRequest, foreign_key = woo_request_id))]
#[diesel(belongs_to(EmailMetadata, foreign_key = email_id))]
pub struct WooEmailMatch {
    pub id: i32,
    pub woo_request_id: i32,
    pub email_id: i32,
    pub relevance_score: Option<f64>,
    pub included_in_response: bool,
    pub exclusion_reason: Option<String>,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = woo_email_matches)]
pub struct NewWooEmailMatch {
    pub woo_request_id: i32,
    pub email_id: i32,
    pub relevance_score: Option<f64>,
    pub included_in_response: bool,
    pub exclusion_reason: Option<String>,
}
