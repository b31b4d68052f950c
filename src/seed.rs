use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::dsl::count_star;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde_json::json;
use tracing::info;

use crate::models::{EmailMetadata, NewAuditLogEntry, NewEmailMetadata, NewWooRequest};
use crate::schema::{email_audit_log, email_metadata, woo_requests};
use crate::store::ACTION_CREATED;

/// Inserts the demo fixture set when the metadata table is empty: five emails
/// across the classification range, one WOO request in processing, and one
/// ingestion audit entry per email. Guarded by the emptiness check alone, so
/// a manually emptied database reseeds on the next startup.
///
/// Returns whether anything was inserted.
pub fn seed_if_empty(conn: &mut PgConnection) -> Result<bool> {
    let existing: i64 = email_metadata::table
        .select(count_star())
        .first(conn)
        .context("failed to count email metadata rows")?;
    if existing > 0 {
        return Ok(false);
    }

    info!("empty database, inserting seed data");

    let emails = fixture_emails()?;
    let inserted: Vec<EmailMetadata> = diesel::insert_into(email_metadata::table)
        .values(&emails)
        .get_results(conn)
        .context("failed to insert seed emails")?;

    diesel::insert_into(woo_requests::table)
        .values(&fixture_woo_request()?)
        .execute(conn)
        .context("failed to insert seed WOO request")?;

    let sources = [
        json!({"source": "exchange_transport", "automated": true}),
        json!({"source": "external_email", "woo_relevant": true}),
        json!({"source": "internal_email", "classification": "confidential"}),
        json!({"source": "project_email", "automated": true}),
        json!({"source": "external_email", "press_related": true}),
    ];
    let audit_entries: Vec<NewAuditLogEntry> = inserted
        .iter()
        .zip(sources)
        .map(|(email, details)| NewAuditLogEntry {
            email_id: Some(email.id),
            action: ACTION_CREATED.to_string(),
            user_id: "system".to_string(),
            user_ip: None,
            details: Some(details),
        })
        .collect();
    diesel::insert_into(email_audit_log::table)
        .values(&audit_entries)
        .execute(conn)
        .context("failed to insert seed audit entries")?;

    Ok(true)
}

fn fixture_emails() -> Result<Vec<NewEmailMetadata>> {
    Ok(vec![
        fixture_email(
            "demo-001@haarlem.nl",
            "j.doe@haarlem.nl",
            "John Doe",
            r#"["team@haarlem.nl", "manager@haarlem.nl"]"#,
            "Project update - DMS implementatie voortgang",
            "2024-01-15T10:30:00+01:00",
            "user-j-doe",
            "emails/2024/01/demo-001.eml",
            1024,
            "ZAAK-2024-001",
            "intern",
        )?,
        fixture_email(
            "demo-002@haarlem.nl",
            "burger@example.com",
            "Bezorgde Burger",
            r#"["info@haarlem.nl"]"#,
            "WOO verzoek - verkeerslichten en verkeersdata gemeente",
            "2024-01-16T14:20:00+01:00",
            "user-info",
            "emails/2024/01/demo-002.eml",
            2048,
            "WOO-2024-002",
            "openbaar",
        )?,
        fixture_email(
            "demo-003@haarlem.nl",
            "wethouder@haarlem.nl",
            "Wethouder Smith",
            r#"["griffie@haarlem.nl", "pers@haarlem.nl"]"#,
            "VERTROUWELIJK: Coalitieoverleg agenda en afspraken",
            "2024-01-17T09:15:00+01:00",
            "user-wethouder",
            "emails/2024/01/demo-003.eml",
            512,
            "RAAD-2024-003",
            "vertrouwelijk",
        )?,
        fixture_email(
            "demo-004@haarlem.nl",
            "projectleider@haarlem.nl",
            "Project Manager IT",
            r#"["cio@haarlem.nl"]"#,
            "MinIO implementatie - status update week 3",
            "2024-01-18T16:45:00+01:00",
            "user-projectleider",
            "emails/2024/01/demo-004.eml",
            856,
            "PROJ-2024-004",
            "intern",
        )?,
        fixture_email(
            "demo-005@haarlem.nl",
            "journalist@haarlemsdagblad.nl",
            "Journalist HD",
            r#"["woordvoering@haarlem.nl"]"#,
            "Vragen over digitalisering gemeente - deadline artikel",
            "2024-01-19T11:30:00+01:00",
            "user-woordvoering",
            "emails/2024/01/demo-005.eml",
            1500,
            "PERS-2024-001",
            "openbaar",
        )?,
    ])
}

#[allow(clippy::too_many_arguments)]
fn fixture_email(
    message_id: &str,
    sender_email: &str,
    sender_name: &str,
    recipients: &str,
    subject: &str,
    sent: &str,
    bucket: &str,
    object_key: &str,
    size: i32,
    zaak_id: &str,
    classification: &str,
) -> Result<NewEmailMetadata> {
    Ok(NewEmailMetadata {
        message_id: message_id.to_string(),
        sender_email: sender_email.to_string(),
        sender_name: Some(sender_name.to_string()),
        recipient_email: recipients.to_string(),
        subject: Some(subject.to_string()),
        sent_date: Some(fixture_timestamp(sent)?),
        minio_bucket: bucket.to_string(),
        minio_object_key: object_key.to_string(),
        file_size_bytes: Some(size),
        zaak_id: Some(zaak_id.to_string()),
        classification: classification.to_string(),
    })
}

fn fixture_woo_request() -> Result<NewWooRequest> {
    Ok(NewWooRequest {
        request_id: "WOO-2024-001".to_string(),
        requester_name: Some("Journalist Haarlems Dagblad".to_string()),
        requester_email: Some("journalist@haarlemsdagblad.nl".to_string()),
        request_description: Some(
            "Verzoek om alle emails betreffende DMS implementatie en digitalisering projecten"
                .to_string(),
        ),
        search_terms: Some("DMS implementatie digitalisering".to_string()),
        due_date: Some(fixture_date("2024-02-15")?),
        status: "processing".to_string(),
    })
}

fn fixture_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("invalid fixture timestamp {raw}"))?
        .with_timezone(&Utc))
}

fn fixture_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid fixture date {raw}"))
}
