mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::{acquire_db_lock, body_to_vec, TestApp};
use diesel::prelude::*;

use emailarchief::models::NewWooEmailMatch;
use emailarchief::schema::{email_metadata, woo_email_matches, woo_requests};
use emailarchief::store;

#[tokio::test]
async fn requests_without_matches_report_zero() -> Result<()> {
    let _lock = acquire_db_lock().await;
    let app = TestApp::new().await?;
    app.seed().await?;

    let summaries = app
        .with_conn(|conn| Ok(store::woo_requests_with_match_counts(conn)?))
        .await?;
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].request.request_id, "WOO-2024-001");
    assert_eq!(summaries[0].matched_emails, 0);

    let response = app.get("/woo").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_to_vec(response.into_body()).await?)?;
    assert!(html.contains("WOO-2024-001"));
    assert!(html.contains("<td>0</td>"));

    app.cleanup().await?;
    Ok(())
}

#[tokio::test]
async fn match_counts_follow_links() -> Result<()> {
    let _lock = acquire_db_lock().await;
    let app = TestApp::new().await?;
    app.seed().await?;

    app.with_conn(|conn| {
        let request_id: i32 = woo_requests::table
            .select(woo_requests::id)
            .first(conn)?;
        let email_ids: Vec<i32> = email_metadata::table
            .select(email_metadata::id)
            .order(email_metadata::id.asc())
            .limit(2)
            .load(conn)?;

        let matches: Vec<NewWooEmailMatch> = email_ids
            .iter()
            .enumerate()
            .map(|(idx, email_id)| NewWooEmailMatch {
                woo_request_id: request_id,
                email_id: *email_id,
                relevance_score: Some(if idx == 0 { 0.85 } else { 0.40 }),
                included_in_response: idx == 0,
                exclusion_reason: (idx != 0).then(|| "onvoldoende relevantie".to_string()),
            })
            .collect();
        diesel::insert_into(woo_email_matches::table)
            .values(&matches)
            .execute(conn)?;
        Ok(())
    })
    .await?;

    let summaries = app
        .with_conn(|conn| Ok(store::woo_requests_with_match_counts(conn)?))
        .await?;
    assert_eq!(summaries[0].matched_emails, 2);

    let response = app.get("/woo").await?;
    let html = String::from_utf8(body_to_vec(response.into_body()).await?)?;
    assert!(html.contains("<td>2</td>"));

    app.cleanup().await?;
    Ok(())
}

#[tokio::test]
async fn duplicate_matches_are_rejected() -> Result<()> {
    let _lock = acquire_db_lock().await;
    let app = TestApp::new().await?;
    app.seed().await?;

    let outcome = app
        .with_conn(|conn| {
            let request_id: i32 = woo_requests::table
                .select(woo_requests::id)
                .first(conn)?;
            let email_id: i32 = email_metadata::table
                .select(email_metadata::id)
                .order(email_metadata::id.asc())
                .first(conn)?;

            let link = NewWooEmailMatch {
                woo_request_id: request_id,
                email_id,
                relevance_score: Some(0.9),
                included_in_response: true,
                exclusion_reason: None,
            };
            diesel::insert_into(woo_email_matches::table)
                .values(&link)
                .execute(conn)?;
            let duplicate = diesel::insert_into(woo_email_matches::table)
                .values(&link)
                .execute(conn);
            Ok(duplicate)
        })
        .await?;

    assert!(matches!(
        outcome,
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _
        ))
    ));

    app.cleanup().await?;
    Ok(())
}
