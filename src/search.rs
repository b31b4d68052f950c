use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::Deserialize;

use crate::schema::email_metadata;

pub const SEARCH_RESULT_LIMIT: i64 = 50;

/// Sentinel classification value meaning "do not filter on classification".
pub const CLASSIFICATION_ALL: &str = "all";

/// Optional search filters as they arrive in the `/api/search` body. Absent,
/// empty, or unparseable fields mean "filter not applied".
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub classification: Option<String>,
}

impl SearchFilters {
    pub fn query_text(&self) -> Option<&str> {
        normalized(self.query.as_deref())
    }
}

/// Builds the email search as a boxed query: every present filter contributes
/// one AND-ed condition, values are always bound parameters, and the free-text
/// term matches subject OR sender OR recipient case-insensitively.
pub fn email_search_query(filters: &SearchFilters) -> email_metadata::BoxedQuery<'static, Pg> {
    let mut query = email_metadata::table.into_boxed();

    if let Some(term) = filters.query_text() {
        let pattern = format!("%{term}%");
        query = query.filter(
            email_metadata::subject
                .ilike(pattern.clone())
                .or(email_metadata::sender_email.ilike(pattern.clone()))
                .or(email_metadata::recipient_email.ilike(pattern)),
        );
    }

    if let Some(from) = normalized(filters.date_from.as_deref()).and_then(parse_date_bound) {
        query = query.filter(email_metadata::sent_date.ge(from));
    }

    if let Some(to) = normalized(filters.date_to.as_deref()).and_then(parse_date_bound) {
        query = query.filter(email_metadata::sent_date.le(to));
    }

    if let Some(class) = normalized(filters.classification.as_deref()) {
        if class != CLASSIFICATION_ALL {
            query = query.filter(email_metadata::classification.eq(class.to_string()));
        }
    }

    query
        .order(email_metadata::sent_date.desc())
        .limit(SEARCH_RESULT_LIMIT)
}

fn normalized(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Accepts a bare date or a full timestamp. A bare date binds at midnight UTC,
/// matching the implicit cast the database applied when these values were
/// passed through as strings.
fn parse_date_bound(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
}
