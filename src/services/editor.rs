// src/services/editor.rs

//! Conversions between editor form values and news API payloads.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::audience::{IdGenerator, seed_groups};
use crate::error::{AppError, Result};
use crate::models::{AssignmentPolicy, Group, News, PublishStatus};

/// Values of the news editor form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsForm {
    pub title: String,

    #[serde(default)]
    pub intro: Option<String>,

    #[serde(default)]
    pub content: String,

    /// Validity window (start, end)
    #[serde(default)]
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,

    /// Publish status code as entered, e.g. `"0"`
    pub status: String,

    /// Inclusion groups
    #[serde(default)]
    pub filter: Vec<Group>,

    /// Exclusion groups
    #[serde(default)]
    pub exclude: Vec<Group>,
}

/// Body of a create/update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsPayload {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,

    pub content: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub publish_status: PublishStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_assignment_policy: Option<AssignmentPolicy>,
}

/// Build an API payload from form values.
pub fn form_to_payload(form: &NewsForm, ids: &mut impl IdGenerator) -> Result<NewsPayload> {
    let (start_date, end_date) = form
        .date_range
        .ok_or_else(|| AppError::validation("date range is required"))?;

    let title = form.title.trim();
    if title.is_empty() {
        return Err(AppError::validation("title is required"));
    }

    let publish_status = form
        .status
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(PublishStatus::from_code)
        .ok_or_else(|| AppError::validation(format!("invalid status '{}'", form.status)))?;

    let intro = form
        .intro
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(NewsPayload {
        title: title.to_string(),
        intro,
        content: form.content.trim().to_string(),
        start_date,
        end_date,
        publish_status,
        employee_assignment_policy: Some(AssignmentPolicy::from_groups(
            &form.filter,
            &form.exclude,
            ids,
        )),
    })
}

/// Populate form values from a stored record. Missing dates default to `now`.
pub fn news_to_form(news: &News, now: DateTime<Utc>) -> NewsForm {
    let policy = news.employee_assignment_policy.as_ref();

    NewsForm {
        title: news.title.clone(),
        intro: Some(news.intro.clone().unwrap_or_default()),
        content: news.content.clone(),
        date_range: Some((
            news.start_date.unwrap_or(now),
            news.end_date.unwrap_or(now),
        )),
        status: news.publish_status.code().to_string(),
        filter: seed_groups(policy.map(|p| &p.filter)),
        exclude: seed_groups(policy.map(|p| &p.exclude)),
    }
}

/// Payload for a fresh draft valid for one month from `now`.
pub fn new_draft(title: &str, now: DateTime<Utc>) -> Result<NewsPayload> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::validation("title is required"));
    }
    let end_date = now
        .checked_add_months(Months::new(1))
        .ok_or_else(|| AppError::validation("end date out of range"))?;

    Ok(NewsPayload {
        title: title.to_string(),
        intro: None,
        content: String::new(),
        start_date: now,
        end_date,
        publish_status: PublishStatus::Draft,
        employee_assignment_policy: None,
    })
}
