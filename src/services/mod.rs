//! Service layer for newsdesk.
//!
//! This module contains the business logic for:
//! - Talking to the news API (`NewsClient`)
//! - Mapping editor forms to payloads and back (`editor`)

mod client;
pub mod editor;

pub use client::NewsClient;
pub use editor::{NewsForm, NewsPayload, form_to_payload, new_draft, news_to_form};
