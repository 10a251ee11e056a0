// src/models/mod.rs

//! Domain models for newsdesk.
//!
//! Editor-side rules and groups, the backend query tree, news records and
//! application configuration.

mod api;
mod config;
mod news;
mod policy;
mod rule;

// Re-export all public types
pub use api::{ApiGroup, ApiNode, ApiRule, ApiValue};
pub use config::{ApiConfig, AudienceCatalog, Config, LoggingConfig, OptionEntry};
pub use news::{
    News, NewsCounters, NewsListItem, NewsListResponse, NewsPage, NewsQuery, NewsSummary,
    PublishStatus, ReadEntry, StatusFilter,
};
pub use policy::AssignmentPolicy;
pub use rule::{Combinator, FieldKind, Group, Operator, Rule, ValueKind};
