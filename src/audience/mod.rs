//! Audience policy conversion.
//!
//! The editor works on a flat list of rule groups; the backend stores a
//! query tree where each group nests the next one. This module converts
//! between the two, checks editor input and renders it for humans.
//!
//! - `convert_to_api`: groups → tree
//! - `convert_to_component`: tree → groups
//! - `seed_groups`: tree → groups, never empty
//! - `validate_groups`: required-field checks
//! - `describe_groups`: labelled one-line summaries

mod describe;
mod ids;
mod to_api;
mod to_component;
mod validate;

pub use describe::describe_groups;
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use to_api::convert_to_api;
pub use to_component::{convert_to_component, seed_groups};
pub use validate::validate_groups;

use crate::models::{ApiGroup, Group};

/// Convert groups using random UUID node ids.
pub fn to_api_tree(groups: &[Group]) -> ApiGroup {
    convert_to_api(groups, &mut UuidGenerator)
}
