//! Employee assignment policy attached to a news item.

use serde::{Deserialize, Serialize};

use super::api::ApiGroup;
use super::rule::Group;
use crate::audience::{IdGenerator, convert_to_api, seed_groups};

/// Inclusion and exclusion trees deciding which employees a news item reaches.
///
/// Serves both as the `employee_assignment_policy` of a news payload and as
/// the body of a test-assignment dry run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPolicy {
    #[serde(default)]
    pub filter: ApiGroup,

    #[serde(default)]
    pub exclude: ApiGroup,
}

impl AssignmentPolicy {
    /// Build both trees from editor groups.
    pub fn from_groups(filter: &[Group], exclude: &[Group], ids: &mut impl IdGenerator) -> Self {
        Self {
            filter: convert_to_api(filter, ids),
            exclude: convert_to_api(exclude, ids),
        }
    }

    /// Editor groups for `(filter, exclude)`, each seeded with a default
    /// group when its tree is empty.
    pub fn to_groups(&self) -> (Vec<Group>, Vec<Group>) {
        (
            seed_groups(Some(&self.filter)),
            seed_groups(Some(&self.exclude)),
        )
    }
}
