use serde::{Deserialize, Serialize};

/// What happens to a person's current photo when another one is assigned to them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReassignPolicy {
    /// The displaced photo is dropped from tracking altogether.
    #[default]
    Discard,
    /// The displaced photo goes back to the end of the unassigned pool.
    ReturnToPool,
}

/// Which persons an auto-match pass may hand a photo to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchEligibility {
    /// Only persons without a photo, counting photos handed out earlier in the
    /// same pass. Existing mappings are never replaced.
    #[default]
    Unassigned,
    /// Every photo goes to the first matching person, whatever they hold; a
    /// replaced photo is handled by `on_reassign`.
    AnyPerson,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AssociationPolicy {
    pub on_reassign: ReassignPolicy,
    #[serde(default)]
    pub auto_match: MatchEligibility,
}

impl AssociationPolicy {
    pub fn returning_displaced() -> Self {
        Self {
            on_reassign: ReassignPolicy::ReturnToPool,
            ..Default::default()
        }
    }
}
