use serde::{Deserialize, Serialize};

use super::compatibility::{Compatibility, CompatibilityBand, CompatibilityScorer};
use crate::talent::{DepartmentId, Profile, ProfileId, RequiredSkill};

/// A profile scored against a vacancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedCandidate {
    pub profile_id: ProfileId,
    pub full_name: String,
    pub position: String,
    pub department_id: Option<DepartmentId>,
    pub is_available_for_change: bool,
    pub compatibility: Compatibility,
    pub band: CompatibilityBand,
}

/// Score every profile and order best match first. Ties keep directory order.
pub fn rank_candidates(
    scorer: &CompatibilityScorer,
    required: &[RequiredSkill],
    profiles: &[Profile],
) -> Vec<RecommendedCandidate> {
    let mut ranked: Vec<RecommendedCandidate> = profiles
        .iter()
        .map(|profile| {
            let compatibility = scorer.score(required, &profile.skills);
            RecommendedCandidate {
                profile_id: profile.id.clone(),
                full_name: profile.full_name.clone(),
                position: profile.position.clone(),
                department_id: profile.department_id,
                is_available_for_change: profile.is_available_for_change,
                compatibility,
                band: compatibility.band(),
            }
        })
        .collect();

    ranked.sort_by(|left, right| right.compatibility.cmp(&left.compatibility));
    ranked
}
