//! Explicit identity context for the signed-in person.
//!
//! A [`Session`] is created from the profile returned by the backend after login and is
//! handed to every operation that needs to know who is asking. Screen dispatch is an
//! exhaustive match on [`Role`] through [`Dashboard`].

use serde::{Deserialize, Serialize};

use crate::talent::{Profile, ProfileId, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub profile_id: ProfileId,
    pub full_name: String,
    pub role: Role,
}

impl Session {
    pub fn for_profile(profile: &Profile) -> Self {
        Self {
            profile_id: profile.id.clone(),
            full_name: profile.full_name.clone(),
            role: profile.role,
        }
    }

    pub fn dashboard(&self) -> Dashboard {
        match self.role {
            Role::Collaborator => Dashboard::Collaborator {
                profile_id: self.profile_id.clone(),
            },
            Role::Leader => Dashboard::Leader,
            Role::Admin => Dashboard::Admin,
        }
    }

    /// Vacancy, candidate and report screens are limited to leaders and admins.
    pub fn can_review_candidates(&self) -> bool {
        self.dashboard().sections().contains(&Section::Demand)
    }
}

/// Landing area for a signed-in person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dashboard {
    Collaborator { profile_id: ProfileId },
    Leader,
    Admin,
}

const COLLABORATOR_SECTIONS: &[Section] = &[Section::Profile, Section::Team];

const LEADER_SECTIONS: &[Section] = &[
    Section::Demand,
    Section::Management,
    Section::Reports,
    Section::Profile,
    Section::SkillUpdates,
    Section::Suggestions,
];

const ADMIN_SECTIONS: &[Section] = &[
    Section::Demand,
    Section::Management,
    Section::Reports,
    Section::Profile,
    Section::SkillUpdates,
    Section::Suggestions,
    Section::Security,
    Section::BulkUpload,
];

impl Dashboard {
    pub fn sections(&self) -> &'static [Section] {
        match self {
            Dashboard::Collaborator { .. } => COLLABORATOR_SECTIONS,
            Dashboard::Leader => LEADER_SECTIONS,
            Dashboard::Admin => ADMIN_SECTIONS,
        }
    }

    pub fn allows(&self, section: Section) -> bool {
        self.sections().contains(&section)
    }
}

/// Screens reachable from a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Profile,
    Team,
    /// Vacancy demand list and vacancy/candidate detail.
    Demand,
    Management,
    Reports,
    SkillUpdates,
    Suggestions,
    Security,
    BulkUpload,
}

impl Section {
    pub const fn label(self) -> &'static str {
        match self {
            Section::Profile => "Profile",
            Section::Team => "My team",
            Section::Demand => "Vacancy demand",
            Section::Management => "Collaborator management",
            Section::Reports => "Reports",
            Section::SkillUpdates => "Skill updates",
            Section::Suggestions => "Suggestions",
            Section::Security => "Security management",
            Section::BulkUpload => "Bulk upload",
        }
    }
}
