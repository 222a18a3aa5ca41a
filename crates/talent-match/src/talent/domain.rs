use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog identifier for a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(pub u32);

/// Identifier of an open or closed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VacancyId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(pub u32);

/// Backend-generated identifier for a person record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub String);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for VacancyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
}

/// Ordinal skill strength. `0` means the skill is not held at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ProficiencyGrade(u8);

impl ProficiencyGrade {
    pub const NONE: Self = Self(0);
    pub const BASIC: Self = Self(1);
    pub const INTERMEDIATE: Self = Self(2);
    pub const ADVANCED: Self = Self(3);
    /// Top of the scale; gap percentages are expressed relative to it.
    pub const MAX: Self = Self::ADVANCED;

    pub fn new(value: u8) -> Result<Self, GradeError> {
        if value > Self::MAX.0 {
            return Err(GradeError { value });
        }
        Ok(Self(value))
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn label(self) -> &'static str {
        match self.0 {
            0 => "none",
            1 => "basic",
            2 => "intermediate",
            _ => "advanced",
        }
    }
}

impl TryFrom<u8> for ProficiencyGrade {
    type Error = GradeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProficiencyGrade> for u8 {
    fn from(grade: ProficiencyGrade) -> Self {
        grade.0
    }
}

/// Raised when a grade falls outside the 0..=3 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("proficiency grade {value} is outside the 0-3 scale")]
pub struct GradeError {
    pub value: u8,
}

/// A vacancy requirement: the skill and the grade the position expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredSkill {
    pub skill_id: SkillId,
    pub target_grade: ProficiencyGrade,
}

/// A skill declared on a profile with the grade the person holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSkill {
    pub skill_id: SkillId,
    pub actual_grade: ProficiencyGrade,
}

/// Access level of a person in the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Role {
    Collaborator,
    Leader,
    Admin,
}

impl Role {
    /// Lenient match over the free-form role strings stored by the backend.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.contains("colaborador") || normalized.contains("collaborator") {
            Some(Self::Collaborator)
        } else if normalized.contains("lider") || normalized.contains("leader") {
            Some(Self::Leader)
        } else if normalized.contains("admin") {
            Some(Self::Admin)
        } else {
            None
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Role::Collaborator => "collaborator",
            Role::Leader => "leader",
            Role::Admin => "admin",
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Role::parse(&value).ok_or_else(|| format!("unrecognized role '{value}'"))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Person record: collaborator, leader, or admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub full_name: String,
    pub position: String,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    pub role: Role,
    #[serde(default)]
    pub is_available_for_change: bool,
    #[serde(default)]
    pub skills: Vec<CandidateSkill>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "Option<String>")]
pub enum VacancyStatus {
    #[default]
    Open,
    Closed,
}

impl VacancyStatus {
    /// Only an explicit closed marker closes a vacancy; anything else stays open.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value)
                if value.eq_ignore_ascii_case("cerrada") || value.eq_ignore_ascii_case("closed") =>
            {
                Self::Closed
            }
            _ => Self::Open,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            VacancyStatus::Open => "open",
            VacancyStatus::Closed => "closed",
        }
    }
}

impl From<Option<String>> for VacancyStatus {
    fn from(raw: Option<String>) -> Self {
        Self::parse(raw.as_deref())
    }
}

/// Open position with the skills it requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: VacancyId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub status: VacancyStatus,
    #[serde(default)]
    pub required_skills: Vec<RequiredSkill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
