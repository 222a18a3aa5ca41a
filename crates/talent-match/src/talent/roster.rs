//! Bulk roster import from CSV exports.
//!
//! Each row carries one (profile, skill) pair so that a spreadsheet with one line per
//! declared skill can be uploaded as-is:
//!
//! ```text
//! Profile ID,Full Name,Position,Department ID,Role,Available,Skill ID,Skill Name,Grade
//! p-100,Ana Torres,Frontend Engineer,2,Colaborador,yes,1,ReactJS,3
//! p-100,Ana Torres,Frontend Engineer,2,Colaborador,yes,2,SQL,1
//! ```

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::catalog::SkillCatalog;
use super::domain::{
    CandidateSkill, DepartmentId, ProficiencyGrade, Profile, ProfileId, Role, Skill, SkillId,
};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownRole {
        line: usize,
        value: String,
    },
    InvalidGrade {
        line: usize,
        value: String,
    },
    InvalidFlag {
        line: usize,
        value: String,
    },
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::UnknownRole { line, value } => {
                write!(f, "line {line}: unrecognized role '{value}'")
            }
            RosterImportError::InvalidGrade { line, value } => {
                write!(f, "line {line}: grade '{value}' must be between 0 and 3")
            }
            RosterImportError::InvalidFlag { line, value } => {
                write!(f, "line {line}: availability '{value}' is not a yes/no value")
            }
            RosterImportError::InvalidNumber { line, field, value } => {
                write!(f, "line {line}: {field} '{value}' is not a valid id")
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Profiles and the skill names discovered while importing.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub profiles: Vec<Profile>,
    pub skills: SkillCatalog,
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Roster, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Roster, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut roster = Roster::default();
        let mut positions: HashMap<ProfileId, usize> = HashMap::new();

        for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
            let row = record?;
            // header occupies line 1
            let line = index + 2;

            let profile_id = ProfileId(row.profile_id.clone());
            let position = match positions.get(&profile_id) {
                Some(position) => *position,
                None => {
                    let profile = row.profile(line)?;
                    roster.profiles.push(profile);
                    positions.insert(profile_id, roster.profiles.len() - 1);
                    roster.profiles.len() - 1
                }
            };

            if let Some((skill, name)) = row.skill(line)? {
                if let Some(name) = name {
                    roster.skills.insert(Skill {
                        id: skill.skill_id,
                        name,
                    });
                }
                roster.profiles[position].skills.push(skill);
            }
        }

        Ok(roster)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Profile ID")]
    profile_id: String,
    #[serde(rename = "Full Name")]
    full_name: String,
    #[serde(rename = "Position", default)]
    position: String,
    #[serde(
        rename = "Department ID",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    department_id: Option<String>,
    #[serde(rename = "Role")]
    role: String,
    #[serde(rename = "Available", default, deserialize_with = "empty_string_as_none")]
    available: Option<String>,
    #[serde(rename = "Skill ID", default, deserialize_with = "empty_string_as_none")]
    skill_id: Option<String>,
    #[serde(
        rename = "Skill Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    skill_name: Option<String>,
    #[serde(rename = "Grade", default, deserialize_with = "empty_string_as_none")]
    grade: Option<String>,
}

impl RosterRow {
    fn profile(&self, line: usize) -> Result<Profile, RosterImportError> {
        let role = Role::parse(&self.role).ok_or_else(|| RosterImportError::UnknownRole {
            line,
            value: self.role.clone(),
        })?;

        let department_id = self
            .department_id
            .as_deref()
            .map(|raw| parse_id(raw, line, "department id").map(DepartmentId))
            .transpose()?;

        let is_available_for_change = match self.available.as_deref() {
            Some(raw) => parse_flag(raw).ok_or_else(|| RosterImportError::InvalidFlag {
                line,
                value: raw.to_string(),
            })?,
            None => false,
        };

        Ok(Profile {
            id: ProfileId(self.profile_id.clone()),
            full_name: self.full_name.clone(),
            position: self.position.clone(),
            department_id,
            role,
            is_available_for_change,
            skills: Vec::new(),
        })
    }

    fn skill(
        &self,
        line: usize,
    ) -> Result<Option<(CandidateSkill, Option<String>)>, RosterImportError> {
        let Some(raw_id) = self.skill_id.as_deref() else {
            return Ok(None);
        };
        let skill_id = SkillId(parse_id(raw_id, line, "skill id")?);

        let raw_grade = self.grade.as_deref().unwrap_or_default();
        let actual_grade = raw_grade
            .parse::<u8>()
            .ok()
            .and_then(|value| ProficiencyGrade::new(value).ok())
            .ok_or_else(|| RosterImportError::InvalidGrade {
                line,
                value: raw_grade.to_string(),
            })?;

        Ok(Some((
            CandidateSkill {
                skill_id,
                actual_grade,
            },
            self.skill_name.clone(),
        )))
    }
}

fn parse_id(raw: &str, line: usize, field: &'static str) -> Result<u32, RosterImportError> {
    raw.parse::<u32>()
        .map_err(|_| RosterImportError::InvalidNumber {
            line,
            field,
            value: raw.to_string(),
        })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "si" | "sí" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}
