//! Candidate-to-vacancy compatibility scoring.
//!
//! The scorer is a pure function of two skill lists: the grades a vacancy requires and
//! the grades a candidate declares. It never fails and never leaves the `[0, 100]`
//! range. Two formulas are available, selected explicitly through [`ScoringFormula`]:
//!
//! * [`ScoringFormula::BinaryGap`] measures the shortfall on each required skill as a
//!   share of the whole scale and subtracts the average shortfall from 100.
//! * [`ScoringFormula::PartialCredit`] awards each required skill the fraction of its
//!   target grade the candidate reaches, capped at full credit, and averages the credit.
//!
//! For `required = [(ReactJS, 3), (SQL, 2)]` and `candidate = [(ReactJS, 3), (SQL, 1)]`
//! the binary-gap formula yields 83 and the partial-credit formula yields 75.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::breakdown::{compare_skills, CompatibilityResult};
use crate::talent::{CandidateSkill, ProficiencyGrade, RequiredSkill, SkillCatalog, SkillId};

/// Percentage reported when a vacancy lists no required skills.
const FULL_MATCH: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringFormula {
    /// Average per-skill gap relative to the top grade, subtracted from 100.
    #[default]
    BinaryGap,
    /// Average per-skill fulfillment of the target grade, capped at 1.0 per skill.
    PartialCredit,
}

impl ScoringFormula {
    pub const fn label(self) -> &'static str {
        match self {
            ScoringFormula::BinaryGap => "binary_gap",
            ScoringFormula::PartialCredit => "partial_credit",
        }
    }
}

impl fmt::Display for ScoringFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScoringFormula {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "binary_gap" | "binary-gap" | "gap" | "a" => Ok(Self::BinaryGap),
            "partial_credit" | "partial-credit" | "partial" | "b" => Ok(Self::PartialCredit),
            other => Err(format!(
                "unknown scoring formula '{other}' (expected binary_gap or partial_credit)"
            )),
        }
    }
}

/// Compatibility percentage, always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Compatibility(u8);

/// Raised when a percentage read from the wire exceeds 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("compatibility {value} is outside the 0-100 range")]
pub struct CompatibilityRangeError {
    pub value: u8,
}

impl Compatibility {
    pub const FULL: Self = Self(FULL_MATCH);
    pub const NONE: Self = Self(0);

    fn from_percentage(value: f64) -> Self {
        let rounded = value.round().clamp(0.0, f64::from(FULL_MATCH));
        Self(rounded as u8)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub fn band(self) -> CompatibilityBand {
        CompatibilityBand::for_percentage(self.0)
    }
}

impl TryFrom<u8> for Compatibility {
    type Error = CompatibilityRangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > FULL_MATCH {
            return Err(CompatibilityRangeError { value });
        }
        Ok(Self(value))
    }
}

impl From<Compatibility> for u8 {
    fn from(compatibility: Compatibility) -> Self {
        compatibility.0
    }
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Coarse bucket used to highlight a compatibility percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityBand {
    Strong,
    Moderate,
    Weak,
}

impl CompatibilityBand {
    pub const fn for_percentage(value: u8) -> Self {
        if value > 70 {
            Self::Strong
        } else if value > 40 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CompatibilityBand::Strong => "strong",
            CompatibilityBand::Moderate => "moderate",
            CompatibilityBand::Weak => "weak",
        }
    }
}

/// Stateless scorer bound to one formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompatibilityScorer {
    formula: ScoringFormula,
}

impl CompatibilityScorer {
    pub const fn new(formula: ScoringFormula) -> Self {
        Self { formula }
    }

    pub const fn formula(&self) -> ScoringFormula {
        self.formula
    }

    pub fn score(&self, required: &[RequiredSkill], candidate: &[CandidateSkill]) -> Compatibility {
        if required.is_empty() {
            return Compatibility::FULL;
        }

        let grades = candidate_grades(candidate);
        let count = required.len() as f64;

        let percentage = match self.formula {
            ScoringFormula::BinaryGap => {
                let total_gap: f64 = required
                    .iter()
                    .map(|requirement| {
                        let gap = skill_gap(requirement, &grades);
                        f64::from(gap) / f64::from(ProficiencyGrade::MAX.value()) * 100.0
                    })
                    .sum();
                100.0 - total_gap / count
            }
            ScoringFormula::PartialCredit => {
                let total_credit: f64 = required
                    .iter()
                    .map(|requirement| fulfillment(requirement, &grades))
                    .sum();
                total_credit / count * 100.0
            }
        };

        Compatibility::from_percentage(percentage)
    }

    /// Score plus the per-skill comparison rows used for bar charts.
    pub fn evaluate(
        &self,
        required: &[RequiredSkill],
        candidate: &[CandidateSkill],
        catalog: &SkillCatalog,
    ) -> CompatibilityResult {
        let compatibility = self.score(required, candidate);
        CompatibilityResult {
            compatibility,
            band: compatibility.band(),
            formula: self.formula,
            breakdown: compare_skills(required, candidate, catalog),
        }
    }
}

/// Grades keyed by skill. A skill listed twice keeps its last grade.
pub(crate) fn candidate_grades(candidate: &[CandidateSkill]) -> HashMap<SkillId, ProficiencyGrade> {
    candidate
        .iter()
        .map(|skill| (skill.skill_id, skill.actual_grade))
        .collect()
}

pub(crate) fn actual_grade(
    requirement: &RequiredSkill,
    grades: &HashMap<SkillId, ProficiencyGrade>,
) -> ProficiencyGrade {
    grades
        .get(&requirement.skill_id)
        .copied()
        .unwrap_or(ProficiencyGrade::NONE)
}

pub(crate) fn skill_gap(
    requirement: &RequiredSkill,
    grades: &HashMap<SkillId, ProficiencyGrade>,
) -> u8 {
    requirement
        .target_grade
        .value()
        .saturating_sub(actual_grade(requirement, grades).value())
}

fn fulfillment(requirement: &RequiredSkill, grades: &HashMap<SkillId, ProficiencyGrade>) -> f64 {
    let target = requirement.target_grade.value();
    if target == 0 {
        return 1.0;
    }
    let actual = actual_grade(requirement, grades).value();
    (f64::from(actual) / f64::from(target)).min(1.0)
}
