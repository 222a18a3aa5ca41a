use serde::{Deserialize, Serialize};

use super::compatibility::{
    actual_grade, candidate_grades, skill_gap, Compatibility, CompatibilityBand, ScoringFormula,
};
use crate::talent::{CandidateSkill, ProficiencyGrade, RequiredSkill, SkillCatalog, SkillId};

/// One required skill compared against the candidate, ready for a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillComparison {
    pub skill_id: SkillId,
    pub skill_name: String,
    pub required_grade: ProficiencyGrade,
    pub actual_grade: ProficiencyGrade,
    /// Grades missing to reach the target; zero when met or exceeded.
    pub gap: u8,
    pub required_fraction: f32,
    pub actual_fraction: f32,
    pub gap_fraction: f32,
}

/// Score, band and the per-skill rows behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub compatibility: Compatibility,
    pub band: CompatibilityBand,
    pub formula: ScoringFormula,
    pub breakdown: Vec<SkillComparison>,
}

/// Compare each required skill with the candidate's grade, in requirement order.
///
/// Requirements whose skill is missing from the catalog have no display name and are
/// left out; they still count toward the numeric score.
pub fn compare_skills(
    required: &[RequiredSkill],
    candidate: &[CandidateSkill],
    catalog: &SkillCatalog,
) -> Vec<SkillComparison> {
    let grades = candidate_grades(candidate);

    required
        .iter()
        .filter_map(|requirement| {
            let skill_name = catalog.name(requirement.skill_id)?.to_string();
            let actual = actual_grade(requirement, &grades);
            let required_fraction = scale_fraction(requirement.target_grade);
            let actual_fraction = scale_fraction(actual);

            Some(SkillComparison {
                skill_id: requirement.skill_id,
                skill_name,
                required_grade: requirement.target_grade,
                actual_grade: actual,
                gap: skill_gap(requirement, &grades),
                required_fraction,
                actual_fraction,
                gap_fraction: (required_fraction - actual_fraction).max(0.0),
            })
        })
        .collect()
}

fn scale_fraction(grade: ProficiencyGrade) -> f32 {
    (f32::from(grade.value()) / f32::from(ProficiencyGrade::MAX.value())).clamp(0.0, 1.0)
}
