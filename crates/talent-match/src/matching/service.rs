use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::breakdown::{CompatibilityResult, SkillComparison};
use super::compatibility::{Compatibility, CompatibilityBand, CompatibilityScorer, ScoringFormula};
use super::ranking::{rank_candidates, RecommendedCandidate};
use crate::reports::{coverage_report, CoverageReport};
use crate::session::Session;
use crate::talent::{
    CandidateSkill, DepartmentDirectory, DepartmentId, DirectoryError, ProficiencyGrade, Profile,
    ProfileId, RequiredSkill, Role, SkillCatalog, SkillId, TalentDirectory, VacancyId,
    VacancyStatus,
};

/// Service combining the talent directory with the compatibility scorer.
pub struct MatchingService<D> {
    directory: Arc<D>,
    scorer: CompatibilityScorer,
}

impl<D> MatchingService<D>
where
    D: TalentDirectory + 'static,
{
    pub fn new(directory: Arc<D>, formula: ScoringFormula) -> Self {
        Self {
            directory,
            scorer: CompatibilityScorer::new(formula),
        }
    }

    pub fn formula(&self) -> ScoringFormula {
        self.scorer.formula()
    }

    /// Score an ad-hoc pair of skill lists, optionally with a different formula.
    pub fn evaluate(
        &self,
        formula: Option<ScoringFormula>,
        required: &[RequiredSkill],
        candidate: &[CandidateSkill],
    ) -> CompatibilityResult {
        let scorer = formula.map(CompatibilityScorer::new).unwrap_or(self.scorer);
        let catalog = self.skill_catalog();
        let result = scorer.evaluate(required, candidate, &catalog);
        debug!(
            formula = %result.formula,
            compatibility = result.compatibility.value(),
            required = required.len(),
            "ad-hoc compatibility evaluated"
        );
        result
    }

    /// Resolve the identity context for a signed-in profile.
    pub fn session_for(&self, profile_id: &ProfileId) -> Result<Session, MatchingServiceError> {
        let profile = self
            .directory
            .profile(profile_id)?
            .ok_or_else(|| MatchingServiceError::ProfileNotFound(profile_id.clone()))?;
        Ok(Session::for_profile(&profile))
    }

    /// Vacancy detail plus every profile ranked by compatibility.
    pub fn vacancy_overview(
        &self,
        session: &Session,
        vacancy_id: VacancyId,
    ) -> Result<VacancyOverview, MatchingServiceError> {
        authorize(session)?;

        let vacancy = self
            .directory
            .vacancy(vacancy_id)?
            .ok_or(MatchingServiceError::VacancyNotFound(vacancy_id))?;
        let catalog = self.skill_catalog();
        let departments = self.department_directory();
        let profiles = self.all_profiles();

        let required_skills = vacancy
            .required_skills
            .iter()
            .filter_map(|requirement| {
                catalog
                    .name(requirement.skill_id)
                    .map(|name| RequiredSkillView {
                        skill_id: requirement.skill_id,
                        skill_name: name.to_string(),
                        target_grade: requirement.target_grade,
                    })
            })
            .collect();

        let candidates = rank_candidates(&self.scorer, &vacancy.required_skills, &profiles);

        info!(
            vacancy_id = %vacancy.id,
            requested_by = %session.profile_id,
            candidates = candidates.len(),
            formula = %self.scorer.formula(),
            "vacancy candidates ranked"
        );

        Ok(VacancyOverview {
            vacancy: VacancyDetailView {
                id: vacancy.id,
                title: vacancy.title,
                department: departments.name_or_unknown(vacancy.department_id),
                status: vacancy.status,
                required_skills,
            },
            formula: self.scorer.formula(),
            candidates,
        })
    }

    /// Per-skill comparison of one candidate against a vacancy.
    pub fn candidate_gap(
        &self,
        session: &Session,
        vacancy_id: VacancyId,
        profile_id: &ProfileId,
    ) -> Result<CandidateGapReport, MatchingServiceError> {
        authorize(session)?;

        let vacancy = self
            .directory
            .vacancy(vacancy_id)?
            .ok_or(MatchingServiceError::VacancyNotFound(vacancy_id))?;
        let profile = self
            .directory
            .profile(profile_id)?
            .ok_or_else(|| MatchingServiceError::ProfileNotFound(profile_id.clone()))?;
        let catalog = self.skill_catalog();
        let departments = self.department_directory();

        let result = self
            .scorer
            .evaluate(&vacancy.required_skills, &profile.skills, &catalog);

        info!(
            vacancy_id = %vacancy.id,
            profile_id = %profile.id,
            compatibility = result.compatibility.value(),
            "candidate gap computed"
        );

        Ok(CandidateGapReport {
            vacancy_id: vacancy.id,
            vacancy_title: vacancy.title,
            profile_id: profile.id,
            full_name: profile.full_name,
            position: profile.position,
            department: departments.name_or_unknown(profile.department_id),
            is_available_for_change: profile.is_available_for_change,
            compatibility: result.compatibility,
            band: result.band,
            formula: result.formula,
            breakdown: result.breakdown,
        })
    }

    /// Closed-vacancy coverage, overall or for one department.
    pub fn coverage(
        &self,
        session: &Session,
        department_id: Option<DepartmentId>,
    ) -> Result<CoverageReport, MatchingServiceError> {
        authorize(session)?;

        let vacancies = self.directory.vacancies()?;
        let report = coverage_report(&vacancies, department_id, Utc::now());
        debug!(
            total = report.total_vacancies,
            closed = report.closed_vacancies,
            "coverage report built"
        );
        Ok(report)
    }

    fn skill_catalog(&self) -> SkillCatalog {
        match self.directory.skills() {
            Ok(skills) => SkillCatalog::from_skills(skills),
            Err(error) => {
                warn!(%error, "skill catalog unavailable; breakdown names omitted");
                SkillCatalog::default()
            }
        }
    }

    fn department_directory(&self) -> DepartmentDirectory {
        match self.directory.departments() {
            Ok(departments) => DepartmentDirectory::from_departments(departments),
            Err(error) => {
                warn!(%error, "department lookup unavailable");
                DepartmentDirectory::default()
            }
        }
    }

    fn all_profiles(&self) -> Vec<Profile> {
        match self.directory.profiles() {
            Ok(profiles) => profiles,
            Err(error) => {
                warn!(%error, "profile listing unavailable; no candidates ranked");
                Vec::new()
            }
        }
    }
}

fn authorize(session: &Session) -> Result<(), MatchingServiceError> {
    if session.can_review_candidates() {
        Ok(())
    } else {
        Err(MatchingServiceError::Forbidden { role: session.role })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredSkillView {
    pub skill_id: SkillId,
    pub skill_name: String,
    pub target_grade: ProficiencyGrade,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyDetailView {
    pub id: VacancyId,
    pub title: String,
    pub department: String,
    pub status: VacancyStatus,
    pub required_skills: Vec<RequiredSkillView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyOverview {
    pub vacancy: VacancyDetailView,
    pub formula: ScoringFormula,
    pub candidates: Vec<RecommendedCandidate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateGapReport {
    pub vacancy_id: VacancyId,
    pub vacancy_title: String,
    pub profile_id: ProfileId,
    pub full_name: String,
    pub position: String,
    pub department: String,
    pub is_available_for_change: bool,
    pub compatibility: Compatibility,
    pub band: CompatibilityBand,
    pub formula: ScoringFormula,
    pub breakdown: Vec<SkillComparison>,
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingServiceError {
    #[error("vacancy {0} not found")]
    VacancyNotFound(VacancyId),
    #[error("profile {0} not found")]
    ProfileNotFound(ProfileId),
    #[error("role {role} may not review candidates")]
    Forbidden { role: Role },
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
