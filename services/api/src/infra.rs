use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talent_match::matching::ScoringFormula;
use talent_match::talent::{
    CandidateSkill, Department, DepartmentId, DirectoryError, ProficiencyGrade, Profile,
    ProfileId, RequiredSkill, Roster, RosterImportError, RosterImporter, Skill, SkillCatalog,
    SkillId, TalentDirectory, Vacancy, VacancyId, VacancyStatus,
};

const DEMO_ROSTER: &[u8] = include_bytes!("../../../crates/talent-match/data/sample_roster.csv");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Directory served from memory: demo vacancies and departments plus roster profiles.
#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryDirectory {
    skills: SkillCatalog,
    departments: Vec<Department>,
    profiles: Vec<Profile>,
    vacancies: Vec<Vacancy>,
}

impl InMemoryDirectory {
    pub(crate) fn demo() -> Result<Self, RosterImportError> {
        let roster = RosterImporter::from_reader(DEMO_ROSTER)?;
        Ok(Self {
            skills: SkillCatalog::from_skills(demo_skills()),
            departments: demo_departments(),
            profiles: Vec::new(),
            vacancies: demo_vacancies(),
        }
        .with_roster(roster))
    }

    /// Replace the profiles with the roster's and learn its skill names.
    pub(crate) fn with_roster(mut self, roster: Roster) -> Self {
        for skill in roster.skills.skills() {
            self.skills.insert(skill);
        }
        self.profiles = roster.profiles;
        self
    }
}

impl TalentDirectory for InMemoryDirectory {
    fn skills(&self) -> Result<Vec<Skill>, DirectoryError> {
        Ok(self.skills.skills())
    }

    fn departments(&self) -> Result<Vec<Department>, DirectoryError> {
        Ok(self.departments.clone())
    }

    fn profiles(&self) -> Result<Vec<Profile>, DirectoryError> {
        Ok(self.profiles.clone())
    }

    fn profile(&self, id: &ProfileId) -> Result<Option<Profile>, DirectoryError> {
        Ok(self.profiles.iter().find(|profile| &profile.id == id).cloned())
    }

    fn vacancies(&self) -> Result<Vec<Vacancy>, DirectoryError> {
        Ok(self.vacancies.clone())
    }

    fn vacancy(&self, id: VacancyId) -> Result<Option<Vacancy>, DirectoryError> {
        Ok(self.vacancies.iter().find(|vacancy| vacancy.id == id).cloned())
    }
}

fn demo_skills() -> Vec<Skill> {
    [(1, "ReactJS"), (2, "SQL"), (3, "Python"), (4, "Kotlin"), (5, "Figma")]
        .into_iter()
        .map(|(id, name)| Skill {
            id: SkillId(id),
            name: name.to_string(),
        })
        .collect()
}

fn demo_departments() -> Vec<Department> {
    [(1, "Engineering"), (2, "Data & Analytics")]
        .into_iter()
        .map(|(id, name)| Department {
            id: DepartmentId(id),
            name: name.to_string(),
            created_at: None,
        })
        .collect()
}

fn demo_vacancies() -> Vec<Vacancy> {
    vec![
        Vacancy {
            id: VacancyId(1),
            title: "Frontend Engineer".to_string(),
            description: Some("Customer portal rebuild".to_string()),
            department_id: Some(DepartmentId(1)),
            status: VacancyStatus::Open,
            required_skills: vec![requirement(1, 3), requirement(2, 2)],
        },
        Vacancy {
            id: VacancyId(2),
            title: "Data Analyst".to_string(),
            description: None,
            department_id: Some(DepartmentId(2)),
            status: VacancyStatus::Open,
            required_skills: vec![requirement(2, 3), requirement(3, 2)],
        },
        Vacancy {
            id: VacancyId(3),
            title: "Android Developer".to_string(),
            description: Some("Field inspection app".to_string()),
            department_id: Some(DepartmentId(1)),
            status: VacancyStatus::Closed,
            required_skills: vec![requirement(4, 3)],
        },
    ]
}

fn requirement(skill_id: u32, grade: u8) -> RequiredSkill {
    RequiredSkill {
        skill_id: SkillId(skill_id),
        target_grade: ProficiencyGrade::new(grade).unwrap_or(ProficiencyGrade::MAX),
    }
}

/// Parse `ID:GRADE`, e.g. `2:3`.
pub(crate) fn parse_skill_grade(raw: &str) -> Result<(SkillId, ProficiencyGrade), String> {
    let (id, grade) = raw
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected ID:GRADE, got '{raw}'"))?;
    let id = id
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("invalid skill id in '{raw}' ({err})"))?;
    let grade = grade
        .trim()
        .parse::<u8>()
        .map_err(|err| format!("invalid grade in '{raw}' ({err})"))?;
    let grade = ProficiencyGrade::new(grade).map_err(|err| err.to_string())?;
    Ok((SkillId(id), grade))
}

pub(crate) fn parse_required_skill(raw: &str) -> Result<RequiredSkill, String> {
    parse_skill_grade(raw).map(|(skill_id, target_grade)| RequiredSkill {
        skill_id,
        target_grade,
    })
}

pub(crate) fn parse_candidate_skill(raw: &str) -> Result<CandidateSkill, String> {
    parse_skill_grade(raw).map(|(skill_id, actual_grade)| CandidateSkill {
        skill_id,
        actual_grade,
    })
}

pub(crate) fn parse_formula(raw: &str) -> Result<ScoringFormula, String> {
    raw.parse()
}
