use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::matching::{matching_router, MatchingService, ScoringFormula};
use crate::session::Session;
use crate::talent::{
    CandidateSkill, Department, DepartmentId, DirectoryError, ProficiencyGrade, Profile,
    ProfileId, RequiredSkill, Role, Skill, SkillId, TalentDirectory, Vacancy, VacancyId,
    VacancyStatus,
};

pub(super) const REACT: SkillId = SkillId(1);
pub(super) const SQL: SkillId = SkillId(2);
pub(super) const KOTLIN: SkillId = SkillId(4);

pub(super) const FRONTEND: VacancyId = VacancyId(10);
pub(super) const ANALYST: VacancyId = VacancyId(11);
pub(super) const INTERN: VacancyId = VacancyId(12);

pub(super) fn grade(value: u8) -> ProficiencyGrade {
    ProficiencyGrade::new(value).expect("grade within scale")
}

fn holds(skill_id: SkillId, value: u8) -> CandidateSkill {
    CandidateSkill {
        skill_id,
        actual_grade: grade(value),
    }
}

fn require(skill_id: SkillId, value: u8) -> RequiredSkill {
    RequiredSkill {
        skill_id,
        target_grade: grade(value),
    }
}

pub(super) fn skills() -> Vec<Skill> {
    vec![
        Skill {
            id: REACT,
            name: "ReactJS".to_string(),
        },
        Skill {
            id: SQL,
            name: "SQL".to_string(),
        },
        Skill {
            id: SkillId(3),
            name: "Rust".to_string(),
        },
        Skill {
            id: KOTLIN,
            name: "Kotlin".to_string(),
        },
    ]
}

pub(super) fn departments() -> Vec<Department> {
    vec![
        Department {
            id: DepartmentId(1),
            name: "Engineering".to_string(),
            created_at: None,
        },
        Department {
            id: DepartmentId(2),
            name: "Data".to_string(),
            created_at: None,
        },
    ]
}

fn person(
    id: &str,
    full_name: &str,
    role: Role,
    department: Option<u32>,
    skills: Vec<CandidateSkill>,
) -> Profile {
    Profile {
        id: ProfileId(id.to_string()),
        full_name: full_name.to_string(),
        position: "Engineer".to_string(),
        department_id: department.map(DepartmentId),
        role,
        is_available_for_change: true,
        skills,
    }
}

/// Directory order: leader, admin, ana, ben, cleo.
pub(super) fn profiles() -> Vec<Profile> {
    vec![
        person("p-lead", "Lucia Leader", Role::Leader, Some(1), Vec::new()),
        person("p-admin", "Omar Admin", Role::Admin, None, Vec::new()),
        person(
            "p-ana",
            "Ana Torres",
            Role::Collaborator,
            Some(1),
            vec![holds(REACT, 3), holds(SQL, 1)],
        ),
        person(
            "p-ben",
            "Ben Ruiz",
            Role::Collaborator,
            Some(1),
            vec![holds(REACT, 3), holds(SQL, 2)],
        ),
        person(
            "p-cleo",
            "Cleo Vargas",
            Role::Collaborator,
            Some(2),
            vec![holds(KOTLIN, 3)],
        ),
    ]
}

pub(super) fn vacancies() -> Vec<Vacancy> {
    vec![
        Vacancy {
            id: FRONTEND,
            title: "Frontend Engineer".to_string(),
            description: Some("Customer portal".to_string()),
            department_id: Some(DepartmentId(1)),
            status: VacancyStatus::Open,
            required_skills: vec![require(REACT, 3), require(SQL, 2)],
        },
        Vacancy {
            id: ANALYST,
            title: "Data Analyst".to_string(),
            description: None,
            department_id: Some(DepartmentId(2)),
            status: VacancyStatus::Closed,
            required_skills: vec![require(SQL, 3)],
        },
        Vacancy {
            id: INTERN,
            title: "Engineering Intern".to_string(),
            description: None,
            department_id: Some(DepartmentId(1)),
            status: VacancyStatus::Open,
            required_skills: Vec::new(),
        },
    ]
}

#[derive(Clone)]
pub(super) struct MemoryDirectory {
    skills: Vec<Skill>,
    departments: Vec<Department>,
    profiles: Vec<Profile>,
    vacancies: Vec<Vacancy>,
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self {
            skills: skills(),
            departments: departments(),
            profiles: profiles(),
            vacancies: vacancies(),
        }
    }
}

impl TalentDirectory for MemoryDirectory {
    fn skills(&self) -> Result<Vec<Skill>, DirectoryError> {
        Ok(self.skills.clone())
    }

    fn departments(&self) -> Result<Vec<Department>, DirectoryError> {
        Ok(self.departments.clone())
    }

    fn profiles(&self) -> Result<Vec<Profile>, DirectoryError> {
        Ok(self.profiles.clone())
    }

    fn profile(&self, id: &ProfileId) -> Result<Option<Profile>, DirectoryError> {
        Ok(self
            .profiles
            .iter()
            .find(|profile| &profile.id == id)
            .cloned())
    }

    fn vacancies(&self) -> Result<Vec<Vacancy>, DirectoryError> {
        Ok(self.vacancies.clone())
    }

    fn vacancy(&self, id: VacancyId) -> Result<Option<Vacancy>, DirectoryError> {
        Ok(self
            .vacancies
            .iter()
            .find(|vacancy| vacancy.id == id)
            .cloned())
    }
}

/// Lookup endpoints fail while single-record reads keep working.
#[derive(Default)]
pub(super) struct CatalogOutageDirectory {
    inner: MemoryDirectory,
}

impl TalentDirectory for CatalogOutageDirectory {
    fn skills(&self) -> Result<Vec<Skill>, DirectoryError> {
        Err(DirectoryError::Unavailable("skills timeout".to_string()))
    }

    fn departments(&self) -> Result<Vec<Department>, DirectoryError> {
        Err(DirectoryError::Unavailable("departments timeout".to_string()))
    }

    fn profiles(&self) -> Result<Vec<Profile>, DirectoryError> {
        Err(DirectoryError::Unavailable("profiles timeout".to_string()))
    }

    fn profile(&self, id: &ProfileId) -> Result<Option<Profile>, DirectoryError> {
        self.inner.profile(id)
    }

    fn vacancies(&self) -> Result<Vec<Vacancy>, DirectoryError> {
        self.inner.vacancies()
    }

    fn vacancy(&self, id: VacancyId) -> Result<Option<Vacancy>, DirectoryError> {
        self.inner.vacancy(id)
    }
}

pub(super) struct UnavailableDirectory;

impl TalentDirectory for UnavailableDirectory {
    fn skills(&self) -> Result<Vec<Skill>, DirectoryError> {
        Err(DirectoryError::Unavailable("backend offline".to_string()))
    }

    fn departments(&self) -> Result<Vec<Department>, DirectoryError> {
        Err(DirectoryError::Unavailable("backend offline".to_string()))
    }

    fn profiles(&self) -> Result<Vec<Profile>, DirectoryError> {
        Err(DirectoryError::Unavailable("backend offline".to_string()))
    }

    fn profile(&self, _id: &ProfileId) -> Result<Option<Profile>, DirectoryError> {
        Err(DirectoryError::Unavailable("backend offline".to_string()))
    }

    fn vacancies(&self) -> Result<Vec<Vacancy>, DirectoryError> {
        Err(DirectoryError::Unavailable("backend offline".to_string()))
    }

    fn vacancy(&self, _id: VacancyId) -> Result<Option<Vacancy>, DirectoryError> {
        Err(DirectoryError::Unavailable("backend offline".to_string()))
    }
}

pub(super) fn build_service(formula: ScoringFormula) -> MatchingService<MemoryDirectory> {
    MatchingService::new(Arc::new(MemoryDirectory::default()), formula)
}

pub(super) fn session(profile_id: &str) -> Session {
    let profile = profiles()
        .into_iter()
        .find(|profile| profile.id.0 == profile_id)
        .expect("fixture profile exists");
    Session::for_profile(&profile)
}

pub(super) fn leader() -> Session {
    session("p-lead")
}

pub(super) fn router_with_directory<D>(directory: D) -> axum::Router
where
    D: TalentDirectory + 'static,
{
    matching_router(Arc::new(MatchingService::new(
        Arc::new(directory),
        ScoringFormula::BinaryGap,
    )))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
