//! Talent records consumed by the matching core: profiles, skills, vacancies and the
//! directory abstraction over the backend that serves them.

pub mod catalog;
pub mod directory;
pub mod domain;
pub mod roster;

pub use catalog::{DepartmentDirectory, SkillCatalog, UNKNOWN_DEPARTMENT};
pub use directory::{DirectoryError, TalentDirectory};
pub use domain::{
    CandidateSkill, Department, DepartmentId, GradeError, ProficiencyGrade, Profile, ProfileId,
    RequiredSkill, Role, Skill, SkillId, Vacancy, VacancyId, VacancyStatus,
};
pub use roster::{Roster, RosterImportError, RosterImporter};
