use super::domain::{Department, Profile, ProfileId, Skill, Vacancy, VacancyId};

/// Read access to the talent backend (profiles, skills, vacancies, departments).
///
/// Implementations wrap the remote REST API in production; the service binary and
/// tests use in-memory directories.
pub trait TalentDirectory: Send + Sync {
    fn skills(&self) -> Result<Vec<Skill>, DirectoryError>;
    fn departments(&self) -> Result<Vec<Department>, DirectoryError>;
    fn profiles(&self) -> Result<Vec<Profile>, DirectoryError>;
    fn profile(&self, id: &ProfileId) -> Result<Option<Profile>, DirectoryError>;
    fn vacancies(&self) -> Result<Vec<Vacancy>, DirectoryError>;
    fn vacancy(&self, id: VacancyId) -> Result<Option<Vacancy>, DirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("record not found")]
    NotFound,
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}
