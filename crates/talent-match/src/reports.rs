use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::talent::{DepartmentId, Vacancy, VacancyStatus};

pub const COVERAGE_METRIC_NAME: &str = "Vacancy coverage rate";

/// Share of vacancies already filled (closed), overall or for one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DepartmentId>,
    pub total_vacancies: usize,
    pub closed_vacancies: usize,
    pub coverage_pct: f32,
    pub generated_at: DateTime<Utc>,
}

pub fn coverage_report(
    vacancies: &[Vacancy],
    department_id: Option<DepartmentId>,
    generated_at: DateTime<Utc>,
) -> CoverageReport {
    let in_scope: Vec<&Vacancy> = vacancies
        .iter()
        .filter(|vacancy| department_id.is_none() || vacancy.department_id == department_id)
        .collect();

    let total_vacancies = in_scope.len();
    let closed_vacancies = in_scope
        .iter()
        .filter(|vacancy| vacancy.status == VacancyStatus::Closed)
        .count();

    let coverage_pct = if total_vacancies > 0 {
        closed_vacancies as f32 / total_vacancies as f32 * 100.0
    } else {
        0.0
    };

    CoverageReport {
        name: COVERAGE_METRIC_NAME.to_string(),
        department_id,
        total_vacancies,
        closed_vacancies,
        coverage_pct,
        generated_at,
    }
}
