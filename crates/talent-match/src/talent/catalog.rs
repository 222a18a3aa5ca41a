use std::collections::HashMap;

use super::domain::{Department, DepartmentId, Skill, SkillId};

/// Display name shown when a department cannot be resolved.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// Skill id to display name lookup used for human-readable breakdowns.
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    names: HashMap<SkillId, String>,
}

impl SkillCatalog {
    pub fn from_skills<I>(skills: I) -> Self
    where
        I: IntoIterator<Item = Skill>,
    {
        let mut catalog = Self::default();
        for skill in skills {
            catalog.insert(skill);
        }
        catalog
    }

    pub fn insert(&mut self, skill: Skill) {
        self.names.insert(skill.id, skill.name);
    }

    pub fn name(&self, id: SkillId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Skills ordered by id, for stable listings.
    pub fn skills(&self) -> Vec<Skill> {
        let mut skills: Vec<Skill> = self
            .names
            .iter()
            .map(|(id, name)| Skill {
                id: *id,
                name: name.clone(),
            })
            .collect();
        skills.sort_by_key(|skill| skill.id);
        skills
    }
}

#[derive(Debug, Clone, Default)]
pub struct DepartmentDirectory {
    names: HashMap<DepartmentId, String>,
}

impl DepartmentDirectory {
    pub fn from_departments<I>(departments: I) -> Self
    where
        I: IntoIterator<Item = Department>,
    {
        Self {
            names: departments
                .into_iter()
                .map(|department| (department.id, department.name))
                .collect(),
        }
    }

    pub fn name(&self, id: DepartmentId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn name_or_unknown(&self, id: Option<DepartmentId>) -> String {
        id.and_then(|id| self.name(id))
            .unwrap_or(UNKNOWN_DEPARTMENT)
            .to_string()
    }
}
