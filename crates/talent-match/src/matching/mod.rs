//! Candidate-to-vacancy matching: the compatibility scorer, per-skill breakdowns,
//! candidate ranking, and the service/router pair that serves them.

pub mod breakdown;
pub mod compatibility;
pub mod ranking;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use breakdown::{compare_skills, CompatibilityResult, SkillComparison};
pub use compatibility::{
    Compatibility, CompatibilityBand, CompatibilityRangeError, CompatibilityScorer, ScoringFormula,
};
pub use ranking::{rank_candidates, RecommendedCandidate};
pub use router::{matching_router, EvaluateRequest, PROFILE_HEADER};
pub use service::{
    CandidateGapReport, MatchingService, MatchingServiceError, RequiredSkillView,
    VacancyDetailView, VacancyOverview,
};
