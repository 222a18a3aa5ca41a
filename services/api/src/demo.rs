use crate::infra::{parse_candidate_skill, parse_formula, parse_required_skill, InMemoryDirectory};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use talent_match::config::AppConfig;
use talent_match::error::AppError;
use talent_match::matching::{
    rank_candidates, CandidateGapReport, CompatibilityResult, CompatibilityScorer,
    MatchingService, ScoringFormula, SkillComparison,
};
use talent_match::session::Session;
use talent_match::store::{BoardPhase, VacancyBoardController};
use talent_match::talent::{
    CandidateSkill, RequiredSkill, Role, RosterImporter, Skill, SkillCatalog, TalentDirectory,
};

const BAR_WIDTH: usize = 12;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Required skill as ID:GRADE (repeatable)
    #[arg(long, value_parser = parse_required_skill)]
    pub(crate) require: Vec<RequiredSkill>,
    /// Candidate skill as ID:GRADE (repeatable)
    #[arg(long, value_parser = parse_candidate_skill)]
    pub(crate) have: Vec<CandidateSkill>,
    /// Scoring formula: binary_gap (default) or partial_credit
    #[arg(long, value_parser = parse_formula)]
    pub(crate) formula: Option<ScoringFormula>,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Roster CSV export to rank
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Required skill as ID:GRADE (repeatable)
    #[arg(long, value_parser = parse_required_skill)]
    pub(crate) require: Vec<RequiredSkill>,
    /// Scoring formula: binary_gap (default) or partial_credit
    #[arg(long, value_parser = parse_formula)]
    pub(crate) formula: Option<ScoringFormula>,
    /// Maximum number of candidates to print
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Roster CSV whose profiles replace the demo profiles
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Scoring formula: binary_gap (default) or partial_credit
    #[arg(long, value_parser = parse_formula)]
    pub(crate) formula: Option<ScoringFormula>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let scorer = CompatibilityScorer::new(resolve_formula(args.formula)?);
    let result = scorer.evaluate(&args.require, &args.have, &numbered_catalog(&args.require));
    render_result(&result);
    Ok(())
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let roster = RosterImporter::from_path(&args.roster)?;
    let scorer = CompatibilityScorer::new(resolve_formula(args.formula)?);
    let ranked = rank_candidates(&scorer, &args.require, &roster.profiles);

    println!(
        "Ranked {} profiles from {} ({})",
        ranked.len(),
        args.roster.display(),
        scorer.formula()
    );
    for (position, candidate) in ranked.iter().take(args.limit).enumerate() {
        println!(
            "{:>3}. {:<24} {:>3}% [{}]{}",
            position + 1,
            candidate.full_name,
            candidate.compatibility.value(),
            candidate.band.label(),
            if candidate.is_available_for_change {
                " open to change"
            } else {
                ""
            }
        );

        let Some(profile) = roster
            .profiles
            .iter()
            .find(|profile| profile.id == candidate.profile_id)
        else {
            continue;
        };
        let shortfalls: Vec<String> = scorer
            .evaluate(&args.require, &profile.skills, &roster.skills)
            .breakdown
            .iter()
            .filter(|row| row.gap > 0)
            .map(|row| format!("{} -{}", row.skill_name, row.gap))
            .collect();
        if !shortfalls.is_empty() {
            println!("       gaps: {}", shortfalls.join(", "));
        }
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let mut directory = InMemoryDirectory::demo()?;
    if let Some(path) = args.roster {
        directory = directory.with_roster(RosterImporter::from_path(path)?);
    }
    let formula = resolve_formula(args.formula)?;
    let directory = Arc::new(directory);
    let service = Arc::new(MatchingService::new(directory.clone(), formula));

    println!("Talent matching demo ({formula})");

    let profiles = directory.profiles()?;
    println!("\nSessions");
    for role in [Role::Collaborator, Role::Leader, Role::Admin] {
        let Some(profile) = profiles.iter().find(|profile| profile.role == role) else {
            continue;
        };
        let session = service.session_for(&profile.id)?;
        let sections: Vec<&str> = session
            .dashboard()
            .sections()
            .iter()
            .map(|section| section.label())
            .collect();
        println!(
            "- {} ({}): {}",
            session.full_name,
            session.role.label(),
            sections.join(", ")
        );
    }

    let Some(reviewer) = profiles
        .iter()
        .find(|profile| Session::for_profile(profile).can_review_candidates())
    else {
        println!("\nNo leader or admin in the roster; skipping candidate review.");
        return Ok(());
    };
    let session = Session::for_profile(reviewer);

    let vacancies = directory.vacancies()?;
    for vacancy in &vacancies {
        let overview = service.vacancy_overview(&session, vacancy.id)?;
        println!(
            "\n{} [{}] - {}",
            overview.vacancy.title,
            overview.vacancy.department,
            overview.vacancy.status.label()
        );
        for skill in &overview.vacancy.required_skills {
            println!(
                "  requires {} at {}",
                skill.skill_name,
                skill.target_grade.label()
            );
        }
        for candidate in overview.candidates.iter().take(3) {
            println!(
                "  {:>3}% {:<24} {}",
                candidate.compatibility.value(),
                candidate.full_name,
                candidate.band.label()
            );
        }
    }

    if let Some(vacancy) = vacancies.first() {
        let board = VacancyBoardController::new(service.clone(), session.clone());
        let state = board.open_vacancy(vacancy.id);
        let top = state
            .overview
            .as_ref()
            .and_then(|overview| overview.candidates.first())
            .map(|candidate| candidate.profile_id.clone());
        if let Some(profile_id) = top {
            let state = board.open_candidate(vacancy.id, &profile_id);
            if let Some(report) = &state.selected {
                render_gap_report(report);
            }
        }
        if let BoardPhase::Failed(message) = &board.snapshot().phase {
            println!("\nBoard error: {message}");
        }
    }

    let overall = service.coverage(&session, None)?;
    println!(
        "\n{}: {:.1}% ({} of {} closed)",
        overall.name, overall.coverage_pct, overall.closed_vacancies, overall.total_vacancies
    );
    for department in directory.departments()? {
        let report = service.coverage(&session, Some(department.id))?;
        println!(
            "  {:<20} {:.1}% ({} of {})",
            department.name,
            report.coverage_pct,
            report.closed_vacancies,
            report.total_vacancies
        );
    }

    Ok(())
}

/// `--formula` wins; otherwise the configured `MATCH_FORMULA` applies.
fn resolve_formula(flag: Option<ScoringFormula>) -> Result<ScoringFormula, AppError> {
    match flag {
        Some(formula) => Ok(formula),
        None => Ok(AppConfig::load()?.matching.formula),
    }
}

/// Names each required skill by its id so ad-hoc breakdowns stay readable.
fn numbered_catalog(required: &[RequiredSkill]) -> SkillCatalog {
    SkillCatalog::from_skills(required.iter().map(|requirement| Skill {
        id: requirement.skill_id,
        name: format!("skill {}", requirement.skill_id),
    }))
}

fn render_result(result: &CompatibilityResult) {
    println!(
        "Compatibility {}% [{}] using {}",
        result.compatibility.value(),
        result.band.label(),
        result.formula
    );
    for row in &result.breakdown {
        render_comparison(row);
    }
}

fn render_gap_report(report: &CandidateGapReport) {
    println!(
        "\nGap report: {} ({}, {}) for {}",
        report.full_name, report.position, report.department, report.vacancy_title
    );
    println!(
        "Compatibility {}% [{}]",
        report.compatibility.value(),
        report.band.label()
    );
    for row in &report.breakdown {
        render_comparison(row);
    }
}

fn render_comparison(row: &SkillComparison) {
    println!(
        "  {:<16} required {} {} | actual {} {} | gap {}",
        row.skill_name,
        bar(row.required_fraction),
        row.required_grade.value(),
        bar(row.actual_fraction),
        row.actual_grade.value(),
        row.gap
    );
}

fn bar(fraction: f32) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    #[test]
    fn bars_scale_with_fraction() {
        assert_eq!(bar(0.0), "............");
        assert_eq!(bar(1.0), "############");
        assert_eq!(bar(0.5), "######......");
    }

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn formula_flag_overrides_configuration() {
        let _guard = env_guard().lock().expect("env guard");
        env::set_var("MATCH_FORMULA", "binary_gap");

        let formula = resolve_formula(Some(ScoringFormula::PartialCredit)).expect("resolves");

        env::remove_var("MATCH_FORMULA");
        assert_eq!(formula, ScoringFormula::PartialCredit);
    }

    #[test]
    fn missing_flag_falls_back_to_configured_formula() {
        let _guard = env_guard().lock().expect("env guard");
        env::set_var("MATCH_FORMULA", "partial_credit");

        let formula = resolve_formula(None).expect("resolves");

        env::remove_var("MATCH_FORMULA");
        assert_eq!(formula, ScoringFormula::PartialCredit);
    }

    #[test]
    fn demo_runs_on_bundled_data() {
        let _guard = env_guard().lock().expect("env guard");
        run_demo(DemoArgs::default()).expect("demo completes");
    }
}
