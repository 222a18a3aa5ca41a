use talent_match::matching::{
    rank_candidates, CompatibilityBand, CompatibilityScorer, ScoringFormula,
};
use talent_match::session::{Dashboard, Section, Session};
use talent_match::talent::{
    ProficiencyGrade, ProfileId, RequiredSkill, Role, RosterImporter, SkillId,
};

fn requirement(skill_id: u32, grade: u8) -> RequiredSkill {
    RequiredSkill {
        skill_id: SkillId(skill_id),
        target_grade: ProficiencyGrade::new(grade).expect("grade within scale"),
    }
}

#[test]
fn sample_roster_imports_profiles_and_skill_names() {
    let data = include_bytes!("../data/sample_roster.csv");

    let roster = RosterImporter::from_reader(&data[..]).expect("roster imports");

    assert_eq!(roster.profiles.len(), 6);
    assert_eq!(roster.skills.len(), 4);
    assert_eq!(roster.skills.name(SkillId(3)), Some("Python"));

    let admin = roster
        .profiles
        .iter()
        .find(|profile| profile.id == ProfileId("p-900".to_string()))
        .expect("admin imported");
    assert_eq!(admin.role, Role::Admin);
    assert!(admin.skills.is_empty());
    assert!(admin.department_id.is_none());
}

#[test]
fn imported_roster_ranks_frontend_candidates() {
    let data = include_bytes!("../data/sample_roster.csv");
    let roster = RosterImporter::from_reader(&data[..]).expect("roster imports");
    let required = [requirement(1, 3), requirement(2, 2)];

    let ranked = rank_candidates(
        &CompatibilityScorer::new(ScoringFormula::BinaryGap),
        &required,
        &roster.profiles,
    );

    let top: Vec<(&str, u8)> = ranked
        .iter()
        .take(3)
        .map(|candidate| (candidate.profile_id.0.as_str(), candidate.compatibility.value()))
        .collect();
    assert_eq!(top, vec![("p-101", 100), ("p-100", 83), ("p-103", 50)]);
    assert_eq!(ranked[0].band, CompatibilityBand::Strong);
    assert!(ranked
        .windows(2)
        .all(|pair| pair[0].compatibility >= pair[1].compatibility));
}

#[test]
fn scorer_breakdown_uses_roster_catalog_names() {
    let data = include_bytes!("../data/sample_roster.csv");
    let roster = RosterImporter::from_reader(&data[..]).expect("roster imports");
    let ana = &roster.profiles[0];
    let required = [requirement(1, 3), requirement(2, 2)];

    let result = CompatibilityScorer::new(ScoringFormula::PartialCredit).evaluate(
        &required,
        &ana.skills,
        &roster.skills,
    );

    assert_eq!(result.compatibility.value(), 75);
    let names: Vec<&str> = result
        .breakdown
        .iter()
        .map(|row| row.skill_name.as_str())
        .collect();
    assert_eq!(names, vec!["ReactJS", "SQL"]);
    assert_eq!(result.breakdown[1].gap, 1);
}

#[test]
fn roster_roles_land_on_their_dashboards() {
    let data = include_bytes!("../data/sample_roster.csv");
    let roster = RosterImporter::from_reader(&data[..]).expect("roster imports");

    let dashboards: Vec<Dashboard> = roster
        .profiles
        .iter()
        .map(|profile| Session::for_profile(profile).dashboard())
        .collect();

    assert!(matches!(dashboards[0], Dashboard::Collaborator { .. }));
    assert_eq!(dashboards[4], Dashboard::Leader);
    assert_eq!(dashboards[5], Dashboard::Admin);
    assert!(dashboards[5].allows(Section::BulkUpload));
    assert!(!dashboards[4].allows(Section::BulkUpload));
}
