//! Rule tables for result ranking.
//!
//! Each mode is a list of named rules; a rule whose predicate holds adds its
//! delta to the organization's score. Keeping rules as data makes every
//! adjustment testable on its own and lets results report why they ranked.

use super::intent::{QueryAnalysis, RankingMode};
use super::keywords::{
    BEHAVIORAL_MARKERS, CLINICAL_FACILITY_INDICATORS, DIRECT_CARE_TERMS,
    DOMESTIC_VIOLENCE_MARKERS, HOSPITAL_MARKERS, HOTLINE_MARKERS, MENTAL_HEALTH_NAME_MARKERS,
    NON_CLINICAL_NAME_MARKERS, SUBSTANCE_RELATED, SUICIDE_SPECIFIC_MARKERS, TWELVE_STEP_MARKERS,
};
use super::matching::{MatchMode, OrgProfile, TermSet};
use crate::category::Category;
use std::sync::LazyLock;

/// Inputs visible to a rule predicate.
pub(crate) struct RuleContext<'q, 'a> {
    pub(crate) query: &'q QueryAnalysis,
    pub(crate) profile: &'q OrgProfile<'a>,
    pub(crate) direct: bool,
}

pub(crate) struct ScoringRule {
    pub(crate) name: &'static str,
    pub(crate) delta: i32,
    applies: fn(&RuleContext<'_, '_>) -> bool,
}

impl ScoringRule {
    const fn new(name: &'static str, delta: i32, applies: fn(&RuleContext<'_, '_>) -> bool) -> Self {
        Self {
            name,
            delta,
            applies,
        }
    }
}

pub(crate) static MEDICAL_RULES: &[ScoringRule] = &[
    ScoringRule::new("hospital", 50, hospital_named),
    ScoringRule::new("healthcare-category", 30, healthcare_category),
    ScoringRule::new("clinic", 25, clinic),
    ScoringRule::new("direct-care", 20, direct_care),
    ScoringRule::new("direct-match", 5, direct_match),
    ScoringRule::new("non-clinical-category", -30, non_clinical_category),
    ScoringRule::new("non-clinical-name", -20, non_clinical_name),
];

pub(crate) static MENTAL_HEALTH_RULES: &[ScoringRule] = &[
    ScoringRule::new("crisis-hotline", 100, hotline),
    ScoringRule::new("suicide-hotline", 80, suicide_hotline),
    ScoringRule::new("mental-health-category", 50, mental_health_category),
    ScoringRule::new("crisis-flag-for-suicidal-query", 30, crisis_flag_for_suicidal),
    ScoringRule::new("mental-health-provider", 30, mental_health_name),
    ScoringRule::new("names-condition", 25, names_condition),
    ScoringRule::new("crisis-category", 20, crisis_category),
    ScoringRule::new("substance-provider", 20, substance_provider),
    ScoringRule::new("direct-match", 10, direct_match),
    ScoringRule::new("unrequested-domestic-violence", -60, unrequested_domestic_violence),
    ScoringRule::new("unrelated-category", -40, unrelated_to_mental_health),
];

pub(crate) static GENERAL_RULES: &[ScoringRule] = &[
    ScoringRule::new("direct-match", 100, direct_match),
    ScoringRule::new("name-contains-query", 10, name_contains_query),
    ScoringRule::new("crisis-flag", 1, crisis_flag),
];

pub(crate) const fn rules_for(mode: RankingMode) -> &'static [ScoringRule] {
    match mode {
        RankingMode::Medical => MEDICAL_RULES,
        RankingMode::MentalHealth => MENTAL_HEALTH_RULES,
        RankingMode::General => GENERAL_RULES,
    }
}

/// Sum of the deltas of every rule that applies, with the rule names.
pub(crate) fn score(rules: &[ScoringRule], ctx: &RuleContext<'_, '_>) -> (i32, Vec<&'static str>) {
    rules
        .iter()
        .filter(|rule| (rule.applies)(ctx))
        .fold((0, Vec::new()), |(total, mut fired), rule| {
            fired.push(rule.name);
            (total + rule.delta, fired)
        })
}

static FACILITY: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(CLINICAL_FACILITY_INDICATORS, MatchMode::Word));
static DIRECT_CARE: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(DIRECT_CARE_TERMS, MatchMode::Word));
static NON_CLINICAL_NAME: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(NON_CLINICAL_NAME_MARKERS, MatchMode::Inflected));
static HOTLINE: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(HOTLINE_MARKERS, MatchMode::Word));
static SUICIDE_SPECIFIC: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(SUICIDE_SPECIFIC_MARKERS, MatchMode::Word));
static MENTAL_HEALTH_NAME: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(MENTAL_HEALTH_NAME_MARKERS, MatchMode::Substring));
static DOMESTIC_VIOLENCE: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(DOMESTIC_VIOLENCE_MARKERS, MatchMode::Word));
static SUBSTANCE_FOCUS: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(TWELVE_STEP_MARKERS, MatchMode::Word));
static SUBSTANCE_SERVICE: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(SUBSTANCE_RELATED, MatchMode::Inflected));
static HOSPITAL: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(HOSPITAL_MARKERS, MatchMode::Word));
static BEHAVIORAL: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(BEHAVIORAL_MARKERS, MatchMode::Word));

/// Facility that delivers clinical care, judged by name and services.
pub(crate) fn is_clinical_facility(profile: &OrgProfile<'_>) -> bool {
    FACILITY.is_match(&profile.name) || FACILITY.is_match(&profile.services)
}

/// 12-step or substance-only program. A provider that also offers mental
/// health care is not narrowly focused.
pub(crate) fn is_substance_focused(profile: &OrgProfile<'_>) -> bool {
    SUBSTANCE_FOCUS.is_match(&profile.text) && !MENTAL_HEALTH_NAME.is_match(&profile.text)
}

/// General hospital with no behavioral-health service line.
pub(crate) fn is_general_hospital(profile: &OrgProfile<'_>) -> bool {
    HOSPITAL.is_match(&profile.name) && !BEHAVIORAL.is_match(&profile.text)
}

fn direct_match(ctx: &RuleContext<'_, '_>) -> bool {
    ctx.direct
}

fn hospital_named(ctx: &RuleContext<'_, '_>) -> bool {
    ctx.profile.name.contains("hospital")
}

fn healthcare_category(ctx: &RuleContext<'_, '_>) -> bool {
    ctx.profile.org.category == Category::HealthcareServices
}

fn clinic(ctx: &RuleContext<'_, '_>) -> bool {
    ctx.profile.name.contains("clinic") || ctx.profile.services.contains("clinic")
}

fn direct_care(ctx: &RuleContext<'_, '_>) -> bool {
    DIRECT_CARE.is_match(&ctx.profile.text)
}

fn non_clinical_category(ctx: &RuleContext<'_, '_>) -> bool {
    matches!(
        ctx.profile.org.category,
        Category::Education
            | Category::CommunityGroupsDevelopment
            | Category::FaithBasedServices
            | Category::CulturalInformationServices
            | Category::CommunityServices
            | Category::LegalServices
            | Category::LawEnforcement
            | Category::FoodServices
            | Category::HousingServices
    ) && !is_clinical_facility(ctx.profile)
}

fn non_clinical_name(ctx: &RuleContext<'_, '_>) -> bool {
    NON_CLINICAL_NAME.is_match(&ctx.profile.name)
}

fn hotline(ctx: &RuleContext<'_, '_>) -> bool {
    HOTLINE.is_match(&ctx.profile.name)
}

fn suicide_hotline(ctx: &RuleContext<'_, '_>) -> bool {
    ctx.query.suicidal && SUICIDE_SPECIFIC.is_match(&ctx.profile.name)
}

fn mental_health_category(ctx: &RuleContext<'_, '_>) -> bool {
    ctx.profile.org.category == Category::MentalHealthSubstanceUse
}

fn crisis_flag_for_suicidal(ctx: &RuleContext<'_, '_>) -> bool {
    ctx.query.suicidal && ctx.profile.org.crisis_service
}

fn mental_health_name(ctx: &RuleContext<'_, '_>) -> bool {
    MENTAL_HEALTH_NAME.is_match(&ctx.profile.name)
}

fn names_condition(ctx: &RuleContext<'_, '_>) -> bool {
    ctx.query
        .conditions
        .iter()
        .any(|condition| ctx.profile.text.contains(condition))
}

fn crisis_category(ctx: &RuleContext<'_, '_>) -> bool {
    ctx.profile.org.category == Category::CrisisServices
}

fn substance_provider(ctx: &RuleContext<'_, '_>) -> bool {
    ctx.query.substance
        && (SUBSTANCE_SERVICE.is_match(&ctx.profile.text) || is_substance_focused(ctx.profile))
}

fn unrequested_domestic_violence(ctx: &RuleContext<'_, '_>) -> bool {
    !ctx.query.mentions_domestic_violence && DOMESTIC_VIOLENCE.is_match(&ctx.profile.text)
}

fn unrelated_to_mental_health(ctx: &RuleContext<'_, '_>) -> bool {
    matches!(
        ctx.profile.org.category,
        Category::FoodServices
            | Category::HousingServices
            | Category::Education
            | Category::LegalServices
            | Category::FaithBasedServices
            | Category::GovernmentServices
            | Category::CulturalInformationServices
            | Category::Pharmacy
            | Category::CommunityGroupsDevelopment
    )
}

fn name_contains_query(ctx: &RuleContext<'_, '_>) -> bool {
    ctx.profile.name.contains(ctx.query.search_text.as_str())
}

fn crisis_flag(ctx: &RuleContext<'_, '_>) -> bool {
    ctx.profile.org.crisis_service
}
