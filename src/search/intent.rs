//! Query interpretation: aliases, emergency detection, category inference
//! and the intent flags that pick a ranking mode.

use super::keywords::{
    CATEGORY_KEYWORDS, CLINICAL_CONDITIONS, DOMESTIC_VIOLENCE_QUERY_TERMS, EMERGENCY_PHRASES,
    MEDICAL_INTENT_TERMS, MENTAL_HEALTH_TERMS, QUERY_ALIASES, SUBSTANCE_TERMS, SUICIDAL_PHRASES,
};
use super::matching::{MatchMode, TermSet, fuzzy_fragment, normalize_text};
use crate::category::Category;
use regex::Regex;
use std::sync::LazyLock;

/// Queries shorter than this only match category keywords as whole words.
const SHORT_QUERY_LEN: usize = 5;

/// Per-category keyword matchers: `(category, exact, inflected)`.
static CATEGORY_MATCHERS: LazyLock<Vec<(Category, TermSet, TermSet)>> = LazyLock::new(|| {
    CATEGORY_KEYWORDS
        .iter()
        .map(|(category, words)| {
            (
                *category,
                TermSet::new(words, MatchMode::Word),
                TermSet::new(words, MatchMode::Inflected),
            )
        })
        .collect()
});

static MEDICAL_TERMS: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(MEDICAL_INTENT_TERMS, MatchMode::Word));
static MENTAL_TERMS: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(MENTAL_HEALTH_TERMS, MatchMode::Inflected));
static SUBSTANCE: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(SUBSTANCE_TERMS, MatchMode::Inflected));
static DOMESTIC_VIOLENCE: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(DOMESTIC_VIOLENCE_QUERY_TERMS, MatchMode::Inflected));

/// One whole-word pattern per named condition, so the matched names can be
/// reported back to the scorer.
static CONDITIONS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    CLINICAL_CONDITIONS
        .iter()
        .filter_map(|condition| {
            Regex::new(&format!(r"\b{}\b", regex::escape(condition)))
                .ok()
                .map(|re| (*condition, re))
        })
        .collect()
});

/// Which rule list ranks the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMode {
    Medical,
    MentalHealth,
    General,
}

/// Everything the engine needs to know about a query.
#[derive(Debug, Clone)]
pub struct QueryAnalysis {
    /// Lowercased, whitespace-collapsed query as typed.
    pub text: String,
    /// Text matched against organization fields; an alias expansion when the
    /// whole query is a known acronym.
    pub search_text: String,
    /// Name fragment of a phonetic alias hit ("paws" → "pawss").
    pub fuzzy_fragment: Option<&'static str>,
    pub emergency: bool,
    pub suicidal: bool,
    /// Inferred categories in canonical order.
    pub categories: Vec<Category>,
    pub medical: bool,
    pub mental_health: bool,
    /// Named clinical conditions found in the query.
    pub conditions: Vec<&'static str>,
    pub substance: bool,
    pub mentions_domestic_violence: bool,
}

impl QueryAnalysis {
    /// Analyze a raw query. Returns `None` for empty or whitespace-only input.
    pub fn new(query: &str) -> Option<Self> {
        let text = normalize_text(query);
        if text.is_empty() {
            return None;
        }

        let search_text = QUERY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == text)
            .map_or_else(|| text.clone(), |(_, expansion)| (*expansion).to_string());

        let emergency = EMERGENCY_PHRASES.iter().any(|p| text.contains(p));
        let suicidal = SUICIDAL_PHRASES.iter().any(|p| text.contains(p));
        let categories = infer_categories(&text, emergency);
        let conditions: Vec<&'static str> = CONDITIONS
            .iter()
            .filter(|(_, re)| re.is_match(&text))
            .map(|(name, _)| *name)
            .collect();
        let substance = SUBSTANCE.is_match(&text);
        let medical = MEDICAL_TERMS.is_match(&text);
        let mental_health = MENTAL_TERMS.is_match(&text) || suicidal || !conditions.is_empty();

        Some(Self {
            fuzzy_fragment: fuzzy_fragment(&text),
            mentions_domestic_violence: DOMESTIC_VIOLENCE.is_match(&text),
            text,
            search_text,
            emergency,
            suicidal,
            categories,
            medical,
            mental_health,
            conditions,
            substance,
        })
    }

    /// The query names a condition or a substance, so broad category
    /// expansion is skipped in favour of direct and similar matches.
    pub fn is_clinical(&self) -> bool {
        !self.conditions.is_empty() || self.substance
    }

    /// Medical intent wins over mental-health intent, which wins over general.
    pub fn ranking_mode(&self) -> RankingMode {
        if self.medical {
            RankingMode::Medical
        } else if self.mental_health || self.emergency || self.is_clinical() {
            RankingMode::MentalHealth
        } else {
            RankingMode::General
        }
    }
}

fn infer_categories(text: &str, emergency: bool) -> Vec<Category> {
    let short_query = text.chars().count() < SHORT_QUERY_LEN;
    CATEGORY_MATCHERS
        .iter()
        .filter(|(category, exact, inflected)| {
            (emergency && *category == Category::CrisisServices)
                || if short_query {
                    exact.is_match(text)
                } else {
                    inflected.is_match(text)
                }
        })
        .map(|(category, _, _)| *category)
        .collect()
}
