//! Candidate assembly and ranking.

use super::intent::{QueryAnalysis, RankingMode};
use super::keywords::{MENTAL_HEALTH_RELATED, SUBSTANCE_RELATED};
use super::matching::{MatchMode, OrgProfile, QueryMatcher, TermSet};
use super::scoring::{
    RuleContext, is_clinical_facility, is_general_hospital, is_substance_focused, rules_for, score,
};
use crate::category::Category;
use crate::config::SearchConfig;
use crate::types::OrganizationRecord;
use ahash::AHashSet;
use std::cmp::Ordering;
use std::sync::LazyLock;

static MENTAL_HEALTH_SIMILAR: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(MENTAL_HEALTH_RELATED, MatchMode::Inflected));
static SUBSTANCE_SIMILAR: LazyLock<TermSet> =
    LazyLock::new(|| TermSet::new(SUBSTANCE_RELATED, MatchMode::Inflected));

/// One ranked result.
#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    pub organization: &'a OrganizationRecord,
    /// The query text itself hit the name, services or description.
    pub direct: bool,
    pub score: i32,
    /// Names of the scoring rules that fired, in rule order.
    pub rules: Vec<&'static str>,
}

/// Result of one search.
#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    pub hits: Vec<SearchHit<'a>>,
    /// Show the crisis banner regardless of what matched.
    pub emergency: bool,
    pub mode: RankingMode,
    pub categories: Vec<Category>,
}

impl<'a> SearchOutcome<'a> {
    fn empty() -> Self {
        Self {
            hits: Vec::new(),
            emergency: false,
            mode: RankingMode::General,
            categories: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Ids of the direct matches, for highlighting.
    pub fn direct_match_ids(&self) -> AHashSet<&'a str> {
        self.hits
            .iter()
            .filter(|hit| hit.direct)
            .map(|hit| hit.organization.id.as_str())
            .collect()
    }

    pub fn organizations(&self) -> impl Iterator<Item = &'a OrganizationRecord> + '_ {
        self.hits.iter().map(|hit| hit.organization)
    }
}

/// Category-aware relevance search over an organization collection.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    similar_limit: usize,
}

impl SearchEngine {
    pub const fn new(config: &SearchConfig) -> Self {
        Self {
            similar_limit: config.similar_limit,
        }
    }

    /// Rank `organizations` for `query`.
    ///
    /// Every returned organization appears once, and the order is total:
    /// score, then direct matches, then name, then id.
    pub fn search<'a>(&self, query: &str, organizations: &'a [OrganizationRecord]) -> SearchOutcome<'a> {
        let Some(analysis) = QueryAnalysis::new(query) else {
            return SearchOutcome::empty();
        };

        let profiles: Vec<OrgProfile<'a>> = organizations.iter().map(OrgProfile::new).collect();
        let matcher = QueryMatcher::new(&analysis.search_text);
        let direct: Vec<bool> = profiles
            .iter()
            .map(|profile| {
                profile.matches_query(&matcher)
                    || analysis
                        .fuzzy_fragment
                        .is_some_and(|fragment| profile.name.contains(fragment))
            })
            .collect();

        let candidates = if !analysis.categories.is_empty() && !analysis.is_clinical() {
            category_candidates(&analysis, &profiles, &direct)
        } else if analysis.is_clinical() || direct.iter().any(|d| *d) {
            self.similar_candidates(&analysis, &profiles, &direct)
        } else {
            Vec::new()
        };

        let mode = analysis.ranking_mode();
        let rules = rules_for(mode);
        let mut seen = AHashSet::with_capacity(candidates.len());
        let mut hits: Vec<SearchHit<'a>> = candidates
            .into_iter()
            .filter(|&index| seen.insert(profiles[index].org.id.as_str()))
            .map(|index| {
                let profile = &profiles[index];
                let (points, fired) = score(
                    rules,
                    &RuleContext {
                        query: &analysis,
                        profile,
                        direct: direct[index],
                    },
                );
                SearchHit {
                    organization: profile.org,
                    direct: direct[index],
                    score: points,
                    rules: fired,
                }
            })
            .collect();
        hits.sort_by(compare_hits);

        tracing::debug!(
            query = %analysis.text,
            mode = ?mode,
            results = hits.len(),
            emergency = analysis.emergency,
            "search complete"
        );

        SearchOutcome {
            hits,
            emergency: analysis.emergency,
            mode,
            categories: analysis.categories,
        }
    }

    /// Direct matches plus a bounded set of similar organizations, found by
    /// category or by related vocabulary.
    fn similar_candidates(
        &self,
        analysis: &QueryAnalysis,
        profiles: &[OrgProfile<'_>],
        direct: &[bool],
    ) -> Vec<usize> {
        let mut categories = analysis.categories.clone();
        for (profile, _) in profiles.iter().zip(direct).filter(|(_, d)| **d) {
            if !categories.contains(&profile.org.category) {
                categories.push(profile.org.category);
            }
        }
        let mental_health = analysis.mental_health || !analysis.conditions.is_empty();

        let similar = (0..profiles.len())
            .filter(|&i| !direct[i])
            .filter(|&i| {
                let profile = &profiles[i];
                categories.contains(&profile.org.category)
                    || (mental_health && MENTAL_HEALTH_SIMILAR.is_match(&profile.text))
                    || (analysis.substance && SUBSTANCE_SIMILAR.is_match(&profile.text))
            })
            .filter(|&i| analysis.substance || !is_substance_focused(&profiles[i]))
            .filter(|&i| !(mental_health && is_general_hospital(&profiles[i])))
            .take(self.similar_limit);

        (0..profiles.len()).filter(|&i| direct[i]).chain(similar).collect()
    }
}

/// Direct matches, every member of a matched category, and for medical
/// queries any clinical facility filed elsewhere.
fn category_candidates(
    analysis: &QueryAnalysis,
    profiles: &[OrgProfile<'_>],
    direct: &[bool],
) -> Vec<usize> {
    let direct_first = (0..profiles.len()).filter(|&i| direct[i]);
    let by_category =
        (0..profiles.len()).filter(|&i| analysis.categories.contains(&profiles[i].org.category));
    let facilities =
        (0..profiles.len()).filter(|&i| analysis.medical && is_clinical_facility(&profiles[i]));
    direct_first.chain(by_category).chain(facilities).collect()
}

fn compare_hits(a: &SearchHit<'_>, b: &SearchHit<'_>) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.direct.cmp(&a.direct))
        .then_with(|| {
            a.organization
                .name
                .to_lowercase()
                .cmp(&b.organization.name.to_lowercase())
        })
        .then_with(|| a.organization.id.cmp(&b.organization.id))
}
