//! Text matching primitives shared by query analysis and ranking.

use super::keywords::FUZZY_ALIASES;
use crate::types::OrganizationRecord;
use rapidfuzz::distance::jaro_winkler;
use regex::Regex;

/// Suffixes accepted after a keyword in [`MatchMode::Inflected`].
const INFLECTIONS: &str = "(?:s|es|ing|ed)?";

/// Keywords this short never take an inflection ("aa" must not match "aas").
const SHORT_TERM_LEN: usize = 3;

/// Minimum query length for Jaro-Winkler alias matching.
const FUZZY_MIN_LEN: usize = 4;

/// Similarity needed for a fuzzy alias hit.
const FUZZY_THRESHOLD: f64 = 0.92;

/// Single-word queries up to this length need a whole-word hit.
const WHOLE_WORD_QUERY_LEN: usize = 12;

/// How a term list is compiled into a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MatchMode {
    /// `\bterm\b`
    Word,
    /// `\bterm(?:s|es|ing|ed)?\b`, except for short terms which stay exact.
    Inflected,
    /// Plain containment, used for stem-like markers such as "psychiatr".
    Substring,
}

/// A list of terms compiled into one alternation.
#[derive(Debug)]
pub(crate) struct TermSet {
    regex: Option<Regex>,
}

impl TermSet {
    pub(crate) fn new(terms: &[&str], mode: MatchMode) -> Self {
        let pattern = alternation(terms, mode);
        let regex = pattern.and_then(|p| match Regex::new(&p) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!("Invalid term pattern {:?}: {}", p, e);
                None
            }
        });
        Self { regex }
    }

    pub(crate) fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(text))
    }
}

fn alternation(terms: &[&str], mode: MatchMode) -> Option<String> {
    if terms.is_empty() {
        return None;
    }
    let all = join_escaped(terms.iter().copied());
    match mode {
        MatchMode::Substring => Some(format!("(?:{all})")),
        MatchMode::Word => Some(format!(r"\b(?:{all})\b")),
        MatchMode::Inflected => {
            let long = join_escaped(terms.iter().copied().filter(|t| t.len() > SHORT_TERM_LEN));
            let short = join_escaped(terms.iter().copied().filter(|t| t.len() <= SHORT_TERM_LEN));
            Some(match (long.is_empty(), short.is_empty()) {
                (false, true) => format!(r"\b(?:{long}){INFLECTIONS}\b"),
                (true, _) => format!(r"\b(?:{short})\b"),
                (false, false) => format!(r"\b(?:{long}){INFLECTIONS}\b|\b(?:{short})\b"),
            })
        }
    }
}

fn join_escaped<'a>(terms: impl Iterator<Item = &'a str>) -> String {
    terms.map(regex::escape).collect::<Vec<_>>().join("|")
}

/// Lowercase, trim and collapse internal whitespace.
pub(crate) fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Matcher for the query text itself against organization fields.
#[derive(Debug)]
pub(crate) enum QueryMatcher {
    /// Short single words: "food" must not hit "seafood".
    WholeWord(Regex),
    Contains(String),
}

impl QueryMatcher {
    /// `query` must already be normalized.
    pub(crate) fn new(query: &str) -> Self {
        let single_word = !query.contains(' ');
        if single_word && query.chars().count() <= WHOLE_WORD_QUERY_LEN {
            match Regex::new(&format!(r"\b{}\b", regex::escape(query))) {
                Ok(re) => return Self::WholeWord(re),
                Err(e) => tracing::warn!("Falling back to substring match for {:?}: {}", query, e),
            }
        }
        Self::Contains(query.to_string())
    }

    pub(crate) fn is_match(&self, text: &str) -> bool {
        match self {
            Self::WholeWord(re) => re.is_match(text),
            Self::Contains(needle) => text.contains(needle.as_str()),
        }
    }
}

/// Name fragment for a known phonetic confusion of `query`, if any.
///
/// Exact alias keys always match. Queries of four or more characters also
/// match a key by Jaro-Winkler similarity; the most similar key wins.
pub(crate) fn fuzzy_fragment(query: &str) -> Option<&'static str> {
    if let Some((_, fragment)) = FUZZY_ALIASES.iter().find(|(key, _)| *key == query) {
        return Some(fragment);
    }
    if query.chars().count() < FUZZY_MIN_LEN {
        return None;
    }
    FUZZY_ALIASES
        .iter()
        .map(|(key, fragment)| (jaro_winkler::similarity(query.chars(), key.chars()), *fragment))
        .filter(|(similarity, _)| *similarity >= FUZZY_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, fragment)| fragment)
}

/// Lowercased fields of one organization, computed once per search.
#[derive(Debug)]
pub(crate) struct OrgProfile<'a> {
    pub(crate) org: &'a OrganizationRecord,
    pub(crate) name: String,
    pub(crate) services: String,
    pub(crate) description: String,
    /// Name, service type, services and description joined.
    pub(crate) text: String,
}

impl<'a> OrgProfile<'a> {
    pub(crate) fn new(org: &'a OrganizationRecord) -> Self {
        let name = org.name.to_lowercase();
        let services = org.services_offered.to_lowercase();
        let description = org.description.to_lowercase();
        let text = format!(
            "{} {} {} {}",
            name,
            org.service_type.to_lowercase(),
            services,
            description
        );
        Self {
            org,
            name,
            services,
            description,
            text,
        }
    }

    /// The query hits the name, services or description.
    pub(crate) fn matches_query(&self, matcher: &QueryMatcher) -> bool {
        matcher.is_match(&self.name)
            || matcher.is_match(&self.services)
            || matcher.is_match(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("drug", "need drug treatment", true)]
    #[case("drug", "drugs and alcohol", true)]
    #[case("drug", "the drugstore", false)]
    #[case("eat", "theater tickets", false)]
    #[case("eat", "somewhere to eat", true)]
    #[case("aa", "aas meeting", false)]
    #[case("aa", "an aa meeting", true)]
    fn inflected_terms(#[case] term: &str, #[case] text: &str, #[case] expected: bool) {
        check!(TermSet::new(&[term], MatchMode::Inflected).is_match(text) == expected);
    }

    #[test]
    fn word_mode_rejects_inflections() {
        let set = TermSet::new(&["doctor"], MatchMode::Word);
        check!(set.is_match("find a doctor"));
        check!(!set.is_match("doctors near me"));
    }

    #[test]
    fn substring_mode_matches_stems() {
        let set = TermSet::new(&["psychiatr"], MatchMode::Substring);
        check!(set.is_match("psychiatric services"));
        check!(!TermSet::new(&[], MatchMode::Substring).is_match("anything"));
    }

    #[test]
    fn short_single_word_queries_need_whole_words() {
        let matcher = QueryMatcher::new("food");
        check!(matcher.is_match("food pantry"));
        check!(!matcher.is_match("seafood restaurant"));

        let matcher = QueryMatcher::new("help with rent");
        check!(matcher.is_match("we help with rent and utilities"));
    }

    #[rstest]
    #[case("paws", Some("pawss"))]
    #[case("pause", Some("pawss"))]
    #[case("p a w s s", Some("pawss"))]
    #[case("monarch", Some("monarch"))]
    #[case("pass", None)]
    #[case("house", None)]
    #[case("food", None)]
    fn fuzzy_aliases(#[case] query: &str, #[case] expected: Option<&str>) {
        check!(fuzzy_fragment(query) == expected);
    }

    #[test]
    fn normalization_collapses_whitespace() {
        check!(normalize_text("  Food   PANTRY \n") == "food pantry");
    }
}
