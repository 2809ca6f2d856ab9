//! Fixed gazetteer of Robeson County towns and ZIP codes.

use crate::types::Coordinate;
use regex::Regex;
use std::sync::LazyLock;

/// A known town and the names it is written as.
#[derive(Debug)]
pub(crate) struct Town {
    /// Canonical lowercase name, used as the match key.
    pub(crate) name: &'static str,
    /// Spellings accepted in addresses, lowercase.
    pub(crate) aliases: &'static [&'static str],
    pub(crate) position: Coordinate,
    /// The name is also a common street name ("Pembroke Rd", "Shannon Dr"),
    /// so a free-text hit only counts next to a state marker or after a comma.
    pub(crate) street_word: bool,
}

pub(crate) const TOWNS: &[Town] = &[
    Town {
        name: "pembroke",
        aliases: &["pembroke"],
        position: Coordinate::new(34.6807, -79.1953),
        street_word: true,
    },
    Town {
        name: "uncp",
        aliases: &["uncp", "university of north carolina at pembroke"],
        position: Coordinate::new(34.6874, -79.2025),
        street_word: false,
    },
    Town {
        name: "lumberton",
        aliases: &["lumberton"],
        position: Coordinate::new(34.6182, -79.0086),
        street_word: false,
    },
    Town {
        name: "fairmont",
        aliases: &["fairmont"],
        position: Coordinate::new(34.4960, -79.1142),
        street_word: true,
    },
    Town {
        name: "maxton",
        aliases: &["maxton"],
        position: Coordinate::new(34.7352, -79.3489),
        street_word: false,
    },
    Town {
        name: "red springs",
        aliases: &["red springs"],
        position: Coordinate::new(34.8152, -79.1831),
        street_word: false,
    },
    Town {
        name: "st. pauls",
        aliases: &["st. pauls", "st pauls", "saint pauls", "st. paul's"],
        position: Coordinate::new(34.8068, -78.9728),
        street_word: false,
    },
    Town {
        name: "rowland",
        aliases: &["rowland"],
        position: Coordinate::new(34.5368, -79.2917),
        street_word: true,
    },
    Town {
        name: "parkton",
        aliases: &["parkton"],
        position: Coordinate::new(34.9018, -79.0117),
        street_word: false,
    },
    Town {
        name: "shannon",
        aliases: &["shannon"],
        position: Coordinate::new(34.8930, -79.1176),
        street_word: true,
    },
    Town {
        name: "orrum",
        aliases: &["orrum"],
        position: Coordinate::new(34.4652, -79.0097),
        street_word: false,
    },
];

/// ZIP code → canonical town name.
pub(crate) const ZIP_CODES: &[(&str, &str)] = &[
    ("28358", "lumberton"),
    ("28359", "lumberton"),
    ("28360", "lumberton"),
    ("28372", "pembroke"),
    ("28340", "fairmont"),
    ("28364", "maxton"),
    ("28377", "red springs"),
    ("28384", "st. pauls"),
    ("28383", "rowland"),
    ("28371", "parkton"),
    ("28375", "shannon"),
    ("28369", "orrum"),
];

pub(crate) fn town_by_name(name: &str) -> Option<&'static Town> {
    TOWNS.iter().find(|t| t.name == name)
}

/// Town whose name or alias equals `segment` exactly (case-insensitive).
pub(crate) fn town_for_segment(segment: &str) -> Option<&'static Town> {
    let segment = segment.trim().to_lowercase();
    TOWNS
        .iter()
        .find(|t| t.aliases.iter().any(|alias| *alias == segment))
}

/// Town whose alias ends the address as a whole word, covering a bare town
/// name ("Lumberton") and comma-less addresses ("123 Elm St Lumberton").
/// The longest matching alias wins.
pub(crate) fn trailing_town(address_lower: &str) -> Option<&'static Town> {
    let trimmed =
        address_lower.trim_end_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation());
    TOWNS
        .iter()
        .flat_map(|town| town.aliases.iter().map(move |alias| (town, *alias)))
        .filter(|(_, alias)| {
            trimmed.strip_suffix(*alias).is_some_and(|rest| {
                rest.chars()
                    .next_back()
                    .is_none_or(|c| !c.is_alphanumeric())
            })
        })
        .max_by_key(|(_, alias)| alias.len())
        .map(|(town, _)| town)
}

/// Compiled matcher per town alias: `(town, alias regex)`.
///
/// Street-word towns require a trailing state marker or a leading comma;
/// other towns only need word boundaries.
static TOWN_PATTERNS: LazyLock<Vec<(&'static Town, Regex)>> = LazyLock::new(|| {
    let mut patterns = Vec::new();
    for town in TOWNS {
        for alias in town.aliases {
            let escaped = regex::escape(alias);
            let pattern = if town.street_word {
                format!(
                    r"(?:,\s*{a}\b|\b{a}\s*,?\s*(?:nc|n\.c\.|north carolina)\b)",
                    a = escaped
                )
            } else {
                format!(r"\b{}\b", escaped)
            };
            match Regex::new(&pattern) {
                Ok(re) => patterns.push((town, re)),
                Err(e) => tracing::error!("Invalid town pattern for '{}': {}", alias, e),
            }
        }
    }
    patterns
});

/// Scan a lowercase address for a town mention. The rightmost valid hit wins,
/// since the town normally follows the street part of an address.
pub(crate) fn scan_for_town(address_lower: &str) -> Option<&'static Town> {
    TOWN_PATTERNS
        .iter()
        .filter_map(|(town, re)| {
            re.find_iter(address_lower)
                .last()
                .map(|m| (m.start(), *town))
        })
        .max_by_key(|(start, _)| *start)
        .map(|(_, town)| town)
}

static ZIP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{5})(?:-\d{4})?\b").expect("valid ZIP pattern"));

/// Town for the last known five-digit ZIP code in the address.
pub(crate) fn town_for_zip(address: &str) -> Option<&'static Town> {
    ZIP_PATTERN
        .captures_iter(address)
        .filter_map(|caps| {
            let zip = caps.get(1)?.as_str();
            ZIP_CODES
                .iter()
                .find(|(code, _)| *code == zip)
                .and_then(|(_, name)| town_by_name(name))
        })
        .last()
}
