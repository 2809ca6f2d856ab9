//! Static vocabulary for query interpretation.
//!
//! There is one canonical keyword table per concern. The category table is
//! keyed by [`Category`] so it always tracks the current label set.

use crate::category::Category;

/// Whole-query aliases: acronyms and spoken spellings → name fragment.
pub(crate) const QUERY_ALIASES: &[(&str, &str)] = &[
    ("rhcc", "robeson health care corporation"),
    ("r h c c", "robeson health care corporation"),
    ("r.h.c.c", "robeson health care corporation"),
    ("r.h.c.c.", "robeson health care corporation"),
    ("dss", "department of social services"),
    ("d s s", "department of social services"),
    ("uncp", "university of north carolina at pembroke"),
    ("sic", "southeastern integrated care"),
];

/// Known phonetic confusions (mostly from voice search) → name fragment.
pub(crate) const FUZZY_ALIASES: &[(&str, &str)] = &[
    ("paws", "pawss"),
    ("pause", "pawss"),
    ("pawz", "pawss"),
    ("pauses", "pawss"),
    ("p a w s s", "pawss"),
    ("life net", "lifenet"),
    ("monarc", "monarch"),
    ("breaches buoy", "breeches buoy"),
    ("britches buoy", "breeches buoy"),
];

/// Phrases that raise the emergency banner on a substring hit.
pub(crate) const EMERGENCY_PHRASES: &[&str] = &[
    "988",
    "911",
    "suicide",
    "suicidal",
    "kill myself",
    "killing myself",
    "want to die",
    "wanna die",
    "end my life",
    "take my life",
    "self harm",
    "self-harm",
    "hurt myself",
    "hurting myself",
    "cutting myself",
    "overdose",
    "overdosing",
    "no reason to live",
    "better off dead",
];

/// Subset of the emergency phrases signalling suicidal ideation.
pub(crate) const SUICIDAL_PHRASES: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "killing myself",
    "want to die",
    "wanna die",
    "end my life",
    "take my life",
    "no reason to live",
    "better off dead",
];

/// Category inference keywords.
pub(crate) const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::CrisisServices,
        &[
            "crisis",
            "emergency",
            "hotline",
            "suicide",
            "suicidal",
            "988",
            "help now",
            "urgent help",
            "danger",
            "domestic violence",
            "abuse",
            "assault",
            "rape",
        ],
    ),
    (
        Category::FoodServices,
        &[
            "food",
            "hungry",
            "meal",
            "pantry",
            "groceries",
            "grocery",
            "snap",
            "food stamps",
            "soup kitchen",
            "eat",
            "nutrition",
            "wic",
        ],
    ),
    (
        Category::HousingServices,
        &[
            "housing",
            "shelter",
            "homeless",
            "rent",
            "eviction",
            "apartment",
            "utility",
            "utilities",
            "section 8",
        ],
    ),
    (
        Category::HealthcareServices,
        &[
            "doctor",
            "medical",
            "healthcare",
            "health care",
            "clinic",
            "hospital",
            "physician",
            "dental",
            "dentist",
            "nurse",
            "checkup",
            "primary care",
            "urgent care",
        ],
    ),
    (
        Category::MentalHealthSubstanceUse,
        &[
            "mental health",
            "counseling",
            "counselor",
            "therapy",
            "therapist",
            "depression",
            "anxiety",
            "addiction",
            "substance",
            "recovery",
            "treatment",
            "rehab",
            "detox",
            "alcohol",
            "drug",
            "opioid",
            "aa",
            "na",
            "behavioral",
            "psychiatrist",
        ],
    ),
    (
        Category::GovernmentServices,
        &[
            "government",
            "dss",
            "social services",
            "benefits",
            "medicaid",
            "county office",
            "department of",
        ],
    ),
    (
        Category::TribalServices,
        &["tribal", "tribe", "native", "lumbee", "indian"],
    ),
    (
        Category::CommunityServices,
        &["community", "volunteer", "assistance", "clothing", "clothes"],
    ),
    (
        Category::CommunityGroupsDevelopment,
        &["development", "nonprofit", "civic", "youth group", "organization"],
    ),
    (
        Category::FaithBasedServices,
        &["faith", "church", "ministry", "religious", "pastor", "prayer"],
    ),
    (
        Category::LegalServices,
        &["legal", "lawyer", "attorney", "court", "custody", "expunge"],
    ),
    (
        Category::LawEnforcement,
        &["police", "sheriff", "law enforcement", "report a crime"],
    ),
    (
        Category::Education,
        &[
            "education",
            "school",
            "college",
            "ged",
            "tutoring",
            "literacy",
            "class",
            "university",
        ],
    ),
    (
        Category::Pharmacy,
        &["pharmacy", "prescription", "medication", "medicine", "drugstore"],
    ),
    (
        Category::CulturalInformationServices,
        &["culture", "cultural", "museum", "library", "information", "referral", "211"],
    ),
];

/// Query terms that put ranking into medical mode.
pub(crate) const MEDICAL_INTENT_TERMS: &[&str] = &[
    "doctor",
    "doctors",
    "medical",
    "physician",
    "healthcare",
    "health care",
];

/// Name/services indicators of a facility that delivers clinical care.
pub(crate) const CLINICAL_FACILITY_INDICATORS: &[&str] = &[
    "hospital",
    "clinic",
    "medical center",
    "health center",
    "health care corporation",
    "primary care",
    "urgent care",
    "emergency care",
    "emergency room",
    "family medicine",
    "family practice",
    "physician",
    "pediatric",
];

/// Direct clinical care signals scored in medical mode.
pub(crate) const DIRECT_CARE_TERMS: &[&str] = &[
    "primary care",
    "urgent care",
    "emergency care",
    "emergency room",
    "family medicine",
    "family practice",
    "physician",
    "medical center",
    "health center",
];

/// Query terms that put ranking into mental-health mode.
pub(crate) const MENTAL_HEALTH_TERMS: &[&str] = &[
    "mental",
    "mental health",
    "crisis",
    "counseling",
    "counselor",
    "therapy",
    "therapist",
    "psychiatric",
    "psychiatrist",
    "behavioral",
    "trauma",
    "grief",
    "stress",
    "lonely",
    "sad",
];

/// Named conditions. A query naming one skips broad category expansion.
pub(crate) const CLINICAL_CONDITIONS: &[&str] = &[
    "depression",
    "depressed",
    "anxiety",
    "ptsd",
    "bipolar",
    "schizophrenia",
    "adhd",
    "autism",
    "ocd",
    "panic attack",
    "panic attacks",
    "eating disorder",
    "dementia",
    "alzheimer",
    "alzheimer's",
    "postpartum",
];

pub(crate) const SUBSTANCE_TERMS: &[&str] = &[
    "addiction",
    "addicted",
    "substance",
    "alcohol",
    "alcoholic",
    "drinking",
    "drug",
    "drugs",
    "opioid",
    "opioids",
    "heroin",
    "meth",
    "fentanyl",
    "overdose",
    "rehab",
    "detox",
    "sober",
    "sobriety",
    "aa",
    "na",
    "alcoholics anonymous",
    "narcotics anonymous",
];

/// Broad terms used to find "similar" providers for a mental-health query.
pub(crate) const MENTAL_HEALTH_RELATED: &[&str] = &[
    "mental health",
    "behavioral health",
    "counseling",
    "therapy",
    "psychiatric",
];

/// Broad terms used to find "similar" providers for a substance-use query.
pub(crate) const SUBSTANCE_RELATED: &[&str] = &[
    "substance",
    "addiction",
    "recovery",
    "treatment",
    "detox",
];

/// Profile markers of 12-step / substance-only programs. Broad treatment
/// phrases stay out: behavioral-health providers list them too.
pub(crate) const TWELVE_STEP_MARKERS: &[&str] = &[
    "alcoholics anonymous",
    "narcotics anonymous",
    "12-step",
    "12 step",
    "twelve step",
    "sobriety",
    "methadone",
];

/// Profile markers of a general hospital.
pub(crate) const HOSPITAL_MARKERS: &[&str] = &["hospital", "medical center", "health southeastern"];

/// Markers that keep a hospital in mental-health results.
pub(crate) const BEHAVIORAL_MARKERS: &[&str] = &[
    "behavioral",
    "psychiatric",
    "mental health",
    "psychiatry",
];

/// Name markers of crisis hotlines.
pub(crate) const HOTLINE_MARKERS: &[&str] = &[
    "hotline",
    "crisis line",
    "crisis text line",
    "lifeline",
    "suicide prevention",
    "988",
];

pub(crate) const SUICIDE_SPECIFIC_MARKERS: &[&str] =
    &["suicide", "988", "lifeline", "crisis text line"];

/// Profile markers of domestic-violence and sexual-assault services.
pub(crate) const DOMESTIC_VIOLENCE_MARKERS: &[&str] = &[
    "domestic violence",
    "sexual assault",
    "rape crisis",
    "battered",
];

/// Query terms that legitimately ask for domestic-violence help.
pub(crate) const DOMESTIC_VIOLENCE_QUERY_TERMS: &[&str] = &[
    "domestic violence",
    "abuse",
    "abused",
    "abusive",
    "assault",
    "rape",
    "partner",
    "husband",
    "wife",
    "boyfriend",
    "girlfriend",
];

/// Mental-health profile markers for naming a provider.
pub(crate) const MENTAL_HEALTH_NAME_MARKERS: &[&str] = &[
    "mental health",
    "behavioral",
    "counseling",
    "psychiatr",
    "integrated care",
];

/// Generic community/support/education markers penalized in medical mode.
pub(crate) const NON_CLINICAL_NAME_MARKERS: &[&str] = &[
    "support group",
    "school",
    "academy",
    "college",
    "ministry",
    "church",
    "library",
];

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn every_category_has_keywords() {
        for category in Category::ALL {
            let entry = CATEGORY_KEYWORDS.iter().find(|(c, _)| *c == category);
            check!(entry.is_some_and(|(_, words)| !words.is_empty()), "{}", category);
        }
    }

    #[test]
    fn suicidal_phrases_are_emergencies() {
        for phrase in SUICIDAL_PHRASES {
            check!(EMERGENCY_PHRASES.contains(phrase), "{}", phrase);
        }
    }

    #[test]
    fn tables_are_lowercase() {
        let tables: &[&[&str]] = &[
            EMERGENCY_PHRASES,
            MEDICAL_INTENT_TERMS,
            CLINICAL_CONDITIONS,
            SUBSTANCE_TERMS,
            TWELVE_STEP_MARKERS,
            HOTLINE_MARKERS,
        ];
        for table in tables {
            for term in *table {
                check!(term.to_lowercase() == *term);
            }
        }
        for (alias, fragment) in QUERY_ALIASES.iter().chain(FUZZY_ALIASES) {
            check!(alias.to_lowercase() == *alias);
            check!(fragment.to_lowercase() == *fragment);
        }
    }
}
