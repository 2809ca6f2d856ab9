//! Organization feed loading.
//!
//! Two JSON shapes are accepted: an array of records using the export's
//! camelCase field names, or a spreadsheet values export
//! (`{"values": [[header...], [row...], ...]}`) with fixed column positions.

use crate::category;
use crate::error::LoadError;
use crate::types::OrganizationRecord;
use ahash::AHashSet;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::Path;

/// Spreadsheet column positions.
mod column {
    pub(super) const NAME: usize = 0;
    pub(super) const CATEGORY: usize = 1;
    pub(super) const SERVICE_TYPE: usize = 2;
    pub(super) const ADDRESS: usize = 3;
    pub(super) const PHONE: usize = 4;
    pub(super) const EMAIL: usize = 5;
    pub(super) const WEBSITE: usize = 6;
    pub(super) const HOURS: usize = 7;
    pub(super) const SERVICES: usize = 8;
    pub(super) const COST: usize = 9;
    pub(super) const DESCRIPTION: usize = 10;
    pub(super) const CRISIS: usize = 11;
    pub(super) const LANGUAGES: usize = 12;
    pub(super) const NOTES: usize = 13;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeedDocument {
    Records(Vec<FeedRecord>),
    Sheet { values: Vec<Vec<Value>> },
}

/// One record as it appears in the feed, before normalization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FeedRecord {
    id: Option<Value>,
    #[serde(alias = "organizationName")]
    name: String,
    category: String,
    service_type: String,
    address: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    phone: String,
    email: String,
    website: String,
    hours: String,
    services_offered: String,
    cost_payment: String,
    description: String,
    #[serde(deserialize_with = "yes_or_bool")]
    crisis_service: bool,
    languages: String,
    special_notes: String,
}

/// Accept `true`/`false` as well as the spreadsheet's "Yes"/"No".
fn yes_or_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::String(text) => is_yes(&text),
        _ => false,
    })
}

fn is_yes(text: &str) -> bool {
    let text = text.trim();
    text.eq_ignore_ascii_case("yes") || text.eq_ignore_ascii_case("true")
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl FeedRecord {
    fn from_row(row: &[Value]) -> Self {
        let cell = |index: usize| row.get(index).map(cell_text).unwrap_or_default();
        Self {
            id: None,
            name: cell(column::NAME),
            category: cell(column::CATEGORY),
            service_type: cell(column::SERVICE_TYPE),
            address: cell(column::ADDRESS),
            latitude: None,
            longitude: None,
            phone: cell(column::PHONE),
            email: cell(column::EMAIL),
            website: cell(column::WEBSITE),
            hours: cell(column::HOURS),
            services_offered: cell(column::SERVICES),
            cost_payment: cell(column::COST),
            description: cell(column::DESCRIPTION),
            crisis_service: is_yes(&cell(column::CRISIS)),
            languages: cell(column::LANGUAGES),
            special_notes: cell(column::NOTES),
        }
    }

    /// Normalize into a directory record. `row` is the 1-based position in
    /// the feed and becomes the id when the feed carries none.
    fn into_record(self, row: usize) -> Option<OrganizationRecord> {
        let name = self.name.trim();
        if name.is_empty() {
            tracing::warn!("Skipping feed row {}: empty organization name", row);
            return None;
        }

        let id = match self.id {
            Some(Value::String(id)) if !id.trim().is_empty() => id.trim().to_string(),
            Some(Value::Number(id)) => id.to_string(),
            _ => row.to_string(),
        };
        let category = category::normalize(&self.category, name, &self.services_offered);

        let mut record = OrganizationRecord::new(id, name, category);
        record.service_type = self.service_type;
        record.address = self.address;
        record.latitude = self.latitude.filter(|v| v.is_finite());
        record.longitude = self.longitude.filter(|v| v.is_finite());
        record.phone = self.phone;
        record.email = self.email;
        record.website = self.website;
        record.hours = self.hours;
        record.services_offered = self.services_offered;
        record.cost_payment = self.cost_payment;
        record.description = self.description;
        record.crisis_service = self.crisis_service;
        record.languages = self.languages;
        record.special_notes = self.special_notes;
        Some(record)
    }
}

/// Parse feed text in either supported shape.
pub fn parse_directory(text: &str) -> Result<Vec<OrganizationRecord>, serde_json::Error> {
    let rows: Vec<FeedRecord> = match serde_json::from_str(text)? {
        FeedDocument::Records(records) => records,
        FeedDocument::Sheet { values } => values
            .iter()
            .skip(1)
            .enumerate()
            .filter_map(|(index, row)| {
                if row.len() <= column::NAME {
                    tracing::warn!("Skipping sheet row {}: no name column", index + 1);
                    None
                } else {
                    Some(FeedRecord::from_row(row))
                }
            })
            .collect(),
    };

    let mut seen = AHashSet::with_capacity(rows.len());
    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        let Some(record) = row.into_record(index + 1) else {
            continue;
        };
        if !seen.insert(record.id.clone()) {
            tracing::warn!("Duplicate organization id '{}', keeping the first", record.id);
            continue;
        }
        records.push(record);
    }
    Ok(records)
}

/// Read and parse the feed at `path`.
pub async fn load_directory(path: &Path) -> Result<Vec<OrganizationRecord>, LoadError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let records = parse_directory(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        "Loaded {} organizations from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use assert2::{check, let_assert};

    #[test]
    fn records_shape_with_export_field_names() {
        let text = r#"[
            {"id": "a", "organizationName": "Grace Pantry", "category": "Food Services",
             "crisisService": false, "servicesOffered": "Groceries"},
            {"id": 7, "name": "Lifeline", "category": "Crisis Services", "crisisService": "Yes",
             "latitude": 34.6, "longitude": -79.0}
        ]"#;
        let_assert!(Ok(records) = parse_directory(text));
        check!(records.len() == 2);
        check!(records[0].name == "Grace Pantry");
        check!(records[0].services_offered == "Groceries");
        check!(records[1].id == "7");
        check!(records[1].crisis_service);
        check!(records[1].coordinates().is_some());
    }

    #[test]
    fn sheet_shape_uses_row_numbers_for_ids() {
        let text = r#"{"values": [
            ["Organization Name", "Category"],
            ["Grace Pantry", "Food Services", "", "1 Main St, Lumberton, NC", "", "", "", "", "", "", "", "yes"],
            ["Short Row"],
            []
        ]}"#;
        let_assert!(Ok(records) = parse_directory(text));
        check!(records.len() == 2);
        check!(records[0].id == "1");
        check!(records[0].crisis_service);
        check!(records[0].address == "1 Main St, Lumberton, NC");
        check!(records[1].id == "2");
        check!(records[1].category == Category::CommunityServices);
    }

    #[test]
    fn empty_names_and_duplicate_ids_are_dropped() {
        let text = r#"[
            {"id": "1", "name": "First", "category": "Food Services"},
            {"id": "1", "name": "Second", "category": "Food Services"},
            {"id": "2", "name": "   ", "category": "Food Services"}
        ]"#;
        let_assert!(Ok(records) = parse_directory(text));
        check!(records.len() == 1);
        check!(records[0].name == "First");
    }

    #[test]
    fn legacy_categories_are_normalized() {
        let text = r#"[{"name": "Robeson Health Outreach", "category": "Free Programs"}]"#;
        let_assert!(Ok(records) = parse_directory(text));
        check!(records[0].category == Category::HealthcareServices);
        check!(records[0].id == "1");
    }

    #[test]
    fn unrecognized_documents_fail() {
        check!(parse_directory(r#"{"rows": []}"#).is_err());
        check!(parse_directory("not json").is_err());
    }
}
