//! Plain-text rendering of organizations shared by the tool handlers.

use crate::category::Category;
use crate::types::OrganizationRecord;
use std::fmt::Write as _;

/// Shown above results whenever a query looks like an emergency.
pub const CRISIS_BANNER: &str = "If you are in crisis, call or text 988 (Suicide & Crisis Lifeline). \
     If you are in immediate danger, call 911.";

/// Append one numbered entry with its contact lines.
pub(crate) fn write_organization(
    output: &mut String,
    position: usize,
    org: &OrganizationRecord,
    note: Option<&str>,
) {
    let _ = write!(output, "{}. {} [{}]", position, org.name, org.category);
    if let Some(note) = note {
        let _ = write!(output, " ({})", note);
    }
    if org.crisis_service {
        output.push_str(" *crisis service*");
    }
    output.push('\n');

    for (label, value) in [
        ("Address", &org.address),
        ("Phone", &org.phone),
        ("Hours", &org.hours),
        ("Website", &org.website),
    ] {
        if !value.trim().is_empty() {
            let _ = writeln!(output, "   {}: {}", label, value.trim());
        }
    }

    let summary = if org.services_offered.trim().is_empty() {
        &org.description
    } else {
        &org.services_offered
    };
    if let Some(line) = summary.lines().find(|line| !line.trim().is_empty()) {
        let _ = writeln!(output, "   {}", line.trim());
    }
}

/// Resolve an optional category filter, listing valid choices on failure.
pub(crate) fn parse_category(input: Option<&str>) -> Result<Option<Category>, String> {
    let Some(input) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    Category::parse_filter(input).map(Some).ok_or_else(|| {
        let mut msg = format!("Unknown category '{}'. Valid categories:\n", input);
        for category in Category::ALL {
            let _ = writeln!(msg, "• {} ({})", category, category.slug());
        }
        msg
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn entries_skip_empty_fields() {
        let mut org = OrganizationRecord::new("1", "Grace Pantry", Category::FoodServices);
        org.phone = "(910) 555-0100".into();
        org.services_offered = "Groceries\nClothing".into();

        let mut output = String::new();
        write_organization(&mut output, 1, &org, Some("direct match"));

        check!(output.starts_with("1. Grace Pantry [Food Services] (direct match)\n"));
        check!(output.contains("Phone: (910) 555-0100"));
        check!(!output.contains("Address:"));
        check!(output.contains("   Groceries\n"));
        check!(!output.contains("Clothing"));
    }

    #[test]
    fn category_filters() {
        check!(parse_category(None) == Ok(None));
        check!(parse_category(Some("  ")) == Ok(None));
        check!(parse_category(Some("food-services")) == Ok(Some(Category::FoodServices)));
        let_assert!(Err(msg) = parse_category(Some("spaceships")));
        check!(msg.contains("pharmacy"));
    }
}
