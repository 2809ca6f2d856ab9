//! Heuristic address → map position resolution with collision avoidance.
//!
//! Resolution is deterministic: the same address resolves to the same point
//! as long as the [`CollisionState`] is reset between batches. All collision
//! bookkeeping lives in the caller-owned state, never in globals.

use super::towns::{self, Town};
use crate::config::ResolverConfig;
use crate::types::{Coordinate, OrganizationRecord};
use ahash::AHashMap;
use regex::Regex;
use std::f64::consts::TAU;
use std::sync::LazyLock;
use xxhash_rust::xxh3::xxh3_64;

/// Ring size before the collision circle grows outward.
const RING_SLOTS: usize = 8;

/// Radius growth per completed ring, as a fraction of the base radius.
const RING_GROWTH: f64 = 0.5;

/// Rounding applied to base coordinates when grouping colliding addresses.
const LOCATION_KEY_SCALE: f64 = 10_000.0;

/// Directional and street-type tokens with their fixed nudge `(d_lat, d_lon)`.
/// Only the first token found in the address applies.
const TOKEN_NUDGES: &[(&str, f64, f64)] = &[
    ("north", 0.0030, 0.0),
    ("n", 0.0030, 0.0),
    ("south", -0.0030, 0.0),
    ("s", -0.0030, 0.0),
    ("east", 0.0, 0.0030),
    ("e", 0.0, 0.0030),
    ("west", 0.0, -0.0030),
    ("w", 0.0, -0.0030),
    ("highway", 0.0020, 0.0020),
    ("hwy", 0.0020, 0.0020),
    ("bypass", -0.0020, 0.0020),
    ("byp", -0.0020, 0.0020),
    ("boulevard", 0.0015, -0.0015),
    ("blvd", 0.0015, -0.0015),
    ("road", -0.0010, -0.0010),
    ("rd", -0.0010, -0.0010),
];

/// State names and possessive endings, blanked before the token scan so
/// "N. C." and "Paul's" do not read as directions.
static NON_DIRECTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"north carolina|\bn\.\s*c\b\.?|['’]s\b").expect("valid state pattern")
});

/// Where the base position of a resolved address came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionSource {
    /// Explicit GPS coordinates supplied with the record.
    Explicit,
    /// Town named in the address text.
    Town(&'static str),
    /// Town inferred from a ZIP code.
    ZipCode(&'static str),
    /// Nothing matched; county center default.
    CountyCenter,
}

/// Rounded base coordinate used to detect collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationKey {
    lat: i64,
    lon: i64,
}

impl LocationKey {
    fn rounded(position: Coordinate) -> Self {
        Self {
            lat: (position.latitude * LOCATION_KEY_SCALE).round() as i64,
            lon: (position.longitude * LOCATION_KEY_SCALE).round() as i64,
        }
    }
}

/// Exact explicit coordinate, compared bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ExactKey(u64, u64);

impl ExactKey {
    const fn of(position: Coordinate) -> Self {
        Self(position.latitude.to_bits(), position.longitude.to_bits())
    }
}

/// A map position for one address.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPosition {
    pub position: Coordinate,
    /// Town table entry (or county center, or explicit point) before any offset.
    pub anchor: Coordinate,
    /// Position before the collision offset.
    pub base: Coordinate,
    pub location_key: LocationKey,
    pub source: PositionSource,
    /// Zero-indexed arrival order at this location within the batch.
    pub slot: usize,
}

impl ResolvedPosition {
    pub const fn latitude(&self) -> f64 {
        self.position.latitude
    }

    pub const fn longitude(&self) -> f64 {
        self.position.longitude
    }
}

/// One input of a batch resolution.
#[derive(Debug, Clone, Copy)]
pub struct AddressInput<'a> {
    pub address: &'a str,
    pub explicit: Option<Coordinate>,
    pub is_priority: bool,
}

impl<'a> From<&'a OrganizationRecord> for AddressInput<'a> {
    fn from(org: &'a OrganizationRecord) -> Self {
        Self {
            address: &org.address,
            explicit: org.coordinates(),
            is_priority: org.is_priority(),
        }
    }
}

/// Per-batch collision tables. Reset before every full resolution pass.
///
/// Ring slots come from one arrival count per rounded location, shared by
/// inferred and explicit positions, so an explicit point sitting on a town
/// anchor never lands on the same pin as a bare "Town, NC" address.
#[derive(Debug, Default)]
pub struct CollisionState {
    /// Inferred addresses seen per rounded base coordinate.
    address_counts: AHashMap<LocationKey, usize>,
    /// Organizations seen per exact explicit coordinate.
    coordinate_counts: AHashMap<ExactKey, usize>,
    /// Arrivals of either kind per rounded location.
    slots: AHashMap<LocationKey, usize>,
    /// Totals known up front from [`AddressResolver::resolve_batch`].
    expected_totals: AHashMap<LocationKey, usize>,
}

impl CollisionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything seen so far.
    pub fn reset(&mut self) {
        self.address_counts.clear();
        self.coordinate_counts.clear();
        self.slots.clear();
        self.expected_totals.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.address_counts.is_empty() && self.coordinate_counts.is_empty()
    }

    /// Register one more inferred address; returns `(slot, total)` for the ring layout.
    fn claim_address(&mut self, key: LocationKey) -> (usize, usize) {
        *self.address_counts.entry(key).or_insert(0) += 1;
        self.claim_slot(key)
    }

    fn claim_coordinate(&mut self, exact: ExactKey, key: LocationKey) -> (usize, usize) {
        *self.coordinate_counts.entry(exact).or_insert(0) += 1;
        self.claim_slot(key)
    }

    fn claim_slot(&mut self, key: LocationKey) -> (usize, usize) {
        let count = self.slots.entry(key).or_insert(0);
        let slot = *count;
        *count += 1;
        let expected = self.expected_totals.get(&key).copied().unwrap_or(0);
        (slot, expected.max(slot + 1))
    }
}

/// Resolves free-text addresses to map coordinates.
#[derive(Debug, Clone)]
pub struct AddressResolver {
    config: ResolverConfig,
}

impl Default for AddressResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl AddressResolver {
    pub const fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve one address against `state`.
    ///
    /// Returns `None` only for an empty or whitespace-only address. Every
    /// other input resolves to some coordinate, the county center at worst.
    pub fn resolve(
        &self,
        state: &mut CollisionState,
        address: &str,
        explicit: Option<Coordinate>,
        is_priority: bool,
    ) -> Option<ResolvedPosition> {
        if address.trim().is_empty() {
            return None;
        }

        let base_radius = if is_priority {
            self.config.priority_offset_radius
        } else {
            self.config.offset_radius
        };

        if let Some(coords) = explicit.filter(Coordinate::is_finite) {
            let key = LocationKey::rounded(coords);
            let (slot, total) = state.claim_coordinate(ExactKey::of(coords), key);
            let (d_lat, d_lon) = ring_offset(slot, total, base_radius);
            return Some(ResolvedPosition {
                position: coords.offset(d_lat, d_lon),
                anchor: coords,
                base: coords,
                location_key: key,
                source: PositionSource::Explicit,
                slot,
            });
        }

        let (anchor, base, source) = self.base_position(address);
        let key = LocationKey::rounded(base);
        let (slot, total) = state.claim_address(key);
        let (d_lat, d_lon) = ring_offset(slot, total, base_radius);

        Some(ResolvedPosition {
            position: base.offset(d_lat, d_lon),
            anchor,
            base,
            location_key: key,
            source,
            slot,
        })
    }

    /// Reset `state`, then resolve every input in order.
    ///
    /// Totals per location are counted first so each collision ring is spaced
    /// for its final size. Output is parallel to `inputs`.
    pub fn resolve_batch<'a, I>(
        &self,
        state: &mut CollisionState,
        inputs: I,
    ) -> Vec<Option<ResolvedPosition>>
    where
        I: IntoIterator<Item = AddressInput<'a>>,
    {
        state.reset();
        let inputs: Vec<AddressInput<'a>> = inputs.into_iter().collect();

        for input in &inputs {
            if input.address.trim().is_empty() {
                continue;
            }
            let base = match input.explicit.filter(Coordinate::is_finite) {
                Some(coords) => coords,
                None => self.base_position(input.address).1,
            };
            *state
                .expected_totals
                .entry(LocationKey::rounded(base))
                .or_insert(0) += 1;
        }

        let resolved: Vec<_> = inputs
            .iter()
            .map(|input| self.resolve(state, input.address, input.explicit, input.is_priority))
            .collect();

        tracing::debug!(
            "Resolved {} addresses into {} inferred locations and {} explicit points",
            inputs.len(),
            state.address_counts.len(),
            state.coordinate_counts.len()
        );

        resolved
    }

    /// Base position without any collision offset: explicit coordinates when
    /// finite, otherwise the text heuristics.
    pub fn locate(&self, address: &str, explicit: Option<Coordinate>) -> Option<Coordinate> {
        if let Some(coords) = explicit.filter(Coordinate::is_finite) {
            return Some(coords);
        }
        if address.trim().is_empty() {
            return None;
        }
        Some(self.base_position(address).1)
    }

    /// Inside the plausibility box around the service-area center.
    pub fn in_service_area(&self, position: Coordinate) -> bool {
        position.degree_distance(&self.config.service_area_center)
            < self.config.service_area_radius
    }

    /// Text heuristics plus the deterministic street offsets.
    /// Returns `(anchor, base, source)`.
    fn base_position(&self, address: &str) -> (Coordinate, Coordinate, PositionSource) {
        let lower = address.trim().to_lowercase();

        let (anchor, source) = match infer_town(address, &lower) {
            Some((town, source)) => (town.position, source),
            None => {
                tracing::debug!("No town found in '{}', using county center", address.trim());
                (self.config.county_center, PositionSource::CountyCenter)
            }
        };

        let mut position = anchor;
        if let Some(number) = leading_street_number(&lower) {
            let hash = xxh3_64(number.as_bytes());
            let spread = self.config.street_number_spread;
            let d_lat = ((hash % 1000) as f64 / 1000.0 - 0.5) * spread;
            let d_lon = (((hash / 1000) % 1000) as f64 / 1000.0 - 0.5) * spread;
            position = position.offset(d_lat, d_lon);
        }
        if let Some((d_lat, d_lon)) = token_nudge(&lower) {
            position = position.offset(d_lat, d_lon);
        }

        (anchor, position, source)
    }
}

/// Circular offset for the `slot`-th arrival at a location holding `total`.
///
/// Slot 0 stays on the base point. Later slots sit on a ring of at least
/// eight positions; every eight slots the ring radius grows by half.
fn ring_offset(slot: usize, total: usize, base_radius: f64) -> (f64, f64) {
    if slot == 0 {
        return (0.0, 0.0);
    }
    let angle = slot as f64 * (TAU / total.max(RING_SLOTS) as f64);
    let radius = base_radius * (1.0 + (slot / RING_SLOTS) as f64 * RING_GROWTH);
    (radius * angle.sin(), radius * angle.cos())
}

/// Town from the address text: city segment, then a town ending the address,
/// then free-text scan, then ZIP.
fn infer_town(address: &str, lower: &str) -> Option<(&'static Town, PositionSource)> {
    let segments: Vec<&str> = address
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if segments.len() >= 2
        && let Some(town) = towns::town_for_segment(segments[segments.len() - 2])
    {
        return Some((town, PositionSource::Town(town.name)));
    }

    if let Some(town) = towns::trailing_town(lower) {
        return Some((town, PositionSource::Town(town.name)));
    }

    if let Some(town) = towns::scan_for_town(lower) {
        return Some((town, PositionSource::Town(town.name)));
    }

    towns::town_for_zip(lower).map(|town| (town, PositionSource::ZipCode(town.name)))
}

/// Leading digits of the address, e.g. "401" in "401 W 5th St".
fn leading_street_number(lower: &str) -> Option<&str> {
    let end = lower
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(lower.len(), |(i, _)| i);
    (end > 0).then(|| &lower[..end])
}

/// Nudge for the first directional or street-type word in the address.
/// The state name is not a direction.
fn token_nudge(lower: &str) -> Option<(f64, f64)> {
    NON_DIRECTIONAL
        .replace_all(lower, " ")
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .find_map(|word| {
            TOKEN_NUDGES
                .iter()
                .find(|(token, _, _)| *token == word)
                .map(|(_, d_lat, d_lon)| (*d_lat, *d_lon))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("401 W 5th St", Some("401"))]
    #[case("  12 main", None)] // callers trim first
    #[case("PO Box 88", None)]
    #[case("2000", Some("2000"))]
    fn street_numbers(#[case] address: &str, #[case] expected: Option<&str>) {
        let lower = address.to_lowercase();
        check!(leading_street_number(&lower) == expected);
    }

    #[rstest]
    #[case("100 n elm st", Some((0.0030, 0.0)))]
    #[case("7 highway 711 e", Some((0.0020, 0.0020)))]
    #[case("9 elm st", None)]
    #[case("northeast plaza", None)]
    #[case("pembroke, north carolina", None)]
    #[case("lumberton, n.c.", None)]
    #[case("lumberton, n. c.", None)]
    #[case("st. paul's church", None)]
    #[case("1 mcdonald’s way", None)]
    #[case("100 n. cedar st, lumberton, n. c.", Some((0.0030, 0.0)))]
    fn only_first_token_counts(#[case] address: &str, #[case] expected: Option<(f64, f64)>) {
        check!(token_nudge(address) == expected);
    }

    #[test]
    fn ring_offsets_stay_on_their_ring() {
        let base = 0.001;
        check!(ring_offset(0, 5, base) == (0.0, 0.0));
        for slot in 1..8 {
            let (d_lat, d_lon) = ring_offset(slot, 8, base);
            check!((d_lat.hypot(d_lon) - base).abs() < 1e-12);
        }
        let (d_lat, d_lon) = ring_offset(8, 12, base);
        check!((d_lat.hypot(d_lon) - base * 1.5).abs() < 1e-12);
    }

    #[test]
    fn segment_town_wins_over_street_name() {
        let resolver = AddressResolver::default();
        let (_, _, source) = resolver.base_position("10 Pembroke Rd, Lumberton, NC 28358");
        check!(source == PositionSource::Town("lumberton"));
    }

    #[test]
    fn zip_code_is_last_resort_before_center() {
        let resolver = AddressResolver::default();
        let (_, _, source) = resolver.base_position("PO Box 441 28377");
        check!(source == PositionSource::ZipCode("red springs"));
        let (position, _, source) = resolver.base_position("Somewhere Else");
        check!(source == PositionSource::CountyCenter);
        check!(position == resolver.config().county_center);
    }

    #[test]
    fn non_finite_explicit_coordinates_are_ignored() {
        let resolver = AddressResolver::default();
        let mut state = CollisionState::new();
        let pos = resolver
            .resolve(
                &mut state,
                "Maxton, NC",
                Some(Coordinate::new(f64::NAN, -79.0)),
                false,
            )
            .unwrap();
        check!(pos.source == PositionSource::Town("maxton"));
    }
}
