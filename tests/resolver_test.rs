mod common;

use assert2::{check, let_assert};
use common::{directory, org};
use robeson_directory::config::ResolverConfig;
use robeson_directory::geo::{AddressInput, PositionSource};
use robeson_directory::{AddressResolver, Category, CollisionState, Coordinate, OrganizationRecord};
use rstest::{fixture, rstest};

#[fixture]
fn resolver() -> AddressResolver {
    AddressResolver::new(ResolverConfig::default())
}

/// Test: every organization sharing an address gets its own pin near the base.
#[rstest]
fn shared_address_pins_are_unique(resolver: AddressResolver) {
    let orgs: Vec<OrganizationRecord> = (0..12)
        .map(|i| {
            org(
                &i.to_string(),
                &format!("Agency {i}"),
                Category::CommunityServices,
                "100 Main St, Lumberton, NC",
                "",
            )
        })
        .collect();

    let mut state = CollisionState::new();
    let resolved = resolver.resolve_batch(&mut state, orgs.iter().map(AddressInput::from));

    let positions: Vec<Coordinate> = resolved
        .iter()
        .map(|r| r.map(|r| r.position))
        .collect::<Option<_>>()
        .expect("every address resolves");
    let max_radius = resolver.config().offset_radius * 1.5 + 1e-9;
    for (i, a) in positions.iter().enumerate() {
        check!(a.degree_distance(&positions[0]) <= max_radius);
        for b in &positions[i + 1..] {
            check!(a.degree_distance(b) > 1e-7);
        }
    }
    check!(resolved.iter().flatten().all(|r| r.location_key == resolved[0].unwrap().location_key));
}

/// Test: an explicit point on a town anchor and a bare town address share one ring.
#[rstest]
fn explicit_point_on_a_town_anchor_gets_its_own_pin(resolver: AddressResolver) {
    let mut downtown = org(
        "downtown",
        "Downtown Office",
        Category::GovernmentServices,
        "Downtown office, Lumberton, NC",
        "",
    );
    downtown.latitude = Some(34.6182);
    downtown.longitude = Some(-79.0086);
    let orgs = [
        org("town", "Town Office", Category::GovernmentServices, "Lumberton, NC", ""),
        downtown,
    ];

    let mut state = CollisionState::new();
    let resolved = resolver.resolve_batch(&mut state, orgs.iter().map(AddressInput::from));
    let_assert!([Some(town), Some(explicit)] = resolved.as_slice());
    check!(town.source == PositionSource::Town("lumberton"));
    check!(explicit.source == PositionSource::Explicit);
    check!(town.location_key == explicit.location_key);
    check!(town.slot == 0);
    check!(explicit.slot == 1);
    check!(town.position.degree_distance(&explicit.position) > 1e-7);
}

/// Test: resetting the state between batches gives identical output.
#[rstest]
fn batches_are_idempotent(resolver: AddressResolver, directory: Vec<OrganizationRecord>) {
    let mut state = CollisionState::new();
    let first = resolver.resolve_batch(&mut state, directory.iter().map(AddressInput::from));
    let second = resolver.resolve_batch(&mut state, directory.iter().map(AddressInput::from));
    check!(first == second);

    let mut fresh = CollisionState::new();
    let third = resolver.resolve_batch(&mut fresh, directory.iter().map(AddressInput::from));
    check!(first == third);
}

/// Test: without a reset, the same address lands on a different slot.
#[rstest]
fn streaming_resolution_offsets_repeats(resolver: AddressResolver) {
    let mut state = CollisionState::new();
    let_assert!(Some(first) = resolver.resolve(&mut state, "Maxton, NC", None, false));
    let_assert!(Some(second) = resolver.resolve(&mut state, "Maxton, NC", None, false));
    check!(first.slot == 0);
    check!(second.slot == 1);
    check!(first.position != second.position);

    state.reset();
    let_assert!(Some(again) = resolver.resolve(&mut state, "Maxton, NC", None, false));
    check!(again == first);
}

/// Test: a bare "Town, NC" address sits exactly on the town table entry.
#[rstest]
#[case("Lumberton, NC", "lumberton", Coordinate::new(34.6182, -79.0086))]
#[case("Pembroke, North Carolina", "pembroke", Coordinate::new(34.6807, -79.1953))]
#[case("St Pauls, NC", "st. pauls", Coordinate::new(34.8068, -78.9728))]
fn town_and_state_resolve_to_the_town(
    resolver: AddressResolver,
    #[case] address: &str,
    #[case] town: &'static str,
    #[case] expected: Coordinate,
) {
    let mut state = CollisionState::new();
    let_assert!(Some(resolved) = resolver.resolve(&mut state, address, None, false));
    check!(resolved.source == PositionSource::Town(town));
    check!(resolved.anchor == expected);
    check!(resolved.base == expected);
    check!(resolved.position == expected);
}

/// Test: a town name without a comma or state code still resolves to the town.
#[rstest]
#[case("Lumberton", "lumberton")]
#[case("Pembroke", "pembroke")]
#[case("Maxton", "maxton")]
#[case("123 Elm St Lumberton", "lumberton")]
fn bare_town_names_resolve_to_the_town(
    resolver: AddressResolver,
    #[case] address: &str,
    #[case] town: &'static str,
) {
    let mut state = CollisionState::new();
    let_assert!(Some(resolved) = resolver.resolve(&mut state, address, None, false));
    check!(resolved.source == PositionSource::Town(town));
    check!(resolved.anchor != resolver.config().county_center);
}

#[rstest]
#[case("")]
#[case("   ")]
fn empty_addresses_do_not_resolve(resolver: AddressResolver, #[case] address: &str) {
    let mut state = CollisionState::new();
    check!(resolver.resolve(&mut state, address, None, false).is_none());
    check!(
        resolver
            .resolve(&mut state, address, Some(Coordinate::new(34.6, -79.0)), false)
            .is_none()
    );
    check!(state.is_empty());
}

#[rstest]
fn unknown_places_fall_back_to_the_county_center(resolver: AddressResolver) {
    let mut state = CollisionState::new();
    let_assert!(Some(resolved) = resolver.resolve(&mut state, "Somewhere Far Away", None, false));
    check!(resolved.source == PositionSource::CountyCenter);
    check!(resolved.anchor == resolver.config().county_center);
}

#[rstest]
fn explicit_coordinates_skip_heuristics(resolver: AddressResolver) {
    let point = Coordinate::new(34.7001, -79.2002);
    let mut state = CollisionState::new();
    let_assert!(Some(first) = resolver.resolve(&mut state, "1 Main St, Lumberton, NC", Some(point), false));
    let_assert!(Some(second) = resolver.resolve(&mut state, "elsewhere", Some(point), true));
    check!(first.source == PositionSource::Explicit);
    check!(first.position == point);
    check!(second.position != point);
    check!(second.base == point);
}

#[rstest]
fn far_away_points_are_out_of_area(resolver: AddressResolver) {
    check!(resolver.in_service_area(Coordinate::new(34.6182, -79.0086)));
    check!(!resolver.in_service_area(Coordinate::new(35.7796, -78.6382)));
}
