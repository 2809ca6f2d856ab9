//! Address placement for the map: town heuristics, collision rings and
//! distance calculations.

pub mod distance;
pub mod resolver;
pub(crate) mod towns;

pub use distance::{distance_miles, format_distance, list_category, sort_by_distance};
pub use resolver::{
    AddressInput, AddressResolver, CollisionState, LocationKey, PositionSource, ResolvedPosition,
};
