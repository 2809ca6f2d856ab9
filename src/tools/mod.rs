pub mod categories;
pub mod listing;
pub mod map;
pub mod nearby;
pub mod reload;
pub mod search;

pub use categories::*;
pub use map::*;
pub use nearby::*;
pub use reload::*;
pub use search::*;
