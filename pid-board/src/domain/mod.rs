//! Domain types for the departure board.
//!
//! These types represent validated stop and departure data. Raw provider
//! records are converted into them at the normalization boundary, so code
//! that receives a `Departure` or a `StopId` can trust its validity.

mod departure;
mod location;
mod stop_id;

pub use departure::{Departure, RouteType, delay_between};
pub use location::{Coordinates, Location};
pub use stop_id::{InvalidStopId, StopId};
