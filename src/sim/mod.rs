//! Deterministic simulation module
//!
//! All race logic lives here. This module must stay pure and deterministic:
//! - Integer grid only, exact arithmetic
//! - No randomness, no clocks
//! - Stable iteration order (by car index, walls by insertion)
//! - No rendering or platform dependencies

pub mod car;
pub mod geometry;
pub mod session;
pub mod track;

pub use car::{Car, CarColor, CarState};
pub use geometry::{Orientation, in_bounds, orientation, point_on_segment, segments_intersect};
pub use session::{CarExport, GameSession, TurnOutcome};
pub use track::{Segment, Track};
