//! Racetrack Engine - deterministic integer-grid vector racing
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, track, cars, turn resolution)
//! - `map`: Track map files and start grid placement
//! - `settings`: Session and start-grid preferences
//! - `ffi`: C ABI for hosts that load the engine as a shared library

pub mod ffi;
pub mod map;
pub mod settings;
pub mod sim;

pub use map::{MapError, Rect, TrackMap};
pub use settings::{Settings, SettingsError};
pub use sim::{CarColor, CarExport, CarState, GameSession, TurnOutcome};

/// Engine configuration constants
pub mod consts {
    /// Default track size in cells (800x600 window at 25 px per cell)
    pub const DEFAULT_TRACK_WIDTH: i32 = 32;
    pub const DEFAULT_TRACK_HEIGHT: i32 = 24;

    /// Most racers a session is set up with
    pub const MAX_PLAYERS: usize = 4;

    /// Gap between neighbouring cars on the start grid, in cells
    pub const START_SPACING: f64 = 2.0;

    /// Start zone assumed when a map has none
    pub const DEFAULT_START_CENTER: (f64, f64) = (2.0, 2.0);
    pub const DEFAULT_START_SIZE: (i32, i32) = (4, 4);
}
