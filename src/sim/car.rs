//! Car entity and its state machine
//!
//! `Playing` is the only state in which a car responds to acceleration or
//! movement. `Crashed` holds until the car is reset. `Finished` is never set
//! by the simulation itself; a host with finish-line logic may set it.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CarState {
    #[default]
    Playing,
    Crashed,
    Finished,
}

impl CarState {
    /// Numeric code used at the C boundary
    pub fn code(self) -> i32 {
        match self {
            CarState::Playing => 0,
            CarState::Crashed => 1,
            CarState::Finished => 2,
        }
    }
}

/// Car color
///
/// Ids 0..=4 are the named colors. Any other id is kept verbatim in
/// `Palette` so hosts with larger palettes read back exactly what they wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarColor {
    Red,
    White,
    Blue,
    Black,
    Custom,
    Palette(i32),
}

impl CarColor {
    pub fn from_id(id: i32) -> Self {
        match id {
            0 => CarColor::Red,
            1 => CarColor::White,
            2 => CarColor::Blue,
            3 => CarColor::Black,
            4 => CarColor::Custom,
            other => CarColor::Palette(other),
        }
    }

    pub fn id(self) -> i32 {
        match self {
            CarColor::Red => 0,
            CarColor::White => 1,
            CarColor::Blue => 2,
            CarColor::Black => 3,
            CarColor::Custom => 4,
            CarColor::Palette(id) => id,
        }
    }

    /// True for the five named colors
    pub fn is_named(self) -> bool {
        !matches!(self, CarColor::Palette(_))
    }
}

/// A single racer on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    position: IVec2,
    velocity: IVec2,
    state: CarState,
    color: CarColor,
}

impl Car {
    pub fn new(position: IVec2, color: CarColor) -> Self {
        Self {
            position,
            velocity: IVec2::ZERO,
            state: CarState::Playing,
            color,
        }
    }

    #[inline]
    pub fn position(&self) -> IVec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> IVec2 {
        self.velocity
    }

    #[inline]
    pub fn state(&self) -> CarState {
        self.state
    }

    #[inline]
    pub fn color(&self) -> CarColor {
        self.color
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == CarState::Playing
    }

    #[inline]
    pub fn is_crashed(&self) -> bool {
        self.state == CarState::Crashed
    }

    /// Add `delta` to the velocity. No cap and no friction.
    pub fn accelerate(&mut self, delta: IVec2) {
        if !self.is_playing() {
            return;
        }
        self.velocity = self.velocity.saturating_add(delta);
    }

    /// Where the car lands if it moves with its current velocity
    #[inline]
    pub fn predict_next_position(&self) -> IVec2 {
        self.position.saturating_add(self.velocity)
    }

    pub fn move_forward(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.position = self.predict_next_position();
    }

    /// Stop the car dead. Idempotent.
    pub fn crash(&mut self) {
        self.state = CarState::Crashed;
        self.velocity = IVec2::ZERO;
    }

    /// Mark the car as having finished. Only hosts call this.
    pub fn finish(&mut self) {
        self.state = CarState::Finished;
    }

    /// Respawn at `position` with zero velocity, from any state
    pub fn reset(&mut self, position: IVec2) {
        self.position = position;
        self.velocity = IVec2::ZERO;
        self.state = CarState::Playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car_at(x: i32, y: i32) -> Car {
        Car::new(IVec2::new(x, y), CarColor::Red)
    }

    #[test]
    fn test_new_car_is_playing_and_still() {
        let car = car_at(3, 4);
        assert_eq!(car.state(), CarState::Playing);
        assert_eq!(car.velocity(), IVec2::ZERO);
        assert_eq!(car.position(), IVec2::new(3, 4));
    }

    #[test]
    fn test_accelerate_accumulates_without_moving() {
        let mut car = car_at(0, 0);
        car.accelerate(IVec2::new(1, 0));
        car.accelerate(IVec2::new(1, -1));
        assert_eq!(car.velocity(), IVec2::new(2, -1));
        assert_eq!(car.position(), IVec2::ZERO);
        assert_eq!(car.predict_next_position(), IVec2::new(2, -1));
    }

    #[test]
    fn test_move_applies_velocity() {
        let mut car = car_at(1, 1);
        car.accelerate(IVec2::new(2, 3));
        car.move_forward();
        assert_eq!(car.position(), IVec2::new(3, 4));
        car.move_forward();
        assert_eq!(car.position(), IVec2::new(5, 7));
    }

    #[test]
    fn test_crash_is_sticky() {
        let mut car = car_at(2, 2);
        car.accelerate(IVec2::new(1, 1));
        car.crash();
        assert_eq!(car.velocity(), IVec2::ZERO);

        car.accelerate(IVec2::new(5, 5));
        car.move_forward();
        car.crash();
        assert_eq!(car.state(), CarState::Crashed);
        assert_eq!(car.velocity(), IVec2::ZERO);
        assert_eq!(car.position(), IVec2::new(2, 2));
    }

    #[test]
    fn test_finished_car_ignores_input() {
        let mut car = car_at(0, 0);
        car.finish();
        car.accelerate(IVec2::new(1, 0));
        car.move_forward();
        assert_eq!(car.position(), IVec2::ZERO);
        assert_eq!(car.velocity(), IVec2::ZERO);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut car = car_at(0, 0);
        car.crash();
        car.reset(IVec2::new(7, 8));
        assert_eq!(car.state(), CarState::Playing);
        assert_eq!(car.position(), IVec2::new(7, 8));

        car.accelerate(IVec2::new(3, 0));
        car.finish();
        car.reset(IVec2::new(1, 1));
        assert_eq!(car.state(), CarState::Playing);
        assert_eq!(car.velocity(), IVec2::ZERO);
    }

    #[test]
    fn test_velocity_saturates_instead_of_overflowing() {
        let mut car = car_at(0, 0);
        car.accelerate(IVec2::new(i32::MAX, 0));
        car.accelerate(IVec2::new(i32::MAX, 0));
        assert_eq!(car.velocity().x, i32::MAX);
        assert_eq!(car.predict_next_position().x, i32::MAX);
    }

    #[test]
    fn test_color_ids_round_trip() {
        for id in -2..10 {
            assert_eq!(CarColor::from_id(id).id(), id);
        }
        assert!(CarColor::from_id(4).is_named());
        assert!(!CarColor::from_id(5).is_named());
        assert_eq!(CarColor::from_id(2), CarColor::Blue);
    }

    #[test]
    fn test_state_codes() {
        assert_eq!(CarState::Playing.code(), 0);
        assert_eq!(CarState::Crashed.code(), 1);
        assert_eq!(CarState::Finished.code(), 2);
    }
}
