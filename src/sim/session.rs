//! Game session: one track, an append-only list of cars, and the turn algorithm
//!
//! Cars are addressed by index. Indices never change for the lifetime of the
//! session, so hosts may hold on to them.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::car::{Car, CarColor};
use super::track::Track;

/// Flat per-car record handed to hosts
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarExport {
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub vy: i32,
    pub state: i32,
    pub color: i32,
}

impl CarExport {
    /// Returned for an index that does not name a car
    pub const INVALID: CarExport = CarExport {
        x: 0,
        y: 0,
        vx: 0,
        vy: 0,
        state: -1,
        color: 0,
    };
}

impl From<&Car> for CarExport {
    fn from(car: &Car) -> Self {
        let pos = car.position();
        let vel = car.velocity();
        Self {
            x: pos.x,
            y: pos.y,
            vx: vel.x,
            vy: vel.y,
            state: car.state().code(),
            color: car.color().id(),
        }
    }
}

/// What a single turn did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The index did not name a car; nothing changed
    Ignored,
    /// The car moved to `to` (possibly staying put with zero velocity)
    Moved { to: IVec2 },
    /// The car is crashed or finished and did not move
    Stationary,
    /// The path left the track or crossed a wall; only the mover crashed
    HitWall,
    /// The car would land on car `other`; both crashed
    HitCar { other: usize },
}

/// The whole simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    track: Track,
    cars: Vec<Car>,
}

impl GameSession {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            track: Track::new(width, height),
            cars: Vec::new(),
        }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn car(&self, index: usize) -> Option<&Car> {
        self.cars.get(index)
    }

    pub fn car_count(&self) -> usize {
        self.cars.len()
    }

    /// Append a car at (x, y). Returns its index.
    pub fn add_car(&mut self, x: i32, y: i32, color: CarColor) -> usize {
        if !color.is_named() {
            log::debug!("car added with unlisted color id {}", color.id());
        }
        self.cars.push(Car::new(IVec2::new(x, y), color));
        self.cars.len() - 1
    }

    pub fn add_wall(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.track.add_wall(x1, y1, x2, y2);
    }

    /// Mark a car as finished. Out-of-range indices are ignored.
    ///
    /// The engine never decides who finished; hosts with a finish zone do.
    pub fn finish_car(&mut self, index: usize) {
        if let Some(car) = self.cars.get_mut(index) {
            car.finish();
            log::debug!("car {index} finished at {}", car.position());
        }
    }

    /// Respawn a car. Out-of-range indices are ignored.
    pub fn reset_car(&mut self, index: usize, x: i32, y: i32) {
        if let Some(car) = self.cars.get_mut(index) {
            car.reset(IVec2::new(x, y));
            log::debug!("car {index} respawned at ({x}, {y})");
        }
    }

    /// Export one car, or `CarExport::INVALID` for a bad index
    pub fn export(&self, index: usize) -> CarExport {
        self.cars
            .get(index)
            .map(CarExport::from)
            .unwrap_or(CarExport::INVALID)
    }

    pub fn export_all(&self) -> Vec<CarExport> {
        self.cars.iter().map(CarExport::from).collect()
    }

    /// Lowest-indexed car other than `ignore` that is not crashed and sits on `pos`
    fn car_at(&self, pos: IVec2, ignore: usize) -> Option<usize> {
        self.cars
            .iter()
            .enumerate()
            .find(|&(i, car)| i != ignore && !car.is_crashed() && car.position() == pos)
            .map(|(i, _)| i)
    }

    /// Advance one car by one turn
    ///
    /// Acceleration is applied first, then the path from the current position
    /// to the predicted one is checked against the track and against the
    /// *current* positions of the other cars. A wall hit crashes only the
    /// mover; landing on another car crashes both.
    ///
    /// Cars moved by separate calls in the same round only ever see each
    /// other's committed positions, so two cars can cross paths without
    /// colliding and the order of calls can change who crashes.
    ///
    /// A car that is not playing still takes part in the checks from its own
    /// cell: a wreck given a turn crashes a playing car parked on top of it.
    pub fn process_input(&mut self, index: usize, dx: i32, dy: i32) -> TurnOutcome {
        let Some(car) = self.cars.get_mut(index) else {
            return TurnOutcome::Ignored;
        };
        car.accelerate(IVec2::new(dx, dy));

        let current = car.position();
        let next = car.predict_next_position();

        let hit_wall = self.track.is_collision(current, next);
        let hit_car = self.car_at(next, index);

        if hit_wall {
            self.cars[index].crash();
            log::debug!("car {index} crashed into a wall moving {current} -> {next}");
            TurnOutcome::HitWall
        } else if let Some(other) = hit_car {
            self.cars[index].crash();
            self.cars[other].crash();
            log::debug!("car {index} collided with car {other} at {next}");
            TurnOutcome::HitCar { other }
        } else if !self.cars[index].is_playing() {
            TurnOutcome::Stationary
        } else {
            let car = &mut self.cars[index];
            car.move_forward();
            log::trace!("car {index} moved {current} -> {}", car.position());
            TurnOutcome::Moved { to: car.position() }
        }
    }
}
