//! Racetrack headless replay
//!
//! Builds a race from a map file (and optional settings JSON), reads moves
//! from stdin, and prints the winner and the final session as JSON.
//!
//! ```text
//! racetrack maps/track1.txt [settings.json] < moves.txt
//! ```
//!
//! Each move line is `dx dy` with both in -1..=1. Turns rotate through the
//! players the way the interactive host does, except that a crashed player is
//! respawned on its start cell at its next turn rather than after a timer,
//! and the move read for that turn is then applied to the respawned car.
//! The first car to land inside the map's FINISH zone wins and ends the race;
//! remaining moves are ignored.

use std::io::{self, BufRead};

use anyhow::{Context, bail};
use glam::IVec2;
use serde::Serialize;

use racetrack_engine::{GameSession, Rect, Settings, TrackMap, TurnOutcome};

fn parse_move(line: &str) -> anyhow::Result<Option<(i32, i32)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut parts = line.split_whitespace();
    let (Some(dx), Some(dy)) = (parts.next(), parts.next()) else {
        bail!("expected `dx dy`, got {line:?}");
    };
    let dx: i32 = dx.parse().with_context(|| format!("bad dx in {line:?}"))?;
    let dy: i32 = dy.parse().with_context(|| format!("bad dy in {line:?}"))?;
    if !(-1..=1).contains(&dx) || !(-1..=1).contains(&dy) {
        bail!("acceleration out of range in {line:?}");
    }
    Ok(Some((dx, dy)))
}

/// Host-side turn rotation on top of the engine
struct Race {
    session: GameSession,
    starts: Vec<IVec2>,
    finish: Option<Rect>,
    current: usize,
    winner: Option<usize>,
}

/// Printed when the replay ends
#[derive(Serialize)]
struct Report<'a> {
    /// Index of the car that reached the finish zone
    winner: Option<usize>,
    session: &'a GameSession,
}

impl Race {
    fn new(session: GameSession, finish: Option<Rect>) -> Self {
        let starts = session.cars().iter().map(|car| car.position()).collect();
        Self {
            session,
            starts,
            finish,
            current: 0,
            winner: None,
        }
    }

    fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Apply one move for the current player and pass the turn on
    fn play(&mut self, dx: i32, dy: i32) {
        if self.session.car_count() == 0 || self.is_over() {
            return;
        }
        let player = self.current;
        let car_crashed = self.session.car(player).is_some_and(|car| car.is_crashed());
        if car_crashed {
            let start = self.starts[player];
            self.session.reset_car(player, start.x, start.y);
        }
        if self.session.car(player).is_some_and(|car| car.is_playing()) {
            match self.session.process_input(player, dx, dy) {
                TurnOutcome::HitWall => log::info!("player {} crashed into a wall", player + 1),
                TurnOutcome::HitCar { other } => {
                    log::info!("players {} and {} collided", player + 1, other + 1)
                }
                TurnOutcome::Moved { to } => {
                    log::debug!("player {} -> {to}", player + 1);
                    if self.finish.is_some_and(|zone| zone.contains(to)) {
                        self.session.finish_car(player);
                        self.winner = Some(player);
                        log::info!("player {} wins", player + 1);
                        return;
                    }
                }
                TurnOutcome::Stationary | TurnOutcome::Ignored => {}
            }
        }
        self.current = (self.current + 1) % self.session.car_count();
    }
}

fn main() -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(map_path) = args.next() else {
        bail!("usage: racetrack <map-file> [settings.json] < moves");
    };
    let settings = match args.next() {
        Some(path) => Settings::load(&path).with_context(|| format!("loading {path}"))?,
        None => Settings::default(),
    };

    let map = TrackMap::load(&map_path).with_context(|| format!("loading {map_path}"))?;
    let mut race = Race::new(map.build_session(&settings), map.finish);
    log::info!(
        "Race on {map_path}: {} players, {}x{} track",
        race.session.car_count(),
        settings.track_width,
        settings.track_height
    );

    for (n, line) in io::stdin().lock().lines().enumerate() {
        let line = line.context("reading moves")?;
        if let Some((dx, dy)) =
            parse_move(&line).with_context(|| format!("move line {}", n + 1))?
        {
            race.play(dx, dy);
        }
        if race.is_over() {
            break;
        }
    }

    let report = Report {
        winner: race.winner,
        session: &race.session,
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}
