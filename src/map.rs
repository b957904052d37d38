//! Track map files
//!
//! Maps are plain text, one command per line, coordinates in grid cells:
//!
//! ```text
//! # comment
//! IMAGE track1.png
//! START 2 10 6 2
//! FINISH 26 2 4 3
//! WALL 0 0 31 0
//! ```
//!
//! Lines whose arguments are not integers are skipped, as are unknown
//! commands. A known command with too few arguments is an error.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{CarColor, GameSession, Segment};

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Failed to read map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {command} needs {expected} arguments, found {found}")]
    MissingArguments {
        line: usize,
        command: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Axis-aligned zone in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Centre point, not rounded
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x) + f64::from(self.w) / 2.0,
            f64::from(self.y) + f64::from(self.h) / 2.0,
        )
    }

    /// Half-open containment test, matching how hosts hit-test zones
    pub fn contains(&self, p: IVec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }
}

/// Parsed contents of a map file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackMap {
    /// Background image path, relative to the map file
    pub image: Option<String>,
    pub start: Option<Rect>,
    /// Finish zone. The engine never checks it; hosts decide who finished.
    pub finish: Option<Rect>,
    pub walls: Vec<Segment>,
}

fn four(
    args: &[i32],
    line: usize,
    command: &'static str,
) -> Result<(i32, i32, i32, i32), MapError> {
    match *args {
        [a, b, c, d, ..] => Ok((a, b, c, d)),
        _ => Err(MapError::MissingArguments {
            line,
            command,
            expected: 4,
            found: args.len(),
        }),
    }
}

impl TrackMap {
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut map = TrackMap::default();

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let parts: Vec<&str> = raw.split_whitespace().collect();
            let Some((&cmd, rest)) = parts.split_first() else {
                continue;
            };
            if cmd.starts_with('#') {
                continue;
            }

            if cmd == "IMAGE" {
                let path = rest.first().ok_or(MapError::MissingArguments {
                    line,
                    command: "IMAGE",
                    expected: 1,
                    found: 0,
                })?;
                map.image = Some((*path).to_string());
                continue;
            }

            let args = match rest.iter().map(|s| s.parse()).collect::<Result<Vec<i32>, _>>() {
                Ok(args) => args,
                Err(_) => {
                    log::warn!("map line {line}: non-integer arguments, skipped");
                    continue;
                }
            };

            match cmd {
                "START" => {
                    let (x, y, w, h) = four(&args, line, "START")?;
                    map.start = Some(Rect::new(x, y, w, h));
                }
                "FINISH" => {
                    let (x, y, w, h) = four(&args, line, "FINISH")?;
                    map.finish = Some(Rect::new(x, y, w, h));
                }
                "WALL" => {
                    let (x1, y1, x2, y2) = four(&args, line, "WALL")?;
                    map.walls
                        .push(Segment::new(IVec2::new(x1, y1), IVec2::new(x2, y2)));
                }
                other => log::debug!("map line {line}: unknown command {other}, skipped"),
            }
        }

        Ok(map)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let map = Self::parse(&text)?;
        log::info!(
            "Loaded map {} ({} walls, start zone: {})",
            path.display(),
            map.walls.len(),
            map.start.is_some()
        );
        Ok(map)
    }

    /// Copy every wall into the session's track
    pub fn apply_walls(&self, session: &mut GameSession) {
        for wall in &self.walls {
            session.add_wall(wall.start.x, wall.start.y, wall.end.x, wall.end.y);
        }
    }

    /// Spread `count` cars across the start zone
    ///
    /// Cars line up along the zone's longer axis (horizontal on ties), centred
    /// on the zone, `spacing` cells apart. Coordinates truncate toward zero.
    pub fn start_positions(&self, count: usize, spacing: f64) -> Vec<IVec2> {
        let ((cx, cy), (w, h)) = match self.start {
            Some(zone) => (zone.center(), (zone.w, zone.h)),
            None => (DEFAULT_START_CENTER, DEFAULT_START_SIZE),
        };
        let horizontal = w >= h;
        let mid = (count as f64 - 1.0) / 2.0;

        (0..count)
            .map(|i| {
                let offset = (i as f64 - mid) * spacing;
                if horizontal {
                    IVec2::new((cx + offset) as i32, cy as i32)
                } else {
                    IVec2::new(cx as i32, (cy + offset) as i32)
                }
            })
            .collect()
    }

    /// Build a ready-to-race session: track, walls, and one car per player
    pub fn build_session(&self, settings: &Settings) -> GameSession {
        if settings.track_width <= 0 || settings.track_height <= 0 {
            log::warn!(
                "track size {}x{} leaves no legal cells",
                settings.track_width,
                settings.track_height
            );
        }
        let mut session = GameSession::new(settings.track_width, settings.track_height);
        self.apply_walls(&mut session);

        let positions = self.start_positions(settings.players(), settings.start_spacing);
        for (player, pos) in positions.into_iter().enumerate() {
            let color = CarColor::from_id(settings.color_for(player));
            session.add_car(pos.x, pos.y, color);
        }
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CarState;

    const SAMPLE: &str = "\
# Sample oval
IMAGE track1.png
START 2 10 6 2
FINISH 26 2 4 3

WALL 0 0 31 0
WALL 10 5 10 20
WALL 1 x 2 3
LAP 1 2
";

    #[test]
    fn test_parse_sample() {
        let map = TrackMap::parse(SAMPLE).unwrap();
        assert_eq!(map.image.as_deref(), Some("track1.png"));
        assert_eq!(map.start, Some(Rect::new(2, 10, 6, 2)));
        assert_eq!(map.finish, Some(Rect::new(26, 2, 4, 3)));
        // The non-integer wall and the unknown command are skipped
        assert_eq!(map.walls.len(), 2);
        assert_eq!(map.walls[1].start, IVec2::new(10, 5));
        assert_eq!(map.walls[1].end, IVec2::new(10, 20));
    }

    #[test]
    fn test_short_wall_is_an_error() {
        let err = TrackMap::parse("WALL 1 2 3\n").unwrap_err();
        assert!(matches!(
            err,
            MapError::MissingArguments {
                line: 1,
                command: "WALL",
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn test_image_without_path_is_an_error() {
        assert!(TrackMap::parse("# header\nIMAGE\n").is_err());
    }

    #[test]
    fn test_extra_arguments_are_ignored() {
        let map = TrackMap::parse("WALL 1 2 3 4 5\n").unwrap();
        assert_eq!(map.walls[0].end, IVec2::new(3, 4));
    }

    #[test]
    fn test_start_positions_horizontal() {
        let map = TrackMap::parse("START 2 10 6 2").unwrap();
        assert_eq!(
            map.start_positions(2, 2.0),
            vec![IVec2::new(4, 11), IVec2::new(6, 11)]
        );
        assert_eq!(
            map.start_positions(3, 2.0),
            vec![IVec2::new(3, 11), IVec2::new(5, 11), IVec2::new(7, 11)]
        );
    }

    #[test]
    fn test_start_positions_vertical() {
        let map = TrackMap::parse("START 1 1 2 6").unwrap();
        assert_eq!(
            map.start_positions(2, 2.0),
            vec![IVec2::new(2, 3), IVec2::new(2, 5)]
        );
    }

    #[test]
    fn test_start_positions_truncate_toward_zero() {
        let map = TrackMap::parse("START 0 0 3 1").unwrap();
        assert_eq!(map.start_positions(1, 2.0), vec![IVec2::new(1, 0)]);

        // Centre (1.0, 0.5): the first car lands on x = -0.5, which truncates to 0
        let map = TrackMap::parse("START 0 0 2 1").unwrap();
        assert_eq!(
            map.start_positions(2, 3.0),
            vec![IVec2::new(0, 0), IVec2::new(2, 0)]
        );
    }

    #[test]
    fn test_default_start_zone() {
        let map = TrackMap::default();
        assert_eq!(
            map.start_positions(2, 2.0),
            vec![IVec2::new(1, 2), IVec2::new(3, 2)]
        );
    }

    #[test]
    fn test_build_session() {
        let map = TrackMap::parse(SAMPLE).unwrap();
        let settings = Settings::default();
        let session = map.build_session(&settings);

        assert_eq!(session.track().width(), 32);
        assert_eq!(session.track().walls().len(), 2);
        assert_eq!(session.car_count(), 2);
        assert_eq!(session.export(0).color, 0);
        assert_eq!(session.export(1).color, 2);
        assert_eq!(session.car(1).unwrap().position(), IVec2::new(6, 11));
        assert!(session.cars().iter().all(|c| c.state() == CarState::Playing));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let zone = Rect::new(26, 2, 4, 3);
        assert!(zone.contains(IVec2::new(26, 2)));
        assert!(zone.contains(IVec2::new(29, 4)));
        assert!(!zone.contains(IVec2::new(30, 2)));
        assert!(!zone.contains(IVec2::new(26, 5)));
    }
}
