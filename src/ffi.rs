//! C ABI for hosts that load the engine as a shared library
//!
//! Symbol names and the `CarExport` layout match what existing hosts bind
//! against:
//!
//! ```text
//! void*         Game_new(int width, int height);
//! void          Game_delete(void* game);
//! void          Game_add_car(void* game, int x, int y, int color);
//! void          Game_add_wall(void* game, int x1, int y1, int x2, int y2);
//! int           Game_get_car_count(void* game);
//! CarExportData Game_get_car_data(void* game, int index);
//! void          Game_update_car(void* game, int index, int ax, int ay);
//! void          Game_reset_car(void* game, int index, int x, int y);
//! ```
//!
//! The host owns the handle: every `Game_new` must be paired with exactly one
//! `Game_delete`. A null handle is tolerated everywhere. Negative indices are
//! out of range.

#![allow(non_snake_case)]

use crate::sim::{CarColor, CarExport, GameSession};

/// Opaque session handle as seen by the host
pub type GameHandle = *mut GameSession;

/// # Safety
/// `handle` must be null or a live pointer returned by `Game_new`.
unsafe fn session<'a>(handle: GameHandle) -> Option<&'a GameSession> {
    unsafe { handle.as_ref() }
}

/// # Safety
/// `handle` must be null or a live pointer returned by `Game_new`, with no
/// other reference to the session alive.
unsafe fn session_mut<'a>(handle: GameHandle) -> Option<&'a mut GameSession> {
    unsafe { handle.as_mut() }
}

#[inline]
fn car_index(index: i32) -> Option<usize> {
    usize::try_from(index).ok()
}

/// Create a session. Release it with `Game_delete`.
#[unsafe(no_mangle)]
pub extern "C" fn Game_new(width: i32, height: i32) -> GameHandle {
    if width <= 0 || height <= 0 {
        log::warn!("Game_new: track size {width}x{height} leaves no legal cells");
    }
    Box::into_raw(Box::new(GameSession::new(width, height)))
}

/// # Safety
/// `handle` must be null or a pointer returned by `Game_new` that has not
/// been deleted yet. It is invalid after this call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Game_delete(handle: GameHandle) {
    if handle.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(handle) });
}

/// # Safety
/// `handle` must be null or a live pointer returned by `Game_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Game_add_car(handle: GameHandle, x: i32, y: i32, color: i32) {
    if let Some(game) = unsafe { session_mut(handle) } {
        game.add_car(x, y, CarColor::from_id(color));
    }
}

/// # Safety
/// `handle` must be null or a live pointer returned by `Game_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Game_add_wall(handle: GameHandle, x1: i32, y1: i32, x2: i32, y2: i32) {
    if let Some(game) = unsafe { session_mut(handle) } {
        game.add_wall(x1, y1, x2, y2);
    }
}

/// # Safety
/// `handle` must be null or a live pointer returned by `Game_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Game_get_car_count(handle: GameHandle) -> i32 {
    unsafe { session(handle) }
        .map(|game| i32::try_from(game.car_count()).unwrap_or(i32::MAX))
        .unwrap_or(0)
}

/// # Safety
/// `handle` must be null or a live pointer returned by `Game_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Game_get_car_data(handle: GameHandle, index: i32) -> CarExport {
    match (unsafe { session(handle) }, car_index(index)) {
        (Some(game), Some(index)) => game.export(index),
        _ => CarExport::INVALID,
    }
}

/// Run one turn for car `index` with acceleration (ax, ay)
///
/// # Safety
/// `handle` must be null or a live pointer returned by `Game_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Game_update_car(handle: GameHandle, index: i32, ax: i32, ay: i32) {
    if let (Some(game), Some(index)) = (unsafe { session_mut(handle) }, car_index(index)) {
        game.process_input(index, ax, ay);
    }
}

/// # Safety
/// `handle` must be null or a live pointer returned by `Game_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Game_reset_car(handle: GameHandle, index: i32, x: i32, y: i32) {
    if let (Some(game), Some(index)) = (unsafe { session_mut(handle) }, car_index(index)) {
        game.reset_car(index, x, y);
    }
}
