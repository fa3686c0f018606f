pub mod runner;

pub use runner::GameRunner;

use std::cell::RefCell;

use pool_engine::{BallId, GameConfig, InputEvent};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = RefCell::new(None);
}

/// Run `f` against the installed runner. `None` before `game_init()`.
fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("Table not initialized. Call game_init() first.");
                None
            }
        }
    })
}

/// Build the table from a JSON config. Returns how many configured balls
/// were skipped for an unknown colour.
#[wasm_bindgen]
pub fn game_init(config_json: &str) -> Result<u32, JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = GameRunner::from_json(config_json, GameConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let skipped = runner.setup().skipped_count() as u32;
    log::info!(
        "pool: initialized {}x{} table with {} balls",
        runner.game().table().width(),
        runner.game().table().height(),
        runner.game().table().balls().len()
    );

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    Ok(skipped)
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt as f64));
}

#[wasm_bindgen]
pub fn game_strike(ball: u32, vx: f64, vy: f64) {
    with_runner(|r| r.push_input(InputEvent::Strike { ball: BallId(ball), vx, vy }));
}

#[wasm_bindgen]
pub fn game_rollback() {
    with_runner(|r| r.push_input(InputEvent::Rollback));
}

#[wasm_bindgen]
pub fn game_reset() {
    with_runner(|r| r.push_input(InputEvent::Reset));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len()).unwrap_or(0)
}

// ---- Scoreboard ----

#[wasm_bindgen]
pub fn get_score() -> u32 {
    with_runner(|r| r.score()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_seconds() -> u32 {
    with_runner(|r| r.seconds()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_is_won() -> bool {
    with_runner(|r| r.is_won()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn get_history_depth() -> u32 {
    with_runner(|r| r.history_depth()).unwrap_or(0)
}
