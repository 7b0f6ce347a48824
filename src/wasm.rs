//! WebAssembly bindings for browser dashboards.
//!
//! Tasks cross the boundary in the dashboard's own shape
//! (`{id, address, status, fillLevel}`); snapshots and events come back as
//! plain objects with camelCase keys.
//!
//! ```js
//! const engine = new WasmEngine(tasks);
//! engine.toggleRoute();
//! setInterval(() => { engine.tick(); render(engine.snapshot()); }, engine.tickIntervalMs());
//! ```

use std::time::Duration;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::EngineConfig;
use crate::engine::CollectionEngine;
use crate::models::{Task, TaskId, TaskRecord, TaskStatus};

/// A collection session owned by JavaScript.
#[wasm_bindgen]
pub struct WasmEngine {
    inner: CollectionEngine,
}

#[wasm_bindgen]
impl WasmEngine {
    /// Creates a stopped session. `config` may be omitted for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(tasks: JsValue, config: JsValue) -> Result<WasmEngine, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let inner = CollectionEngine::with_tasks(tasks_from_js(tasks)?, config)?;
        Ok(Self { inner })
    }

    /// Flips the route on/off and returns the new state.
    #[wasm_bindgen(js_name = toggleRoute)]
    pub fn toggle_route(&mut self) -> bool {
        self.inner.toggle_route()
    }

    #[wasm_bindgen(js_name = setRouteStarted)]
    pub fn set_route_started(&mut self, started: bool) {
        self.inner.set_route_started(started);
    }

    #[wasm_bindgen(js_name = isRouteStarted)]
    pub fn is_route_started(&self) -> bool {
        self.inner.is_route_started()
    }

    /// One tick. Returns the completion events.
    pub fn tick(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.inner.tick())
    }

    /// Feeds `elapsed_ms` of wall-clock time and runs the due ticks.
    pub fn advance(&mut self, elapsed_ms: f64) -> Result<JsValue, JsError> {
        let events = self.inner.advance(duration_from_ms(elapsed_ms));
        to_js(&events)
    }

    #[wasm_bindgen(js_name = updateStatus)]
    pub fn update_status(&mut self, id: u32, status: &str) -> Result<bool, JsError> {
        let status: TaskStatus = status.parse()?;
        Ok(self.inner.update_status(TaskId(id), status)?)
    }

    /// Pin click.
    pub fn select(&mut self, id: u32) -> Result<bool, JsError> {
        Ok(self.inner.select(TaskId(id))?)
    }

    #[wasm_bindgen(js_name = replaceTasks)]
    pub fn replace_tasks(&mut self, tasks: JsValue) -> Result<(), JsError> {
        self.inner.replace_tasks(tasks_from_js(tasks)?)?;
        Ok(())
    }

    pub fn replan(&mut self) {
        self.inner.replan();
    }

    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.snapshot())
    }

    pub fn summary(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.summary())
    }

    /// Cadence the host timer should use.
    #[wasm_bindgen(js_name = tickIntervalMs)]
    pub fn tick_interval_ms(&self) -> f64 {
        self.inner.config().tick_interval.as_secs_f64() * 1000.0
    }
}

fn tasks_from_js(value: JsValue) -> Result<Vec<Task>, JsError> {
    let records: Vec<TaskRecord> = serde_wasm_bindgen::from_value(value)?;
    Ok(records.into_iter().map(Task::from).collect())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}

fn duration_from_ms(ms: f64) -> Duration {
    if ms.is_nan() || ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_from_ms() {
        assert_eq!(duration_from_ms(250.0), Duration::from_millis(250));
        assert_eq!(duration_from_ms(-5.0), Duration::ZERO);
        assert_eq!(duration_from_ms(f64::NAN), Duration::ZERO);
        assert_eq!(duration_from_ms(f64::INFINITY), Duration::MAX);
    }
}
