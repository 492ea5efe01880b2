// Per-Tick JSONL Time Series Recorder
// Outputs one JSON line per tick of a flight for trajectory plotting

use serde::Serialize;
use starship_engine::RocketState;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct TickSnapshot {
    pub flight: u32,
    pub tick: u64,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub speed: f64,
    pub angle: f64,
    pub fuel: f64,
    pub distance: f64,
    pub max_height: f64,
    pub gravity_assists: u32,
}

impl TickSnapshot {
    pub fn from_state(flight: u32, r: &RocketState) -> Self {
        Self {
            flight,
            tick: r.ticks,
            x: r.x,
            y: r.y,
            vx: r.vx,
            vy: r.vy,
            speed: r.speed(),
            angle: r.angle,
            fuel: r.fuel,
            distance: r.distance,
            max_height: r.max_height,
            gravity_assists: r.gravity_assists,
        }
    }
}

/// Time series recorder that accumulates snapshots and writes JSONL
pub struct TimeSeriesRecorder {
    snapshots: Vec<TickSnapshot>,
}

impl TimeSeriesRecorder {
    pub fn new() -> Self {
        Self { snapshots: Vec::new() }
    }

    pub fn record(&mut self, flight: u32, rocket: &RocketState) {
        self.snapshots.push(TickSnapshot::from_state(flight, rocket));
    }

    /// Write all snapshots to a JSONL file
    pub fn write_jsonl(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        for snapshot in &self.snapshots {
            let line = serde_json::to_string(snapshot)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}
