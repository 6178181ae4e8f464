use crate::math::Vec3;
use crate::physics::BodySnapshot;
use serde::{Deserialize, Serialize};

/// Per-generator contributions for one tick, in newtons before tick scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceBreakdown {
    pub wind: Vec3,
    pub control: Vec3,
    pub drag: Vec3,
    pub net: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Ticks completed, including this one.
    pub tick: u64,
    pub time: f64,
    pub body: BodySnapshot,
    pub forces: ForceBreakdown,
}

/// Presentation hook. Gets a copy of the state after every tick and cannot mutate the simulation.
pub trait TickObserver {
    fn on_tick(&mut self, snapshot: &TickSnapshot);
}

impl TickObserver for () {
    fn on_tick(&mut self, _snapshot: &TickSnapshot) {}
}

/// Keeps every snapshot of a run in memory, for replay comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectoryRecorder {
    pub frames: Vec<TickSnapshot>,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&TickSnapshot> {
        self.frames.last()
    }
}

impl TickObserver for TrajectoryRecorder {
    fn on_tick(&mut self, snapshot: &TickSnapshot) {
        self.frames.push(*snapshot);
    }
}
