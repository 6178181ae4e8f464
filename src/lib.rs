//! Fixed-timestep simulation of a single UAV pushed around by wind, drag and operator thrust.
//!
//! Each tick the [`Scheduler`](sim::Scheduler) samples every force generator against the
//! body's velocity at the start of the tick, sums the forces, converts the sum into an
//! acceleration and advances the body with semi-implicit Euler.

pub mod config;
pub mod error;
pub mod forces;
pub mod math;
pub mod physics;
pub mod sim;

pub use config::{Config, SimulationConfig, UavConfig};
pub use error::{ConfigError, SimError};
pub use math::Vec3;
pub use sim::Scheduler;
