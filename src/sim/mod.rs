pub mod input;
pub mod observer;
pub mod scheduler;

pub use input::{InputSource, NoInput, ScriptedInput};
pub use observer::{ForceBreakdown, TickObserver, TickSnapshot, TrajectoryRecorder};
pub use scheduler::{CancelFlag, RunSummary, Scheduler, SchedulerState, StopReason};
