use crate::forces::ControlInput;
use std::collections::VecDeque;

/// Supplies operator input to the scheduler, once per tick.
///
/// Returning `None` means no fresh input this tick; the scheduler then applies the
/// configured [`InputLossPolicy`](crate::config::InputLossPolicy).
pub trait InputSource {
    fn poll(&mut self, tick: u64) -> Option<ControlInput>;
}

/// A source that never has input, e.g. when no device is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, _tick: u64) -> Option<ControlInput> {
        None
    }
}

impl<F> InputSource for F
where
    F: FnMut(u64) -> Option<ControlInput>,
{
    fn poll(&mut self, tick: u64) -> Option<ControlInput> {
        self(tick)
    }
}

/// Replays a fixed list of `(ticks, input)` segments, then runs dry.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    segments: VecDeque<(u64, ControlInput)>,
}

impl ScriptedInput {
    pub fn new(segments: impl IntoIterator<Item = (u64, ControlInput)>) -> Self {
        Self {
            segments: segments.into_iter().filter(|(ticks, _)| *ticks > 0).collect(),
        }
    }

    pub fn hold(input: ControlInput, ticks: u64) -> Self {
        Self::new([(ticks, input)])
    }

    pub fn remaining_ticks(&self) -> u64 {
        self.segments.iter().map(|(ticks, _)| ticks).sum()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _tick: u64) -> Option<ControlInput> {
        let (ticks, input) = self.segments.front_mut()?;
        let input = *input;
        *ticks -= 1;
        if *ticks == 0 {
            self.segments.pop_front();
        }
        Some(input)
    }
}
