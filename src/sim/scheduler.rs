use crate::config::{Config, ForceScaling, InputLossPolicy, SimulationConfig};
use crate::error::SimError;
use crate::forces::{Control, ControlInput, Drag, ForceContext, ForceGenerator, Wind};
use crate::math::Vec3;
use crate::physics::{RigidBodyState, SemiImplicitEuler};
use crate::sim::{ForceBreakdown, InputSource, TickObserver, TickSnapshot};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TickLimit,
    Cancelled,
}

/// Shared stop signal for [`Scheduler::run_until_cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub ticks_run: u64,
    pub reason: StopReason,
    pub last: Option<TickSnapshot>,
}

/// Fixed-rate simulation loop. Owns the body and every force generator for the whole run.
pub struct Scheduler<R = ChaCha8Rng> {
    config: SimulationConfig,
    body: RigidBodyState,
    wind: Wind<R>,
    drag: Drag,
    control: Control,
    integrator: SemiImplicitEuler,
    ticks: u64,
    state: SchedulerState,
}

impl Scheduler<ChaCha8Rng> {
    /// Builds a scheduler whose wind is seeded from `simulation.seed`.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        let wind = Wind::from_seed(&config.uav.wind, config.simulation.seed);
        Self::build(config, wind)
    }
}

impl<R: Rng> Scheduler<R> {
    /// Builds a scheduler with an injected random source for the wind.
    pub fn with_rng(config: &Config, rng: R) -> Result<Self, SimError> {
        let wind = Wind::with_rng(&config.uav.wind, rng);
        Self::build(config, wind)
    }

    fn build(config: &Config, wind: Wind<R>) -> Result<Self, SimError> {
        config.validate()?;
        let body = RigidBodyState::new(&config.uav)?;

        Ok(Self {
            config: config.simulation.clone(),
            body,
            wind,
            drag: Drag::new(&config.uav.drag),
            control: Control::new(config.uav.engine_strength()),
            integrator: SemiImplicitEuler::new(),
            ticks: 0,
            state: SchedulerState::Stopped,
        })
    }

    pub fn body(&self) -> &RigidBodyState {
        &self.body
    }

    pub fn wind(&self) -> &Wind<R> {
        &self.wind
    }

    pub fn control_input(&self) -> ControlInput {
        self.control.input()
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.ticks as f64 * self.config.dt()
    }

    /// Advances the simulation by one tick.
    ///
    /// Every generator is sampled against the velocity the body had when the tick began,
    /// so the sampling order has no effect on the result.
    pub fn tick(&mut self, input: Option<ControlInput>) -> TickSnapshot {
        match (input, self.config.input_loss) {
            (Some(input), _) => self.control.set_input(input),
            (None, InputLossPolicy::HoldLast) => {}
            (None, InputLossPolicy::Zero) => self.control.clear(),
        }

        let ctx = ForceContext {
            tick: self.ticks,
            velocity: self.body.velocity,
            cross_sectional_area: self.body.cross_sectional_area(),
            drag_coefficient: self.body.drag_coefficient(),
        };

        let wind = sample(&mut self.wind, &ctx);
        let control = sample(&mut self.control, &ctx);
        let drag = sample(&mut self.drag, &ctx);
        let net = wind + control + drag;

        let tick_rate = self.config.tick_rate as f64;
        let applied = match self.config.force_scaling {
            ForceScaling::PerTick => net / tick_rate,
            ForceScaling::PerSecond => net,
        };
        self.body.apply_force(applied);
        self.body.integrate_step(&self.integrator, self.config.dt());
        self.ticks += 1;

        trace!(
            tick = self.ticks,
            vx = self.body.velocity.x,
            vy = self.body.velocity.y,
            vz = self.body.velocity.z,
            "tick"
        );

        TickSnapshot {
            tick: self.ticks,
            time: self.elapsed_secs(),
            body: self.body.snapshot(),
            forces: ForceBreakdown {
                wind,
                control,
                drag,
                net,
            },
        }
    }

    /// Runs exactly `ticks` ticks. Zero ticks leaves every piece of state untouched.
    pub fn run_ticks(
        &mut self,
        ticks: u64,
        source: &mut impl InputSource,
        observer: &mut impl TickObserver,
    ) -> RunSummary {
        self.run_loop(Some(ticks), None, source, observer)
    }

    /// Runs until `cancel` is raised, or until `simulation.max_ticks` when that is set.
    pub fn run_until_cancelled(
        &mut self,
        cancel: &CancelFlag,
        source: &mut impl InputSource,
        observer: &mut impl TickObserver,
    ) -> RunSummary {
        self.run_loop(self.config.max_ticks, Some(cancel), source, observer)
    }

    fn run_loop(
        &mut self,
        limit: Option<u64>,
        cancel: Option<&CancelFlag>,
        source: &mut impl InputSource,
        observer: &mut impl TickObserver,
    ) -> RunSummary {
        self.state = SchedulerState::Running;
        debug!(
            tick = self.ticks,
            ?limit,
            real_time = self.config.real_time,
            mass = self.body.mass(),
            "run started"
        );

        let tick_duration = Duration::from_secs_f64(self.config.dt());
        let mut ticks_run = 0;
        let mut last = None;

        let reason = loop {
            if cancel.is_some_and(CancelFlag::is_cancelled) {
                break StopReason::Cancelled;
            }
            if limit.is_some_and(|limit| ticks_run >= limit) {
                break StopReason::TickLimit;
            }

            let start_time = self.config.real_time.then(Instant::now);

            let input = source.poll(self.ticks);
            let snapshot = self.tick(input);
            observer.on_tick(&snapshot);
            last = Some(snapshot);
            ticks_run += 1;

            if let Some(start) = start_time {
                let elapsed = start.elapsed();
                if elapsed < tick_duration {
                    std::thread::sleep(tick_duration - elapsed);
                }
            }
        };

        self.state = SchedulerState::Stopped;
        debug!(tick = self.ticks, ticks_run, ?reason, "run stopped");

        RunSummary {
            ticks_run,
            reason,
            last,
        }
    }
}

fn sample(generator: &mut impl ForceGenerator, ctx: &ForceContext) -> Vec3 {
    let force = generator.sample_force(ctx);
    trace!(tick = ctx.tick, generator = generator.name(), ?force, "force sampled");
    force
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{UavConfig, WindConfig};
    use crate::error::ConfigError;
    use crate::forces::AxisIntent;
    use crate::sim::{NoInput, ScriptedInput, TrajectoryRecorder};
    use approx::assert_relative_eq;

    fn still_air() -> Config {
        let mut uav = UavConfig::quadcopter();
        uav.wind = WindConfig::calm();
        Config::new(SimulationConfig::default(), uav)
    }

    fn strafe_right() -> ControlInput {
        ControlInput::new(AxisIntent::Positive, AxisIntent::Neutral, AxisIntent::Neutral)
    }

    #[test]
    fn test_zero_ticks_is_identity() {
        let mut sched = Scheduler::new(&Config::default()).unwrap();
        let before = sched.body().clone();

        let summary = sched.run_ticks(0, &mut NoInput, &mut ());

        assert_eq!(summary.ticks_run, 0);
        assert_eq!(summary.last, None);
        assert_eq!(sched.body(), &before);
        assert_eq!(sched.wind().accumulated(), Vec3::zero());
        assert_eq!(sched.tick_count(), 0);
    }

    #[test]
    fn test_stationary_without_forces() {
        let mut sched = Scheduler::new(&still_air()).unwrap();
        sched.run_ticks(600, &mut NoInput, &mut ());

        assert_eq!(sched.body().velocity, Vec3::zero());
        assert_eq!(sched.body().position, Vec3::zero());
    }

    #[test]
    fn test_drag_uses_velocity_at_tick_start() {
        let mut sched = Scheduler::new(&still_air()).unwrap();
        sched.tick(Some(strafe_right()));
        let v0 = sched.body().velocity;

        let snapshot = sched.tick(Some(ControlInput::neutral()));
        let expected = Drag::default().force(v0, 0.1, 1.2);
        assert_eq!(snapshot.forces.drag, expected);
        assert!(snapshot.forces.drag.x < 0.0);
    }

    #[test]
    fn test_per_tick_scaling_one_second_of_thrust() {
        let config = Config::new(SimulationConfig::default(), {
            let mut uav = UavConfig::drag_free();
            uav.wind = WindConfig::calm();
            uav
        });
        let mut sched = Scheduler::new(&config).unwrap();
        sched.run_ticks(60, &mut ScriptedInput::hold(strafe_right(), 60), &mut ());

        // a = 1000 / 60 per tick, dt = 1 / 60, over 60 ticks.
        assert_relative_eq!(sched.body().velocity.x, 1000.0 / 60.0, epsilon = 1e-9);
        assert_eq!(sched.body().velocity.y, 0.0);
    }

    #[test]
    fn test_per_second_scaling() {
        let mut uav = UavConfig::drag_free();
        uav.wind = WindConfig::calm();
        let sim = SimulationConfig {
            force_scaling: ForceScaling::PerSecond,
            ..SimulationConfig::default()
        };
        let mut sched = Scheduler::new(&Config::new(sim, uav)).unwrap();
        sched.run_ticks(60, &mut ScriptedInput::hold(strafe_right(), 60), &mut ());

        assert_relative_eq!(sched.body().velocity.x, 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_input_loss_policies() {
        let mut config = still_air();
        config.uav.drag.enabled = false;

        let mut hold = Scheduler::new(&config).unwrap();
        hold.run_ticks(10, &mut ScriptedInput::hold(strafe_right(), 1), &mut ());
        assert_eq!(hold.control_input(), strafe_right());

        config.simulation.input_loss = InputLossPolicy::Zero;
        let mut zero = Scheduler::new(&config).unwrap();
        zero.run_ticks(10, &mut ScriptedInput::hold(strafe_right(), 1), &mut ());
        assert_eq!(zero.control_input(), ControlInput::neutral());

        assert!(hold.body().velocity.x > zero.body().velocity.x);
    }

    #[test]
    fn test_cancel_before_start() {
        let mut sched = Scheduler::new(&Config::default()).unwrap();
        let cancel = CancelFlag::new();
        cancel.cancel();

        let summary = sched.run_until_cancelled(&cancel, &mut NoInput, &mut ());
        assert_eq!(summary.reason, StopReason::Cancelled);
        assert_eq!(summary.ticks_run, 0);
        assert_eq!(sched.state(), SchedulerState::Stopped);
    }

    #[test]
    fn test_cancel_from_input_source() {
        let mut sched = Scheduler::new(&Config::default()).unwrap();
        let cancel = CancelFlag::new();
        let trigger = cancel.clone();
        let mut source = move |tick: u64| -> Option<ControlInput> {
            if tick == 24 {
                trigger.cancel();
            }
            None
        };

        let summary = sched.run_until_cancelled(&cancel, &mut source, &mut ());
        assert_eq!(summary.reason, StopReason::Cancelled);
        assert_eq!(summary.ticks_run, 25);
        assert_eq!(sched.tick_count(), 25);
    }

    #[test]
    fn test_max_ticks_bounds_cancellable_run() {
        let config = Config::new(SimulationConfig::headless(90), UavConfig::quadcopter());
        let mut sched = Scheduler::new(&config).unwrap();
        let mut recorder = TrajectoryRecorder::new();

        let summary = sched.run_until_cancelled(&CancelFlag::new(), &mut NoInput, &mut recorder);
        assert_eq!(summary.reason, StopReason::TickLimit);
        assert_eq!(recorder.frames.len(), 90);
        assert_eq!(summary.last.as_ref(), recorder.last());
        assert_relative_eq!(sched.elapsed_secs(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_real_time_paces_ticks() {
        let sim = SimulationConfig {
            tick_rate: 60,
            real_time: true,
            ..SimulationConfig::default()
        };
        let mut sched = Scheduler::new(&Config::new(sim, UavConfig::quadcopter())).unwrap();

        let started = Instant::now();
        let summary = sched.run_ticks(6, &mut NoInput, &mut ());
        let elapsed = started.elapsed();

        assert_eq!(summary.ticks_run, 6);
        // Six paced ticks take at least five full tick periods.
        assert!(elapsed >= Duration::from_secs_f64(5.0 / 60.0), "elapsed {elapsed:?}");
    }

    #[test]
    fn test_headless_never_sleeps() {
        let mut sched = Scheduler::new(&Config::default()).unwrap();

        let started = Instant::now();
        sched.run_ticks(600, &mut NoInput, &mut ());

        // 600 paced ticks would take ten seconds.
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(sched.tick_count(), 600);
    }

    #[test]
    fn test_rejects_overflowing_wind() {
        let mut config = Config::default();
        config.uav.wind = WindConfig {
            strength: 1e308,
            rate_of_change: 10.0,
            max_magnitude: 1.0,
        };
        assert!(matches!(
            Scheduler::new(&config),
            Err(SimError::Config(ConfigError::InvalidParameter { name: "wind", .. }))
        ));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = Config::default();
        config.simulation.tick_rate = 0;
        assert!(matches!(Scheduler::new(&config), Err(SimError::Config(_))));
    }
}
