use std::env;
use std::process::ExitCode;

use uavsim::config::{Config, SimulationConfig, UavConfig};
use uavsim::forces::{AxisIntent, ControlInput};
use uavsim::sim::{CancelFlag, ScriptedInput, TickObserver, TickSnapshot};
use uavsim::{Scheduler, SimError};
use thiserror::Error;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

/// Prints the body state once per simulated second.
struct ConsoleStatus {
    every: u64,
}

impl TickObserver for ConsoleStatus {
    fn on_tick(&mut self, snapshot: &TickSnapshot) {
        if snapshot.tick % self.every != 0 {
            return;
        }
        let v = snapshot.body.velocity;
        let p = snapshot.body.position;
        let w = snapshot.forces.wind;
        tracing::info!(
            t = format_args!("{:6.2}s", snapshot.time),
            vel = format_args!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z),
            pos = format_args!("({:.3}, {:.3}, {:.3})", p.x, p.y, p.z),
            wind = format_args!("({:.2}, {:.2}, {:.2})", w.x, w.y, w.z),
            "status"
        );
    }
}

/// Strafe right, climb, fly forward, then let go of the controls.
fn demo_script(tick_rate: u32) -> ScriptedInput {
    let second = tick_rate as u64;
    let input = |strafe, vertical, forward| ControlInput::new(strafe, vertical, forward);
    ScriptedInput::new([
        (second, input(AxisIntent::Positive, AxisIntent::Neutral, AxisIntent::Neutral)),
        (second, input(AxisIntent::Neutral, AxisIntent::Positive, AxisIntent::Neutral)),
        (second * 2, input(AxisIntent::Neutral, AxisIntent::Neutral, AxisIntent::Positive)),
        (second, input(AxisIntent::Negative, AxisIntent::Negative, AxisIntent::Negative)),
        (second, ControlInput::neutral()),
    ])
}

#[derive(Error, Debug, PartialEq)]
enum ArgsError {
    #[error("unknown flag '{0}'")]
    UnknownFlag(String),

    #[error("'--ticks' needs a value")]
    MissingTicks,

    #[error("invalid tick count '{0}'")]
    InvalidTicks(String),

    #[error("unexpected argument '{0}' (config path already given)")]
    ExtraArgument(String),
}

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    config_path: Option<String>,
    headless: bool,
    ticks: Option<u64>,
}

impl CliArgs {
    fn parse(args: &[String]) -> Result<Self, ArgsError> {
        let mut cli = CliArgs::default();

        let mut rest = args.iter().skip(1);
        while let Some(arg) = rest.next() {
            match arg.as_str() {
                "--headless" => cli.headless = true,
                "--ticks" => {
                    let value = rest.next().ok_or(ArgsError::MissingTicks)?;
                    let ticks = value
                        .parse::<u64>()
                        .map_err(|_| ArgsError::InvalidTicks(value.clone()))?;
                    cli.ticks = Some(ticks);
                }
                flag if flag.starts_with("--") => {
                    return Err(ArgsError::UnknownFlag(flag.to_string()))
                }
                path if cli.config_path.is_none() => cli.config_path = Some(path.to_string()),
                extra => return Err(ArgsError::ExtraArgument(extra.to_string())),
            }
        }
        Ok(cli)
    }
}

fn load_config(cli: &CliArgs) -> Result<Config, SimError> {
    let mut config = match &cli.config_path {
        Some(path) => Config::load(path)?,
        None => Config::new(SimulationConfig::interactive(), UavConfig::quadcopter()),
    };
    if cli.headless {
        config.simulation.real_time = false;
    }
    // The demo script lasts six seconds; stop there unless told otherwise.
    config.simulation.max_ticks = cli
        .ticks
        .or(config.simulation.max_ticks)
        .or(Some(config.simulation.tick_rate as u64 * 6));
    Ok(config)
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let cli = match CliArgs::parse(&args) {
        Ok(cli) => cli,
        Err(e) => {
            tracing::error!(error = %e, "usage: uavsim [CONFIG.yaml] [--headless] [--ticks N]");
            return ExitCode::FAILURE;
        }
    };
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        uav = %config.uav.name,
        tick_rate = config.simulation.tick_rate,
        real_time = config.simulation.real_time,
        "simulation starting"
    );

    let mut scheduler = match Scheduler::new(&config) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut input = demo_script(config.simulation.tick_rate);
    let mut status = ConsoleStatus {
        every: config.simulation.tick_rate as u64,
    };
    let summary = scheduler.run_until_cancelled(&CancelFlag::new(), &mut input, &mut status);

    let body = scheduler.body();
    tracing::info!(
        ticks = summary.ticks_run,
        reason = ?summary.reason,
        elapsed = format_args!("{:.2}s", scheduler.elapsed_secs()),
        "simulation complete"
    );
    tracing::info!(
        position = format_args!("({:.3}, {:.3}, {:.3})", body.position.x, body.position.y, body.position.z),
        velocity = format_args!("({:.3}, {:.3}, {:.3})", body.velocity.x, body.velocity.y, body.velocity.z),
        "final state"
    );

    ExitCode::SUCCESS
}
