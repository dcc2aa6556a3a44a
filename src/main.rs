// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use geofix::config::{self, Config};
use geofix::diagnostics::{BufferCapacity, DiagnosticsCollector};
use geofix::domain::error::PositionErrorCode;
use geofix::domain::location::Stage;
use geofix::error::{Error, Result};
use geofix::infrastructure::SimulatedPlatform;
use geofix::ui::location::{AcquisitionState, LocationAcquisition};

const USAGE: &str = "\
Usage: geofix [OPTIONS]

Options:
  --watch            Follow continuous updates instead of a single fix
  --fail CODE        Simulate a platform failure (1 denied, 2 unavailable, 3 timeout)
  --latency-ms N     Simulated platform latency [default: 300]
  --fixes N          Watch updates to show before stopping [default: 3]
  --config PATH      Read settings from PATH instead of the user config
  -h, --help         Print this help";

const DEMO_POSITION: (f64, f64, f64) = (48.8566, 2.3522, 12.0);
const WATCH_INTERVAL: Duration = Duration::from_millis(700);
const WATCH_STEP_DEGREES: f64 = 0.0004;

struct Args {
    watch: bool,
    fail: Option<u16>,
    latency_ms: u64,
    fixes: usize,
    config: Option<PathBuf>,
}

fn parse_args() -> std::result::Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let parsed = Args {
        watch: args.contains("--watch"),
        fail: args.opt_value_from_str("--fail")?,
        latency_ms: args.opt_value_from_str("--latency-ms")?.unwrap_or(300),
        fixes: args.opt_value_from_str("--fixes")?.unwrap_or(3),
        config: args.opt_value_from_str("--config")?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("ignoring unexpected arguments: {rest:?}");
    }
    Ok(Some(parsed))
}

fn load_config(path: Option<&PathBuf>) -> Config {
    let loaded = match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    loaded.unwrap_or_else(|err| {
        log::warn!("using default settings: {err}");
        Config::default()
    })
}

fn print_state(state: &AcquisitionState) {
    let mut line = format!("[{:<10}]", state.stage.as_str());
    if state.loading {
        line.push_str(" loading");
    }
    if state.is_watching {
        line.push_str(" watching");
    }
    if let Some(location) = state.location {
        line.push_str(&format!(
            " {} ±{:.0} m",
            location.coordinates().format(),
            location.accuracy
        ));
    }
    if let Some(error) = &state.error {
        line.push_str(&format!(" error: {error}"));
    }
    println!("{line}");
}

async fn run(args: Args, config: Config) -> Result<()> {
    let (latitude, longitude, accuracy) = DEMO_POSITION;
    let mut platform = SimulatedPlatform::at(latitude, longitude, accuracy)
        .with_latency(Duration::from_millis(args.latency_ms))
        .with_interval(WATCH_INTERVAL)
        .with_step(WATCH_STEP_DEGREES, WATCH_STEP_DEGREES);
    if let Some(code) = args.fail {
        platform = platform.failing_with(PositionErrorCode::from_code(code));
    }

    let mut capacity = config.diagnostics.capacity();
    if args.watch {
        capacity = capacity.max(BufferCapacity::for_watch_session(args.fixes));
    }
    let mut collector = DiagnosticsCollector::new(capacity);
    let acquisition = LocationAcquisition::new(platform, config.acquisition.settings())?;
    acquisition.set_diagnostics(collector.handle());

    let mut updates = acquisition.subscribe();
    print_state(&acquisition.state());

    if args.watch {
        acquisition.start_watching();
    } else {
        acquisition.request_once();
    }

    let mut fixes_seen = 0;
    let mut last_location = None;
    while updates.changed().await.is_ok() {
        let state = updates.borrow_and_update().clone();
        print_state(&state);
        collector.process_pending();

        match state.stage {
            Stage::Error | Stage::Idle => break,
            Stage::Success if args.watch && state.location != last_location => {
                last_location = state.location;
                fixes_seen += 1;
                if fixes_seen >= args.fixes {
                    acquisition.stop_watching();
                }
            }
            _ => {}
        }
    }

    acquisition.dispose();
    collector.process_pending();
    match collector.export_json() {
        Ok(json) => log::info!("diagnostics: {json}"),
        Err(err) => log::warn!("could not export diagnostics: {err}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    let config = load_config(args.config.as_ref());

    let outcome = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(Error::from)
        .and_then(|runtime| runtime.block_on(run(args, config)));

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
