//! Host demo for uptime-tracker.
//!
//! Rebases the process-wide clock and prints the uptime at a fixed interval.
//! Start it just before a `millis()` wrap to watch the rollover being absorbed:
//!
//! ```text
//! uptime-demo [scenario.toml]
//! ```
//!
//! The scenario file is optional; see `DemoConfig` for its keys.

use std::process;
use std::thread;
use std::time::Duration;

use uptime_tracker::{DemoConfig, UptimeError, global};

fn load_config() -> Result<DemoConfig, UptimeError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).map_err(|e| {
                UptimeError::invalid_config(&format!("cannot read {}: {}", path, e))
            })?;
            DemoConfig::from_toml_str(&text)
        }
        None => Ok(DemoConfig::default()),
    }
}

fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let tracker = global::tracker();
    tracker.reset(config.start_millis);

    println!(
        "uptime-demo {}: start at raw tick {}, {} polls every {} ms",
        uptime_tracker::VERSION,
        config.start_millis,
        config.polls,
        config.poll_interval_ms
    );

    for poll in 0..config.polls {
        if poll > 0 {
            thread::sleep(Duration::from_millis(config.poll_interval_ms));
        }

        let seconds = tracker.update();
        let counters = tracker.snapshot();
        println!(
            "uptime {:>15}  seconds {:>10}  periods {}",
            uptime_tracker::format(seconds).as_str(),
            seconds,
            counters.periods
        );
    }
}
