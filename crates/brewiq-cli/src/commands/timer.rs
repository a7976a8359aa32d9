use std::io::{self, Write};
use std::time::Duration;

use brewiq_core::timer::{TimerEngine, TimerEvent};
use brewiq_core::BrewMethod;

use crate::commands::common::format_duration;
use crate::error::CliError;

const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

/// Countdown length from `--seconds`, `--method`, or the default method.
pub fn resolve_brew_time(
    method: Option<BrewMethod>,
    seconds: Option<u64>,
) -> Result<Duration, CliError> {
    let total = match (seconds, method) {
        (Some(seconds), _) => Duration::from_secs(seconds),
        (None, Some(method)) => method.default_brew_time(),
        (None, None) => BrewMethod::FrenchPress.default_brew_time(),
    };
    if total.is_zero() {
        return Err(CliError::EmptyTimer);
    }
    Ok(total)
}

pub async fn run_timer(method: Option<BrewMethod>, seconds: Option<u64>) -> Result<(), CliError> {
    let total = resolve_brew_time(method, seconds)?;
    let (mut timer, mut events) = TimerEngine::new(total);
    timer.start();
    tracing::debug!("Starting brew timer for {}", format_duration(total));

    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);
    let mut stdout = io::stdout();

    loop {
        tokio::select! {
            event = events.recv() => {
                if matches!(event, Some(TimerEvent::Completed)) {
                    writeln!(stdout, "\r{}  Brew complete!", timer.time_string())?;
                    stdout.flush()?;
                }
                break;
            }
            _ = redraw.tick() => {
                write!(
                    stdout,
                    "\r{} / {}  {:>3.0}%",
                    timer.time_string(),
                    format_duration(timer.total()),
                    timer.progress() * 100.0,
                )?;
                stdout.flush()?;
            }
            result = tokio::signal::ctrl_c() => {
                result?;
                timer.pause();
                writeln!(stdout, "\rStopped with {} left", timer.time_string())?;
                break;
            }
        }
    }

    Ok(())
}
