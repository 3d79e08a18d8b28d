// src/engine/banner.rs

//! Header and footer text printed around the doers' output.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::WatchMethod;

/// ANSI sequence that clears the terminal and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

/// `Watching 3 files for changes using the Hash method...`
pub fn build_header(file_count: usize, method: WatchMethod) -> String {
    format!(
        "Watching {file_count} file{plural} for changes using the {method} method...\n\n",
        plural = if file_count == 1 { "" } else { "s" },
    )
}

/// Summary of what triggered the doers and how long they took.
pub fn build_footer<S: AsRef<str>>(
    trigger_time: SystemTime,
    trigger_causes: &[S],
    doer_run_time: Duration,
) -> String {
    format!(
        "\n\nDoers triggered at {} from: {}\nRan doers in {:.2} seconds.",
        format_clock(trigger_time),
        join_causes(trigger_causes),
        doer_run_time.as_secs_f64(),
    )
}

/// `a`, `a and b`, `a, b and c`.
pub fn join_causes<S: AsRef<str>>(causes: &[S]) -> String {
    match causes {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let init: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", init.join(", "), last.as_ref())
        }
    }
}

/// Wall-clock `HH:MM:SS` (UTC).
pub fn format_clock(time: SystemTime) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let of_day = secs % 86_400;
    format!(
        "{:02}:{:02}:{:02}",
        of_day / 3_600,
        (of_day % 3_600) / 60,
        of_day % 60
    )
}
