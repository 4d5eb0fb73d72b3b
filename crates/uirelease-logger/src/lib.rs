//! Logging for the ui-release pipeline
//!
//! Library crates emit `tracing` events. This crate installs the subscriber
//! (stderr + optional log file) and provides the colored one-line messages the
//! CLI shows to the operator.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Environment variable holding an `EnvFilter` directive for the console
pub const LOG_ENV_VAR: &str = "UIREL_LOG";

/// Target used for operator messages; recorded in the log file, never echoed
/// twice on the console
pub const OPERATOR_TARGET: &str = "uirelease::operator";

const FILE_DIRECTIVES: &str = "info,uirelease=debug,uirelease_manifest=debug,uirelease_themes=debug,uirelease_config=debug";

static VERBOSITY: Mutex<u8> = Mutex::new(0);
static LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
static SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Get the current verbosity level
pub fn get_verbosity() -> u8 {
    VERBOSITY.lock().ok().map(|v| *v).unwrap_or(0)
}

/// Console directive for a verbosity level
/// 0 = warn, 1 = info (-v), 2 = debug (-vv), 3+ = trace
pub fn verbosity_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// The log file, when given, is truncated on each run.
pub fn init(verbosity: u8, log_file: Option<&Path>) -> Result<(), String> {
    if let Ok(mut v) = VERBOSITY.lock() {
        *v = verbosity;
    }

    let console_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_directive(verbosity)))
        .add_directive(
            format!("{OPERATOR_TARGET}=off")
                .parse()
                .map_err(|e| format!("Invalid log directive: {e}"))?,
        );
    let console = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create log directory: {e}"))?;
            }
            let file = File::create(path)
                .map_err(|e| format!("Failed to create log file {}: {e}", path.display()))?;
            if let Ok(mut guard) = LOG_FILE.lock() {
                *guard = Some(path.to_path_buf());
            }
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(EnvFilter::new(FILE_DIRECTIVES)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| format!("Failed to install logger: {e}"))
}

/// Get the log file path for display
pub fn get_log_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|guard| guard.clone())
}

/// Print the log file path to the user
pub fn show_log_path() {
    if let Some(path) = get_log_path() {
        eprintln!("Log file: {}", path.display());
    }
}

/// Log a warning message
pub fn warn(message: &str) {
    tracing::warn!(target: OPERATOR_TARGET, "{message}");
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

/// Log an error message
pub fn error(message: &str) {
    tracing::error!(target: OPERATOR_TARGET, "{message}");
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Log a success message
pub fn success(message: &str) {
    tracing::info!(target: OPERATOR_TARGET, "SUCCESS {message}");
    eprintln!("{} {}", "\u{2714}".green().bold(), message);
}

/// Log a step message, shown on the console only with -vv
pub fn step(message: &str) {
    tracing::info!(target: OPERATOR_TARGET, "STEP {message}");
    if get_verbosity() >= 2 {
        eprintln!("{} {}", "step:".cyan(), message);
    }
}

/// Start a spinner with the given message (only if not verbose)
pub fn spinner_start(message: &str) {
    if get_verbosity() > 0 {
        return;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.cyan} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message(message.to_string());

    if let Ok(mut guard) = SPINNER.lock() {
        *guard = Some(spinner);
    }
}

/// Complete the spinner with a success message
pub fn spinner_success(message: &str) {
    spinner_stop();
    success(message);
}

/// Stop the spinner with an error message
pub fn spinner_error(message: &str) {
    spinner_stop();
    tracing::error!(target: OPERATOR_TARGET, "{message}");
    eprintln!("  {} {}", "✗".red().bold(), message);
}

/// Stop the spinner without any message
pub fn spinner_stop() {
    if let Ok(mut guard) = SPINNER.lock() {
        if let Some(spinner) = guard.take() {
            spinner.finish_and_clear();
        }
    }
}
