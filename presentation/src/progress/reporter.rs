//! Toasts and request spinners for the console

use colored::Colorize;
use estatedesk_application::Notifier;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Shows a spinner while a request is in flight and prints one toast per outcome
pub struct ConsoleNotifier {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn clear_spinner(&self) {
        let taken = self.spinner.lock().ok().and_then(|mut spinner| spinner.take());
        if let Some(pb) = taken {
            pb.finish_and_clear();
        }
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ConsoleNotifier {
    fn on_success(&self, message: &str) {
        self.clear_spinner();
        eprintln!("{} {}", "v".green().bold(), message);
    }

    fn on_error(&self, message: &str) {
        self.clear_spinner();
        eprintln!("{} {}", "x".red().bold(), message);
    }

    fn on_request_start(&self, label: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(label.to_string());
        pb.set_message("waiting for backend...");
        pb.enable_steady_tick(Duration::from_millis(100));

        let previous = match self.spinner.lock() {
            Ok(mut spinner) => spinner.replace(pb),
            Err(_) => Some(pb),
        };
        if let Some(previous) = previous {
            previous.finish_and_clear();
        }
    }

    fn on_request_end(&self) {
        self.clear_spinner();
    }

    fn on_empty(&self, what: &str) {
        eprintln!("{}", format!("No {} to show", what).dimmed().italic());
    }
}

/// Simple text-based toasts (no spinner)
pub struct SimpleNotifier;

impl Notifier for SimpleNotifier {
    fn on_success(&self, message: &str) {
        eprintln!("{} {}", "v".green(), message);
    }

    fn on_error(&self, message: &str) {
        eprintln!("{} {}", "x".red(), message);
    }

    fn on_empty(&self, what: &str) {
        eprintln!("No {} to show", what);
    }
}
