use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let bar = ProgressBar::new_spinner();

    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg} ({elapsed})") {
        bar.set_style(style);
    }

    bar.set_message(message.into());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
