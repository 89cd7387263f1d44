//! Colored label/value logging for client-side flows.

use std::fmt::Display;

use colored::{
    Color,
    Colorize,
};

#[derive(strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn color(&self) -> Color {
        match self {
            Self::Info => Color::TrueColor { r: 0, g: 135, b: 255 },
            Self::Success => Color::TrueColor { r: 95, g: 215, b: 135 },
            Self::Warning => Color::TrueColor { r: 215, g: 135, b: 0 },
            Self::Error => Color::TrueColor { r: 255, g: 0, b: 45 },
        }
    }
}

fn log(level: Level, label: impl Display, msg: impl Display) {
    println!(
        "[{}] {} {}",
        level.to_string().color(level.color()),
        label.to_string().bold(),
        msg.to_string().bright_black()
    );
}

pub fn log_info(label: impl Display, msg: impl Display) {
    log(Level::Info, label, msg)
}

pub fn log_success(label: impl Display, msg: impl Display) {
    log(Level::Success, label, msg)
}

pub fn log_warning(label: impl Display, msg: impl Display) {
    log(Level::Warning, label, msg)
}

pub fn log_error(label: impl Display, msg: impl Display) {
    log(Level::Error, label, msg)
}
