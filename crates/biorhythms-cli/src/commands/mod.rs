pub mod birth;
pub mod chart;
pub mod config;
pub mod today;
pub mod widget;

use std::io::IsTerminal;

use biorhythms_core::{parse_date, Rgb, Settings};
use chrono::{Local, NaiveDate};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// `--birth` when given, otherwise the stored birth date.
pub fn birth_date(arg: Option<&str>, settings: &Settings) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match arg {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(settings.require_birth_date()?),
    }
}

/// `--date` when given, otherwise the local calendar day.
pub fn reference_date(arg: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match arg {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(Local::now().date_naive()),
    }
}

/// Wrap `text` in a 24-bit color escape when stdout is a terminal.
pub fn paint(text: &str, color: Rgb) -> String {
    if std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none() {
        format!("{}{text}\x1b[0m", color.ansi_fg())
    } else {
        text.to_string()
    }
}
