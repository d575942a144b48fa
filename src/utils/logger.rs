#[cfg(feature = "cli")]
use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
#[cfg(feature = "cli")]
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Success,
    Error,
    Info,
    Warning,
    Debug,
}

/// Writes status lines to stderr so stdout only carries the version report.
#[derive(Debug, Clone)]
pub struct Logger {
    verbose: bool,
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Logger { verbose }
    }

    /// Info and Debug lines are only shown in verbose mode.
    pub fn enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Info | LogLevel::Debug => self.verbose,
            _ => true,
        }
    }

    pub fn log_message(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        eprintln!(
            "{} {} {}",
            self.signature(),
            self.format_status(level),
            message
        );
    }

    pub fn log_message_with_trace(&self, level: LogLevel, message: &str, trace: Vec<&str>) {
        if !self.enabled(level) {
            return;
        }
        self.log_message(level, message);
        for t in trace {
            eprintln!("     ↳ {}", t);
        }
    }

    #[cfg(feature = "cli")]
    fn signature(&self) -> String {
        let mut s = String::new();

        let _ = write!(&mut s, "{}", SetForegroundColor(Color::Grey));
        s.push('[');
        let _ = write!(
            &mut s,
            "{}",
            SetForegroundColor(Color::Rgb {
                r: 29,
                g: 211,
                b: 176,
            })
        );
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Bold));
        s.push_str("versionbump");
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Reset));
        let _ = write!(&mut s, "{}", SetForegroundColor(Color::Grey));
        s.push(']');
        let _ = write!(&mut s, "{}", ResetColor);

        s
    }

    #[cfg(not(feature = "cli"))]
    fn signature(&self) -> String {
        "[versionbump]".to_string()
    }

    #[cfg(feature = "cli")]
    fn format_status(&self, level: LogLevel) -> String {
        let mut s = String::new();

        let color = match level {
            LogLevel::Success => Color::Rgb {
                r: 76,
                g: 175,
                b: 80,
            },
            LogLevel::Error => Color::Rgb {
                r: 244,
                g: 67,
                b: 54,
            },
            LogLevel::Info => Color::Rgb {
                r: 33,
                g: 150,
                b: 243,
            },
            LogLevel::Warning => Color::Rgb {
                r: 255,
                g: 152,
                b: 0,
            },
            LogLevel::Debug => Color::Rgb {
                r: 103,
                g: 58,
                b: 183,
            },
        };

        s.push('[');
        let _ = write!(&mut s, "{}", SetForegroundColor(color));
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Bold));
        s.push_str(status_label(level));
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Reset));
        s.push(']');
        let _ = write!(&mut s, "{}", ResetColor);

        s
    }

    #[cfg(not(feature = "cli"))]
    fn format_status(&self, level: LogLevel) -> String {
        format!("[{}]", status_label(level))
    }
}

fn status_label(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Success => "SUCCESS",
        LogLevel::Error => "ERROR",
        LogLevel::Info => "INFO",
        LogLevel::Warning => "WARNING",
        LogLevel::Debug => "DEBUG",
    }
}
