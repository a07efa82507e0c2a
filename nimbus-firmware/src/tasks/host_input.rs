//! Host lifecycle input
//!
//! Stands in for the watch-face framework: each stdin line becomes one
//! lifecycle event.
//!
//! ```text
//! visible on|off     ambient on|off     lowbit on|off
//! round on|off       zone +02:00        tick        quit
//! ```

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use chrono::FixedOffset;
use log::{info, warn};
use thiserror::Error;

use nimbus_core::FaceEvent;

use crate::channels::FACE_EVENTS;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("expected on|off after {0}")]
    ExpectedSwitch(&'static str),
    #[error("invalid offset {0:?}, expected e.g. +02:00")]
    InvalidOffset(String),
}

fn switch(command: &'static str, arg: Option<&str>) -> Result<bool, CommandError> {
    match arg {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        _ => Err(CommandError::ExpectedSwitch(command)),
    }
}

/// Parse one input line; `Ok(None)` for a blank line
pub fn parse_command(line: &str) -> Result<Option<FaceEvent>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let event = match command {
        "visible" => FaceEvent::VisibilityChanged(switch("visible", arg)?),
        "ambient" => FaceEvent::AmbientModeChanged(switch("ambient", arg)?),
        "lowbit" => FaceEvent::PropertiesChanged {
            low_bit_ambient: switch("lowbit", arg)?,
        },
        "round" => FaceEvent::InsetsApplied {
            round: switch("round", arg)?,
        },
        "zone" => {
            let text = arg.unwrap_or_default();
            let offset = text
                .parse::<FixedOffset>()
                .map_err(|_| CommandError::InvalidOffset(text.to_string()))?;
            FaceEvent::TimeZoneChanged(offset)
        }
        "tick" => FaceEvent::TimeTick,
        "quit" => FaceEvent::Destroy,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(event))
}

/// Read commands from stdin on a dedicated thread
pub fn spawn_host_input() -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("host-input".into())
        .spawn(|| {
            info!("Host input ready");
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("stdin closed: {}", e);
                        return;
                    }
                };
                match parse_command(&line) {
                    Ok(Some(event)) => {
                        embassy_futures::block_on(FACE_EVENTS.send(event));
                        if event == FaceEvent::Destroy {
                            return;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => warn!("{}", e),
                }
            }
            info!("Host input finished");
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switches() {
        assert_eq!(
            parse_command("visible on"),
            Ok(Some(FaceEvent::VisibilityChanged(true)))
        );
        assert_eq!(
            parse_command("  ambient   off "),
            Ok(Some(FaceEvent::AmbientModeChanged(false)))
        );
        assert_eq!(
            parse_command("lowbit on"),
            Ok(Some(FaceEvent::PropertiesChanged {
                low_bit_ambient: true
            }))
        );
        assert_eq!(
            parse_command("round on"),
            Ok(Some(FaceEvent::InsetsApplied { round: true }))
        );
    }

    #[test]
    fn test_bare_commands() {
        assert_eq!(parse_command("tick"), Ok(Some(FaceEvent::TimeTick)));
        assert_eq!(parse_command("quit"), Ok(Some(FaceEvent::Destroy)));
        assert_eq!(parse_command(""), Ok(None));
    }

    #[test]
    fn test_zone() {
        assert_eq!(
            parse_command("zone -04:00"),
            Ok(Some(FaceEvent::TimeZoneChanged(
                FixedOffset::west_opt(4 * 3600).unwrap()
            )))
        );
        assert_eq!(
            parse_command("zone later"),
            Err(CommandError::InvalidOffset("later".into()))
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_command("visible maybe"),
            Err(CommandError::ExpectedSwitch("visible"))
        );
        assert_eq!(
            parse_command("ambient"),
            Err(CommandError::ExpectedSwitch("ambient"))
        );
        assert_eq!(
            parse_command("dance"),
            Err(CommandError::Unknown("dance".into()))
        );
    }
}
