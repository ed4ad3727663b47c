// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use jiff::tz::TimeZone;
use serde::de;

use crate::time::zone::{self, parse_utc_offset};
use crate::{TimeError, WeekDay};

/// The name of the jana application.
pub const APP_NAME: &str = "jana";

/// Configuration for the jana application.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Zone that instances are shown in, the system zone if unset.
    #[serde(default)]
    pub timezone: Option<ConfigTimeZone>,

    /// First day of the week.
    #[serde(default)]
    pub week_start: WeekDay,

    /// Path to the default calendar file.
    #[serde(default)]
    pub calendar_path: Option<PathBuf>,
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        if let Some(path) = &self.calendar_path {
            self.calendar_path = Some(
                expand_path(path).map_err(|e| format!("Failed to expand calendar path: {e}"))?,
            );
        }
        Ok(())
    }

    /// The configured time zone, or the system one.
    pub fn time_zone(&self) -> TimeZone {
        match &self.timezone {
            Some(tz) => tz.time_zone().clone(),
            None => zone::local_timezone(),
        }
    }
}

/// A time zone given by IANA name, e.g. `Europe/Berlin`, or as a fixed UTC
/// offset, e.g. `+05:30`.
#[derive(Debug, Clone)]
pub struct ConfigTimeZone(TimeZone);

impl ConfigTimeZone {
    pub fn time_zone(&self) -> &TimeZone {
        &self.0
    }
}

impl FromStr for ConfigTimeZone {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with(['+', '-']) || s == "Z" {
            let seconds = parse_utc_offset(s).ok_or_else(|| TimeError::Parse(s.to_string()))?;
            return Ok(Self(TimeZone::fixed(zone::offset_from_seconds(seconds)?)));
        }
        zone::lookup(s).map(Self)
    }
}

impl<'de> serde::Deserialize<'de> for ConfigTimeZone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TimeZoneVisitor;

        impl de::Visitor<'_> for TimeZoneVisitor {
            type Value = ConfigTimeZone;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(r#"a time zone like "Europe/Berlin", "UTC" or "+05:30""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.parse().map_err(|e: TimeError| de::Error::custom(e))
            }
        }

        deserializer.deserialize_str(TimeZoneVisitor)
    }
}

/// Handle tilde (~) and environment variables in the path
pub fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

/// User-specific configuration directory, e.g. `$XDG_CONFIG_HOME`.
pub fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or("User-specific config directory not found".into())
}
