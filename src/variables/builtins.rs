//! Built-in variables available to every template.
//!
//! The built-in set is produced fresh for each creation request and captures
//! the wall clock exactly once, so `$DATE$`, `$TIME$` and `$TIMESTAMP$` always
//! agree with each other within one template.
//!
//! | Name        | Example                                  |
//! |-------------|------------------------------------------|
//! | `DATE`      | `2025-10-06`                             |
//! | `TIME`      | `14:03:59`                               |
//! | `DATETIME`  | `2025-10-06 14:03:59`                    |
//! | `TIMESTAMP` | `1759759439000`                          |
//! | `YEAR`      | `2025`                                   |
//! | `MONTH`     | `10`                                     |
//! | `DAY`       | `06`                                     |
//! | `USER`      | `jane`                                   |
//! | `HOME`      | `/home/jane`                             |
//! | `PLATFORM`  | `linux`, `darwin`, `win32`               |
//! | `RANDOM`    | `k3x9qa`                                 |
//! | `UUID`      | `1b4e28ba-2fa1-4d2c-883f-0016d3cca427`   |

use chrono::{DateTime, Local, TimeZone};
use uuid::Uuid;

use super::VariableMap;

/// Names of all built-in variables, in display order.
pub const BUILTIN_NAMES: &[&str] = &[
    "DATE",
    "TIME",
    "DATETIME",
    "TIMESTAMP",
    "YEAR",
    "MONTH",
    "DAY",
    "USER",
    "HOME",
    "PLATFORM",
    "RANDOM",
    "UUID",
];

/// Length of the `$RANDOM$` token.
const RANDOM_LEN: usize = 6;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Produce the built-in variables using the current local time.
#[must_use]
pub fn builtins() -> VariableMap {
    builtins_at(&Local::now())
}

/// Produce the built-in variables for a fixed point in time.
///
/// Everything except the clock-derived values (`USER`, `HOME`, `PLATFORM`,
/// `RANDOM`, `UUID`) is still read from the running system.
#[must_use]
pub fn builtins_at<Tz>(now: &DateTime<Tz>) -> VariableMap
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut vars = VariableMap::with_capacity(BUILTIN_NAMES.len());

    vars.insert("DATE".to_string(), now.format("%Y-%m-%d").to_string());
    vars.insert("TIME".to_string(), now.format("%H:%M:%S").to_string());
    vars.insert("DATETIME".to_string(), now.format("%Y-%m-%d %H:%M:%S").to_string());
    vars.insert("TIMESTAMP".to_string(), now.timestamp_millis().to_string());
    vars.insert("YEAR".to_string(), now.format("%Y").to_string());
    vars.insert("MONTH".to_string(), now.format("%m").to_string());
    vars.insert("DAY".to_string(), now.format("%d").to_string());

    vars.insert("USER".to_string(), current_user());
    vars.insert("HOME".to_string(), home_dir_string());
    vars.insert("PLATFORM".to_string(), platform_id().to_string());
    vars.insert("RANDOM".to_string(), random_token(RANDOM_LEN));
    vars.insert("UUID".to_string(), Uuid::new_v4().hyphenated().to_string());

    vars
}

/// OS family identifier as used by template authors (`win32`, `darwin`, `linux`).
#[must_use]
pub fn platform_id() -> &'static str {
    match std::env::consts::OS {
        "windows" => "win32",
        "macos" => "darwin",
        other => other,
    }
}

fn current_user() -> String {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.is_empty())
        .or_else(|| {
            dirs::home_dir()
                .and_then(|home| home.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn home_dir_string() -> String {
    dirs::home_dir().map(|p| p.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Short lowercase alphanumeric token drawn from a v4 UUID's random bits.
fn random_token(len: usize) -> String {
    let mut bits = Uuid::new_v4().as_u128();
    let mut token = String::with_capacity(len);
    for _ in 0..len {
        token.push(BASE36[(bits % 36) as usize] as char);
        bits /= 36;
    }
    token
}
