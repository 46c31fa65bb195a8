//! Wire payload served by the now-playing endpoint.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::now_playing::FetchError;

static CLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:(\d+):)?(\d+):(\d{1,2})\s*$").expect("valid clock pattern"));

/// One decoded `/api/now` body.
///
/// The outer `Option` of each field records whether the key was present at all,
/// the inner one whether it was `null`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Payload {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub artist: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub album: Option<Option<String>>,
    /// Seconds elapsed.
    #[serde(default, deserialize_with = "present_seconds")]
    pub position: Option<Option<f64>>,
    /// Seconds total.
    #[serde(default, deserialize_with = "present_seconds")]
    pub duration: Option<Option<f64>>,
    #[serde(default)]
    pub pct: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    pub is_playing: Option<Option<bool>>,
    /// Server-side timestamp, only used to tell payloads apart.
    #[serde(default)]
    pub last_update: Option<u64>,
}

impl Payload {
    /// Decode a response body, rejecting anything that isn't a JSON object.
    pub fn from_slice(body: &[u8]) -> Result<Self, FetchError> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(FetchError::NotAnObject);
        }
        Ok(Self::deserialize(value)?)
    }
}

/// Parses `mm:ss` or `h:mm:ss` into whole seconds.
pub fn parse_clock(text: &str) -> Option<f64> {
    let caps = CLOCK.captures(text)?;
    let hours: u64 = match caps.get(1) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let minutes: u64 = caps[2].parse().ok()?;
    let seconds: u64 = caps[3].parse().ok()?;
    if seconds >= 60 || (caps.get(1).is_some() && minutes >= 60) {
        return None;
    }
    let total = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?;
    Some(total as f64)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeconds {
    Number(f64),
    Clock(String),
}

fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn present_seconds<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = match Option::<RawSeconds>::deserialize(deserializer)? {
        None => None,
        Some(RawSeconds::Number(n)) => Some(n),
        Some(RawSeconds::Clock(text)) => Some(
            parse_clock(&text)
                .ok_or_else(|| D::Error::custom(format!("invalid clock value `{text}`")))?,
        ),
    };
    Ok(Some(seconds))
}
