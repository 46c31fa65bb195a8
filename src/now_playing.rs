//! Polling client for a `/api/now` style "now playing" endpoint.

pub mod http;
pub mod payload;
pub mod poller;

use std::time::Duration;

use payload::Payload;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("payload is not a JSON object")]
    NotAnObject,
}

/// Something that can produce the current playback payload.
pub trait NowPlayingSource {
    fn fetch(&self) -> impl Future<Output = Result<Payload, FetchError>> + Send;
}

/// How long to wait before the next poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Same interval after every outcome. Every successful poll is applied.
    Fixed { interval: Duration },
    /// Faster while playing, slower while idle, fixed after a failure.
    /// Payloads identical to the previous one are dropped.
    Adaptive {
        playing: Duration,
        idle: Duration,
        retry: Duration,
    },
}

impl Default for Cadence {
    fn default() -> Self {
        Self::Adaptive {
            playing: Duration::from_millis(100),
            idle: Duration::from_millis(200),
            retry: Duration::from_millis(250),
        }
    }
}

impl Cadence {
    pub fn after_success(&self, is_playing: bool) -> Duration {
        match *self {
            Self::Fixed { interval } => interval,
            Self::Adaptive { playing, idle, .. } => {
                if is_playing {
                    playing
                } else {
                    idle
                }
            }
        }
    }

    pub fn after_failure(&self) -> Duration {
        match *self {
            Self::Fixed { interval } => interval,
            Self::Adaptive { retry, .. } => retry,
        }
    }

    pub fn suppresses_unchanged(&self) -> bool {
        matches!(self, Self::Adaptive { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptive_defaults() {
        let cadence = Cadence::default();
        assert_eq!(cadence.after_success(true), Duration::from_millis(100));
        assert_eq!(cadence.after_success(false), Duration::from_millis(200));
        assert_eq!(cadence.after_failure(), Duration::from_millis(250));
        assert!(cadence.suppresses_unchanged());
    }

    #[test]
    fn fixed_ignores_outcome() {
        let cadence = Cadence::Fixed {
            interval: Duration::from_millis(1000),
        };
        assert_eq!(cadence.after_success(true), Duration::from_millis(1000));
        assert_eq!(cadence.after_success(false), Duration::from_millis(1000));
        assert_eq!(cadence.after_failure(), Duration::from_millis(1000));
        assert!(!cadence.suppresses_unchanged());
    }
}
