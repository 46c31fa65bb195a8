// Live playback state handed to the renderer

use crate::now_playing::payload::Payload;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackInfo {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Seconds elapsed.
    pub position: Option<f64>,
    /// Seconds total.
    pub duration: Option<f64>,
    pub pct: f64,
    pub is_playing: bool,
}

impl PlaybackInfo {
    /// Applies a payload on top of the current state.
    ///
    /// Keys missing from the payload keep their value, keys sent as `null` are
    /// cleared. `pct` is always overwritten and falls back to 0.
    pub fn merge(&mut self, payload: &Payload) {
        if let Some(title) = &payload.title {
            self.title = title.clone();
        }
        if let Some(artist) = &payload.artist {
            self.artist = artist.clone();
        }
        if let Some(album) = &payload.album {
            self.album = album.clone();
        }
        if let Some(position) = payload.position {
            self.position = position;
        }
        if let Some(duration) = payload.duration {
            self.duration = duration;
        }
        self.pct = payload.pct.unwrap_or(0.0);
        if let Some(is_playing) = payload.is_playing {
            self.is_playing = is_playing.unwrap_or(false);
        }
    }

    /// True when there is no track metadata to show.
    pub fn is_empty(&self) -> bool {
        [&self.title, &self.artist, &self.album]
            .iter()
            .all(|field| field.as_deref().is_none_or(|s| s.trim().is_empty()))
    }

    pub fn status(&self) -> &'static str {
        if self.is_empty() {
            "stopped"
        } else if self.is_playing {
            "playing"
        } else {
            "paused"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> Payload {
        Payload::from_slice(json.as_bytes()).unwrap()
    }

    #[test]
    fn starts_empty() {
        let info = PlaybackInfo::default();
        assert!(info.is_empty());
        assert_eq!(info.status(), "stopped");
        assert_eq!(info.pct, 0.0);
        assert_eq!(info.position, None);
    }

    #[test]
    fn missing_pct_becomes_zero() {
        let mut info = PlaybackInfo {
            pct: 55.0,
            ..Default::default()
        };
        info.merge(&payload(r#"{"title":"Song"}"#));
        assert_eq!(info.pct, 0.0);
        info.merge(&payload(r#"{"pct":null}"#));
        assert_eq!(info.pct, 0.0);
    }

    #[test]
    fn absent_keys_keep_values_and_nulls_clear_them() {
        let mut info = PlaybackInfo::default();
        info.merge(&payload(
            r#"{"title":"Song","artist":"Band","album":"Record","position":10,"duration":100,"pct":10,"is_playing":true}"#,
        ));
        assert_eq!(info.status(), "playing");

        info.merge(&payload(r#"{"album":null,"position":11}"#));
        assert_eq!(info.title.as_deref(), Some("Song"));
        assert_eq!(info.artist.as_deref(), Some("Band"));
        assert_eq!(info.album, None);
        assert_eq!(info.position, Some(11.0));
        assert_eq!(info.duration, Some(100.0));
        assert!(info.is_playing);

        info.merge(&payload(r#"{"is_playing":null}"#));
        assert!(!info.is_playing);
        assert_eq!(info.status(), "paused");
    }

    #[test]
    fn out_of_range_values_are_kept() {
        let mut info = PlaybackInfo::default();
        info.merge(&payload(r#"{"position":300,"duration":200,"pct":150}"#));
        assert_eq!(info.position, Some(300.0));
        assert_eq!(info.duration, Some(200.0));
        assert_eq!(info.pct, 150.0);
    }

    #[test]
    fn blank_metadata_counts_as_stopped() {
        let mut info = PlaybackInfo::default();
        info.merge(&payload(r#"{"title":"","artist":" ","album":"","is_playing":true}"#));
        assert_eq!(info.status(), "stopped");
    }
}
