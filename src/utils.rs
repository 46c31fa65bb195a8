use crate::config::{Config, OutputMode};
use crate::playback::PlaybackInfo;

const PLAY_ICON: &str = "\u{f04b}";
const PAUSE_ICON: &str = "\u{f04c}";

/// Formats seconds as `mm:ss`, or `--` when unknown or negative.
///
/// Fractions are truncated and minutes are not folded into hours.
pub fn format_time(seconds: Option<f64>) -> String {
    match seconds {
        Some(seconds) if seconds >= 0.0 => {
            let total = seconds as u64;
            format!("{:02}:{:02}", total / 60, total % 60)
        }
        _ => "--".to_string(),
    }
}

fn format_pct(pct: f64) -> String {
    format!("{:.0}", pct)
}

/// Fills `{title}`, `{artist}`, `{album}`, `{position}`, `{duration}` and `{pct}`.
pub fn format_metadata(format: &str, info: &PlaybackInfo) -> String {
    format
        .replace("{title}", info.title.as_deref().unwrap_or("").trim())
        .replace("{artist}", info.artist.as_deref().unwrap_or("").trim())
        .replace("{album}", info.album.as_deref().unwrap_or("").trim())
        .replace("{position}", &format_time(info.position))
        .replace("{duration}", &format_time(info.duration))
        .replace("{pct}", &format_pct(info.pct))
        .trim()
        .to_string()
}

fn get_position_text(config: &Config, info: &PlaybackInfo) -> String {
    if config.no_position || (info.position.is_none() && info.duration.is_none()) {
        return String::new();
    }
    format!(
        " {}/{} ({}%)",
        format_time(info.position),
        format_time(info.duration),
        format_pct(info.pct)
    )
}

/// Renders one status line for the current state.
pub fn status_line(config: &Config, info: &PlaybackInfo) -> String {
    let class = info.status();
    if info.is_empty() {
        return match config.output {
            OutputMode::Json => serde_json::json!({"text": "", "class": class}).to_string(),
            OutputMode::Plain => String::new(),
        };
    }

    let metadata = format_metadata(&config.format, info);
    let position_text = get_position_text(config, info);
    let text = if config.no_icon {
        format!("{}{}", metadata, position_text)
    } else {
        let icon = if info.is_playing { PLAY_ICON } else { PAUSE_ICON };
        format!("{} {}{}", icon, metadata, position_text)
    };

    match config.output {
        OutputMode::Json => serde_json::json!({
            "text": text,
            "class": class,
            "tooltip": format_metadata(&config.tooltip_format, info),
            "percentage": info.pct.clamp(0.0, 100.0).round() as u8,
        })
        .to_string(),
        OutputMode::Plain => text,
    }
}

/// Print status for the current state, only if output changes.
pub fn print_status(config: &Config, info: &PlaybackInfo, last_output: &mut String) {
    let output = status_line(config, info);
    if *last_output != output {
        println!("{}", output);
        *last_output = output;
    }
}
