//! Media transport and volume keys

use async_trait::async_trait;
use jarvis::{CapabilityError, CapabilityResult, MediaControl, MediaOp};

use crate::process;

#[derive(Debug, Default, Clone, Copy)]
pub struct MediaKeys;

/// Program and arguments that perform `op` on this platform
pub fn media_command(op: MediaOp) -> Option<(&'static str, Vec<&'static str>)> {
    if cfg!(target_os = "macos") {
        let script = match op {
            MediaOp::PlayPause => "tell application \"Music\" to playpause",
            MediaOp::Next => "tell application \"Music\" to next track",
            MediaOp::Previous => "tell application \"Music\" to previous track",
            MediaOp::VolumeUp => {
                "set volume output volume ((output volume of (get volume settings)) + 6)"
            }
            MediaOp::VolumeDown => {
                "set volume output volume ((output volume of (get volume settings)) - 6)"
            }
            MediaOp::Mute => {
                "set volume output muted (not (output muted of (get volume settings)))"
            }
        };
        Some(("osascript", vec!["-e", script]))
    } else if cfg!(target_os = "linux") {
        Some(match op {
            MediaOp::PlayPause => ("playerctl", vec!["play-pause"]),
            MediaOp::Next => ("playerctl", vec!["next"]),
            MediaOp::Previous => ("playerctl", vec!["previous"]),
            MediaOp::VolumeUp => ("pactl", vec!["set-sink-volume", "@DEFAULT_SINK@", "+5%"]),
            MediaOp::VolumeDown => ("pactl", vec!["set-sink-volume", "@DEFAULT_SINK@", "-5%"]),
            MediaOp::Mute => ("pactl", vec!["set-sink-mute", "@DEFAULT_SINK@", "toggle"]),
        })
    } else {
        None
    }
}

fn confirmation(op: MediaOp) -> &'static str {
    match op {
        MediaOp::PlayPause => "Toggled playback.",
        MediaOp::Next => "Skipped to the next track.",
        MediaOp::Previous => "Back to the previous track.",
        MediaOp::VolumeUp => "Volume up.",
        MediaOp::VolumeDown => "Volume down.",
        MediaOp::Mute => "Toggled mute.",
    }
}

#[async_trait]
impl MediaControl for MediaKeys {
    async fn media(&self, op: MediaOp) -> CapabilityResult<String> {
        let (program, args) =
            media_command(op).ok_or_else(|| CapabilityError::Unsupported("Media control".into()))?;

        process::run(program, &args).await.map_err(|e| match e {
            CapabilityError::Unsupported(_) => {
                CapabilityError::Unsupported(format!("Media control without {}", program))
            }
            other => other,
        })?;

        tracing::debug!("Media key {:?} sent via {}", op, program);
        Ok(confirmation(op).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_uses_playerctl_and_pactl() {
        assert_eq!(
            media_command(MediaOp::PlayPause),
            Some(("playerctl", vec!["play-pause"]))
        );
        assert_eq!(media_command(MediaOp::Mute).map(|(p, _)| p), Some("pactl"));
    }

    #[test]
    fn test_every_op_has_a_confirmation() {
        for op in [
            MediaOp::PlayPause,
            MediaOp::Next,
            MediaOp::Previous,
            MediaOp::VolumeUp,
            MediaOp::VolumeDown,
            MediaOp::Mute,
        ] {
            assert!(!confirmation(op).is_empty());
        }
    }
}
