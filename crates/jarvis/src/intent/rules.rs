//! The assistant's rule table, in precedence order
//!
//! Order matters and is tested: media keys come before anything that mentions
//! "play", mode starts come before the generic "start <app>" launcher, and the
//! website opener comes before the app launcher, so "open website x" browses
//! while "open x" launches.

use super::{Action, IntentRule, ParameterRule, Trigger};
use crate::{
    capabilities::{FunKind, MediaOp, MetricKind, PowerOp},
    config::AssistantConfig,
    extract::VerbPattern,
    modes::ModeDefinition,
    Result,
};

pub const GREETING: &str = "Hello! How can I assist you today?";
pub const PING_CLARIFICATION: &str = "Please specify a host to ping.";
pub const TODO_CLARIFICATION: &str = "Please tell me what to add to your to-do list.";
pub const WEBSITE_CLARIFICATION: &str = "Please specify a website to open.";
pub const APP_CLARIFICATION: &str = "Please tell me which application to open.";

/// Verbs that introduce a website to open
pub const WEBSITE_VERBS: &[&str] = &["open website", "go to", "look up"];
/// Verbs that introduce an application to launch
pub const LAUNCH_VERBS: &[&str] = &["open", "launch", "start"];

pub fn default_rules(
    assistant: &AssistantConfig,
    modes: &[ModeDefinition],
) -> Result<Vec<IntentRule>> {
    let website = VerbPattern::new(WEBSITE_VERBS.iter().copied())?;
    let launch = VerbPattern::new(LAUNCH_VERBS.iter().copied())?;

    Ok(vec![
        IntentRule::new(
            "greeting",
            Trigger::contains(["hello", "hi"]),
            Action::Reply(GREETING.into()),
        ),
        IntentRule::new(
            "daily_briefing",
            Trigger::contains(["daily briefing", "morning briefing"]),
            Action::Briefing,
        )
        .apologize("Sorry, I couldn't put your briefing together."),
        // Media transport: the action itself is the feedback
        IntentRule::new(
            "play_pause",
            Trigger::Either(vec![
                Trigger::all_of(["play", "pause"]),
                Trigger::contains(["toggle media"]),
            ]),
            Action::Media(MediaOp::PlayPause),
        )
        .silent(),
        IntentRule::new(
            "next_track",
            Trigger::contains(["next track", "next song"]),
            Action::Media(MediaOp::Next),
        )
        .silent(),
        IntentRule::new(
            "previous_track",
            Trigger::contains(["previous track", "previous song"]),
            Action::Media(MediaOp::Previous),
        )
        .silent(),
        IntentRule::new(
            "volume_up",
            Trigger::contains(["volume up"]),
            Action::Media(MediaOp::VolumeUp),
        )
        .silent(),
        IntentRule::new(
            "volume_down",
            Trigger::contains(["volume down"]),
            Action::Media(MediaOp::VolumeDown),
        )
        .silent(),
        IntentRule::new("mute", Trigger::contains(["mute"]), Action::Media(MediaOp::Mute)).silent(),
        IntentRule::new(
            "start_mode",
            Trigger::contains(modes.iter().map(ModeDefinition::trigger_phrase)),
            Action::StartMode,
        )
        .silent(),
        IntentRule::new(
            "wake_pc",
            Trigger::contains(["turn on my pc", "wake my pc"]),
            Action::Power(PowerOp::WakeRemote),
        )
        .apologize("Sorry, I couldn't wake your PC."),
        IntentRule::new("ping", Trigger::prefix(["ping"]), Action::Ping)
            .with_parameter(ParameterRule::strip_literal("ping", PING_CLARIFICATION))
            .silent()
            .apologize("Sorry, I couldn't run that ping."),
        IntentRule::new(
            "speed_test",
            Trigger::contains(["speed test", "internet speed"]),
            Action::SpeedTest,
        )
        .apologize("Sorry, I couldn't run a speed test right now."),
        IntentRule::new(
            "clear_tasks",
            Trigger::contains(["clear my to-do list"]),
            Action::ClearTasks,
        )
        .apologize("Sorry, I couldn't clear your to-do list."),
        IntentRule::new(
            "list_tasks",
            Trigger::contains(["what's on my to-do list", "show my to-do list"]),
            Action::ListTasks,
        )
        .apologize("Sorry, I couldn't read your to-do list."),
        IntentRule::new(
            "add_task",
            Trigger::prefix(["add to my to-do list"]),
            Action::AddTask,
        )
        .with_parameter(ParameterRule::strip_literal(
            "add to my to-do list",
            TODO_CLARIFICATION,
        ))
        .apologize("Sorry, I couldn't add that to your to-do list."),
        IntentRule::new(
            "lights",
            Trigger::contains(["light", "lights", "lamp", "hue", "dim", "brighten", "color"]),
            Action::Lights,
        )
        .silent(),
        IntentRule::new("weather", Trigger::contains(["weather"]), Action::Weather),
        IntentRule::new(
            "music",
            Trigger::Either(vec![
                Trigger::contains(["open youtube music"]),
                Trigger::exact("play music"),
            ]),
            Action::OpenPage {
                url: assistant.music_url.clone(),
                reply: "Opening YouTube Music.".into(),
            },
        ),
        IntentRule::new(
            "cpu_usage",
            Trigger::contains(["cpu status", "cpu usage"]),
            Action::Metric(MetricKind::Cpu),
        ),
        IntentRule::new(
            "ram_usage",
            Trigger::contains(["ram usage", "memory status"]),
            Action::Metric(MetricKind::Ram),
        ),
        IntentRule::new(
            "cpu_temperature",
            Trigger::contains(["cpu temperature"]),
            Action::Metric(MetricKind::Temperature),
        ),
        IntentRule::new(
            "gpu_info",
            Trigger::contains(["gpu info"]),
            Action::Metric(MetricKind::Gpu),
        ),
        IntentRule::new(
            "current_time",
            Trigger::contains(["what time is it", "current time"]),
            Action::Metric(MetricKind::Time),
        ),
        IntentRule::new("joke", Trigger::contains(["joke"]), Action::Fun(FunKind::Joke))
            .apologize("Sorry, I'm all out of jokes right now."),
        IntentRule::new(
            "fact",
            Trigger::contains(["tell me a fact", "random fact"]),
            Action::Fun(FunKind::Fact),
        )
        .apologize("Sorry, I couldn't think of a fact right now."),
        IntentRule::new(
            "shutdown",
            Trigger::contains(["shutdown computer"]),
            Action::Power(PowerOp::Shutdown),
        )
        .apologize("Sorry, I couldn't shut down the computer."),
        IntentRule::new(
            "reboot",
            Trigger::contains(["reboot computer"]),
            Action::Power(PowerOp::Reboot),
        )
        .apologize("Sorry, I couldn't reboot the computer."),
        IntentRule::new(
            "home_site",
            Trigger::Either(vec![
                Trigger::contains(["go to my site", "show my site"]),
                Trigger::exact(assistant.home_host()),
            ]),
            Action::OpenPage {
                url: assistant.home_site.clone(),
                reply: String::new(),
            },
        )
        .silent(),
        // Known ambiguity: must stay ahead of "launch_app"
        IntentRule::new(
            "open_website",
            Trigger::prefix(WEBSITE_VERBS.iter().copied()),
            Action::OpenWebsite,
        )
        .with_parameter(ParameterRule::prefix(website, WEBSITE_CLARIFICATION))
        .silent(),
        IntentRule::new(
            "launch_app",
            Trigger::Pattern(launch.clone()),
            Action::LaunchApp,
        )
        .with_parameter(ParameterRule::prefix(launch, APP_CLARIFICATION))
        .apologize("Sorry, I couldn't launch that application."),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{command::NormalizedCommand, intent::IntentMatcher, modes::default_modes};

    fn matcher() -> IntentMatcher {
        let assistant = AssistantConfig::default();
        let modes = default_modes(&assistant);
        IntentMatcher::new(default_rules(&assistant, &modes).unwrap())
    }

    fn intent(matcher: &IntentMatcher, text: &str) -> Option<&'static str> {
        matcher
            .find(&NormalizedCommand::new(text))
            .map(|rule| rule.name)
    }

    #[test]
    fn test_rule_names_are_unique() {
        let matcher = matcher();
        let mut names: Vec<_> = matcher.rules().iter().map(|r| r.name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_precedence_order() {
        let m = matcher();
        let pos = |name| m.position(name).unwrap();

        assert!(pos("play_pause") < pos("music"));
        assert!(pos("start_mode") < pos("launch_app"));
        assert!(pos("clear_tasks") < pos("add_task"));
        assert!(pos("home_site") < pos("open_website"));
        assert!(pos("open_website") < pos("launch_app"));
        assert_eq!(pos("launch_app"), m.rules().len() - 1);
    }

    #[test]
    fn test_representative_commands() {
        let m = matcher();
        let cases = [
            ("play pause", "play_pause"),
            ("Toggle media please", "play_pause"),
            ("next song", "next_track"),
            ("unmute", "mute"),
            ("start movie mode", "start_mode"),
            ("wake my pc", "wake_pc"),
            ("ping 8.8.8.8", "ping"),
            ("run a speed test", "speed_test"),
            ("clear my to-do list", "clear_tasks"),
            ("what's on my to-do list", "list_tasks"),
            ("add to my to-do list buy milk", "add_task"),
            ("dim the bedroom lamp", "lights"),
            ("weather forecast", "weather"),
            ("play music", "music"),
            ("cpu usage", "cpu_usage"),
            ("memory status", "ram_usage"),
            ("cpu temperature", "cpu_temperature"),
            ("gpu info", "gpu_info"),
            ("current time", "current_time"),
            ("tell me a joke", "joke"),
            ("random fact", "fact"),
            ("shutdown computer", "shutdown"),
            ("reboot computer", "reboot"),
            ("beautech.nl", "home_site"),
            ("go to my site", "home_site"),
            ("go to example.com", "open_website"),
            ("look up rust-lang.org", "open_website"),
            ("open spotify", "launch_app"),
            ("launch Visual Studio Code", "launch_app"),
        ];

        for (text, expected) in cases {
            assert_eq!(intent(&m, text), Some(expected), "command: {}", text);
        }
    }

    #[test]
    fn test_substring_overlaps_follow_order() {
        let m = matcher();
        // "hi" is a loose substring trigger and sits first
        assert_eq!(intent(&m, "which song is this"), Some("greeting"));
        // "play music" only matches exactly; anything longer is not the music rule
        assert_eq!(intent(&m, "play music by queen"), None);
        // unknown mode names fall through to the launcher
        assert_eq!(intent(&m, "start party mode"), Some("launch_app"));
        // a bare verb still selects the website rule; extraction decides later
        assert_eq!(intent(&m, "open website"), Some("open_website"));
    }

    #[test]
    fn test_unmatched_commands() {
        let m = matcher();
        assert_eq!(intent(&m, "what is the capital of france"), None);
        assert_eq!(intent(&m, ""), None);
        assert_eq!(intent(&m, "launch"), None);
    }
}
