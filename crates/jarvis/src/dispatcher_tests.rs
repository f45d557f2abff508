//! Tests for the dispatcher

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        capabilities::MediaOp,
        config::JarvisConfig,
        dispatcher::{Dispatcher, FALLBACK_APOLOGY},
        intent::{
            rules::{GREETING, PING_CLARIFICATION, TODO_CLARIFICATION, WEBSITE_CLARIFICATION},
            Action, IntentRule, Trigger,
        },
        modes::ModeDefinition,
        response::Response,
        testing::FakeProviders,
    };

    fn dispatcher(fake: &FakeProviders) -> Dispatcher {
        Dispatcher::new(&JarvisConfig::default(), fake.capabilities()).unwrap()
    }

    #[tokio::test]
    async fn test_unrecognized_command_uses_fallback() {
        let fake = FakeProviders::default();
        let response = dispatcher(&fake)
            .interpret("What is the capital of France?")
            .await;

        assert_eq!(
            response,
            Response::spoken("responder.answer(What is the capital of France?)")
        );
        assert_eq!(fake.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_command_uses_fallback() {
        let fake = FakeProviders::default();
        let response = dispatcher(&fake).interpret("   ").await;

        assert!(response.speak);
        assert_eq!(fake.calls(), vec!["responder.answer()"]);
    }

    #[tokio::test]
    async fn test_failing_fallback_apologizes() {
        let fake = FakeProviders::failing(["responder"]);
        let response = dispatcher(&fake).interpret("explain quantum foam").await;
        assert_eq!(response, Response::spoken(FALLBACK_APOLOGY));
    }

    #[tokio::test]
    async fn test_greeting_is_static() {
        let fake = FakeProviders::default();
        let response = dispatcher(&fake).interpret("Hello there").await;
        assert_eq!(response, Response::spoken(GREETING));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_play_pause_is_silent_toggle() {
        let fake = FakeProviders::default();
        let response = dispatcher(&fake).interpret("play pause").await;

        assert_eq!(response, Response::silent("media.media(PlayPause)"));
        assert_eq!(fake.calls(), vec!["media.media(PlayPause)"]);
    }

    #[tokio::test]
    async fn test_higher_precedence_rule_wins_over_overlap() {
        let fake = FakeProviders::default();
        let rules = vec![
            IntentRule::new(
                "play_pause",
                Trigger::all_of(["play", "pause"]),
                Action::Media(MediaOp::PlayPause),
            )
            .silent(),
            IntentRule::new("play", Trigger::contains(["play"]), Action::Reply("playing".into())),
        ];
        let dispatcher = Dispatcher::with_rules(rules, vec![], fake.capabilities(), "http://");

        for _ in 0..3 {
            let response = dispatcher.interpret("Play Pause").await;
            assert_eq!(response.text, "media.media(PlayPause)");
        }
        assert_eq!(dispatcher.interpret("play jazz").await, Response::spoken("playing"));
    }

    #[tokio::test]
    async fn test_rule_without_parameter_rule_reports_missing_parameter() {
        let fake = FakeProviders::default();
        let rules = vec![IntentRule::new("bare_ping", Trigger::prefix(["ping"]), Action::Ping)];
        let dispatcher = Dispatcher::with_rules(rules, vec![], fake.capabilities(), "http://");

        assert_eq!(
            dispatcher.interpret("ping 8.8.8.8").await,
            Response::spoken("Missing parameter: bare_ping")
        );
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_mode_asks_which_mode() {
        let fake = FakeProviders::default();
        let rules = vec![IntentRule::new(
            "start_mode",
            Trigger::contains(["mode"]),
            Action::StartMode,
        )
        .silent()];
        let dispatcher = Dispatcher::with_rules(
            rules,
            vec![ModeDefinition::new("movie", vec![])],
            fake.capabilities(),
            "http://",
        );

        let response = dispatcher.interpret("start party mode").await;
        assert!(response.speak);
        assert_eq!(response.text, dispatcher.modes().clarification());
        assert_eq!(dispatcher.interpret("start movie mode").await, Response::done());
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_ping_extracts_host() {
        let fake = FakeProviders::default();
        let response = dispatcher(&fake).interpret("ping 8.8.8.8").await;

        assert_eq!(response, Response::silent("network.ping(8.8.8.8)"));
        assert_eq!(fake.calls_to("network"), vec!["network.ping(8.8.8.8)"]);
    }

    #[tokio::test]
    async fn test_ping_without_host_asks_for_clarification() {
        let fake = FakeProviders::default();
        let response = dispatcher(&fake).interpret("ping").await;

        assert_eq!(response, Response::spoken(PING_CLARIFICATION));
        assert!(fake.calls_to("network").is_empty());
    }

    #[tokio::test]
    async fn test_add_task_preserves_case() {
        let fake = FakeProviders::default();
        let dispatcher = dispatcher(&fake);

        dispatcher.interpret("add to my to-do list buy milk").await;
        dispatcher
            .interpret("  Add to my to-do list   Call Grandma Sunday  ")
            .await;

        assert_eq!(
            fake.calls_to("todo"),
            vec!["todo.add(buy milk)", "todo.add(Call Grandma Sunday)"]
        );
    }

    #[tokio::test]
    async fn test_add_task_without_text_asks_for_clarification() {
        let fake = FakeProviders::default();
        let response = dispatcher(&fake).interpret("add to my to-do list").await;

        assert_eq!(response, Response::spoken(TODO_CLARIFICATION));
        assert!(fake.calls_to("todo").is_empty());
    }

    #[tokio::test]
    async fn test_go_to_prepends_scheme() {
        let fake = FakeProviders::default();
        let response = dispatcher(&fake).interpret("go to example.com").await;

        assert_eq!(response, Response::done());
        assert_eq!(fake.calls(), vec!["web.open(http://example.com)"]);
    }

    #[tokio::test]
    async fn test_go_to_keeps_existing_scheme() {
        let fake = FakeProviders::default();
        dispatcher(&fake)
            .interpret("look up https://Example.com/Path")
            .await;

        assert_eq!(fake.calls(), vec!["web.open(https://Example.com/Path)"]);
    }

    #[tokio::test]
    async fn test_open_website_without_url_asks_for_clarification() {
        let fake = FakeProviders::default();
        let response = dispatcher(&fake).interpret("go to").await;

        assert_eq!(response, Response::spoken(WEBSITE_CLARIFICATION));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_website_prefix_without_verb_boundary_asks_for_clarification() {
        let fake = FakeProviders::default();
        let dispatcher = dispatcher(&fake);

        for command in ["open websites", "go tomorrow"] {
            assert_eq!(
                dispatcher.interpret(command).await,
                Response::spoken(WEBSITE_CLARIFICATION),
                "command: {}",
                command
            );
        }
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_web_open_failure_is_surfaced() {
        let fake = FakeProviders::failing(["web"]);
        let response = dispatcher(&fake).interpret("go to example.com").await;
        assert_eq!(response, Response::silent("web unavailable"));
    }

    #[tokio::test]
    async fn test_open_app_versus_open_website() {
        let fake = FakeProviders::default();
        let dispatcher = dispatcher(&fake);

        dispatcher.interpret("open website github.com").await;
        let launched = dispatcher.interpret("Open Spotify").await;

        assert_eq!(
            fake.calls(),
            vec!["web.open(http://github.com)", "apps.launch(Spotify)"]
        );
        assert!(launched.speak);
    }

    #[tokio::test]
    async fn test_movie_mode_is_silent_even_when_everything_fails() {
        let fake = FakeProviders::failing(["lights", "web", "apps"]);
        let response = dispatcher(&fake).interpret("start movie mode").await;

        assert_eq!(response, Response::new("", false));
        assert_eq!(fake.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_lights_receive_original_text() {
        let fake = FakeProviders::default();
        let response = dispatcher(&fake)
            .interpret("Dim the Bedroom lights to 20%")
            .await;

        assert_eq!(
            response,
            Response::silent("lights.command(Dim the Bedroom lights to 20%)")
        );
    }

    #[tokio::test]
    async fn test_light_failure_surfaces_provider_error() {
        let fake = FakeProviders::failing(["lights"]);
        let response = dispatcher(&fake).interpret("turn off the lamp").await;
        assert_eq!(response, Response::silent("lights unavailable"));
    }

    #[tokio::test]
    async fn test_apologizing_rules_hide_provider_error() {
        let fake = FakeProviders::failing(["power", "apps"]);
        let dispatcher = dispatcher(&fake);

        let shutdown = dispatcher.interpret("shutdown computer").await;
        assert_eq!(
            shutdown,
            Response::spoken("Sorry, I couldn't shut down the computer.")
        );

        let launch = dispatcher.interpret("launch blender").await;
        assert_eq!(
            launch,
            Response::spoken("Sorry, I couldn't launch that application.")
        );
    }

    #[tokio::test]
    async fn test_metrics_and_time() {
        let fake = FakeProviders::default();
        let dispatcher = dispatcher(&fake);

        assert_eq!(
            dispatcher.interpret("CPU usage").await,
            Response::spoken("metrics.metric(cpu)")
        );
        assert_eq!(
            dispatcher.interpret("what time is it").await,
            Response::spoken("metrics.metric(time)")
        );
    }

    #[tokio::test]
    async fn test_home_site_and_music_shortcuts() {
        let fake = FakeProviders::default();
        let dispatcher = dispatcher(&fake);

        assert_eq!(dispatcher.interpret("beautech.nl").await, Response::done());
        assert_eq!(
            dispatcher.interpret("play music").await,
            Response::spoken("Opening YouTube Music.")
        );
        assert_eq!(
            fake.calls(),
            vec![
                "web.open(http://beautech.nl)",
                "web.open(https://music.youtube.com)"
            ]
        );
    }

    #[tokio::test]
    async fn test_speak_flag_is_stable_across_calls() {
        let fake = FakeProviders::default();
        let dispatcher = dispatcher(&fake);

        for command in [
            "cpu temperature",
            "next track",
            "ping 1.1.1.1",
            "start work mode",
            "tell me a joke",
            "how tall is everest",
        ] {
            let first = dispatcher.interpret(command).await;
            let second = dispatcher.interpret(command).await;
            assert_eq!(first.speak, second.speak, "command: {}", command);
        }
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_dispatcher() {
        let fake = FakeProviders::default();
        let dispatcher = Arc::new(dispatcher(&fake));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let dispatcher = dispatcher.clone();
                tokio::spawn(async move { dispatcher.interpret(&format!("ping 10.0.0.{}", i)).await })
            })
            .collect();

        for handle in handles {
            let response = handle.await.unwrap();
            assert!(!response.speak);
        }
        assert_eq!(fake.calls_to("network").len(), 8);
    }
}
