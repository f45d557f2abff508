//! Capability providers backed by the real system and web services
//!
//! Each module implements one of the `jarvis` capability traits.
//! [`default_capabilities`] wires the full set from a [`JarvisConfig`].

use std::sync::Arc;

use jarvis::{Capabilities, JarvisConfig, KeyValueStore};

pub mod apps;
pub mod briefing;
pub mod browser;
pub mod fun;
pub mod lights;
pub mod media;
pub mod metrics;
pub mod network;
pub mod openai;
pub mod power;
mod process;
pub mod store;
pub mod todo;
pub mod weather;

pub use apps::ProcessAppLauncher;
pub use briefing::DailyBriefing;
pub use browser::BrowserOpener;
pub use fun::Trivia;
pub use lights::HueLights;
pub use media::MediaKeys;
pub use metrics::SysinfoMetrics;
pub use network::NetworkTools;
pub use openai::OpenAiResponder;
pub use power::PowerControl;
pub use store::JsonFileStore;
pub use todo::StoreTodoList;
pub use weather::OpenWeather;

/// Build the production provider set
pub fn default_capabilities(
    config: &JarvisConfig,
    store: Arc<dyn KeyValueStore>,
) -> Capabilities {
    let metrics = Arc::new(SysinfoMetrics::new());
    let weather = Arc::new(OpenWeather::new(config.weather.clone()));
    let todo = Arc::new(StoreTodoList::new(store));

    Capabilities {
        lights: Arc::new(HueLights::new(&config.lights, &config.assistant.light_group)),
        metrics: metrics.clone(),
        power: Arc::new(PowerControl::new(config.network.clone())),
        web: Arc::new(BrowserOpener),
        apps: Arc::new(ProcessAppLauncher::new(config.apps.clone())),
        network: Arc::new(NetworkTools::new(config.network.clone())),
        todo: todo.clone(),
        media: Arc::new(MediaKeys),
        weather: weather.clone(),
        fun: Arc::new(Trivia),
        briefing: Arc::new(DailyBriefing::new(metrics, weather, todo)),
        responder: Arc::new(OpenAiResponder::new(config.openai.clone())),
    }
}

#[cfg(test)]
mod tests {
    use jarvis::{Dispatcher, KeyValueStoreExt, MemoryStore, Response};

    use super::*;

    fn dispatcher(store: Arc<MemoryStore>) -> Dispatcher {
        let config = JarvisConfig::default();
        Dispatcher::new(&config, default_capabilities(&config, store)).unwrap()
    }

    #[tokio::test]
    async fn test_todo_commands_reach_the_store() {
        let store = Arc::new(MemoryStore::new());
        let dispatcher = dispatcher(store.clone());

        let added = dispatcher
            .interpret("Add to my to-do list Water the Plants")
            .await;
        assert_eq!(
            added,
            Response::spoken("Added 'Water the Plants' to your to-do list.")
        );

        let saved: Vec<String> = store.get_as(todo::TODO_KEY).unwrap().unwrap();
        assert_eq!(saved, vec!["Water the Plants"]);

        assert_eq!(
            dispatcher.interpret("show my to-do list").await.text,
            "You have one task on your to-do list: Water the Plants."
        );
    }

    #[tokio::test]
    async fn test_unconfigured_services_fail_gracefully() {
        let dispatcher = dispatcher(Arc::new(MemoryStore::new()));

        // Weather surfaces the provider error, the fallback apologizes
        assert_eq!(
            dispatcher.interpret("weather").await,
            Response::spoken("The weather service is not configured.")
        );
        assert_eq!(
            dispatcher.interpret("how far away is the moon").await,
            Response::spoken(jarvis::dispatcher::FALLBACK_APOLOGY)
        );
    }

    #[tokio::test]
    async fn test_jokes_come_from_the_pool() {
        let dispatcher = dispatcher(Arc::new(MemoryStore::new()));
        let joke = dispatcher.interpret("tell me a joke").await;
        assert!(joke.speak);
        assert!(fun::JOKES.contains(&joke.text.as_str()));
    }
}
