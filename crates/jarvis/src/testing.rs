//! Recording capability fakes
//!
//! Every call is logged as `capability.method(args)` and, unless the
//! capability was marked as failing, that same string is returned as the
//! provider's result. Tests can then assert on both the response text and the
//! exact calls made.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::capabilities::*;

#[derive(Default)]
struct Inner {
    calls: Mutex<Vec<String>>,
    failing: HashSet<String>,
    tasks: Mutex<Vec<String>>,
}

/// One fake standing in for every capability
#[derive(Clone, Default)]
pub struct FakeProviders {
    inner: Arc<Inner>,
}

impl FakeProviders {
    /// Fake whose listed capabilities (`"lights"`, `"web"`, ...) always fail
    pub fn failing<I, S>(capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Arc::new(Inner {
                failing: capabilities.into_iter().map(Into::into).collect(),
                ..Inner::default()
            }),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        let this = Arc::new(self.clone());
        Capabilities {
            lights: this.clone(),
            metrics: this.clone(),
            power: this.clone(),
            web: this.clone(),
            apps: this.clone(),
            network: this.clone(),
            todo: this.clone(),
            media: this.clone(),
            weather: this.clone(),
            fun: this.clone(),
            briefing: this.clone(),
            responder: this,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner
            .calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Calls made to one capability, e.g. `"network"`
    pub fn calls_to(&self, capability: &str) -> Vec<String> {
        let prefix = format!("{}.", capability);
        self.calls()
            .into_iter()
            .filter(|call| call.starts_with(&prefix))
            .collect()
    }

    fn record(&self, capability: &str, call: String) -> CapabilityResult<String> {
        let entry = format!("{}.{}", capability, call);
        if let Ok(mut calls) = self.inner.calls.lock() {
            calls.push(entry.clone());
        }
        if self.inner.failing.contains(capability) {
            Err(CapabilityError::failed(format!("{} unavailable", capability)))
        } else {
            Ok(entry)
        }
    }
}

#[async_trait]
impl LightControl for FakeProviders {
    async fn control(&self, group: &str, op: LightOp) -> CapabilityResult<String> {
        self.record("lights", format!("control({}, {:?})", group, op))
    }

    async fn command(&self, text: &str) -> CapabilityResult<String> {
        self.record("lights", format!("command({})", text))
    }

    async fn light_names(&self) -> CapabilityResult<Vec<String>> {
        self.record("lights", "light_names()".into())?;
        Ok(vec!["Bedroom".into(), "Desk".into()])
    }
}

#[async_trait]
impl SystemMetrics for FakeProviders {
    async fn metric(&self, kind: MetricKind) -> CapabilityResult<String> {
        self.record("metrics", format!("metric({})", kind))
    }
}

#[async_trait]
impl SystemPower for FakeProviders {
    async fn power(&self, op: PowerOp) -> CapabilityResult<String> {
        self.record("power", format!("power({:?})", op))
    }
}

#[async_trait]
impl WebOpener for FakeProviders {
    async fn open(&self, url: &str) -> CapabilityResult<()> {
        self.record("web", format!("open({})", url)).map(|_| ())
    }
}

#[async_trait]
impl AppLauncher for FakeProviders {
    async fn launch(&self, name: &str) -> CapabilityResult<String> {
        self.record("apps", format!("launch({})", name))
    }
}

#[async_trait]
impl NetworkDiagnostics for FakeProviders {
    async fn diagnose(&self, check: NetworkCheck) -> CapabilityResult<String> {
        match check {
            NetworkCheck::Ping(host) => self.record("network", format!("ping({})", host)),
            NetworkCheck::SpeedTest => self.record("network", "speed_test()".into()),
        }
    }
}

#[async_trait]
impl TodoList for FakeProviders {
    async fn todo(&self, op: TodoOp) -> CapabilityResult<String> {
        let result = match &op {
            TodoOp::Add(task) => self.record("todo", format!("add({})", task)),
            TodoOp::List => self.record("todo", "list()".into()),
            TodoOp::Clear => self.record("todo", "clear()".into()),
        }?;

        if let Ok(mut tasks) = self.inner.tasks.lock() {
            match op {
                TodoOp::Add(task) => tasks.push(task),
                TodoOp::Clear => tasks.clear(),
                TodoOp::List => {}
            }
        }
        Ok(result)
    }

    async fn tasks(&self) -> CapabilityResult<Vec<String>> {
        self.record("todo", "tasks()".into())?;
        Ok(self
            .inner
            .tasks
            .lock()
            .map(|tasks| tasks.clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl MediaControl for FakeProviders {
    async fn media(&self, op: MediaOp) -> CapabilityResult<String> {
        self.record("media", format!("media({:?})", op))
    }
}

#[async_trait]
impl WeatherReport for FakeProviders {
    async fn weather(&self) -> CapabilityResult<String> {
        self.record("weather", "weather()".into())
    }
}

#[async_trait]
impl Entertainment for FakeProviders {
    async fn fun(&self, kind: FunKind) -> CapabilityResult<String> {
        self.record("fun", format!("fun({:?})", kind))
    }
}

#[async_trait]
impl Briefing for FakeProviders {
    async fn briefing(&self) -> CapabilityResult<String> {
        self.record("briefing", "briefing()".into())
    }
}

#[async_trait]
impl GenericResponder for FakeProviders {
    async fn answer(&self, text: &str) -> CapabilityResult<String> {
        self.record("responder", format!("answer({})", text))
    }
}
