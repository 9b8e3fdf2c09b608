#![allow(dead_code)]

use async_trait::async_trait;
use encore_scheduler::{
    EventTypeSource, InlineWidgetOptions, LoaderConfig, MeetingType, SchedulerError, ScriptError,
    ScriptHost, ScriptRegistry, SchedulingWidgetLoader, StaticEventTypeSource, WidgetContainer,
    WidgetError,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SCRIPT_SRC: &str = "https://assets.calendly.com/assets/external/widget.js";
pub const FALLBACK_URL: &str = "https://calendly.com/votre-calendly-username";
pub const SCRIPT_LOAD_TIME: Duration = Duration::from_millis(40);
pub const SETTLING_DELAY: Duration = Duration::from_millis(250);

/// A document that records script tags.
#[derive(Default)]
pub struct FakeDocument {
    tags: Mutex<Vec<String>>,
    pub max_tags: AtomicUsize,
    pub attaches: AtomicUsize,
    pub detaches: AtomicUsize,
    pub fail_loads: AtomicBool,
}

impl FakeDocument {
    pub fn with_tag(src: &str) -> Self {
        let doc = Self::default();
        doc.tags.lock().unwrap().push(src.to_string());
        doc
    }

    pub fn tag_count(&self) -> usize {
        self.tags
            .lock()
            .unwrap()
            .iter()
            .filter(|t| *t == SCRIPT_SRC)
            .count()
    }
}

#[async_trait]
impl ScriptHost for FakeDocument {
    fn is_attached(&self, src: &str) -> bool {
        self.tags.lock().unwrap().iter().any(|t| t == src)
    }

    async fn attach(&self, src: &str) -> Result<(), ScriptError> {
        self.attaches.fetch_add(1, Ordering::SeqCst);
        {
            let mut tags = self.tags.lock().unwrap();
            tags.push(src.to_string());
            let count = tags.iter().filter(|t| *t == src).count();
            self.max_tags.fetch_max(count, Ordering::SeqCst);
        }
        tokio::time::sleep(SCRIPT_LOAD_TIME).await;
        if self.fail_loads.load(Ordering::SeqCst) {
            Err(ScriptError::new(src, "net::ERR_CONNECTION_REFUSED"))
        } else {
            Ok(())
        }
    }

    fn detach(&self, src: &str) {
        self.detaches.fetch_add(1, Ordering::SeqCst);
        self.tags.lock().unwrap().retain(|t| t != src);
    }
}

/// A container that remembers what it rendered.
#[derive(Default)]
pub struct FakeContainer {
    rendered: Mutex<Option<String>>,
    inits: Mutex<Vec<String>>,
    pub clears: AtomicUsize,
    pub fail_inits: AtomicBool,
}

impl FakeContainer {
    pub fn rendered(&self) -> Option<String> {
        self.rendered.lock().unwrap().clone()
    }

    pub fn inits(&self) -> Vec<String> {
        self.inits.lock().unwrap().clone()
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl WidgetContainer for FakeContainer {
    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        *self.rendered.lock().unwrap() = None;
    }

    fn initialize(&self, options: &InlineWidgetOptions) -> Result<(), WidgetError> {
        self.inits.lock().unwrap().push(options.url.clone());
        if self.fail_inits.load(Ordering::SeqCst) {
            return Err(WidgetError("Calendly is not defined".to_string()));
        }
        *self.rendered.lock().unwrap() = Some(options.url.clone());
        Ok(())
    }
}

pub struct FailingSource;

#[async_trait]
impl EventTypeSource for FailingSource {
    async fn fetch_event_types(&self) -> Result<Vec<MeetingType>, SchedulerError> {
        Err(SchedulerError::EventTypeRequest("connection reset".to_string()))
    }
}

pub fn consultation() -> MeetingType {
    MeetingType::new(
        "https://api.calendly.com/event_types/consultation",
        "Consultation",
        30,
        "https://x/consultation",
    )
}

pub fn call() -> MeetingType {
    MeetingType::new(
        "https://api.calendly.com/event_types/call",
        "Call",
        15,
        "https://x/call",
    )
}

pub fn config() -> LoaderConfig {
    LoaderConfig {
        script_src: SCRIPT_SRC.to_string(),
        fallback_url: FALLBACK_URL.to_string(),
        preferred_keyword: "consultation".to_string(),
        settling_delay: SETTLING_DELAY,
    }
}

pub struct Harness {
    pub doc: Arc<FakeDocument>,
    pub registry: Arc<ScriptRegistry>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_document(FakeDocument::default())
    }

    pub fn with_document(doc: FakeDocument) -> Self {
        let doc = Arc::new(doc);
        let registry = ScriptRegistry::new(doc.clone());
        Self { doc, registry }
    }

    pub fn loader(
        &self,
        source: Arc<dyn EventTypeSource>,
    ) -> (SchedulingWidgetLoader, Arc<FakeContainer>) {
        let container = Arc::new(FakeContainer::default());
        let loader =
            SchedulingWidgetLoader::new(config(), source, self.registry.clone(), container.clone());
        (loader, container)
    }

    pub fn loader_with_types(
        &self,
        types: Vec<MeetingType>,
    ) -> (SchedulingWidgetLoader, Arc<FakeContainer>) {
        self.loader(Arc::new(StaticEventTypeSource::new(types)))
    }
}
