// --- File: crates/encore_scheduler/src/loader.rs ---
//! The scheduling widget lifecycle.
//!
//! `mount` fetches the meeting types, picks a default, makes sure the
//! external script is loaded and renders the widget. `select` re-runs the
//! script and init steps for another meeting type, `unmount` tears down.
//!
//! Every attempt carries a generation number. Anything that bumps the
//! generation (a new selection, a remount, an unmount) supersedes earlier
//! attempts: their state changes are dropped and they never touch the
//! container. The generation check and the clear+initialize step happen
//! under one lock, so a stale attempt cannot render over a newer one.

use crate::error::{ScriptError, SchedulerError};
use crate::models::{
    InlineWidgetOptions, LoadFailure, LoaderState, MeetingType, MeetingTypeCatalog, WidgetHandle,
};
use crate::script::{ScriptLease, ScriptRegistry};
use crate::selection::default_selection;
use crate::source::EventTypeSource;
use crate::view::SchedulingView;
use crate::widget::WidgetContainer;
use encore_config::SchedulerConfig;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub script_src: String,
    /// Used whenever no meeting type is selected.
    pub fallback_url: String,
    pub preferred_keyword: String,
    /// Wait between script load and widget init, for the script's own
    /// global registration.
    pub settling_delay: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::from(&SchedulerConfig::default())
    }
}

impl From<&SchedulerConfig> for LoaderConfig {
    fn from(config: &SchedulerConfig) -> Self {
        Self {
            script_src: config.script_src.clone(),
            fallback_url: config.fallback_url.clone(),
            preferred_keyword: config.preferred_keyword.clone(),
            settling_delay: Duration::from_millis(config.settling_delay_ms),
        }
    }
}

#[derive(Default)]
struct Inner {
    catalog: MeetingTypeCatalog,
    types_loaded: bool,
    selected: Option<usize>,
    lease: Option<ScriptLease>,
    handle: Option<WidgetHandle>,
    generation: u64,
    mounted: bool,
}

impl Inner {
    fn selected_type(&self) -> Option<&MeetingType> {
        self.selected.and_then(|i| self.catalog.get(i))
    }
}

pub struct SchedulingWidgetLoader {
    config: LoaderConfig,
    source: Arc<dyn EventTypeSource>,
    registry: Arc<ScriptRegistry>,
    container: Arc<dyn WidgetContainer>,
    state: watch::Sender<LoaderState>,
    inner: Mutex<Inner>,
}

impl SchedulingWidgetLoader {
    pub fn new(
        config: LoaderConfig,
        source: Arc<dyn EventTypeSource>,
        registry: Arc<ScriptRegistry>,
        container: Arc<dyn WidgetContainer>,
    ) -> Self {
        let (state, _) = watch::channel(LoaderState::Idle);
        Self {
            config,
            source,
            registry,
            container,
            state,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish `next` if `token` is still the current attempt.
    fn publish(&self, inner: &Inner, token: u64, next: LoaderState) -> bool {
        if inner.generation != token {
            debug!(
                "Discarding {:?} from superseded attempt {} (current {})",
                next, token, inner.generation
            );
            return false;
        }
        self.state.send_replace(next);
        true
    }

    /// Publish a transition and yield so observers can render it.
    async fn transition(&self, token: u64, next: LoaderState) -> bool {
        let current = self.publish(&self.lock(), token, next);
        if current {
            tokio::task::yield_now().await;
        }
        current
    }

    // --- Observation ---

    pub fn state(&self) -> LoaderState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoaderState> {
        self.state.subscribe()
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn selected(&self) -> Option<MeetingType> {
        self.lock().selected_type().cloned()
    }

    pub fn meeting_types(&self) -> Vec<MeetingType> {
        self.lock().catalog.as_slice().to_vec()
    }

    pub fn handle(&self) -> Option<WidgetHandle> {
        self.lock().handle.clone()
    }

    /// The selected meeting's URL, or the fallback.
    pub fn scheduling_link(&self) -> String {
        let inner = self.lock();
        self.link_for(&inner)
    }

    fn link_for(&self, inner: &Inner) -> String {
        inner
            .selected_type()
            .map(|t| t.scheduling_url.clone())
            .unwrap_or_else(|| self.config.fallback_url.clone())
    }

    pub fn view(&self) -> SchedulingView {
        let inner = self.lock();
        let state = self.state.borrow().clone();
        SchedulingView::build(
            &state,
            inner.catalog.as_slice(),
            inner.selected,
            &self.link_for(&inner),
        )
    }

    // --- Lifecycle ---

    /// Start a fresh lifecycle: fetch types, then run the first attempt.
    pub async fn mount(&self) -> LoaderState {
        let token = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.mounted = true;
            inner.generation
        };
        info!("Scheduling widget mounting (attempt {})", token);

        if !self.transition(token, LoaderState::FetchingTypes).await {
            return self.state();
        }
        self.fetch_types(token).await;
        self.run_attempt(token).await
    }

    /// Fetch the meeting types once and compute the default selection.
    ///
    /// A failed or empty fetch leaves the selection unset; the widget then
    /// falls back to the configured URL. It never moves the loader to
    /// `Failed`.
    pub async fn load_meeting_types(&self) {
        let token = self.lock().generation;
        self.fetch_types(token).await;
    }

    async fn fetch_types(&self, token: u64) {
        if self.lock().types_loaded {
            return;
        }

        let result = self.source.fetch_event_types().await;

        let mut inner = self.lock();
        if inner.generation != token || inner.types_loaded {
            debug!("Discarding event types from superseded attempt {}", token);
            return;
        }
        inner.types_loaded = true;

        match result {
            Ok(types) => {
                inner.catalog = MeetingTypeCatalog::new(types);
                inner.selected =
                    default_selection(inner.catalog.as_slice(), &self.config.preferred_keyword);
                match inner.selected_type() {
                    Some(selected) => info!(
                        "Loaded {} meeting types; default is {}",
                        inner.catalog.len(),
                        selected.display_name
                    ),
                    None => info!("No meeting types available; using fallback URL"),
                }
            }
            Err(err) => {
                warn!("Could not load meeting types: {}", err);
            }
        }
    }

    /// Make sure this loader holds a lease on the external script.
    ///
    /// Publishes `ScriptLoading`, and `Failed(ScriptLoad)` if the script
    /// cannot be loaded.
    pub async fn ensure_script_present(&self) -> Result<(), ScriptError> {
        let token = self.lock().generation;
        self.load_script(token).await
    }

    async fn load_script(&self, token: u64) -> Result<(), ScriptError> {
        if !self.transition(token, LoaderState::ScriptLoading).await {
            return Ok(());
        }
        if let Err(err) = self.acquire_script(token).await {
            warn!("Scheduling script unavailable: {}", err);
            self.publish(
                &self.lock(),
                token,
                LoaderState::Failed(LoadFailure::ScriptLoad(err.reason.clone())),
            );
            return Err(err);
        }
        Ok(())
    }

    async fn acquire_script(&self, token: u64) -> Result<(), ScriptError> {
        if self.lock().lease.is_some() {
            return Ok(());
        }

        let lease = self.registry.acquire(&self.config.script_src).await?;

        let mut inner = self.lock();
        if inner.generation == token && inner.lease.is_none() {
            inner.lease = Some(lease);
        }
        // Otherwise the lease is dropped here: either a newer attempt already
        // stored one, or this loader was unmounted meanwhile.
        Ok(())
    }

    /// Wait the settling delay, then clear the container and render the
    /// selected meeting type (or the fallback URL).
    ///
    /// The script lease is acquired first if this loader does not hold one
    /// yet, so the widget is never rendered without its script.
    pub async fn initialize_widget(&self) -> LoaderState {
        let token = self.lock().generation;
        self.run_attempt(token).await
    }

    async fn init_widget(&self, token: u64) -> LoaderState {
        tokio::time::sleep(self.config.settling_delay).await;

        let mut inner = self.lock();
        if inner.generation != token {
            debug!("Skipping widget init for superseded attempt {}", token);
            return self.state.borrow().clone();
        }

        let url = self.link_for(&inner);
        self.container.clear();
        inner.handle = None;

        match self.container.initialize(&InlineWidgetOptions::new(&url)) {
            Ok(()) => {
                info!("Scheduling widget ready for {}", url);
                inner.handle = Some(WidgetHandle {
                    attempt: token,
                    scheduling_url: url,
                });
                self.publish(&inner, token, LoaderState::Ready);
            }
            Err(err) => {
                warn!("Scheduling widget failed to initialise: {}", err);
                self.publish(
                    &inner,
                    token,
                    LoaderState::Failed(LoadFailure::Initialization(err.0)),
                );
            }
        }
        self.state.borrow().clone()
    }

    async fn run_attempt(&self, token: u64) -> LoaderState {
        if self.load_script(token).await.is_err() {
            return self.state();
        }
        if !self.transition(token, LoaderState::Initializing).await {
            return self.state();
        }
        self.init_widget(token).await
    }

    /// Switch to another meeting type and re-render.
    ///
    /// Selecting the current type is a no-op unless the last attempt failed,
    /// in which case it retries. The script lease is kept across selections.
    pub async fn select(&self, identifier: &str) -> Result<LoaderState, SchedulerError> {
        let token = {
            let mut inner = self.lock();
            let index = inner
                .catalog
                .position(identifier)
                .ok_or_else(|| SchedulerError::UnknownMeetingType(identifier.to_string()))?;

            if inner.selected == Some(index) && !self.state.borrow().is_failed() {
                return Ok(self.state());
            }

            inner.selected = Some(index);
            if !inner.mounted {
                return Ok(self.state());
            }
            inner.handle = None;
            inner.generation += 1;
            inner.generation
        };
        info!("Meeting type {} selected (attempt {})", identifier, token);

        Ok(self.run_attempt(token).await)
    }

    /// Tear down: supersede in-flight attempts, clear the container and
    /// release the script lease.
    pub fn unmount(&self) {
        let lease = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.mounted = false;
            inner.handle = None;
            inner.catalog = MeetingTypeCatalog::default();
            inner.selected = None;
            inner.types_loaded = false;
            self.container.clear();
            self.state.send_replace(LoaderState::Idle);
            inner.lease.take()
        };
        drop(lease);
        info!("Scheduling widget unmounted");
    }
}

impl Drop for SchedulingWidgetLoader {
    fn drop(&mut self) {
        let active = {
            let inner = self.lock();
            inner.mounted || inner.lease.is_some() || inner.handle.is_some()
        };
        if active {
            self.unmount();
        }
    }
}
