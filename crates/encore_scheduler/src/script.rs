// --- File: crates/encore_scheduler/src/script.rs ---
//! Shared loading of the external widget script.
//!
//! Every loader acquires a [`ScriptLease`] from one [`ScriptRegistry`] instead
//! of inspecting the document itself. The registry attaches a given source at
//! most once, lets concurrent acquirers wait on the same load, and detaches
//! the tag when the last lease is dropped. A tag that was already in the
//! document before the registry saw it is never removed.

use crate::error::ScriptError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// The document the script tag lives in.
#[async_trait]
pub trait ScriptHost: Send + Sync {
    /// Whether a tag with this source is already present.
    fn is_attached(&self, src: &str) -> bool;

    /// Insert a tag and resolve once it has loaded (or failed to).
    async fn attach(&self, src: &str) -> Result<(), ScriptError>;

    /// Remove the tag with this source, if any.
    fn detach(&self, src: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScriptStatus {
    Loading,
    Loaded,
    Failed(String),
}

struct Entry {
    id: u64,
    holders: usize,
    /// The registry inserted the tag, so it may remove it.
    owned: bool,
    status: watch::Sender<ScriptStatus>,
}

#[derive(Default)]
struct Entries {
    next_id: u64,
    by_src: HashMap<String, Entry>,
}

pub struct ScriptRegistry {
    host: Arc<dyn ScriptHost>,
    entries: Mutex<Entries>,
}

enum Role {
    Attach(watch::Receiver<ScriptStatus>),
    Wait(watch::Receiver<ScriptStatus>),
    Ready,
}

impl ScriptRegistry {
    pub fn new(host: Arc<dyn ScriptHost>) -> Arc<Self> {
        Arc::new(Self {
            host,
            entries: Mutex::new(Entries::default()),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of live leases for `src`.
    pub fn holders(&self, src: &str) -> usize {
        self.lock().by_src.get(src).map_or(0, |e| e.holders)
    }

    /// Obtain a lease on `src`, loading it first if needed.
    ///
    /// The load itself runs on its own task, so dropping the returned future
    /// only gives this holder's slot back. Other acquirers keep waiting on the
    /// same load; if nobody is left, the tag is removed once it settles.
    pub async fn acquire(self: &Arc<Self>, src: &str) -> Result<ScriptLease, ScriptError> {
        let (lease, role) = {
            let mut guard = self.lock();
            let entries = &mut *guard;
            let next_id = entries.next_id;

            let (entry_id, role) = match entries.by_src.get_mut(src) {
                Some(entry) => {
                    entry.holders += 1;
                    let loaded = *entry.status.borrow() == ScriptStatus::Loaded;
                    let role = if loaded {
                        Role::Ready
                    } else {
                        Role::Wait(entry.status.subscribe())
                    };
                    (entry.id, role)
                }
                None => {
                    let present = self.host.is_attached(src);
                    let initial = if present {
                        ScriptStatus::Loaded
                    } else {
                        ScriptStatus::Loading
                    };
                    let (status, rx) = watch::channel(initial);
                    entries.by_src.insert(
                        src.to_string(),
                        Entry {
                            id: next_id,
                            holders: 1,
                            owned: !present,
                            status,
                        },
                    );
                    entries.next_id += 1;
                    if present {
                        debug!("Script {} already in document; reusing it", src);
                        (next_id, Role::Ready)
                    } else {
                        (next_id, Role::Attach(rx))
                    }
                }
            };

            let lease = ScriptLease {
                registry: Arc::clone(self),
                src: src.to_string(),
                entry_id,
            };
            (lease, role)
        };

        match role {
            Role::Ready => Ok(lease),
            Role::Wait(status) => Self::wait_loaded(src, status).await.map(|()| lease),
            Role::Attach(status) => {
                info!("Attaching script {}", src);
                let registry = Arc::clone(self);
                let (load_src, entry_id) = (src.to_string(), lease.entry_id);
                tokio::spawn(async move { registry.load(&load_src, entry_id).await });
                Self::wait_loaded(src, status).await.map(|()| lease)
            }
        }
    }

    async fn wait_loaded(
        src: &str,
        mut status: watch::Receiver<ScriptStatus>,
    ) -> Result<(), ScriptError> {
        let outcome = status
            .wait_for(|s| *s != ScriptStatus::Loading)
            .await
            .map(|s| s.clone());
        match outcome {
            Ok(ScriptStatus::Loaded) => Ok(()),
            Ok(ScriptStatus::Failed(reason)) => Err(ScriptError::new(src, reason)),
            Ok(ScriptStatus::Loading) | Err(_) => {
                Err(ScriptError::new(src, "script load abandoned"))
            }
        }
    }

    fn is_current(&self, src: &str, entry_id: u64) -> bool {
        self.lock().by_src.get(src).is_some_and(|e| e.id == entry_id)
    }

    /// Attach `src` and publish the outcome to the entry's waiters.
    async fn load(&self, src: &str, entry_id: u64) {
        if !self.is_current(src, entry_id) {
            debug!("Every holder of {} left before the load started", src);
            return;
        }
        match self.host.attach(src).await {
            Ok(()) => self.finish_load(src, entry_id),
            Err(err) => {
                warn!("Script {} failed to load: {}", src, err.reason);
                self.fail_load(src, entry_id, &err.reason);
            }
        }
    }

    fn finish_load(&self, src: &str, entry_id: u64) {
        let entries = self.lock();
        match entries.by_src.get(src) {
            Some(entry) if entry.id == entry_id => {
                entry.status.send_replace(ScriptStatus::Loaded);
            }
            // A newer entry adopted the tag as already present.
            Some(_) => debug!("Script {} loaded for a replaced entry", src),
            None => {
                debug!("Script {} loaded after its last lease was released", src);
                self.host.detach(src);
            }
        }
    }

    /// Drop the entry and any partially inserted tag so a later acquire
    /// starts from scratch.
    fn fail_load(&self, src: &str, entry_id: u64, reason: &str) {
        let mut entries = self.lock();
        let Some(current) = entries.by_src.get(src).map(|e| e.id) else {
            self.host.detach(src);
            return;
        };
        if current != entry_id {
            return;
        }
        if let Some(entry) = entries.by_src.remove(src) {
            self.host.detach(src);
            entry
                .status
                .send_replace(ScriptStatus::Failed(reason.to_string()));
        }
    }

    fn release(&self, src: &str, entry_id: u64) {
        let mut entries = self.lock();
        let Some(entry) = entries.by_src.get_mut(src).filter(|e| e.id == entry_id) else {
            return;
        };
        entry.holders = entry.holders.saturating_sub(1);
        if entry.holders > 0 {
            return;
        }
        let owned = entry.owned;
        entries.by_src.remove(src);
        if owned {
            info!("Last lease on {} released; detaching script", src);
            self.host.detach(src);
        } else {
            debug!("Last lease on {} released; tag was not ours", src);
        }
    }
}

/// Keeps the script in the document while held.
pub struct ScriptLease {
    registry: Arc<ScriptRegistry>,
    src: String,
    entry_id: u64,
}

impl ScriptLease {
    pub fn src(&self) -> &str {
        &self.src
    }
}

impl std::fmt::Debug for ScriptLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptLease")
            .field("src", &self.src)
            .field("entry_id", &self.entry_id)
            .finish()
    }
}

impl Drop for ScriptLease {
    fn drop(&mut self) {
        self.registry.release(&self.src, self.entry_id);
    }
}
