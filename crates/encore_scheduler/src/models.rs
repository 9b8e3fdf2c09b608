// --- File: crates/encore_scheduler/src/models.rs ---
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// A bookable slot template offered by the scheduling provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingType {
    pub identifier: String,
    pub display_name: String,
    pub duration_minutes: u32,
    pub scheduling_url: String,
}

impl MeetingType {
    pub fn new(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        duration_minutes: u32,
        scheduling_url: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            duration_minutes,
            scheduling_url: scheduling_url.into(),
        }
    }
}

fn is_absolute_http_url(url: &str) -> bool {
    Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}

/// The meeting types retrieved on mount, in provider order.
///
/// Identifiers are unique, durations positive and URLs absolute; entries
/// breaking any of these are dropped on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingTypeCatalog {
    types: Vec<MeetingType>,
}

impl MeetingTypeCatalog {
    pub fn new(candidates: Vec<MeetingType>) -> Self {
        let mut seen = HashSet::new();
        let mut types = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            if candidate.duration_minutes == 0 {
                warn!(
                    "Dropping meeting type {}: duration must be positive",
                    candidate.identifier
                );
                continue;
            }
            if !is_absolute_http_url(&candidate.scheduling_url) {
                warn!(
                    "Dropping meeting type {}: scheduling URL {:?} is not absolute",
                    candidate.identifier, candidate.scheduling_url
                );
                continue;
            }
            if !seen.insert(candidate.identifier.clone()) {
                warn!("Dropping duplicate meeting type {}", candidate.identifier);
                continue;
            }
            types.push(candidate);
        }

        Self { types }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn get(&self, index: usize) -> Option<&MeetingType> {
        self.types.get(index)
    }

    pub fn position(&self, identifier: &str) -> Option<usize> {
        self.types.iter().position(|t| t.identifier == identifier)
    }

    pub fn as_slice(&self) -> &[MeetingType] {
        &self.types
    }
}

/// Why an attempt ended in [`LoaderState::Failed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    ScriptLoad(String),
    Initialization(String),
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadFailure::ScriptLoad(reason) => write!(f, "script load failed: {}", reason),
            LoadFailure::Initialization(reason) => {
                write!(f, "widget initialization failed: {}", reason)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoaderState {
    #[default]
    Idle,
    FetchingTypes,
    ScriptLoading,
    Initializing,
    Ready,
    Failed(LoadFailure),
}

impl LoaderState {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoaderState::Failed(_))
    }
}

/// Ties a `Ready` state to the widget rendered by one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetHandle {
    pub attempt: u64,
    pub scheduling_url: String,
}

/// Arguments for the external library's inline-widget initialiser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineWidgetOptions {
    pub url: String,
    pub prefill: Map<String, Value>,
    pub utm: Map<String, Value>,
}

impl InlineWidgetOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            prefill: Map::new(),
            utm: Map::new(),
        }
    }
}
