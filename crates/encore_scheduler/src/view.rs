// --- File: crates/encore_scheduler/src/view.rs ---
use crate::models::{LoaderState, MeetingType};
use serde::Serialize;

/// What the scheduling section shows in its main area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchedulingSurface {
    /// Spinner while types, script or widget are loading.
    Loading,
    /// The embedded widget is live for `url`.
    Widget { url: String },
    /// Plain link to the external booking page.
    FallbackLink { url: String },
}

/// One entry of the meeting-type picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingChoice {
    pub identifier: String,
    pub label: String,
    pub selected: bool,
}

impl MeetingChoice {
    fn from_meeting_type(meeting_type: &MeetingType, selected: bool) -> Self {
        Self {
            identifier: meeting_type.identifier.clone(),
            label: format!(
                "{} ({} min)",
                meeting_type.display_name, meeting_type.duration_minutes
            ),
            selected,
        }
    }
}

/// Presentation model of the scheduling section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulingView {
    pub surface: SchedulingSurface,
    /// Only filled when there is an actual choice to make.
    pub choices: Vec<MeetingChoice>,
}

impl SchedulingView {
    /// `link` is the selected meeting's URL, or the fallback when nothing is
    /// selected.
    pub fn build(
        state: &LoaderState,
        types: &[MeetingType],
        selected: Option<usize>,
        link: &str,
    ) -> Self {
        let surface = match state {
            LoaderState::FetchingTypes | LoaderState::ScriptLoading | LoaderState::Initializing => {
                SchedulingSurface::Loading
            }
            LoaderState::Ready => SchedulingSurface::Widget {
                url: link.to_string(),
            },
            LoaderState::Idle | LoaderState::Failed(_) => SchedulingSurface::FallbackLink {
                url: link.to_string(),
            },
        };

        let choices = if types.len() > 1 {
            types
                .iter()
                .enumerate()
                .map(|(i, t)| MeetingChoice::from_meeting_type(t, selected == Some(i)))
                .collect()
        } else {
            Vec::new()
        };

        Self { surface, choices }
    }
}
