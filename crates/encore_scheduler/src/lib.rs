// --- File: crates/encore_scheduler/src/lib.rs ---
//! Embedded scheduling widget.
//!
//! [`SchedulingWidgetLoader`] drives one embedded booking widget: it fetches
//! the meeting types through an [`EventTypeSource`], shares the external
//! script with other loaders through a [`ScriptRegistry`], and renders into a
//! [`WidgetContainer`]. Browser specifics stay behind those traits.
//!
//! ```no_run
//! use encore_scheduler::{
//!     LoaderConfig, ProxyEventTypeSource, ScriptHost, ScriptRegistry, SchedulingWidgetLoader,
//!     WidgetContainer,
//! };
//! use std::sync::Arc;
//!
//! async fn show(host: Arc<dyn ScriptHost>, container: Arc<dyn WidgetContainer>) {
//!     let registry = ScriptRegistry::new(host);
//!     let loader = SchedulingWidgetLoader::new(
//!         LoaderConfig::default(),
//!         Arc::new(ProxyEventTypeSource::new("https://artist.example/api/calendly")),
//!         registry,
//!         container,
//!     );
//!     let state = loader.mount().await;
//!     println!("{:?} -> {:?}", state, loader.view().surface);
//! }
//! ```
pub mod error;
pub mod loader;
pub mod models;
pub mod script;
pub mod selection;
pub mod source;
pub mod view;
pub mod widget;

pub use error::{SchedulerError, ScriptError, WidgetError};
pub use loader::{LoaderConfig, SchedulingWidgetLoader};
pub use models::{
    InlineWidgetOptions, LoadFailure, LoaderState, MeetingType, MeetingTypeCatalog, WidgetHandle,
};
pub use script::{ScriptHost, ScriptLease, ScriptRegistry};
pub use selection::default_selection;
pub use source::{parse_event_types, EventTypeSource, ProxyEventTypeSource, StaticEventTypeSource};
pub use view::{MeetingChoice, SchedulingSurface, SchedulingView};
pub use widget::WidgetContainer;
