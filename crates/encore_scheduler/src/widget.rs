// --- File: crates/encore_scheduler/src/widget.rs ---
use crate::error::WidgetError;
use crate::models::InlineWidgetOptions;

/// The page element the external library renders into.
///
/// Both calls are synchronous: the library's initialiser renders in place or
/// throws.
pub trait WidgetContainer: Send + Sync {
    /// Remove whatever is currently rendered.
    fn clear(&self);

    /// Ask the external library to render an inline widget.
    fn initialize(&self, options: &InlineWidgetOptions) -> Result<(), WidgetError>;
}
