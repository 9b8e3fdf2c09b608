// --- File: crates/encore_scheduler/src/selection.rs ---
use crate::models::MeetingType;

/// Index of the default meeting type: the first whose display name contains
/// `keyword` (case-insensitive), else the first entry. `None` when empty.
pub fn default_selection(types: &[MeetingType], keyword: &str) -> Option<usize> {
    if types.is_empty() {
        return None;
    }
    let keyword = keyword.to_lowercase();
    if keyword.is_empty() {
        return Some(0);
    }
    types
        .iter()
        .position(|t| t.display_name.to_lowercase().contains(&keyword))
        .or(Some(0))
}
