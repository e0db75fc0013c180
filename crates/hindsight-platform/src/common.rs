use crate::*;

/// Index of the first clickable region whose label matches (ASCII
/// case-insensitive).
pub(crate) fn hit_index_by_label(frame: &Frame, label: &str) -> Option<usize> {
    frame
        .hit_regions
        .iter()
        .position(|h| h.label.eq_ignore_ascii_case(label))
}

pub(crate) fn hit_index_by_id(frame: &Frame, id: u64) -> Option<usize> {
    frame.hit_regions.iter().position(|h| h.id == id)
}
