use indexmap::IndexMap;

use crate::error::{AppError, DocumentKind};

/// Rebuild `current` in the requested order.
///
/// Requested names come first, in request order; unknown names and repeats
/// are skipped. Entries the request did not mention follow in their previous
/// relative order, so nothing is ever dropped.
pub fn reorder_map<V>(
    mut current: IndexMap<String, V>,
    requested: &[String],
) -> IndexMap<String, V> {
    let mut reordered = IndexMap::with_capacity(current.len());
    for name in requested {
        if let Some(value) = current.shift_remove(name) {
            reordered.insert(name.clone(), value);
        }
    }
    reordered.extend(current);
    reordered
}

/// Full order produced by dragging `name` to position `to_index`.
/// Indexes past the end clamp to the last slot.
pub fn move_name(
    order: &[String],
    name: &str,
    to_index: usize,
    document: DocumentKind,
) -> Result<Vec<String>, AppError> {
    let from = order
        .iter()
        .position(|n| n == name)
        .ok_or_else(|| AppError::not_found(name, document))?;
    let mut out = order.to_vec();
    let item = out.remove(from);
    let to = to_index.min(out.len());
    out.insert(to, item);
    Ok(out)
}
