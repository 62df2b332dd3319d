use std::collections::TryReserveError;

use crate::domain::model::PayloadItem;

/// Synthetic records in ascending id order; item `i` is derived from `i` alone.
///
/// The whole buffer is reserved up front, so a size the allocator cannot
/// satisfy comes back as an error instead of aborting the process.
pub fn build_payload(size: u64) -> Result<Vec<PayloadItem>, TryReserveError> {
    let mut items = Vec::new();
    // a size beyond usize can never be reserved; usize::MAX fails the same way
    items.try_reserve_exact(usize::try_from(size).unwrap_or(usize::MAX))?;

    items.extend((0..size).map(|i| PayloadItem {
        id: i,
        name: format!("item-{}", i),
        value: i * 42,
        active: i % 2 == 0,
    }));
    Ok(items)
}
