use crate::models::{Item, Locality};

/// Move items local to the preferred region to the front of the list
///
/// This is a stable partition on a boolean key: items inside each group keep
/// their original relative order. `Locality::Global` leaves the list as is.
pub fn partition_by_locality(items: &mut [Item], locality: &Locality) {
    if let Some(region) = locality.region() {
        // sort_by_key is stable; `false` (local) orders before `true`
        items.sort_by_key(|item| !item.is_local_to(region));
    }
}

/// Number of items whose location matches the region
pub fn count_local(items: &[Item], locality: &Locality) -> usize {
    match locality.region() {
        Some(region) => items.iter().filter(|item| item.is_local_to(region)).count(),
        None => 0,
    }
}
