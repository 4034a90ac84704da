//! Bidirectional host ↔ embedded node id mapping.
//!
//! Both directions are updated together so the two maps stay exact
//! inverses. Host ids handed out by [`IdMap::allocate`] come from a
//! monotonic counter and are never reused for the lifetime of the map.

use crate::ids::{EmbeddedNodeId, HostNodeId};
use std::collections::HashMap;

/// Paired id maps plus the allocation counter.
#[derive(Debug, Clone)]
pub struct IdMap {
    /// Mapping from host ids to embedded ids
    host_to_embedded: HashMap<HostNodeId, EmbeddedNodeId>,
    /// Reverse mapping from embedded ids to host ids
    embedded_to_host: HashMap<EmbeddedNodeId, HostNodeId>,
    /// Next host id to allocate; `None` once `u32::MAX` has been issued
    next_id: Option<u32>,
}

impl IdMap {
    /// Create an empty map whose first allocated host id is `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            host_to_embedded: HashMap::new(),
            embedded_to_host: HashMap::new(),
            next_id: Some(seed),
        }
    }

    /// Bind a caller-chosen host id to an embedded id.
    ///
    /// Used for the synthetic root, whose host id is picked by the host
    /// rather than allocated. Any pair previously involving either id is
    /// evicted first.
    pub fn bind(&mut self, host: HostNodeId, embedded: EmbeddedNodeId) {
        if self.host_to_embedded.get(&host) == Some(&embedded) {
            return;
        }
        if let Some(old_embedded) = self.host_to_embedded.remove(&host) {
            self.embedded_to_host.remove(&old_embedded);
        }
        if let Some(old_host) = self.embedded_to_host.remove(&embedded) {
            log::debug!("Rebinding {} from {} to {}", embedded, old_host, host);
            self.host_to_embedded.remove(&old_host);
        }
        self.host_to_embedded.insert(host, embedded);
        self.embedded_to_host.insert(embedded, host);
    }

    /// Host id for `embedded`, allocating a fresh one if it is not mapped yet.
    ///
    /// Returns `None` when `embedded` is unmapped and the host id space is
    /// exhausted.
    pub fn allocate(&mut self, embedded: EmbeddedNodeId) -> Option<HostNodeId> {
        if let Some(host) = self.embedded_to_host.get(&embedded) {
            return Some(*host);
        }
        let host = HostNodeId(self.next_id?);
        self.next_id = host.0.checked_add(1);
        log::trace!("Mapped {} -> {}", embedded, host);
        self.host_to_embedded.insert(host, embedded);
        self.embedded_to_host.insert(embedded, host);
        Some(host)
    }

    /// Get the host id for an embedded id.
    pub fn host_for(&self, embedded: EmbeddedNodeId) -> Option<HostNodeId> {
        self.embedded_to_host.get(&embedded).copied()
    }

    /// Get the embedded id for a host id.
    pub fn embedded_for(&self, host: HostNodeId) -> Option<EmbeddedNodeId> {
        self.host_to_embedded.get(&host).copied()
    }

    /// Number of mapped pairs.
    pub fn len(&self) -> usize {
        self.host_to_embedded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.host_to_embedded.is_empty()
    }

    /// The host id the next allocation will return, if any is left.
    pub fn next_id(&self) -> Option<u32> {
        self.next_id
    }

    /// Iterate over all mapped pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (HostNodeId, EmbeddedNodeId)> + '_ {
        self.host_to_embedded.iter().map(|(h, e)| (*h, *e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_inverse(map: &IdMap) {
        assert_eq!(map.host_to_embedded.len(), map.embedded_to_host.len());
        for (host, embedded) in map.iter() {
            assert_eq!(map.host_for(embedded), Some(host));
        }
    }

    #[test]
    fn test_allocate_is_sequential_and_stable() {
        let mut map = IdMap::new(5000);
        let a = map.allocate(EmbeddedNodeId(100));
        let b = map.allocate(EmbeddedNodeId(101));
        assert_eq!(a, Some(HostNodeId(5000)));
        assert_eq!(b, Some(HostNodeId(5001)));
        assert_eq!(map.allocate(EmbeddedNodeId(100)), a);
        assert_eq!(map.next_id(), Some(5002));
        assert_eq!(map.len(), 2);
        assert_inverse(&map);
    }

    #[test]
    fn test_bind_evicts_stale_pairs() {
        let mut map = IdMap::new(5000);
        map.bind(HostNodeId(0), EmbeddedNodeId(-1));
        map.bind(HostNodeId(0), EmbeddedNodeId(7));
        assert_eq!(map.host_for(EmbeddedNodeId(-1)), None);
        assert_eq!(map.embedded_for(HostNodeId(0)), Some(EmbeddedNodeId(7)));

        map.bind(HostNodeId(3), EmbeddedNodeId(7));
        assert_eq!(map.embedded_for(HostNodeId(0)), None);
        assert_eq!(map.host_for(EmbeddedNodeId(7)), Some(HostNodeId(3)));
        assert_eq!(map.len(), 1);
        assert_inverse(&map);
    }

    #[test]
    fn test_bind_does_not_touch_counter() {
        let mut map = IdMap::new(5000);
        map.bind(HostNodeId(1), EmbeddedNodeId(1));
        assert_eq!(map.next_id(), Some(5000));
        assert!(!map.is_empty());
    }

    #[test]
    fn test_allocate_stops_at_end_of_id_space() {
        let mut map = IdMap::new(u32::MAX);
        assert_eq!(map.allocate(EmbeddedNodeId(1)), Some(HostNodeId(u32::MAX)));
        assert_eq!(map.next_id(), None);
        assert_eq!(map.allocate(EmbeddedNodeId(2)), None);
        // Already mapped ids still resolve.
        assert_eq!(map.allocate(EmbeddedNodeId(1)), Some(HostNodeId(u32::MAX)));
        assert_eq!(map.len(), 1);
        assert_inverse(&map);
    }
}
