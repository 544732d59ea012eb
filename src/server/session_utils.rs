use actix::Addr;
use std::collections::HashMap;
use std::hash::Hash;
use std::cmp::PartialEq;
use uuid::Uuid;

use crate::server::sim_session::session::ViewerSession;

/// Generic check that the address stored for `key` is the expected one.
/// Returns true if the address matches.
pub fn is_addr_valid<K, V, A>(
    map: &HashMap<K, V>,
    key: &K,
    addr: &A,
    addr_extractor: impl Fn(&V) -> &A,
) -> bool
where
    K: Eq + Hash,
    A: PartialEq,
{
    map.get(key).is_some_and(|value| addr_extractor(value) == addr)
}

/// Checks that `addr` is the session registered for this viewer.
/// A reconnecting viewer replaces its old entry, so a late unregister from the
/// old socket must not remove the new one.
pub fn is_viewer_addr_valid(
    viewers: &HashMap<Uuid, Addr<ViewerSession>>,
    viewer_id: &Uuid,
    addr: &Addr<ViewerSession>,
) -> bool {
    is_addr_valid(viewers, viewer_id, addr, |a| a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_addr_valid() {
        let mut map = HashMap::new();
        map.insert("a", ("a-addr", 1));
        map.insert("b", ("b-addr", 2));

        assert!(is_addr_valid(&map, &"a", &"a-addr", |v| &v.0));
        assert!(!is_addr_valid(&map, &"a", &"b-addr", |v| &v.0));
        assert!(!is_addr_valid(&map, &"c", &"a-addr", |v| &v.0));
    }
}
