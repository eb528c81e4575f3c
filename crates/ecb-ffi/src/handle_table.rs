use std::collections::HashMap;
use std::sync::Arc;

use ecb_cipher::AesBlockCipher;
use parking_lot::RwLock;

use crate::EcbHandle;

/// Maps live handles to the contexts they own.
///
/// Lookups hand out an `Arc` so a context released on one thread stays alive
/// until an encryption already running on another thread finishes with it.
#[derive(Default)]
pub(crate) struct HandleTable {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<EcbHandle, Arc<AesBlockCipher>>,
    next_id: u64,
}

impl HandleTable {
    pub(crate) fn insert(&self, cipher: AesBlockCipher) -> EcbHandle {
        let mut inner = self.inner.write();
        let handle = loop {
            inner.next_id = inner.next_id.wrapping_add(1);
            let candidate = EcbHandle(inner.next_id);
            if !candidate.is_null() && !inner.entries.contains_key(&candidate) {
                break candidate;
            }
        };
        inner.entries.insert(handle, Arc::new(cipher));
        handle
    }

    pub(crate) fn get(&self, handle: EcbHandle) -> Option<Arc<AesBlockCipher>> {
        self.inner.read().entries.get(&handle).cloned()
    }

    pub(crate) fn remove(&self, handle: EcbHandle) -> Option<Arc<AesBlockCipher>> {
        self.inner.write().entries.remove(&handle)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner.read().entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> AesBlockCipher {
        AesBlockCipher::new(&[0u8; 16]).unwrap()
    }

    #[test]
    fn handles_are_unique_and_never_null() {
        let table = HandleTable::default();
        let a = table.insert(cipher());
        let b = table.insert(cipher());
        assert_ne!(a, b);
        assert!(!a.is_null() && !b.is_null());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn removed_handles_no_longer_resolve() {
        let table = HandleTable::default();
        let handle = table.insert(cipher());
        assert!(table.get(handle).is_some());
        assert!(table.remove(handle).is_some());
        assert!(table.get(handle).is_none());
        assert!(table.remove(handle).is_none());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn ids_are_not_reused_after_release() {
        let table = HandleTable::default();
        let first = table.insert(cipher());
        table.remove(first);
        let second = table.insert(cipher());
        assert_ne!(first, second);
    }

    #[test]
    fn counter_wraps_past_null_and_live_ids() {
        let table = HandleTable::default();
        table.inner.write().next_id = u64::MAX - 1;
        let last = table.insert(cipher());
        assert_eq!(last, EcbHandle(u64::MAX));
        let wrapped = table.insert(cipher());
        assert_eq!(wrapped, EcbHandle(1));
    }

    #[test]
    fn lookup_outlives_release() {
        let table = HandleTable::default();
        let handle = table.insert(cipher());
        let in_flight = table.get(handle).unwrap();
        drop(table.remove(handle));
        let mut block = [0u8; 16];
        assert_eq!(in_flight.encrypt_in_place(&mut block), Ok(16));
    }
}
