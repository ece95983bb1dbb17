use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use slotmap::{Key, SecondaryMap, SlotMap};
use uuid::Uuid;

// Internal data structure, protected by a lock.
struct StorageInner<H: Key, T> {
    map: SlotMap<H, Arc<T>>,
    lookup: FxHashMap<Uuid, H>,
    ids: SecondaryMap<H, Uuid>,
    paths: SecondaryMap<H, PathBuf>,
}

impl<H: Key, T> Default for StorageInner<H, T> {
    fn default() -> Self {
        Self {
            map: SlotMap::default(),
            lookup: FxHashMap::default(),
            ids: SecondaryMap::default(),
            paths: SecondaryMap::default(),
        }
    }
}

/// Typed resource registry.
///
/// Resources are stored fully built behind an `Arc` and never mutated in
/// place, so a handle only becomes visible once its value is complete. Every
/// entry carries a unique id and, once persisted, the path it was written to
/// or read from.
pub struct AssetStorage<H: Key, T> {
    inner: RwLock<StorageInner<H, T>>,
}

impl<H: Key, T> Default for AssetStorage<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Key, T> AssetStorage<H, T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::default(),
        }
    }

    /// [Write] Adds a resource under a fresh id.
    pub fn add(&self, asset: impl Into<T>) -> H {
        self.add_with_uuid(Uuid::new_v4(), asset)
    }

    /// [Write] Adds a resource under `uuid`. If the id is already registered
    /// the existing handle is returned and `asset` is dropped.
    pub fn add_with_uuid(&self, uuid: Uuid, asset: impl Into<T>) -> H {
        let mut guard = self.inner.write();
        if let Some(&handle) = guard.lookup.get(&uuid) {
            return handle;
        }
        let handle = guard.map.insert(Arc::new(asset.into()));
        guard.lookup.insert(uuid, handle);
        guard.ids.insert(handle, uuid);
        handle
    }

    /// [Write] Records where a resource is persisted.
    pub fn set_path(&self, handle: H, path: impl Into<PathBuf>) {
        let mut guard = self.inner.write();
        if guard.map.contains_key(handle) {
            guard.paths.insert(handle, path.into());
        }
    }

    /// [Write] Removes a resource. Outstanding `Arc`s stay valid.
    pub fn remove(&self, handle: H) -> Option<Arc<T>> {
        let mut guard = self.inner.write();
        let asset = guard.map.remove(handle)?;
        if let Some(uuid) = guard.ids.remove(handle) {
            guard.lookup.remove(&uuid);
        }
        guard.paths.remove(handle);
        Some(asset)
    }

    /// [Read] Gets a single resource.
    pub fn get(&self, handle: H) -> Option<Arc<T>> {
        let guard = self.inner.read();
        guard.map.get(handle).cloned()
    }

    pub fn get_by_uuid(&self, uuid: &Uuid) -> Option<Arc<T>> {
        let guard = self.inner.read();
        let handle = guard.lookup.get(uuid)?;
        guard.map.get(*handle).cloned()
    }

    pub fn get_handle_by_uuid(&self, uuid: &Uuid) -> Option<H> {
        let guard = self.inner.read();
        guard.lookup.get(uuid).copied()
    }

    pub fn uuid_of(&self, handle: H) -> Option<Uuid> {
        let guard = self.inner.read();
        guard.ids.get(handle).copied()
    }

    pub fn path_of(&self, handle: H) -> Option<PathBuf> {
        let guard = self.inner.read();
        guard.paths.get(handle).cloned()
    }

    /// Finds the resource persisted at `path`.
    pub fn find_by_path(&self, path: &Path) -> Option<H> {
        let guard = self.inner.read();
        guard
            .paths
            .iter()
            .find_map(|(handle, p)| (p == path).then_some(handle))
    }

    pub fn len(&self) -> usize {
        self.inner.read().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().map.is_empty()
    }
}
