//! The hook contract: six override points invoked around the map primitives.

use crate::hooked_map::HookedMap;

/// Override points invoked around [`HookedMap`]'s primitive operations.
/// Every method has a pass-through default, so an implementation overrides
/// only the points it cares about.
///
/// Hooks take `&self` and receive the map they are attached to: a hook may
/// reenter the map (e.g. a `post_set` that stores a derived entry under
/// another key) and reach the owner context via
/// [`HookedMap::owner_context`]. Because reentrant calls go through a shared
/// borrow, hook-local state lives in `Cell`/`RefCell` fields.
///
/// "Absent" is `None` throughout: `post_get` and `post_delete` run for
/// missing keys too and may substitute a value.
///
/// Hooks do not observe suppression. During a `*_without_hooks` call they
/// are simply never invoked.
pub trait Hooks<K, V, C = ()> {
    /// Called before a value is stored; the return value is stored in its
    /// place.
    fn pre_set(&self, map: &HookedMap<K, V, C, Self>, key: &K, value: V) -> V
    where
        Self: Sized,
    {
        let _ = (map, key);
        value
    }

    /// Called after the store is committed; the return value becomes the
    /// result of `set` (the store keeps `stored` regardless).
    fn post_set(&self, map: &HookedMap<K, V, C, Self>, key: &K, stored: V) -> V
    where
        Self: Sized,
    {
        let _ = (map, key);
        stored
    }

    /// Called before a read; returning `false` vetoes it, and `get` yields
    /// `None` without touching the store or running `post_get`.
    fn pre_get(&self, map: &HookedMap<K, V, C, Self>, key: &K) -> bool
    where
        Self: Sized,
    {
        let _ = (map, key);
        true
    }

    /// Called after a read; the return value becomes the result of `get`.
    fn post_get(&self, map: &HookedMap<K, V, C, Self>, key: &K, value: Option<V>) -> Option<V>
    where
        Self: Sized,
    {
        let _ = (map, key);
        value
    }

    /// Called before a removal; returning `false` vetoes it, and `delete`
    /// yields `None` with the entry left in place.
    fn pre_delete(&self, map: &HookedMap<K, V, C, Self>, key: &K) -> bool
    where
        Self: Sized,
    {
        let _ = (map, key);
        true
    }

    /// Called after a removal; the return value becomes the result of
    /// `delete`, including when the removal was initiated by `shift` or by
    /// one of the filter operations.
    fn post_delete(&self, map: &HookedMap<K, V, C, Self>, key: &K, removed: Option<V>) -> Option<V>
    where
        Self: Sized,
    {
        let _ = (map, key);
        removed
    }
}

/// Pass-through hook set; leaves every default in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoHooks;

impl<K, V, C> Hooks<K, V, C> for NoHooks {}
