//! HookedMap: an insertion-ordered map whose access surface runs through a
//! hook set.
//!
//! Primitives (`get`, `set`, `delete`) are the only operations that touch
//! the underlying store; everything else is written in terms of them. No
//! store borrow is ever held across a call into user code, so hooks may
//! reenter the map freely.

use crate::hooks::{Hooks, NoHooks};
use crate::suppress::SuppressFlag;
use core::hash::Hash;
use indexmap::IndexMap;
use std::cell::RefCell;

type DefaultRule<K, V> = Box<dyn Fn(&K) -> V>;
type Compositor<K, V, C, H> = Box<dyn Fn(&HookedMap<K, V, C, H>, &K, V) -> V>;

/// An insertion-ordered map from `K` to `V` that invokes the hook set `H`
/// around every primitive access. `C` is an opaque owner context carried for
/// hook implementations; the map never reads it.
///
/// All operations take `&self`; interior mutability lets hooks call back
/// into the same instance on the same stack. The type is `!Send`/`!Sync`.
pub struct HookedMap<K, V, C = (), H = NoHooks> {
    store: RefCell<IndexMap<K, V>>, // never borrowed across user code
    hooks: H,
    context: Option<C>,
    default_rule: Option<DefaultRule<K, V>>,
    compositor: Option<Compositor<K, V, C, H>>,
    suppress: SuppressFlag,
}

impl<K, V> HookedMap<K, V>
where
    K: Eq + Hash,
{
    /// An empty map with pass-through hooks.
    pub fn new() -> Self {
        Self::with_hooks(NoHooks)
    }
}

impl<K, V> Default for HookedMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C, H> HookedMap<K, V, C, H>
where
    K: Eq + Hash,
{
    /// An empty map with the given hook set and no owner context.
    pub fn with_hooks(hooks: H) -> Self {
        Self {
            store: RefCell::new(IndexMap::new()),
            hooks,
            context: None,
            default_rule: None,
            compositor: None,
            suppress: SuppressFlag::new(),
        }
    }

    /// An empty map with the given hook set and owner context.
    pub fn with_context(hooks: H, context: C) -> Self {
        Self {
            context: Some(context),
            ..Self::with_hooks(hooks)
        }
    }

    /// A map seeded with initial contents. Construction predates any
    /// observer, so the seed is committed by raw writes and hooks do not
    /// fire. Mutually exclusive with [`HookedMap::with_default_rule`].
    pub fn seeded<I>(hooks: H, context: Option<C>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let map = Self {
            context,
            ..Self::with_hooks(hooks)
        };
        map.store.borrow_mut().extend(entries);
        map
    }

    /// An empty map with a default-value rule: raw reads of a missing key
    /// yield `rule(key)` instead of absent, without inserting anything.
    /// Mutually exclusive with [`HookedMap::seeded`].
    pub fn with_default_rule<F>(hooks: H, context: Option<C>, rule: F) -> Self
    where
        F: Fn(&K) -> V + 'static,
    {
        Self {
            context,
            default_rule: Some(Box::new(rule)),
            ..Self::with_hooks(hooks)
        }
    }

    /// Configure the merge compositing function. When set, `merge` routes
    /// each incoming value through `compose(self, key, value)` before
    /// calling `set`, allowing combination (e.g. append) instead of
    /// overwrite.
    pub fn with_compositor<F>(mut self, compose: F) -> Self
    where
        F: Fn(&Self, &K, V) -> V + 'static,
    {
        self.compositor = Some(Box::new(compose));
        self
    }

    /// The opaque owner context supplied at construction, for hook
    /// implementations to use.
    pub fn owner_context(&self) -> Option<&C> {
        self.context.as_ref()
    }

    /// The hook set supplied at construction.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn len(&self) -> usize {
        self.store.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.store.borrow().contains_key(key)
    }
}

impl<K, V, C, H> HookedMap<K, V, C, H>
where
    K: Eq + Hash + Clone,
    V: Clone,
    H: Hooks<K, V, C>,
{
    /// Read `key`. Unless suppressed, `pre_get` may veto the read (yielding
    /// `None` without touching the store) and `post_get` may transform the
    /// result.
    pub fn get(&self, key: &K) -> Option<V> {
        let suppressed = self.suppress.is_active();
        if !suppressed && !self.hooks.pre_get(self, key) {
            return None;
        }
        let value = self.read_raw(key);
        if suppressed {
            value
        } else {
            self.hooks.post_get(self, key, value)
        }
    }

    /// Store `value` under `key`. Unless suppressed, `pre_set` chooses the
    /// value actually written, and the caller-visible result is `post_set`'s
    /// return, which is not necessarily what the store holds.
    ///
    /// Re-setting an existing key keeps its insertion-order position.
    pub fn set(&self, key: K, value: V) -> V {
        let suppressed = self.suppress.is_active();
        let value = if suppressed {
            value
        } else {
            self.hooks.pre_set(self, &key, value)
        };
        self.store.borrow_mut().insert(key.clone(), value.clone());
        if suppressed {
            value
        } else {
            self.hooks.post_set(self, &key, value)
        }
    }

    /// Remove `key`. Unless suppressed, `pre_delete` may veto the removal
    /// (yielding `None` with the entry left in place) and the result is
    /// `post_delete`'s return. Removing a missing key is not an error; the
    /// post-hook still runs and receives `None`.
    ///
    /// Removal compacts insertion order (later entries keep their relative
    /// order).
    pub fn delete(&self, key: &K) -> Option<V> {
        let suppressed = self.suppress.is_active();
        if !suppressed && !self.hooks.pre_delete(self, key) {
            return None;
        }
        let removed = self.store.borrow_mut().shift_remove(key);
        if suppressed {
            removed
        } else {
            self.hooks.post_delete(self, key, removed)
        }
    }

    // Raw store read below the hooks. Missing keys fall back to the
    // default-value rule when one is configured; the rule runs with no
    // store borrow held.
    fn read_raw(&self, key: &K) -> Option<V> {
        let found = self.store.borrow().get(key).cloned();
        found.or_else(|| self.default_rule.as_ref().map(|rule| rule(key)))
    }

    /// Set every entry of `other`, in `other`'s order, through the hooked
    /// `set`. Values route through the compositor when one is configured.
    /// Later entries for the same key overwrite earlier ones.
    pub fn merge<I>(&self, other: I) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in other {
            let value = match &self.compositor {
                Some(compose) => compose(self, &key, value),
                None => value,
            };
            self.set(key, value);
        }
        self
    }

    /// `clear` followed by `merge(other)`.
    pub fn replace<I>(&self, other: I) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.clear();
        self.merge(other)
    }

    /// Delete every entry, one hooked `delete` per key present at call
    /// start. A `pre_delete` veto leaves that entry in place.
    pub fn clear(&self) -> &Self {
        self.delete_if(|_, _| true)
    }

    /// Remove and return the first entry in insertion order as
    /// `(key, delete(&key))`; `None` when empty. Goes through the hooked
    /// `delete`, so the value half reflects any post-delete transformation
    /// and a veto yields `(key, None)`.
    pub fn shift(&self) -> Option<(K, Option<V>)> {
        let first = self.store.borrow().keys().next().cloned();
        let key = first?;
        let removed = self.delete(&key);
        Some((key, removed))
    }

    /// Delete every entry for which `pred` holds. Returns `self` for
    /// chaining.
    pub fn delete_if<P>(&self, pred: P) -> &Self
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.sweep(pred);
        self
    }

    /// Delete every entry for which `pred` does not hold. Returns `self`
    /// for chaining.
    pub fn keep_if<P>(&self, mut pred: P) -> &Self
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.sweep(|key, value| !pred(key, value));
        self
    }

    /// Like [`HookedMap::delete_if`], but the return value distinguishes
    /// outcomes: `None` when no entry matched `pred`, `Some(self)` when at
    /// least one did.
    pub fn reject<P>(&self, pred: P) -> Option<&Self>
    where
        P: FnMut(&K, &V) -> bool,
    {
        (self.sweep(pred) > 0).then_some(self)
    }

    /// Like [`HookedMap::keep_if`], but returns `None` when every entry
    /// already satisfied `pred` and `Some(self)` when at least one was
    /// removed.
    pub fn select<P>(&self, mut pred: P) -> Option<&Self>
    where
        P: FnMut(&K, &V) -> bool,
    {
        (self.sweep(|key, value| !pred(key, value)) > 0).then_some(self)
    }

    // Shared traversal for the filter family. The snapshot is taken before
    // any deletion, so deletion hooks may mutate the map mid-sweep without
    // affecting the traversal. Returns the number of matches; a match
    // counts even when pre_delete vetoes the removal, which is what decides
    // the reject/select sentinel.
    fn sweep<P>(&self, mut matches: P) -> usize
    where
        P: FnMut(&K, &V) -> bool,
    {
        let snapshot = self.entries();
        let mut matched = 0;
        for (key, value) in &snapshot {
            if matches(key, value) {
                matched += 1;
                let _ = self.delete(key);
            }
        }
        matched
    }

    /// Insertion-order snapshot of the keys. Raw read; hooks do not fire.
    pub fn keys(&self) -> Vec<K> {
        self.store.borrow().keys().cloned().collect()
    }

    /// Insertion-order snapshot of the entries. Raw read; hooks do not
    /// fire.
    pub fn entries(&self) -> Vec<(K, V)> {
        self.store
            .borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// [`HookedMap::get`] with hook invocation suppressed for this call.
    pub fn get_without_hooks(&self, key: &K) -> Option<V> {
        let _quiet = self.suppress.suppress();
        self.get(key)
    }

    /// [`HookedMap::set`] with hook invocation suppressed for this call.
    pub fn set_without_hooks(&self, key: K, value: V) -> V {
        let _quiet = self.suppress.suppress();
        self.set(key, value)
    }

    /// [`HookedMap::delete`] with hook invocation suppressed for this call.
    pub fn delete_without_hooks(&self, key: &K) -> Option<V> {
        let _quiet = self.suppress.suppress();
        self.delete(key)
    }

    /// [`HookedMap::merge`] with hook invocation suppressed for this call.
    pub fn merge_without_hooks<I>(&self, other: I) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let _quiet = self.suppress.suppress();
        self.merge(other)
    }

    /// [`HookedMap::replace`] with hook invocation suppressed for this
    /// call.
    pub fn replace_without_hooks<I>(&self, other: I) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let _quiet = self.suppress.suppress();
        self.replace(other)
    }

    /// [`HookedMap::clear`] with hook invocation suppressed for this call.
    pub fn clear_without_hooks(&self) -> &Self {
        let _quiet = self.suppress.suppress();
        self.clear()
    }

    /// [`HookedMap::shift`] with hook invocation suppressed for this call.
    pub fn shift_without_hooks(&self) -> Option<(K, Option<V>)> {
        let _quiet = self.suppress.suppress();
        self.shift()
    }

    /// [`HookedMap::delete_if`] with hook invocation suppressed for this
    /// call.
    pub fn delete_if_without_hooks<P>(&self, pred: P) -> &Self
    where
        P: FnMut(&K, &V) -> bool,
    {
        let _quiet = self.suppress.suppress();
        self.delete_if(pred)
    }

    /// [`HookedMap::keep_if`] with hook invocation suppressed for this
    /// call.
    pub fn keep_if_without_hooks<P>(&self, pred: P) -> &Self
    where
        P: FnMut(&K, &V) -> bool,
    {
        let _quiet = self.suppress.suppress();
        self.keep_if(pred)
    }

    /// [`HookedMap::reject`] with hook invocation suppressed for this call.
    pub fn reject_without_hooks<P>(&self, pred: P) -> Option<&Self>
    where
        P: FnMut(&K, &V) -> bool,
    {
        let _quiet = self.suppress.suppress();
        self.reject(pred)
    }

    /// [`HookedMap::select`] with hook invocation suppressed for this call.
    pub fn select_without_hooks<P>(&self, pred: P) -> Option<&Self>
    where
        P: FnMut(&K, &V) -> bool,
    {
        let _quiet = self.suppress.suppress();
        self.select(pred)
    }
}
