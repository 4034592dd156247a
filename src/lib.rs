//! hooked-map: a single-threaded, insertion-ordered map that routes every
//! get/set/delete through overridable pre/post hooks.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: layer an interception protocol over an ordered map so a hook set
//!   supplied at construction can observe, veto, and transform every access,
//!   while the bulk operations decompose into the same three primitives and
//!   therefore inherit hook semantics for free.
//! - Layers:
//!   - SuppressFlag/SuppressGuard: scoped acquisition of the per-call
//!     hook-suppression flag backing the `*_without_hooks` variants; the
//!     guard restores the flag on every exit path, including unwinding.
//!   - Hooks<K, V, C>: the six-point contract (pre/post x set/get/delete)
//!     with pass-through defaults; NoHooks is the inert implementation.
//!   - HookedMap<K, V, C, H>: the container. Primitives run
//!     pre-hook -> raw store operation -> post-hook; bulk operations
//!     (merge, replace, clear, shift, delete_if, keep_if, select, reject)
//!     are written purely in terms of the primitives and never touch the
//!     store directly.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` by design (Cell-based flag, no
//!   atomics).
//! - Insertion order: iteration, `shift`, and removal compaction follow the
//!   order entries were first inserted (IndexMap semantics; re-setting an
//!   existing key keeps its position).
//! - The store is never borrowed across a call into user code (hooks,
//!   predicates, the merge compositor, the default-value rule).
//!
//! Reentrancy policy and interior mutability
//! - Operations take `&self` over a RefCell store, so a hook handed the map
//!   may call straight back into any public operation on the same stack
//!   (e.g. a `post_set` that stores a derived entry under another key).
//!   Every store borrow is scoped to a single statement and released before
//!   user code runs. Reentrant mutation is expected and supported;
//!   concurrent access is not.
//! - Hook methods take `&self`, so reentrant invocation is a shared borrow;
//!   stateful hook sets keep their state in Cell/RefCell fields.
//!
//! Failure semantics
//! - A panicking hook propagates to the caller of the primitive; nothing is
//!   rolled back. Bulk operations keep the prefix committed before the
//!   failure and never process the rest. The suppression guard restores its
//!   flag during unwind, so a failing `*_without_hooks` call cannot leave
//!   hooks disabled.
//!
//! Notes and non-goals
//! - Not thread-safe and not lock-protected; serialize access externally if
//!   an instance must be shared.
//! - No transactional or atomic bulk operations.
//! - No own hashing or storage layout; the crate wraps IndexMap's storage
//!   and intercepts the access surface only.
//! - The owner context `C` is carried for hook implementations to reach
//!   (e.g. a parent object) and is never read by the map itself.

mod hooked_map;
mod hooked_map_proptest;
mod hooks;
mod suppress;

// Public surface
pub use hooked_map::HookedMap;
pub use hooks::{Hooks, NoHooks};
