//! Hook-suppression flag with scoped acquisition.
//!
//! Single-threaded structure backing the `*_without_hooks` operation
//! variants. Acquiring the flag returns an RAII guard; the prior value is
//! restored when the guard drops, on normal return and during unwinding
//! alike, so a failing hook or predicate can never leave the map stuck in
//! suppressed mode.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-instance suppression flag. Embed this in a struct and wrap exactly
/// one call with `let _quiet = self.suppress.suppress();`.
#[derive(Debug)]
pub(crate) struct SuppressFlag {
    active: Cell<bool>,
    // Keep !Send + !Sync in line with single-threaded design.
    _nosend: PhantomData<*mut ()>,
}

impl SuppressFlag {
    /// Create an inactive flag. Const so it can be a field default.
    pub(crate) const fn new() -> Self {
        Self {
            active: Cell::new(false),
            _nosend: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Activate suppression for the guard's lifetime. The prior value is
    /// saved and restored on drop, so an acquisition nested inside a hook
    /// that itself ran suppressed unwinds to the correct state.
    #[inline]
    pub(crate) fn suppress(&self) -> SuppressGuard<'_> {
        let prev = self.active.replace(true);
        SuppressGuard { owner: self, prev }
    }
}

/// RAII guard returned by `SuppressFlag::suppress`.
pub(crate) struct SuppressGuard<'a> {
    owner: &'a SuppressFlag,
    prev: bool,
}

impl Drop for SuppressGuard<'_> {
    fn drop(&mut self) {
        self.owner.active.set(self.prev);
    }
}
