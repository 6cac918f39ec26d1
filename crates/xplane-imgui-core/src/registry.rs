//! Insertion-ordered registry of render callbacks with visibility flags.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{OverlayError, Result};

/// Opaque token identifying one registration.
///
/// Returned when a callback is registered and used solely for removal, so
/// "same registration" never has to be answered by comparing closures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub(crate) u64);

impl RenderHandle {
    /// The monotonically assigned id behind this handle.
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Cloneable handle to an externally stored visibility flag.
///
/// The registry holds one of these per entry without owning the caller's
/// toggle; menus, render callbacks, and the owner can all flip the same
/// flag through their own clones.
#[derive(Debug, Clone)]
pub struct VisibilityFlag(Arc<AtomicBool>);

impl VisibilityFlag {
    /// Creates a flag with the given initial state.
    #[must_use]
    pub fn new(visible: bool) -> Self {
        Self(Arc::new(AtomicBool::new(visible)))
    }

    /// Current state.
    #[must_use]
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Sets the state.
    pub fn set(&self, visible: bool) {
        self.0.store(visible, Ordering::Relaxed);
    }

    /// Flips the state, returning the new value.
    pub fn toggle(&self) -> bool {
        !self.0.fetch_xor(true, Ordering::Relaxed)
    }
}

impl Default for VisibilityFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

struct Entry<C> {
    id: u64,
    render: Box<dyn FnMut(&mut C)>,
    visible: Option<VisibilityFlag>,
}

impl<C> Entry<C> {
    fn is_visible(&self) -> bool {
        self.visible.as_ref().map_or(true, VisibilityFlag::get)
    }
}

/// Ordered list of render callbacks.
///
/// Entries run in registration order, so later registrations draw on top in
/// immediate-mode's natural z-order. The registry is driven through
/// [`OverlaySession`](crate::session::OverlaySession), which owns id
/// allocation and defers structural changes made mid-frame.
pub struct CallbackRegistry<C> {
    entries: Vec<Entry<C>>,
}

impl<C> Default for CallbackRegistry<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<C> CallbackRegistry<C> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(
        &mut self,
        id: u64,
        render: Box<dyn FnMut(&mut C)>,
        visible: Option<VisibilityFlag>,
    ) {
        self.entries.push(Entry {
            id,
            render,
            visible,
        });
    }

    pub(crate) fn remove(&mut self, handle: RenderHandle) -> Result<()> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != handle.0);
        if self.entries.len() == before {
            return Err(OverlayError::UnknownHandle(handle.0));
        }
        Ok(())
    }

    /// Runs the visible entries in order, returning how many were invoked.
    pub(crate) fn run(&mut self, ctx: &mut C) -> usize {
        let mut invoked = 0;
        for entry in &mut self.entries {
            if entry.is_visible() {
                (entry.render)(ctx);
                invoked += 1;
            }
        }
        invoked
    }

    /// Whether the given handle still refers to a live entry.
    #[must_use]
    pub fn contains(&self, handle: RenderHandle) -> bool {
        self.entries.iter().any(|e| e.id == handle.0)
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no callbacks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_respects_registration_order_and_visibility() {
        let mut registry: CallbackRegistry<Vec<u32>> = CallbackRegistry::new();
        let flag = VisibilityFlag::new(true);

        registry.insert(1, Box::new(|out| out.push(1)), None);
        registry.insert(2, Box::new(|out| out.push(2)), Some(flag.clone()));
        registry.insert(3, Box::new(|out| out.push(3)), None);

        let mut out = Vec::new();
        assert_eq!(registry.run(&mut out), 3);
        assert_eq!(out, vec![1, 2, 3]);

        flag.set(false);
        out.clear();
        assert_eq!(registry.run(&mut out), 2);
        assert_eq!(out, vec![1, 3]);
    }

    #[test]
    fn test_remove_by_handle() {
        let mut registry: CallbackRegistry<()> = CallbackRegistry::new();
        registry.insert(7, Box::new(|_| {}), None);

        assert!(registry.contains(RenderHandle(7)));
        assert!(registry.remove(RenderHandle(7)).is_ok());
        assert!(registry.is_empty());
        assert!(matches!(
            registry.remove(RenderHandle(7)),
            Err(OverlayError::UnknownHandle(7))
        ));
    }

    #[test]
    fn test_visibility_flag_toggle() {
        let flag = VisibilityFlag::new(false);
        assert!(!flag.get());
        assert!(flag.toggle());
        assert!(flag.get());
        assert!(!flag.toggle());
        assert!(!flag.get());
    }
}
