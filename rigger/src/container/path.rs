//! Resolution path used to detect circular dependencies

use crate::{Lifecycle, Name};
use std::cell::RefCell;

#[derive(Debug)]
struct Frame {
    name: Name,
    lifecycle: Lifecycle,
}

/// Names currently being resolved during one top-level lookup, outermost first
#[derive(Debug, Default)]
pub(crate) struct Path {
    frames: RefCell<Vec<Frame>>,
}

impl Path {
    /// Returns `true` if `name` is being resolved
    #[inline]
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.frames
            .borrow()
            .iter()
            .any(|frame| frame.name == name)
    }

    /// Returns the names being resolved
    pub(crate) fn names(&self) -> Vec<Name> {
        self.frames
            .borrow()
            .iter()
            .map(|frame| frame.name.clone())
            .collect()
    }

    /// Returns the innermost singleton being resolved
    pub(crate) fn nearest_singleton(&self) -> Option<Name> {
        self.frames
            .borrow()
            .iter()
            .rev()
            .find(|frame| frame.lifecycle.is_singleton())
            .map(|frame| frame.name.clone())
    }

    /// Pushes a frame that is popped once the returned guard is dropped
    #[inline]
    pub(crate) fn enter(&self, name: Name, lifecycle: Lifecycle) -> FrameGuard<'_> {
        self.frames.borrow_mut().push(Frame { name, lifecycle });
        FrameGuard { path: self }
    }
}

/// Pops its frame on drop
pub(crate) struct FrameGuard<'a> {
    path: &'a Path,
}

impl Drop for FrameGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        self.path.frames.borrow_mut().pop();
    }
}
