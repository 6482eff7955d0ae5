//! Position within the loaded trace

/// Clamped index into a trace of `len` steps
///
/// A cursor only exists while a trace is loaded, so `len` is at least one and
/// `index` is always in `[0, len - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    /// A cursor at the first step
    pub fn start(len: usize) -> Self {
        Cursor {
            index: 0,
            len: len.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn last_index(&self) -> usize {
        self.len - 1
    }

    pub fn at_start(&self) -> bool {
        self.index == 0
    }

    pub fn at_end(&self) -> bool {
        self.index == self.last_index()
    }

    /// Move forward one step. Returns false at the last step.
    pub(crate) fn forward(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move back one step. Returns false at the first step.
    pub(crate) fn backward(&mut self) -> bool {
        if self.at_start() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Jump to `index`, clamped into range. Returns whether the cursor moved.
    pub(crate) fn seek(&mut self, index: usize) -> bool {
        let target = index.min(self.last_index());
        let moved = target != self.index;
        self.index = target;
        moved
    }
}
