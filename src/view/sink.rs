//! Receivers of published projections

use super::Projection;

/// Destination for the views of the current step
///
/// The session calls [`ViewSink::present`] exactly once per transition that
/// moves the cursor or installs a trace, always with a complete projection.
pub trait ViewSink {
    fn present(&mut self, projection: &Projection);

    /// Called when the trace is dropped and there is nothing to show
    fn clear(&mut self) {}
}

/// Sink that keeps the most recent projection for a renderer to draw
#[derive(Debug, Default)]
pub struct ProjectionCache {
    latest: Option<Projection>,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<&Projection> {
        self.latest.as_ref()
    }
}

impl ViewSink for ProjectionCache {
    fn present(&mut self, projection: &Projection) {
        self.latest = Some(projection.clone());
    }

    fn clear(&mut self) {
        self.latest = None;
    }
}
