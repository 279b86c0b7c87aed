//! # Render Signalling
//!
//! The store tells its UI that the visible list changed through a
//! [`RenderEmitter`]. The store never renders anything itself.
//!
//! ```text
//! BookListStore ──mutation──► persist ──► emitter.emit_render(filter, view)
//!                                                  │
//!                                                  ▼
//!                                         terminal / desktop shell
//! ```

use bookclub_core::{Book, Filter};

/// Receives the filtered view whenever it should be redrawn.
pub trait RenderEmitter: Send + Sync {
    /// Emits the books visible under `filter`, in collection order.
    fn emit_render(&self, filter: Filter, view: &[&Book]);
}

/// No-op emitter for headless use and tests.
pub struct NoOpEmitter;

impl RenderEmitter for NoOpEmitter {
    fn emit_render(&self, _filter: Filter, _view: &[&Book]) {}
}
