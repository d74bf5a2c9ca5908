//! Progress reporting and cooperative cancellation.
//!
//! Render loops poll a [`ProgressListener`] between rows. Returning `false` stops the
//! loop before the next row; rows already written stay as they are.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Receives the completed fraction of a render and decides whether to continue.
pub trait ProgressListener {
    /// `fraction` is in `[0, 1]`. Return `false` to stop rendering.
    fn on_progress(&mut self, fraction: f32) -> bool;
}

/// Always continues.
impl ProgressListener for () {
    fn on_progress(&mut self, _fraction: f32) -> bool {
        true
    }
}

/// Adapter to use a closure as a [`ProgressListener`].
pub struct FnListener<F>(pub F);

impl<F: FnMut(f32) -> bool> ProgressListener for FnListener<F> {
    fn on_progress(&mut self, fraction: f32) -> bool {
        (self.0)(fraction)
    }
}

/// Shared cancellation switch. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; takes effect at the render loop's next poll.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

impl ProgressListener for CancelFlag {
    fn on_progress(&mut self, _fraction: f32) -> bool {
        !self.is_cancelled()
    }
}

/// How a cancellable render ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Every row was written.
    Completed,
    /// The listener stopped the render after `rows_rendered` rows.
    Cancelled { rows_rendered: usize },
}

impl RenderOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RenderOutcome::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_listener_always_continues() {
        let mut l = ();
        assert!(l.on_progress(0.5));
    }

    #[test]
    fn closure_listener_sees_fractions() {
        let mut seen = Vec::new();
        {
            let mut l = FnListener(|f: f32| {
                seen.push(f);
                f < 0.5
            });
            assert!(l.on_progress(0.25));
            assert!(!l.on_progress(0.75));
        }
        assert_eq!(seen, vec![0.25, 0.75]);
    }

    #[test]
    fn cancel_flag_is_shared_between_clones() {
        let flag = CancelFlag::new();
        let mut listener = flag.clone();
        assert!(listener.on_progress(0.1));
        flag.cancel();
        assert!(!listener.on_progress(0.2));
        flag.reset();
        assert!(listener.on_progress(0.3));
    }
}
