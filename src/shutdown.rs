use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One-shot termination token shared by the game loop and the input
/// listener. Either side may signal it, signalling twice is harmless.
#[derive(Clone, Default)]
pub struct ShutdownSignal(Arc<AtomicBool>);

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_signalled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unsignalled() {
        assert!(!ShutdownSignal::new().is_signalled());
    }

    #[test]
    fn signalling_twice_is_idempotent() {
        let signal = ShutdownSignal::new();
        signal.signal();
        signal.signal();
        assert!(signal.is_signalled());
    }

    #[test]
    fn clones_share_the_flag() {
        let signal = ShutdownSignal::new();
        let observer = signal.clone();
        signal.signal();
        assert!(observer.is_signalled());
    }
}
