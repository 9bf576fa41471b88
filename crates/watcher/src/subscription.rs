//! Ownership of an armed watch

use std::fmt;
use std::path::PathBuf;
use tracing::debug;

type Release = Box<dyn FnOnce() + Send>;

/// Handle to an active watch on one file
///
/// Releasing happens exactly once, either through [`Subscription::unsubscribe`]
/// or when the value is dropped.
pub struct Subscription {
    path: PathBuf,
    release: Option<Release>,
}

impl Subscription {
    /// Create a subscription that runs `release` when it ends
    pub fn new(path: impl Into<PathBuf>, release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            path: path.into(),
            release: Some(Box::new(release)),
        }
    }

    /// Whether the OS resources are still held
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Stop delivery and release the OS resources
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
            debug!("Released watch on {:?}", self.path);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("path", &self.path)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting(path: &str) -> (Subscription, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let sub = Subscription::new(path, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (sub, count)
    }

    #[test]
    fn test_unsubscribe_releases_once() {
        let (sub, count) = counting("a.log");
        assert!(sub.is_active());
        sub.unsubscribe();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_releases() {
        let (sub, count) = counting("b.log");
        drop(sub);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
