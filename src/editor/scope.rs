//! Liveness of a mounted page

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag telling pending fetches whether their page is still shown.
///
/// Fetches are not cancelled; a result that arrives after
/// [`PageScope::unmount`] is dropped instead of applied.
#[derive(Debug, Clone)]
pub struct PageScope {
    mounted: Arc<AtomicBool>,
}

impl PageScope {
    pub fn new() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }
}

impl Default for PageScope {
    fn default() -> Self {
        Self::new()
    }
}
