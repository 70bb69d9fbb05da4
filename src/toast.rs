//! Toast notifications.
//!
//! DESIGN
//! ======
//! A `Toaster` is a fire-and-forget sink: pushing never fails and never
//! waits on a consumer. Pending toasts sit in a bounded queue until the
//! page renderer (or the CLI) drains them. When the queue is full the
//! oldest toast is dropped, so the newest outcome is always the one shown.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::config::DEFAULT_TOAST_LIMIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), variant: ToastVariant::Default }
    }

    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), variant: ToastVariant::Destructive }
    }

    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

/// Bounded, shareable toast queue. Clones share the same queue.
#[derive(Debug, Clone)]
pub struct Toaster {
    queue: Arc<Mutex<VecDeque<Toast>>>,
    limit: usize,
}

impl Toaster {
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_TOAST_LIMIT)
    }

    /// A limit of zero is treated as one.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self { queue: Arc::new(Mutex::new(VecDeque::with_capacity(limit))), limit }
    }

    pub fn push(&self, toast: Toast) {
        tracing::debug!(title = %toast.title, variant = ?toast.variant, "toast");
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        while queue.len() >= self.limit {
            queue.pop_front();
        }
        queue.push_back(toast);
    }

    /// Take every pending toast, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Toast> {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.drain(..).collect()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "toast_test.rs"]
mod tests;
