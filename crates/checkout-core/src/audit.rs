//! # Audit Sink
//!
//! Where the pricing engine reports completed calculations.
//!
//! The engine treats the sink as fire-and-forget: `log_info` returns nothing
//! and cannot fail. Implementations decide where entries end up.
//!
//! - [`MemoryAuditSink`] - keeps entries in memory (tests, previews)
//! - `TracingAuditSink` in checkout-store - emits tracing events

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Receives audit entries.
pub trait AuditSink {
    /// Records one informational entry.
    fn log_info(&self, tag: &str, message: &str);
}

impl<S: AuditSink + ?Sized> AuditSink for &S {
    fn log_info(&self, tag: &str, message: &str) {
        (**self).log_info(tag, message);
    }
}

impl<S: AuditSink + ?Sized> AuditSink for Arc<S> {
    fn log_info(&self, tag: &str, message: &str) {
        (**self).log_info(tag, message);
    }
}

/// A single recorded audit entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub tag: String,
    pub message: String,
    pub recorded_at: DateTime<Utc>,
}

/// Audit sink that keeps every entry in memory.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the entries recorded so far, oldest first.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the entries recorded under `tag`.
    pub fn entries_tagged(&self, tag: &str) -> Vec<AuditEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.tag == tag)
            .collect()
    }
}

impl AuditSink for MemoryAuditSink {
    fn log_info(&self, tag: &str, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(AuditEntry {
                tag: tag.to_string(),
                message: message.to_string(),
                recorded_at: Utc::now(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemoryAuditSink::new();
        sink.log_info("A", "first");
        sink.log_info("B", "second");
        sink.log_info("A", "third");

        let entries = sink.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "first");

        let tagged = sink.entries_tagged("A");
        assert_eq!(tagged.len(), 2);
        assert_eq!(tagged[1].message, "third");
    }

    #[test]
    fn test_sink_through_shared_reference() {
        let sink = Arc::new(MemoryAuditSink::new());
        let shared: Arc<dyn AuditSink> = sink.clone();
        shared.log_info("TAG", "via arc");
        (&*sink).log_info("TAG", "via ref");
        assert_eq!(sink.entries().len(), 2);
    }
}
