//! Audit sink that reports through `tracing`.

use checkout_core::AuditSink;
use tracing::info;

/// Target for audit events, so a filter like `checkout::audit=info` can
/// route them separately.
pub const AUDIT_TARGET: &str = "checkout::audit";

/// Emits every audit entry as an `info` event on [`AUDIT_TARGET`]: the audit
/// message is the event message and the tag rides along as a `tag` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn log_info(&self, tag: &str, message: &str) {
        info!(target: AUDIT_TARGET, tag = %tag, "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;
    use checkout_core::CALCULATION_SUCCESS;

    #[test]
    fn test_entry_is_emitted_on_audit_target() {
        let logs = capture_logs(|| {
            TracingAuditSink.log_info(CALCULATION_SUCCESS, "2300.0 for customer C1");
        });

        assert!(logs.contains("INFO"));
        assert!(logs.contains(AUDIT_TARGET));
        assert!(logs.contains(&format!("tag={CALCULATION_SUCCESS}")));
        assert!(logs.contains("2300.0 for customer C1"));
    }

    #[test]
    fn test_logging_without_subscriber_is_a_no_op() {
        TracingAuditSink.log_info(CALCULATION_SUCCESS, "2300.0 for customer C1");
        assert!(capture_logs(|| {}).is_empty());
    }
}
