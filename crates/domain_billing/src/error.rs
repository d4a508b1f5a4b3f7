//! Billing domain errors
//!
//! The lifecycle distinguishes three outcomes of a failed multi-step write,
//! because callers need to react differently to each: retry is reasonable
//! after a clean or compensated abort, while an inconsistent state needs an
//! operator rather than a silent retry.

use thiserror::Error;

use core_kernel::StoreError;

/// Errors reported by the bill lifecycle
#[derive(Debug, Error)]
pub enum BillingError {
    /// A storage call failed and nothing was left half-written (clean abort)
    #[error("storage operation failed: {0}")]
    Storage(#[from] StoreError),

    /// An item write failed and the partial bill was deleted again
    /// (compensated abort, net no-op)
    #[error("bill {bill_id} rolled back: item write failed: {cause}")]
    CreateRolledBack {
        bill_id: String,
        #[source]
        cause: StoreError,
    },

    /// An item write failed and the compensating deletes also failed,
    /// leaving a partial bill behind (inconsistent, operator remediation)
    #[error(
        "bill {bill_id} left partially written: item write failed ({cause}); \
         compensating delete failed ({compensation})"
    )]
    CompensationFailed {
        bill_id: String,
        cause: StoreError,
        compensation: StoreError,
    },
}

impl BillingError {
    /// True when nothing was changed by the failed operation
    pub fn is_clean_abort(&self) -> bool {
        matches!(self, BillingError::Storage(_))
    }

    /// True when a partial write was successfully undone
    pub fn is_compensated(&self) -> bool {
        matches!(self, BillingError::CreateRolledBack { .. })
    }

    /// True when the system was left in a state needing external remediation
    pub fn is_inconsistent(&self) -> bool {
        matches!(self, BillingError::CompensationFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_predicates_are_exclusive() {
        let clean = BillingError::Storage(StoreError::connection("down"));
        assert!(clean.is_clean_abort());
        assert!(!clean.is_compensated());
        assert!(!clean.is_inconsistent());

        let compensated = BillingError::CreateRolledBack {
            bill_id: "b1".to_string(),
            cause: StoreError::connection("down"),
        };
        assert!(compensated.is_compensated());
        assert!(!compensated.is_clean_abort());

        let inconsistent = BillingError::CompensationFailed {
            bill_id: "b1".to_string(),
            cause: StoreError::connection("down"),
            compensation: StoreError::connection("still down"),
        };
        assert!(inconsistent.is_inconsistent());
        assert!(!inconsistent.is_compensated());
    }

    #[test]
    fn test_compensation_failure_names_both_causes() {
        let error = BillingError::CompensationFailed {
            bill_id: "b1".to_string(),
            cause: StoreError::connection("item write refused"),
            compensation: StoreError::Timeout {
                operation: "delete bills".to_string(),
                duration_ms: 30000,
            },
        };
        let message = error.to_string();
        assert!(message.contains("partially written"));
        assert!(message.contains("item write refused"));
        assert!(message.contains("delete bills"));
    }
}
