//! Validation error types
//!
//! Every violation is a data-validation error: never transient, never
//! retryable. Each variant carries a stable machine-readable code for the API
//! layer; validation accumulates every violation it finds before failing, so a
//! caller gets complete feedback in one pass.

use thiserror::Error;

/// Result type for rule validation
pub type Result<T> = std::result::Result<T, RuleValidationError>;

/// A single violated allocation-rule constraint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationRuleViolation {
    // ========================================================================
    // Credit allocation
    // ========================================================================

    /// Credit allocation rules declared under a strategy that forbids them
    #[error("in case '{strategy_code}' payment strategy, creditAllocation must not be provided")]
    CreditAllocationNotSupported { strategy_code: String },

    /// Two credit allocation rules target the same transaction type
    #[error("the list of credit allocation rules must not contain duplicate transaction types")]
    DuplicateCreditAllocation,

    /// A credit allocation rule carries no resolvable transaction type
    #[error("a credit allocation rule references an invalid or missing transaction type")]
    InvalidCreditTransactionType,

    /// A credit allocation order does not have exactly 4 entries
    #[error("each credit allocation order must contain exactly 4 entries, got {found}")]
    CreditOrderEntryCount { found: usize },

    /// An allocation type appears more than once in a credit allocation order
    #[error("a credit allocation order must not repeat an allocation type")]
    DuplicateCreditOrderEntry,

    /// Credit allocation order positions are not exactly 1..4 in sequence
    #[error("credit allocation order positions must be exactly 1..4 in sequence")]
    InvalidCreditOrder,

    // ========================================================================
    // Payment allocation
    // ========================================================================

    /// Payment allocation rules declared under a strategy that forbids them
    #[error("in case '{strategy_code}' payment strategy, paymentAllocation must not be provided")]
    PaymentAllocationNotSupported { strategy_code: String },

    /// The advanced strategy requires exactly one DEFAULT payment allocation rule
    #[error("the advanced payment allocation strategy requires exactly one DEFAULT payment allocation rule")]
    MissingDefaultPaymentAllocation,

    /// Two payment allocation rules target the same transaction type
    #[error("the list of payment allocation rules must not contain duplicate transaction types")]
    DuplicatePaymentAllocation,

    /// A payment allocation rule is missing its transaction type or
    /// future-installment rule
    #[error("a payment allocation rule is missing its transaction type or future installment rule")]
    InvalidPaymentAllocationRule,

    /// A payment allocation order does not have exactly 12 entries
    #[error("each payment allocation order must contain exactly 12 entries, got {found}")]
    PaymentOrderEntryCount { found: usize },

    /// A bucket appears more than once in a payment allocation order
    #[error("a payment allocation order must not repeat an allocation bucket")]
    DuplicatePaymentOrderEntry,

    /// Payment allocation order positions are not exactly 1..12 in sequence
    #[error("payment allocation order positions must be exactly 1..12 in sequence")]
    InvalidPaymentOrder,
}

impl AllocationRuleViolation {
    /// Stable machine-readable code for API error responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::CreditAllocationNotSupported { .. } => {
                "credit_allocation.must.not.be.provided.when.allocation.strategy.is.not.advanced-payment-strategy"
            }
            Self::DuplicateCreditAllocation => "advanced-payment-strategy-with-duplicate-credit-allocation",
            Self::InvalidCreditTransactionType => "advanced-payment-strategy.with.not.valid.transaction.type",
            Self::CreditOrderEntryCount { .. } => {
                "advanced-payment-strategy.each_credit_allocation_order.must.contain.4.entries"
            }
            Self::DuplicateCreditOrderEntry => {
                "advanced-payment-strategy.must.not.have.duplicate.credit.allocation.rule"
            }
            Self::InvalidCreditOrder => "advanced-payment-strategy.invalid.order",
            Self::PaymentAllocationNotSupported { .. } => {
                "payment_allocation.must.not.be.provided.when.allocation.strategy.is.not.advanced-payment-strategy"
            }
            Self::MissingDefaultPaymentAllocation => "advanced-payment-strategy-without-default-payment-allocation",
            Self::DuplicatePaymentAllocation => "advanced-payment-strategy-with-duplicate-payment-allocations",
            Self::InvalidPaymentAllocationRule => "advanced-payment-strategy.invalid.payment.allocation.rule",
            Self::PaymentOrderEntryCount { .. } => {
                "advanced-payment-strategy.each_payment_allocation_order.must.contain.12.entries"
            }
            Self::DuplicatePaymentOrderEntry => {
                "advanced-payment-strategy.must.not.have.duplicate.payment.allocation.rule"
            }
            Self::InvalidPaymentOrder => "advanced-payment-strategy.invalid.order",
        }
    }
}

/// Aggregate validation failure carrying every violation found
///
/// The write is all-or-nothing: one of these aborts the update before any
/// reconciliation runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("allocation rule validation failed with {} violation(s)", .violations.len())]
pub struct RuleValidationError {
    violations: Vec<AllocationRuleViolation>,
}

impl RuleValidationError {
    /// Wrap a non-empty violation list
    pub fn new(violations: Vec<AllocationRuleViolation>) -> Self {
        debug_assert!(!violations.is_empty());
        Self { violations }
    }

    /// The violations, in detection order
    pub fn violations(&self) -> &[AllocationRuleViolation] {
        &self.violations
    }

    /// Consume into the violation list
    pub fn into_violations(self) -> Vec<AllocationRuleViolation> {
        self.violations
    }

    /// `(code, message)` pairs for the API error collaborator
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        self.violations.iter().map(|v| (v.code(), v.to_string())).collect()
    }

    /// Whether a specific code was violated
    pub fn has_code(&self, code: &str) -> bool {
        self.violations.iter().any(|v| v.code() == code)
    }
}

/// Fold a violation list into a validation result
pub fn check(violations: Vec<AllocationRuleViolation>) -> Result<()> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(RuleValidationError::new(violations))
    }
}
