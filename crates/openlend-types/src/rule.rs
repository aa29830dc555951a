//! Allocation rule records owned by a loan product
//!
//! A rule pairs a transaction type with a priority order over allocation
//! buckets. The transaction type is optional at this level: a submitted rule
//! whose discriminator could not be resolved carries `None` and is rejected
//! by validation, never by the record itself.

use serde::{Deserialize, Serialize};

use crate::allocation::{AllocationType, FutureInstallmentAllocationRule, PaymentAllocationType};
use crate::transaction::{CreditTransactionType, PaymentTransactionType};

/// Ordered credit allocation rule for one transaction type
///
/// `allocation_order` assigns priority 1..=4 by list position; a valid rule
/// contains each of the four allocation types exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditAllocationRule {
    /// Target transaction type; `None` when the submitted discriminator was
    /// absent or unrecognized
    pub transaction_type: Option<CreditTransactionType>,
    /// Allocation types in priority order
    pub allocation_order: Vec<AllocationType>,
}

impl CreditAllocationRule {
    /// Create a rule for a known transaction type
    pub fn new(transaction_type: CreditTransactionType, allocation_order: Vec<AllocationType>) -> Self {
        Self {
            transaction_type: Some(transaction_type),
            allocation_order,
        }
    }

    /// Ordered comparison of the allocation lists; order matters
    pub fn has_same_order(&self, other: &Self) -> bool {
        self.allocation_order == other.allocation_order
    }
}

/// Ordered payment allocation rule for one transaction type
///
/// `allocation_order` assigns priority 1..=12 by list position over the full
/// due-state x obligation cross-product. The future-installment rule decides
/// where money goes once the current installment is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAllocationRule {
    /// Target transaction type; `None` when the submitted discriminator was
    /// absent or unrecognized
    pub transaction_type: Option<PaymentTransactionType>,
    /// Allocation buckets in priority order
    pub allocation_order: Vec<PaymentAllocationType>,
    /// Handling of the remainder beyond the current installment
    pub future_installment_rule: Option<FutureInstallmentAllocationRule>,
}

impl PaymentAllocationRule {
    /// Create a rule for a known transaction type
    pub fn new(
        transaction_type: PaymentTransactionType,
        allocation_order: Vec<PaymentAllocationType>,
        future_installment_rule: FutureInstallmentAllocationRule,
    ) -> Self {
        Self {
            transaction_type: Some(transaction_type),
            allocation_order,
            future_installment_rule: Some(future_installment_rule),
        }
    }

    /// Whether this is the catch-all rule the advanced strategy requires
    pub fn is_default_rule(&self) -> bool {
        self.transaction_type == Some(PaymentTransactionType::Default)
    }

    /// Ordered comparison of allocation list and future-installment rule
    pub fn has_same_order(&self, other: &Self) -> bool {
        self.allocation_order == other.allocation_order
            && self.future_installment_rule == other.future_installment_rule
    }
}
