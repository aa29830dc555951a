//! Loan-product view of the allocation configuration
//!
//! Ownership is one-directional: the product owns its rule collections and
//! rules carry no back-reference. Collaborators that need upward navigation
//! key on the product identifier they already hold.

use serde::{Deserialize, Serialize};

use crate::error::{check, AllocationRuleViolation, Result};
use crate::rule::{CreditAllocationRule, PaymentAllocationRule};

/// The one strategy under which per-transaction-type allocation rules are
/// meaningful; every other strategy forbids them
pub const ADVANCED_PAYMENT_ALLOCATION_STRATEGY: &str = "advanced-payment-allocation-strategy";

/// Allocation configuration of a loan product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanProductAllocations {
    /// Configured transaction-processing strategy; gates whether any rule may
    /// exist at all
    pub transaction_processing_strategy_code: String,
    /// Payment allocation rules, at most one per transaction type
    pub payment_allocation_rules: Vec<PaymentAllocationRule>,
    /// Credit allocation rules, at most one per transaction type
    pub credit_allocation_rules: Vec<CreditAllocationRule>,
}

impl LoanProductAllocations {
    /// Create an empty configuration under the given strategy
    pub fn new(transaction_processing_strategy_code: impl Into<String>) -> Self {
        Self {
            transaction_processing_strategy_code: transaction_processing_strategy_code.into(),
            payment_allocation_rules: Vec::new(),
            credit_allocation_rules: Vec::new(),
        }
    }

    /// Whether the advanced payment allocation strategy is configured
    pub fn uses_advanced_allocation(&self) -> bool {
        self.transaction_processing_strategy_code == ADVANCED_PAYMENT_ALLOCATION_STRATEGY
    }

    /// Pre-save guard: rules of either kind must not survive a switch away
    /// from the advanced strategy
    pub fn validate_pre_save(&self) -> Result<()> {
        let mut violations = Vec::new();
        if !self.uses_advanced_allocation() {
            if !self.payment_allocation_rules.is_empty() {
                violations.push(AllocationRuleViolation::PaymentAllocationNotSupported {
                    strategy_code: self.transaction_processing_strategy_code.clone(),
                });
            }
            if !self.credit_allocation_rules.is_empty() {
                violations.push(AllocationRuleViolation::CreditAllocationNotSupported {
                    strategy_code: self.transaction_processing_strategy_code.clone(),
                });
            }
        }
        check(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::{AllocationType, FutureInstallmentAllocationRule, PaymentAllocationType};
    use crate::transaction::{CreditTransactionType, PaymentTransactionType};

    fn sample_credit_rule() -> CreditAllocationRule {
        CreditAllocationRule::new(CreditTransactionType::Chargeback, AllocationType::all().to_vec())
    }

    #[test]
    fn test_pre_save_accepts_rules_under_advanced_strategy() {
        let mut product = LoanProductAllocations::new(ADVANCED_PAYMENT_ALLOCATION_STRATEGY);
        product.credit_allocation_rules.push(sample_credit_rule());
        product.payment_allocation_rules.push(PaymentAllocationRule::new(
            PaymentTransactionType::Default,
            PaymentAllocationType::all().to_vec(),
            FutureInstallmentAllocationRule::NextInstallment,
        ));
        assert!(product.validate_pre_save().is_ok());
    }

    #[test]
    fn test_pre_save_rejects_rules_under_other_strategy() {
        let mut product = LoanProductAllocations::new("mifos-standard-strategy");
        product.credit_allocation_rules.push(sample_credit_rule());
        let err = product.validate_pre_save().unwrap_err();
        assert!(err.has_code(
            "credit_allocation.must.not.be.provided.when.allocation.strategy.is.not.advanced-payment-strategy"
        ));
    }

    #[test]
    fn test_pre_save_reports_both_rule_kinds() {
        let mut product = LoanProductAllocations::new("mifos-standard-strategy");
        product.credit_allocation_rules.push(sample_credit_rule());
        product.payment_allocation_rules.push(PaymentAllocationRule::new(
            PaymentTransactionType::Default,
            PaymentAllocationType::all().to_vec(),
            FutureInstallmentAllocationRule::NextInstallment,
        ));
        let err = product.validate_pre_save().unwrap_err();
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_empty_product_is_valid_under_any_strategy() {
        assert!(LoanProductAllocations::new("mifos-standard-strategy").validate_pre_save().is_ok());
        assert!(LoanProductAllocations::new(ADVANCED_PAYMENT_ALLOCATION_STRATEGY).validate_pre_save().is_ok());
    }
}
