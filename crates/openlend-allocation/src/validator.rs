//! Structural validation of allocation rule sets
//!
//! Two independent levels: set-level validation of the rules a strategy
//! declares, and per-rule validation of one ordered allocation list. All
//! checks of a level are evaluated and their violations accumulated; nothing
//! short-circuits.

use std::collections::HashSet;

use openlend_types::{
    check, AllocationRuleViolation, AllocationType, CreditAllocationRule, PaymentAllocationRule,
    PaymentAllocationType, Result, ADVANCED_PAYMENT_ALLOCATION_STRATEGY,
};

/// Validate the credit allocation rules declared for a strategy
///
/// Under the advanced strategy: transaction types must be present and unique.
/// Under any other strategy: no rules may be declared at all. An empty list is
/// valid in both cases.
pub fn validate_credit_allocations(rules: &[CreditAllocationRule], strategy_code: &str) -> Result<()> {
    let mut violations = Vec::new();

    if strategy_code == ADVANCED_PAYMENT_ALLOCATION_STRATEGY {
        if has_duplicate_types(rules.iter().map(|r| r.transaction_type)) {
            violations.push(AllocationRuleViolation::DuplicateCreditAllocation);
        }
        for rule in rules {
            if rule.transaction_type.is_none() {
                violations.push(AllocationRuleViolation::InvalidCreditTransactionType);
            }
        }
    } else if !rules.is_empty() {
        violations.push(AllocationRuleViolation::CreditAllocationNotSupported {
            strategy_code: strategy_code.to_string(),
        });
    }

    check(violations)
}

/// Validate one credit allocation order as (position, type) pairs
///
/// Exactly 4 entries, no repeated allocation type, positions exactly 1..4 in
/// list order. The three checks are independent.
pub fn validate_credit_allocation_order(entries: &[(usize, AllocationType)]) -> Result<()> {
    let mut violations = Vec::new();

    if entries.len() != 4 {
        violations.push(AllocationRuleViolation::CreditOrderEntryCount { found: entries.len() });
    }

    let distinct: HashSet<_> = entries.iter().map(|(_, t)| *t).collect();
    if distinct.len() != entries.len() {
        violations.push(AllocationRuleViolation::DuplicateCreditOrderEntry);
    }

    if !entries.iter().map(|(pos, _)| *pos).eq(1..=4) {
        violations.push(AllocationRuleViolation::InvalidCreditOrder);
    }

    check(violations)
}

/// Validate the payment allocation rules declared for a strategy
///
/// The advanced strategy additionally requires exactly one DEFAULT rule, and
/// every rule must carry both a transaction type and a future-installment
/// rule.
pub fn validate_payment_allocations(rules: &[PaymentAllocationRule], strategy_code: &str) -> Result<()> {
    let mut violations = Vec::new();

    if strategy_code == ADVANCED_PAYMENT_ALLOCATION_STRATEGY {
        if rules.iter().filter(|r| r.is_default_rule()).count() != 1 {
            violations.push(AllocationRuleViolation::MissingDefaultPaymentAllocation);
        }
        if has_duplicate_types(rules.iter().map(|r| r.transaction_type)) {
            violations.push(AllocationRuleViolation::DuplicatePaymentAllocation);
        }
        for rule in rules {
            if rule.transaction_type.is_none() || rule.future_installment_rule.is_none() {
                violations.push(AllocationRuleViolation::InvalidPaymentAllocationRule);
            }
        }
    } else if !rules.is_empty() {
        violations.push(AllocationRuleViolation::PaymentAllocationNotSupported {
            strategy_code: strategy_code.to_string(),
        });
    }

    check(violations)
}

/// Validate one payment allocation order as (position, bucket) pairs
///
/// Exactly 12 entries, no repeated bucket, positions exactly 1..12 in list
/// order.
pub fn validate_payment_allocation_order(entries: &[(usize, PaymentAllocationType)]) -> Result<()> {
    let mut violations = Vec::new();

    if entries.len() != 12 {
        violations.push(AllocationRuleViolation::PaymentOrderEntryCount { found: entries.len() });
    }

    let distinct: HashSet<_> = entries.iter().map(|(_, t)| *t).collect();
    if distinct.len() != entries.len() {
        violations.push(AllocationRuleViolation::DuplicatePaymentOrderEntry);
    }

    if !entries.iter().map(|(pos, _)| *pos).eq(1..=12) {
        violations.push(AllocationRuleViolation::InvalidPaymentOrder);
    }

    check(violations)
}

/// Duplicate detection over resolved transaction types; unresolved (`None`)
/// entries are reported separately, not as duplicates
fn has_duplicate_types<T: std::hash::Hash + Eq>(types: impl Iterator<Item = Option<T>>) -> bool {
    let mut seen = HashSet::new();
    for t in types.flatten() {
        if !seen.insert(t) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use openlend_types::{CreditTransactionType, FutureInstallmentAllocationRule, PaymentTransactionType};
    use proptest::prelude::*;

    use super::*;

    fn positioned(types: &[AllocationType]) -> Vec<(usize, AllocationType)> {
        types.iter().copied().enumerate().map(|(i, t)| (i + 1, t)).collect()
    }

    fn credit_rule(tt: CreditTransactionType) -> CreditAllocationRule {
        CreditAllocationRule::new(tt, AllocationType::all().to_vec())
    }

    fn payment_rule(tt: PaymentTransactionType) -> PaymentAllocationRule {
        PaymentAllocationRule::new(
            tt,
            PaymentAllocationType::all().to_vec(),
            FutureInstallmentAllocationRule::NextInstallment,
        )
    }

    #[test]
    fn test_empty_rules_valid_under_advanced_strategy() {
        assert!(validate_credit_allocations(&[], ADVANCED_PAYMENT_ALLOCATION_STRATEGY).is_ok());
    }

    #[test]
    fn test_rules_forbidden_under_other_strategy() {
        let rules = vec![credit_rule(CreditTransactionType::Repayment)];
        let err = validate_credit_allocations(&rules, "some-other-strategy").unwrap_err();
        assert!(err.has_code(
            "credit_allocation.must.not.be.provided.when.allocation.strategy.is.not.advanced-payment-strategy"
        ));

        assert!(validate_credit_allocations(&[], "some-other-strategy").is_ok());
    }

    #[test]
    fn test_duplicate_transaction_type_rejected() {
        let rules = vec![
            credit_rule(CreditTransactionType::Chargeback),
            credit_rule(CreditTransactionType::Chargeback),
        ];
        let err = validate_credit_allocations(&rules, ADVANCED_PAYMENT_ALLOCATION_STRATEGY).unwrap_err();
        assert!(err.has_code("advanced-payment-strategy-with-duplicate-credit-allocation"));
    }

    #[test]
    fn test_missing_transaction_type_rejected() {
        let rules = vec![CreditAllocationRule {
            transaction_type: None,
            allocation_order: AllocationType::all().to_vec(),
        }];
        let err = validate_credit_allocations(&rules, ADVANCED_PAYMENT_ALLOCATION_STRATEGY).unwrap_err();
        assert!(err.has_code("advanced-payment-strategy.with.not.valid.transaction.type"));
    }

    #[test]
    fn test_two_unresolved_types_are_not_duplicates() {
        let unresolved = CreditAllocationRule {
            transaction_type: None,
            allocation_order: AllocationType::all().to_vec(),
        };
        let rules = vec![unresolved.clone(), unresolved];
        let err = validate_credit_allocations(&rules, ADVANCED_PAYMENT_ALLOCATION_STRATEGY).unwrap_err();
        assert!(!err.has_code("advanced-payment-strategy-with-duplicate-credit-allocation"));
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_order_count_mismatch() {
        let entries = positioned(&[AllocationType::Penalty, AllocationType::Fee]);
        let err = validate_credit_allocation_order(&entries).unwrap_err();
        assert!(err.has_code("advanced-payment-strategy.each_credit_allocation_order.must.contain.4.entries"));
    }

    #[test]
    fn test_order_duplicate_type() {
        let entries = positioned(&[
            AllocationType::Penalty,
            AllocationType::Penalty,
            AllocationType::Principal,
            AllocationType::Interest,
        ]);
        let err = validate_credit_allocation_order(&entries).unwrap_err();
        assert!(err.has_code("advanced-payment-strategy.must.not.have.duplicate.credit.allocation.rule"));
        assert!(!err.has_code("advanced-payment-strategy.each_credit_allocation_order.must.contain.4.entries"));
    }

    #[test]
    fn test_order_positions_must_be_sequential() {
        let entries: Vec<_> = AllocationType::all()
            .iter()
            .copied()
            .zip([2usize, 1, 3, 4])
            .map(|(t, pos)| (pos, t))
            .collect();
        let err = validate_credit_allocation_order(&entries).unwrap_err();
        assert!(err.has_code("advanced-payment-strategy.invalid.order"));
    }

    #[test]
    fn test_order_position_gap_rejected() {
        let entries: Vec<_> = AllocationType::all()
            .iter()
            .copied()
            .zip([1usize, 2, 3, 5])
            .map(|(t, pos)| (pos, t))
            .collect();
        let err = validate_credit_allocation_order(&entries).unwrap_err();
        assert!(err.has_code("advanced-payment-strategy.invalid.order"));
    }

    #[test]
    fn test_violations_accumulate() {
        // 3 entries with a repeat and a bad position: all three checks fire
        let entries = vec![
            (1, AllocationType::Penalty),
            (3, AllocationType::Penalty),
            (4, AllocationType::Fee),
        ];
        let err = validate_credit_allocation_order(&entries).unwrap_err();
        assert_eq!(err.violations().len(), 3);
    }

    #[test]
    fn test_payment_requires_default_rule() {
        let rules = vec![payment_rule(PaymentTransactionType::Repayment)];
        let err = validate_payment_allocations(&rules, ADVANCED_PAYMENT_ALLOCATION_STRATEGY).unwrap_err();
        assert!(err.has_code("advanced-payment-strategy-without-default-payment-allocation"));

        let rules = vec![
            payment_rule(PaymentTransactionType::Default),
            payment_rule(PaymentTransactionType::Repayment),
        ];
        assert!(validate_payment_allocations(&rules, ADVANCED_PAYMENT_ALLOCATION_STRATEGY).is_ok());
    }

    #[test]
    fn test_payment_rule_missing_future_installment_rule() {
        let mut rule = payment_rule(PaymentTransactionType::Default);
        rule.future_installment_rule = None;
        let err = validate_payment_allocations(&[rule], ADVANCED_PAYMENT_ALLOCATION_STRATEGY).unwrap_err();
        assert!(err.has_code("advanced-payment-strategy.invalid.payment.allocation.rule"));
    }

    #[test]
    fn test_payment_rules_forbidden_under_other_strategy() {
        let rules = vec![payment_rule(PaymentTransactionType::Default)];
        let err = validate_payment_allocations(&rules, "mifos-standard-strategy").unwrap_err();
        assert!(err.has_code(
            "payment_allocation.must.not.be.provided.when.allocation.strategy.is.not.advanced-payment-strategy"
        ));
    }

    #[test]
    fn test_payment_order_full_sequence_passes() {
        let entries: Vec<_> = PaymentAllocationType::all()
            .iter()
            .copied()
            .enumerate()
            .map(|(i, t)| (i + 1, t))
            .collect();
        assert!(validate_payment_allocation_order(&entries).is_ok());
    }

    #[test]
    fn test_payment_order_short_list_rejected() {
        let entries = vec![(1, PaymentAllocationType::PastDuePenalty)];
        let err = validate_payment_allocation_order(&entries).unwrap_err();
        assert!(err.has_code("advanced-payment-strategy.each_payment_allocation_order.must.contain.12.entries"));
    }

    proptest! {
        // Every permutation of the four allocation types with positions 1..4
        // is a valid credit allocation order.
        #[test]
        fn prop_any_permutation_with_sequential_positions_passes(
            perm in Just(AllocationType::all().to_vec()).prop_shuffle()
        ) {
            let entries = positioned(&perm);
            prop_assert!(validate_credit_allocation_order(&entries).is_ok());
        }

        // Shuffling the positions away from 1..4 always fails with the
        // invalid-order code, regardless of which types are where.
        #[test]
        fn prop_non_sequential_positions_fail(
            perm in Just(AllocationType::all().to_vec()).prop_shuffle(),
            positions in Just(vec![1usize, 2, 3, 4]).prop_shuffle()
                .prop_filter("positions must not be sorted", |p| p != &[1, 2, 3, 4])
        ) {
            let entries: Vec<_> = positions.into_iter().zip(perm).collect();
            let err = validate_credit_allocation_order(&entries).unwrap_err();
            prop_assert!(err.has_code("advanced-payment-strategy.invalid.order"));
        }
    }
}
