//! Reconciliation of submitted rule sets against a product's current rules
//!
//! Given the product's persisted rules and a freshly submitted set, compute
//! the minimal structural change: remove rules whose transaction type is no
//! longer submitted, add rules for new transaction types, and overwrite the
//! ordered fields of rules present on both sides when they differ. Unchanged
//! records are left untouched, so callers can rely on identity preservation.
//!
//! The merger assumes validated input and exclusive access to the collection
//! for the duration of the call; it never raises. A duplicate transaction
//! type in the submission (impossible after validation) resolves
//! last-write-wins while keying.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use openlend_types::{CreditAllocationRule, LoanProductAllocations, PaymentAllocationRule};

/// Reconcile the product's credit allocation rules with a submitted set
///
/// Returns `true` iff anything was added, removed, or overwritten.
pub fn merge_credit_allocation_rules(
    product: &mut LoanProductAllocations,
    submitted: Vec<CreditAllocationRule>,
) -> bool {
    let mut changed = false;
    let (mut submitted_by_type, submitted_order) =
        key_by_type(submitted, |r: &CreditAllocationRule| r.transaction_type);

    let before = product.credit_allocation_rules.len();
    product.credit_allocation_rules.retain(|rule| {
        let keep = rule
            .transaction_type
            .is_some_and(|t| submitted_by_type.contains_key(&t));
        if !keep {
            debug!(transaction_type = ?rule.transaction_type, "removing credit allocation rule");
        }
        keep
    });
    changed |= product.credit_allocation_rules.len() != before;

    for existing in &mut product.credit_allocation_rules {
        let Some(transaction_type) = existing.transaction_type else {
            continue;
        };
        // Present on both sides: consume it so only additions remain keyed.
        let Some(submitted_rule) = submitted_by_type.remove(&transaction_type) else {
            continue;
        };
        if !existing.has_same_order(&submitted_rule) {
            debug!(%transaction_type, "overwriting credit allocation order");
            existing.allocation_order = submitted_rule.allocation_order;
            changed = true;
        }
    }

    for transaction_type in submitted_order {
        if let Some(rule) = submitted_by_type.remove(&transaction_type) {
            debug!(%transaction_type, "adding credit allocation rule");
            product.credit_allocation_rules.push(rule);
            changed = true;
        }
    }

    changed
}

/// Reconcile the product's payment allocation rules with a submitted set
///
/// Same contract as [`merge_credit_allocation_rules`]; the overwrite also
/// covers the future-installment rule.
pub fn merge_payment_allocation_rules(
    product: &mut LoanProductAllocations,
    submitted: Vec<PaymentAllocationRule>,
) -> bool {
    let mut changed = false;
    let (mut submitted_by_type, submitted_order) =
        key_by_type(submitted, |r: &PaymentAllocationRule| r.transaction_type);

    let before = product.payment_allocation_rules.len();
    product.payment_allocation_rules.retain(|rule| {
        let keep = rule
            .transaction_type
            .is_some_and(|t| submitted_by_type.contains_key(&t));
        if !keep {
            debug!(transaction_type = ?rule.transaction_type, "removing payment allocation rule");
        }
        keep
    });
    changed |= product.payment_allocation_rules.len() != before;

    for existing in &mut product.payment_allocation_rules {
        let Some(transaction_type) = existing.transaction_type else {
            continue;
        };
        let Some(submitted_rule) = submitted_by_type.remove(&transaction_type) else {
            continue;
        };
        if !existing.has_same_order(&submitted_rule) {
            debug!(%transaction_type, "overwriting payment allocation order");
            existing.allocation_order = submitted_rule.allocation_order;
            existing.future_installment_rule = submitted_rule.future_installment_rule;
            changed = true;
        }
    }

    for transaction_type in submitted_order {
        if let Some(rule) = submitted_by_type.remove(&transaction_type) {
            debug!(%transaction_type, "adding payment allocation rule");
            product.payment_allocation_rules.push(rule);
            changed = true;
        }
    }

    changed
}

/// Key rules by transaction type, last-write-wins, remembering first-seen key
/// order so additions land in submission order. Unresolved types are dropped;
/// they cannot survive validation.
fn key_by_type<R, T: Hash + Eq + Copy>(
    rules: Vec<R>,
    transaction_type: impl Fn(&R) -> Option<T>,
) -> (HashMap<T, R>, Vec<T>) {
    let mut keyed = HashMap::new();
    let mut order = Vec::new();
    for rule in rules {
        if let Some(t) = transaction_type(&rule) {
            if keyed.insert(t, rule).is_none() {
                order.push(t);
            }
        }
    }
    (keyed, order)
}
