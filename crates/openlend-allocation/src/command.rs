//! Assembly of allocation rules from a product create/update command
//!
//! The command body is the JSON the API layer already parsed into a
//! `serde_json::Value`. Assembly resolves the enum spellings, rebuilds each
//! rule's ordered allocation list from its `order` attributes, and runs the
//! full validator stack so the caller gets every violation in one pass.
//!
//! An absent parameter means "not supplied" and yields `None`; an empty array
//! yields an empty rule list (which removes every rule on reconcile). An
//! unrecognized transaction type resolves to `None` on the rule and is
//! reported by validation; an unrecognized allocation bucket or
//! future-installment spelling is a malformed-parameter failure, the same
//! hard lookup failure serde gives any bad wire value.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use openlend_types::{
    AllocationType, CreditAllocationRule, FutureInstallmentAllocationRule, PaymentAllocationRule,
    PaymentAllocationType, RuleValidationError,
};

use crate::validator::{
    validate_credit_allocation_order, validate_credit_allocations,
    validate_payment_allocation_order, validate_payment_allocations,
};

/// Failure while assembling rules from a command
#[derive(Debug, Error)]
pub enum CommandError {
    /// The parameter's JSON shape or an enum spelling inside it is invalid
    #[error("malformed '{param}' parameter: {source}")]
    Malformed {
        param: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The assembled rules violate the strategy's structural constraints
    #[error(transparent)]
    Validation(#[from] RuleValidationError),
}

/// Command parameter carrying credit allocation rules
pub const CREDIT_ALLOCATION_PARAM: &str = "creditAllocation";
/// Command parameter carrying payment allocation rules
pub const PAYMENT_ALLOCATION_PARAM: &str = "paymentAllocation";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreditAllocationEntry {
    #[serde(default)]
    transaction_type: Option<String>,
    #[serde(default)]
    credit_allocation_order: Vec<CreditOrderEntry>,
}

#[derive(Debug, Deserialize)]
struct CreditOrderEntry {
    #[serde(rename = "creditAllocationRule")]
    rule: AllocationType,
    order: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentAllocationEntry {
    #[serde(default)]
    transaction_type: Option<String>,
    #[serde(default)]
    payment_allocation_order: Vec<PaymentOrderEntry>,
    #[serde(default)]
    future_installment_allocation_rule: Option<FutureInstallmentAllocationRule>,
}

#[derive(Debug, Deserialize)]
struct PaymentOrderEntry {
    #[serde(rename = "paymentAllocationRule")]
    rule: PaymentAllocationType,
    order: usize,
}

/// Assemble and validate the credit allocation rules of a command
///
/// Returns `Ok(None)` when the parameter is not supplied.
pub fn assemble_credit_allocation_rules(
    command: &Value,
    strategy_code: &str,
) -> Result<Option<Vec<CreditAllocationRule>>, CommandError> {
    let Some(param) = command.get(CREDIT_ALLOCATION_PARAM) else {
        return Ok(None);
    };
    let entries: Vec<CreditAllocationEntry> =
        serde_json::from_value(param.clone()).map_err(|source| CommandError::Malformed {
            param: CREDIT_ALLOCATION_PARAM,
            source,
        })?;

    let mut violations = Vec::new();
    let mut rules = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut order = entry.credit_allocation_order;
        order.sort_by_key(|e| e.order);
        let pairs: Vec<_> = order.iter().map(|e| (e.order, e.rule)).collect();
        if let Err(err) = validate_credit_allocation_order(&pairs) {
            violations.extend(err.into_violations());
        }
        rules.push(CreditAllocationRule {
            transaction_type: resolve(entry.transaction_type),
            allocation_order: order.into_iter().map(|e| e.rule).collect(),
        });
    }
    if let Err(err) = validate_credit_allocations(&rules, strategy_code) {
        violations.extend(err.into_violations());
    }

    if violations.is_empty() {
        Ok(Some(rules))
    } else {
        Err(RuleValidationError::new(violations).into())
    }
}

/// Assemble and validate the payment allocation rules of a command
///
/// Returns `Ok(None)` when the parameter is not supplied.
pub fn assemble_payment_allocation_rules(
    command: &Value,
    strategy_code: &str,
) -> Result<Option<Vec<PaymentAllocationRule>>, CommandError> {
    let Some(param) = command.get(PAYMENT_ALLOCATION_PARAM) else {
        return Ok(None);
    };
    let entries: Vec<PaymentAllocationEntry> =
        serde_json::from_value(param.clone()).map_err(|source| CommandError::Malformed {
            param: PAYMENT_ALLOCATION_PARAM,
            source,
        })?;

    let mut violations = Vec::new();
    let mut rules = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut order = entry.payment_allocation_order;
        order.sort_by_key(|e| e.order);
        let pairs: Vec<_> = order.iter().map(|e| (e.order, e.rule)).collect();
        if let Err(err) = validate_payment_allocation_order(&pairs) {
            violations.extend(err.into_violations());
        }
        rules.push(PaymentAllocationRule {
            transaction_type: resolve(entry.transaction_type),
            allocation_order: order.into_iter().map(|e| e.rule).collect(),
            future_installment_rule: entry.future_installment_allocation_rule,
        });
    }
    if let Err(err) = validate_payment_allocations(&rules, strategy_code) {
        violations.extend(err.into_violations());
    }

    if violations.is_empty() {
        Ok(Some(rules))
    } else {
        Err(RuleValidationError::new(violations).into())
    }
}

/// Resolve an enum spelling; unknown values become `None` for validation to
/// report
fn resolve<T: DeserializeOwned>(raw: Option<String>) -> Option<T> {
    raw.and_then(|s| serde_json::from_value(Value::String(s)).ok())
}
