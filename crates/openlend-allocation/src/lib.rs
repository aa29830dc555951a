//! OpenLend Allocation - Rule validation and reconciliation
//!
//! The rule engine behind a loan product's "advanced payment allocation"
//! strategy. A configuration change arrives as a list of submitted rules plus
//! the product's strategy code; the flow is:
//!
//! ```text
//! command -> assemble -> validate -> reconcile -> changed?
//! ```
//!
//! Validation accumulates every violation before failing, so the caller can
//! report all of them in a single bad-request response. Reconciliation diffs
//! the submitted rules against the product's current set and applies the
//! minimal add/remove/update, preserving unchanged records as-is. It never
//! raises: precondition violations are the validator's job, and validation
//! failure aborts the write before the reconciler runs.

pub mod command;
pub mod merger;
pub mod validator;

pub use command::{
    assemble_credit_allocation_rules, assemble_payment_allocation_rules, CommandError,
};
pub use merger::{merge_credit_allocation_rules, merge_payment_allocation_rules};
pub use validator::{
    validate_credit_allocation_order, validate_credit_allocations,
    validate_payment_allocation_order, validate_payment_allocations,
};
