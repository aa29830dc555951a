//! OpenLend Types - Canonical domain types for loan-product configuration
//!
//! This crate contains the foundational types for the OpenLend allocation rule
//! engine with zero dependencies on other openlend crates. It defines:
//!
//! - The allocation taxonomy (allocation types, due types, and their cross-product)
//! - Transaction-type discriminators for payment and credit allocation rules
//! - The rule records owned by a loan product
//! - The validation error vocabulary with stable machine-readable codes
//!
//! # Architectural Invariants
//!
//! 1. A product declares at most one rule per transaction type
//! 2. A credit allocation order is a total order over the four allocation types
//! 3. A payment allocation order is a total order over all twelve bucket combinations
//! 4. Rules may exist only under the advanced payment allocation strategy

pub mod allocation;
pub mod transaction;
pub mod rule;
pub mod product;
pub mod error;

pub use allocation::*;
pub use transaction::*;
pub use rule::*;
pub use product::*;
pub use error::*;

/// Version of the OpenLend types schema
pub const TYPES_VERSION: &str = "0.1.0";
