//! Allocation taxonomy for loan-product payment processing
//!
//! A payment (or credit) applied to a loan is split across four obligation
//! buckets, segmented by how the target installment relates to its due date.
//! The taxonomy here is closed: every dispatch over it is exhaustive.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Obligation bucket a slice of a transaction can be applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationType {
    /// Penalty charges
    Penalty,
    /// Fee charges
    Fee,
    /// Principal portion of the installment
    Principal,
    /// Interest portion of the installment
    Interest,
}

impl AllocationType {
    /// All four allocation types, in canonical order
    pub fn all() -> [AllocationType; 4] {
        [Self::Penalty, Self::Fee, Self::Principal, Self::Interest]
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Penalty => "Penalty",
            Self::Fee => "Fee",
            Self::Principal => "Principal",
            Self::Interest => "Interest",
        }
    }
}

impl fmt::Display for AllocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Timing of the target installment relative to its due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DueType {
    /// Installment is overdue
    PastDue,
    /// Installment is due on the transaction date
    Due,
    /// Installment falls after the transaction date
    InAdvance,
}

impl DueType {
    /// All three due types, in canonical order
    pub fn all() -> [DueType; 3] {
        [Self::PastDue, Self::Due, Self::InAdvance]
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::PastDue => "Past due",
            Self::Due => "Due",
            Self::InAdvance => "In advance",
        }
    }
}

impl fmt::Display for DueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One of the twelve (due type, allocation type) buckets
///
/// A payment allocation order assigns a priority to each of these, so a
/// strategy can e.g. clear past-due penalties before in-advance principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentAllocationType {
    PastDuePenalty,
    PastDueFee,
    PastDuePrincipal,
    PastDueInterest,
    DuePenalty,
    DueFee,
    DuePrincipal,
    DueInterest,
    InAdvancePenalty,
    InAdvanceFee,
    InAdvancePrincipal,
    InAdvanceInterest,
}

impl PaymentAllocationType {
    /// All twelve combinations, in the canonical default order
    pub fn all() -> [PaymentAllocationType; 12] {
        [
            Self::PastDuePenalty,
            Self::PastDueFee,
            Self::PastDuePrincipal,
            Self::PastDueInterest,
            Self::DuePenalty,
            Self::DueFee,
            Self::DuePrincipal,
            Self::DueInterest,
            Self::InAdvancePenalty,
            Self::InAdvanceFee,
            Self::InAdvancePrincipal,
            Self::InAdvanceInterest,
        ]
    }

    /// The due-state axis of this bucket
    pub fn due_type(&self) -> DueType {
        match self {
            Self::PastDuePenalty | Self::PastDueFee | Self::PastDuePrincipal | Self::PastDueInterest => DueType::PastDue,
            Self::DuePenalty | Self::DueFee | Self::DuePrincipal | Self::DueInterest => DueType::Due,
            Self::InAdvancePenalty | Self::InAdvanceFee | Self::InAdvancePrincipal | Self::InAdvanceInterest => {
                DueType::InAdvance
            }
        }
    }

    /// The obligation axis of this bucket
    pub fn allocation_type(&self) -> AllocationType {
        match self {
            Self::PastDuePenalty | Self::DuePenalty | Self::InAdvancePenalty => AllocationType::Penalty,
            Self::PastDueFee | Self::DueFee | Self::InAdvanceFee => AllocationType::Fee,
            Self::PastDuePrincipal | Self::DuePrincipal | Self::InAdvancePrincipal => AllocationType::Principal,
            Self::PastDueInterest | Self::DueInterest | Self::InAdvanceInterest => AllocationType::Interest,
        }
    }

    /// Build the bucket for a (due type, allocation type) pair
    pub fn from_parts(due_type: DueType, allocation_type: AllocationType) -> Self {
        match (due_type, allocation_type) {
            (DueType::PastDue, AllocationType::Penalty) => Self::PastDuePenalty,
            (DueType::PastDue, AllocationType::Fee) => Self::PastDueFee,
            (DueType::PastDue, AllocationType::Principal) => Self::PastDuePrincipal,
            (DueType::PastDue, AllocationType::Interest) => Self::PastDueInterest,
            (DueType::Due, AllocationType::Penalty) => Self::DuePenalty,
            (DueType::Due, AllocationType::Fee) => Self::DueFee,
            (DueType::Due, AllocationType::Principal) => Self::DuePrincipal,
            (DueType::Due, AllocationType::Interest) => Self::DueInterest,
            (DueType::InAdvance, AllocationType::Penalty) => Self::InAdvancePenalty,
            (DueType::InAdvance, AllocationType::Fee) => Self::InAdvanceFee,
            (DueType::InAdvance, AllocationType::Principal) => Self::InAdvancePrincipal,
            (DueType::InAdvance, AllocationType::Interest) => Self::InAdvanceInterest,
        }
    }

    /// Human-readable label, e.g. "Past due penalty"
    pub fn label(&self) -> String {
        format!("{} {}", self.due_type().label(), self.allocation_type().label().to_lowercase())
    }
}

impl fmt::Display for PaymentAllocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How the remainder is applied once the current installment is exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FutureInstallmentAllocationRule {
    /// Apply to the chronologically next installment
    NextInstallment,
    /// Apply to the final installment first
    LastInstallment,
    /// Spread evenly across remaining installments
    Reamortization,
}

impl FutureInstallmentAllocationRule {
    /// All three rules
    pub fn all() -> [FutureInstallmentAllocationRule; 3] {
        [Self::NextInstallment, Self::LastInstallment, Self::Reamortization]
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::NextInstallment => "Next installment",
            Self::LastInstallment => "Last installment",
            Self::Reamortization => "Reamortization",
        }
    }
}

impl fmt::Display for FutureInstallmentAllocationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
