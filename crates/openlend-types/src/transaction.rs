//! Transaction-type discriminators for allocation rules
//!
//! A loan product declares at most one allocation rule per transaction type.
//! Payment-side and credit-side rules draw from different discriminator
//! domains: payments cover the full set of money-in transaction kinds, while
//! credits cover the transactions that put money back onto the loan.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Transaction kinds a payment allocation rule can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentTransactionType {
    /// Catch-all bucket; the advanced strategy requires exactly one default rule
    Default,
    Repayment,
    DownPayment,
    MerchantIssuedRefund,
    PayoutRefund,
    GoodwillCredit,
    ChargeRefund,
    ChargeAdjustment,
    Chargeback,
    InterestPaymentWaiver,
}

impl PaymentTransactionType {
    /// All payment transaction types
    pub fn all() -> [PaymentTransactionType; 10] {
        [
            Self::Default,
            Self::Repayment,
            Self::DownPayment,
            Self::MerchantIssuedRefund,
            Self::PayoutRefund,
            Self::GoodwillCredit,
            Self::ChargeRefund,
            Self::ChargeAdjustment,
            Self::Chargeback,
            Self::InterestPaymentWaiver,
        ]
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Repayment => "Repayment",
            Self::DownPayment => "Down payment",
            Self::MerchantIssuedRefund => "Merchant issued refund",
            Self::PayoutRefund => "Payout refund",
            Self::GoodwillCredit => "Goodwill credit",
            Self::ChargeRefund => "Charge refund",
            Self::ChargeAdjustment => "Charge adjustment",
            Self::Chargeback => "Chargeback",
            Self::InterestPaymentWaiver => "Interest payment waiver",
        }
    }
}

impl fmt::Display for PaymentTransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Transaction kinds a credit allocation rule can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditTransactionType {
    Chargeback,
    GoodwillCredit,
    MerchantIssuedRefund,
    PayoutRefund,
    Repayment,
}

impl CreditTransactionType {
    /// All credit transaction types
    pub fn all() -> [CreditTransactionType; 5] {
        [
            Self::Chargeback,
            Self::GoodwillCredit,
            Self::MerchantIssuedRefund,
            Self::PayoutRefund,
            Self::Repayment,
        ]
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Chargeback => "Chargeback",
            Self::GoodwillCredit => "Goodwill credit",
            Self::MerchantIssuedRefund => "Merchant issued refund",
            Self::PayoutRefund => "Payout refund",
            Self::Repayment => "Repayment",
        }
    }
}

impl fmt::Display for CreditTransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&PaymentTransactionType::MerchantIssuedRefund).unwrap();
        assert_eq!(json, "\"MERCHANT_ISSUED_REFUND\"");

        let parsed: CreditTransactionType = serde_json::from_str("\"CHARGEBACK\"").unwrap();
        assert_eq!(parsed, CreditTransactionType::Chargeback);
    }

    #[test]
    fn test_all_listings_are_distinct() {
        let payment = PaymentTransactionType::all();
        assert_eq!(payment.len(), 10);
        let credit = CreditTransactionType::all();
        assert_eq!(credit.len(), 5);
    }
}
