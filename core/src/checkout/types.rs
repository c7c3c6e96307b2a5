use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::cart::CartLine;
use crate::error::CheckoutError;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDetails {
    pub name: String,
    pub email: String,
    pub mobile: String,
}

impl BillingDetails {
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.mobile.trim().is_empty() {
            return Err(CheckoutError::InvalidBilling(
                "name, email and mobile are required".to_string(),
            ));
        }
        if !email_pattern().is_match(self.email.trim()) {
            return Err(CheckoutError::InvalidBilling(format!(
                "not a valid email address: {}",
                self.email.trim()
            )));
        }
        Ok(())
    }
}

/// Conversion from the catalog currency to what the provider charges in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutPricing {
    pub currency: String,
    pub exchange_rate: f64,
}

impl Default for CheckoutPricing {
    fn default() -> Self {
        Self {
            currency: "KES".to_string(),
            exchange_rate: 130.0,
        }
    }
}

impl CheckoutPricing {
    /// `total` in minor units (cents) of the target currency.
    pub fn amount_minor(&self, total: f64) -> u64 {
        let minor = (total * self.exchange_rate * 100.0).round();
        if minor.is_finite() && minor > 0.0 {
            minor as u64
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub billing: BillingDetails,
    pub lines: Vec<CartLine>,
    /// Cart total in catalog currency.
    pub total_price: f64,
    pub amount_minor: u64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_ref: String,
    pub amount_minor: u64,
    pub currency: String,
    pub email: String,
    pub paid_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn billing(name: &str, email: &str, mobile: &str) -> BillingDetails {
        BillingDetails {
            name: name.into(),
            email: email.into(),
            mobile: mobile.into(),
        }
    }

    #[test]
    fn test_billing_validation() {
        assert!(billing("Ada", "ada@example.com", "0700000000").validate().is_ok());
        assert!(matches!(
            billing("", "ada@example.com", "0700000000").validate(),
            Err(CheckoutError::InvalidBilling(_))
        ));
        assert!(billing("Ada", "ada@example", "0700000000").validate().is_err());
        assert!(billing("Ada", "ada @x.io", "0700000000").validate().is_err());
        assert!(billing("Ada", "ada@x.io", "  ").validate().is_err());
    }

    #[test]
    fn test_amount_minor() {
        let pricing = CheckoutPricing::default();
        assert_eq!(pricing.amount_minor(4.0), 52_000);
        assert_eq!(pricing.amount_minor(12.38), 160_940);
        assert_eq!(pricing.amount_minor(0.0), 0);

        let usd = CheckoutPricing {
            currency: "USD".into(),
            exchange_rate: 1.0,
        };
        assert_eq!(usd.amount_minor(3.15), 315);
    }
}
