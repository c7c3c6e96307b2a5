//! Checkout: validates billing details, converts the cart total and hands
//! the request to a [`CheckoutProvider`]. A successful charge takes the
//! charged lines out of the cart.

mod provider;
mod types;

pub use provider::CheckoutProvider;
pub use types::{BillingDetails, CheckoutPricing, CheckoutRequest, Receipt};

use chrono::Utc;
use tracing::{info, warn};

use crate::action::Action;
use crate::config::CheckoutConfig;
use crate::error::CheckoutError;
use crate::state::{StateEvent, Store};

impl CheckoutPricing {
    pub fn from_config(cfg: &CheckoutConfig) -> Self {
        Self {
            currency: cfg.currency.clone(),
            exchange_rate: cfg.exchange_rate,
        }
    }
}

impl Store {
    /// Charges the current cart.
    ///
    /// The cart is left untouched when validation or the charge fails. On
    /// success only the charged quantities are removed, so lines added while
    /// the charge was in flight remain.
    pub async fn checkout(
        &self,
        billing: BillingDetails,
        pricing: &CheckoutPricing,
        provider: &dyn CheckoutProvider,
    ) -> Result<Receipt, CheckoutError> {
        billing.validate()?;

        let state = self.state().await;
        if state.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let request = CheckoutRequest {
            billing,
            lines: state.cart.lines.clone(),
            total_price: state.cart.total_price,
            amount_minor: pricing.amount_minor(state.cart.total_price),
            currency: pricing.currency.clone(),
        };

        let receipt = match provider.charge(&request).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "Checkout declined");
                return Err(CheckoutError::Declined {
                    provider: provider.name().to_string(),
                    source: e,
                });
            }
        };

        info!(
            provider = provider.name(),
            transaction_ref = %receipt.transaction_ref,
            amount_minor = receipt.amount_minor,
            currency = %receipt.currency,
            "Checkout completed"
        );
        self.dispatch(Action::SettleCart(request.lines)).await;
        self.emit_event(StateEvent::CheckoutCompleted {
            transaction_ref: receipt.transaction_ref.clone(),
            amount_minor: receipt.amount_minor,
            currency: receipt.currency.clone(),
            timestamp: Utc::now(),
        });
        Ok(receipt)
    }
}
