use std::io::Write;

use brewcart_core::api::{BillingDetails, CheckoutPricing, CliError};
use brewcart_plugins::factory;

use crate::app::AppContext;
use crate::commands::cli::{CheckoutArgs, OutputFormat};

pub async fn handle_checkout(args: CheckoutArgs, ctx: &AppContext) -> Result<(), CliError> {
    let provider = factory::build_checkout(ctx.cfg())?;
    let pricing = CheckoutPricing::from_config(&ctx.cfg().checkout);
    let billing = BillingDetails {
        name: args.name,
        email: args.email,
        mobile: args.mobile,
    };

    let receipt = ctx
        .store()
        .checkout(billing, &pricing, provider.as_ref())
        .await?;

    let mut out = std::io::stdout().lock();
    match ctx.format() {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&receipt)?)?,
        OutputFormat::Text => {
            writeln!(out, "Payment successful")?;
            writeln!(out, "Reference: {}", receipt.transaction_ref)?;
            writeln!(
                out,
                "Charged:   {} {:.2}",
                receipt.currency,
                receipt.amount_minor as f64 / 100.0
            )?;
        }
    }
    Ok(())
}
