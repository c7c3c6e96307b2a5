//! Cart commands. Every change goes through a store dispatch.
use std::io::Write;

use brewcart_core::api::{Action, CliError};

use crate::app::AppContext;
use crate::commands::cli::{CartArgs, CartCommand, OutputFormat};
use crate::commands::render;

pub async fn handle_cart(args: CartArgs, ctx: &AppContext) -> Result<(), CliError> {
    let store = ctx.store();
    let state = match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => store.state().await,
        CartCommand::Add {
            collection,
            id,
            size,
            quantity,
        } => {
            let known_size = {
                let state = store.state().await;
                let item = state.catalog(collection).get(&id).ok_or_else(|| {
                    CliError::Command(format!("no {collection} item with id {id}"))
                })?;
                item.prices.iter().any(|t| t.size == size)
            };
            if !known_size {
                return Err(CliError::Command(format!("{id} is not sold in size {size}")));
            }
            store
                .add_item(collection, &id, &size, quantity)
                .await
                .ok_or_else(|| CliError::Command(format!("no {collection} item with id {id}")))?
        }
        CartCommand::Remove { id, size } => {
            require_line(ctx, &id, &size).await?;
            store.dispatch(Action::remove_from_cart(id, size)).await
        }
        CartCommand::Update { id, size, quantity } => {
            require_line(ctx, &id, &size).await?;
            store.dispatch(update_action(id, size, quantity)).await
        }
        CartCommand::Clear => store.dispatch(Action::ClearCart).await,
    };

    let mut out = std::io::stdout().lock();
    match ctx.format() {
        OutputFormat::Json => writeln!(out, "{}", render::cart_json(&state.cart))?,
        OutputFormat::Text => render::write_cart(&mut out, &state.cart)?,
    }
    Ok(())
}

/// A quantity of zero removes the line.
fn update_action(id: String, size: String, quantity: u32) -> Action {
    if quantity == 0 {
        Action::remove_from_cart(id, size)
    } else {
        Action::update_cart_quantity(id, size, quantity)
    }
}

async fn require_line(ctx: &AppContext, id: &str, size: &str) -> Result<(), CliError> {
    if ctx.store().state().await.cart.line(id, size).is_none() {
        return Err(CliError::Command(format!("no cart line for {id} ({size})")));
    }
    Ok(())
}
