//! Catalog, category and favorites commands.
use std::io::Write;
use std::sync::Arc;

use brewcart_core::api::{
    categories, filter_by_category, search, Action, CatalogItem, CliError, Collection,
};

use crate::app::AppContext;
use crate::commands::cli::{CatalogArgs, CategoriesArgs, FavoriteArgs, OutputFormat};
use crate::commands::render;

pub async fn handle_catalog(args: CatalogArgs, ctx: &AppContext) -> Result<(), CliError> {
    let state = ctx.store().state().await;
    let collections = match args.collection {
        Some(c) => vec![c],
        None => Collection::ALL.to_vec(),
    };

    let mut items: Vec<&CatalogItem> = Vec::new();
    for collection in collections {
        let all = state.catalog(collection).items.iter().map(Arc::as_ref);
        let mut selected = match args.category.as_deref() {
            Some(category) => filter_by_category(all, category),
            None => all.collect(),
        };
        if let Some(text) = args.search.as_deref() {
            selected = search(selected, text);
        }
        items.extend(selected);
    }
    tracing::debug!(count = items.len(), "Catalog listed");

    let mut out = std::io::stdout().lock();
    match ctx.format() {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&items)?)?,
        OutputFormat::Text => {
            render::write_items(&mut out, items)?;
        }
    }
    Ok(())
}

pub async fn handle_categories(args: CategoriesArgs, ctx: &AppContext) -> Result<(), CliError> {
    let state = ctx.store().state().await;
    let names = categories(state.catalog(args.collection).items.iter().map(Arc::as_ref));

    let mut out = std::io::stdout().lock();
    match ctx.format() {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&names)?)?,
        OutputFormat::Text => {
            for name in names {
                writeln!(out, "{name}")?;
            }
        }
    }
    Ok(())
}

pub async fn handle_favorite(args: FavoriteArgs, ctx: &AppContext) -> Result<(), CliError> {
    let exists = ctx
        .store()
        .state()
        .await
        .catalog(args.collection)
        .get(&args.id)
        .is_some();
    if !exists {
        return Err(CliError::Command(format!(
            "no {} item with id {}",
            args.collection, args.id
        )));
    }

    let state = ctx
        .store()
        .dispatch(Action::toggle_favorite(args.collection, args.id.clone()))
        .await;
    let favorite = state.catalog(args.collection).is_favorite(&args.id);

    let mut out = std::io::stdout().lock();
    match ctx.format() {
        OutputFormat::Json => writeln!(
            out,
            "{}",
            serde_json::json!({ "id": args.id, "collection": args.collection, "favorite": favorite })
        )?,
        OutputFormat::Text if favorite => writeln!(out, "{} added to favorites", args.id)?,
        OutputFormat::Text => writeln!(out, "{} removed from favorites", args.id)?,
    }
    Ok(())
}

pub async fn handle_favorites(ctx: &AppContext) -> Result<(), CliError> {
    let state = ctx.store().state().await;
    let items = state.favorite_items();

    let mut out = std::io::stdout().lock();
    match ctx.format() {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&items)?)?,
        OutputFormat::Text => {
            render::write_items(&mut out, items)?;
        }
    }
    Ok(())
}
