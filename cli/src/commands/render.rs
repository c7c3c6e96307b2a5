//! Plain-text rendering of catalog items and the cart.

use std::io::{self, Write};

use brewcart_core::api::{CartLine, CartState, CatalogItem};

fn currency_of(tiers: &[brewcart_core::api::PriceTier]) -> &str {
    tiers.first().map(|t| t.currency.as_str()).unwrap_or("")
}

pub fn item_row(item: &CatalogItem) -> String {
    let prices = item
        .prices
        .iter()
        .map(|t| format!("{} {}{}", t.size, t.currency, t.price))
        .collect::<Vec<_>>()
        .join("  ");
    let mark = if item.favorite { " *" } else { "" };
    format!(
        "{:<4} {:<16} {:<16} {:.1}  {}{}",
        item.id, item.name, item.roasted, item.average_rating, prices, mark
    )
}

pub fn write_items<'a>(
    out: &mut impl Write,
    items: impl IntoIterator<Item = &'a CatalogItem>,
) -> io::Result<usize> {
    let mut count = 0;
    for item in items {
        writeln!(out, "{}", item_row(item))?;
        count += 1;
    }
    if count == 0 {
        writeln!(out, "(no items)")?;
    }
    Ok(count)
}

pub fn line_row(line: &CartLine) -> String {
    let currency = currency_of(&line.prices);
    format!(
        "{:<4} {:<16} {:<6} x{:<3} @ {}{:.2} = {}{:.2}",
        line.id,
        line.name,
        line.size,
        line.quantity,
        currency,
        line.unit_price(),
        currency,
        line.line_total()
    )
}

pub fn write_cart(out: &mut impl Write, cart: &CartState) -> io::Result<()> {
    if cart.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }
    for line in &cart.lines {
        writeln!(out, "{}", line_row(line))?;
    }
    let currency = cart
        .lines
        .first()
        .map(|l| currency_of(&l.prices))
        .unwrap_or("");
    writeln!(
        out,
        "Items: {}  Total: {}{:.2}",
        cart.item_count(),
        currency,
        cart.total_price
    )
}

pub fn cart_json(cart: &CartState) -> serde_json::Value {
    serde_json::json!({
        "lines": cart.lines,
        "itemCount": cart.item_count(),
        "totalPrice": cart.total_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewcart_core::api::{ImageRef, ItemKind, PriceTier};
    use pretty_assertions::assert_eq;

    fn americano() -> CatalogItem {
        CatalogItem {
            id: "C1".into(),
            name: "Americano".into(),
            description: String::new(),
            roasted: "Medium Roasted".into(),
            image_square: ImageRef::unresolved(),
            image_portrait: ImageRef::unresolved(),
            ingredients: String::new(),
            special_ingredient: String::new(),
            prices: vec![PriceTier::new("S", "3.15", "$"), PriceTier::new("M", "5.04", "$")],
            average_rating: 4.7,
            ratings_count: String::new(),
            favorite: true,
            kind: ItemKind::Coffee,
            index: 0,
        }
    }

    #[test]
    fn test_item_row() {
        assert_eq!(
            item_row(&americano()),
            "C1   Americano        Medium Roasted   4.7  S $3.15  M $5.04 *"
        );
    }

    #[test]
    fn test_write_cart() {
        let cart = CartState::with_lines(vec![CartLine::from_item(&americano(), "S", 2)]);
        let mut out = Vec::new();
        write_cart(&mut out, &cart).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "C1   Americano        S      x2   @ $3.15 = $6.30\nItems: 2  Total: $6.30\n"
        );

        let mut out = Vec::new();
        write_cart(&mut out, &CartState::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Cart is empty\n");
    }

    #[test]
    fn test_cart_json() {
        let cart = CartState::with_lines(vec![CartLine::from_item(&americano(), "M", 1)]);
        let json = cart_json(&cart);
        assert_eq!(json["itemCount"], 1);
        assert_eq!(json["lines"][0]["id"], "C1");
        assert!(json["lines"][0].get("imageSquare").is_none());
    }
}
