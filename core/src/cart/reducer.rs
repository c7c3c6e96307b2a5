//! Cart transitions. Every mutation recomputes the total from scratch.

use super::types::{CartLine, CartState};

/// Merge-adds `entry`: an existing `(id, size)` line grows by
/// `entry.quantity`, otherwise the entry is appended.
pub fn add_line(state: &CartState, entry: &CartLine) -> CartState {
    let mut lines = state.lines.clone();
    match lines.iter_mut().find(|l| l.matches(&entry.id, &entry.size)) {
        Some(line) => line.quantity = line.quantity.saturating_add(entry.quantity),
        None => lines.push(entry.clone()),
    }
    CartState::with_lines(lines)
}

/// `None` when no line has this key.
pub fn remove_line(state: &CartState, id: &str, size: &str) -> Option<CartState> {
    let pos = state.lines.iter().position(|l| l.matches(id, size))?;
    let mut lines = state.lines.clone();
    lines.remove(pos);
    Some(CartState::with_lines(lines))
}

/// Sets the absolute quantity of an existing line. The value is taken as
/// given: dropping a line is `remove_line`'s job.
pub fn update_quantity(state: &CartState, id: &str, size: &str, quantity: u32) -> Option<CartState> {
    let pos = state.lines.iter().position(|l| l.matches(id, size))?;
    let mut lines = state.lines.clone();
    lines[pos].quantity = quantity;
    Some(CartState::with_lines(lines))
}

/// `None` when the cart is already empty.
pub fn clear(state: &CartState) -> Option<CartState> {
    if state.lines.is_empty() && state.total_price == 0.0 {
        return None;
    }
    Some(CartState::default())
}

/// Subtracts each charged line's quantity from the matching line, dropping
/// lines that reach zero. `None` when nothing matched.
pub fn settle(state: &CartState, charged: &[CartLine]) -> Option<CartState> {
    let mut lines = state.lines.clone();
    let mut touched = false;
    for paid in charged {
        let Some(pos) = lines.iter().position(|l| l.matches(&paid.id, &paid.size)) else {
            continue;
        };
        touched = true;
        if lines[pos].quantity <= paid.quantity {
            lines.remove(pos);
        } else {
            lines[pos].quantity -= paid.quantity;
        }
    }
    touched.then(|| CartState::with_lines(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ImageRef, ItemKind, PriceTier};

    const EPS: f64 = 1e-9;

    fn line(id: &str, size: &str, quantity: u32) -> CartLine {
        CartLine {
            id: id.into(),
            size: size.into(),
            quantity,
            kind: ItemKind::Coffee,
            name: "Cappuccino".into(),
            roasted: "Medium Roasted".into(),
            image_square: ImageRef::new("coffee/cappuccino.png"),
            special_ingredient: "With Steamed Milk".into(),
            prices: vec![
                PriceTier::new("S", "2.50", "$"),
                PriceTier::new("M", "4.00", "$"),
                PriceTier::new("L", "5.25", "$"),
            ],
        }
    }

    #[test]
    fn test_worked_example() {
        let s = CartState::default();
        let s = add_line(&s, &line("c1", "M", 1));
        assert!((s.total_price - 4.00).abs() < EPS);

        let s = add_line(&s, &line("c1", "M", 2));
        assert_eq!(s.lines.len(), 1);
        assert_eq!(s.lines[0].quantity, 3);
        assert!((s.total_price - 12.00).abs() < EPS);

        let s = update_quantity(&s, "c1", "M", 1).unwrap();
        assert!((s.total_price - 4.00).abs() < EPS);

        let s = remove_line(&s, "c1", "M").unwrap();
        assert!(s.lines.is_empty());
        assert_eq!(s.total_price, 0.0);
    }

    #[test]
    fn test_sizes_are_separate_lines() {
        let s = add_line(&CartState::default(), &line("c1", "S", 1));
        let s = add_line(&s, &line("c1", "L", 2));
        assert_eq!(s.lines.len(), 2);
        assert!((s.total_price - (2.50 + 2.0 * 5.25)).abs() < EPS);
        assert_eq!(s.item_count(), 3);
    }

    #[test]
    fn test_missing_key_is_noop() {
        let s = add_line(&CartState::default(), &line("c1", "M", 1));
        assert!(remove_line(&s, "c1", "L").is_none());
        assert!(remove_line(&s, "c2", "M").is_none());
        assert!(update_quantity(&s, "c2", "M", 5).is_none());
    }

    #[test]
    fn test_update_to_zero_keeps_line() {
        let s = add_line(&CartState::default(), &line("c1", "M", 2));
        let s = update_quantity(&s, "c1", "M", 0).unwrap();
        assert_eq!(s.lines.len(), 1);
        assert_eq!(s.lines[0].quantity, 0);
        assert_eq!(s.total_price, 0.0);
    }

    #[test]
    fn test_unknown_size_prices_at_zero() {
        let s = add_line(&CartState::default(), &line("c1", "XL", 3));
        assert_eq!(s.total_price, 0.0);
    }

    #[test]
    fn test_clear() {
        assert!(clear(&CartState::default()).is_none());
        let s = add_line(&CartState::default(), &line("c1", "M", 2));
        let s = clear(&s).unwrap();
        assert_eq!(s, CartState::default());
    }

    #[test]
    fn test_settle_keeps_quantities_added_after_charge() {
        let charged = vec![line("c1", "M", 2), line("c2", "S", 1)];
        let s = add_line(&CartState::default(), &line("c1", "M", 3));
        let s = add_line(&s, &line("c2", "S", 1));
        let s = add_line(&s, &line("c3", "L", 1));

        let s = settle(&s, &charged).unwrap();
        assert_eq!(s.lines.len(), 2);
        assert_eq!(s.line("c1", "M").unwrap().quantity, 1);
        assert!(s.line("c2", "S").is_none());
        assert!((s.total_price - 9.25).abs() < EPS);

        assert!(settle(&CartState::default(), &charged).is_none());
        let only_charged = add_line(&CartState::default(), &line("c1", "M", 2));
        assert_eq!(settle(&only_charged, &charged).unwrap(), CartState::default());
    }
}
