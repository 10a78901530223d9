//! # Receipt Rendering
//!
//! Formats a cart and its payable total as plain text. Printing is left to
//! the caller.
//!
//! ```text
//! Item     Qty          Price
//!
//! RTX 4090 x1           2000.00
//!
//! ==============================
//! Total                 2242.50
//! ```

use crate::types::Cart;

const SEPARATOR: &str = "==============================";

/// Renders the receipt for `cart` with the already computed `total`.
pub fn render_receipt(cart: &Cart, total: f64) -> String {
    let mut out = String::from("Item\t Qty\t \t \t Price\n\n");
    for item in cart.items() {
        out.push_str(&format!(
            "{}\t x{}\t \t \t \t {:.2}\n",
            item.name, item.quantity, item.price
        ));
    }
    out.push_str(&format!("\n{SEPARATOR}\nTotal\t \t \t \t \t {total:.2}\n"));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    #[test]
    fn test_receipt_lists_items_and_total() {
        let mut cart = Cart::new();
        cart.add_product(Product::new("RTX 4090", "1111", 2000.0, 0))
            .unwrap();
        cart.add_product(Product::new("Cable", "22", 4.5, 0).with_quantity(3))
            .unwrap();

        let receipt = render_receipt(&cart, 2242.5);
        let lines: Vec<&str> = receipt.lines().collect();

        assert_eq!(lines[0], "Item\t Qty\t \t \t Price");
        assert_eq!(lines[2], "RTX 4090\t x1\t \t \t \t 2000.00");
        assert_eq!(lines[3], "Cable\t x3\t \t \t \t 4.50");
        assert_eq!(lines[5], SEPARATOR);
        assert_eq!(lines[6], "Total\t \t \t \t \t 2242.50");
    }

    #[test]
    fn test_empty_cart_receipt() {
        let receipt = render_receipt(&Cart::new(), 0.0);
        assert!(receipt.ends_with("Total\t \t \t \t \t 0.00\n"));
        assert_eq!(receipt.lines().count(), 5);
    }

    #[test]
    fn test_single_item_receipt_text() {
        let mut cart = Cart::new();
        cart.add_product(Product::new("Desk", "D-1", 300.0, 0))
            .unwrap();

        assert_eq!(
            render_receipt(&cart, 345.0),
            "Item\t Qty\t \t \t Price\n\n\
             Desk\t x1\t \t \t \t 300.00\n\n\
             ==============================\n\
             Total\t \t \t \t \t 345.00\n"
        );
    }
}
