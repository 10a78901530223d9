//! # Record Codec
//!
//! One customer per line, four pipe-delimited fields:
//!
//! ```text
//! <id>|<points>|<YYYY-MM-DD>|<balance>
//! C1001|2500|2024-03-15|120.5
//! ```
//!
//! Only the scalar fields are stored. A decoded customer has an empty cart
//! and no address. A `|` inside the identifier is not escaped and makes the
//! line undecodable.

use chrono::NaiveDate;
use checkout_core::Customer;
use tracing::warn;

use crate::error::DecodeError;

/// Field separator.
pub const DELIMITER: char = '|';

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Encodes the scalar fields of `customer` as one line (no newline).
pub fn encode_customer(customer: &Customer) -> String {
    format!(
        "{id}{d}{points}{d}{joined}{d}{balance:?}",
        id = customer.id(),
        points = customer.points(),
        joined = customer.joined_on().format(DATE_FORMAT),
        balance = customer.balance(),
        d = DELIMITER,
    )
}

/// Decodes one line, reporting why it failed.
///
/// Exactly four fields are required, so a trailing `|` is rejected rather
/// than read as an empty fifth field to drop.
pub fn try_decode(line: &str) -> Result<Customer, DecodeError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    let [id, points, joined, balance] = fields[..] else {
        return Err(DecodeError::FieldCount(fields.len()));
    };

    let points: u32 = points
        .parse()
        .map_err(|_| DecodeError::Points(points.to_string()))?;
    let joined = NaiveDate::parse_from_str(joined, DATE_FORMAT)
        .map_err(|_| DecodeError::JoinDate(joined.to_string()))?;
    let balance: f64 = balance
        .parse()
        .map_err(|_| DecodeError::Balance(balance.to_string()))?;

    Ok(Customer::new(id, joined, balance).with_points(points))
}

/// Decodes one raw line as read from disk. Bytes that are not UTF-8 make
/// only this line malformed.
pub fn try_decode_bytes(raw: &[u8]) -> Result<Customer, DecodeError> {
    let line = std::str::from_utf8(raw).map_err(|err| DecodeError::Encoding(err.valid_up_to()))?;
    try_decode(line)
}

/// Decodes one line, logging and dropping it when malformed.
pub fn decode_customer(line: &str) -> Option<Customer> {
    decode_record(line.as_bytes())
}

/// Decodes one raw line, logging and dropping it when malformed.
pub fn decode_record(raw: &[u8]) -> Option<Customer> {
    match try_decode_bytes(raw) {
        Ok(customer) => Some(customer),
        Err(reason) => {
            let line = String::from_utf8_lossy(raw);
            warn!(line = %line, %reason, "Skipping malformed customer record");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;
    use checkout_core::{Address, Cart, Product};
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_encode() {
        let customer = Customer::new("C1001", date(2024, 3, 15), 120.5).with_points(2500);
        assert_eq!(encode_customer(&customer), "C1001|2500|2024-03-15|120.5");
    }

    #[test]
    fn test_encode_keeps_decimal_point() {
        let customer = Customer::new("C1", date(2023, 1, 2), 100.0);
        assert_eq!(encode_customer(&customer), "C1|0|2023-01-02|100.0");
    }

    #[test]
    fn test_encode_ignores_cart_and_address() {
        let mut cart = Cart::new();
        cart.add_product(Product::new("Desk", "D-1", 300.0, 30))
            .unwrap();
        let customer = Customer::new("C2", date(2022, 12, 31), 0.25)
            .with_points(7)
            .with_cart(cart)
            .with_address(Address::new(1, "1 Main St.", "Ottawa", "ON", "K1A 0B1"));

        assert_eq!(encode_customer(&customer), "C2|7|2022-12-31|0.25");
    }

    #[test]
    fn test_decoded_customer_has_scalars_only() {
        let original = Customer::new("C3", date(2021, 6, 9), 0.1 + 0.2)
            .with_points(u32::MAX)
            .with_address(Address::new(9, "9 Elm Rd.", "Calgary", "AB", "T2P1J9"));

        let decoded = try_decode(&encode_customer(&original)).unwrap();
        assert_eq!(decoded.id(), "C3");
        assert_eq!(decoded.points(), u32::MAX);
        assert_eq!(decoded.joined_on(), date(2021, 6, 9));
        assert_eq!(decoded.balance(), 0.1 + 0.2);
        assert!(decoded.cart().is_empty());
        assert_eq!(decoded.cart().customer_id(), Some("C3"));
        assert!(decoded.address().is_none());
    }

    #[rstest]
    #[case::too_few("C1|10|2024-01-01", DecodeError::FieldCount(3))]
    #[case::trailing_delimiter("C1|10|2024-01-01|5.0|", DecodeError::FieldCount(5))]
    #[case::pipe_in_id("C|1|10|2024-01-01|5.0", DecodeError::FieldCount(5))]
    #[case::negative_points("C1|-10|2024-01-01|5.0", DecodeError::Points("-10".into()))]
    #[case::empty_points("C1||2024-01-01|5.0", DecodeError::Points("".into()))]
    #[case::bad_date("C1|10|01/02/2024|5.0", DecodeError::JoinDate("01/02/2024".into()))]
    #[case::impossible_date("C1|10|2024-02-30|5.0", DecodeError::JoinDate("2024-02-30".into()))]
    #[case::bad_balance("C1|10|2024-01-01|lots", DecodeError::Balance("lots".into()))]
    fn test_try_decode_rejects(#[case] line: &str, #[case] expected: DecodeError) {
        assert_eq!(try_decode(line).unwrap_err(), expected);
    }

    #[test]
    fn test_decode_customer_skips_malformed() {
        assert!(decode_customer("garbage").is_none());
        assert!(decode_customer("C1|10|2024-01-01|5").is_some());
    }

    #[test]
    fn test_non_utf8_line_is_an_encoding_error() {
        let raw = b"C3|7|2024-01-0\xFF|3.0";
        assert_eq!(try_decode_bytes(raw).unwrap_err(), DecodeError::Encoding(14));
        assert!(decode_record(raw).is_none());

        let customer = try_decode_bytes(b"C1|5|2024-01-01|1.0").unwrap();
        assert_eq!(customer.points(), 5);
    }

    #[test]
    fn test_malformed_line_is_logged_with_its_text() {
        let logs = capture_logs(|| {
            assert!(decode_customer("C1|ten|2024-01-01|5.0").is_none());
            assert!(decode_record(b"C2|7|2024-01-0\xFF|3.0").is_none());
        });

        assert!(logs.contains("Skipping malformed customer record"));
        assert!(logs.contains("C1|ten|2024-01-01|5.0"));
        assert!(logs.contains("invalid points 'ten'"));
        assert!(logs.contains("C2|7|2024-01-0\u{FFFD}|3.0"));
        assert!(logs.contains("invalid UTF-8 after byte 14"));
    }
}
