//! # Item List Parser
//!
//! Turns the free-text dish list a waiter types into structured line items.
//!
//! ## Input Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Large Burger 15.99,  Fries   3.99 , Coke 2.50"                       │
//! │        │                                                                │
//! │        ▼  split on ','  →  trim                                         │
//! │  ["Large Burger 15.99", "Fries   3.99", "Coke 2.50"]   ← segments       │
//! │        │                                                                │
//! │        ▼  split on whitespace runs                                      │
//! │  ["Large","Burger","15.99"]  ["Fries","3.99"]  ["Coke","2.50"]          │
//! │        │                                                                │
//! │        ▼  last token = price, the rest joined by one space = name       │
//! │  {Large Burger, 15.99}  {Fries, 3.99}  {Coke, 2.50}                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## All or Nothing
//! The first bad segment fails the whole call. A kitchen cannot act on an
//! order that silently lost a dish, so there are no partial results.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use ts_rs::TS;

use crate::money::{Money, MoneyParseError};

/// Separator between segments in the raw text.
pub const SEGMENT_SEPARATOR: char = ',';

// =============================================================================
// Line Item
// =============================================================================

/// One ordered dish.
///
/// Stored inside the order as `{"name": "Burger", "price": "10.99"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Dish name, single-spaced, never empty.
    pub name: String,

    /// Exact non-negative price.
    #[ts(type = "string")]
    pub price: Money,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        LineItem {
            name: name.into(),
            price,
        }
    }
}

/// Canonical `name price` form, e.g. `Large Burger 15.99`.
impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.price)
    }
}

// =============================================================================
// Parse Error
// =============================================================================

/// Category of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// Segment is empty or lacks a name or a price.
    MalformedSegment,
    /// Last token of a segment is not a valid amount.
    InvalidPrice,
}

/// A parse failure, pointing at the segment that caused it.
///
/// `index` is the 0-based position of the segment in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Fewer than two tokens (or nothing at all) in a segment.
    #[error("Invalid item format in segment {index}: '{segment}' (expected '<name> <price>')")]
    MalformedSegment { index: usize, segment: String },

    /// Price token rejected by [`Money::parse_decimal`].
    #[error("Invalid price '{token}' in segment {index}: {reason}")]
    InvalidPrice {
        index: usize,
        token: String,
        reason: MoneyParseError,
    },
}

impl ParseError {
    /// Returns the failure category.
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::MalformedSegment { .. } => ParseErrorKind::MalformedSegment,
            ParseError::InvalidPrice { .. } => ParseErrorKind::InvalidPrice,
        }
    }

    /// Returns the offending text: the whole segment or the price token.
    pub fn fragment(&self) -> &str {
        match self {
            ParseError::MalformedSegment { segment, .. } => segment,
            ParseError::InvalidPrice { token, .. } => token,
        }
    }

    /// Returns the 0-based index of the failing segment.
    pub fn segment_index(&self) -> usize {
        match self {
            ParseError::MalformedSegment { index, .. } | ParseError::InvalidPrice { index, .. } => {
                *index
            }
        }
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Parses a comma-separated dish list into line items.
///
/// ## Rules
/// - Segments are split on `,` and trimmed
/// - Each segment needs one or more name tokens followed by one price token
/// - Irregular whitespace inside a name collapses to single spaces
/// - Empty segments (`"A 1,,B 2"`, trailing commas) are malformed
/// - Duplicates are kept, order is preserved
///
/// ## Example
/// ```rust
/// use bistro_core::items::{parse_items, ParseErrorKind};
///
/// let items = parse_items("Burger 10.99, Fries 3.99").unwrap();
/// assert_eq!(items[0].name, "Burger");
/// assert_eq!(items[1].price.to_string(), "3.99");
///
/// let err = parse_items("Burger ten").unwrap_err();
/// assert_eq!(err.kind(), ParseErrorKind::InvalidPrice);
/// assert_eq!(err.fragment(), "ten");
/// ```
pub fn parse_items(input: &str) -> Result<Vec<LineItem>, ParseError> {
    input
        .split(SEGMENT_SEPARATOR)
        .enumerate()
        .map(|(index, segment)| parse_segment(index, segment.trim()))
        .collect()
}

/// Parses one trimmed segment.
fn parse_segment(index: usize, segment: &str) -> Result<LineItem, ParseError> {
    let tokens: Vec<&str> = segment.split_whitespace().collect();

    let (price_token, name_tokens) = match tokens.split_last() {
        Some((price, name)) if !name.is_empty() => (*price, name),
        _ => {
            return Err(ParseError::MalformedSegment {
                index,
                segment: segment.to_string(),
            })
        }
    };

    let price = Money::parse_decimal(price_token).map_err(|reason| ParseError::InvalidPrice {
        index,
        token: price_token.to_string(),
        reason,
    })?;

    Ok(LineItem {
        name: name_tokens.join(" "),
        price,
    })
}

/// Sums the prices of all items exactly.
///
/// ## Example
/// ```rust
/// use bistro_core::items::{total_price, LineItem};
/// use bistro_core::money::Money;
///
/// assert!(total_price(&[]).is_zero());
///
/// let items = [
///     LineItem::new("Salad", Money::from_cents(750)),
///     LineItem::new("Soup", Money::from_cents(500)),
/// ];
/// assert_eq!(total_price(&items).to_string(), "12.50");
/// ```
pub fn total_price(items: &[LineItem]) -> Money {
    items.iter().map(|item| item.price).sum()
}

/// Writes items back in the canonical `name price, name price` form.
///
/// Feeding the result to [`parse_items`] gives back an equal list.
pub fn format_items(items: &[LineItem]) -> String {
    items
        .iter()
        .map(LineItem::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::MAX_PRICE_CENTS;

    fn item(name: &str, cents: i64) -> LineItem {
        LineItem::new(name, Money::from_cents(cents))
    }

    #[test]
    fn test_parse_items_valid() {
        let items = parse_items("Burger 10.99, Fries 3.99, Coke 2.50").unwrap();
        assert_eq!(
            items,
            vec![item("Burger", 1099), item("Fries", 399), item("Coke", 250)]
        );
    }

    #[test]
    fn test_parse_items_normalizes_whitespace() {
        let items = parse_items("  Burger   10.99  ,  Fries   3.99   ").unwrap();
        assert_eq!(items, vec![item("Burger", 1099), item("Fries", 399)]);

        let items = parse_items("Fish\tand\tchips\t9.00").unwrap();
        assert_eq!(items, vec![item("Fish and chips", 900)]);
    }

    #[test]
    fn test_parse_items_multi_word_name() {
        let items = parse_items("Large Burger with extra cheese 15.99").unwrap();
        assert_eq!(items, vec![item("Large Burger with extra cheese", 1599)]);

        let items = parse_items("Large   Burger  with extra cheese   15.99").unwrap();
        assert_eq!(items[0].name, "Large Burger with extra cheese");
    }

    #[test]
    fn test_parse_items_keeps_duplicates_in_order() {
        let items = parse_items("Coke 2.50, Burger 10.99, Coke 2.50").unwrap();
        assert_eq!(
            items,
            vec![item("Coke", 250), item("Burger", 1099), item("Coke", 250)]
        );
    }

    #[test]
    fn test_parse_items_missing_price() {
        let err = parse_items("Burger, Fries 3.99").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::MalformedSegment);
        assert_eq!(err.fragment(), "Burger");
        assert_eq!(err.segment_index(), 0);
        assert!(err.to_string().contains("Invalid item format"));

        let err = parse_items("Burger 10, Fries").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedSegment {
                index: 1,
                segment: "Fries".to_string()
            }
        );
    }

    #[test]
    fn test_parse_items_invalid_price() {
        let err = parse_items("Burger ten, Fries 3.99").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::InvalidPrice);
        assert_eq!(err.fragment(), "ten");

        let err = parse_items("Burger -1.00").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::InvalidPrice);
        assert_eq!(err.fragment(), "-1.00");

        let err = parse_items("Burger 10.999").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidPrice {
                reason: MoneyParseError::TooPrecise { digits: 3 },
                ..
            }
        ));
    }

    #[test]
    fn test_parse_items_mixed_fails_whole_call() {
        let result = parse_items("Burger 10.99, Fries, Coke 2.50, Pizza");
        assert_eq!(
            result,
            Err(ParseError::MalformedSegment {
                index: 1,
                segment: "Fries".to_string()
            })
        );
    }

    #[test]
    fn test_parse_items_rejects_empty_segments() {
        for input in ["", "   ", "Burger 10.99,", "Burger 10.99,, Fries 3.99", ", Fries 3.99"] {
            let err = parse_items(input).unwrap_err();
            assert_eq!(err.kind(), ParseErrorKind::MalformedSegment, "input: {input:?}");
            assert_eq!(err.fragment(), "");
        }
    }

    #[test]
    fn test_total_price() {
        assert_eq!(total_price(&[]), Money::zero());
        assert_eq!(
            total_price(&[item("A", 750), item("B", 500)]),
            Money::from_cents(1250)
        );

        // Sums that drift under binary floats stay exact here
        let items = parse_items("A 0.10, B 0.20, C 0.70").unwrap();
        assert_eq!(total_price(&items).to_string(), "1.00");
    }

    #[test]
    fn test_oversized_price_rejected() {
        let err = parse_items("Caviar 92233720368547758.07, Bread 0.01").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::InvalidPrice);
        assert_eq!(err.segment_index(), 0);
        assert_eq!(
            err,
            ParseError::InvalidPrice {
                index: 0,
                token: "92233720368547758.07".to_string(),
                reason: MoneyParseError::Overflow,
            }
        );
    }

    #[test]
    fn test_total_of_maximal_prices_is_exact() {
        let items = parse_items("Caviar 10000000000.00, Truffle 10000000000.00").unwrap();
        assert_eq!(total_price(&items), Money::from_cents(2 * MAX_PRICE_CENTS));

        let segments = crate::MAX_ITEMS_TEXT_LEN / 2;
        let items = vec![item("X", MAX_PRICE_CENTS); segments];
        let total = total_price(&items);
        assert_eq!(total.cents(), MAX_PRICE_CENTS * segments as i64);
        assert!(!total.is_negative());
    }

    #[test]
    fn test_format_then_parse_is_idempotent() {
        let original = parse_items("  Large   Burger 15.99 , Fries 3.5, Coke 2").unwrap();
        let canonical = format_items(&original);
        assert_eq!(canonical, "Large Burger 15.99, Fries 3.50, Coke 2.00");
        assert_eq!(parse_items(&canonical).unwrap(), original);
    }

    #[test]
    fn test_line_item_json_shape() {
        let json = serde_json::to_value(item("Burger", 1099)).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Burger", "price": "10.99"}));
    }
}
