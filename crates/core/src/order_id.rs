//! Human-readable order identifiers: `ORD` followed by a zero-padded number.

/// Literal prefix of every order id.
pub const ORDER_ID_PREFIX: &str = "ORD";

/// Minimum width of the numeric part.
pub const ORDER_ID_DIGITS: usize = 6;

/// Format an order id from a sequence value drawn from the store.
///
/// Values wider than six digits are kept whole rather than truncated.
pub fn format_order_id(seq: i64) -> String {
    format!("{ORDER_ID_PREFIX}{seq:0width$}", width = ORDER_ID_DIGITS)
}

/// Check that `value` has the shape produced by [`format_order_id`].
pub fn is_order_id(value: &str) -> bool {
    value
        .strip_prefix(ORDER_ID_PREFIX)
        .is_some_and(|digits| {
            digits.len() >= ORDER_ID_DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
        })
}
