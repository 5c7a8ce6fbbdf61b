//! Quantity normalisation shared by cart operations.

/// Clamp a requested quantity into `[1, stock_limit]`.
///
/// Requests below one are raised to one; requests above the stock limit
/// saturate at the limit. Returns `None` when the variant is out of stock
/// (`stock_limit == 0`), since the range is empty.
///
/// # Example
///
/// ```rust
/// use driftwear_core::clamp_quantity;
///
/// assert_eq!(clamp_quantity(7, 3), Some(3));
/// assert_eq!(clamp_quantity(-2, 3), Some(1));
/// assert_eq!(clamp_quantity(2, 0), None);
/// ```
#[must_use]
pub fn clamp_quantity(requested: i64, stock_limit: u32) -> Option<u32> {
    if stock_limit == 0 {
        return None;
    }
    let clamped = requested.clamp(1, i64::from(stock_limit));
    u32::try_from(clamped).ok()
}
