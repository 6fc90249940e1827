//! # Currency Formatting
//!
//! Pure formatting of rupee amounts for display.
//!
//! ## Formatting Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AMOUNT SOURCES AND SAFETY                                              │
//! │                                                                         │
//! │  Amounts arrive from the backend as JSON decimals and may be absent     │
//! │  while a panel is still loading:                                        │
//! │                                                                         │
//! │    format_currency(Some(25.5), true)  →  "₹25.50"                       │
//! │    format_currency(None, true)        →  "₹0.00"   (never a panic)     │
//! │    format_currency(f64::NAN, false)   →  "0.00"                         │
//! │                                                                         │
//! │  The whole-rupee variant rounds like JS Math.round (half toward +∞)     │
//! │  and groups digits the Indian way:                                      │
//! │                                                                         │
//! │    format_currency_whole(25.5, true)      →  "₹26"                      │
//! │    format_currency_whole(1234567.0, true) →  "₹12,34,567"               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Formatting goes through integer paise internally so two-decimal output
//! never shows a floating-point artifact.

// =============================================================================
// Symbol
// =============================================================================

/// The fixed currency symbol (Indian Rupee).
pub const CURRENCY_SYMBOL: &str = "₹";

/// Returns the currency symbol.
#[inline]
pub fn currency_symbol() -> &'static str {
    CURRENCY_SYMBOL
}

// =============================================================================
// Rounding
// =============================================================================

/// Rounds with JS `Math.round` semantics: half rounds toward +∞.
///
/// `2.5 → 3`, but `-2.5 → -2`. This differs from `f64::round` (half away
/// from zero) only for negative half-values; the rule is pinned by test
/// because dashboard revenue chips were specified against `Math.round`.
fn math_round(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Treats an absent or non-finite amount as zero.
fn normalize(amount: Option<f64>) -> f64 {
    match amount {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

// =============================================================================
// Two-Decimal Formatting
// =============================================================================

/// Formats an amount as a two-decimal rupee string.
///
/// `None` and NaN render as zero rather than failing, since upstream data
/// may be partially loaded.
///
/// ## Example
/// ```rust
/// use kirana_core::currency::format_currency;
///
/// assert_eq!(format_currency(25.5, true), "₹25.50");
/// assert_eq!(format_currency(None, true), "₹0.00");
/// assert_eq!(format_currency(None, false), "0.00");
/// ```
pub fn format_currency(amount: impl Into<Option<f64>>, show_symbol: bool) -> String {
    let amount = normalize(amount.into());

    // Round to paise first so "x.005" inputs and binary representation
    // noise cannot leak a third decimal or an off-by-one paise.
    let paise = math_round(amount * 100.0) as i64;
    let sign = if paise < 0 { "-" } else { "" };
    let rupees = (paise / 100).abs();
    let minor = (paise % 100).abs();

    if show_symbol {
        format!("{}{}{}.{:02}", sign, CURRENCY_SYMBOL, rupees, minor)
    } else {
        format!("{}{}.{:02}", sign, rupees, minor)
    }
}

// =============================================================================
// Whole-Rupee Formatting
// =============================================================================

/// Formats an amount as whole rupees with Indian digit grouping.
///
/// Used for compact displays (revenue chips) where paise are noise.
/// Rounds half toward +∞, matching `Math.round`.
///
/// ## Example
/// ```rust
/// use kirana_core::currency::format_currency_whole;
///
/// assert_eq!(format_currency_whole(25.5, true), "₹26");
/// assert_eq!(format_currency_whole(1234567.0, true), "₹12,34,567");
/// assert_eq!(format_currency_whole(None, false), "0");
/// ```
pub fn format_currency_whole(amount: impl Into<Option<f64>>, show_symbol: bool) -> String {
    let amount = normalize(amount.into());

    let whole = math_round(amount) as i64;
    let sign = if whole < 0 { "-" } else { "" };
    let grouped = group_indian(whole.unsigned_abs());

    if show_symbol {
        format!("{}{}{}", sign, CURRENCY_SYMBOL, grouped)
    } else {
        format!("{}{}", sign, grouped)
    }
}

/// Groups digits in the Indian numbering style: the last three digits,
/// then groups of two (`1234567` → `"12,34,567"`).
fn group_indian(mut value: u64) -> String {
    if value < 1000 {
        return value.to_string();
    }

    let tail = value % 1000;
    value /= 1000;

    let mut upper_groups: Vec<u64> = Vec::new();
    while value > 0 {
        upper_groups.push(value % 100);
        value /= 100;
    }

    let mut out = String::new();
    for (idx, group) in upper_groups.iter().rev().enumerate() {
        if idx == 0 {
            out.push_str(&group.to_string());
        } else {
            out.push_str(&format!(",{:02}", group));
        }
    }
    out.push_str(&format!(",{:03}", tail));
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_two_decimals_with_symbol() {
        assert_eq!(format_currency(25.5, true), "₹25.50");
        assert_eq!(format_currency(5.0, true), "₹5.00");
        assert_eq!(format_currency(0.1, true), "₹0.10");
        assert_eq!(format_currency(1099.99, false), "1099.99");
    }

    #[test]
    fn absent_and_nan_amounts_render_as_zero() {
        assert_eq!(format_currency(None, true), "₹0.00");
        assert_eq!(format_currency(None, false), "0.00");
        assert_eq!(format_currency(f64::NAN, true), "₹0.00");
        assert_eq!(format_currency_whole(None, true), "₹0");
        assert_eq!(format_currency_whole(f64::INFINITY, false), "0");
    }

    #[test]
    fn whole_rupees_round_half_up() {
        // Pinned: Math.round semantics, half toward +∞.
        assert_eq!(format_currency_whole(25.5, true), "₹26");
        assert_eq!(format_currency_whole(25.49, true), "₹25");
        assert_eq!(format_currency_whole(-2.5, false), "-2");
    }

    #[test]
    fn indian_digit_grouping() {
        assert_eq!(format_currency_whole(999.0, false), "999");
        assert_eq!(format_currency_whole(1000.0, false), "1,000");
        assert_eq!(format_currency_whole(123456.0, false), "1,23,456");
        assert_eq!(format_currency_whole(1234567.0, false), "12,34,567");
        assert_eq!(format_currency_whole(10000000.0, true), "₹1,00,00,000");
    }

    #[test]
    fn grand_total_scenario() {
        // Bill of {price: 10.00, qty: 2} + {price: 5.50, qty: 1};
        // the server reports grandTotal = 25.50.
        let grand_total = 25.50;
        assert_eq!(format_currency(grand_total, true), "₹25.50");
        assert_eq!(format_currency_whole(grand_total, true), "₹26");
    }

    #[test]
    fn negative_amounts_keep_sign_outside_symbol() {
        assert_eq!(format_currency(-5.5, true), "-₹5.50");
        assert_eq!(format_currency(-5.5, false), "-5.50");
    }
}
