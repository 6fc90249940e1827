//! # Validation Module
//!
//! Input validation for scan input and checkout.
//!
//! Validation here is the client-side gate only: the backend re-validates
//! everything. A rejected input never reaches the network, so the bill is
//! untouched by definition.

use crate::error::{ValidationError, ValidationResult};
use crate::types::CustomerSnapshot;
use crate::{AUTO_SCAN_MAX_LEN, AUTO_SCAN_MIN_LEN, MAX_ITEM_QUANTITY};

// =============================================================================
// Barcode
// =============================================================================

/// Validates a scanned or typed barcode, returning the trimmed code.
///
/// ## Rules
/// - Must not be empty or whitespace-only
/// - Must be at most 64 characters after trimming
///
/// ## Example
/// ```rust
/// use kirana_core::validation::validate_barcode;
///
/// assert_eq!(validate_barcode(" 8901234567890 ").unwrap(), "8901234567890");
/// assert!(validate_barcode("   ").is_err());
/// ```
pub fn validate_barcode(code: &str) -> ValidationResult<&str> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if code.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: 64,
        });
    }

    Ok(code)
}

/// Checks whether a typed code sits in the auto-submit length window.
///
/// Keystroke-fed inputs may fire a scan without an explicit Enter once the
/// code length looks like a retail barcode. Manual entry outside this
/// window still submits on Enter.
pub fn is_auto_scan_length(code: &str) -> bool {
    let len = code.trim().len();
    (AUTO_SCAN_MIN_LEN..=AUTO_SCAN_MAX_LEN).contains(&len)
}

// =============================================================================
// Quantity
// =============================================================================

/// Validates a line-item quantity the client is about to request.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

// =============================================================================
// Customer
// =============================================================================

/// Validates the customer snapshot captured at checkout.
///
/// ## Rules
/// - Name is required (non-empty after trimming)
/// - Contact number, when present, must be digits (with optional `+`
///   prefix) and at most 15 characters
pub fn validate_customer(customer: &CustomerSnapshot) -> ValidationResult<()> {
    if customer.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer name".to_string(),
        });
    }

    if let Some(contact) = &customer.contact_number {
        let contact = contact.trim();
        if !contact.is_empty() {
            let digits = contact.strip_prefix('+').unwrap_or(contact);
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(ValidationError::InvalidFormat {
                    field: "contact number".to_string(),
                    reason: "must contain only digits".to_string(),
                });
            }
            if contact.len() > 15 {
                return Err(ValidationError::TooLong {
                    field: "contact number".to_string(),
                    max: 15,
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(name: &str, contact: Option<&str>) -> CustomerSnapshot {
        CustomerSnapshot {
            name: name.to_string(),
            contact_number: contact.map(str::to_string),
            payment_mode: Default::default(),
        }
    }

    #[test]
    fn barcode_trims_and_rejects_empty() {
        assert_eq!(validate_barcode("  890123  ").unwrap(), "890123");
        assert!(matches!(
            validate_barcode(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_barcode("   \t"),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn auto_scan_window() {
        assert!(is_auto_scan_length("89012345")); // 8 chars
        assert!(is_auto_scan_length("89012345678901234567")); // 20 chars
        assert!(!is_auto_scan_length("1234567")); // 7 chars
        assert!(!is_auto_scan_length("890123456789012345678")); // 21 chars
    }

    #[test]
    fn quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn customer_name_required() {
        assert!(validate_customer(&customer("Meena", None)).is_ok());
        assert!(matches!(
            validate_customer(&customer("  ", None)),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn customer_contact_format() {
        assert!(validate_customer(&customer("Meena", Some("+919812345678"))).is_ok());
        assert!(validate_customer(&customer("Meena", Some(""))).is_ok());
        assert!(validate_customer(&customer("Meena", Some("98-12"))).is_err());
        assert!(validate_customer(&customer("Meena", Some("+"))).is_err());
    }
}
