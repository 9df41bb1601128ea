//! Validation utilities for the Vendor & Inventory Management Platform

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::reconcile::LineItemDraft;

// ============================================================================
// Line Item Validations
// ============================================================================

/// Validate a requested line-item set before reconciliation.
///
/// Removal of a line is expressed by omission, never by a zero quantity, so
/// every submitted line must carry a positive quantity. Carried-over ids
/// must be unique within the set; two lines claiming the same persisted row
/// would each diff against the same previous quantity and double-apply
/// stock.
pub fn validate_line_items(lines: &[LineItemDraft]) -> Result<(), &'static str> {
    let mut seen_ids = HashSet::new();
    for line in lines {
        if let Some(id) = line.id {
            if !seen_ids.insert(id) {
                return Err("Duplicate line item id in request");
            }
        }
        if line.quantity <= 0 {
            return Err("Line item quantity must be positive");
        }
        if line.rate < Decimal::ZERO {
            return Err("Line item rate cannot be negative");
        }
        if line.tax_rate < Decimal::ZERO || line.tax_rate > Decimal::ONE {
            return Err("Line item tax rate must be a fraction between 0 and 1");
        }
    }
    Ok(())
}

/// Validate an item's reorder point.
pub fn validate_reorder_point(reorder_point: i32) -> Result<(), &'static str> {
    if reorder_point < 0 {
        return Err("Reorder point cannot be negative");
    }
    Ok(())
}

/// Validate an item's unit price.
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate a phone number (digits, optional leading +, 7-15 digits)
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.len() < 7 || digits.len() > 15 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid phone number");
    }
    Ok(())
}
