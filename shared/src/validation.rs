//! Validation utilities for the Workshop Sales Management Platform

use rust_decimal::Decimal;

// ============================================================================
// Sale Validations
// ============================================================================

/// Validate a requested sale quantity (must be a positive integer)
pub fn validate_sold_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Sold quantity must be positive");
    }
    Ok(())
}

/// Validate a per-piece price (cost or sell side)
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

/// Validate a customer name
pub fn validate_customer_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Customer name is required");
    }
    if name.len() > 200 {
        return Err("Customer name must be at most 200 characters");
    }
    Ok(())
}

// ============================================================================
// Product Validations
// ============================================================================

/// Validate an on-hand quantity (zero is allowed, negative is not)
pub fn validate_product_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity < 0 {
        return Err("Product quantity cannot be negative");
    }
    Ok(())
}

/// Validate a product name
pub fn validate_product_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Product name is required");
    }
    if name.len() > 200 {
        return Err("Product name must be at most 200 characters");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate a workshop name
pub fn validate_workshop_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Workshop name is required");
    }
    if name.len() > 200 {
        return Err("Workshop name must be at most 200 characters");
    }
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate a customer phone number: digits with optional separators,
/// 7 to 15 digits total
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 7 || digits.len() > 15 {
        return Err("Phone number must contain 7 to 15 digits");
    }
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ' || c == '(' || c == ')')
    {
        return Err("Phone number contains invalid characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_validate_sold_quantity() {
        assert!(validate_sold_quantity(1).is_ok());
        assert!(validate_sold_quantity(500).is_ok());
        assert!(validate_sold_quantity(0).is_err());
        assert!(validate_sold_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(dec("19.99")).is_ok());
        assert!(validate_price(dec("-0.01")).is_err());
    }

    #[test]
    fn test_validate_product_quantity() {
        assert!(validate_product_quantity(0).is_ok());
        assert!(validate_product_quantity(100).is_ok());
        assert!(validate_product_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Alex").is_ok());
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_workshop_name() {
        assert!(validate_workshop_name("North Workshop").is_ok());
        assert!(validate_workshop_name("").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("owner@example.com").is_ok());
        assert!(validate_email("bad").is_err());
        assert!(validate_email("no-at.example.com").is_err());
    }

    #[test]
    fn test_validate_phone_valid() {
        assert!(validate_phone("0812345678").is_ok());
        assert!(validate_phone("+1 (555) 123-4567").is_ok());
    }

    #[test]
    fn test_validate_phone_invalid() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me maybe").is_err());
    }
}
