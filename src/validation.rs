//! Request payload validation rules.
//!
//! Field-level rules live on the transport DTOs as `validator` derive
//! attributes; this module holds the custom rule functions those attributes
//! reference (required-text chains, value domains, decimal positivity) and the
//! flattening of [`ValidationErrors`] into the per-field message map carried
//! by the error payload. Validation always runs before any store access.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Allowed `type` values for a property listing.
pub const PROPERTY_TYPES: [&str; 2] = ["Sale", "Rent"];
/// Allowed `transactionType` values; deliberately wider than the property domain.
pub const TRANSACTION_TYPES: [&str; 3] = ["Sale", "Rent", "Lease"];

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Client name must contain at least one non-whitespace character.
pub fn client_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule_error("required", "Name is required"));
    }
    Ok(())
}

/// Client email must contain at least one non-whitespace character.
pub fn client_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule_error("required", "Email is required"));
    }
    Ok(())
}

/// Property address is required and capped at 200 characters.
pub fn property_address(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule_error("required", "Address is required"));
    }
    if value.chars().count() > 200 {
        return Err(rule_error(
            "length",
            "Address must not exceed 200 characters",
        ));
    }
    Ok(())
}

/// Validates a property `type` against its two-value domain.
pub fn property_type(value: &str) -> Result<(), ValidationError> {
    if PROPERTY_TYPES.contains(&value) {
        Ok(())
    } else {
        Err(rule_error(
            "domain",
            "Type must be either 'Sale' or 'Rent'",
        ))
    }
}

/// Validates a transaction `transactionType` against its three-value domain.
pub fn transaction_type(value: &str) -> Result<(), ValidationError> {
    if TRANSACTION_TYPES.contains(&value) {
        Ok(())
    } else {
        Err(rule_error(
            "domain",
            "TransactionType must be either 'Sale', 'Rent', or 'Lease'",
        ))
    }
}

/// Property price must be strictly positive.
pub fn positive_price(value: &Decimal) -> Result<(), ValidationError> {
    if value > &Decimal::ZERO {
        Ok(())
    } else {
        Err(rule_error("positive", "Price must be greater than 0"))
    }
}

/// Transaction amount must be strictly positive.
pub fn positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value > &Decimal::ZERO {
        Ok(())
    } else {
        Err(rule_error("positive", "Amount must be greater than 0"))
    }
}

/// Flattens derive-produced validation errors into the `errors` map of the
/// error payload, keyed by the field name as it appears on the wire.
pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut map = BTreeMap::new();

    for (field, kind) in errors.errors() {
        if let ValidationErrorsKind::Field(rule_failures) = kind {
            let messages = rule_failures
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"))
                })
                .collect();
            map.insert(wire_name(field), messages);
        }
    }

    map
}

/// Maps a Rust field identifier to its serialized (camelCase) name. The
/// property payload renames its kind field to `type` on the wire.
fn wire_name(field: &str) -> String {
    if field == "property_type" {
        return "type".to_string();
    }

    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
