//! Shared domain types.
//!
//! These types mirror the optimizer's wire schema exactly (camelCase field
//! names, `itemTypes`/`binTypes` top-level arrays) so a request can be
//! serialized straight onto the child process's stdin without reshaping.

mod types;

pub use types::{BinType, ItemType, OptimizationRequest};

use std::collections::HashSet;

use crate::error::AppError;

/// Validate a request before it is handed to the optimizer.
///
/// The bridge itself accepts any structurally well-formed request; these
/// checks belong to the parsing stage, where the request may have come from
/// an LLM and is untrusted:
///
/// - both sequences non-empty
/// - `number` >= 1 and unique within its own sequence
/// - `width`/`height` > 0, `price` >= 0
pub fn validate_request(request: &OptimizationRequest) -> Result<(), AppError> {
    if request.item_types.is_empty() {
        return Err(AppError::new(2, "Request has no item types."));
    }
    if request.bin_types.is_empty() {
        return Err(AppError::new(2, "Request has no bin types."));
    }

    let mut seen = HashSet::new();
    for item in &request.item_types {
        if item.number < 1 {
            return Err(AppError::new(2, format!("Item number {} is not >= 1.", item.number)));
        }
        if !seen.insert(item.number) {
            return Err(AppError::new(2, format!("Duplicate item number {}.", item.number)));
        }
        if !(item.width > 0.0 && item.height > 0.0) {
            return Err(AppError::new(
                2,
                format!(
                    "Item {} has non-positive dimensions {}x{}.",
                    item.number, item.width, item.height
                ),
            ));
        }
        if item.price < 0.0 {
            return Err(AppError::new(
                2,
                format!("Item {} has negative price {}.", item.number, item.price),
            ));
        }
    }

    let mut seen = HashSet::new();
    for bin in &request.bin_types {
        if bin.number < 1 {
            return Err(AppError::new(2, format!("Bin number {} is not >= 1.", bin.number)));
        }
        if !seen.insert(bin.number) {
            return Err(AppError::new(2, format!("Duplicate bin number {}.", bin.number)));
        }
        if !(bin.width > 0.0 && bin.height > 0.0) {
            return Err(AppError::new(
                2,
                format!(
                    "Bin {} has non-positive dimensions {}x{}.",
                    bin.number, bin.width, bin.height
                ),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> OptimizationRequest {
        OptimizationRequest {
            item_types: vec![ItemType {
                number: 1,
                width: 5.0,
                height: 3.0,
                price: 25.0,
                quantity: 2,
            }],
            bin_types: vec![BinType {
                number: 1,
                width: 20.0,
                height: 30.0,
            }],
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate_request(&sample_request()).is_ok());
    }

    #[test]
    fn duplicate_item_number_rejected() {
        let mut req = sample_request();
        req.item_types.push(req.item_types[0].clone());
        let err = validate_request(&req).unwrap_err();
        assert!(err.to_string().contains("Duplicate item number"));
    }

    #[test]
    fn non_positive_dimension_rejected() {
        let mut req = sample_request();
        req.bin_types[0].width = 0.0;
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn negative_price_rejected() {
        let mut req = sample_request();
        req.item_types[0].price = -1.0;
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn wire_format_matches_schema() {
        let json = serde_json::to_value(sample_request()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "itemTypes": [
                    {"number": 1, "width": 5.0, "height": 3.0, "price": 25.0, "quantity": 2}
                ],
                "binTypes": [
                    {"number": 1, "width": 20.0, "height": 30.0}
                ]
            })
        );
    }
}
