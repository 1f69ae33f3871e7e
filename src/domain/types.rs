//! Request types mirroring the optimizer's wire schema.

use serde::{Deserialize, Serialize};

/// One kind of item to place, with a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    /// Caller-assigned identifier, unique among item types, starting at 1.
    pub number: u32,
    pub width: f64,
    pub height: f64,
    pub price: f64,
    pub quantity: u32,
}

/// One kind of bin available for packing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinType {
    /// Caller-assigned identifier, unique among bin types, starting at 1.
    pub number: u32,
    pub width: f64,
    pub height: f64,
}

/// The full request sent to the external optimizer.
///
/// Serializes to exactly the document the optimizer reads from stdin:
///
/// ```json
/// { "itemTypes": [ {"number":1,"width":5.0,...}, ... ],
///   "binTypes":  [ {"number":1,"width":20.0,...}, ... ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRequest {
    pub item_types: Vec<ItemType>,
    pub bin_types: Vec<BinType>,
}
