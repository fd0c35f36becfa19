use serde::{Deserialize, Serialize};

use super::money::{self, Cents};

/// A product held in the catalog.
///
/// Serialized with the field names of the catalog file
/// (`Nombre`, `Precio`, `Cantidad`); the price is written in currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "Precio", with = "money::as_units")]
    pub unit_price: Cents,
    #[serde(rename = "Cantidad")]
    pub quantity: u32,
}

impl Product {
    pub fn new(name: impl Into<String>, unit_price: Cents, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Case-insensitive name comparison.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name == name || self.name.to_lowercase() == name.to_lowercase()
    }
}

/// A purchased quantity at the price observed when it was bought.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub name: String,
    pub unit_price: Cents,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(name: impl Into<String>, unit_price: Cents, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Snapshot `quantity` units of `product`.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self::new(product.name.clone(), product.unit_price, quantity)
    }

    /// `unit_price * quantity`, or `None` if it does not fit in `Cents`.
    pub fn subtotal(&self) -> Option<Cents> {
        self.unit_price.checked_mul(Cents::from(self.quantity))
    }
}
