use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Product not found in the inventory: {0}")]
    ProductNotFound(String),

    #[error("Not enough stock of {name}: {available} available, {requested} requested")]
    InsufficientStock {
        name: String,
        available: u32,
        requested: u32,
    },

    #[error("Purchase too large: {quantity} x {name} does not fit in the cart total")]
    AmountOutOfRange { name: String, quantity: u32 },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
