use thiserror::Error;

use crate::domain::{Cents, MAX_PRICE, parse_cents};

/// Rejected operator input. Reported at the prompt, never passed on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Product name cannot be empty.")]
    EmptyName,

    #[error("Invalid price.")]
    InvalidPrice,

    #[error("Invalid quantity.")]
    InvalidQuantity,

    #[error("Invalid amount.")]
    InvalidAmount,
}

pub fn parse_name(input: &str) -> Result<String, InputError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(InputError::EmptyName);
    }
    Ok(name.to_string())
}

/// Unit price, strictly positive and no more than `MAX_PRICE`.
pub fn parse_price(input: &str) -> Result<Cents, InputError> {
    parse_positive_cents(input)
        .filter(|cents| *cents <= MAX_PRICE)
        .ok_or(InputError::InvalidPrice)
}

/// Amount tendered at payment, strictly positive.
pub fn parse_amount(input: &str) -> Result<Cents, InputError> {
    parse_positive_cents(input).ok_or(InputError::InvalidAmount)
}

/// Whole number of units, strictly positive.
pub fn parse_quantity(input: &str) -> Result<u32, InputError> {
    match input.trim().parse::<u32>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(InputError::InvalidQuantity),
    }
}

fn parse_positive_cents(input: &str) -> Option<Cents> {
    parse_cents(input).ok().filter(|cents| *cents > 0)
}
