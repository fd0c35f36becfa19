mod cart;
pub mod money;
mod product;

pub use cart::*;
pub use money::{
    Cents, MAX_PRICE, ParseCentsError, cents_from_units, format_cents, parse_cents,
    units_from_cents,
};
pub use product::*;
