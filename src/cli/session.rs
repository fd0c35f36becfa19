use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use crate::application::InventoryService;
use crate::domain::{Cart, CartError, Product, format_cents};

use super::input::{self, InputError};

const MENU: &str = "\n--- Menu ---
1. Add product to inventory
2. Purchase product
3. Show most expensive product
4. Pay";

/// Whether the loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    EndOfInput,
}

/// Interactive menu session.
///
/// Owns the inventory service and the cart for the lifetime of the process.
/// Reads operator input from `input` and writes every message to `output`,
/// so the whole loop runs the same against a terminal or an in-memory buffer.
pub struct Session<R, W> {
    service: InventoryService,
    cart: Cart,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(service: InventoryService, input: R, output: W) -> Self {
        Self {
            service,
            cart: Cart::new(),
            input,
            output,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Show the menu and handle choices until the input is exhausted.
    /// Only console I/O failures end the loop with an error.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Select an option: ")? else {
                break;
            };

            let flow = match choice.trim() {
                "1" => self.add_product()?,
                "2" => self.purchase()?,
                "3" => self.show_most_expensive()?,
                "4" => self.pay()?,
                other => {
                    debug!(choice = other, "unknown menu option");
                    writeln!(self.output, "Invalid option.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::EndOfInput {
                break;
            }
        }

        writeln!(self.output)?;
        self.output.flush()?;
        if self.cart.is_empty() {
            info!("session ended");
        } else {
            warn!(
                lines = self.cart.len(),
                total = ?self.cart.total(),
                "session ended with an unpaid cart"
            );
        }
        Ok(())
    }

    fn add_product(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Product name: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let name = match input::parse_name(&name) {
            Ok(name) => name,
            Err(err) => return self.reject(err),
        };

        let Some(price) = self.prompt("Unit price: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let price = match input::parse_price(&price) {
            Ok(price) => price,
            Err(err) => return self.reject(err),
        };

        let Some(quantity) = self.prompt("Quantity: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let quantity = match input::parse_quantity(&quantity) {
            Ok(quantity) => quantity,
            Err(err) => return self.reject(err),
        };

        match self.service.add_product(Product::new(name, price, quantity)) {
            Ok(_) => writeln!(self.output, "Product added to inventory.")?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn purchase(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Product to purchase: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let name = name.trim().to_string();

        let Some(quantity) = self.prompt("Quantity to purchase: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let quantity = match input::parse_quantity(&quantity) {
            Ok(quantity) => quantity,
            Err(err) => return self.reject(err),
        };

        match self.service.purchase(&name, quantity, &mut self.cart) {
            Ok(purchase) => writeln!(
                self.output,
                "Added to cart. Subtotal: ${}",
                format_cents(purchase.subtotal)
            )?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn show_most_expensive(&mut self) -> Result<Flow> {
        match self.service.most_expensive() {
            Ok(Some(product)) => writeln!(
                self.output,
                "\nMost expensive product: {} - Price: ${}",
                product.name,
                format_cents(product.unit_price)
            )?,
            Ok(None) => writeln!(self.output, "The inventory is empty.")?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn pay(&mut self) -> Result<Flow> {
        if self.cart.is_empty() {
            writeln!(self.output, "\nThere is nothing to pay.")?;
            return Ok(Flow::Continue);
        }
        let Some(total) = self.cart.total() else {
            self.report(&CartError::TotalOutOfRange)?;
            return Ok(Flow::Continue);
        };

        writeln!(self.output, "\n--- Purchase details ---")?;
        for line in self.cart.lines() {
            // Every subtotal fits once the total does
            let subtotal = line.subtotal().unwrap_or_default();
            writeln!(
                self.output,
                "{} x{} = ${}",
                line.name,
                line.quantity,
                format_cents(subtotal)
            )?;
        }
        writeln!(self.output, "\nTotal to pay: ${}", format_cents(total))?;

        let Some(amount) = self.prompt("\nAmount to pay: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let amount = match input::parse_amount(&amount) {
            Ok(amount) => amount,
            Err(err) => return self.reject(err),
        };

        match self.cart.settle(amount) {
            Ok(receipt) => {
                info!(
                    lines = receipt.lines.len(),
                    total = %format_cents(receipt.total),
                    change = %format_cents(receipt.change),
                    paid_at = %receipt.paid_at,
                    "cart settled"
                );
                writeln!(
                    self.output,
                    "Thank you for your purchase! Your change is: ${}",
                    format_cents(receipt.change)
                )?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    /// Print `label` without a newline and read one line of input.
    /// Returns `None` once the input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn reject(&mut self, err: InputError) -> Result<Flow> {
        debug!(error = %err, "input rejected");
        writeln!(self.output, "{err}")?;
        Ok(Flow::Continue)
    }

    fn report(&mut self, err: &dyn std::error::Error) -> Result<()> {
        debug!(error = %err, "operation refused");
        writeln!(self.output, "{err}")?;
        Ok(())
    }
}
