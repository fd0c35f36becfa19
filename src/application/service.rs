use tracing::info;

use crate::domain::{Cart, CartLine, Cents, Product, format_cents};
use crate::storage::CatalogStore;

use super::AppError;

/// Result of a purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseResult {
    pub line: CartLine,
    pub subtotal: Cents,
}

/// Application service providing the inventory operations.
/// This is the interface the command loop (or any other client) talks to.
pub struct InventoryService {
    store: CatalogStore,
}

impl InventoryService {
    /// Create a new inventory service over the given store.
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    /// Open the catalog file at `path`. The file is created on first save.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(CatalogStore::new(path))
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Append a product to the catalog. Names are not checked for uniqueness.
    pub fn add_product(&self, product: Product) -> Result<Product, AppError> {
        let added = self.store.with_catalog(|products| -> Result<Product, AppError> {
            products.push(product.clone());
            Ok(product)
        })?;

        info!(
            name = %added.name,
            price = %format_cents(added.unit_price),
            quantity = added.quantity,
            "product added"
        );
        Ok(added)
    }

    /// Take `quantity` units of `name` out of stock and put them in `cart`.
    ///
    /// The first product whose name matches case-insensitively is used. When
    /// the product is missing, short on stock, or the purchase would push the
    /// cart total past `Cents`, the catalog is not written and the cart is not
    /// touched.
    pub fn purchase(
        &self,
        name: &str,
        quantity: u32,
        cart: &mut Cart,
    ) -> Result<PurchaseResult, AppError> {
        if quantity == 0 {
            return Err(AppError::InvalidQuantity(
                "Quantity must be positive".to_string(),
            ));
        }

        let purchase = self.store.with_catalog(|products| -> Result<PurchaseResult, AppError> {
            let product = products
                .iter_mut()
                .find(|p| p.matches_name(name))
                .ok_or_else(|| AppError::ProductNotFound(name.to_string()))?;

            if product.quantity < quantity {
                return Err(AppError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.quantity,
                    requested: quantity,
                });
            }

            let line = CartLine::from_product(product, quantity);
            let subtotal = line
                .subtotal()
                .filter(|_| cart.total_with(&line).is_some())
                .ok_or_else(|| AppError::AmountOutOfRange {
                    name: product.name.clone(),
                    quantity,
                })?;

            product.quantity -= quantity;
            Ok(PurchaseResult { line, subtotal })
        })?;

        info!(
            name = %purchase.line.name,
            quantity = purchase.line.quantity,
            subtotal = %format_cents(purchase.subtotal),
            "purchase added to cart"
        );
        cart.add_line(purchase.line.clone());
        Ok(purchase)
    }

    /// The product with the highest unit price, or `None` for an empty catalog.
    /// Ties go to the product listed first.
    pub fn most_expensive(&self) -> Result<Option<Product>, AppError> {
        let products = self.store.load()?;

        Ok(products.into_iter().reduce(|best, product| {
            if product.unit_price > best.unit_price {
                product
            } else {
                best
            }
        }))
    }

    /// All products, in catalog order.
    pub fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.store.load()?)
    }
}
