// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use std::io::{self, Cursor, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tiendita::application::InventoryService;
use tiendita::cli::Session;
use tiendita::domain::{Cents, Product};

/// Helper to create a test service backed by a catalog file in a temporary directory
pub fn test_service() -> Result<(InventoryService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = InventoryService::open(catalog_path(&temp_dir));
    Ok((service, temp_dir))
}

pub fn catalog_path(dir: &TempDir) -> PathBuf {
    dir.path().join("productos.json")
}

/// Helper to create a test service with the given products already on disk
pub fn seeded_service(products: &[(&str, Cents, u32)]) -> Result<(InventoryService, TempDir)> {
    let (service, temp_dir) = test_service()?;
    let products: Vec<Product> = products
        .iter()
        .map(|(name, price, qty)| Product::new(*name, *price, *qty))
        .collect();
    service.store().save(&products)?;
    Ok((service, temp_dir))
}

/// Run a menu session over `script` against the catalog in `dir` and return what it printed
pub fn run_session(dir: &TempDir, script: &str) -> Result<String> {
    let service = InventoryService::open(catalog_path(dir));
    let mut session = Session::new(service, Cursor::new(script.as_bytes().to_vec()), Vec::new());
    session.run()?;
    Ok(String::from_utf8(session.into_output())?)
}

/// Shared buffer the test subscriber writes formatted events into
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that records every event, returning its result and the log text
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}
