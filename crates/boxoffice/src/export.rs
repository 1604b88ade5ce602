//! Writing the order report to disk.

use std::path::Path;

use boxoffice_core::{render_orders, Order};

use crate::error::{BoxOfficeError, Result};

/// Write `orders` as a plain-text report to `path`, replacing any existing
/// file.
pub fn write_orders(path: &Path, orders: &[Order], timestamp_format: &str) -> Result<()> {
    let report = render_orders(orders, timestamp_format);
    std::fs::write(path, report).map_err(|source| BoxOfficeError::Export {
        path: path.to_path_buf(),
        source,
    })
}
