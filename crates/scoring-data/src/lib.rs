//! Price history and order book loaders.
//!
//! A data directory holds one `<asset>.csv` per asset and, optionally, an
//! `<asset>.book.json` order book snapshot next to it.

mod csv_source;
mod order_book;

pub use csv_source::{parse_timestamp, CsvDataSource};
pub use order_book::{load_order_book, parse_order_book};

use scoring_core::{DataError, PriceSeries};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix of order book snapshot files.
pub const ORDER_BOOK_SUFFIX: &str = ".book.json";

/// Files found for one asset in a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFiles {
    pub asset_id: String,
    pub prices: PathBuf,
    pub order_book: Option<PathBuf>,
}

/// Load and validate a price series from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<PriceSeries, DataError> {
    CsvDataSource::new(path)?.load()
}

/// Asset id for a price file: the file stem.
pub fn asset_id_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

/// List every asset in a data directory, sorted by asset id.
pub fn discover_assets(dir: impl AsRef<Path>) -> Result<Vec<AssetFiles>, DataError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(DataError::NoDataAvailable(dir.display().to_string()));
    }

    let mut assets = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !path.is_file() || !is_csv {
            continue;
        }
        let Some(asset_id) = asset_id_from_path(&path) else {
            continue;
        };

        let book = dir.join(format!("{asset_id}{ORDER_BOOK_SUFFIX}"));
        assets.push(AssetFiles {
            order_book: book.is_file().then_some(book),
            prices: path,
            asset_id,
        });
    }

    assets.sort_by(|a, b| a.asset_id.cmp(&b.asset_id));
    Ok(assets)
}
