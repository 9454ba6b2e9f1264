// In crates/history-cache/src/lib.rs

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use core_types::AssetHistory;

pub mod error;

// Re-export the most important types for easy access.
pub use error::{Error, Result};

/// A JSON snapshot of every fetched asset history.
///
/// Lets repeated analyses skip the data provider entirely.
#[derive(Debug, Clone)]
pub struct HistoryCache {
    path: PathBuf,
}

impl HistoryCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the cached histories, or `None` when nothing has been cached yet.
    pub fn load(&self) -> Result<Option<Vec<AssetHistory>>> {
        tracing::debug!(path = %self.path.display(), "Loading from cache");

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No cached histories found.");
                return Ok(None);
            }
            Err(source) => return Err(self.io_error(source)),
        };

        let histories: Vec<AssetHistory> =
            serde_json::from_str(&content).map_err(|source| Error::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        for history in &histories {
            history.validate().map_err(|source| Error::Invalid {
                path: self.path.clone(),
                source,
            })?;
        }

        tracing::debug!(count = histories.len(), "Loaded from cache");
        Ok(Some(histories))
    }

    /// Replaces the cache contents with `histories`.
    pub fn store(&self, histories: &[AssetHistory]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let content = serde_json::to_string_pretty(histories)?;
        fs::write(&self.path, content).map_err(|source| self.io_error(source))?;

        tracing::info!(path = %self.path.display(), count = histories.len(), "Histories cached.");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> Error {
        Error::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Symbol;

    fn sample() -> Vec<AssetHistory> {
        vec![
            AssetHistory::from_points(
                Symbol::from("Bitcoin"),
                "BTC",
                [(1_500_000_000, 0.0, 0.0), (1_500_086_400, 2500.125, 1.0e9)],
            ),
            AssetHistory::from_points(Symbol::from("Dogecoin"), "DOGE", [(1_500_086_400, 0.001, 3.5)]),
        ]
    }

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HistoryCache::new(dir.path().join("histories.json"));
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn test_store_then_load_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HistoryCache::new(dir.path().join("nested").join("histories.json"));

        cache.store(&sample()).unwrap();

        assert_eq!(cache.load().unwrap(), Some(sample()));
    }

    #[test]
    fn test_floats_survive_bit_for_bit() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HistoryCache::new(dir.path().join("histories.json"));

        // Full-precision values with long decimal expansions.
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64
        };
        let points: Vec<(i64, f64, f64)> = (0..2_000)
            .map(|i| (i, next() * 1.0e5, next() * 1.0e9))
            .collect();
        let stored = vec![AssetHistory::from_points(Symbol::from("Bitcoin"), "BTC", points)];

        cache.store(&stored).unwrap();
        let loaded = cache.load().unwrap().unwrap();

        let bits = |h: &[AssetHistory]| -> Vec<(u64, u64)> {
            h[0].events
                .iter()
                .map(|e| (e.price.to_bits(), e.volume.to_bits()))
                .collect()
        };
        assert_eq!(bits(&loaded), bits(&stored));
    }

    #[test]
    fn test_invalid_history_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HistoryCache::new(dir.path().join("histories.json"));
        let unordered = AssetHistory::from_points(
            Symbol::from("Bitcoin"),
            "BTC",
            [(1_500_086_400, 1.0, 1.0), (1_500_000_000, 1.0, 1.0)],
        );

        cache.store(&[unordered]).unwrap();

        let err = cache.load().unwrap_err();
        assert!(matches!(
            err,
            Error::Invalid {
                source: core_types::Error::NonMonotonicHistory { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_store_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HistoryCache::new(dir.path().join("histories.json"));

        cache.store(&sample()).unwrap();
        cache.store(&sample()[..1]).unwrap();

        assert_eq!(cache.load().unwrap().map(|h| h.len()), Some(1));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("histories.json");
        fs::write(&path, "{not json").unwrap();

        let err = HistoryCache::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::Corrupt { .. }));
    }
}
