//! Asynchronous geo data sources.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::unsync::OnceCell;
use tracing::info;

use crate::{GeoData, GeoDataError, geojson};

/// Supplies the country/border/land set the globe renders.
///
/// Loading is asynchronous so hosts can fetch from disk or network; the globe
/// never blocks on it and simply renders nothing until a set arrives.
pub trait GeoDataProvider {
    fn load(&self) -> impl Future<Output = Result<Arc<GeoData>, GeoDataError>>;
}

/// Reads a GeoJSON country collection from disk.
#[derive(Debug, Clone)]
pub struct FileGeoProvider {
    path: PathBuf,
}

impl FileGeoProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GeoDataProvider for FileGeoProvider {
    async fn load(&self) -> Result<Arc<GeoData>, GeoDataError> {
        let payload = std::fs::read_to_string(&self.path).map_err(|source| GeoDataError::Io {
            path: self.path.clone(),
            source,
        })?;
        let data = geojson::parse_countries(&payload)?;
        info!(
            path = %self.path.display(),
            countries = data.countries.len(),
            "loaded geo data"
        );
        Ok(Arc::new(data))
    }
}

/// Hands out an already built set.
#[derive(Debug, Clone, Default)]
pub struct StaticGeoProvider {
    data: Arc<GeoData>,
}

impl StaticGeoProvider {
    pub fn new(data: GeoData) -> Self {
        Self {
            data: Arc::new(data),
        }
    }
}

impl GeoDataProvider for StaticGeoProvider {
    async fn load(&self) -> Result<Arc<GeoData>, GeoDataError> {
        Ok(self.data.clone())
    }
}

/// Loads from `inner` once and serves the cached set afterwards.
/// Failed loads are not cached.
pub struct CachedGeoProvider<P> {
    inner: P,
    cell: OnceCell<Arc<GeoData>>,
}

impl<P: GeoDataProvider> CachedGeoProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cell: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<P: GeoDataProvider> GeoDataProvider for CachedGeoProvider<P> {
    async fn load(&self) -> Result<Arc<GeoData>, GeoDataError> {
        if let Some(data) = self.cell.get() {
            return Ok(data.clone());
        }
        let data = self.inner.load().await?;
        Ok(self.cell.get_or_init(|| data).clone())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Arc;

    use super::{CachedGeoProvider, FileGeoProvider, GeoDataProvider, StaticGeoProvider};
    use crate::{GeoData, GeoDataError};

    struct Counting<'a> {
        calls: &'a Cell<usize>,
    }

    impl GeoDataProvider for Counting<'_> {
        async fn load(&self) -> Result<Arc<GeoData>, GeoDataError> {
            self.calls.set(self.calls.get() + 1);
            Ok(Arc::new(GeoData::default()))
        }
    }

    #[test]
    fn cached_provider_loads_once() {
        let calls = Cell::new(0);
        let cached = CachedGeoProvider::new(Counting { calls: &calls });
        assert!(!cached.is_loaded());
        let a = pollster::block_on(cached.load()).expect("load");
        let b = pollster::block_on(cached.load()).expect("load");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.get(), 1);
        assert!(cached.is_loaded());
    }

    #[test]
    fn static_provider_shares_its_set() {
        let provider = StaticGeoProvider::new(GeoData::default());
        let a = pollster::block_on(provider.load()).expect("load");
        let b = pollster::block_on(provider.load()).expect("load");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let provider = FileGeoProvider::new("/nonexistent/countries.geojson");
        let err = pollster::block_on(provider.load()).expect_err("missing");
        assert!(matches!(err, GeoDataError::Io { .. }));
        assert!(err.to_string().contains("countries.geojson"));
    }
}
