use chart_config::ConfigError;
use geodata::GeoDataError;

#[derive(Debug)]
pub enum ChartError {
    Config(ConfigError),
    GeoData(GeoDataError),
    /// A globe animation that needs geography was requested before
    /// [`GlobeChart::load`](crate::GlobeChart::load) completed.
    GeoDataNotLoaded,
    UnknownCountry(String),
}

impl std::fmt::Display for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartError::Config(err) => write!(f, "config error: {err}"),
            ChartError::GeoData(err) => write!(f, "geo data error: {err}"),
            ChartError::GeoDataNotLoaded => write!(f, "geo data has not been loaded"),
            ChartError::UnknownCountry(name) => write!(f, "unknown country: {name}"),
        }
    }
}

impl std::error::Error for ChartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChartError::Config(err) => Some(err),
            ChartError::GeoData(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for ChartError {
    fn from(err: ConfigError) -> Self {
        ChartError::Config(err)
    }
}

impl From<GeoDataError> for ChartError {
    fn from(err: GeoDataError) -> Self {
        ChartError::GeoData(err)
    }
}
