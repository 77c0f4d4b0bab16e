//! Rotating globe controller.

use std::sync::Arc;

use chart_config::{ConfigStore, ConfigValue, GlobeConfig, GlobeConfigPatch, PathMutation};
use foundation::math::{GeoPoint, Orthographic, Vec2};
use foundation::tween::{Easing, interpolate_round};
use geodata::{GeoData, GeoDataProvider};
use tracing::debug;

use crate::error::ChartError;
use crate::pan::PanAnimation;
use crate::surface::{GlobeFrame, GlobeLeg, GlobeTransition, RenderSurface, SPIN_DURATION_MS};

pub struct GlobeChart<S: RenderSurface> {
    surface: S,
    store: ConfigStore<GlobeConfig>,
    geo: Option<Arc<GeoData>>,
    /// Longitude rotation the last spin ended at.
    spin_angle: f64,
    /// Where the last pan or tour leg ended.
    focus: GeoPoint,
}

impl<S: RenderSurface> GlobeChart<S> {
    pub fn new(mut surface: S, overrides: GlobeConfigPatch) -> Result<Self, ChartError> {
        let store = ConfigStore::with_overrides(GlobeConfig::default(), overrides)?;
        let dims = &store.config().dimensions;
        surface.set_size(dims.width, dims.height);
        Ok(Self {
            surface,
            store,
            geo: None,
            spin_angle: 0.0,
            focus: GeoPoint::default(),
        })
    }

    pub fn config(&self) -> &GlobeConfig {
        self.store.config()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn geo_data(&self) -> Option<&Arc<GeoData>> {
        self.geo.as_ref()
    }

    pub fn focus(&self) -> GeoPoint {
        self.focus
    }

    pub fn on_change(&mut self, listener: impl FnMut(&PathMutation) + 'static) {
        self.store.on_change(listener);
    }

    /// Unrotated projection for the current size and scale.
    pub fn projection(&self) -> Orthographic {
        let config = self.store.config();
        Orthographic::new(
            config.scale,
            Vec2::new(config.dimensions.width / 2.0, config.dimensions.height / 2.0),
        )
    }

    /// Loads geography and spins the globe from 0 to `map.angle`.
    ///
    /// Nothing is drawn before this completes.
    pub async fn load<P: GeoDataProvider>(&mut self, provider: &P) -> Result<(), ChartError> {
        let geo = provider.load().await?;
        self.geo = Some(geo.clone());
        let angle = self.store.config().map.angle;
        self.spin(geo, 0.0, angle);
        Ok(())
    }

    pub fn update(&mut self, path: &str, value: impl Into<ConfigValue>) -> Result<(), ChartError> {
        self.store.apply(path, value)?;
        while let Some(mutation) = self.store.next_mutation() {
            self.dispatch(&mutation);
        }
        self.store.settle();
        Ok(())
    }

    fn dispatch(&mut self, mutation: &PathMutation) {
        if mutation.path.as_str() != "map.angle" {
            debug!(path = %mutation.path, "no render stage for config path");
            return;
        }
        let Some(geo) = self.geo.clone() else {
            debug!("geo data not loaded; spin deferred to load");
            return;
        };
        let from = self
            .store
            .previous()
            .map_or(self.spin_angle, |snapshot| snapshot.angle);
        let to = self.store.config().map.angle;
        self.spin(geo, from, to);
    }

    fn spin(&mut self, geo: Arc<GeoData>, from: f64, to: f64) {
        debug!(from, to, "spinning globe");
        let base = self.projection();
        let longitude = interpolate_round(from, to);
        let leg = GlobeLeg {
            duration_ms: SPIN_DURATION_MS,
            easing: Easing::Linear,
            frame: Box::new(move |t| GlobeFrame {
                projection: base.with_rotation([longitude(t), 0.0, 0.0]),
                arc: None,
                highlight: None,
            }),
        };
        self.surface
            .animate_globe(geo, GlobeTransition { legs: vec![leg] });
        self.spin_angle = to;
    }

    /// Turns the globe from `from` to `to` while tracing the great circle
    /// between them.
    pub fn pan(&mut self, from: GeoPoint, to: GeoPoint) -> Result<(), ChartError> {
        let geo = self.geo.clone().ok_or(ChartError::GeoDataNotLoaded)?;
        let pan = PanAnimation::new(from, to, self.store.config().tilt);
        let legs = pan.legs(self.projection(), None);
        self.surface.animate_globe(geo, GlobeTransition { legs });
        self.focus = to;
        Ok(())
    }

    /// Chains pans through the centroids of the named countries, starting at
    /// the current focus and highlighting each destination country.
    pub fn tour(&mut self, countries: &[&str]) -> Result<(), ChartError> {
        let geo = self.geo.clone().ok_or(ChartError::GeoDataNotLoaded)?;
        let tilt = self.store.config().tilt;
        let base = self.projection();

        let mut legs = Vec::new();
        let mut at = self.focus;
        for name in countries {
            let index = geo
                .country_index(name)
                .ok_or_else(|| ChartError::UnknownCountry(name.to_string()))?;
            let Some(centroid) = geo.countries[index].centroid() else {
                debug!(country = %name, "country has no centroid; skipped");
                continue;
            };
            legs.extend(PanAnimation::new(at, centroid, tilt).legs(base, Some(index)));
            at = centroid;
        }
        if legs.is_empty() {
            return Ok(());
        }
        self.surface.animate_globe(geo, GlobeTransition { legs });
        self.focus = at;
        Ok(())
    }
}
