use std::fs;
use std::path::{Path, PathBuf};

use chart_config::{ConfigValue, GlobeConfigPatch, PolarConfigPatch};
use charts::{GlobeChart, PolarChart, RecordingSurface, Scene};
use clap::{Parser, Subcommand};
use foundation::math::GeoPoint;
use geodata::{CachedGeoProvider, FileGeoProvider};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod svg;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render animated chart transitions to SVG frames")]
struct Args {
    /// Output directory for frame_NNNN.svg files
    #[arg(long, default_value = "frames")]
    out: PathBuf,

    /// Frames per second used to sample transitions
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Write every Nth frame (the last frame is always written)
    #[arg(long, default_value_t = 1)]
    every: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Radial bar chart
    Polar {
        /// JSON config overrides (camelCase, partial)
        #[arg(long)]
        config: PathBuf,

        /// Follow-up updates applied after the first render, as path=json
        /// (e.g. data.dataset=[10,20,30])
        #[arg(long = "set")]
        updates: Vec<String>,
    },

    /// Rotating globe
    Globe {
        /// GeoJSON FeatureCollection of countries
        #[arg(long)]
        geo: PathBuf,

        /// JSON config overrides (camelCase, partial)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Countries to tour after the initial spin, comma separated
        #[arg(long, value_delimiter = ',')]
        tour: Vec<String>,

        /// Pan between two points: lon,lat,lon,lat
        #[arg(long, value_delimiter = ',', num_args = 4)]
        pan: Option<Vec<f64>>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    fs::create_dir_all(&args.out)?;
    let mut writer = FrameWriter::new(args.out.clone(), args.every.max(1));

    match args.command {
        Command::Polar { config, updates } => {
            let patch = PolarConfigPatch::from_json_str(&fs::read_to_string(&config)?)?;
            let mut chart = PolarChart::new(RecordingSurface::new(args.fps), patch)?;
            writer.drain(chart.surface_mut(), svg::render_polar)?;
            for update in &updates {
                let (path, value) = parse_update(update)?;
                chart.update(path, value)?;
                writer.drain(chart.surface_mut(), svg::render_polar)?;
            }
        }
        Command::Globe {
            geo,
            config,
            tour,
            pan,
        } => {
            let patch = match config {
                Some(path) => GlobeConfigPatch::from_json_str(&fs::read_to_string(path)?)?,
                None => GlobeConfigPatch::default(),
            };
            let provider = CachedGeoProvider::new(FileGeoProvider::new(geo));
            let mut chart = GlobeChart::new(RecordingSurface::new(args.fps), patch)?;
            pollster::block_on(chart.load(&provider))?;
            writer.drain(chart.surface_mut(), svg::render_globe)?;

            let pan = pan.as_deref().and_then(|v| <[f64; 4]>::try_from(v).ok());
            if let Some([lon0, lat0, lon1, lat1]) = pan {
                chart.pan(GeoPoint::new(lon0, lat0), GeoPoint::new(lon1, lat1))?;
                writer.drain(chart.surface_mut(), svg::render_globe)?;
            }
            if !tour.is_empty() {
                let names: Vec<&str> = tour.iter().map(String::as_str).collect();
                chart.tour(&names)?;
                writer.drain(chart.surface_mut(), svg::render_globe)?;
            }
        }
    }

    info!(frames = writer.written, out = %args.out.display(), "export complete");
    Ok(())
}

/// Splits `path=json` into a dotted path and a config value.
fn parse_update(raw: &str) -> Result<(&str, ConfigValue), Box<dyn std::error::Error>> {
    let (path, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected path=value, got {raw}"))?;
    let json: serde_json::Value = serde_json::from_str(value)?;
    Ok((path.trim(), ConfigValue::from_json(json)?))
}

/// Safety cap on frames per transition.
const MAX_FRAMES: u64 = 10_000;

struct FrameWriter {
    dir: PathBuf,
    every: u64,
    written: usize,
}

impl FrameWriter {
    fn new(dir: PathBuf, every: u64) -> Self {
        Self {
            dir,
            every,
            written: 0,
        }
    }

    /// Ticks `surface` until idle, writing sampled frames.
    fn drain(
        &mut self,
        surface: &mut RecordingSurface,
        render: fn(&Scene) -> String,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut ticked = 0;
        while !surface.is_idle() && ticked < MAX_FRAMES {
            surface.tick();
            ticked += 1;
            if ticked % self.every == 0 || surface.is_idle() {
                self.write(&render(&surface.scene()))?;
            }
        }
        if ticked == MAX_FRAMES {
            warn!(max = MAX_FRAMES, "transition did not settle; stopped sampling");
        }
        debug!(
            ticked,
            clock_ms = surface.frame().elapsed_ms(),
            "transition sampled"
        );
        Ok(())
    }

    fn write(&mut self, svg: &str) -> std::io::Result<()> {
        let path = frame_path(&self.dir, self.written);
        fs::write(&path, svg)?;
        self.written += 1;
        Ok(())
    }
}

fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("frame_{index:04}.svg"))
}

#[cfg(test)]
mod tests {
    use super::{frame_path, parse_update, svg};
    use chart_config::{GlobeConfigPatch, PolarConfigPatch};
    use charts::{GlobeChart, PolarChart, RecordingSurface};
    use geodata::StaticGeoProvider;
    use std::path::Path;

    #[test]
    fn parses_dotted_update() {
        let (path, value) = parse_update("data.dataset=[1, 2.5]").expect("parse");
        assert_eq!(path, "data.dataset");
        assert_eq!(value.as_numbers(), Some(&[1.0, 2.5][..]));
        assert!(parse_update("no-equals").is_err());
    }

    #[test]
    fn frame_names_are_zero_padded() {
        assert_eq!(
            frame_path(Path::new("out"), 7),
            Path::new("out").join("frame_0007.svg")
        );
    }

    #[test]
    fn bundled_polar_config_renders_three_bars() {
        let patch =
            PolarConfigPatch::from_json_str(include_str!("../assets/polar.json")).expect("patch");
        let mut chart = PolarChart::new(RecordingSurface::new(10.0), patch).expect("chart");
        chart.surface_mut().run_until_idle(100);
        let svg = svg::render_polar(&chart.surface().scene());
        assert_eq!(svg.matches("<path").count(), 3);
        assert!(svg.contains(">81</text>"));
    }

    #[test]
    fn bundled_countries_tour_renders_highlight() {
        let data = geodata::parse_countries(include_str!("../assets/countries.geojson"))
            .expect("geojson");
        assert_eq!(data.countries.len(), 3);
        let mut chart =
            GlobeChart::new(RecordingSurface::new(10.0), GlobeConfigPatch::default()).expect("chart");
        pollster::block_on(chart.load(&StaticGeoProvider::new(data))).expect("load");
        chart.tour(&["France", "Japan"]).expect("tour");
        chart.surface_mut().run_until_idle(1000);
        let svg = svg::render_globe(&chart.surface().scene());
        assert!(svg.contains(r##"fill="#f00""##));
    }
}
