//! Animated polar bar chart and rotating globe.
//!
//! Controllers own a [`chart_config::ConfigStore`], derive scales and tweens
//! from it, and hand them to a [`RenderSurface`]. Config writes are dispatched
//! by path so only the affected stage re-renders.

pub mod angle;
pub mod error;
pub mod globe;
pub mod layout;
pub mod pan;
pub mod polar;
pub mod recording;
pub mod scale;
pub mod surface;
pub mod tween;

pub use angle::*;
pub use error::*;
pub use globe::*;
pub use layout::*;
pub use pan::*;
pub use polar::*;
pub use recording::*;
pub use scale::*;
pub use surface::*;
pub use tween::*;
