pub mod angle;
pub mod geodesy;
pub mod projection;
pub mod vec;
pub mod versor;

pub use angle::*;
pub use geodesy::*;
pub use projection::*;
pub use vec::*;
pub use versor::*;
