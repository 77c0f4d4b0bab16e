pub mod event_bus;
pub mod frame;
pub mod timeline;

pub use event_bus::*;
pub use frame::*;
pub use timeline::*;
