//! Chart configuration trees, schema-aware merging and the observable store.
//!
//! Configuration flows one way: defaults are merged with user overrides
//! ([`Merge`]), validated, and handed to a [`ConfigStore`]. Later writes go
//! through [`ConfigStore::apply`] by dotted path, which mutates the tree and
//! queues a [`PathMutation`] for the owning chart to dispatch.

pub mod dimensions;
pub mod error;
pub mod globe;
pub mod merge;
pub mod polar;
pub mod store;
pub mod value;

pub use dimensions::*;
pub use error::*;
pub use globe::*;
pub use merge::*;
pub use polar::*;
pub use store::*;
pub use value::*;
