//! External tool discovery.

mod path;
mod fixed;

pub use fixed::StaticProbe;
pub use path::PathProbe;
