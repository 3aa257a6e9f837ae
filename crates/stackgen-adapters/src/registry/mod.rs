//! Registry parsers.

mod yaml;

pub use yaml::YamlRegistry;
