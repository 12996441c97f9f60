//! Configuration and path management for keyhold

pub mod paths;

pub use paths::KeyholdPaths;
