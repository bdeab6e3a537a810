//! Configuration and path management for spendbook

pub mod paths;

pub use paths::DataPaths;
