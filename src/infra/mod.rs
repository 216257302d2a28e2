//! Everything that touches the network or the file system.

pub mod export;
pub mod model_directory;
