mod config;
mod config_file;
mod slot_map;

pub use config::*;
pub use config_file::*;
pub use slot_map::*;
