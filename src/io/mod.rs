//! Output destinations for tangled chunks.

mod output;

pub use output::{parse_file_map, Destination, OutputRouter, FILE_MAP_SEPARATOR};
