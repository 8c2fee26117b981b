mod atlas_file;
mod map_file;

pub use atlas_file::{AtlasError, load_atlas, read_atlas, write_atlas};
pub use map_file::{format_map, load_map, parse_map};
