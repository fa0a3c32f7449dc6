mod packer;
mod types;

pub use packer::pack_frames;
pub use types::{Atlas, Placement};
