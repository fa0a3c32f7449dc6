pub mod atlas;
pub mod cli;
pub mod config;
pub mod error;
pub mod frame;
pub mod output;

pub use atlas::{Atlas, Placement};
pub use error::ZoetropeError;
pub use frame::{CroppedFrame, FrameMeta, Hotspot};
