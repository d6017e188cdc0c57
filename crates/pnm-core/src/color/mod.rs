//! Gamma curves, color spaces and channel plumbing.

mod channels;
mod gamma;
mod space;

pub use channels::{merge_channels, pull_channel, split_channels};
pub use gamma::Gamma;
pub use space::{round_to_byte, ColorSpace};
