//! Remux execution against the external muxer.

mod remux;

pub use remux::remux_streams;
