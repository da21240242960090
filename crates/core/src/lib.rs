//! Pure domain logic for track sharing.
//!
//! Nothing in this crate performs I/O: the decoder and statistics engine take
//! typed data and return typed data, so they can run concurrently for any
//! number of tracks without shared state.

pub mod display;
pub mod error;
pub mod gpx;
pub mod statistics;
pub mod track;
pub mod types;
pub mod upload;
pub mod xml;
