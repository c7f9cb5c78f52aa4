//! Types shared with the display-server collaborator.
//!
//! Nothing in here talks to a display server; these are the shapes of the data
//! it hands to us and that we hand back.

pub mod geometry;
pub mod screen;
pub mod window_server;
