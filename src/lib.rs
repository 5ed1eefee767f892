//! gifscroll
//!
//! Terminal client for an animated-GIF search service: type a term, scroll
//! through a grid of results, and further pages load as the grid reaches
//! the bottom.
//!
//! Follows a Pure Core / Impure Shell split. `model` and `state` are pure;
//! `client`, `view` and `runner` perform I/O around them.

pub mod client;
pub mod config;
pub mod logging;
pub mod model;
pub mod runner;
pub mod state;
pub mod view;
