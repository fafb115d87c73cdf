//! HTTP Handlers

mod health;
mod speak;

pub use health::*;
pub use speak::*;
