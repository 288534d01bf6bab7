//! Variable resolution
//!
//! Turns a variable's per-mode values into a flat placeholder map, following
//! alias chains and formatting colors and breakpoints for display.

mod breakpoint;
mod color;
mod error;
mod resolver;

pub use breakpoint::Breakpoints;
pub use color::color_placeholders;
pub use error::ResolveError;
pub use resolver::{ResolvedValueMap, Resolver, NAME_PLACEHOLDER};
