//! Domain types and pure logic for the template service.
//!
//! Nothing in this crate performs I/O: the renderer, validators and
//! normalizers are synchronous functions over their inputs.

pub mod category;
pub mod content;
pub mod error;
pub mod pagination;
pub mod placeholder;
pub mod render;
pub mod types;
