//! Translation of host method calls on domain value types into native
//! database expressions.
//!
//! Rules are bundled into extensions, registered into a service container,
//! and validated against the container a session actually uses before any
//! expression is compiled.

pub mod arrays;
pub mod compiler;
pub mod config;
pub mod container;
pub mod engine;
pub mod expr;
pub mod extension;
pub mod signature;
pub mod translate;
pub mod typemap;
