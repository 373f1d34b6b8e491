//! Arithmetic tools.
//!
//! - `add_numbers`: Add two numbers together

pub mod add_numbers;

pub use add_numbers::AddNumbersTool;
