//! Common utility for extended `std` types
//!
//! These are left public for convenience.
//!
//! For example, normalising element symbols or using prettier formatting for
//! half-lives in scientific notation are useful everywhere.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod float_ext;
mod option_ext;
mod string_ext;

// Flatten
pub use float_ext::FloatExt;
pub use option_ext::OptionExt;
pub use string_ext::StringExt;
