/*!
 * Core Module
 * Fundamental types and error handling
 */

pub mod errors;
pub mod inline_string;
pub mod types;

// Re-export for convenience
pub use errors::*;
pub use inline_string::InlineString;
pub use types::*;
