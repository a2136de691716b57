// Common utilities and shared constants
pub mod constants;
pub mod utils;
