//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod log;
pub mod window;

// Re-export main types for cleaner imports
pub use currency::{Currency, CurrencyRate, CurrencyRateProvider, RateSnapshot};
pub use window::DateWindow;
