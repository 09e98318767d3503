//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod freshness;
pub mod log;
pub mod repository;
pub mod request_state;

// Re-export main types for cleaner imports
pub use currency::{Currency, CurrencyCode};
pub use freshness::{FreshnessValidator, RateStatus, is_fresh};
pub use repository::{
    ApiCurrencyRepository, CurrencyApiService, CurrencyStore, DataMapper,
    LocalCurrencyRepository, PreferencesRepository, UpdatedTimeRepository,
};
pub use request_state::RequestState;
