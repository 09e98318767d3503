pub mod currency_api;
pub mod mapper;
pub mod repository;
pub mod util;

// Re-export the pieces wired together by the CLI
pub use currency_api::CurrencyApiClient;
pub use mapper::ApiDataMapper;
pub use repository::RemoteCurrencyRepository;
