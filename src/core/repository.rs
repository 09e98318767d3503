//! Capability interfaces between the converter and its collaborators

use crate::core::currency::{Currency, CurrencyCode};
use crate::core::request_state::RequestState;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Rate record as sent by the exchange-rate API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrencyDto {
    pub code: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetaDto {
    pub last_updated_at: String,
}

/// Payload of a "latest exchange rates" request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResponse {
    pub data: BTreeMap<String, CurrencyDto>,
    pub meta: MetaDto,
}

/// Remote source of exchange rates.
#[async_trait]
pub trait CurrencyApiService: Send + Sync {
    async fn get_latest_exchange_rates(&self) -> Result<ApiResponse>;
}

/// Maps transport records into domain records.
pub trait DataMapper: Send + Sync {
    fn map_currency(&self, dto: &CurrencyDto) -> Result<Currency>;
}

/// Fetches the latest rates, absorbing failures into the returned state.
///
/// The second element is the server-reported last update time, empty on error.
#[async_trait]
pub trait ApiCurrencyRepository: Send + Sync {
    async fn fetch_latest_rates(&self) -> (RequestState<Vec<Currency>>, String);
}

/// Read/write access to the time rates were last fetched, in epoch millis.
#[async_trait]
pub trait UpdatedTimeRepository: Send + Sync {
    /// Returns [`crate::core::freshness::NEVER_UPDATED`] when nothing is stored.
    async fn get_last_updated_time(&self) -> i64;
    async fn save_last_updated(&self, millis: i64) -> Result<()>;
}

/// Local cache of the fetched currency list.
#[async_trait]
pub trait LocalCurrencyRepository: Send + Sync {
    async fn insert_currency_data(&self, currencies: &[Currency]) -> Result<()>;
    async fn read_currency_data(&self) -> RequestState<Vec<Currency>>;
    async fn clean_up(&self) -> Result<()>;
    /// Clears the cache and inserts `currencies` as one write. On failure the
    /// previous contents are left in place.
    async fn replace_currency_data(&self, currencies: &[Currency]) -> Result<()>;
}

/// Persisted user selection.
#[async_trait]
pub trait PreferencesRepository: UpdatedTimeRepository {
    async fn read_source_currency_code(&self) -> Option<CurrencyCode>;
    async fn save_source_currency_code(&self, code: CurrencyCode) -> Result<()>;
    async fn read_target_currency_code(&self) -> Option<CurrencyCode>;
    async fn save_target_currency_code(&self, code: CurrencyCode) -> Result<()>;
}

/// Everything the converter persists locally.
pub trait CurrencyStore: LocalCurrencyRepository + PreferencesRepository {}

impl<T: LocalCurrencyRepository + PreferencesRepository + ?Sized> CurrencyStore for T {}
