use crate::core::currency::{Currency, CurrencyCode};
use crate::core::repository::{
    ApiCurrencyRepository, ApiResponse, CurrencyApiService, CurrencyDto, DataMapper,
};
use crate::core::request_state::RequestState;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::{debug, error, instrument};

/// Fetches rates from a [`CurrencyApiService`] and keeps only supported codes.
pub struct RemoteCurrencyRepository<S: CurrencyApiService, M: DataMapper> {
    service: S,
    mapper: M,
}

impl<S: CurrencyApiService, M: DataMapper> RemoteCurrencyRepository<S, M> {
    pub fn new(service: S, mapper: M) -> Self {
        Self { service, mapper }
    }

    fn supported_currencies(&self, data: &BTreeMap<String, CurrencyDto>) -> Vec<Currency> {
        data.iter()
            .filter(|(key, _)| CurrencyCode::from_code(key).is_some())
            .filter_map(|(key, dto)| match self.mapper.map_currency(dto) {
                Ok(currency) => Some(currency),
                Err(e) => {
                    debug!(key = %key, error = %e, "Dropping unmappable currency");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl<S: CurrencyApiService, M: DataMapper> ApiCurrencyRepository for RemoteCurrencyRepository<S, M> {
    #[instrument(name = "FetchLatestRates", skip(self))]
    async fn fetch_latest_rates(&self) -> (RequestState<Vec<Currency>>, String) {
        match self.service.get_latest_exchange_rates().await {
            Ok(ApiResponse { data, meta }) => {
                let currencies = self.supported_currencies(&data);
                debug!(
                    received = data.len(),
                    supported = currencies.len(),
                    "Filtered exchange rates"
                );
                (RequestState::Success(currencies), meta.last_updated_at)
            }
            Err(e) => {
                let state = RequestState::from_error(&e);
                error!(
                    error = state.error_message().unwrap_or_default(),
                    "Failed to fetch exchange rates"
                );
                (state, String::new())
            }
        }
    }
}
