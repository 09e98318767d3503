//! Headless converter session: current selection, amount and rate status,
//! driven by user intents.

use crate::core::currency::{self, Currency, CurrencyCode};
use crate::core::freshness::{FreshnessValidator, RateStatus};
use crate::core::repository::{ApiCurrencyRepository, CurrencyStore};
use crate::core::request_state::RequestState;
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub const CURRENCY_NOT_FOUND: &str = "Couldn't find the selected currency.";

/// User intents understood by [`Converter::send_event`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConverterEvent {
    RefreshRates,
    SwitchCurrencies,
    SelectSource(CurrencyCode),
    SelectTarget(CurrencyCode),
    SetAmount(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConverterState {
    pub rate_status: RateStatus,
    pub all_currencies: Vec<Currency>,
    pub source: RequestState<Currency>,
    pub target: RequestState<Currency>,
    pub amount: f64,
    /// Message of the most recent failed fetch, cleared by a successful one.
    pub last_fetch_error: Option<String>,
}

impl Default for ConverterState {
    fn default() -> Self {
        Self {
            rate_status: RateStatus::Idle,
            all_currencies: Vec::new(),
            source: RequestState::Idle,
            target: RequestState::Idle,
            amount: 0.0,
            last_fetch_error: None,
        }
    }
}

pub struct Converter {
    api: Arc<dyn ApiCurrencyRepository>,
    store: Arc<dyn CurrencyStore>,
    freshness: FreshnessValidator<dyn CurrencyStore>,
    default_source: CurrencyCode,
    default_target: CurrencyCode,
    state: ConverterState,
}

impl Converter {
    pub fn new(
        api: Arc<dyn ApiCurrencyRepository>,
        store: Arc<dyn CurrencyStore>,
        default_source: CurrencyCode,
        default_target: CurrencyCode,
    ) -> Self {
        Self {
            api,
            freshness: FreshnessValidator::new(Arc::clone(&store)),
            store,
            default_source,
            default_target,
            state: ConverterState::default(),
        }
    }

    pub fn state(&self) -> &ConverterState {
        &self.state
    }

    /// Loads cached rates (fetching when stale) and the saved selection.
    pub async fn init(&mut self) -> Result<()> {
        self.refresh_rates(false).await
    }

    pub async fn send_event(&mut self, event: ConverterEvent) -> Result<()> {
        debug!(?event, "Handling converter event");
        match event {
            ConverterEvent::RefreshRates => self.refresh_rates(false).await,
            ConverterEvent::SwitchCurrencies => self.switch_currencies().await,
            ConverterEvent::SelectSource(code) => {
                self.store.save_source_currency_code(code).await?;
                self.load_selection().await;
                Ok(())
            }
            ConverterEvent::SelectTarget(code) => {
                self.store.save_target_currency_code(code).await?;
                self.load_selection().await;
                Ok(())
            }
            ConverterEvent::SetAmount(amount) => {
                if !amount.is_finite() || amount < 0.0 {
                    bail!("Amount must be a non-negative number, got {}", amount);
                }
                self.state.amount = amount;
                Ok(())
            }
        }
    }

    /// Uses the local cache while it is fresh and fetches otherwise.
    /// `force` fetches regardless of freshness.
    #[instrument(name = "RefreshRates", skip(self))]
    pub async fn refresh_rates(&mut self, force: bool) -> Result<()> {
        match self.store.read_currency_data().await {
            RequestState::Success(cached) if !cached.is_empty() => {
                debug!(count = cached.len(), "Loaded cached currencies");
                self.state.all_currencies = cached;
                if force || !self.freshness.validate().await {
                    self.cache_the_data().await?;
                }
            }
            RequestState::Success(_) => self.cache_the_data().await?,
            RequestState::Error(message) => {
                error!(error = %message, "Failed to read cached currencies, fetching again");
                self.cache_the_data().await?;
            }
            RequestState::Idle | RequestState::Loading => {}
        }

        self.state.rate_status = self.freshness.rate_status().await;
        self.load_selection().await;
        Ok(())
    }

    async fn cache_the_data(&mut self) -> Result<()> {
        let (fetched, last_updated) = self.api.fetch_latest_rates().await;
        match fetched {
            RequestState::Success(currencies) => {
                self.store.replace_currency_data(&currencies).await?;
                self.store
                    .save_last_updated(parse_last_updated(&last_updated))
                    .await?;
                info!(count = currencies.len(), "Cached fresh exchange rates");
                self.state.all_currencies = currencies;
                self.state.last_fetch_error = None;
            }
            RequestState::Error(message) => {
                warn!(error = %message, "Keeping previously cached rates");
                self.state.last_fetch_error = Some(message);
            }
            RequestState::Idle | RequestState::Loading => {}
        }
        Ok(())
    }

    async fn switch_currencies(&mut self) -> Result<()> {
        let (source, target) = self.selected_codes().await;
        self.store.save_source_currency_code(target).await?;
        self.store.save_target_currency_code(source).await?;
        self.load_selection().await;
        Ok(())
    }

    async fn selected_codes(&self) -> (CurrencyCode, CurrencyCode) {
        let source = self
            .store
            .read_source_currency_code()
            .await
            .unwrap_or(self.default_source);
        let target = self
            .store
            .read_target_currency_code()
            .await
            .unwrap_or(self.default_target);
        (source, target)
    }

    async fn load_selection(&mut self) {
        let (source, target) = self.selected_codes().await;
        self.state.source = self.resolve(source);
        self.state.target = self.resolve(target);
    }

    fn resolve(&self, code: CurrencyCode) -> RequestState<Currency> {
        self.state
            .all_currencies
            .iter()
            .find(|c| c.code == code)
            .map_or_else(
                || RequestState::Error(CURRENCY_NOT_FOUND.to_string()),
                |c| RequestState::Success(*c),
            )
    }

    /// Amount expressed in the target currency, once both sides are known.
    pub fn converted_amount(&self) -> Option<f64> {
        match (&self.state.source, &self.state.target) {
            (RequestState::Success(source), RequestState::Success(target)) => {
                currency::convert(self.state.amount, source, target)
            }
            _ => None,
        }
    }
}

/// Parses the server's RFC 3339 timestamp into epoch millis, using the
/// current time when the value cannot be parsed.
fn parse_last_updated(last_updated: &str) -> i64 {
    match DateTime::parse_from_rfc3339(last_updated) {
        Ok(dt) => dt.timestamp_millis(),
        Err(e) => {
            warn!(value = %last_updated, error = %e, "Unparsable last-updated time, using now");
            Utc::now().timestamp_millis()
        }
    }
}
