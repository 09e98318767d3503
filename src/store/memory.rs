use crate::core::currency::{Currency, CurrencyCode};
use crate::core::freshness::NEVER_UPDATED;
use crate::core::repository::{
    LocalCurrencyRepository, PreferencesRepository, UpdatedTimeRepository,
};
use crate::core::request_state::RequestState;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Default)]
struct MemoryState {
    currencies: BTreeMap<CurrencyCode, Currency>,
    last_updated: Option<i64>,
    source: Option<CurrencyCode>,
    target: Option<CurrencyCode>,
}

/// In-memory store; nothing outlives the process.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalCurrencyRepository for MemoryStore {
    async fn insert_currency_data(&self, currencies: &[Currency]) -> Result<()> {
        let mut state = self.inner.lock().await;
        for currency in currencies {
            state.currencies.insert(currency.code, *currency);
        }
        debug!(count = currencies.len(), "Stored currencies in memory");
        Ok(())
    }

    async fn read_currency_data(&self) -> RequestState<Vec<Currency>> {
        let state = self.inner.lock().await;
        RequestState::Success(state.currencies.values().copied().collect())
    }

    async fn clean_up(&self) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.currencies.clear();
        debug!("Cleared in-memory currencies");
        Ok(())
    }

    async fn replace_currency_data(&self, currencies: &[Currency]) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.currencies = currencies.iter().map(|c| (c.code, *c)).collect();
        debug!(count = currencies.len(), "Replaced in-memory currencies");
        Ok(())
    }
}

#[async_trait]
impl UpdatedTimeRepository for MemoryStore {
    async fn get_last_updated_time(&self) -> i64 {
        self.inner
            .lock()
            .await
            .last_updated
            .unwrap_or(NEVER_UPDATED)
    }

    async fn save_last_updated(&self, millis: i64) -> Result<()> {
        self.inner.lock().await.last_updated = Some(millis);
        Ok(())
    }
}

#[async_trait]
impl PreferencesRepository for MemoryStore {
    async fn read_source_currency_code(&self) -> Option<CurrencyCode> {
        self.inner.lock().await.source
    }

    async fn save_source_currency_code(&self, code: CurrencyCode) -> Result<()> {
        self.inner.lock().await.source = Some(code);
        Ok(())
    }

    async fn read_target_currency_code(&self) -> Option<CurrencyCode> {
        self.inner.lock().await.target
    }

    async fn save_target_currency_code(&self, code: CurrencyCode) -> Result<()> {
        self.inner.lock().await.target = Some(code);
        Ok(())
    }
}
