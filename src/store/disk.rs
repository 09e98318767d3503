use crate::core::currency::{Currency, CurrencyCode};
use crate::core::freshness::NEVER_UPDATED;
use crate::core::repository::{
    LocalCurrencyRepository, PreferencesRepository, UpdatedTimeRepository,
};
use crate::core::request_state::RequestState;
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use tracing::debug;

const CURRENCIES_PARTITION: &str = "currencies";
const PREFERENCES_PARTITION: &str = "preferences";

const LAST_UPDATED_KEY: &str = "last_updated";
const SOURCE_CURRENCY_KEY: &str = "source_currency";
const TARGET_CURRENCY_KEY: &str = "target_currency";

/// Store backed by a fjall keyspace on disk.
///
/// Currencies are keyed by code with JSON values; preferences live in a
/// separate partition.
pub struct DiskStore {
    keyspace: Keyspace,
    currencies: PartitionHandle,
    preferences: PartitionHandle,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = Config::new(path.join("cache"))
            .open()
            .with_context(|| format!("Failed to open store at {}", path.display()))?;
        let currencies =
            keyspace.open_partition(CURRENCIES_PARTITION, PartitionCreateOptions::default())?;
        let preferences =
            keyspace.open_partition(PREFERENCES_PARTITION, PartitionCreateOptions::default())?;
        debug!("Opened store at {}", path.display());

        Ok(Self {
            keyspace,
            currencies,
            preferences,
        })
    }

    fn read_preference<V: DeserializeOwned>(&self, key: &str) -> Option<V> {
        let res: Result<Option<V>> = (|| {
            match self.preferences.get(key)? {
                Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
                None => Ok(None),
            }
        })();

        match res {
            Ok(val) => val,
            Err(e) => {
                debug!("DiskStore read error for {}: {}", key, e);
                None
            }
        }
    }

    fn write_preference<V: Serialize>(&self, key: &str, value: &V) -> Result<()> {
        self.preferences.insert(key, serde_json::to_vec(value)?)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Stored preference {}", key);
        Ok(())
    }
}

#[async_trait]
impl LocalCurrencyRepository for DiskStore {
    async fn insert_currency_data(&self, currencies: &[Currency]) -> Result<()> {
        for currency in currencies {
            self.currencies
                .insert(currency.code.as_str(), serde_json::to_vec(currency)?)?;
        }
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!(count = currencies.len(), "Stored currencies");
        Ok(())
    }

    async fn read_currency_data(&self) -> RequestState<Vec<Currency>> {
        let res: Result<Vec<Currency>> = self
            .currencies
            .iter()
            .map(|item| {
                let (_, value) = item?;
                Ok(serde_json::from_slice::<Currency>(&value)?)
            })
            .collect();

        match res {
            Ok(currencies) => RequestState::Success(currencies),
            Err(e) => {
                debug!("DiskStore read error: {}", e);
                RequestState::from_error(&e)
            }
        }
    }

    async fn clean_up(&self) -> Result<()> {
        let keys = self
            .currencies
            .keys()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        for key in keys {
            self.currencies.remove(key)?;
        }
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Cleared stored currencies");
        Ok(())
    }

    async fn replace_currency_data(&self, currencies: &[Currency]) -> Result<()> {
        let mut batch = self.keyspace.batch();
        for key in self.currencies.keys() {
            batch.remove(&self.currencies, key?);
        }
        for currency in currencies {
            batch.insert(
                &self.currencies,
                currency.code.as_str(),
                serde_json::to_vec(currency)?,
            );
        }
        batch.commit()?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!(count = currencies.len(), "Replaced stored currencies");
        Ok(())
    }
}

#[async_trait]
impl UpdatedTimeRepository for DiskStore {
    async fn get_last_updated_time(&self) -> i64 {
        self.read_preference(LAST_UPDATED_KEY)
            .unwrap_or(NEVER_UPDATED)
    }

    async fn save_last_updated(&self, millis: i64) -> Result<()> {
        self.write_preference(LAST_UPDATED_KEY, &millis)
    }
}

#[async_trait]
impl PreferencesRepository for DiskStore {
    async fn read_source_currency_code(&self) -> Option<CurrencyCode> {
        self.read_preference(SOURCE_CURRENCY_KEY)
    }

    async fn save_source_currency_code(&self, code: CurrencyCode) -> Result<()> {
        self.write_preference(SOURCE_CURRENCY_KEY, &code)
    }

    async fn read_target_currency_code(&self) -> Option<CurrencyCode> {
        self.read_preference(TARGET_CURRENCY_KEY)
    }

    async fn save_target_currency_code(&self, code: CurrencyCode) -> Result<()> {
        self.write_preference(TARGET_CURRENCY_KEY, &code)
    }
}
