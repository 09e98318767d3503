use crate::core::currency::{Currency, CurrencyCode};
use crate::core::repository::{CurrencyDto, DataMapper};
use anyhow::{Result, anyhow};

/// Maps currencyapi records into [`Currency`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiDataMapper;

impl DataMapper for ApiDataMapper {
    fn map_currency(&self, dto: &CurrencyDto) -> Result<Currency> {
        let code = CurrencyCode::from_code(&dto.code)
            .ok_or_else(|| anyhow!("Unsupported currency code: {}", dto.code))?;
        Ok(Currency::new(code, dto.value))
    }
}
