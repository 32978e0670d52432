//! Launch request validation, run before any chain is contacted

use url::Url;

use crate::error::ValidationError;
use crate::token::TokenLaunchConfig;

pub const MAX_SYMBOL_LEN: usize = 10;
pub const MAX_NAME_LEN: usize = 32;

/// Check a launch request. Rules run in a fixed order and the first failure wins.
pub fn validate(config: &TokenLaunchConfig) -> Result<(), ValidationError> {
    if config.name.is_empty() || config.symbol.is_empty() || config.uri.is_empty() {
        return Err(ValidationError::MissingField);
    }

    if config.initial_buy_amount.is_some_and(|amount| amount < 0) {
        return Err(ValidationError::NegativeAmount);
    }

    if config.symbol.chars().count() > MAX_SYMBOL_LEN {
        return Err(ValidationError::SymbolTooLong);
    }

    if config.name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong);
    }

    // Url::parse only accepts absolute URLs.
    Url::parse(&config.uri).map_err(|_| ValidationError::InvalidUri)?;

    Ok(())
}
