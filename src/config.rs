use std::collections::HashMap;

use crate::StardustError;

pub const API_KEY_VAR: &str = "STARDUST_APIKEY";
pub const ENV_VAR: &str = "STARDUST_ENV";
pub const TEMPLATE_ID_VAR: &str = "TEMPLATE_ID";
pub const GAME_ID_VAR: &str = "GAME_ID";

const TEST_ENV: &str = "test";

/// Environment-derived settings.
///
/// Built once by the caller and passed where needed; the crate keeps no
/// process-wide configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StardustConfig {
    /// API key, `None` when unset or blank.
    pub api_key: Option<String>,
    /// Set when `STARDUST_ENV=test`. Guards destructive test fixtures.
    pub test_mode: bool,
    /// Existing template to run template-dependent checks against.
    pub template_id: Option<u64>,
    /// Game to query on the marketplace API.
    pub game_id: Option<u64>,
}

impl StardustConfig {
    /// Reads `STARDUST_APIKEY`, `STARDUST_ENV`, `TEMPLATE_ID` and `GAME_ID`.
    ///
    /// Missing variables leave the field unset; a non-numeric id is an error.
    pub fn from_env() -> Result<Self, StardustError> {
        Self::from_vars(std::env::vars())
    }

    /// Same as [`StardustConfig::from_env`] over an explicit variable set.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, StardustError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        let non_empty = |name: &str| {
            vars.get(name)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        let parse_id = |name: &str| -> Result<Option<u64>, StardustError> {
            non_empty(name)
                .map(|value| {
                    value.parse::<u64>().map_err(|_| {
                        StardustError::Config(format!("{name} must be a number, got '{value}'"))
                    })
                })
                .transpose()
        };

        Ok(Self {
            api_key: non_empty(API_KEY_VAR).map(str::to_owned),
            test_mode: non_empty(ENV_VAR) == Some(TEST_ENV),
            template_id: parse_id(TEMPLATE_ID_VAR)?,
            game_id: parse_id(GAME_ID_VAR)?,
        })
    }
}
