use crate::utils::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_COMMENTS_FILE: &str = "comentarios.json";
pub const DEFAULT_HISTORY_FILE: &str = "historico.json";
pub const DEFAULT_SHOPPING_LIST_FILE: &str = "lista_compras.txt";
pub const DEFAULT_NUMBER_OF_RECIPES: usize = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
    pub comments_file: Option<String>,
    pub history_file: Option<String>,
    pub shopping_list_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    pub number_of_recipes: Option<usize>,
}

impl TomlConfig {
    /// Load a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration text, substituting `${VAR}` placeholders first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlannerError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api.key.as_deref()
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn data_dir(&self) -> &str {
        self.storage.data_dir.as_deref().unwrap_or(".")
    }

    pub fn comments_file(&self) -> &str {
        self.storage
            .comments_file
            .as_deref()
            .unwrap_or(DEFAULT_COMMENTS_FILE)
    }

    pub fn history_file(&self) -> &str {
        self.storage
            .history_file
            .as_deref()
            .unwrap_or(DEFAULT_HISTORY_FILE)
    }

    pub fn shopping_list_file(&self) -> &str {
        self.storage
            .shopping_list_file
            .as_deref()
            .unwrap_or(DEFAULT_SHOPPING_LIST_FILE)
    }

    pub fn number_of_recipes(&self) -> usize {
        self.search
            .number_of_recipes
            .unwrap_or(DEFAULT_NUMBER_OF_RECIPES)
    }
}
