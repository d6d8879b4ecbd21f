pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "meal-planner")]
#[command(about = "Interactive meal planner backed by the Spoonacular recipe API")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Spoonacular API key (overrides [api].key)")]
    pub api_key: Option<String>,

    #[arg(long, help = "API base URL (overrides [api].base_url)")]
    pub base_url: Option<String>,

    #[arg(long, help = "Directory for comments, history and shopping lists")]
    pub data_dir: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Write logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Load the optional TOML file and let explicit flags win over it.
    pub fn resolve(&self) -> Result<Settings> {
        let mut file_config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(key) = &self.api_key {
            file_config.api.key = Some(key.clone());
        }
        if let Some(base_url) = &self.base_url {
            file_config.api.base_url = Some(base_url.clone());
        }
        if let Some(data_dir) = &self.data_dir {
            file_config.storage.data_dir = Some(data_dir.clone());
        }

        Settings::try_from(&file_config)
    }
}

/// Fully resolved runtime configuration, fixed at process start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub timeout_seconds: u64,
    pub data_dir: String,
    pub comments_file: String,
    pub history_file: String,
    pub shopping_list_file: String,
    pub number_of_recipes: usize,
}

impl Settings {
    /// Defaults for everything except the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let defaults = TomlConfig::default();
        Self {
            api_key: api_key.into(),
            base_url: defaults.base_url().to_string(),
            timeout_seconds: defaults.timeout_seconds(),
            data_dir: defaults.data_dir().to_string(),
            comments_file: defaults.comments_file().to_string(),
            history_file: defaults.history_file().to_string(),
            shopping_list_file: defaults.shopping_list_file().to_string(),
            number_of_recipes: defaults.number_of_recipes(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<String>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

impl TryFrom<&TomlConfig> for Settings {
    type Error = PlannerError;

    fn try_from(config: &TomlConfig) -> Result<Self> {
        let api_key = validation::validate_required_field("api.key", &config.api.key)?;

        let settings = Self {
            api_key: api_key.trim().to_string(),
            base_url: config.base_url().trim_end_matches('/').to_string(),
            timeout_seconds: config.timeout_seconds(),
            data_dir: config.data_dir().to_string(),
            comments_file: config.comments_file().to_string(),
            history_file: config.history_file().to_string(),
            shopping_list_file: config.shopping_list_file().to_string(),
            number_of_recipes: config.number_of_recipes(),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("api.key", &self.api_key)?;
        if self.api_key.contains("${") {
            return Err(PlannerError::InvalidConfigValueError {
                field: "api.key".to_string(),
                value: self.api_key.clone(),
                reason: "Placeholder was not substituted; is the environment variable set?"
                    .to_string(),
            });
        }

        validation::validate_url("api.base_url", &self.base_url)?;
        validation::validate_range("api.timeout_seconds", self.timeout_seconds, 1, 300)?;
        validation::validate_path("storage.data_dir", &self.data_dir)?;
        validation::validate_file_name("storage.comments_file", &self.comments_file)?;
        validation::validate_file_name("storage.history_file", &self.history_file)?;
        validation::validate_file_name("storage.shopping_list_file", &self.shopping_list_file)?;
        validation::validate_range("search.number_of_recipes", self.number_of_recipes, 1, 100)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn comments_file(&self) -> &str {
        &self.comments_file
    }

    fn history_file(&self) -> &str {
        &self.history_file
    }

    fn shopping_list_file(&self) -> &str {
        &self.shopping_list_file
    }

    fn number_of_recipes(&self) -> usize {
        self.number_of_recipes
    }
}
