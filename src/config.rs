use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealvote_mealplan::FinalizeOptions;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub mealplan: MealPlanConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct MealPlanConfig {
    #[serde(default = "default_max_recipes")]
    pub max_recipes: usize,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for MealPlanConfig {
    fn default() -> Self {
        Self {
            max_recipes: default_max_recipes(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_max_recipes() -> usize {
    mealvote_mealplan::MAX_RECIPES
}

fn default_max_attempts() -> u32 {
    mealvote_mealplan::MAX_ATTEMPTS
}

impl From<&MealPlanConfig> for FinalizeOptions {
    fn from(config: &MealPlanConfig) -> Self {
        FinalizeOptions {
            max_recipes: config.max_recipes,
            max_attempts: config.max_attempts,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALVOTE__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("database.url", "sqlite:mealvote.db")?
            .set_default("database.max_connections", 5)?
            .set_default("log.level", default_log_level())?
            .set_default("log.format", default_log_format())?
            .set_default("mealplan.max_recipes", default_max_recipes() as i64)?
            .set_default("mealplan.max_attempts", default_max_attempts() as i64)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALVOTE")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.is_empty() {
            return Err("Database url must not be empty".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.mealplan.max_recipes < 1 {
            return Err("Meal plan max_recipes must be at least 1".to_string());
        }
        if self.mealplan.max_attempts < 1 {
            return Err("Meal plan max_attempts must be at least 1".to_string());
        }
        if !matches!(self.log.format.as_str(), "pretty" | "json") {
            return Err(format!("Unknown log format '{}'", self.log.format));
        }
        Ok(())
    }

    pub fn finalize_options(&self) -> FinalizeOptions {
        (&self.mealplan).into()
    }
}
