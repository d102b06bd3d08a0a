/// Database connection and collection creation
pub mod database;

/// Settings loading from config.toml
pub mod settings;

pub use settings::Settings;
