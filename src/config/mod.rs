//! Project configuration loaded from `.sitevault.toml`.

pub mod settings;

pub use settings::Settings;
