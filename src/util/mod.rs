pub mod assets;
pub mod settings;
pub mod version;
