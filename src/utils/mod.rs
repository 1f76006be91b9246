pub mod logging;
pub mod profile_store;
pub mod settings;
