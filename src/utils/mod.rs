pub mod catalog;
pub mod config;
pub mod format;
pub mod logger;
pub mod selection;
pub mod usage_log;
