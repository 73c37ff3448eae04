// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod document;
pub mod file_store;
pub mod html;
pub mod http_api;
