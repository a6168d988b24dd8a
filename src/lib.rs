pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod http_client;
pub mod model;
pub mod normalize;
pub mod plot;
pub mod seasons;
pub mod store;
pub mod styling;
pub mod table_view;
