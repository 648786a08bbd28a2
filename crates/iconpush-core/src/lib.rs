pub mod config;
pub mod logging;

pub mod address;
pub mod error;
pub mod fetch;
pub mod http;
pub mod model;
pub mod pipeline;
pub mod request_set;
pub mod sanitize;
pub mod upload;
