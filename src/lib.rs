pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod logging;
pub mod model;
pub mod ops;
pub mod queries;
pub mod seed;
pub mod validation;
