pub mod api;
pub mod config;
pub mod database;
pub mod models;
pub mod storage;
pub mod utils;
