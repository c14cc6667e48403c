pub mod audit;
pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod routes;
pub mod storage;
pub mod templates_structs;
