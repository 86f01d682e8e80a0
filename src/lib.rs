pub mod amortization;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repos;
pub mod rest;
pub mod schedule;
pub mod service;

use sqlx::sqlite::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}
