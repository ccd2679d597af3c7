pub mod api;
pub mod health;
pub mod pages;
pub mod routes;
pub mod views;
