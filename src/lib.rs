pub mod api;
pub mod card;
pub mod client;
pub mod config;
pub mod display;
pub mod logs;
pub mod pages;
pub mod session;
pub mod table;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
