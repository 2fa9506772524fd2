pub mod auth;
pub mod categories;
pub mod logs;
pub mod orders;
pub mod products;
pub mod settings;
pub mod upload;
pub mod users;
