pub mod admins;
pub mod chat;
pub mod employees;
pub mod health;
pub mod news;
pub mod orders;
pub mod products;
pub mod quotes;
pub mod services;
pub mod support;
pub mod users;
