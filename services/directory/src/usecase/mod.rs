pub mod auth;
pub mod image;
pub mod ownership;
pub mod provider;
