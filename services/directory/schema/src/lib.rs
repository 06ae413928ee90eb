pub mod provider_images;
pub mod providers;
pub mod users;
