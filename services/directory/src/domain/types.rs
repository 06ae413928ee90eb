use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DirectoryServiceError;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// A service provider listed in the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub id: i32,
    pub name: String,
    pub service_category: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub keywords: String,
    pub registered_at: DateTime<Utc>,
}

/// Login identity. `password` is stored and compared as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub provider_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A user owns a provider only when its link points at exactly that id.
    pub fn owns(&self, provider_id: i32) -> bool {
        self.provider_id == Some(provider_id)
    }
}

/// Sanitized view of a [`User`] returned after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub provider_id: Option<i32>,
    pub provider: Option<Provider>,
}

impl UserProfile {
    pub fn from_user(user: User, provider: Option<Provider>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            provider_id: user.provider_id,
            provider,
        }
    }
}

/// An image in a provider's gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderImage {
    pub id: i32,
    pub provider_id: i32,
    pub image_url: String,
    pub storage_public_id: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

/// The editable fields of a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFields {
    pub name: String,
    pub service_category: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub keywords: String,
}

impl ProviderFields {
    /// Every field must carry a non-blank value.
    pub fn validate(&self) -> Result<(), DirectoryServiceError> {
        let missing = [
            ("name", &self.name),
            ("service", &self.service_category),
            ("email", &self.email),
            ("phone", &self.phone),
            ("location", &self.location),
            ("keywords", &self.keywords),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect::<Vec<_>>();

        if !missing.is_empty() {
            return Err(DirectoryServiceError::validation(format!(
                "all provider fields are required (missing: {})",
                missing.join(", ")
            )));
        }
        if !validate_email(&self.email) {
            return Err(DirectoryServiceError::validation(format!(
                "invalid email address: {}",
                self.email
            )));
        }
        Ok(())
    }
}

/// Partial update of a provider; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderChanges {
    pub name: Option<String>,
    pub service_category: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub keywords: Option<String>,
}

impl ProviderChanges {
    pub fn apply_to(&self, provider: &mut Provider) {
        if let Some(ref v) = self.name {
            provider.name = v.clone();
        }
        if let Some(ref v) = self.service_category {
            provider.service_category = v.clone();
        }
        if let Some(ref v) = self.email {
            provider.email = v.clone();
        }
        if let Some(ref v) = self.phone {
            provider.phone = v.clone();
        }
        if let Some(ref v) = self.location {
            provider.location = v.clone();
        }
        if let Some(ref v) = self.keywords {
            provider.keywords = v.clone();
        }
    }
}

/// Login credentials for the user created alongside a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOwner {
    pub username: String,
    pub password: String,
    pub full_name: String,
}

/// A gallery image about to be appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProviderImage {
    pub provider_id: i32,
    pub image_url: String,
    pub storage_public_id: String,
}

/// Check an address against the usual `local@domain.tld` shape.
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Next gallery position: one past the current maximum, or 0 for an empty gallery.
pub fn next_image_order(current_max: Option<i32>) -> i32 {
    current_max.map_or(0, |max| max + 1)
}
