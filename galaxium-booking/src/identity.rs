use std::sync::{Arc, LazyLock};

use regex::Regex;

use galaxium_core::{BookingError, ServiceError, Store, StoreTx, User};

// Local part, '@', domain, '.', TLD of at least two letters. A shape check,
// not RFC 5322.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Registration and lookup of users keyed by unique email.
#[derive(Clone)]
pub struct IdentityService {
    store: Arc<dyn Store>,
}

impl IdentityService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Register a new user with a name and unique email.
    pub async fn register(&self, name: &str, email: &str) -> Result<User, ServiceError> {
        // 1. Shape-check the email before touching storage
        if !is_valid_email(email) {
            return Err(BookingError::InvalidEmail { email: email.to_string() }.into());
        }

        let mut tx = self.store.begin().await?;

        // 2. Uniqueness is a case-sensitive exact match
        if tx.user_by_email(email).await?.is_some() {
            return Err(BookingError::EmailExists { email: email.to_string() }.into());
        }

        let user = tx.insert_user(name, email).await?;
        tx.commit().await?;

        tracing::info!(user_id = user.user_id, "registered user");
        Ok(user)
    }

    /// Retrieve a user by exact name and email.
    pub async fn find_user(&self, name: &str, email: &str) -> Result<User, ServiceError> {
        match self.store.user_by_name_and_email(name, email).await? {
            Some(user) => Ok(user),
            None => Err(BookingError::user_lookup_failed(name, email).into()),
        }
    }
}

/// Resolve `user_id` inside an open transaction and check the supplied name
/// against the registered one. An unknown id and a known id with the wrong
/// name are distinct failures; callers are told which occurred.
pub async fn verify_identity(
    tx: &mut dyn StoreTx,
    user_id: i64,
    name: &str,
) -> Result<User, ServiceError> {
    let Some(user) = tx.user(user_id).await? else {
        return Err(BookingError::user_id_unknown(user_id).into());
    };
    if user.name != name {
        return Err(BookingError::NameMismatch {
            user_id,
            given: name.to_string(),
            registered: user.name,
        }
        .into());
    }
    Ok(user)
}
