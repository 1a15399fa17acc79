//! Mocked authentication with a single session slot.
//!
//! Any well-formed credentials succeed. The signed-in user is mirrored to
//! the `user` document so a restart resumes the session.

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{GeoPoint, User, UserId};
use crate::error::GlacierError;
use crate::persistence::local::{LocalStore, USER_KEY};

/// Username given to every mock login.
pub const MOCK_USERNAME: &str = "testuser";

/// Phone number given to every mock login.
pub const MOCK_PHONE_NUMBER: &str = "+919876543210";

/// Home location given to every mock login (New Delhi).
pub const MOCK_LOCATION: GeoPoint = GeoPoint::new(28.6139, 77.2090);

const MIN_PASSWORD_LEN: usize = 6;
const MIN_USERNAME_LEN: usize = 3;

/// Profile fields submitted on signup.
#[derive(Debug, Clone)]
pub struct Signup {
    /// Login email.
    pub email: String,
    /// Display name.
    pub username: String,
    /// Contact number.
    pub phone_number: String,
    /// Password. Only its length is checked.
    pub password: String,
    /// Home location, required.
    pub location: Option<GeoPoint>,
}

/// Holds the current session, if any.
#[derive(Debug)]
pub struct AuthService {
    session: RwLock<Option<User>>,
    local: LocalStore,
}

impl AuthService {
    /// Creates a service with no session.
    #[must_use]
    pub fn new(local: LocalStore) -> Self {
        Self {
            session: RwLock::new(None),
            local,
        }
    }

    /// Creates a service, resuming the session stored under `user`.
    ///
    /// A document that does not decode is deleted.
    pub async fn restore(local: LocalStore) -> Self {
        let user = match local.get::<User>(USER_KEY).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "discarding stored user");
                if let Err(e) = local.remove(USER_KEY).await {
                    tracing::warn!(error = %e, "failed to remove stored user");
                }
                None
            }
        };
        if let Some(user) = &user {
            tracing::info!(user_id = %user.id, "session restored");
        }
        Self {
            session: RwLock::new(user),
            local,
        }
    }

    /// Logs in with any well-formed credentials, producing the mock user.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::InvalidRequest`] for a malformed email or a
    /// short password.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, GlacierError> {
        validate_email(email)?;
        validate_password(password)?;

        let user = User {
            id: UserId::new(),
            email: email.trim().to_string(),
            username: MOCK_USERNAME.to_string(),
            phone_number: MOCK_PHONE_NUMBER.to_string(),
            location: MOCK_LOCATION,
            created_at: Utc::now(),
        };
        self.start_session(user.clone()).await;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(user)
    }

    /// Registers a new profile and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::InvalidRequest`] when a field fails
    /// validation or the location is missing.
    pub async fn signup(&self, signup: Signup) -> Result<User, GlacierError> {
        validate_email(&signup.email)?;
        if signup.username.trim().chars().count() < MIN_USERNAME_LEN {
            return Err(GlacierError::InvalidRequest(
                "Username must be at least 3 characters".to_string(),
            ));
        }
        if !is_valid_phone(signup.phone_number.trim()) {
            return Err(GlacierError::InvalidRequest(
                "Please enter a valid phone number".to_string(),
            ));
        }
        validate_password(&signup.password)?;
        let location = signup.location.ok_or_else(|| {
            GlacierError::InvalidRequest("Location is required to register.".to_string())
        })?;
        location.validate()?;

        let user = User {
            id: UserId::new(),
            email: signup.email.trim().to_string(),
            username: signup.username.trim().to_string(),
            phone_number: signup.phone_number.trim().to_string(),
            location,
            created_at: Utc::now(),
        };
        self.start_session(user.clone()).await;
        tracing::info!(user_id = %user.id, "user signed up");
        Ok(user)
    }

    /// Ends the session and forgets the stored user.
    pub async fn logout(&self) {
        let previous = self.session.write().await.take();
        if let Err(e) = self.local.remove(USER_KEY).await {
            tracing::warn!(error = %e, "failed to remove stored user");
        }
        if let Some(user) = previous {
            tracing::info!(user_id = %user.id, "user logged out");
        }
    }

    /// Returns the signed-in user, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.session.read().await.clone()
    }

    /// Moves the signed-in user's home location.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::NotAuthenticated`] without a session and
    /// [`GlacierError::InvalidRequest`] for an out-of-range point.
    pub async fn update_location(&self, location: GeoPoint) -> Result<User, GlacierError> {
        location.validate()?;
        let mut session = self.session.write().await;
        let user = session.as_mut().ok_or(GlacierError::NotAuthenticated)?;
        user.location = location;
        let updated = user.clone();
        self.persist(&updated).await;
        Ok(updated)
    }

    async fn start_session(&self, user: User) {
        let mut session = self.session.write().await;
        self.persist(&user).await;
        *session = Some(user);
    }

    async fn persist(&self, user: &User) {
        if let Err(e) = self.local.set(USER_KEY, user).await {
            tracing::warn!(error = %e, "failed to persist user");
        }
    }
}

fn validate_email(email: &str) -> Result<(), GlacierError> {
    if email.trim().is_empty() {
        return Err(GlacierError::InvalidRequest("Email is required".to_string()));
    }
    if !is_valid_email(email.trim()) {
        return Err(GlacierError::InvalidRequest("Invalid email address".to_string()));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), GlacierError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(GlacierError::InvalidRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

/// `local@domain.tld` with the usual address characters and a
/// two-letter-or-longer alphabetic TLD.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
        && !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ".-".contains(c))
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Optional leading `+`, then 10 to 12 digits.
fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    (10..=12).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}
