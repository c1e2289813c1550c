//! Registration, login and session handling.
//!
//! # Invariants
//! - Passwords are never stored; only `sha256(salt || password)` is.
//! - Login requires both a known email (or username) and a matching
//!   password.
//! - A stored session pointing at an unknown user is discarded and
//!   reported as expired.

use super::{ensure_valid, Clock, ServiceError, ServiceResult};
use crate::model::new_record_id;
use crate::model::user::{RegisterRequest, StoredCredential, User};
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use crate::validation::user::validate_registration;
use log::{info, warn};
use sha2::{Digest, Sha256};

pub const DEMO_USER_ID: &str = "demo-user-123";
pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_EMAIL: &str = "demo@taskflow.com";
pub const DEMO_DISPLAY_NAME: &str = "Demo User";
pub const DEMO_PASSWORD: &str = "Demo@1234";

pub const DUPLICATE_USER_MESSAGE: &str = "Username or email is already registered";

pub struct AuthService<R: UserRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: UserRepository, C: Clock> AuthService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Registers a user, stores its credential and signs it in.
    pub fn register(&self, request: &RegisterRequest) -> ServiceResult<User> {
        ensure_valid(validate_registration(request))?;
        let display_name = match request.display_name.trim() {
            "" => request.username.trim().to_string(),
            name => name.to_string(),
        };
        let user = User {
            id: new_record_id(),
            username: request.username.trim().to_string(),
            email: request.email.trim().to_string(),
            display_name,
            created_at: self.clock.now(),
        };
        self.store_user(&user, &request.password)?;
        self.repo.set_current_session(&user)?;
        info!(
            "event=auth_register module=service status=ok user_id={}",
            user.id
        );
        Ok(user)
    }

    /// Signs in with an email or username plus password.
    pub fn login(&self, identifier: &str, password: &str) -> ServiceResult<User> {
        let identifier = identifier.trim();
        let user = match self.repo.find_user_by_email(identifier)? {
            Some(user) => Some(user),
            None => self.repo.find_user_by_username(identifier)?,
        };
        let Some(user) = user else {
            warn!("event=auth_login module=service status=error reason=unknown_user");
            return Err(ServiceError::InvalidCredentials);
        };
        let credential = self
            .repo
            .credential_for(&user.id)?
            .ok_or(ServiceError::InvalidCredentials)?;
        if hash_password(&credential.salt, password) != credential.password_hash {
            warn!(
                "event=auth_login module=service status=error reason=bad_password user_id={}",
                user.id
            );
            return Err(ServiceError::InvalidCredentials);
        }
        self.repo.set_current_session(&user)?;
        info!("event=auth_login module=service status=ok user_id={}", user.id);
        Ok(user)
    }

    pub fn logout(&self) -> ServiceResult<()> {
        self.repo.clear_current_session()?;
        info!("event=auth_logout module=service status=ok");
        Ok(())
    }

    /// Restores the persisted session.
    ///
    /// Returns `Ok(None)` when nobody is signed in and `SessionExpired`
    /// when the stored user no longer exists.
    pub fn restore_session(&self) -> ServiceResult<Option<User>> {
        let Some(session) = self.repo.current_session()? else {
            return Ok(None);
        };
        let known = self
            .repo
            .list_users()?
            .into_iter()
            .find(|user| user.id == session.id);
        match known {
            Some(user) => Ok(Some(user)),
            None => {
                self.repo.clear_current_session()?;
                warn!(
                    "event=auth_session module=service status=error reason=unknown_user user_id={}",
                    session.id
                );
                Err(ServiceError::SessionExpired)
            }
        }
    }

    /// Signed-in user or `NotAuthenticated`.
    pub fn require_user(&self) -> ServiceResult<User> {
        self.restore_session()?.ok_or(ServiceError::NotAuthenticated)
    }

    /// Creates the demo account when missing and returns it.
    pub fn ensure_demo_user(&self) -> ServiceResult<User> {
        if let Some(user) = self.repo.find_user_by_email(DEMO_EMAIL)? {
            return Ok(user);
        }
        self.create_demo_user()
    }

    /// Creates the demo account only if it has never existed.
    ///
    /// Returns `Some` on the call that created it, so callers can attach
    /// first-run sample data exactly once.
    pub fn create_demo_user_if_missing(&self) -> ServiceResult<Option<User>> {
        if self.repo.find_user_by_email(DEMO_EMAIL)?.is_some() {
            return Ok(None);
        }
        self.create_demo_user().map(Some)
    }

    fn create_demo_user(&self) -> ServiceResult<User> {
        let user = User {
            id: DEMO_USER_ID.to_string(),
            username: DEMO_USERNAME.to_string(),
            email: DEMO_EMAIL.to_string(),
            display_name: DEMO_DISPLAY_NAME.to_string(),
            created_at: self.clock.now(),
        };
        self.store_user(&user, DEMO_PASSWORD)?;
        info!("event=auth_demo_user module=service status=ok user_id={}", user.id);
        Ok(user)
    }

    fn store_user(&self, user: &User, password: &str) -> ServiceResult<()> {
        let salt = new_record_id();
        let credential = StoredCredential {
            user_id: user.id.clone(),
            password_hash: hash_password(&salt, password),
            salt,
        };
        self.repo
            .create_user(user, &credential)
            .map_err(|err| match err {
                RepoError::AlreadyExists { .. } => {
                    ServiceError::Conflict(DUPLICATE_USER_MESSAGE.to_string())
                }
                other => other.into(),
            })
    }
}

/// Hex-encoded SHA-256 of `salt` followed by `password`.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::{hash_password, AuthService, DEMO_USER_ID};
    use crate::db::open_db_in_memory;
    use crate::repo::kv_store::SqliteKvStore;
    use crate::repo::user_repo::KvUserRepository;
    use crate::service::SystemClock;

    #[test]
    fn hash_depends_on_salt_and_password() {
        let a = hash_password("salt-a", "Secret#1");
        assert_eq!(a.len(), 64);
        assert_eq!(a, hash_password("salt-a", "Secret#1"));
        assert_ne!(a, hash_password("salt-b", "Secret#1"));
        assert_ne!(a, hash_password("salt-a", "Secret#2"));
    }

    #[test]
    fn demo_user_is_reported_created_only_once() {
        let conn = open_db_in_memory().unwrap();
        let kv = SqliteKvStore::try_new(&conn).unwrap();
        let auth = AuthService::new(KvUserRepository::new(kv), SystemClock);

        let created = auth.create_demo_user_if_missing().unwrap();
        assert_eq!(created.map(|user| user.id), Some(DEMO_USER_ID.to_string()));
        assert_eq!(auth.create_demo_user_if_missing().unwrap(), None);
        assert_eq!(auth.ensure_demo_user().unwrap().id, DEMO_USER_ID);
    }
}
