//! User, credential and session persistence.
//!
//! # Invariants
//! - Username and email are unique across users (case-insensitive).
//! - A user and its credential are written together on registration.
//! - The session key holds at most one user record.

use super::collection::JsonCollection;
use super::kv_store::{read_json, write_json, KeyValueStore};
use super::{RepoError, RepoResult};
use crate::model::user::{StoredCredential, User};

/// Storage key holding the JSON array of registered users.
pub const USERS_KEY: &str = "task_management_users";
/// Storage key holding the signed-in user record.
pub const SESSION_KEY: &str = "task_management_user";
/// Storage key holding credential digests.
pub const CREDENTIALS_KEY: &str = "task_management_credentials";

/// Repository contract for users and the current session.
pub trait UserRepository {
    fn list_users(&self) -> RepoResult<Vec<User>>;
    fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    fn find_user_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    /// Stores a new user with its credential.
    fn create_user(&self, user: &User, credential: &StoredCredential) -> RepoResult<()>;
    fn credential_for(&self, user_id: &str) -> RepoResult<Option<StoredCredential>>;
    fn current_session(&self) -> RepoResult<Option<User>>;
    fn set_current_session(&self, user: &User) -> RepoResult<()>;
    fn clear_current_session(&self) -> RepoResult<()>;
}

/// User repository over the key-value store.
#[derive(Clone)]
pub struct KvUserRepository<S> {
    store: S,
    users: JsonCollection<S, User>,
    credentials: JsonCollection<S, StoredCredential>,
}

impl<S: KeyValueStore + Clone> KvUserRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            users: JsonCollection::new(store.clone(), USERS_KEY),
            credentials: JsonCollection::new(store.clone(), CREDENTIALS_KEY),
            store,
        }
    }
}

impl<S: KeyValueStore + Clone> UserRepository for KvUserRepository<S> {
    fn list_users(&self) -> RepoResult<Vec<User>> {
        self.users.load_all()
    }

    fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .load_all()?
            .into_iter()
            .find(|user| user.email.eq_ignore_ascii_case(email)))
    }

    fn find_user_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .load_all()?
            .into_iter()
            .find(|user| user.username.eq_ignore_ascii_case(username)))
    }

    fn create_user(&self, user: &User, credential: &StoredCredential) -> RepoResult<()> {
        let users = self.users.load_all()?;
        if let Some(existing) = users.iter().find(|u| {
            u.username.eq_ignore_ascii_case(&user.username) || u.email.eq_ignore_ascii_case(&user.email)
        }) {
            return Err(RepoError::AlreadyExists {
                kind: "User",
                id: existing.id.clone(),
            });
        }
        self.credentials.insert(credential)?;
        self.users.insert(user)
    }

    fn credential_for(&self, user_id: &str) -> RepoResult<Option<StoredCredential>> {
        self.credentials.get(user_id)
    }

    fn current_session(&self) -> RepoResult<Option<User>> {
        read_json(&self.store, SESSION_KEY)
    }

    fn set_current_session(&self, user: &User) -> RepoResult<()> {
        write_json(&self.store, SESSION_KEY, user)
    }

    fn clear_current_session(&self) -> RepoResult<()> {
        self.store.remove(SESSION_KEY)?;
        Ok(())
    }
}
