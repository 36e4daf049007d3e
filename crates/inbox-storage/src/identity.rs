use crate::{LocalStore, StorageError};
use inbox_core::{UserId, DEFAULT_USER_ID};

pub const CURRENT_USER_KEY: &str = "current_user_id";
pub const DEMO_USERS: [&str; 3] = [DEFAULT_USER_ID, "demo1", "demo2"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Development stand-in for real authentication.
///
/// Outside dev mode every lookup resolves to the default user and nothing is
/// persisted.
#[derive(Debug, Clone)]
pub struct IdentityStore {
    store: LocalStore,
    dev_mode: bool,
}

impl IdentityStore {
    pub fn new(store: LocalStore, dev_mode: bool) -> Self {
        Self { store, dev_mode }
    }

    /// Resolves the active user: explicit override, then the stored demo
    /// user, then `default`. An override is remembered for later runs.
    pub fn resolve(&self, explicit: Option<&str>) -> Result<UserId, StorageError> {
        if !self.dev_mode {
            return Ok(UserId::default());
        }

        if let Some(value) = explicit.map(str::trim).filter(|value| !value.is_empty()) {
            let user = UserId::new(value);
            self.store.set(CURRENT_USER_KEY, &user)?;
            return Ok(user);
        }

        Ok(self
            .store
            .get::<UserId>(CURRENT_USER_KEY)?
            .filter(|user| !user.as_str().is_empty())
            .unwrap_or_default())
    }

    pub fn current(&self) -> Result<UserId, StorageError> {
        self.resolve(None)
    }

    pub fn set(&self, user: &UserId) -> Result<(), StorageError> {
        if !self.dev_mode {
            return Ok(());
        }
        self.store.set(CURRENT_USER_KEY, user)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        if !self.dev_mode {
            return Ok(());
        }
        self.store.remove(CURRENT_USER_KEY)
    }

    pub fn is_authenticated(&self) -> Result<bool, StorageError> {
        Ok(self.dev_mode && !self.current()?.is_default())
    }

    pub fn demo_users(&self) -> Vec<UserId> {
        if !self.dev_mode {
            return Vec::new();
        }
        DEMO_USERS.iter().copied().map(UserId::new).collect()
    }

    /// Mock profile for a non-default demo user.
    pub fn profile(&self, user: &UserId) -> Option<UserProfile> {
        if !self.dev_mode || user.is_default() {
            return None;
        }

        let id = user.as_str();
        let mut chars = id.chars();
        let name = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };

        Some(UserProfile {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::IdentityStore;
    use crate::LocalStore;
    use inbox_core::UserId;

    fn identity(dev_mode: bool) -> (tempfile::TempDir, IdentityStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::open(dir.path()).expect("store opened");
        (dir, IdentityStore::new(store, dev_mode))
    }

    #[test]
    fn falls_back_to_default_user() {
        let (_dir, identity) = identity(true);
        assert_eq!(identity.current().expect("resolved"), UserId::default());
        assert!(!identity.is_authenticated().expect("checked"));
    }

    #[test]
    fn explicit_user_is_remembered() {
        let (_dir, identity) = identity(true);
        let user = identity.resolve(Some(" demo1 ")).expect("resolved");
        assert_eq!(user.as_str(), "demo1");
        assert_eq!(identity.current().expect("resolved").as_str(), "demo1");

        identity.clear().expect("cleared");
        assert!(identity.current().expect("resolved").is_default());
    }

    #[test]
    fn production_mode_ignores_stored_identity() {
        let (_dir, identity) = identity(false);
        identity.set(&UserId::new("demo2")).expect("set is a no-op");
        assert!(identity.resolve(Some("demo1")).expect("resolved").is_default());
        assert!(identity.demo_users().is_empty());
    }

    #[test]
    fn builds_mock_profile_for_demo_user() {
        let (_dir, identity) = identity(true);
        let profile = identity
            .profile(&UserId::new("demo2"))
            .expect("profile for demo user");
        assert_eq!(profile.email, "demo2@example.com");
        assert_eq!(profile.name, "Demo2");
        assert!(identity.profile(&UserId::default()).is_none());
    }
}
