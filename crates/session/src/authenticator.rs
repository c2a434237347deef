use configuration::AuthSettings;
use core_types::{Role, SessionUser};

/// Checks a username/password pair against an identity source.
pub trait Authenticator: Send + Sync {
    /// Returns the matching identity, or `None` when the pair is not recognised.
    fn check_credentials(&self, username: &str, password: &str) -> Option<SessionUser>;
}

/// Creates new accounts.
pub trait Registrar: Send + Sync {
    fn register(&self, username: &str, password: &str) -> SessionUser;
}

/// Both halves of an identity source, as held by the session store.
pub trait IdentityProvider: Authenticator + Registrar {}

impl<T: Authenticator + Registrar> IdentityProvider for T {}

/// One entry of the fixed credential list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: u32,
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// A fixed credential list standing in for a real identity provider.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    credentials: Vec<Credential>,
}

impl MockAuthenticator {
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self { credentials }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            settings
                .users
                .iter()
                .map(|entry| Credential {
                    id: entry.id,
                    username: entry.username.clone(),
                    password: entry.password.clone(),
                    role: entry.role,
                })
                .collect(),
        )
    }

    pub fn credentials(&self) -> &[Credential] {
        &self.credentials
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::from_settings(&AuthSettings::default())
    }
}

impl Authenticator for MockAuthenticator {
    fn check_credentials(&self, username: &str, password: &str) -> Option<SessionUser> {
        self.credentials
            .iter()
            .find(|c| c.username == username && c.password == password)
            .map(|c| SessionUser::new(c.id, c.username.clone(), c.role))
    }
}

impl Registrar for MockAuthenticator {
    /// Always succeeds. The new identity gets the next id after the highest
    /// credential id and the `user` role. Usernames are not checked for uniqueness
    /// and the credential list itself is left untouched.
    fn register(&self, username: &str, _password: &str) -> SessionUser {
        let next_id = self.credentials.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        SessionUser::new(next_id, username, Role::User)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_credentials() {
        let auth = MockAuthenticator::default();

        let user = auth.check_credentials("muser", "muser").unwrap();
        assert_eq!(user, SessionUser::new(1, "muser", Role::User));
        assert!(!user.is_admin());

        let admin = auth.check_credentials("mvc", "mvc").unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(admin.is_admin());
    }

    #[test]
    fn test_match_is_exact() {
        let auth = MockAuthenticator::default();
        assert!(auth.check_credentials("muser", "wrong").is_none());
        assert!(auth.check_credentials("MUSER", "muser").is_none());
        assert!(auth.check_credentials("muser ", "muser").is_none());
        assert!(auth.check_credentials("", "").is_none());
    }

    #[test]
    fn test_register_assigns_next_id() {
        let auth = MockAuthenticator::default();
        let created = auth.register("newbie", "secret");
        assert_eq!(created, SessionUser::new(3, "newbie", Role::User));
        // No uniqueness check, and the list is not extended.
        assert_eq!(auth.register("muser", "x").id, 3);
        assert!(auth.check_credentials("newbie", "secret").is_none());
    }

    #[test]
    fn test_register_on_empty_list_starts_at_one() {
        let auth = MockAuthenticator::new(vec![]);
        assert_eq!(auth.register("first", "pw").id, 1);
    }
}
