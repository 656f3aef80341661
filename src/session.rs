//! Session identity and backend configuration.
//!
//! Identity and the backend URL are resolved once at the process boundary
//! and passed into the core explicitly; nothing below this module reads the
//! environment.

use std::env;

/// Acting role; everything that is not `admin` sees only its own tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Sees and aggregates every task.
    Admin,
    /// Sees only tasks assigned to (or, in listings, given by) the user.
    User,
}

impl Role {
    /// Parses role text; anything other than `admin` (case-insensitive)
    /// is a regular user.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.trim().eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }
}

/// The acting user's identity and backend endpoint for one invocation.
#[derive(Debug, Clone)]
pub struct Session {
    /// Login name, matched against task assignee names.
    pub username: String,
    /// Display name, also matched against task assignee names.
    pub display_name: String,
    /// Acting role.
    pub role: Role,
    /// Base URL of the spreadsheet backend.
    pub base_url: String,
}

impl Session {
    /// Loads the session from the environment (after reading `.env`).
    ///
    /// `TASKCAL_URL` is required; `TASKCAL_USER`, `TASKCAL_DISPLAY_NAME`,
    /// and `TASKCAL_ROLE` default to an anonymous regular user.
    ///
    /// # Errors
    ///
    /// Returns an error when `TASKCAL_URL` is not set.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        let base_url = env::var("TASKCAL_URL")
            .map_err(|_| "TASKCAL_URL is not set; export it or add it to .env".to_string())?;
        Ok(Self {
            username: env::var("TASKCAL_USER").unwrap_or_default(),
            display_name: env::var("TASKCAL_DISPLAY_NAME").unwrap_or_default(),
            role: Role::parse(&env::var("TASKCAL_ROLE").unwrap_or_default()),
            base_url,
        })
    }

    /// Whether this session has the privileged role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether a task name refers to this user (trimmed, case-insensitive
    /// match on either the username or the display name).
    #[must_use]
    pub fn owns_name(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        !name.is_empty()
            && (name == self.username.trim().to_lowercase()
                || name == self.display_name.trim().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role, username: &str, display_name: &str) -> Session {
        Session {
            username: username.into(),
            display_name: display_name.into(),
            role,
            base_url: "http://localhost/exec".into(),
        }
    }

    #[test]
    fn role_parse_only_recognizes_admin() {
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse(" ADMIN "), Role::Admin);
        assert_eq!(Role::parse("user"), Role::User);
        assert_eq!(Role::parse(""), Role::User);
    }

    #[test]
    fn owns_name_matches_either_identity() {
        let s = session(Role::User, "alice", "Alice Smith");
        assert!(s.owns_name("alice"));
        assert!(s.owns_name(" ALICE "));
        assert!(s.owns_name("alice smith"));
        assert!(!s.owns_name("bob"));
        assert!(!s.owns_name(""));
    }
}
