//! Author/committer overrides for new commits
//!
//! Identities are injected into a single `commit-tree` invocation through
//! its environment, never written to repository configuration.

use chrono::{DateTime, FixedOffset};
use derive_new::new;

/// Name, email and optional date for one side of a commit
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Identity {
    pub name: String,
    pub email: String,
    #[new(default)]
    pub when: Option<DateTime<FixedOffset>>,
}

impl Identity {
    pub fn with_date(mut self, when: DateTime<FixedOffset>) -> Self {
        self.when = Some(when);
        self
    }

    /// Load an identity from `GIT_<ROLE>_NAME`, `GIT_<ROLE>_EMAIL` and the
    /// optional `GIT_<ROLE>_DATE`
    ///
    /// Returns None when either name or email is unset.
    pub fn load_from_env(role: IdentityRole) -> Option<Self> {
        let prefix = role.env_prefix();
        let name = std::env::var(format!("{prefix}_NAME")).ok()?;
        let email = std::env::var(format!("{prefix}_EMAIL")).ok()?;
        let when = std::env::var(format!("{prefix}_DATE"))
            .ok()
            .and_then(|date_str| {
                DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                    .ok()
            });

        Some(Identity { name, email, when })
    }

    /// Environment variables that make the external tool record this identity
    pub(crate) fn to_env(&self, role: IdentityRole) -> Vec<(String, String)> {
        let prefix = role.env_prefix();
        let mut env = vec![
            (format!("{prefix}_NAME"), self.name.clone()),
            (format!("{prefix}_EMAIL"), self.email.clone()),
        ];
        if let Some(when) = &self.when {
            // without the `@` short epoch values are read as calendar dates
            env.push((
                format!("{prefix}_DATE"),
                format!("@{} {}", when.timestamp(), when.format("%z")),
            ));
        }
        env
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityRole {
    Author,
    Committer,
}

impl IdentityRole {
    fn env_prefix(&self) -> &'static str {
        match self {
            IdentityRole::Author => "GIT_AUTHOR",
            IdentityRole::Committer => "GIT_COMMITTER",
        }
    }
}

/// Optional author and committer overrides
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CommitIdentities {
    pub author: Option<Identity>,
    pub committer: Option<Identity>,
}

impl CommitIdentities {
    /// Use the same identity for both author and committer
    pub fn both(identity: Identity) -> Self {
        CommitIdentities {
            author: Some(identity.clone()),
            committer: Some(identity),
        }
    }

    pub fn from_env() -> Self {
        CommitIdentities {
            author: Identity::load_from_env(IdentityRole::Author),
            committer: Identity::load_from_env(IdentityRole::Committer),
        }
    }

    pub(crate) fn to_env(&self) -> Vec<(String, String)> {
        let author = self
            .author
            .iter()
            .flat_map(|identity| identity.to_env(IdentityRole::Author));
        let committer = self
            .committer
            .iter()
            .flat_map(|identity| identity.to_env(IdentityRole::Committer));

        author.chain(committer).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identity_env_includes_date_in_raw_format() {
        let when = DateTime::parse_from_str("2024-01-02 03:04:05 +0130", "%Y-%m-%d %H:%M:%S %z")
            .unwrap();
        let identity = Identity::new("Ada".to_string(), "ada@example.com".to_string()).with_date(when);

        assert_eq!(
            identity.to_env(IdentityRole::Committer),
            vec![
                ("GIT_COMMITTER_NAME".to_string(), "Ada".to_string()),
                ("GIT_COMMITTER_EMAIL".to_string(), "ada@example.com".to_string()),
                ("GIT_COMMITTER_DATE".to_string(), format!("@{} +0130", when.timestamp())),
            ]
        );
    }

    #[test]
    fn early_dates_keep_the_epoch_marker() {
        let when = DateTime::parse_from_rfc3339("1970-01-02T00:00:00+00:00").unwrap();
        let identity = Identity::new("Ada".to_string(), "ada@example.com".to_string()).with_date(when);

        let env = identity.to_env(IdentityRole::Author);

        assert_eq!(env[2], ("GIT_AUTHOR_DATE".to_string(), "@86400 +0000".to_string()));
    }

    #[test]
    fn absent_identities_add_no_environment() {
        assert!(CommitIdentities::default().to_env().is_empty());
    }

    #[test]
    fn both_sets_author_and_committer() {
        let identity = Identity::new("Ada".to_string(), "ada@example.com".to_string());
        let env = CommitIdentities::both(identity).to_env();

        let keys: Vec<&str> = env.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "GIT_AUTHOR_NAME",
                "GIT_AUTHOR_EMAIL",
                "GIT_COMMITTER_NAME",
                "GIT_COMMITTER_EMAIL"
            ]
        );
    }
}
