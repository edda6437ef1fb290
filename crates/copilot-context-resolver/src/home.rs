//! Home-directory shorthand expansion.

/// Shorthand prefix standing for the home directory.
pub const HOME_SHORTHAND: char = '~';

/// Snapshot of the environment variables that name the home directory.
///
/// `HOME` is consulted first, then `USERPROFILE`. An unset or empty
/// variable falls through to the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeEnv {
    home: Option<String>,
    user_profile: Option<String>,
}

impl HomeEnv {
    /// Build from explicit values.
    #[must_use]
    pub fn new(home: Option<String>, user_profile: Option<String>) -> Self {
        Self { home, user_profile }
    }

    /// Environment with only `HOME` set.
    #[must_use]
    pub fn with_home(home: impl Into<String>) -> Self {
        Self::new(Some(home.into()), None)
    }

    /// Capture `HOME` and `USERPROFILE` from the current process.
    #[must_use]
    pub fn from_process() -> Self {
        Self::new(
            std::env::var("HOME").ok(),
            std::env::var("USERPROFILE").ok(),
        )
    }

    /// The home directory, or an empty string when neither variable is usable.
    #[must_use]
    pub fn home_dir(&self) -> &str {
        [&self.home, &self.user_profile]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    /// Replace a leading `~` with the home directory.
    ///
    /// With no usable home directory the shorthand collapses to the empty
    /// string, so `~/.copilot.md` becomes `/.copilot.md`.
    #[must_use]
    pub fn expand(&self, reference: &str) -> String {
        match reference.strip_prefix(HOME_SHORTHAND) {
            Some(rest) => {
                let home = self.home_dir();
                if home.is_empty() {
                    tracing::debug!(reference, "No home directory set; expanding ~ to nothing");
                }
                format!("{home}{rest}")
            }
            None => reference.to_string(),
        }
    }
}
