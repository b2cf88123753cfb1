use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Session;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 4;

/// A human-readable team identifier of the form `M-7QX2` / `A-K9P0`.
///
/// The prefix names the session the team plays in, so a morning ID can never
/// be used to join an afternoon team. Values are always stored uppercase, which
/// makes lookups case-insensitive for whoever typed the ID in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    /// Draws a fresh random ID for `session`.
    pub fn generate(session: Session) -> Self {
        Self::generate_with(session, &mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(session: Session, rng: &mut R) -> Self {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Self(format!("{}-{}", session.team_id_prefix(), suffix))
    }

    /// Parses user input, tolerating surrounding whitespace and lowercase.
    ///
    /// ```
    /// use storage::models::{Session, TeamId};
    ///
    /// let id = TeamId::parse(" a-k9p0 ").unwrap();
    /// assert_eq!(id.as_str(), "A-K9P0");
    /// assert_eq!(id.session(), Session::Afternoon);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_uppercase();
        let (prefix, suffix) = normalized.split_once('-')?;

        let mut prefix_chars = prefix.chars();
        let prefix_char = prefix_chars.next()?;
        if prefix_chars.next().is_some() || Session::from_team_id_prefix(prefix_char).is_none() {
            return None;
        }

        if suffix.len() != SUFFIX_LEN || !suffix.bytes().all(|b| ALPHABET.contains(&b)) {
            return None;
        }

        Some(Self(normalized))
    }

    pub fn session(&self) -> Session {
        self.0
            .chars()
            .next()
            .and_then(Session::from_team_id_prefix)
            .unwrap_or(Session::Morning)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_ids_carry_session_prefix() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let morning = TeamId::generate_with(Session::Morning, &mut rng);
            let afternoon = TeamId::generate_with(Session::Afternoon, &mut rng);
            assert!(morning.as_str().starts_with("M-"));
            assert!(afternoon.as_str().starts_with("A-"));
            assert_eq!(morning.as_str().len(), 6);
            assert_eq!(TeamId::parse(morning.as_str()), Some(morning));
        }
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let id = TeamId::parse("  m-ab12 ").unwrap();
        assert_eq!(id.as_str(), "M-AB12");
        assert_eq!(id.session(), Session::Morning);
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        for raw in ["", "M", "M-", "M-ABC", "M-ABCDE", "X-AB12", "MM-AB12", "M_AB12", "M-AB!2"] {
            assert!(TeamId::parse(raw).is_none(), "{raw} should be rejected");
        }
    }
}
