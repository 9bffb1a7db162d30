//! Path-based exemption policy for the authentication gate.

/// Decides whether a request path is exempt from authentication.
///
/// Matching is case-insensitive prefix comparison against a configured list;
/// there are no wildcard or regex semantics. The list is config data, not
/// control flow: adding a public route means adding an entry, not a branch.
///
/// A newly added public endpoint that is *not* enumerated here is locked out
/// rather than silently bypassing the gate, which is the safer failure
/// direction and must be preserved.
#[derive(Debug, Clone)]
pub struct PathExemptionMatcher {
    /// Stored lowercased; matched against the lowercased request path.
    prefixes: Vec<String>,
}

impl PathExemptionMatcher {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(|p| p.into().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        let path = path.to_ascii_lowercase();
        self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }
}
