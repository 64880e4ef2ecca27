//! Ordered environment lookups.
//!
//! A setting that may live under several variable names is described once as
//! an [`EnvKey`] and resolved to the first candidate holding a non-empty value.

/// The variable names a setting may be read from, in priority order.
#[derive(Debug, Clone, Copy)]
pub struct EnvKey {
    pub candidates: &'static [&'static str],
}

impl EnvKey {
    pub const fn new(candidates: &'static [&'static str]) -> Self {
        Self { candidates }
    }

    /// The canonical variable name, used when reporting the setting as missing.
    pub fn primary(&self) -> &'static str {
        self.candidates.first().copied().unwrap_or_default()
    }

    /// Resolve against an arbitrary lookup (the process env in production, a map in tests).
    pub fn resolve<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        resolve_first(self.candidates, lookup)
    }
}

/// First non-empty value among `candidates`, trimmed.
pub fn resolve_first<F>(candidates: &[&str], lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    candidates.iter().find_map(|&key| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
