use glob::{Pattern, PatternError};

/// A key filter such as `cookie.*` or `form.*.label`.
///
/// Each dot-separated segment is a glob matched against exactly one key
/// segment, so wildcards never cross a `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPattern {
    segments: Vec<Pattern>,
}

impl KeyPattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let segments = pattern
            .split('.')
            .map(Pattern::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    pub fn is_glob(&self) -> bool {
        self.segments
            .iter()
            .any(|s| s.as_str().contains(['*', '?', '[']))
    }

    pub fn matches(&self, key: &str) -> bool {
        let mut key_segments = key.split('.');
        let all_match = self
            .segments
            .iter()
            .all(|pattern| key_segments.next().is_some_and(|seg| pattern.matches(seg)));
        all_match && key_segments.next().is_none()
    }
}
