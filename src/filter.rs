use regex::Regex;

/// Decides which source URLs belong to the mirrored site
///
/// Matching is a literal, case-sensitive string prefix test against the
/// domain. No URL normalization takes place.
#[derive(Debug)]
pub struct DomainFilter {
    domain: String,
    exclude_regexes: Vec<Regex>,
}

impl DomainFilter {
    /// Create a filter for the given domain prefix (trailing slashes already stripped)
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            exclude_regexes: Vec::new(),
        }
    }

    /// Create a filter that also skips source URLs matching any of the patterns
    pub fn with_exclude_patterns(domain: &str, patterns: &[String]) -> Result<Self, regex::Error> {
        let mut exclude_regexes = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            domain: domain.to_string(),
            exclude_regexes,
        })
    }

    /// The domain prefix this filter matches against
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Determine if a source URL should be mirrored
    pub fn accepts(&self, source_url: &str) -> bool {
        if !source_url.starts_with(&self.domain) {
            return false;
        }

        // Exclusions only narrow what the prefix already accepted
        for regex in &self.exclude_regexes {
            if regex.is_match(source_url) {
                ::log::debug!("Exclude pattern {} matched {}", regex.as_str(), source_url);
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_match() {
        let filter = DomainFilter::new("https://example.com");

        assert!(filter.accepts("https://example.com/img/a.png"));
        assert!(!filter.accepts("https://other.com/img/a.png"));
        assert!(!filter.accepts(""));
    }

    #[test]
    fn test_match_is_literal() {
        let filter = DomainFilter::new("https://example.com");

        // No scheme or case normalization
        assert!(!filter.accepts("http://example.com/img/a.png"));
        assert!(!filter.accepts("HTTPS://EXAMPLE.COM/img/a.png"));
        assert!(!filter.accepts("https://www.example.com/img/a.png"));
    }

    #[test]
    fn test_exclude_patterns() {
        let filter = DomainFilter::with_exclude_patterns(
            "https://example.com",
            &[r"/cache/".to_string(), r"\.gif$".to_string()],
        )
        .unwrap();

        assert!(filter.accepts("https://example.com/img/a.png"));
        assert!(!filter.accepts("https://example.com/cache/a.png"));
        assert!(!filter.accepts("https://example.com/img/spinner.gif"));
        // Patterns never widen the prefix check
        assert!(!filter.accepts("https://other.com/img/a.png"));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = DomainFilter::with_exclude_patterns("https://example.com", &["[".to_string()]);
        assert!(result.is_err());
    }
}
