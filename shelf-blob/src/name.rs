use crate::{BlobError, BlobResult};

/// A validated flat blob name.
///
/// Construction is the only validation point. The raw string (already
/// percent-decoded by the transport) must be non-empty and must not contain a
/// path separator or the two-character parent-directory token anywhere in the
/// string. This is a conservative whole-string check, not segment parsing:
/// `a..b` is rejected even though it never leaves the namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobName(String);

impl BlobName {
    pub fn parse<S: Into<String>>(raw: S) -> BlobResult<Self> {
        let raw = raw.into();
        if raw.is_empty() || raw.contains('/') || raw.contains('\\') || raw.contains("..") {
            return Err(BlobError::invalid_name(raw));
        }
        Ok(Self(raw))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlobName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_flat_names() {
        for raw in ["file.ext", "no-extension", "dotted.name.txt", "UPPER_case-1"] {
            assert!(BlobName::parse(raw).is_ok(), "{raw:?} should be accepted");
        }
    }

    #[test]
    fn rejects_separators_and_parent_tokens() {
        for raw in [
            "",
            "nested/path",
            "trailing/",
            "/leading",
            "..",
            "a..b",
            "..hidden",
            "back\\slash",
        ] {
            assert!(
                matches!(BlobName::parse(raw), Err(BlobError::InvalidName { .. })),
                "{raw:?} should be rejected"
            );
        }
    }
}
