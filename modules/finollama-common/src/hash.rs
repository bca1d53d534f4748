use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the UTF-8 bytes of `content`.
///
/// Used to tell whether an article changed since it was last fact-checked.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_deterministic() {
        assert_eq!(content_hash("Sky is blue."), content_hash("Sky is blue."));
    }

    #[test]
    fn content_hash_different_inputs() {
        assert_ne!(content_hash("Sky is blue."), content_hash("Sky is green."));
        assert_ne!(content_hash(""), content_hash(" "));
    }

    #[test]
    fn content_hash_is_fixed_length_hex() {
        let h = content_hash("hello world");
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(
            h,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn content_hash_of_empty_string() {
        assert_eq!(
            content_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
