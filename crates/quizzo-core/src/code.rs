//! Shareable quiz codes.

use rand::Rng;

/// Characters a quiz code is drawn from.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default code length.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Generate a random code of `len` characters.
pub fn generate_quiz_code(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Normalize a code typed by a student: surrounding whitespace is dropped
/// and letters are upper-cased.
pub fn normalize_quiz_code(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Whether a code only uses the code alphabet.
pub fn is_well_formed_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_well_formed() {
        for len in [1, 6, 12] {
            let code = generate_quiz_code(len);
            assert_eq!(code.len(), len);
            assert!(is_well_formed_code(&code), "bad code {code}");
        }
    }

    #[test]
    fn normalize_is_case_insensitive() {
        assert_eq!(normalize_quiz_code("  abc123\n"), "ABC123");
        assert_eq!(normalize_quiz_code("AbC123"), "ABC123");
    }

    #[test]
    fn rejects_foreign_characters() {
        assert!(!is_well_formed_code(""));
        assert!(!is_well_formed_code("abc123"));
        assert!(!is_well_formed_code("AB-123"));
        assert!(is_well_formed_code("Q9Z000"));
    }
}
