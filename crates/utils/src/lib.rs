use rand::{distributions::Alphanumeric, Rng};

/// Random alphanumeric secret, used when an operator did not configure one
pub fn create_random_secret(secret_len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}

/// Compares two secrets without short circuiting on the first differing byte
pub fn secrets_match(expected: &str, given: &str) -> bool {
    let expected = expected.as_bytes();
    let given = given.as_bytes();
    if expected.len() != given.len() {
        return false;
    }
    expected
        .iter()
        .zip(given.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_creates_random_secret() {
        let sec1 = create_random_secret(30);
        let sec2 = create_random_secret(30);
        assert_eq!(sec1.len(), 30);
        assert_eq!(sec2.len(), 30);
        assert_ne!(sec2, sec1);
        assert!(sec1.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn it_compares_secrets() {
        assert!(secrets_match("abc123", "abc123"));
        assert!(!secrets_match("abc123", "abc124"));
        assert!(!secrets_match("abc123", "abc12"));
        assert!(!secrets_match("abc123", ""));
    }
}
