use rand::{Rng, distributions::Alphanumeric};

pub const KEY_PREFIX: &str = "sk-";
pub const KEY_SECRET_LEN: usize = 32;

/// Generates a new API key: `sk-` followed by 32 alphanumeric characters.
///
/// Characters are drawn from the thread-local CSPRNG so keys stay unguessable.
pub fn generate_api_key() -> String {
    let secret: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_SECRET_LEN)
        .map(char::from)
        .collect();
    format!("{}{}", KEY_PREFIX, secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_have_prefix_and_alphanumeric_secret() {
        let key = generate_api_key();
        let secret = key.strip_prefix(KEY_PREFIX).expect("prefix");
        assert_eq!(secret.len(), KEY_SECRET_LEN);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn keys_differ_between_calls() {
        assert_ne!(generate_api_key(), generate_api_key());
    }
}
