//! Human-readable application tracking codes: `WD-<base36 millis>-<5 base36 chars>`.

use chrono::Utc;
use rand::Rng;

use crate::shared::constants::TRACKING_CODE_PREFIX;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const RANDOM_LEN: usize = 5;

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Mint a new tracking code. Uniqueness is probabilistic; the database
/// constraint on `tracking_code` is the backstop.
pub fn generate() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let mut rng = rand::thread_rng();
    let suffix: String = (0..RANDOM_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();

    format!("{}-{}-{}", TRACKING_CODE_PREFIX, to_base36(millis), suffix)
}

/// Canonical form used for lookups
pub fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "LOYW3V28");
    }

    #[test]
    fn test_generated_code_format() {
        let re = Regex::new(r"^WD-[0-9A-Z]+-[0-9A-Z]{5}$").unwrap();
        for _ in 0..100 {
            let code = generate();
            assert!(re.is_match(&code), "bad code {}", code);
        }
    }

    #[test]
    fn test_codes_differ() {
        assert_ne!(generate(), generate());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  wd-abc-12x3z "), "WD-ABC-12X3Z");
    }
}
