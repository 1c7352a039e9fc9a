//! EIP-55 mixed-case checksums for withdrawal addresses.

use sha3::{Digest, Keccak256};

use crate::StardustError;

/// Returns the checksummed form of a `0x`-prefixed 20-byte hex address.
///
/// All-lowercase and all-uppercase inputs are accepted as-is. Mixed-case
/// input is treated as already checksummed and must match.
pub fn checksum_address(address: &str) -> Result<String, StardustError> {
    let trimmed = address.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() != 40 || hex::decode(digits).is_err() {
        return Err(StardustError::Encode(format!("invalid address '{address}'")));
    }

    let lower = digits.to_ascii_lowercase();
    let hash = Keccak256::digest(lower.as_bytes());

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");
    for (index, ch) in lower.chars().enumerate() {
        let byte = hash[index / 2];
        let nibble = if index % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if ch.is_ascii_alphabetic() && nibble >= 8 {
            checksummed.push(ch.to_ascii_uppercase());
        } else {
            checksummed.push(ch);
        }
    }

    let mixed_case = digits.chars().any(|c| c.is_ascii_lowercase())
        && digits.chars().any(|c| c.is_ascii_uppercase());
    if mixed_case && checksummed[2..] != *digits {
        return Err(StardustError::Encode(format!(
            "bad address checksum '{address}'"
        )));
    }

    Ok(checksummed)
}

#[cfg(test)]
mod tests {
    use super::checksum_address;
    use crate::StardustError;

    const VECTORS: [&str; 4] = [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn checksums_lowercase_input() {
        for expected in VECTORS {
            let lower = expected.to_ascii_lowercase();
            assert_eq!(checksum_address(&lower).expect("valid address"), expected);
        }
    }

    #[test]
    fn accepts_correct_checksum_and_uppercase_digits() {
        for expected in VECTORS {
            assert_eq!(checksum_address(expected).expect("valid address"), expected);
            let upper = format!("0x{}", expected[2..].to_ascii_uppercase());
            assert_eq!(checksum_address(&upper).expect("valid address"), expected);
        }
    }

    #[test]
    fn rejects_wrong_checksum() {
        let err = checksum_address("0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")
            .expect_err("bad checksum must fail");
        assert!(matches!(err, StardustError::Encode(message) if message.contains("checksum")));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "0x1234", "0xzzaeb6053f3e94c9b9a09f33669435e7ef1beaed"] {
            assert!(checksum_address(bad).is_err(), "{bad}");
        }
    }
}
