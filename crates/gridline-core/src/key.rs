//! Natural keys and their memcomparable encoding.
//!
//! A [`NaturalKey`] is the ordered list of field values that identifies an
//! entity independently of any store-assigned id. Stores address documents
//! by [`NaturalKey::encode`], which preserves component order when compared
//! lexicographically, so ordered backends (redb, `BTreeMap`) iterate a
//! collection in key order.
//!
//! Encoding rules, per component:
//! - **Int**: `0x02` + big-endian `i64` with the sign bit flipped
//! - **Text**: `0x05` + escaped bytes + `0x00 0x00` terminator

use std::fmt;

const TAG_SIGNED: u8 = 0x02;
const TAG_UTF8: u8 = 0x05;

/// One component of a natural key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyValue {
    /// Integer component (season, week).
    Int(i64),
    /// Text component (player or game identifier, season type).
    Text(String),
}

impl KeyValue {
    fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Self::Int(v) => {
                out.push(TAG_SIGNED);
                let mut be = v.to_be_bytes();
                // Flip sign bit so negative values sort before positive
                be[0] ^= 0x80;
                out.extend_from_slice(&be);
            }
            Self::Text(s) => {
                out.push(TAG_UTF8);
                for &b in s.as_bytes() {
                    if b == 0x00 {
                        out.push(0x00);
                        out.push(0xFF);
                    } else {
                        out.push(b);
                    }
                }
                out.push(0x00);
                out.push(0x00);
            }
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for KeyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for KeyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Ordered `(field, value)` components identifying one entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NaturalKey {
    components: Vec<(&'static str, KeyValue)>,
}

impl NaturalKey {
    /// Creates a key from its components, in key-field order.
    #[must_use]
    pub fn new(components: Vec<(&'static str, KeyValue)>) -> Self {
        Self { components }
    }

    /// Returns the key components.
    #[must_use]
    pub fn components(&self) -> &[(&'static str, KeyValue)] {
        &self.components
    }

    /// Encodes the key values into a memcomparable byte sequence.
    ///
    /// Field names are not part of the encoding; two keys of the same
    /// entity kind compare exactly as their value tuples do.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.components.len() * 12);
        for (_, value) in &self.components {
            value.encode_into(&mut out);
        }
        out
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, value)) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekly(player: &str, season: i64, week: i64) -> NaturalKey {
        NaturalKey::new(vec![
            ("player_id", player.into()),
            ("season", season.into()),
            ("week", week.into()),
        ])
    }

    #[test]
    fn test_display() {
        assert_eq!(
            weekly("P1", 2023, 3).to_string(),
            "player_id=P1, season=2023, week=3"
        );
    }

    #[test]
    fn test_integer_order_preserved() {
        let a = weekly("P1", 2023, 2).encode();
        let b = weekly("P1", 2023, 10).encode();
        let c = weekly("P1", 2024, 1).encode();
        assert!(a < b);
        assert!(b < c);

        let neg = NaturalKey::new(vec![("n", KeyValue::Int(-5))]).encode();
        let pos = NaturalKey::new(vec![("n", KeyValue::Int(5))]).encode();
        assert!(neg < pos);
    }

    #[test]
    fn test_text_prefix_does_not_collide() {
        // "P1" + week 23 must not equal "P12" + week 3
        let a = NaturalKey::new(vec![("id", "P1".into()), ("n", KeyValue::Int(23))]).encode();
        let b = NaturalKey::new(vec![("id", "P12".into()), ("n", KeyValue::Int(3))]).encode();
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn test_embedded_nul_escaped() {
        let a = NaturalKey::new(vec![("id", "a\0b".into())]).encode();
        assert_eq!(a, vec![TAG_UTF8, b'a', 0x00, 0xFF, b'b', 0x00, 0x00]);
    }

    #[test]
    fn test_equal_keys_encode_equal() {
        assert_eq!(weekly("00-0033873", 2023, 3).encode(), weekly("00-0033873", 2023, 3).encode());
    }
}
