//! BSON regular expression values (pattern + options string).

use super::error::InvalidArgument;

/// Valid option characters, in the canonical sorted order the wire format
/// expects.
const VALID_OPTIONS: &[u8] = b"ilmsux";

/// A regular expression value.
///
/// The pattern is carried opaquely; options are validated at construction
/// (only `i l m s u x`, no duplicates) and stored sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Regex {
    pattern: String,
    options: String,
}

impl Regex {
    /// Creates a regex value, validating and canonicalizing the options
    /// string.
    pub fn new(
        pattern: impl Into<String>,
        options: impl Into<String>,
    ) -> Result<Regex, InvalidArgument> {
        let options = options.into();
        let mut seen = [false; 6];
        for byte in options.bytes() {
            match VALID_OPTIONS.iter().position(|&v| v == byte) {
                Some(i) if !seen[i] => seen[i] = true,
                _ => return Err(InvalidArgument::RegexOptions(options)),
            }
        }
        let sorted: String = VALID_OPTIONS
            .iter()
            .enumerate()
            .filter(|(i, _)| seen[*i])
            .map(|(_, &b)| b as char)
            .collect();
        Ok(Regex {
            pattern: pattern.into(),
            options: sorted,
        })
    }

    /// Used by the decoder, which trusts wire bytes it already validated.
    pub(crate) fn from_parts(pattern: String, options: String) -> Regex {
        Regex { pattern, options }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Options, sorted.
    pub fn options(&self) -> &str {
        &self.options
    }
}
