//! Affix stripping for literal source text.
//!
//! Removes a recognized prefix (character literals) or suffix (numeric
//! literals) from a literal's verbatim spelling. Digits, the numeric base
//! prefix, the radix point, and any exponent are never touched; a literal
//! with no affix strips to itself unchanged.

use regex::Regex;

use super::LiteralKind;

pub struct AffixStripper {
    char_prefix: Regex,
    int_suffix: Regex,
    float_suffix: Regex,
}

impl AffixStripper {
    pub fn new() -> Self {
        // The patterns are fixed; compilation cannot fail.
        Self {
            char_prefix: Regex::new("^(u8|u|U|L)?").expect("valid char prefix pattern"),
            int_suffix: Regex::new(
                "(([uU]?[lL]{0,2})|([lL]{0,2}[uU]?)|([uU]?[zZ]?)|([zZ]?[uU]?))?$",
            )
            .expect("valid int suffix pattern"),
            float_suffix: Regex::new(
                "([fF]|[lL]|([fF]16)|([fF]32)|([fF]64)|([fF]128)|((bf|BF)16))?$",
            )
            .expect("valid float suffix pattern"),
        }
    }

    /// Remove any recognized affix from the literal's verbatim spelling
    pub fn strip(&self, kind: LiteralKind, raw: &str) -> String {
        let pattern = match kind {
            LiteralKind::Char => &self.char_prefix,
            LiteralKind::Int => &self.int_suffix,
            LiteralKind::Float => &self.float_suffix,
        };
        pattern.replace(raw, "").into_owned()
    }
}

impl Default for AffixStripper {
    fn default() -> Self {
        Self::new()
    }
}
