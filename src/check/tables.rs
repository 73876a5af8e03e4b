//! Affix tables mapping a written type spelling to its literal affix.
//!
//! Three disjoint tables cover the three literal kinds: character types map
//! to prefixes, integer and floating types map to suffixes. Lookups are
//! exact-string and case-sensitive on the spelling as written at the cast
//! site; the tables are built once and never mutated afterwards.

use indexmap::IndexMap;

use super::LiteralKind;
use crate::standard::{self, LangStandard};

/// One affix mapping, optionally gated on the active language standard
#[derive(Debug, Clone, Copy)]
pub struct AffixEntry {
    pub affix: &'static str,
    /// Canonical name used in messages; keys are written spellings
    pub display_name: &'static str,
    pub rule_on_std: Option<fn(LangStandard) -> bool>,
}

impl AffixEntry {
    pub fn allowed_on(&self, standard: LangStandard) -> bool {
        self.rule_on_std.map_or(true, |rule| rule(standard))
    }
}

fn entry(affix: &'static str, display_name: &'static str) -> AffixEntry {
    AffixEntry {
        affix,
        display_name,
        rule_on_std: None,
    }
}

fn gated(
    affix: &'static str,
    display_name: &'static str,
    rule: fn(LangStandard) -> bool,
) -> AffixEntry {
    AffixEntry {
        affix,
        display_name,
        rule_on_std: Some(rule),
    }
}

/// The frozen written-spelling → affix tables
pub struct AffixTables {
    char_prefix: IndexMap<&'static str, AffixEntry>,
    int_suffix: IndexMap<&'static str, AffixEntry>,
    float_suffix: IndexMap<&'static str, AffixEntry>,
}

impl AffixTables {
    pub fn new() -> Self {
        let char_prefix = IndexMap::from([
            ("char", entry("", "char")),
            ("char8_t", gated("u8", "char8_t", standard::cpp20_or_later)),
            ("char16_t", gated("u", "char16_t", standard::cpp11_or_later)),
            ("char32_t", gated("U", "char32_t", standard::cpp11_or_later)),
            ("wchar_t", entry("L", "wchar_t")),
        ]);

        let int_suffix = IndexMap::from([
            ("int", entry("", "int")),
            ("unsigned", entry("u", "unsigned int")),
            ("unsigned int", entry("u", "unsigned int")),
            ("long", entry("l", "long")),
            ("unsigned long", entry("ul", "unsigned long")),
            ("long long", entry("ll", "long long")),
            ("unsigned long long", entry("ull", "unsigned long long")),
            ("size_t", gated("uz", "size_t", standard::cpp23_or_later)),
            ("std::size_t", gated("uz", "std::size_t", standard::cpp23_or_later)),
        ]);

        let float_suffix = IndexMap::from([
            ("double", entry("", "double")),
            ("float", entry("f", "float")),
            ("long double", entry("l", "long double")),
            (
                "float16_t",
                gated("f16", "std::float16_t", standard::cpp23_or_later),
            ),
            (
                "std::float16_t",
                gated("f16", "std::float16_t", standard::cpp23_or_later),
            ),
            (
                "float32_t",
                gated("f32", "std::float32_t", standard::cpp23_or_later),
            ),
            (
                "std::float32_t",
                gated("f32", "std::float32_t", standard::cpp23_or_later),
            ),
            (
                "float64_t",
                gated("f64", "std::float64_t", standard::cpp23_or_later),
            ),
            (
                "std::float64_t",
                gated("f64", "std::float64_t", standard::cpp23_or_later),
            ),
            (
                "float128_t",
                gated("f128", "std::float128_t", standard::cpp23_or_later),
            ),
            (
                "std::float128_t",
                gated("f128", "std::float128_t", standard::cpp23_or_later),
            ),
            (
                "bfloat16_t",
                gated("bf16", "std::bfloat16_t", standard::cpp23_or_later),
            ),
            (
                "std::bfloat16_t",
                gated("bf16", "std::bfloat16_t", standard::cpp23_or_later),
            ),
        ]);

        Self {
            char_prefix,
            int_suffix,
            float_suffix,
        }
    }

    /// Exact-string lookup on the written spelling, per literal kind
    pub fn lookup(&self, kind: LiteralKind, written_type: &str) -> Option<&AffixEntry> {
        self.table(kind).get(written_type)
    }

    /// All entries of one table, in insertion order
    pub fn entries(
        &self,
        kind: LiteralKind,
    ) -> impl Iterator<Item = (&'static str, &AffixEntry)> + '_ {
        self.table(kind).iter().map(|(k, v)| (*k, v))
    }

    fn table(&self, kind: LiteralKind) -> &IndexMap<&'static str, AffixEntry> {
        match kind {
            LiteralKind::Char => &self.char_prefix,
            LiteralKind::Int => &self.int_suffix,
            LiteralKind::Float => &self.float_suffix,
        }
    }
}

impl Default for AffixTables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact_and_kind_scoped() {
        let tables = AffixTables::new();
        assert_eq!(tables.lookup(LiteralKind::Int, "unsigned long").unwrap().affix, "ul");
        assert_eq!(tables.lookup(LiteralKind::Float, "float").unwrap().affix, "f");
        assert_eq!(tables.lookup(LiteralKind::Char, "wchar_t").unwrap().affix, "L");
        // A cast to `double` of an integer literal consults the int table only
        assert!(tables.lookup(LiteralKind::Int, "double").is_none());
        // Alternate spelling `long int` is deliberately unlisted
        assert!(tables.lookup(LiteralKind::Int, "long int").is_none());
        assert!(tables.lookup(LiteralKind::Int, "void").is_none());
    }

    #[test]
    fn test_key_domains_are_disjoint() {
        let tables = AffixTables::new();
        for (name, _) in tables.entries(LiteralKind::Char) {
            assert!(tables.lookup(LiteralKind::Int, name).is_none());
            assert!(tables.lookup(LiteralKind::Float, name).is_none());
        }
        for (name, _) in tables.entries(LiteralKind::Int) {
            assert!(tables.lookup(LiteralKind::Float, name).is_none());
        }
    }

    #[test]
    fn test_standard_gating() {
        let tables = AffixTables::new();
        let size_t = tables.lookup(LiteralKind::Int, "size_t").unwrap();
        assert!(size_t.allowed_on(LangStandard::Cpp23));
        assert!(!size_t.allowed_on(LangStandard::Cpp20));

        let qualified = tables.lookup(LiteralKind::Int, "std::size_t").unwrap();
        assert_eq!(qualified.affix, "uz");

        let char8 = tables.lookup(LiteralKind::Char, "char8_t").unwrap();
        assert!(char8.allowed_on(LangStandard::Cpp20));
        assert!(!char8.allowed_on(LangStandard::Cpp17));

        let ungated = tables.lookup(LiteralKind::Int, "int").unwrap();
        assert!(ungated.allowed_on(LangStandard::Cpp03));
    }

    #[test]
    fn test_display_names() {
        let tables = AffixTables::new();
        let unsigned = tables.lookup(LiteralKind::Int, "unsigned").unwrap();
        assert_eq!(unsigned.display_name, "unsigned int");
        let f32t = tables.lookup(LiteralKind::Float, "float32_t").unwrap();
        assert_eq!(f32t.display_name, "std::float32_t");
    }
}
