//! Language standard selection for the analyzed sources.
//!
//! Affix entries can be gated on the active standard (e.g. the `uz` suffix
//! family only exists from C++23 on), so the standard is threaded from the
//! command line into every check.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The C++ language revision the analyzed translation unit is compiled as
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Serialize, Deserialize,
)]
pub enum LangStandard {
    #[value(name = "c++03")]
    Cpp03,
    #[value(name = "c++11")]
    Cpp11,
    #[value(name = "c++14")]
    Cpp14,
    #[value(name = "c++17")]
    Cpp17,
    #[value(name = "c++20")]
    Cpp20,
    #[value(name = "c++23")]
    Cpp23,
    #[value(name = "c++26")]
    Cpp26,
}

impl LangStandard {
    pub fn is_at_least(self, other: LangStandard) -> bool {
        self >= other
    }

    pub fn is_cpp11_or_later(self) -> bool {
        self >= LangStandard::Cpp11
    }

    pub fn is_cpp20_or_later(self) -> bool {
        self >= LangStandard::Cpp20
    }

    pub fn is_cpp23_or_later(self) -> bool {
        self >= LangStandard::Cpp23
    }
}

impl fmt::Display for LangStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LangStandard::Cpp03 => "c++03",
            LangStandard::Cpp11 => "c++11",
            LangStandard::Cpp14 => "c++14",
            LangStandard::Cpp17 => "c++17",
            LangStandard::Cpp20 => "c++20",
            LangStandard::Cpp23 => "c++23",
            LangStandard::Cpp26 => "c++26",
        };
        write!(f, "{}", name)
    }
}

// Plain function values stored in affix entries for standard gating.

pub fn cpp11_or_later(standard: LangStandard) -> bool {
    standard.is_cpp11_or_later()
}

pub fn cpp20_or_later(standard: LangStandard) -> bool {
    standard.is_cpp20_or_later()
}

pub fn cpp23_or_later(standard: LangStandard) -> bool {
    standard.is_cpp23_or_later()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_ordering() {
        assert!(LangStandard::Cpp23.is_at_least(LangStandard::Cpp11));
        assert!(!LangStandard::Cpp14.is_at_least(LangStandard::Cpp17));
        assert!(LangStandard::Cpp26.is_cpp23_or_later());
        assert!(!LangStandard::Cpp20.is_cpp23_or_later());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(LangStandard::Cpp03.to_string(), "c++03");
        assert_eq!(LangStandard::Cpp23.to_string(), "c++23");
    }
}
