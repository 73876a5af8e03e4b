//! 書き換え判断エンジン
//!
//! マッチしたキャストとリテラルから、置換テキストと推奨接辞を決めます。
//! 表に無い型や、言語規格の条件を満たさない接辞は黙ってスキップします。
//! マクロ由来の綴りを書き換えると呼び出し側ではなく定義が壊れるため、
//! リテラルか型の綴りがマクロ展開由来の場合はテキスト置換を抑止します。

use super::matcher::Candidate;
use super::stripper::AffixStripper;
use super::tables::AffixTables;
use super::LiteralKind;
use crate::standard::LangStandard;

/// 書き換え判断の結果
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteDecision {
    /// キャスト式全体を置き換える安全なテキスト
    pub replacement: Option<String>,
    /// 決定済みの接辞（置換が安全でない場合の推奨用）
    pub recommended_affix: Option<String>,
    /// 推奨メッセージで使う型の正準名
    pub type_display: String,
}

/// 候補 1 件を判断する。診断を出さない場合は `None`。
pub fn decide(
    candidate: &Candidate,
    tables: &AffixTables,
    stripper: &AffixStripper,
    standard: LangStandard,
) -> Option<RewriteDecision> {
    let entry = tables.lookup(candidate.literal.kind, &candidate.cast.written_type)?;
    if !entry.allowed_on(standard) {
        return None;
    }

    let bare = stripper.strip(candidate.literal.kind, &candidate.literal.text);
    let composed = match candidate.literal.kind {
        LiteralKind::Char => format!("{}{}", entry.affix, bare),
        LiteralKind::Int | LiteralKind::Float => format!("{}{}", bare, entry.affix),
    };

    let unsafe_rewrite = candidate.literal.in_macro || candidate.cast.type_in_macro;
    let replacement = if unsafe_rewrite { None } else { Some(composed) };

    Some(RewriteDecision {
        replacement,
        recommended_affix: Some(entry.affix.to_string()),
        type_display: entry.display_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::matcher::{CastMatch, LiteralMatch};
    use crate::span::Span;

    fn candidate(written_type: &str, kind: LiteralKind, text: &str) -> Candidate {
        Candidate {
            cast: CastMatch {
                written_type: written_type.to_string(),
                type_span: Span::dummy(),
                expr_span: Span::dummy(),
                anchor_span: Span::dummy(),
                type_in_macro: false,
                whole_in_macro: false,
                expansion: None,
            },
            literal: LiteralMatch {
                kind,
                text: text.to_string(),
                span: Span::dummy(),
                in_macro: false,
            },
        }
    }

    #[test]
    fn test_direct_fix_composition() {
        let tables = AffixTables::new();
        let stripper = AffixStripper::new();

        let c = candidate("unsigned int", LiteralKind::Int, "0x1ul");
        let d = decide(&c, &tables, &stripper, LangStandard::Cpp23).unwrap();
        assert_eq!(d.replacement.as_deref(), Some("0x1u"));

        let c = candidate("wchar_t", LiteralKind::Char, "u8'a'");
        let d = decide(&c, &tables, &stripper, LangStandard::Cpp23).unwrap();
        assert_eq!(d.replacement.as_deref(), Some("L'a'"));
    }

    #[test]
    fn test_empty_affix_still_removes_cast() {
        let tables = AffixTables::new();
        let stripper = AffixStripper::new();
        let c = candidate("int", LiteralKind::Int, "1");
        let d = decide(&c, &tables, &stripper, LangStandard::Cpp23).unwrap();
        assert_eq!(d.replacement.as_deref(), Some("1"));
    }

    #[test]
    fn test_unknown_type_is_silent() {
        let tables = AffixTables::new();
        let stripper = AffixStripper::new();
        let c = candidate("MyInt", LiteralKind::Int, "1");
        assert!(decide(&c, &tables, &stripper, LangStandard::Cpp23).is_none());
        // 種類違いの表は引かない
        let c = candidate("double", LiteralKind::Int, "0x8badf00d");
        assert!(decide(&c, &tables, &stripper, LangStandard::Cpp23).is_none());
    }

    #[test]
    fn test_standard_gate_rejects() {
        let tables = AffixTables::new();
        let stripper = AffixStripper::new();
        let c = candidate("size_t", LiteralKind::Int, "6zu");
        assert!(decide(&c, &tables, &stripper, LangStandard::Cpp20).is_none());
        let d = decide(&c, &tables, &stripper, LangStandard::Cpp23).unwrap();
        assert_eq!(d.replacement.as_deref(), Some("6uz"));
    }

    #[test]
    fn test_macro_origin_suppresses_replacement() {
        let tables = AffixTables::new();
        let stripper = AffixStripper::new();

        let mut c = candidate("unsigned", LiteralKind::Int, "27");
        c.literal.in_macro = true;
        let d = decide(&c, &tables, &stripper, LangStandard::Cpp23).unwrap();
        assert_eq!(d.replacement, None);
        assert_eq!(d.recommended_affix.as_deref(), Some("u"));
        assert_eq!(d.type_display, "unsigned int");

        let mut c = candidate("unsigned", LiteralKind::Int, "27");
        c.cast.type_in_macro = true;
        let d = decide(&c, &tables, &stripper, LangStandard::Cpp23).unwrap();
        assert_eq!(d.replacement, None);
    }
}
