//! 診断の生成と修正適用モジュール
//!
//! 判断エンジンの出力を人間可読なメッセージと任意のソース置換に変換する
//! 薄い層です。判断ロジックは持ちません。メッセージは 2 種類：
//! 置換可能（または置換なし）の警告と、キャスト全体がマクロ由来の場合の
//! 接辞・型名を示す推奨です。

use codespan_reporting::diagnostic::{Diagnostic, Label};
use serde::{Deserialize, Serialize};

use crate::check::{Candidate, MacroExpansionNote, RewriteDecision};
use crate::span::Span;

/// ソース置換
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    /// 置き換える範囲（キャスト式全体）
    pub span: Span,
    pub replacement: String,
}

/// 1 件のリント結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintDiagnostic {
    pub message: String,
    pub anchor: Span,
    pub fix: Option<Fix>,
    pub expansion: Option<MacroExpansionNote>,
}

impl LintDiagnostic {
    /// 判断結果から診断を組み立てる
    pub fn from_decision(candidate: &Candidate, decision: &RewriteDecision) -> Self {
        let cast = &candidate.cast;

        if let Some(replacement) = &decision.replacement {
            Self {
                message: "use builtin literals instead of casts".to_string(),
                anchor: cast.anchor_span,
                fix: Some(Fix {
                    span: cast.expr_span,
                    replacement: replacement.clone(),
                }),
                expansion: cast.expansion.clone(),
            }
        } else if cast.whole_in_macro {
            let affix = decision.recommended_affix.as_deref().unwrap_or_default();
            Self {
                message: format!(
                    "use builtin '{}' instead of cast to '{}'",
                    affix, decision.type_display
                ),
                anchor: cast.anchor_span,
                fix: None,
                expansion: cast.expansion.clone(),
            }
        } else {
            // リテラルまたは型の綴りだけがマクロ由来：置換なしの警告
            Self {
                message: "use builtin literals instead of casts".to_string(),
                anchor: cast.anchor_span,
                fix: None,
                expansion: cast.expansion.clone(),
            }
        }
    }

    /// codespan-reporting の診断に変換
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        let mut labels = vec![Label::primary(file_id, self.anchor.range())];
        if let Some(expansion) = &self.expansion {
            labels.push(
                Label::secondary(file_id, expansion.span.range())
                    .with_message(format!("in expansion of macro '{}'", expansion.name)),
            );
        }

        let mut diagnostic = Diagnostic::warning()
            .with_message(self.message.clone())
            .with_labels(labels);
        if let Some(fix) = &self.fix {
            diagnostic =
                diagnostic.with_notes(vec![format!("suggested fix: `{}`", fix.replacement)]);
        }
        diagnostic
    }
}

/// 置換をまとめて適用した新しいソースを返す
pub fn apply_fixes(source: &str, diagnostics: &[LintDiagnostic]) -> String {
    let mut fixes: Vec<&Fix> = diagnostics.iter().filter_map(|d| d.fix.as_ref()).collect();
    fixes.sort_by_key(|f| f.span.start);

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for fix in fixes {
        // 範囲が重なる置換は先のものを優先する
        if fix.span.start < cursor || fix.span.end > source.len() {
            continue;
        }
        out.push_str(&source[cursor..fix.span.start]);
        out.push_str(&fix.replacement);
        cursor = fix.span.end;
    }
    out.push_str(&source[cursor..]);
    out
}
