//! リテラルキャスト検査モジュール
//!
//! 明示的キャストの中に書かれた単一リテラルを見つけ、キャスト対象型の
//! 接辞を使った組み込みリテラルへの書き換えを提案します。処理の流れ：
//! マッチャー → 接辞表・ストリッパー → 判断エンジン → 診断生成。

mod engine;
mod matcher;
mod stripper;
mod tables;

pub use engine::{decide, RewriteDecision};
pub use matcher::{Candidate, CastMatch, LiteralMatch, MacroExpansionNote, Matcher};
pub use stripper::AffixStripper;
pub use tables::{AffixEntry, AffixTables};

use serde::{Deserialize, Serialize};

use crate::diagnostics::LintDiagnostic;
use crate::lexer::Token;
use crate::preprocess::PpToken;
use crate::standard::LangStandard;

/// リテラルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiteralKind {
    Char,
    Int,
    Float,
}

/// 「キャストの代わりに組み込みリテラルを使う」チェック
pub struct UseBuiltinLiterals {
    tables: AffixTables,
    stripper: AffixStripper,
    standard: LangStandard,
}

impl UseBuiltinLiterals {
    pub fn new(standard: LangStandard) -> Self {
        Self {
            tables: AffixTables::new(),
            stripper: AffixStripper::new(),
            standard,
        }
    }

    pub fn standard(&self) -> LangStandard {
        self.standard
    }

    /// 前処理済みトークン列を検査して診断を返す
    pub fn run(&self, tokens: &[PpToken]) -> Vec<LintDiagnostic> {
        // 改行と不明トークンは構文形状に関与しない
        let significant: Vec<PpToken> = tokens
            .iter()
            .filter(|t| !matches!(t.token, Token::Newline | Token::Error))
            .cloned()
            .collect();

        let candidates = Matcher::new(&significant).find_all();
        log::debug!("{} literal cast candidate(s)", candidates.len());

        candidates
            .iter()
            .filter_map(|c| {
                decide(c, &self.tables, &self.stripper, self.standard)
                    .map(|d| LintDiagnostic::from_decision(c, &d))
            })
            .collect()
    }
}
