//! 統一的なエラーハンドリングモジュール
//!
//! このモジュールは、castlint 全体で使用される統一的なエラー型と
//! エラー報告システムを提供します。リントの指摘（警告）はエラーではなく、
//! `diagnostics` モジュールを通って報告されます。ここで扱うのは解析を
//! 妨げるハードエラーだけです。

use crate::span::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

/// castlint の統一エラー型
#[derive(Error, Debug, Clone)]
pub enum LintError {
    /// レキサーエラー
    #[error("字句解析エラー")]
    Lexer(#[from] LexerError),

    /// ファイルI/Oエラー
    #[error("ファイル操作エラー: {0}")]
    Io(String),

    /// その他のエラー
    #[error("{0}")]
    Other(String),
}

/// レキサーエラーの詳細
#[derive(Error, Debug, Clone)]
pub enum LexerError {
    #[error("認識できないトークン: '{token}'")]
    UnrecognizedToken { token: String, span: Span },
}

/// エラー情報とソースコードの位置情報を含むエラー
#[derive(Debug, Clone)]
pub struct DiagnosticError {
    pub error: LintError,
    pub file_id: usize,
}

impl DiagnosticError {
    pub fn new(error: LintError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let (message, labels) = match &self.error {
            LintError::Lexer(LexerError::UnrecognizedToken { token, span }) => (
                format!("認識できないトークン: '{}'", token),
                vec![Label::primary(self.file_id, span.range())
                    .with_message("ここに不正なトークンがあります")],
            ),
            LintError::Io(message) => (format!("ファイル操作エラー: {}", message), vec![]),
            LintError::Other(message) => (message.clone(), vec![]),
        };

        Diagnostic::error().with_message(message).with_labels(labels)
    }
}

/// 複数のエラーを蓄積するためのコレクター
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<DiagnosticError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// エラーを追加
    pub fn add_error(&mut self, error: LintError, file_id: usize) {
        self.errors.push(DiagnosticError::new(error, file_id));
    }

    /// エラーがあるかどうか
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// エラーの数
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// すべてのエラーを取得
    pub fn errors(&self) -> &[DiagnosticError] {
        &self.errors
    }

    /// エラーをクリア
    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

/// Result型のエイリアス
pub type LintResult<T> = Result<T, LintError>;

impl From<std::io::Error> for LintError {
    fn from(e: std::io::Error) -> Self {
        LintError::Io(e.to_string())
    }
}
