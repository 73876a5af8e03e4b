//! リントセッションの管理モジュール
//!
//! このモジュールは、1 つの翻訳単位に対するリントパイプライン全体を管理し、
//! ハードエラーを蓄積しながら処理を進める機能を提供します。
//! リントの指摘そのものは値として返し、報告のタイミングは呼び出し側が
//! 決めます。

use crate::check::UseBuiltinLiterals;
use crate::diagnostics::{apply_fixes, LintDiagnostic};
use crate::error::{ErrorCollector, LexerError, LintError, LintResult};
use crate::lexer::{Lexer, Token, TokenWithSpan};
use crate::preprocess::Preprocessor;
use crate::standard::LangStandard;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use std::fs;
use std::path::Path;

/// リント状態を管理する構造体
pub struct LintSession {
    pub source_file: String,
    pub source: String,
    pub files: SimpleFiles<String, String>,
    pub file_id: usize,
    pub error_collector: ErrorCollector,
}

impl LintSession {
    /// 新しいセッションを作成
    pub fn new<P: AsRef<Path>>(source_file: P) -> LintResult<Self> {
        let source_file_str = source_file.as_ref().display().to_string();
        let source = fs::read_to_string(source_file.as_ref())
            .map_err(|e| LintError::Io(format!("Failed to read source file: {}", e)))?;
        Ok(Self::from_parts(source_file_str, source))
    }

    /// 文字列からセッションを作成（テスト用）
    pub fn new_from_string(filename: &str, source: String) -> Self {
        Self::from_parts(filename.to_string(), source)
    }

    fn from_parts(source_file: String, source: String) -> Self {
        let mut files = SimpleFiles::new();
        let file_id = files.add(source_file.clone(), source.clone());

        Self {
            source_file,
            source,
            files,
            file_id,
            error_collector: ErrorCollector::new(),
        }
    }

    /// 字句解析。不明なトークンはエラーとして蓄積するが解析は続行する
    pub fn tokenize(&mut self) -> Vec<TokenWithSpan> {
        log::debug!("tokenizing {}", self.source_file);
        let tokens: Vec<_> = Lexer::new(&self.source).collect();

        for t in &tokens {
            if matches!(t.token, Token::Error) {
                self.error_collector.add_error(
                    LintError::Lexer(LexerError::UnrecognizedToken {
                        token: self.source[t.span.range()].to_string(),
                        span: t.span,
                    }),
                    self.file_id,
                );
            }
        }

        tokens
    }

    /// 字句解析 → マクロ展開 → 検査 を実行する
    pub fn lint(&mut self, standard: LangStandard) -> Vec<LintDiagnostic> {
        let tokens = self.tokenize();
        log::debug!("preprocessing {} tokens", tokens.len());
        let expanded = Preprocessor::new().run(tokens);

        let check = UseBuiltinLiterals::new(standard);
        check.run(&expanded)
    }

    /// リント結果を端末に報告
    pub fn report_findings(&self, findings: &[LintDiagnostic]) -> LintResult<()> {
        let writer = StandardStream::stderr(ColorChoice::Always);
        let config = codespan_reporting::term::Config::default();

        for finding in findings {
            let diagnostic = finding.to_diagnostic(self.file_id);
            codespan_reporting::term::emit(&mut writer.lock(), &config, &self.files, &diagnostic)
                .map_err(|e| LintError::Io(format!("Failed to emit diagnostic: {}", e)))?;
        }

        Ok(())
    }

    /// 蓄積されたハードエラーを報告
    pub fn report_errors(&self) -> LintResult<()> {
        let writer = StandardStream::stderr(ColorChoice::Always);
        let config = codespan_reporting::term::Config::default();

        for error in self.error_collector.errors() {
            let diagnostic = error.to_diagnostic();
            codespan_reporting::term::emit(&mut writer.lock(), &config, &self.files, &diagnostic)
                .map_err(|e| LintError::Io(format!("Failed to emit diagnostic: {}", e)))?;
        }

        Ok(())
    }

    /// 置換を適用したソースを返す
    pub fn fixed_source(&self, findings: &[LintDiagnostic]) -> String {
        apply_fixes(&self.source, findings)
    }

    /// エラーがあるかチェック
    pub fn has_errors(&self) -> bool {
        self.error_collector.has_errors()
    }

    /// エラー数を取得
    pub fn error_count(&self) -> usize {
        self.error_collector.error_count()
    }
}
