//! プリプロセッサモジュール
//!
//! このモジュールはオブジェクト形式マクロ（`#define NAME 本体`）の収集と
//! 展開を行い、各トークンに展開起源を付与します。マクロ本体から来た
//! トークンを書き換えるとマクロ定義そのものが壊れるため、チェック側は
//! この起源情報をもとに修正の安全性を判断します。
//!
//! 関数形式マクロは定義として記録されるだけで展開されず、その使用箇所は
//! 通常の識別子として通過します。`#include` や `#if` などその他の
//! ディレクティブ行は解釈せずにトークン列から取り除きます。

use indexmap::IndexMap;

use crate::lexer::{Token, TokenWithSpan};
use crate::span::Span;

/// トークンの展開起源
#[derive(Debug, Clone, PartialEq)]
pub enum TokenOrigin {
    /// ソースに直接書かれたトークン
    Source,
    /// マクロ展開で挿入されたトークン
    Macro {
        /// 本体を提供したマクロ名
        name: String,
        /// 使用箇所（最外のマクロ名識別子）のスパン
        invocation: Span,
    },
}

/// 展開起源付きトークン
#[derive(Debug, Clone, PartialEq)]
pub struct PpToken {
    pub token: Token,
    /// 綴りが物理的に存在する位置（マクロ由来なら `#define` 行の中）
    pub span: Span,
    pub origin: TokenOrigin,
}

impl PpToken {
    pub fn in_macro(&self) -> bool {
        matches!(self.origin, TokenOrigin::Macro { .. })
    }

    /// 使用箇所におけるスパン（マクロ由来なら呼び出し位置）
    pub fn site_span(&self) -> Span {
        match &self.origin {
            TokenOrigin::Source => self.span,
            TokenOrigin::Macro { invocation, .. } => *invocation,
        }
    }

    pub fn macro_name(&self) -> Option<&str> {
        match &self.origin {
            TokenOrigin::Source => None,
            TokenOrigin::Macro { name, .. } => Some(name),
        }
    }
}

/// マクロ定義
#[derive(Debug, Clone)]
pub struct MacroDef {
    /// 本体のトークン列（関数形式の場合は空）
    pub body: Vec<TokenWithSpan>,
    pub function_like: bool,
}

/// オブジェクト形式マクロの展開器
pub struct Preprocessor {
    macros: IndexMap<String, MacroDef>,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self {
            macros: IndexMap::new(),
        }
    }

    /// ディレクティブを処理しつつトークン列を展開する
    pub fn run(&mut self, tokens: Vec<TokenWithSpan>) -> Vec<PpToken> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut at_line_start = true;
        let mut i = 0;

        while i < tokens.len() {
            let t = &tokens[i];
            match &t.token {
                Token::Hash if at_line_start => {
                    // ディレクティブ行は改行ごと消費されるので行頭状態を維持
                    i = self.handle_directive(&tokens, i);
                    continue;
                }
                Token::Newline => {
                    at_line_start = true;
                    out.push(PpToken {
                        token: Token::Newline,
                        span: t.span,
                        origin: TokenOrigin::Source,
                    });
                    i += 1;
                    continue;
                }
                Token::Identifier(name) if self.is_object_macro(name) => {
                    let mut active = Vec::new();
                    self.expand_into(name, t.span, &mut out, &mut active);
                }
                _ => out.push(PpToken {
                    token: t.token.clone(),
                    span: t.span,
                    origin: TokenOrigin::Source,
                }),
            }
            at_line_start = false;
            i += 1;
        }

        out
    }

    /// 収集済みのマクロ定義
    pub fn macros(&self) -> &IndexMap<String, MacroDef> {
        &self.macros
    }

    fn is_object_macro(&self, name: &str) -> bool {
        self.macros.get(name).map_or(false, |def| !def.function_like)
    }

    /// `#` から行末までを処理し、次に読むべきインデックスを返す
    fn handle_directive(&mut self, tokens: &[TokenWithSpan], hash_idx: usize) -> usize {
        let mut end = hash_idx + 1;
        while end < tokens.len() && !matches!(tokens[end].token, Token::Newline) {
            end += 1;
        }
        let line = &tokens[hash_idx + 1..end];

        match line.first().map(|t| &t.token) {
            Some(Token::Identifier(kw)) if kw == "define" => self.record_define(&line[1..]),
            Some(Token::Identifier(kw)) if kw == "undef" => {
                if let Some(TokenWithSpan {
                    token: Token::Identifier(name),
                    ..
                }) = line.get(1)
                {
                    self.macros.shift_remove(name);
                }
            }
            // その他のディレクティブは解釈しない
            _ => {}
        }

        // 行末の改行も含めて消費する
        if end < tokens.len() {
            end + 1
        } else {
            end
        }
    }

    fn record_define(&mut self, rest: &[TokenWithSpan]) {
        let Some(TokenWithSpan {
            token: Token::Identifier(name),
            span: name_span,
        }) = rest.first()
        else {
            log::debug!("ignoring malformed #define");
            return;
        };

        // 名前に開き括弧が密着していれば関数形式
        let function_like = matches!(
            rest.get(1),
            Some(TokenWithSpan {
                token: Token::LeftParen,
                span,
            }) if span.start == name_span.end
        );

        let body = if function_like {
            Vec::new()
        } else {
            rest[1..].to_vec()
        };

        if self.macros.contains_key(name) {
            log::debug!("macro '{}' redefined", name);
        }
        self.macros.insert(
            name.clone(),
            MacroDef {
                body,
                function_like,
            },
        );
    }

    /// マクロ本体を展開して出力に積む。`active` は自己参照の打ち切り用。
    fn expand_into(
        &self,
        name: &str,
        invocation: Span,
        out: &mut Vec<PpToken>,
        active: &mut Vec<String>,
    ) {
        let Some(def) = self.macros.get(name) else {
            return;
        };
        if def.function_like {
            return;
        }

        log::debug!("expanding macro '{}'", name);
        active.push(name.to_string());
        for t in &def.body {
            match &t.token {
                Token::Identifier(inner)
                    if self.is_object_macro(inner) && !active.iter().any(|a| a == inner) =>
                {
                    self.expand_into(inner, invocation, out, active);
                }
                _ => out.push(PpToken {
                    token: t.token.clone(),
                    span: t.span,
                    origin: TokenOrigin::Macro {
                        name: name.to_string(),
                        invocation,
                    },
                }),
            }
        }
        active.pop();
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
