//! キャスト式マッチャー
//!
//! 前処理済みトークン列から「単一リテラルへの明示的キャスト」の形を
//! 探します。対象は C 形式キャスト、キーワードキャスト、関数形式
//! キャスト、およびブレース 1 層で包まれたリテラル初期化です。
//! 余分な括弧は読み飛ばし、オペランドがリテラル以外の式なら候補を
//! 作りません。型はキャスト位置に書かれた綴りのまま扱います。

use serde::{Deserialize, Serialize};

use super::LiteralKind;
use crate::lexer::Token;
use crate::preprocess::PpToken;
use crate::span::Span;

/// マクロ展開の注記（診断の副ラベル用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroExpansionNote {
    pub name: String,
    /// 定義本体側のスパン
    pub span: Span,
}

/// キャストされたリテラル
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralMatch {
    pub kind: LiteralKind,
    /// 接辞を含む逐語的な綴り
    pub text: String,
    pub span: Span,
    pub in_macro: bool,
}

/// マッチした明示的キャスト
#[derive(Debug, Clone, PartialEq)]
pub struct CastMatch {
    /// キャスト位置に書かれた型の綴り
    pub written_type: String,
    pub type_span: Span,
    /// 使用箇所から見たキャスト式全体の範囲
    pub expr_span: Span,
    /// 診断のアンカー位置（マクロ由来なら呼び出し位置）
    pub anchor_span: Span,
    pub type_in_macro: bool,
    pub whole_in_macro: bool,
    pub expansion: Option<MacroExpansionNote>,
}

/// キャストとその中のリテラルの組。診断 1 件に対応する。
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub cast: CastMatch,
    pub literal: LiteralMatch,
}

/// リテラルキャストを探すマッチャー
pub struct Matcher<'a> {
    tokens: &'a [PpToken],
    current: usize,
}

impl<'a> Matcher<'a> {
    /// 改行・エラートークンを除いた列を前提とする
    pub fn new(tokens: &'a [PpToken]) -> Self {
        Self { tokens, current: 0 }
    }

    /// すべての候補を列挙する
    pub fn find_all(&mut self) -> Vec<Candidate> {
        let mut found = Vec::new();
        while self.current < self.tokens.len() {
            if let Some((candidate, end)) = self.match_at(self.current) {
                found.push(candidate);
                self.current = end + 1;
            } else {
                self.current += 1;
            }
        }
        found
    }

    fn match_at(&self, i: usize) -> Option<(Candidate, usize)> {
        let token = &self.tokens.get(i)?.token;
        if matches!(token, Token::LeftParen) {
            return self.match_c_style(i);
        }
        if token.is_keyword_cast() {
            return self.match_keyword_cast(i);
        }
        if matches!(token, Token::Identifier(_)) {
            return self.match_functional(i);
        }
        None
    }

    /// `(type)literal` 形式。`(type)(literal)` や `(type){literal}` も含む。
    fn match_c_style(&self, i: usize) -> Option<(Candidate, usize)> {
        let (written_type, type_span, type_in_macro, j) = self.parse_type_spelling(i + 1, true)?;
        if !self.token_is(j, |t| matches!(t, Token::RightParen)) {
            return None;
        }
        let (literal, last) = self.parse_operand(j + 1, true)?;
        Some((
            self.build_candidate(i, last, written_type, type_span, type_in_macro, literal),
            last,
        ))
    }

    /// `static_cast<type>(literal)` などのキーワードキャスト形式
    fn match_keyword_cast(&self, i: usize) -> Option<(Candidate, usize)> {
        if !self.token_is(i + 1, |t| matches!(t, Token::Less)) {
            return None;
        }
        let (written_type, type_span, type_in_macro, j) = self.parse_type_spelling(i + 2, true)?;
        if !self.token_is(j, |t| matches!(t, Token::Greater)) {
            return None;
        }
        if !self.token_is(j + 1, |t| matches!(t, Token::LeftParen)) {
            return None;
        }
        let (literal, inner_last) = self.parse_operand(j + 2, true)?;
        if !self.token_is(inner_last + 1, |t| matches!(t, Token::RightParen)) {
            return None;
        }
        let last = inner_last + 1;
        Some((
            self.build_candidate(i, last, written_type, type_span, type_in_macro, literal),
            last,
        ))
    }

    /// `T(literal)` と `T{literal}` の関数形式。型名は単一語（`std::` 限定可）
    fn match_functional(&self, i: usize) -> Option<(Candidate, usize)> {
        // メンバアクセスや限定名の途中から始まる形はキャストではない
        if i > 0
            && matches!(
                self.tokens[i - 1].token,
                Token::Dot | Token::Arrow | Token::DoubleColon
            )
        {
            return None;
        }
        let (written_type, type_span, type_in_macro, j) = self.parse_type_spelling(i, false)?;

        match &self.tokens.get(j)?.token {
            Token::LeftParen => {
                let (literal, inner_last) = self.parse_operand(j + 1, true)?;
                if !self.token_is(inner_last + 1, |t| matches!(t, Token::RightParen)) {
                    return None;
                }
                let last = inner_last + 1;
                Some((
                    self.build_candidate(i, last, written_type, type_span, type_in_macro, literal),
                    last,
                ))
            }
            Token::LeftBrace => {
                let (literal, inner_last) = self.parse_operand(j + 1, false)?;
                if !self.token_is(inner_last + 1, |t| matches!(t, Token::RightBrace)) {
                    return None;
                }
                let last = inner_last + 1;
                Some((
                    self.build_candidate(i, last, written_type, type_span, type_in_macro, literal),
                    last,
                ))
            }
            _ => None,
        }
    }

    /// 型の綴りを読み取る。`multi_word` なら空白区切りの複合綴りも許す。
    /// 戻り値は (綴り, スパン, マクロ由来か, 次のインデックス)。
    fn parse_type_spelling(
        &self,
        start: usize,
        multi_word: bool,
    ) -> Option<(String, Span, bool, usize)> {
        let first = self.tokens.get(start)?;
        let Token::Identifier(head) = &first.token else {
            return None;
        };

        let mut spelling = head.clone();
        let mut in_macro = first.in_macro();
        let mut last_site = first.site_span();
        let mut j = start + 1;

        while let Some(t) = self.tokens.get(j) {
            match &t.token {
                Token::DoubleColon => {
                    let Some(next) = self.tokens.get(j + 1) else {
                        return None;
                    };
                    let Token::Identifier(segment) = &next.token else {
                        return None;
                    };
                    spelling.push_str("::");
                    spelling.push_str(segment);
                    in_macro |= t.in_macro() || next.in_macro();
                    last_site = next.site_span();
                    j += 2;
                }
                Token::Identifier(word) if multi_word => {
                    spelling.push(' ');
                    spelling.push_str(word);
                    in_macro |= t.in_macro();
                    last_site = t.site_span();
                    j += 1;
                }
                // ポインタ・参照型は対象外
                Token::Star | Token::Ampersand => return None,
                _ => break,
            }
        }

        Some((spelling, first.site_span().to(last_site), in_macro, j))
    }

    /// 括弧の読み飛ばしとブレース 1 層を許したリテラルオペランド。
    /// 戻り値は (リテラル, 最後に消費したインデックス)。
    fn parse_operand(&self, start: usize, allow_brace: bool) -> Option<(LiteralMatch, usize)> {
        let mut j = start;
        let mut outer_parens = 0;
        while self.token_is(j, |t| matches!(t, Token::LeftParen)) {
            outer_parens += 1;
            j += 1;
        }

        let mut braced = false;
        if allow_brace && self.token_is(j, |t| matches!(t, Token::LeftBrace)) {
            braced = true;
            j += 1;
        }

        let mut inner_parens = 0;
        if braced {
            while self.token_is(j, |t| matches!(t, Token::LeftParen)) {
                inner_parens += 1;
                j += 1;
            }
        }

        let lit = self.tokens.get(j)?;
        let (kind, text) = match &lit.token {
            Token::CharLit(s) => (LiteralKind::Char, s.clone()),
            Token::IntLit(s) => (LiteralKind::Int, s.clone()),
            Token::FloatLit(s) => (LiteralKind::Float, s.clone()),
            _ => return None,
        };
        let literal = LiteralMatch {
            kind,
            text,
            span: lit.span,
            in_macro: lit.in_macro(),
        };

        let mut k = j + 1;
        for _ in 0..inner_parens {
            if !self.token_is(k, |t| matches!(t, Token::RightParen)) {
                return None;
            }
            k += 1;
        }
        if braced {
            if !self.token_is(k, |t| matches!(t, Token::RightBrace)) {
                return None;
            }
            k += 1;
        }
        for _ in 0..outer_parens {
            if !self.token_is(k, |t| matches!(t, Token::RightParen)) {
                return None;
            }
            k += 1;
        }

        Some((literal, k - 1))
    }

    fn build_candidate(
        &self,
        first: usize,
        last: usize,
        written_type: String,
        type_span: Span,
        type_in_macro: bool,
        literal: LiteralMatch,
    ) -> Candidate {
        let first_tok = &self.tokens[first];
        let last_tok = &self.tokens[last];

        // マクロ由来トークンがあれば展開注記を付ける。キャスト全体が
        // 展開由来なら定義本体の範囲全体を指す。
        let expansion = match (first_tok.macro_name(), last_tok.in_macro()) {
            (Some(name), true) => Some(MacroExpansionNote {
                name: name.to_string(),
                span: first_tok.span.to(last_tok.span),
            }),
            _ => self.tokens[first..=last].iter().find_map(|t| {
                t.macro_name().map(|name| MacroExpansionNote {
                    name: name.to_string(),
                    span: t.span,
                })
            }),
        };

        let cast = CastMatch {
            written_type,
            type_span,
            expr_span: first_tok.site_span().to(last_tok.site_span()),
            anchor_span: first_tok.site_span(),
            type_in_macro,
            whole_in_macro: first_tok.in_macro(),
            expansion,
        };

        Candidate { cast, literal }
    }

    fn token_is(&self, idx: usize, pred: impl Fn(&Token) -> bool) -> bool {
        self.tokens.get(idx).map_or(false, |t| pred(&t.token))
    }
}
