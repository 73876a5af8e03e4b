//! Lexical analysis module for C/C++ sources.
//!
//! This module tokenizes the analyzed translation unit into a stream of
//! spanned tokens. Only the token shapes the cast checks need are modeled
//! precisely: the three literal kinds keep their verbatim spelling
//! (including any prefix/suffix and the numeric base), string literals are
//! recognized so their contents are never scanned as code, and everything
//! else is identifiers, operators, and punctuation. Newlines are kept as
//! tokens because preprocessor directives are line-terminated.

use logos::Logos;
use std::fmt;

use crate::span::Span;

/// Token types for the analyzed C/C++ source
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"([ \t\f]|\\\r?\n)+")] // Skip whitespace and line continuations (not newlines)
pub enum Token {
    // Keyword casts
    #[token("static_cast")]
    StaticCast,
    #[token("reinterpret_cast")]
    ReinterpretCast,
    #[token("const_cast")]
    ConstCast,
    #[token("dynamic_cast")]
    DynamicCast,

    // Identifiers: type names, macro names, and everything else the checks
    // treat spelling-wise (must come after keywords to avoid conflicts)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_owned(), priority = 1)]
    Identifier(String),

    // Character literals with an optional encoding prefix; verbatim spelling
    #[regex(r"(u8|u|U|L)?'(\\.|[^\\'\n])+'", |lex| lex.slice().to_owned())]
    CharLit(String),

    // String literals; recognized only so their contents stay opaque
    #[regex(r#"(u8|u|U|L)?"(\\.|[^\\"\n])*""#, |lex| lex.slice().to_owned())]
    StringLit(String),

    // Integer literals: decimal, hex, binary, leading-zero octal, optional
    // digit separators, then any run of suffix letters
    #[regex(
        r"(0[xX][0-9a-fA-F]+('[0-9a-fA-F]+)*|0[bB][01]+('[01]+)*|[0-9]+('[0-9]+)*)[uUlLzZ]*",
        |lex| lex.slice().to_owned()
    )]
    IntLit(String),

    // Floating literals: fractional and/or exponent forms with an optional
    // suffix. Hexadecimal floats are not modeled.
    #[regex(
        r"([0-9]+\.[0-9]*([eE][+-]?[0-9]+)?|\.[0-9]+([eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+)(f16|f32|f64|f128|bf16|BF16|[fFlL])?",
        |lex| lex.slice().to_owned()
    )]
    FloatLit(String),

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("%=")]
    PercentAssign,
    #[token("&=")]
    AmpAssign,
    #[token("|=")]
    PipeAssign,
    #[token("^=")]
    CaretAssign,
    #[token("<<=")]
    ShlAssign,
    #[token(">>=")]
    ShrAssign,
    #[token("==")]
    Equal,
    #[token("!=")]
    NotEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&&")]
    And,
    #[token("||")]
    Or,
    #[token("!")]
    Not,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("++")]
    Increment,
    #[token("--")]
    Decrement,
    #[token("?")]
    Question,
    #[token("::")]
    DoubleColon,

    // Delimiters
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("->")]
    Arrow,
    #[token(".")]
    Dot,
    #[token("#")]
    Hash,

    // Special
    #[regex(r"\r?\n")]
    Newline,

    // Comments (skip them)
    #[regex(r"//[^\n]*", logos::skip)]
    #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
    // Error token for unrecognized input
    Error,
}

impl Token {
    /// Any of the four keyword cast forms
    pub fn is_keyword_cast(&self) -> bool {
        matches!(
            self,
            Token::StaticCast | Token::ReinterpretCast | Token::ConstCast | Token::DynamicCast
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(s) => write!(f, "Identifier({})", s),
            Token::CharLit(s) => write!(f, "CharLit({})", s),
            Token::StringLit(s) => write!(f, "StringLit({})", s),
            Token::IntLit(s) => write!(f, "IntLit({})", s),
            Token::FloatLit(s) => write!(f, "FloatLit({})", s),
            _ => write!(f, "{:?}", self),
        }
    }
}

/// A token with its span information
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithSpan {
    pub token: Token,
    pub span: Span,
}

/// Lexer for the analyzed source
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: Token::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = TokenWithSpan;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let span = Span::from(self.inner.span());

        // Handle the Result<Token, ()>
        match result {
            Ok(token) => Some(TokenWithSpan { token, span }),
            Err(_) => Some(TokenWithSpan {
                token: Token::Error,
                span,
            }),
        }
    }
}
