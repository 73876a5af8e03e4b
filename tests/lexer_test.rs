//! レキサーテスト
//!
//! castlint のレキサー（字句解析器）の包括的なテストスイート。
//! 正常系、異常系、エッジケースを網羅する。

#[cfg(test)]
mod tests {
    use castlint::lexer::{Lexer, Token, TokenWithSpan};

    /// トークンの型のみを比較するヘルパー関数
    fn extract_tokens(source: &str) -> Vec<Token> {
        let lexer = Lexer::new(source);
        lexer.map(|token_with_span| token_with_span.token).collect()
    }

    /// スパン付きトークンを取得するヘルパー関数
    fn extract_tokens_with_span(source: &str) -> Vec<TokenWithSpan> {
        let lexer = Lexer::new(source);
        lexer.collect()
    }

    #[test]
    fn test_cast_keywords() {
        // キーワードキャストの正しい認識をテスト
        let source = "static_cast reinterpret_cast const_cast dynamic_cast";
        let tokens = extract_tokens(source);

        let expected = vec![
            Token::StaticCast,
            Token::ReinterpretCast,
            Token::ConstCast,
            Token::DynamicCast,
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_type_names_are_identifiers() {
        // 型名はすべて識別子として綴りのまま扱う
        let source = "unsigned long long int size_t std wchar_t";
        let tokens = extract_tokens(source);

        let expected = vec![
            Token::Identifier("unsigned".to_string()),
            Token::Identifier("long".to_string()),
            Token::Identifier("long".to_string()),
            Token::Identifier("int".to_string()),
            Token::Identifier("size_t".to_string()),
            Token::Identifier("std".to_string()),
            Token::Identifier("wchar_t".to_string()),
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_operators() {
        // 演算子の正しい認識をテスト
        let source = "+ - * / % == != < <= > >= && || ! & | ^ ~ << >> -> ++ -- ? ::";
        let tokens = extract_tokens(source);

        let expected = vec![
            Token::Plus,
            Token::Minus,
            Token::Star,
            Token::Slash,
            Token::Percent,
            Token::Equal,
            Token::NotEqual,
            Token::Less,
            Token::LessEqual,
            Token::Greater,
            Token::GreaterEqual,
            Token::And,
            Token::Or,
            Token::Not,
            Token::Ampersand,
            Token::Pipe,
            Token::Caret,
            Token::Tilde,
            Token::Shl,
            Token::Shr,
            Token::Arrow,
            Token::Increment,
            Token::Decrement,
            Token::Question,
            Token::DoubleColon,
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_delimiters() {
        let source = "( ) { } [ ] , ; : . #";
        let tokens = extract_tokens(source);

        let expected = vec![
            Token::LeftParen,
            Token::RightParen,
            Token::LeftBrace,
            Token::RightBrace,
            Token::LeftBracket,
            Token::RightBracket,
            Token::Comma,
            Token::Semicolon,
            Token::Colon,
            Token::Dot,
            Token::Hash,
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_char_literal_prefixes() {
        // 文字リテラルは接頭辞ごと逐語的に保持される
        let source = r"'a' u8'a' u'a' U'a' L'a'";
        let tokens = extract_tokens(source);

        let expected = vec![
            Token::CharLit("'a'".to_string()),
            Token::CharLit("u8'a'".to_string()),
            Token::CharLit("u'a'".to_string()),
            Token::CharLit("U'a'".to_string()),
            Token::CharLit("L'a'".to_string()),
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_integer_literal_bases_and_suffixes() {
        // 整数リテラルは基数と接尾辞を保持する
        let source = "0x8badf00d 0b101 0777 1 0x1ul 2l 0x2lu 3ll 0x3llu 6zu";
        let tokens = extract_tokens(source);

        let expected: Vec<Token> = [
            "0x8badf00d",
            "0b101",
            "0777",
            "1",
            "0x1ul",
            "2l",
            "0x2lu",
            "3ll",
            "0x3llu",
            "6zu",
        ]
        .iter()
        .map(|s| Token::IntLit(s.to_string()))
        .collect();

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_float_literal_forms() {
        // 小数点・指数・固定幅接尾辞の組み合わせ
        let source = "1.f 2. .5 3e0f 1.5e-3l 2.5bf16 1.0f32 4.0f128";
        let tokens = extract_tokens(source);

        let expected: Vec<Token> = ["1.f", "2.", ".5", "3e0f", "1.5e-3l", "2.5bf16", "1.0f32", "4.0f128"]
            .iter()
            .map(|s| Token::FloatLit(s.to_string()))
            .collect();

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_digit_separators() {
        let tokens = extract_tokens("1'000'000ul");
        assert_eq!(tokens, vec![Token::IntLit("1'000'000ul".to_string())]);
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = "(int)1; // cast here\n/* (float)2. */ x";
        let tokens = extract_tokens(source);

        assert_eq!(
            tokens,
            vec![
                Token::LeftParen,
                Token::Identifier("int".to_string()),
                Token::RightParen,
                Token::IntLit("1".to_string()),
                Token::Semicolon,
                Token::Newline,
                Token::Identifier("x".to_string()),
            ]
        );
    }

    #[test]
    fn test_string_literals_are_opaque() {
        // 文字列の中のキャスト風テキストはコードとして読まれない
        let source = r#"const char *s = "(int)1";"#;
        let tokens = extract_tokens(source);

        assert!(tokens.contains(&Token::StringLit("\"(int)1\"".to_string())));
        assert!(!tokens.contains(&Token::IntLit("1".to_string())));
    }

    #[test]
    fn test_span_positions() {
        let source = "(int)1";
        let tokens = extract_tokens_with_span(source);

        assert_eq!(&source[tokens[0].span.range()], "(");
        assert_eq!(&source[tokens[1].span.range()], "int");
        assert_eq!(&source[tokens[3].span.range()], "1");
    }

    #[test]
    fn test_complete_example() {
        let source = r#"#include <stddef.h>

#define MAGIC ((unsigned)27)

int main() {
    size_t n = (size_t)6zu;
    double d = static_cast<double>(1.f);
    wchar_t w = (wchar_t)u8'a';
    return MAGIC;
}"#;

        let tokens = extract_tokens(source);

        // エラートークンなしで解析できることを確認
        assert!(tokens.iter().all(|t| !matches!(t, Token::Error)));

        // 主要なトークンを確認
        assert!(tokens.contains(&Token::Hash));
        assert!(tokens.contains(&Token::StaticCast));
        assert!(tokens.contains(&Token::IntLit("6zu".to_string())));
        assert!(tokens.contains(&Token::FloatLit("1.f".to_string())));
        assert!(tokens.contains(&Token::CharLit("u8'a'".to_string())));
        assert!(tokens.contains(&Token::Identifier("MAGIC".to_string())));
    }
}
