//! logos-based tokenizer for rendered declaration values.
//!
//! Used when reading declarations back out of a markup node, e.g.
//! `translate(10px, 20px) rotate(45deg) scale(1, 1)` or `repeat(3, 1fr)`.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `12px` as Dimension beats `12` as Number)
//! 2. For equal length matches, earlier-defined variants win

use logos::Logos;

/// Declaration value token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Function opener: `translate(`, `repeat(`, `rgb(`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*\(")]
    Function,

    /// Hex color: `#fff`, `#ff00aa`, `#ff00aa80`.
    #[regex(r"#[0-9a-fA-F]{3,8}")]
    HexColor,

    /// Number with unit suffix: `10px`, `45deg`, `1fr`, `100%`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?([a-zA-Z]+|%)")]
    Dimension,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Unitless number, possibly negative.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    /// Keyword or bare font name: `auto`, `fit-content`, `sans-serif`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    #[token(",")]
    Comma,

    #[token(")")]
    ParenClose,

    #[token("/")]
    Slash,
}

/// A token with its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueToken<'a> {
    pub token: Token,
    pub text: &'a str,
}

impl ValueToken<'_> {
    /// Function name without the trailing `(`.
    pub fn function_name(&self) -> Option<&str> {
        match self.token {
            Token::Function => self.text.strip_suffix('('),
            _ => None,
        }
    }

    /// Split a dimension into its number and unit.
    pub fn dimension(&self) -> Option<(f64, &str)> {
        if self.token != Token::Dimension {
            return None;
        }
        let split = self
            .text
            .find(|c: char| c.is_ascii_alphabetic() || c == '%')?;
        let (number, unit) = self.text.split_at(split);
        number.parse().ok().map(|n| (n, unit))
    }

    /// Parse a unitless number.
    pub fn number(&self) -> Option<f64> {
        match self.token {
            Token::Number => self.text.parse().ok(),
            _ => None,
        }
    }

    /// String literal contents without quotes.
    pub fn string_value(&self) -> Option<&str> {
        match self.token {
            Token::StringLiteral | Token::StringLiteralSingle => {
                Some(&self.text[1..self.text.len() - 1])
            }
            _ => None,
        }
    }
}

/// Tokenize a declaration value. Returns `None` if any character is not
/// part of a recognized token.
pub fn tokenize(input: &str) -> Option<Vec<ValueToken<'_>>> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let token = result.ok()?;
        tokens.push(ValueToken {
            token,
            text: lexer.slice(),
        });
    }
    Some(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn transform_value() {
        assert_eq!(
            kinds("translate(10px, -20.5px) rotate(45deg) scale(1, 1.5)"),
            vec![
                Token::Function,
                Token::Dimension,
                Token::Comma,
                Token::Dimension,
                Token::ParenClose,
                Token::Function,
                Token::Dimension,
                Token::ParenClose,
                Token::Function,
                Token::Number,
                Token::Comma,
                Token::Number,
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn dimension_split() {
        let tokens = tokenize("-20.5px 100%").unwrap();
        assert_eq!(tokens[0].dimension(), Some((-20.5, "px")));
        assert_eq!(tokens[1].dimension(), Some((100.0, "%")));
    }

    #[test]
    fn keywords_with_hyphens_are_single_idents() {
        let tokens = tokenize("fit-content sans-serif").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "fit-content");
        assert_eq!(tokens[1].token, Token::Ident);
    }

    #[test]
    fn string_literals() {
        let tokens = tokenize("\"Open Sans\", 'Inter', serif").unwrap();
        assert_eq!(tokens[0].string_value(), Some("Open Sans"));
        assert_eq!(tokens[2].string_value(), Some("Inter"));
        assert_eq!(tokens[4].token, Token::Ident);
    }

    #[test]
    fn function_name() {
        let tokens = tokenize("repeat(3, 1fr)").unwrap();
        assert_eq!(tokens[0].function_name(), Some("repeat"));
        assert_eq!(tokens[1].number(), Some(3.0));
    }

    #[test]
    fn unknown_characters_fail() {
        assert!(tokenize("10px ; 20px").is_none());
    }
}
