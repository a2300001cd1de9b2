//! SQL tokenizing using datafusion-sqlparser-rs
//!
//! Only the tokenizer is used; statements are never parsed into an AST.

use sqlparser::dialect::{Dialect, GenericDialect};
use sqlparser::tokenizer::{Token, Tokenizer};

/// SQL tokenizer over the generic dialect
pub struct SqlTokenizer {
    dialect: Box<dyn Dialect>,
}

impl SqlTokenizer {
    /// Create a new tokenizer with the generic dialect
    pub fn new() -> Self {
        Self {
            dialect: Box::new(GenericDialect {}),
        }
    }

    /// Tokenize the whole input, whitespace and comments included
    ///
    /// Tokenizer failures (unterminated strings, stray quotes) are logged and
    /// yield no tokens.
    pub fn tokenize(&self, sql: &str) -> Vec<Token> {
        match Tokenizer::new(&*self.dialect, sql).tokenize() {
            Ok(tokens) => tokens
                .into_iter()
                .filter(|token| *token != Token::EOF)
                .collect(),
            Err(e) => {
                tracing::warn!("Failed to tokenize SQL: {}", e);
                Vec::new()
            }
        }
    }

    /// Tokens of the first statement, up to the first top-level `;`
    pub fn tokenize_first_statement(&self, sql: &str) -> Vec<Token> {
        let mut tokens = self.tokenize(sql);
        let mut depth = 0usize;

        let end = tokens.iter().position(|token| {
            match token {
                Token::LParen => depth += 1,
                Token::RParen => depth = depth.saturating_sub(1),
                Token::SemiColon if depth == 0 => return true,
                _ => {}
            }
            false
        });

        if let Some(end) = end {
            tokens.truncate(end);
        }

        tokens
    }
}

impl Default for SqlTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render tokens back to SQL text
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_simple_select() {
        let tokens = SqlTokenizer::new().tokenize("SELECT id, name FROM users");
        assert!(tokens.contains(&Token::Comma));
        assert_eq!(render(&tokens), "SELECT id, name FROM users");
    }

    #[test]
    fn first_statement_only() {
        let tokens = SqlTokenizer::new()
            .tokenize_first_statement("SELECT a FROM t; SELECT b FROM u");
        assert_eq!(render(&tokens), "SELECT a FROM t");
    }

    #[test]
    fn semicolon_inside_string_does_not_split() {
        let tokens = SqlTokenizer::new().tokenize_first_statement("SELECT f(';') FROM t");
        assert_eq!(render(&tokens), "SELECT f(';') FROM t");
    }

    #[test]
    fn unterminated_string_yields_nothing() {
        let tokens = SqlTokenizer::new().tokenize("SELECT 'oops FROM t");
        assert!(tokens.is_empty());
    }

    #[test]
    fn comments_survive_rendering() {
        let sql = "SELECT a -- note\nFROM t";
        assert_eq!(render(&SqlTokenizer::new().tokenize(sql)), sql);
    }
}
