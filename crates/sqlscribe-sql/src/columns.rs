//! SELECT-list walk
//!
//! Finds the column section that follows the first SELECT keyword and turns
//! each comma-separated item into column lineage. Items are kept as raw
//! token runs so the original expression text can be rendered back.

use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Token, Word};
use sqlscribe_core::{ColumnInfo, TableInfo};

use crate::parser::{render, SqlTokenizer};

/// Keywords that end the SELECT list at its own nesting level
const CLAUSE_KEYWORDS: &[Keyword] = &[
    Keyword::FROM,
    Keyword::WHERE,
    Keyword::GROUP,
    Keyword::HAVING,
    Keyword::ORDER,
    Keyword::LIMIT,
    Keyword::OFFSET,
    Keyword::FETCH,
    Keyword::UNION,
    Keyword::EXCEPT,
    Keyword::INTERSECT,
    Keyword::INTO,
    Keyword::WINDOW,
    Keyword::QUALIFY,
];

/// Set quantifiers allowed right after SELECT
const SELECT_MODIFIERS: &[Keyword] = &[Keyword::DISTINCT, Keyword::ALL];

/// Unquoted keywords that never act as an implicit alias, nor precede one
const NON_ALIAS_KEYWORDS: &[Keyword] = &[
    Keyword::AS,
    Keyword::AND,
    Keyword::OR,
    Keyword::NOT,
    Keyword::NULL,
    Keyword::TRUE,
    Keyword::FALSE,
    Keyword::IS,
    Keyword::IN,
    Keyword::LIKE,
    Keyword::ILIKE,
    Keyword::BETWEEN,
    Keyword::CASE,
    Keyword::WHEN,
    Keyword::THEN,
    Keyword::ELSE,
    Keyword::END,
    Keyword::DISTINCT,
];

/// The selected columns of a query
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSection {
    /// A single selected item
    Identifier(SelectItem),

    /// Several comma-separated items
    IdentifierList(Vec<SelectItem>),
}

impl ColumnSection {
    fn from_items(mut items: Vec<SelectItem>) -> Option<Self> {
        match items.len() {
            0 => None,
            1 => items.pop().map(Self::Identifier),
            _ => Some(Self::IdentifierList(items)),
        }
    }

    /// Items in declaration order
    pub fn items(&self) -> &[SelectItem] {
        match self {
            Self::Identifier(item) => std::slice::from_ref(item),
            Self::IdentifierList(items) => items,
        }
    }
}

/// One item of the SELECT list, as tokens with edge whitespace removed
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    tokens: Vec<Token>,
}

impl SelectItem {
    fn new(tokens: &[Token]) -> Option<Self> {
        let start = tokens.iter().position(|t| !is_whitespace(t))?;
        let end = tokens.iter().rposition(|t| !is_whitespace(t))?;

        Some(Self {
            tokens: tokens[start..=end].to_vec(),
        })
    }

    /// Full item text
    pub fn text(&self) -> String {
        render(&self.tokens).trim().to_string()
    }

    /// Alias given with `AS name` or `expr name`
    pub fn alias(&self) -> Option<String> {
        self.split_alias().map(|(_, alias)| alias)
    }

    /// Referenced column when the item is a bare or dotted column reference
    ///
    /// `t.a` yields `a`; wildcards and expressions yield nothing.
    pub fn real_name(&self) -> Option<String> {
        let significant = self.significant();
        if !is_dotted_reference(&significant) {
            return None;
        }

        match significant.last() {
            Some(Token::Word(word)) => Some(word.value.clone()),
            _ => None,
        }
    }

    /// Output column name: the alias, else the real name
    pub fn name(&self) -> Option<String> {
        self.alias().or_else(|| self.real_name())
    }

    /// Expression text without the alias
    pub fn expression_text(&self) -> String {
        let end = self
            .split_alias()
            .map(|(end, _)| end)
            .unwrap_or(self.tokens.len());

        render(&self.tokens[..end]).trim().to_string()
    }

    /// Leading token of the expression as text
    ///
    /// A dotted reference yields its first part (`o` for `o.total`); any
    /// other expression is a single group and yields its whole text.
    pub fn leading_text(&self) -> String {
        let end = self
            .split_alias()
            .map(|(end, _)| end)
            .unwrap_or(self.tokens.len());
        let expression: Vec<&Token> = self.tokens[..end]
            .iter()
            .filter(|t| !is_whitespace(t))
            .collect();

        match expression.first() {
            Some(first) if expression.len() >= 3 && is_dotted_reference(&expression) => {
                first.to_string()
            }
            _ => self.expression_text(),
        }
    }

    /// Whether the item is `*` or `qualifier.*`
    pub fn is_wildcard(&self) -> bool {
        matches!(self.significant().last(), Some(Token::Mul))
    }

    fn significant(&self) -> Vec<&Token> {
        self.tokens.iter().filter(|t| !is_whitespace(t)).collect()
    }

    /// Token index where the expression ends, and the alias
    fn split_alias(&self) -> Option<(usize, String)> {
        let positions: Vec<usize> = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !is_whitespace(t))
            .map(|(i, _)| i)
            .collect();

        let n = positions.len();
        if n < 2 {
            return None;
        }

        let Token::Word(last) = &self.tokens[positions[n - 1]] else {
            return None;
        };
        let previous = &self.tokens[positions[n - 2]];

        if n >= 3 && is_keyword(previous, Keyword::AS) {
            return Some((positions[n - 2], last.value.clone()));
        }

        if can_be_alias(last) && can_precede_alias(previous) {
            return Some((positions[n - 1], last.value.clone()));
        }

        None
    }
}

/// Extracts per-column lineage from the SELECT list
pub struct ColumnExtractor;

impl ColumnExtractor {
    /// Extract column info for every named item of the first SELECT list
    ///
    /// Wildcards and unaliased expressions are skipped.
    pub fn extract(sql: &str, tables: &TableInfo) -> Vec<ColumnInfo> {
        let tokens = SqlTokenizer::new().tokenize_first_statement(sql);

        let Some(section) = Self::column_section(&tokens) else {
            tracing::debug!("No SELECT list found");
            return Vec::new();
        };

        section
            .items()
            .iter()
            .filter_map(|item| Self::column_info(item, tables))
            .collect()
    }

    /// Locate the SELECT list in a token stream
    ///
    /// The first SELECT at the outermost level is preferred; a query whose
    /// only SELECT is nested falls back to the first one found.
    pub fn column_section(tokens: &[Token]) -> Option<ColumnSection> {
        let start = Self::select_position(tokens)? + 1;
        let mut items = Vec::new();
        let mut item_start = Self::skip_modifiers(tokens, start);
        let mut depth = 0usize;
        let mut end = tokens.len();

        for (i, token) in tokens.iter().enumerate().skip(item_start) {
            match token {
                Token::LParen => depth += 1,
                Token::RParen if depth == 0 => {
                    end = i;
                    break;
                }
                Token::RParen => depth -= 1,
                Token::Comma if depth == 0 => {
                    items.extend(SelectItem::new(&tokens[item_start..i]));
                    item_start = i + 1;
                }
                Token::Word(word)
                    if depth == 0
                        && word.quote_style.is_none()
                        && CLAUSE_KEYWORDS.contains(&word.keyword) =>
                {
                    end = i;
                    break;
                }
                _ => {}
            }
        }

        if item_start < end {
            items.extend(SelectItem::new(&tokens[item_start..end]));
        }

        ColumnSection::from_items(items)
    }

    fn select_position(tokens: &[Token]) -> Option<usize> {
        let mut depth = 0usize;
        let mut first_nested = None;

        for (i, token) in tokens.iter().enumerate() {
            match token {
                Token::LParen => depth += 1,
                Token::RParen => depth = depth.saturating_sub(1),
                _ if is_keyword(token, Keyword::SELECT) => {
                    if depth == 0 {
                        return Some(i);
                    }
                    first_nested.get_or_insert(i);
                }
                _ => {}
            }
        }

        first_nested
    }

    fn skip_modifiers(tokens: &[Token], start: usize) -> usize {
        let mut pos = start;

        for (i, token) in tokens.iter().enumerate().skip(start) {
            if is_whitespace(token) {
                continue;
            }
            if SELECT_MODIFIERS.iter().any(|kw| is_keyword(token, *kw)) {
                pos = i + 1;
                continue;
            }
            break;
        }

        pos
    }

    fn column_info(item: &SelectItem, tables: &TableInfo) -> Option<ColumnInfo> {
        let Some(column_name) = item.name() else {
            tracing::debug!(item = %item.text(), "Skipping select item without a usable name");
            return None;
        };

        let mut source_column = item.leading_text();
        if source_column.is_empty() {
            source_column = column_name.clone();
        }

        Some(ColumnInfo::new(tables, column_name, source_column, item.text()))
    }
}

fn is_whitespace(token: &Token) -> bool {
    matches!(token, Token::Whitespace(_))
}

/// `name` or `name.name...` with nothing else
fn is_dotted_reference(tokens: &[&Token]) -> bool {
    tokens.len() % 2 == 1
        && tokens.iter().enumerate().all(|(pos, token)| match (pos % 2, token) {
            (0, Token::Word(_)) => true,
            (1, Token::Period) => true,
            _ => false,
        })
}

fn is_keyword(token: &Token, keyword: Keyword) -> bool {
    matches!(token, Token::Word(word) if word.quote_style.is_none() && word.keyword == keyword)
}

fn can_be_alias(word: &Word) -> bool {
    word.quote_style.is_some()
        || !(NON_ALIAS_KEYWORDS.contains(&word.keyword) || CLAUSE_KEYWORDS.contains(&word.keyword))
}

fn can_precede_alias(token: &Token) -> bool {
    match token {
        Token::Word(word) => word.quote_style.is_some() || !NON_ALIAS_KEYWORDS.contains(&word.keyword),
        Token::RParen | Token::Number(_, _) | Token::SingleQuotedString(_) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(sql: &str) -> Vec<SelectItem> {
        let tokens = SqlTokenizer::new().tokenize_first_statement(sql);
        ColumnExtractor::column_section(&tokens)
            .map(|section| section.items().to_vec())
            .unwrap_or_default()
    }

    fn item(sql: &str) -> SelectItem {
        items(sql).remove(0)
    }

    #[test]
    fn single_identifier_section() {
        let tokens = SqlTokenizer::new().tokenize("SELECT a FROM t");
        let section = ColumnExtractor::column_section(&tokens).unwrap();
        assert!(matches!(section, ColumnSection::Identifier(_)));
    }

    #[test]
    fn identifier_list_section() {
        let tokens = SqlTokenizer::new().tokenize("SELECT a, b FROM t");
        let section = ColumnExtractor::column_section(&tokens).unwrap();
        assert!(matches!(section, ColumnSection::IdentifierList(ref items) if items.len() == 2));
    }

    #[test]
    fn explicit_alias() {
        let item = item("SELECT x + 1 AS y FROM t");
        assert_eq!(item.alias().as_deref(), Some("y"));
        assert_eq!(item.expression_text(), "x + 1");
        assert_eq!(item.text(), "x + 1 AS y");
    }

    #[test]
    fn implicit_alias() {
        assert_eq!(item("SELECT count(id) n FROM t").alias().as_deref(), Some("n"));
        assert_eq!(item("SELECT a b FROM t").alias().as_deref(), Some("b"));
        assert_eq!(item("SELECT 'x' label FROM t").alias().as_deref(), Some("label"));
    }

    #[test]
    fn operators_are_not_aliases() {
        assert_eq!(item("SELECT a + b FROM t").alias(), None);
        assert_eq!(item("SELECT t.a FROM t").alias(), None);
        assert_eq!(item("SELECT CASE WHEN a THEN 1 ELSE 0 END FROM t").alias(), None);
        assert_eq!(item("SELECT a IS NULL FROM t").alias(), None);
    }

    #[test]
    fn real_name_of_dotted_reference() {
        let item = item("SELECT s.orders.total FROM s.orders");
        assert_eq!(item.real_name().as_deref(), Some("total"));
        assert_eq!(item.expression_text(), "s.orders.total");
        assert_eq!(item.leading_text(), "s");
    }

    #[test]
    fn leading_text_of_expressions() {
        assert_eq!(item("SELECT o.total AS amount FROM orders o").leading_text(), "o");
        assert_eq!(item("SELECT total FROM orders").leading_text(), "total");
        assert_eq!(item("SELECT x+1 AS y FROM t").leading_text(), "x+1");
        assert_eq!(item("SELECT upper(o.name) AS n FROM orders o").leading_text(), "upper(o.name)");
    }

    #[test]
    fn quoted_identifier_name() {
        assert_eq!(item("SELECT \"Order Id\" FROM t").name().as_deref(), Some("Order Id"));
    }

    #[test]
    fn wildcards_have_no_name() {
        let star = item("SELECT * FROM t");
        assert!(star.is_wildcard());
        assert_eq!(star.name(), None);

        let qualified = item("SELECT t.* FROM t");
        assert!(qualified.is_wildcard());
        assert_eq!(qualified.name(), None);
    }

    #[test]
    fn unaliased_expression_has_no_name() {
        assert_eq!(item("SELECT upper(a) FROM t").name(), None);
        assert_eq!(item("SELECT 1 FROM t").name(), None);
    }

    #[test]
    fn commas_inside_calls_do_not_split() {
        let items = items("SELECT coalesce(a, b) AS c, d FROM t");
        let names: Vec<_> = items.iter().filter_map(SelectItem::name).collect();
        assert_eq!(names, vec!["c", "d"]);
    }

    #[test]
    fn cast_alias_inside_parens_is_ignored() {
        let item = item("SELECT CAST(a AS INT) FROM t");
        assert_eq!(item.name(), None);
    }

    #[test]
    fn distinct_is_skipped() {
        let names: Vec<_> = items("SELECT DISTINCT a, b FROM t")
            .iter()
            .filter_map(SelectItem::name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn outer_select_preferred_over_cte() {
        let sql = "WITH x AS (SELECT inner_col FROM t) SELECT outer_col FROM x";
        assert_eq!(item(sql).name().as_deref(), Some("outer_col"));
    }

    #[test]
    fn nested_select_used_when_only_one() {
        let sql = "CREATE TABLE out AS (SELECT a, b FROM t)";
        let names: Vec<_> = items(sql).iter().filter_map(SelectItem::name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn no_select_no_section() {
        let tokens = SqlTokenizer::new().tokenize("INSERT INTO t VALUES (1, 2)");
        assert!(ColumnExtractor::column_section(&tokens).is_none());
    }

    #[test]
    fn select_without_items() {
        let tokens = SqlTokenizer::new().tokenize("SELECT FROM t");
        assert!(ColumnExtractor::column_section(&tokens).is_none());
    }

    #[test]
    fn extract_builds_column_info() {
        let tables = TableInfo::new(None, vec!["t".into()]);
        let columns = ColumnExtractor::extract("SELECT a, upper(b) AS b_up, * FROM t", &tables);

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].column_name, "a");
        assert!(!columns[0].has_transformation);
        assert_eq!(columns[1].column_name, "b_up");
        assert_eq!(columns[1].source_column, "upper(b)");

        let qualified = ColumnExtractor::extract("SELECT o.total FROM orders o", &tables);
        assert_eq!(qualified[0].column_name, "total");
        assert_eq!(qualified[0].source_column, "o");
        assert_eq!(columns[1].full_definition, "upper(b) AS b_up");
        assert!(columns[1].has_transformation);
    }
}
