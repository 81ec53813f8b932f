//! Index-file parser.
//!
//! Parses the token stream of an index file into a [`SearchTable`] using recursive
//! descent.
//!
//! # Grammar
//!
//! ```text
//! file      → declaration? table ";"?
//! declaration → "var" IDENT "="
//! table     → "[" (entry ("," entry)* ","?)? "]"
//! entry     → "[" STRING "," value "]"
//! value     → "[" STRING "," locations "]"
//! locations → STRING                                  (single href)
//!           | "{" (name ":" STRING ("," name ":" STRING)* ","?)? "}"  (mapping)
//!           | triple ("," triple)*                    (generator layout)
//! triple    → "[" STRING "," INT "," STRING "]"
//! name      → STRING | IDENT
//! ```

use crate::{
    error::ParseError,
    lexer::{Token, TokenKind, tokenize},
    model::{Href, Layout, Location, SearchEntry, SearchTable},
};

/// Recursive descent parser over index-file tokens.
pub(crate) struct Parser<'a> {
    /// Original input, for error positions.
    input: &'a str,
    /// Token stream to parse.
    tokens: Vec<Token>,
    /// Current position in the token stream.
    position: usize,
}

impl<'a> Parser<'a> {
    /// Tokenizes `input` and creates a parser over it.
    pub(crate) fn new(input: &'a str) -> Result<Self, ParseError> {
        Ok(Self {
            input,
            tokens: tokenize(input)?,
            position: 0,
        })
    }

    /// Returns the current token kind without consuming it.
    pub(crate) fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.position).map(|t| &t.kind)
    }

    /// Consumes the current token if it is a name and returns it.
    ///
    /// Identifiers are names; string literals are too when `allow_string` is set.
    fn eat_name(&mut self, allow_string: bool) -> Option<String> {
        let name = match self.peek()? {
            TokenKind::Ident(name) => name.clone(),
            TokenKind::Str(name) if allow_string => name.clone(),
            _ => return None,
        };
        self.position += 1;
        Some(name)
    }

    /// Checks whether the current token is `kind`.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    /// Consumes the current token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Returns true when every token has been consumed.
    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Creates an error at the current token (or at end of input).
    pub(crate) fn error_here(&self, message: impl Into<String>) -> ParseError {
        let offset = self
            .tokens
            .get(self.position)
            .map_or(self.input.len(), |t| t.offset);
        ParseError::new(message, offset, self.input)
    }

    /// Describes the current token for error messages.
    fn found(&self) -> String {
        self.peek()
            .map_or_else(|| "end of input".to_string(), TokenKind::describe)
    }

    /// Consumes `kind` or fails with an "expected" error.
    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error_here(format!(
                "expected {}, found {}",
                kind.describe(),
                self.found()
            )))
        }
    }

    /// Consumes a string literal describing `what`.
    pub(crate) fn expect_string(&mut self, what: &str) -> Result<String, ParseError> {
        if let Some(TokenKind::Str(s)) = self.peek() {
            let s = s.clone();
            self.position += 1;
            return Ok(s);
        }
        Err(self.error_here(format!("expected {what} string, found {}", self.found())))
    }

    /// Consumes an integer literal describing `what`.
    pub(crate) fn expect_int(&mut self, what: &str) -> Result<i64, ParseError> {
        if let Some(&TokenKind::Int(n)) = self.peek() {
            self.position += 1;
            return Ok(n);
        }
        Err(self.error_here(format!("expected {what}, found {}", self.found())))
    }

    /// Parses an optional `var <name> =` header, returning the variable name.
    pub(crate) fn parse_declaration(&mut self) -> Result<Option<String>, ParseError> {
        if !self.eat(&TokenKind::Var) {
            return Ok(None);
        }
        let Some(name) = self.eat_name(false) else {
            return Err(self.error_here(format!(
                "expected variable name, found {}",
                self.found()
            )));
        };
        self.expect(&TokenKind::Equals)?;
        Ok(Some(name))
    }

    /// Parses the top-level entry array.
    fn parse_entries(&mut self) -> Result<Vec<SearchEntry>, ParseError> {
        self.expect(&TokenKind::LBracket)?;

        let mut entries = Vec::new();
        while !self.eat(&TokenKind::RBracket) {
            entries.push(self.parse_entry()?);
            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::RBracket)?;
                break;
            }
        }

        Ok(entries)
    }

    /// Parses: entry → "[" STRING "," value "]"
    fn parse_entry(&mut self) -> Result<SearchEntry, ParseError> {
        self.expect(&TokenKind::LBracket)?;
        let key = self.expect_string("entry key")?;
        self.expect(&TokenKind::Comma)?;

        self.expect(&TokenKind::LBracket)?;
        let display = self.expect_string("display name")?;
        if self.check(&TokenKind::RBracket) {
            return Err(self.error_here(format!(
                "entry '{key}' must have exactly two elements in its value: display and locations"
            )));
        }
        self.expect(&TokenKind::Comma)?;
        let (layout, locations) = self.parse_locations(&key)?;
        self.expect(&TokenKind::RBracket)?;

        if self.check(&TokenKind::Comma) {
            return Err(self.error_here(format!(
                "entry '{key}' must have exactly two elements: key and value"
            )));
        }
        self.expect(&TokenKind::RBracket)?;

        Ok(SearchEntry {
            key,
            display,
            locations,
            layout,
        })
    }

    /// Parses the location part of an entry value, detecting its layout.
    fn parse_locations(&mut self, key: &str) -> Result<(Layout, Vec<Location>), ParseError> {
        match self.peek() {
            Some(TokenKind::Str(_)) => {
                let href = self.expect_string("href")?;
                if self.check(&TokenKind::Comma) {
                    return Err(self.error_here(format!(
                        "entry '{key}' must have exactly two elements in its value: display and href"
                    )));
                }
                Ok((Layout::Href, vec![Location::new(href.as_str(), "")]))
            }
            Some(TokenKind::LBrace) => Ok((Layout::Mapping, self.parse_mapping()?)),
            Some(TokenKind::LBracket) => {
                let mut locations = vec![self.parse_triple()?];
                while self.eat(&TokenKind::Comma) {
                    locations.push(self.parse_triple()?);
                }
                Ok((Layout::Generated, locations))
            }
            _ => Err(self.error_here(format!(
                "expected href, mapping or location list for entry '{key}', found {}",
                self.found()
            ))),
        }
    }

    /// Parses: triple → "[" STRING "," INT "," STRING "]"
    fn parse_triple(&mut self) -> Result<Location, ParseError> {
        self.expect(&TokenKind::LBracket)?;
        let href = self.expect_string("href")?;
        self.expect(&TokenKind::Comma)?;
        let flag = self.expect_int("link target flag")?;
        self.expect(&TokenKind::Comma)?;
        let scope = self.expect_string("scope")?;
        self.expect(&TokenKind::RBracket)?;

        Ok(Location {
            href: Href::from(href.as_str()),
            scope,
            target_parent: flag != 0,
        })
    }

    /// Parses a `{qualifiedName: href, ...}` mapping.
    fn parse_mapping(&mut self) -> Result<Vec<Location>, ParseError> {
        self.expect(&TokenKind::LBrace)?;

        let mut locations = Vec::new();
        while !self.eat(&TokenKind::RBrace) {
            let Some(name) = self.eat_name(true) else {
                return Err(self.error_here(format!(
                    "expected qualified name, found {}",
                    self.found()
                )));
            };
            self.expect(&TokenKind::Colon)?;
            let href = self.expect_string("href")?;
            locations.push(Location::new(href.as_str(), name));

            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::RBrace)?;
                break;
            }
        }

        Ok(locations)
    }
}

/// Parses the text of an index file into a table.
///
/// Accepts `var <name> = [...];` as written by documentation generators, or a bare
/// array. Each entry may use any of the three location layouts; the layout is
/// recorded so that [`emit_table`](crate::emit_table) can reproduce it.
pub fn parse_table(input: &str) -> Result<SearchTable, ParseError> {
    let mut parser = Parser::new(input)?;

    let variable = parser.parse_declaration()?;
    let entries = parser.parse_entries()?;
    parser.eat(&TokenKind::Semicolon);

    if !parser.is_at_end() {
        return Err(parser.error_here(format!("unexpected {} after table", parser.found())));
    }

    Ok(SearchTable { variable, entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_href_entry() {
        let table = parse_table(
            "[['get', ['get', '../classgtirb_1_1_e_a.html#a8c76949b2094ba9b6e098cf2639afc03']]]",
        )
        .unwrap();

        assert_eq!(table.variable, None);
        assert_eq!(table.len(), 1);
        let entry = &table.entries[0];
        assert_eq!(entry.key, "get");
        assert_eq!(entry.display, "get");
        assert_eq!(entry.layout, Layout::Href);
        assert_eq!(entry.locations.len(), 1);
        assert_eq!(
            entry.locations[0].href.to_string(),
            "../classgtirb_1_1_e_a.html#a8c76949b2094ba9b6e098cf2639afc03"
        );
    }

    #[test]
    fn generated_entry_with_declaration() {
        let table = parse_table(
            "var searchData=\n[\n  ['gtirb',['gtirb',['../namespacegtirb.html',1,'']]]\n];\n",
        )
        .unwrap();

        assert_eq!(table.variable.as_deref(), Some("searchData"));
        let entry = &table.entries[0];
        assert_eq!(entry.layout, Layout::Generated);
        assert!(entry.locations[0].href.is_document_level());
        assert!(entry.locations[0].target_parent);
        assert_eq!(entry.locations[0].scope, "");
    }

    #[test]
    fn multi_location_generated_entry() {
        let table = parse_table(
            "[['get',['get',['a.html#x',1,'gtirb::EA'],['b.html#y',0,'gtirb::Addr']]]]",
        )
        .unwrap();

        let entry = &table.entries[0];
        assert!(entry.is_multi_location());
        assert_eq!(entry.locations[1].scope, "gtirb::Addr");
        assert!(!entry.locations[1].target_parent);
    }

    #[test]
    fn mapping_entry() {
        let table = parse_table(
            "[['get', ['get', {'gtirb::EA::get': 'a.html#x', \"gtirb::Addr::get\": 'b.html#y',}]]]",
        )
        .unwrap();

        let entry = &table.entries[0];
        assert_eq!(entry.layout, Layout::Mapping);
        assert_eq!(
            entry.qualified_names(),
            vec!["gtirb::EA::get", "gtirb::Addr::get"]
        );
        assert_eq!(entry.locations[1].href.to_string(), "b.html#y");
    }

    #[test]
    fn empty_mapping_is_accepted() {
        let table = parse_table("[['x', ['X', {}]]]").unwrap();
        assert!(table.entries[0].locations.is_empty());
    }

    #[test]
    fn empty_table_and_trailing_comma() {
        assert!(parse_table("var searchData = [];").unwrap().is_empty());
        let table = parse_table("[['a',['a','a.html']],]").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn rejects_three_element_entry() {
        let err = parse_table("[['a',['a','a.html'],'extra']]").unwrap_err();
        assert!(err.message.contains("exactly two elements"));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn rejects_value_without_locations() {
        let err = parse_table("[['a',['a']]]").unwrap_err();
        assert!(err.message.contains("exactly two elements"));
    }

    #[test]
    fn rejects_missing_close_bracket() {
        let err = parse_table("var searchData=\n[\n  ['a',['a','a.html']]\n").unwrap_err();
        assert!(err.message.contains("expected ']'"));
        assert_eq!(err.line, 4);
    }

    #[test]
    fn rejects_trailing_garbage() {
        let err = parse_table("[]; [").unwrap_err();
        assert!(err.message.contains("after table"));
    }

    #[test]
    fn rejects_non_string_key() {
        let err = parse_table("[[1,['a','a.html']]]").unwrap_err();
        assert!(err.message.contains("entry key"));
        assert_eq!(err.column, 3);
    }

    #[test]
    fn rejects_missing_variable_name() {
        let err = parse_table("var = []").unwrap_err();
        assert!(err.message.contains("variable name"));
        assert_eq!(err.column, 5);
    }

    #[test]
    fn truncated_input_reports_end_of_input() {
        let err = parse_table("var").unwrap_err();
        assert_eq!(err.message, "expected variable name, found end of input");
        assert_eq!(err.column, 4);

        let err = parse_table("[['x',['x',{'a::x':'a.html',").unwrap_err();
        assert_eq!(err.message, "expected qualified name, found end of input");
        assert_eq!(err.column, 29);
    }
}
