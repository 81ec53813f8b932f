//! Lexer for the JavaScript literal subset used by index files.
//!
//! Index files are tiny JavaScript programs (`var searchData = [...];`) built only
//! from arrays, objects, strings and integers, so a small hand-written tokenizer is
//! enough to read them without a JavaScript engine.

use std::{iter::Peekable, str::CharIndices};

use crate::error::ParseError;

/// The kind of a lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// The `var` keyword.
    Var,
    /// An identifier such as `searchData`.
    Ident(String),
    /// A string literal with escapes resolved.
    Str(String),
    /// An integer literal.
    Int(i64),
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `=`
    Equals,
}

impl TokenKind {
    /// Short human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Var => "'var'".to_string(),
            Self::Ident(name) => format!("identifier '{name}'"),
            Self::Str(_) => "string".to_string(),
            Self::Int(n) => format!("number {n}"),
            Self::LBracket => "'['".to_string(),
            Self::RBracket => "']'".to_string(),
            Self::LBrace => "'{'".to_string(),
            Self::RBrace => "'}'".to_string(),
            Self::Comma => "','".to_string(),
            Self::Colon => "':'".to_string(),
            Self::Semicolon => "';'".to_string(),
            Self::Equals => "'='".to_string(),
        }
    }
}

/// A token with its byte offset in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What was read.
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub offset: usize,
}

/// Tokenizes index-file source text.
struct Lexer<'a> {
    /// The original input.
    input: &'a str,
    /// Characters with their byte offsets.
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `input`.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Creates an error at a specific byte offset.
    fn error_at(&self, message: impl Into<String>, offset: usize) -> ParseError {
        ParseError::new(message, offset, self.input)
    }

    /// Byte offset of the next character, or the input length at end of input.
    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |&(i, _)| i)
    }

    /// Tokenizes the whole input.
    fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or `None` at end of input.
    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        self.skip_trivia()?;

        let Some(&(offset, ch)) = self.chars.peek() else {
            return Ok(None);
        };

        let kind = match ch {
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            ',' => self.single(TokenKind::Comma),
            ':' => self.single(TokenKind::Colon),
            ';' => self.single(TokenKind::Semicolon),
            '=' => self.single(TokenKind::Equals),
            '\'' | '"' => self.read_string(ch)?,
            '-' | '0'..='9' => self.read_int()?,
            c if c == '_' || c == '$' || c.is_alphabetic() => self.read_ident(),
            other => {
                return Err(self.error_at(format!("unexpected character '{other}'"), offset));
            }
        };

        Ok(Some(Token { kind, offset }))
    }

    /// Consumes one character and returns `kind`.
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.chars.next();
        kind
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        while let Some(&(offset, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
                continue;
            }
            if ch != '/' {
                break;
            }

            let input = self.input;
            let rest = &input[offset..];
            if rest.starts_with("//") {
                while let Some(&(_, c)) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.chars.next();
                }
            } else if rest.starts_with("/*") {
                let Some(end) = rest[2..].find("*/") else {
                    return Err(self.error_at("unterminated comment", offset));
                };
                let stop = offset + 2 + end + 2;
                while self.offset() < stop {
                    self.chars.next();
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Reads a quoted string, resolving escapes.
    fn read_string(&mut self, quote: char) -> Result<TokenKind, ParseError> {
        let start = self.offset();
        self.chars.next(); // opening quote

        let mut content = String::new();
        loop {
            match self.chars.next() {
                Some((_, c)) if c == quote => return Ok(TokenKind::Str(content)),
                Some((offset, '\\')) => content.push(self.read_escape(offset)?),
                Some((offset, '\n')) => {
                    return Err(self.error_at("unterminated string (newline in literal)", offset));
                }
                Some((_, c)) => content.push(c),
                None => return Err(self.error_at("unterminated string", start)),
            }
        }
    }

    /// Reads the character after a backslash.
    fn read_escape(&mut self, offset: usize) -> Result<char, ParseError> {
        let Some((_, c)) = self.chars.next() else {
            return Err(self.error_at("unterminated string", offset));
        };

        Ok(match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            'u' => {
                let mut hex = String::with_capacity(4);
                for _ in 0..4 {
                    match self.chars.next() {
                        Some((_, h)) if h.is_ascii_hexdigit() => hex.push(h),
                        _ => return Err(self.error_at("invalid \\u escape", offset)),
                    }
                }
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| self.error_at("invalid \\u escape", offset))?
            }
            // \' \" \\ \/ and any other escaped character stand for themselves
            other => other,
        })
    }

    /// Reads an optionally negative integer literal.
    fn read_int(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.offset();
        let mut digits = String::new();

        if let Some(&(_, '-')) = self.chars.peek() {
            digits.push('-');
            self.chars.next();
        }
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.chars.next();
        }

        digits
            .parse::<i64>()
            .map(TokenKind::Int)
            .map_err(|_| self.error_at(format!("invalid number '{digits}'"), start))
    }

    /// Reads an identifier or the `var` keyword.
    fn read_ident(&mut self) -> TokenKind {
        let mut word = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if !(c == '_' || c == '$' || c.is_alphanumeric()) {
                break;
            }
            word.push(c);
            self.chars.next();
        }

        if word == "var" || word == "let" || word == "const" {
            TokenKind::Var
        } else {
            TokenKind::Ident(word)
        }
    }
}

/// Tokenizes index-file source text.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(input).tokenize()
}
