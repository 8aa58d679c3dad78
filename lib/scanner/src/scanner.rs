use cursor::{Cursor, Line};

pub mod token;
pub use token::{Literal, Token, TokenData, TokenType};
use TokenData::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LexErrorType {
    #[error("`{0}` unexpected character.")]
    UnexpectedCharacter(char),
    #[error("unterminated string.")]
    UnterminatedString,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] LexError {error}")]
pub struct LexError {
    pub error: LexErrorType,
    pub line: Line,
}

impl LexError {
    pub fn new(error: LexErrorType, line: Line) -> Self {
        Self { error, line }
    }
}

/// Turns source text into tokens, one per call to `next()`.
///
/// The last item is always an `Eof` token. Scanning stops for good after the
/// first error, so collecting into a `Result<Vec<_>, _>` yields either the
/// complete token sequence or that error.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), done: false }
    }

    fn scan_token(&mut self) -> Result<Token<'a>, LexError> {
        loop {
            let start = self.cursor.clone();

            let Some(c) = self.cursor.next() else {
                return Ok(Token::new(Eof, "", self.cursor.line()));
            };

            let data = match c {
                '(' => LeftParen,
                ')' => RightParen,
                '{' => LeftBrace,
                '}' => RightBrace,
                ',' => Comma,
                '.' => Dot,
                '-' => Minus,
                '+' => Plus,
                ';' => Semicolon,
                '*' => Star,

                '!' => self.either('=', BangEqual, Bang),
                '=' => self.either('=', EqualEqual, Equal),
                '<' => self.either('=', LessEqual, Less),
                '>' => self.either('=', GreaterEqual, Greater),

                '/' => {
                    if self.cursor.advance_if('/') {
                        self.cursor.advance_while(|c| c != '\n');
                        continue;
                    }
                    Slash
                }

                // Newlines are counted by the cursor itself.
                ' ' | '\r' | '\t' | '\n' => continue,

                '"' => self.string()?,

                d if d.is_ascii_digit() => self.number(&start),

                c if is_alpha(c) => self.identifier(&start),

                c => {
                    return Err(LexError::new(
                        LexErrorType::UnexpectedCharacter(c),
                        self.cursor.line(),
                    ))
                }
            };

            return Ok(Token::new(data, start.slice_until(&self.cursor), start.line()));
        }
    }

    fn either(&mut self, next: char, matched: TokenData<'a>, single: TokenData<'a>) -> TokenData<'a> {
        if self.cursor.advance_if(next) {
            matched
        } else {
            single
        }
    }

    fn string(&mut self) -> Result<TokenData<'a>, LexError> {
        let content_start = self.cursor.clone();
        self.cursor.advance_while(|c| c != '"');

        if self.cursor.is_at_end() {
            return Err(LexError::new(LexErrorType::UnterminatedString, self.cursor.line()));
        }

        let content = content_start.slice_until(&self.cursor);
        self.cursor.next(); // closing quote
        Ok(Str(content))
    }

    fn number(&mut self, start: &Cursor<'a>) -> TokenData<'a> {
        self.cursor.advance_while(|c| c.is_ascii_digit());

        // A trailing '.' is only part of the number if a digit follows it.
        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.next();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }

        match start.slice_until(&self.cursor).parse() {
            Ok(n) => Number(n),
            Err(e) => unreachable!("digit run should always parse as f64: {e}"),
        }
    }

    fn identifier(&mut self, start: &Cursor<'a>) -> TokenData<'a> {
        self.cursor.advance_while(|c| is_alpha(c) || c.is_ascii_digit());
        let text = start.slice_until(&self.cursor);
        TokenData::keyword(text).unwrap_or(Identifier(text))
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.scan_token();
        match &result {
            Ok(token) => {
                log::trace!("Scanned {:?} at line {}", token.data, token.line);
                self.done = token.data == Eof;
            }
            Err(e) => {
                log::trace!("Scanning failed: {e}");
                self.done = true;
            }
        }
        Some(result)
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Scans all of `source`, failing on the first lexical error.
pub fn scan(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let tokens = Scanner::new(source).collect::<Result<Vec<_>, _>>()?;
    log::debug!("Scanned {} tokens", tokens.len());
    Ok(tokens)
}
