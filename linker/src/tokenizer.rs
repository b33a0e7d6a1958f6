//! Lazy line-by-line tokenizer over the module source text.
//!
//! Mirrors the original reader: tokens are whitespace-separated, line and
//! (1-based) column are tracked for error reporting, and running out of
//! tokens entirely reports the position just past the last line of input.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    NumExpected,
    SymExpected,
    AddrExpected,
    SymTooLong,
    TooManyDefInModule,
    TooManyUseInModule,
    TooManyInstr,
}

impl ParseErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::NumExpected => "NUM_EXPECTED",
            ParseErrorKind::SymExpected => "SYM_EXPECTED",
            ParseErrorKind::AddrExpected => "ADDR_EXPECTED",
            ParseErrorKind::SymTooLong => "SYM_TOO_LONG",
            ParseErrorKind::TooManyDefInModule => "TOO_MANY_DEF_IN_MODULE",
            ParseErrorKind::TooManyUseInModule => "TOO_MANY_USE_IN_MODULE",
            ParseErrorKind::TooManyInstr => "TOO_MANY_INSTR",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub offset: usize,
}

impl ParseError {
    fn at(kind: ParseErrorKind, line: usize, offset: usize) -> Self {
        Self { kind, line, offset }
    }

    pub fn format(&self) -> String {
        format!(
            "Parse Error line {} offset {}: {}",
            self.line,
            self.offset,
            self.kind.as_str()
        )
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

struct Token {
    text: String,
    line: usize,
    offset: usize,
}

pub struct Tokenizer {
    tokens: Vec<Token>,
    idx: usize,
    eof_line: usize,
    eof_offset: usize,
}

fn is_num(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_symbol(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

fn is_iaer(s: &str) -> bool {
    matches!(s, "I" | "A" | "E" | "R")
}

impl Tokenizer {
    pub fn new(content: &str) -> Self {
        let mut tokens = Vec::new();
        let mut eof_line = 0;
        let mut eof_offset = 1;
        for (idx, line) in content.lines().enumerate() {
            let line_num = idx + 1;
            let mut col = 0usize;
            for raw in line.split_whitespace() {
                // recompute the byte offset of this token within the line
                let found = line[col..].find(raw).unwrap_or(0) + col;
                col = found + raw.len();
                tokens.push(Token {
                    text: raw.to_string(),
                    line: line_num,
                    offset: found + 1,
                });
            }
            eof_line = line_num;
            eof_offset = line.len() + 1;
        }
        Self {
            tokens,
            idx: 0,
            eof_line,
            eof_offset,
        }
    }

    pub fn eof(&self) -> bool {
        self.idx >= self.tokens.len()
    }

    fn next_token(&mut self) -> Option<(&str, usize, usize)> {
        let tok = self.tokens.get(self.idx)?;
        self.idx += 1;
        Some((&tok.text, tok.line, tok.offset))
    }

    fn eof_pos(&self) -> (usize, usize) {
        (self.eof_line, self.eof_offset)
    }

    pub fn read_int(&mut self) -> Result<i32> {
        match self.next_token() {
            Some((text, _line, _offset)) if is_num(text) => {
                Ok(text.parse().unwrap_or_default())
            }
            Some((_, line, offset)) => Err(ParseError::at(ParseErrorKind::NumExpected, line, offset)),
            None => {
                let (line, offset) = self.eof_pos();
                Err(ParseError::at(ParseErrorKind::NumExpected, line, offset))
            }
        }
    }

    pub fn read_symbol(&mut self) -> Result<String> {
        match self.next_token() {
            Some((text, line, offset)) if is_symbol(text) => {
                if text.len() > 16 {
                    Err(ParseError::at(ParseErrorKind::SymTooLong, line, offset))
                } else {
                    Ok(text.to_string())
                }
            }
            Some((_, line, offset)) => Err(ParseError::at(ParseErrorKind::SymExpected, line, offset)),
            None => {
                let (line, offset) = self.eof_pos();
                Err(ParseError::at(ParseErrorKind::SymExpected, line, offset))
            }
        }
    }

    /// Build a `ParseError` at the current read position, for structural
    /// checks that aren't themselves a single token read (list-size and
    /// instruction-count limits).
    pub fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        let (line, offset) = match self.tokens.get(self.idx) {
            Some(t) => (t.line, t.offset),
            None => self.eof_pos(),
        };
        ParseError::at(kind, line, offset)
    }

    pub fn read_iaer(&mut self) -> Result<String> {
        match self.next_token() {
            Some((text, line, offset)) if is_iaer(text) => Ok(text.to_string()),
            Some((_, line, offset)) => Err(ParseError::at(ParseErrorKind::AddrExpected, line, offset)),
            None => {
                let (line, offset) = self.eof_pos();
                Err(ParseError::at(ParseErrorKind::AddrExpected, line, offset))
            }
        }
    }
}
