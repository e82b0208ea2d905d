//! Go import clause extractor.
//!
//! Scans only the prologue of a Go file: the `package` clause followed by any
//! number of `import` declarations. Scanning stops at the first top-level
//! token that is not `import`, so function bodies are never read.

use memchr::{memchr, memchr_iter, memmem};

use super::{ImportExtractor, ParseError};

/// Import extractor for Go source files.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoImportExtractor;

impl GoImportExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ImportExtractor for GoImportExtractor {
    fn extract_imports(&self, source: &str) -> Result<Vec<String>, ParseError> {
        let mut scanner = Scanner::new(source);
        scanner.package_clause()?;

        let mut imports = Vec::new();
        loop {
            scanner.skip_trivia()?;
            if scanner.peek_ident() != Some("import") {
                break;
            }
            scanner.advance("import".len());
            scanner.skip_trivia()?;

            if scanner.peek() == Some(b'(') {
                let group_line = scanner.line;
                scanner.advance(1);
                loop {
                    scanner.skip_trivia()?;
                    match scanner.peek() {
                        Some(b')') => {
                            scanner.advance(1);
                            break;
                        }
                        None => {
                            return Err(ParseError::UnterminatedImportGroup { line: group_line });
                        }
                        Some(_) => imports.push(scanner.import_spec()?),
                    }
                }
            } else {
                imports.push(scanner.import_spec()?);
            }
        }

        Ok(imports)
    }
}

/// Byte cursor over the source with line tracking.
struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        let pos = if src.starts_with('\u{feff}') { 3 } else { 0 };
        Self {
            src,
            bytes: src.as_bytes(),
            pos,
            line: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn advance(&mut self, n: usize) {
        let end = (self.pos + n).min(self.bytes.len());
        self.line += memchr_iter(b'\n', &self.bytes[self.pos..end]).count();
        self.pos = end;
    }

    /// Skip whitespace, semicolons and comments.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n' | b';') => self.advance(1),
                Some(b'/') => match self.bytes.get(self.pos + 1) {
                    Some(b'/') => {
                        let rest = &self.bytes[self.pos..];
                        let len = memchr(b'\n', rest).unwrap_or(rest.len());
                        self.advance(len);
                    }
                    Some(b'*') => {
                        let body = &self.bytes[self.pos + 2..];
                        match memmem::find(body, b"*/") {
                            Some(end) => self.advance(2 + end + 2),
                            None => return Err(ParseError::UnterminatedComment { line: self.line }),
                        }
                    }
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    /// Identifier at the cursor, without consuming it.
    fn peek_ident(&self) -> Option<&'a str> {
        let rest = &self.bytes[self.pos..];
        let len = rest
            .iter()
            .take_while(|&&b| b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80)
            .count();

        if len == 0 || rest[0].is_ascii_digit() {
            None
        } else {
            Some(&self.src[self.pos..self.pos + len])
        }
    }

    fn package_clause(&mut self) -> Result<(), ParseError> {
        self.skip_trivia()?;
        if self.peek_ident() != Some("package") {
            return Err(ParseError::MissingPackageClause { line: self.line });
        }
        self.advance("package".len());
        self.skip_trivia()?;

        match self.peek_ident() {
            Some(name) => {
                self.advance(name.len());
                Ok(())
            }
            None => Err(ParseError::MissingPackageName { line: self.line }),
        }
    }

    /// One import spec: an optional name (`.`, `_` or an alias) then a path.
    fn import_spec(&mut self) -> Result<String, ParseError> {
        let line = self.line;
        if self.peek() == Some(b'.') {
            self.advance(1);
            self.skip_trivia()?;
        } else if let Some(alias) = self.peek_ident() {
            self.advance(alias.len());
            self.skip_trivia()?;
        }

        match self.peek() {
            Some(b'"' | b'`') => self.string_literal(),
            _ => Err(ParseError::MissingImportPath { line }),
        }
    }

    fn string_literal(&mut self) -> Result<String, ParseError> {
        let line = self.line;
        match self.peek() {
            Some(b'"') => {
                let start = self.pos + 1;
                let mut end = start;
                loop {
                    match self.bytes.get(end) {
                        None | Some(b'\n') => return Err(ParseError::UnterminatedString { line }),
                        Some(b'\\') => end += 2,
                        Some(b'"') => break,
                        Some(_) => end += 1,
                    }
                }
                let value = unescape(&self.src[start..end]);
                self.advance(end + 1 - self.pos);
                Ok(value)
            }
            Some(b'`') => {
                let start = self.pos + 1;
                match memchr(b'`', &self.bytes[start..]) {
                    Some(len) => {
                        let value = self.src[start..start + len].to_string();
                        self.advance(len + 2);
                        Ok(value)
                    }
                    None => Err(ParseError::UnterminatedString { line }),
                }
            }
            _ => Err(ParseError::MissingImportPath { line }),
        }
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}
