//! Parser for the textual path syntax.
//!
//! ```text
//! path    := bare? segment*
//! bare    := plain                       Key at the start, without a dot
//! segment := '.' plain                   Key
//!          | '[' '"' quoted '"' ']'      Key with arbitrary text (\" and \\ escapes)
//!          | '[' '-'? digits ']'         Index
//!          | '[' '*' ']'                 Each
//!          | '{' '*' '}'                 Values
//!          | '{' "keys" '}'              Keys
//! plain   := [A-Za-z0-9_-]+
//! ```
//!
//! The empty string is the identity lens.

use crate::error::LensError;
use crate::optics::lens::Lens;
use crate::optics::step::Step;

struct Cursor<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let character = self.peek()?;
        self.offset += character.len_utf8();
        Some(character)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.offset += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        if self.rest().starts_with(expected) {
            self.offset += expected.len();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let start = self.offset;
        while self.peek().is_some_and(&predicate) {
            self.bump();
        }
        &self.text[start..self.offset]
    }

    fn error(&self, message: &str) -> LensError {
        match self.peek() {
            Some(found) => LensError::malformed(format!(
                "{message} at offset {}, found {found:?}",
                self.offset
            )),
            None => LensError::malformed(format!(
                "{message} at offset {}, found end of input",
                self.offset
            )),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), LensError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(&format!("expected {expected:?}")))
        }
    }
}

const fn is_plain_character(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == '_' || character == '-'
}

fn plain_key(cursor: &mut Cursor<'_>) -> Result<Step, LensError> {
    let name = cursor.take_while(is_plain_character);
    if name.is_empty() {
        Err(cursor.error("expected a key name"))
    } else {
        Ok(Step::Key(name.to_string()))
    }
}

fn quoted_key(cursor: &mut Cursor<'_>) -> Result<Step, LensError> {
    let mut name = String::new();
    loop {
        match cursor.bump() {
            Some('"') => return Ok(Step::Key(name)),
            Some('\\') => match cursor.bump() {
                Some(escaped @ ('"' | '\\')) => name.push(escaped),
                _ => return Err(cursor.error("invalid escape in quoted key")),
            },
            Some(character) => name.push(character),
            None => return Err(cursor.error("unterminated quoted key")),
        }
    }
}

fn bracket(cursor: &mut Cursor<'_>) -> Result<Step, LensError> {
    let step = if cursor.eat('*') {
        Step::Each
    } else if cursor.eat('"') {
        quoted_key(cursor)?
    } else {
        let start = cursor.offset;
        cursor.eat('-');
        let digits = cursor.take_while(|character| character.is_ascii_digit());
        if digits.is_empty() {
            return Err(cursor.error("expected an index, '*' or a quoted key"));
        }
        let literal = &cursor.text[start..cursor.offset];
        let position = literal.parse::<i64>().map_err(|_| {
            LensError::malformed(format!("index {literal} at offset {start} does not fit in i64"))
        })?;
        Step::Index(position)
    };
    cursor.expect(']')?;
    Ok(step)
}

fn brace(cursor: &mut Cursor<'_>) -> Result<Step, LensError> {
    let step = if cursor.eat('*') {
        Step::Values
    } else if cursor.eat_str("keys") {
        Step::Keys
    } else {
        return Err(cursor.error("expected '*' or 'keys'"));
    };
    cursor.expect('}')?;
    Ok(step)
}

/// Parses `text` into a lens.
pub(crate) fn parse_path(text: &str) -> Result<Lens, LensError> {
    let mut cursor = Cursor::new(text);
    let mut steps = Vec::new();

    if cursor.peek().is_some_and(is_plain_character) {
        steps.push(plain_key(&mut cursor)?);
    }

    while let Some(character) = cursor.peek() {
        let step = match character {
            '.' => {
                cursor.bump();
                plain_key(&mut cursor)?
            }
            '[' => {
                cursor.bump();
                bracket(&mut cursor)?
            }
            '{' => {
                cursor.bump();
                brace(&mut cursor)?
            }
            _ => return Err(cursor.error("expected '.', '[' or '{'")),
        };
        steps.push(step);
    }

    Ok(Lens::from_steps(steps))
}
