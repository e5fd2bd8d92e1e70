//! Statement parsing for the in-memory engine.
//!
//! Hand-rolled scanner over the statement text. Errors follow the engine
//! convention of quoting the offending line with a caret under the
//! position, so facade tests can assert on messages verbatim.

use crate::engine::EngineError;
use crate::types::CypherValue;

use super::codes;

/// A `(variable:Label {key: literal})` node pattern.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct NodePattern {
    pub(super) variable: String,
    pub(super) labels: Vec<String>,
    pub(super) properties: Vec<(String, CypherValue)>,
}

/// A single RETURN expression.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Expr {
    Count { variable: String },
    Property { variable: String, key: String },
    Literal(CypherValue),
}

/// A RETURN item: expression plus the column it lands in (alias, or the
/// expression's source text when no alias is given).
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Projection {
    pub(super) expr: Expr,
    pub(super) column: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Statement {
    Create {
        pattern: NodePattern,
        projections: Vec<Projection>,
    },
    Match {
        pattern: NodePattern,
        projections: Vec<Projection>,
    },
    Bare {
        projections: Vec<Projection>,
    },
}

/// Parse one statement.
///
/// # Errors
///
/// Returns a `SyntaxError`-coded [`EngineError`] pointing at the first
/// offending position.
pub(super) fn parse(input: &str) -> Result<Statement, EngineError> {
    Parser { input, pos: 0 }.statement()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn statement(mut self) -> Result<Statement, EngineError> {
        self.skip_ws();
        let stmt = if self.keyword("CREATE") {
            let pattern = self.node_pattern()?;
            self.skip_ws();
            let projections = if self.keyword("RETURN") {
                self.projections()?
            } else {
                Vec::new()
            };
            Statement::Create {
                pattern,
                projections,
            }
        } else if self.keyword("MATCH") {
            let pattern = self.node_pattern()?;
            self.skip_ws();
            if !self.keyword("RETURN") {
                return Err(self.syntax_error("RETURN"));
            }
            Statement::Match {
                pattern,
                projections: self.projections()?,
            }
        } else if self.keyword("RETURN") {
            Statement::Bare {
                projections: self.projections()?,
            }
        } else {
            return Err(self.syntax_error("CREATE, MATCH or RETURN"));
        };
        self.skip_ws();
        self.eat(';');
        self.skip_ws();
        if self.pos < self.input.len() {
            return Err(self.syntax_error("end of statement"));
        }
        Ok(stmt)
    }

    fn node_pattern(&mut self) -> Result<NodePattern, EngineError> {
        self.skip_ws();
        self.expect('(', "a node pattern")?;
        self.skip_ws();
        let variable = self.ident("a variable name")?;
        let mut labels = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(':') {
                self.skip_ws();
                labels.push(self.ident("a label name")?);
            } else {
                break;
            }
        }
        let mut properties = Vec::new();
        if self.eat('{') {
            self.skip_ws();
            if !self.eat('}') {
                loop {
                    self.skip_ws();
                    let key = self.ident("a property name")?;
                    self.skip_ws();
                    self.expect(':', "':' after the property name")?;
                    let value = self.literal()?;
                    properties.push((key, value));
                    self.skip_ws();
                    if self.eat(',') {
                        continue;
                    }
                    self.expect('}', "',' or '}'")?;
                    break;
                }
            }
        }
        self.skip_ws();
        self.expect(')', "')'")?;
        Ok(NodePattern {
            variable,
            labels,
            properties,
        })
    }

    fn projections(&mut self) -> Result<Vec<Projection>, EngineError> {
        let mut items = vec![self.projection()?];
        loop {
            self.skip_ws();
            if self.eat(',') {
                items.push(self.projection()?);
            } else {
                break;
            }
        }
        Ok(items)
    }

    fn projection(&mut self) -> Result<Projection, EngineError> {
        self.skip_ws();
        let start = self.pos;
        let expr = self.expr()?;
        let text = self.input[start..self.pos].trim().to_owned();
        self.skip_ws();
        let column = if self.keyword("AS") {
            self.skip_ws();
            self.ident("a column alias")?
        } else {
            text
        };
        Ok(Projection { expr, column })
    }

    fn expr(&mut self) -> Result<Expr, EngineError> {
        // Literal keywords first so `true` is never taken for a variable.
        if self.keyword("true") {
            return Ok(Expr::Literal(CypherValue::Bool(true)));
        }
        if self.keyword("false") {
            return Ok(Expr::Literal(CypherValue::Bool(false)));
        }
        if self.keyword("null") {
            return Ok(Expr::Literal(CypherValue::Null));
        }
        if self.keyword("COUNT") {
            self.skip_ws();
            self.expect('(', "'(' after COUNT")?;
            self.skip_ws();
            let variable = self.ident("a variable name")?;
            self.skip_ws();
            self.expect(')', "')'")?;
            return Ok(Expr::Count { variable });
        }
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let variable = self.ident("a variable name")?;
                self.expect('.', "'.' and a property name")?;
                let key = self.ident("a property name")?;
                Ok(Expr::Property { variable, key })
            }
            _ => Ok(Expr::Literal(self.literal()?)),
        }
    }

    fn literal(&mut self) -> Result<CypherValue, EngineError> {
        self.skip_ws();
        if self.keyword("true") {
            return Ok(CypherValue::Bool(true));
        }
        if self.keyword("false") {
            return Ok(CypherValue::Bool(false));
        }
        if self.keyword("null") {
            return Ok(CypherValue::Null);
        }
        match self.peek() {
            Some('\'') => self.string_literal(),
            Some('[') => self.list_literal(),
            Some(c) if c.is_ascii_digit() || c == '-' => self.number_literal(),
            _ => Err(self.syntax_error("a literal value")),
        }
    }

    fn string_literal(&mut self) -> Result<CypherValue, EngineError> {
        self.bump(); // opening quote
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\'') => return Ok(CypherValue::Text(out)),
                Some('\\') => match self.bump() {
                    Some('\'') => out.push('\''),
                    Some('\\') => out.push('\\'),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => return Err(self.syntax_error("a closing quote")),
                },
                Some(c) => out.push(c),
                None => return Err(self.syntax_error("a closing quote")),
            }
        }
    }

    fn list_literal(&mut self) -> Result<CypherValue, EngineError> {
        self.bump(); // opening bracket
        let mut items = Vec::new();
        self.skip_ws();
        if self.eat(']') {
            return Ok(CypherValue::List(items));
        }
        loop {
            items.push(self.literal()?);
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            self.expect(']', "',' or ']'")?;
            return Ok(CypherValue::List(items));
        }
    }

    fn number_literal(&mut self) -> Result<CypherValue, EngineError> {
        let start = self.pos;
        self.eat('-');
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        let mut is_float = false;
        if self.peek() == Some('.')
            && self.rest()[1..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit())
        {
            is_float = true;
            self.bump(); // the dot
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
            }
        }
        let text = &self.input[start..self.pos];
        if is_float {
            text.parse::<f64>()
                .map(CypherValue::Float)
                .map_err(|_| syntax_error_at(self.input, start, "a number"))
        } else {
            text.parse::<i64>()
                .map(CypherValue::Int)
                .map_err(|_| syntax_error_at(self.input, start, "a number"))
        }
    }

    fn ident(&mut self, expected: &str) -> Result<String, EngineError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                self.bump();
            }
            _ => return Err(self.syntax_error(expected)),
        }
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        Ok(self.input[start..self.pos].to_owned())
    }

    /// Consume a case-insensitive keyword if it sits at the cursor and ends
    /// at an identifier boundary.
    fn keyword(&mut self, word: &str) -> bool {
        let rest = self.rest();
        let Some(head) = rest.get(..word.len()) else {
            return false;
        };
        if !head.eq_ignore_ascii_case(word) {
            return false;
        }
        if rest[word.len()..].chars().next().is_some_and(is_ident_char) {
            return false;
        }
        self.pos += word.len();
        true
    }

    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char, label: &str) -> Result<(), EngineError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.syntax_error(label))
        }
    }

    fn syntax_error(&self, expected: &str) -> EngineError {
        syntax_error_at(self.input, self.pos, expected)
    }
}

/// Build a syntax error quoting the offending line with a caret under the
/// position.
pub(super) fn syntax_error_at(input: &str, offset: usize, expected: &str) -> EngineError {
    let (line, column) = line_column(input, offset);
    let source_line = input.lines().nth(line - 1).unwrap_or("");
    let caret = format!("{}^", " ".repeat(column));
    let message = match input[offset..].chars().next() {
        Some(c) => format!(
            "Invalid input '{c}': expected {expected} (line {line}, column {column} \
             (offset: {offset}))\n\"{source_line}\"\n{caret}"
        ),
        None => format!(
            "Unexpected end of input: expected {expected} (line {line}, column {column} \
             (offset: {offset}))\n\"{source_line}\"\n{caret}"
        ),
    };
    EngineError::new(codes::SYNTAX_ERROR, message)
}

fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut line_start = 0;
    for (idx, c) in input.char_indices() {
        if idx >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            line_start = idx + c.len_utf8();
        }
    }
    let column = input[line_start..offset].chars().count() + 1;
    (line, column)
}
