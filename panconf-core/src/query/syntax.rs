use super::{AttrPredicate, NameTest, Query, QueryError, Step};

/// Compile query text into a [`Query`].
pub fn parse_query(input: &str) -> Result<Query, QueryError> {
    let mut parser = QueryParser::new(input);
    parser.parse()
}

struct QueryParser<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    position: usize,
}

impl<'a> QueryParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().collect(),
            position: 0,
        }
    }

    fn parse(&mut self) -> Result<Query, QueryError> {
        if self.peek() == Some('/') {
            return Err(self.error("absolute paths are not supported"));
        }

        let mut steps = vec![self.step()?];
        while let Some(c) = self.peek() {
            if c != '/' {
                return Err(self.error(format!("unexpected character {c:?}")));
            }
            self.advance();
            match self.peek() {
                None => return Err(self.error("path ends with '/'")),
                Some('/') => return Err(self.error("descendant axis '//' is not supported")),
                Some(_) => steps.push(self.step()?),
            }
        }

        Ok(Query { steps })
    }

    fn step(&mut self) -> Result<Step, QueryError> {
        let name = match self.peek() {
            Some('.') => {
                self.advance();
                if self.peek() == Some('.') {
                    return Err(self.error("parent step '..' is not supported"));
                }
                NameTest::Context
            }
            Some('*') => {
                self.advance();
                NameTest::Any
            }
            Some(c) if is_name_start(c) => NameTest::Tag(self.name()),
            Some(c) => return Err(self.error(format!("expected a step name, found {c:?}"))),
            None => return Err(self.error("expected a step name")),
        };

        let mut predicates = Vec::new();
        while self.peek() == Some('[') {
            predicates.push(self.predicate()?);
        }

        Ok(Step { name, predicates })
    }

    fn predicate(&mut self) -> Result<AttrPredicate, QueryError> {
        self.advance();
        if self.peek() != Some('@') {
            return Err(self.error("only attribute predicates like [@name='x'] are supported"));
        }
        self.advance();

        match self.peek() {
            Some(c) if is_name_start(c) => {}
            _ => return Err(self.error("expected an attribute name after '@'")),
        }
        let key = self.name();

        let value = match self.peek() {
            Some(']') => None,
            Some('=') => {
                self.advance();
                Some(self.quoted()?)
            }
            Some(c) => return Err(self.error(format!("unexpected character {c:?} in predicate"))),
            None => return Err(self.error("unterminated predicate")),
        };

        if self.peek() != Some(']') {
            return Err(self.error("expected ']' to close predicate"));
        }
        self.advance();

        Ok(AttrPredicate { key, value })
    }

    fn quoted(&mut self) -> Result<String, QueryError> {
        let quote = match self.peek() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.error("expected a quoted value")),
        };
        self.advance();

        let mut value = String::new();
        while let Some(c) = self.peek() {
            self.advance();
            if c == quote {
                return Ok(value);
            }
            value.push(c);
        }
        Err(self.error("unterminated string literal"))
    }

    fn name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if !is_name_char(c) {
                break;
            }
            name.push(c);
            self.advance();
        }
        name
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).map(|&(_, c)| c)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.position)
            .map_or(self.input.len(), |&(offset, _)| offset)
    }

    fn error(&self, reason: impl Into<String>) -> QueryError {
        QueryError {
            query: self.input.to_string(),
            offset: self.offset(),
            reason: reason.into(),
        }
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}
