//! Document-order token stream over a JSON tree
//!
//! [`Tokens`] flattens a [`serde_json::Value`] into the same sequence a
//! streaming JSON reader would produce, so extraction can run as a single
//! forward pass without knowing the shape of the document.

use serde_json::Value;
use serde_json::map::Iter as EntryIter;
use std::slice::Iter as ElementIter;

/// One token of a flattened tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    /// An object key; the next token starts its value
    Key(&'a str),
    /// A string value
    Str(&'a str),
    /// A number, boolean, or null
    Scalar(&'a Value),
}

enum Frame<'a> {
    Object(EntryIter<'a>),
    Array(ElementIter<'a, Value>),
}

/// Iterator over the tokens of a tree, depth first.
///
/// Object entries are visited in map order and array elements in index
/// order. Uses an explicit stack, so arbitrarily deep trees are safe.
pub struct Tokens<'a> {
    stack: Vec<Frame<'a>>,
    pending: Option<&'a Value>,
}

impl<'a> Tokens<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self {
            stack: Vec::new(),
            pending: Some(root),
        }
    }

    fn open(&mut self, value: &'a Value) -> Token<'a> {
        match value {
            Value::Object(map) => {
                self.stack.push(Frame::Object(map.iter()));
                Token::BeginObject
            }
            Value::Array(items) => {
                self.stack.push(Frame::Array(items.iter()));
                Token::BeginArray
            }
            Value::String(s) => Token::Str(s),
            other => Token::Scalar(other),
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(value) = self.pending.take() {
            return Some(self.open(value));
        }

        let next = match self.stack.last_mut()? {
            Frame::Object(entries) => match entries.next() {
                Some((key, value)) => {
                    self.pending = Some(value);
                    return Some(Token::Key(key));
                }
                None => None,
            },
            Frame::Array(elements) => elements.next(),
        };

        match next {
            Some(value) => Some(self.open(value)),
            None => match self.stack.pop() {
                Some(Frame::Object(_)) => Some(Token::EndObject),
                Some(Frame::Array(_)) => Some(Token::EndArray),
                None => None,
            },
        }
    }
}
