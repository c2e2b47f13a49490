//! Dictionary-style wire messages.
//!
//! Queries and replies are bencoded dictionaries. Keys are byte strings and
//! are kept sorted, so encoding is canonical.

use std::collections::BTreeMap;

use crate::domain::MessageError;

/// Maximum nesting of lists and dictionaries accepted by the decoder.
pub const MAX_DEPTH: usize = 32;

/// A bencode value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Byte string.
    Bytes(Vec<u8>),
    /// Signed integer.
    Int(i64),
    /// Ordered list.
    List(Vec<Value>),
    /// Nested dictionary.
    Dict(Dict),
}

/// Mapping of byte-string keys to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dict {
    entries: BTreeMap<Vec<u8>, Value>,
}

impl Dict {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key.as_bytes())
    }

    /// Byte-string field.
    pub fn get_bytes(&self, key: &str) -> Option<&[u8]> {
        match self.get(key)? {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Byte-string field viewed as UTF-8.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        std::str::from_utf8(self.get_bytes(key)?).ok()
    }

    /// Integer field.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Insert any value.
    pub fn put(&mut self, key: &str, value: Value) {
        self.entries.insert(key.as_bytes().to_vec(), value);
    }

    /// Insert a byte-string field.
    pub fn put_bytes(&mut self, key: &str, value: impl Into<Vec<u8>>) {
        self.put(key, Value::Bytes(value.into()));
    }

    /// Insert a text field.
    pub fn put_str(&mut self, key: &str, value: &str) {
        self.put_bytes(key, value.as_bytes());
    }

    /// Insert an integer field.
    pub fn put_int(&mut self, key: &str, value: i64) {
        self.put(key, Value::Int(value));
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bencode this dictionary.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        encode_dict(self, &mut out);
        out
    }

    /// Decode a bencoded dictionary, rejecting trailing bytes.
    pub fn decode(input: &[u8]) -> Result<Self, MessageError> {
        let mut decoder = Decoder { input, pos: 0 };
        let value = decoder.value(0)?;
        if decoder.pos != input.len() {
            return Err(MessageError::TrailingData(input.len() - decoder.pos));
        }
        match value {
            Value::Dict(d) => Ok(d),
            _ => Err(MessageError::NotADict),
        }
    }
}

fn encode_bytes(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(bytes.len().to_string().as_bytes());
    out.push(b':');
    out.extend_from_slice(bytes);
}

fn encode_value(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Bytes(b) => encode_bytes(b, out),
        Value::Int(i) => {
            out.push(b'i');
            out.extend_from_slice(i.to_string().as_bytes());
            out.push(b'e');
        }
        Value::List(items) => {
            out.push(b'l');
            for item in items {
                encode_value(item, out);
            }
            out.push(b'e');
        }
        Value::Dict(d) => encode_dict(d, out),
    }
}

fn encode_dict(dict: &Dict, out: &mut Vec<u8>) {
    out.push(b'd');
    for (key, value) in &dict.entries {
        encode_bytes(key, out);
        encode_value(value, out);
    }
    out.push(b'e');
}

struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Decoder<'_> {
    fn peek(&self) -> Result<u8, MessageError> {
        self.input
            .get(self.pos)
            .copied()
            .ok_or(MessageError::UnexpectedEof(self.pos))
    }

    fn expect(&mut self, byte: u8) -> Result<(), MessageError> {
        let got = self.peek()?;
        if got != byte {
            return Err(MessageError::UnexpectedByte {
                byte: got,
                pos: self.pos,
            });
        }
        self.pos += 1;
        Ok(())
    }

    /// Read digits (with optional leading '-') up to `end`, consuming `end`.
    fn number(&mut self, end: u8) -> Result<i64, MessageError> {
        let start = self.pos;
        let rest = &self.input[start..];
        let len = rest
            .iter()
            .position(|&b| b == end)
            .ok_or(MessageError::UnexpectedEof(self.input.len()))?;
        let text = std::str::from_utf8(&rest[..len]).map_err(|_| MessageError::InvalidNumber(start))?;
        if text.is_empty() || text.starts_with('+') {
            return Err(MessageError::InvalidNumber(start));
        }
        let n = text
            .parse::<i64>()
            .map_err(|_| MessageError::InvalidNumber(start))?;
        self.pos = start + len + 1;
        Ok(n)
    }

    fn bytes(&mut self) -> Result<Vec<u8>, MessageError> {
        let start = self.pos;
        let len = self.number(b':')?;
        let len = usize::try_from(len).map_err(|_| MessageError::InvalidNumber(start))?;
        let end = self
            .pos
            .checked_add(len)
            .filter(|&e| e <= self.input.len())
            .ok_or(MessageError::UnexpectedEof(self.input.len()))?;
        let out = self.input[self.pos..end].to_vec();
        self.pos = end;
        Ok(out)
    }

    fn value(&mut self, depth: usize) -> Result<Value, MessageError> {
        if depth > MAX_DEPTH {
            return Err(MessageError::TooDeep(MAX_DEPTH));
        }
        match self.peek()? {
            b'0'..=b'9' => Ok(Value::Bytes(self.bytes()?)),
            b'i' => {
                self.pos += 1;
                Ok(Value::Int(self.number(b'e')?))
            }
            b'l' => {
                self.pos += 1;
                let mut items = Vec::new();
                while self.peek()? != b'e' {
                    items.push(self.value(depth + 1)?);
                }
                self.expect(b'e')?;
                Ok(Value::List(items))
            }
            b'd' => {
                self.pos += 1;
                let mut dict = Dict::new();
                while self.peek()? != b'e' {
                    let key = self.bytes()?;
                    let value = self.value(depth + 1)?;
                    dict.entries.insert(key, value);
                }
                self.expect(b'e')?;
                Ok(Value::Dict(dict))
            }
            byte => Err(MessageError::UnexpectedByte {
                byte,
                pos: self.pos,
            }),
        }
    }
}
