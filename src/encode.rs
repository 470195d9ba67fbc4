use crate::error::EncodeError;
use crate::to_bencode::ToBencode;
use crate::value::Value;
use std::io::Write;
use tracing::{debug, trace};

/// Writes bencoded values to an output sink.
///
/// Every token is written to the sink as soon as it is produced; the encoder does
/// not buffer whole values. Wrap the sink in a [`std::io::BufWriter`] if many small
/// writes are costly.
///
/// # Examples
///
/// ```
/// use bencode_encoder::Encoder;
///
/// let mut encoder = Encoder::new(Vec::new());
/// encoder.encode(&0).unwrap();
/// encoder.encode(&-10).unwrap();
/// encoder.encode("test").unwrap();
/// encoder.encode(&[1, 2, 3]).unwrap();
/// assert_eq!(encoder.into_inner(), b"i0ei-10e4:testli1ei2ei3ee");
/// ```
#[derive(Debug)]
pub struct Encoder<W> {
    writer: W,
    max_depth: Option<usize>,
}

impl<W: Write> Encoder<W> {
    /// Creates an encoder with no nesting limit.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            max_depth: None,
        }
    }

    /// Limits how many lists and dictionaries may be nested inside one another.
    ///
    /// Values nested deeper are rejected with [`EncodeError::NestingTooDeep`]
    /// before anything is written. The check walks the tree without recursion,
    /// so with a limit set, [`encode_value`](Self::encode_value) never recurses
    /// deeper than the limit. Conversion through [`ToBencode`] happens before
    /// the check and is not bounded by it.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Converts `value` and writes it to the sink.
    ///
    /// The value is converted and checked before the first byte is written, so
    /// conversion and depth errors leave the sink untouched.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::UnsupportedType`] and [`EncodeError::DuplicateKey`] from conversion
    /// - [`EncodeError::NestingTooDeep`] if a depth limit is set and exceeded
    /// - [`EncodeError::Write`] if the sink fails; the sink may then hold a truncated value
    pub fn encode<T: ToBencode + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        let value = value
            .to_bencode()
            .inspect_err(|e| debug!("bencode conversion failed: {}", e))?;
        self.encode_value(&value)
    }

    /// Writes an already built [`Value`] without copying it.
    ///
    /// ```
    /// use bencode_encoder::{Encoder, Value};
    ///
    /// let value = Value::List(vec![Value::Integer(1), Value::string("two")]);
    /// let mut encoder = Encoder::new(Vec::new());
    /// encoder.encode_value(&value).unwrap();
    /// assert_eq!(encoder.into_inner(), b"li1e3:twoe");
    /// ```
    pub fn encode_value(&mut self, value: &Value) -> Result<(), EncodeError> {
        if let Some(max_depth) = self.max_depth {
            check_depth(value, max_depth)
                .inspect_err(|_| debug!("value nested deeper than {} levels", max_depth))?;
        }

        trace!("encoding {} value", value.kind());
        self.write_value(value)
            .inspect_err(|e| debug!("bencode output aborted: {}", e))
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_value(&mut self, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Integer(i) => {
                write!(self.writer, "i{}e", i)?;
            }
            Value::Bytes(b) => {
                self.write_bytes(b)?;
            }
            Value::List(l) => {
                self.writer.write_all(b"l")?;
                for item in l {
                    self.write_value(item)?;
                }
                self.writer.write_all(b"e")?;
            }
            Value::Dict(d) => {
                self.writer.write_all(b"d")?;
                for (key, val) in d {
                    self.write_bytes(key)?;
                    self.write_value(val)?;
                }
                self.writer.write_all(b"e")?;
            }
        }
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        write!(self.writer, "{}:", bytes.len())?;
        self.writer.write_all(bytes)?;
        Ok(())
    }
}

fn check_depth(value: &Value, max_depth: usize) -> Result<(), EncodeError> {
    let mut pending = vec![(value, 0usize)];

    while let Some((value, depth)) = pending.pop() {
        if matches!(value, Value::Integer(_) | Value::Bytes(_)) {
            continue;
        }
        if depth >= max_depth {
            return Err(EncodeError::NestingTooDeep);
        }
        match value {
            Value::List(l) => pending.extend(l.iter().map(|item| (item, depth + 1))),
            Value::Dict(d) => pending.extend(d.values().map(|item| (item, depth + 1))),
            Value::Integer(_) | Value::Bytes(_) => {}
        }
    }

    Ok(())
}

/// Encodes a value to a byte vector.
///
/// # Examples
///
/// ```
/// use bencode_encoder::encode;
/// use std::collections::HashMap;
///
/// let map: HashMap<&str, &str> = [("a", "b"), ("x", "y"), ("i", "j")].into();
/// assert_eq!(encode(&map).unwrap(), b"d1:a1:b1:i1:j1:x1:ye");
/// ```
pub fn encode<T: ToBencode + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = Encoder::new(Vec::new());
    encoder.encode(value)?;
    Ok(encoder.into_inner())
}

/// Encodes a value straight into `writer`.
pub fn encode_to<W, T>(writer: W, value: &T) -> Result<(), EncodeError>
where
    W: Write,
    T: ToBencode + ?Sized,
{
    Encoder::new(writer).encode(value)
}
