use crate::error::EncodeError;
use crate::value::Value;
use bytes::{Bytes, BytesMut};
use std::any::type_name;
use std::borrow::Cow;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

/// A type that can be converted into a bencode [`Value`].
///
/// Implementations exist for integers, strings, byte buffers, sequences, maps with
/// string-like keys, and common pointer types. Records implement it through
/// [`Value::from_fields`], usually via the [`bencode_record!`](crate::bencode_record)
/// macro.
///
/// # Byte strings
///
/// `u8` is an integer, so a bare `Vec<u8>`, `[u8; N]` or `[u8]` encodes as a
/// *list of integers*: `b"abc".to_vec()` becomes `li97ei98ei99ee`. Wrap raw bytes
/// in [`ByteStr`], or use [`Bytes`], to get the length-prefixed form `3:abc`.
///
/// ```
/// use bencode_encoder::{encode, ByteStr};
///
/// let raw = b"abc".to_vec();
/// assert_eq!(encode(&ByteStr(&raw)).unwrap(), b"3:abc");
/// assert_eq!(encode(&raw).unwrap(), b"li97ei98ei99ee");
/// ```
///
/// # Examples
///
/// ```
/// use bencode_encoder::{encode, EncodeError, Field, ToBencode, Value};
///
/// struct Peer {
///     ip: String,
///     port: u16,
/// }
///
/// impl ToBencode for Peer {
///     fn to_bencode(&self) -> Result<Value, EncodeError> {
///         Value::from_fields([
///             Field::new("port", &self.port),
///             Field::new("ip", &self.ip),
///         ])
///     }
/// }
///
/// let peer = Peer { ip: "10.0.0.1".into(), port: 6881 };
/// assert_eq!(encode(&peer).unwrap(), b"d2:ip8:10.0.0.14:porti6881ee");
/// ```
pub trait ToBencode {
    fn to_bencode(&self) -> Result<Value, EncodeError>;

    /// Returns `true` if the value should be left out of an enclosing dictionary.
    fn is_absent(&self) -> bool {
        false
    }
}

/// A string-like type usable as a dictionary key.
pub trait DictKey {
    fn to_key(&self) -> Bytes;
}

/// Marks a byte container as a bencode byte string.
///
/// A bare `Vec<u8>` or `[u8]` encodes as a list of integers, one per byte.
/// Wrapping it in `ByteStr` emits it as a single length-prefixed byte string.
///
/// ```
/// use bencode_encoder::{encode, ByteStr};
///
/// assert_eq!(encode(&ByteStr(b"abc")).unwrap(), b"3:abc");
/// assert_eq!(encode(&vec![1u8, 2]).unwrap(), b"li1ei2ee");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteStr<T>(pub T);

/// Builds a dictionary from `(key, value)` pairs.
///
/// Absent values are dropped. A key seen twice is an error, even when one of the
/// two values is absent.
pub(crate) fn collect_dict<'a, I>(pairs: I) -> Result<Value, EncodeError>
where
    I: IntoIterator<Item = (Bytes, &'a dyn ToBencode)>,
{
    let mut entries: BTreeMap<Bytes, Option<Value>> = BTreeMap::new();

    for (key, value) in pairs {
        match entries.entry(key) {
            Entry::Occupied(entry) => {
                let key = String::from_utf8_lossy(entry.key()).into_owned();
                debug!("rejecting dictionary with duplicate key {:?}", key);
                return Err(EncodeError::DuplicateKey(key));
            }
            Entry::Vacant(entry) => {
                let converted = if value.is_absent() {
                    None
                } else {
                    Some(value.to_bencode()?)
                };
                entry.insert(converted);
            }
        }
    }

    Ok(Value::Dict(
        entries
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect(),
    ))
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl ToBencode for $ty {
                fn to_bencode(&self) -> Result<Value, EncodeError> {
                    // lossless: every type here fits in i128
                    Ok(Value::Integer(*self as i128))
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ToBencode for i128 {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Integer(*self))
    }
}

impl ToBencode for u128 {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        i128::try_from(*self)
            .map(Value::Integer)
            .map_err(|_| EncodeError::UnsupportedType(type_name::<Self>()))
    }
}

impl ToBencode for str {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        Ok(Value::string(self))
    }
}

impl ToBencode for String {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        self.as_str().to_bencode()
    }
}

impl ToBencode for Cow<'_, str> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        self.as_ref().to_bencode()
    }
}

impl ToBencode for Bytes {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Bytes(self.clone()))
    }
}

impl ToBencode for BytesMut {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Bytes(Bytes::copy_from_slice(self)))
    }
}

impl<T: AsRef<[u8]>> ToBencode for ByteStr<T> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Bytes(Bytes::copy_from_slice(self.0.as_ref())))
    }
}

/// Clones the tree. [`Encoder::encode_value`](crate::Encoder::encode_value) writes a
/// `Value` without the copy.
impl ToBencode for Value {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        Ok(self.clone())
    }
}

impl<T: ToBencode> ToBencode for [T] {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        self.iter()
            .map(ToBencode::to_bencode)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    }
}

impl<T: ToBencode, const N: usize> ToBencode for [T; N] {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        self.as_slice().to_bencode()
    }
}

impl<T: ToBencode> ToBencode for Vec<T> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        self.as_slice().to_bencode()
    }
}

impl<T: ToBencode> ToBencode for VecDeque<T> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        self.iter()
            .map(ToBencode::to_bencode)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    }
}

impl<K: DictKey, V: ToBencode> ToBencode for BTreeMap<K, V> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        collect_dict(self.iter().map(|(k, v)| (k.to_key(), v as &dyn ToBencode)))
    }
}

impl<K: DictKey, V: ToBencode, S> ToBencode for HashMap<K, V, S> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        collect_dict(self.iter().map(|(k, v)| (k.to_key(), v as &dyn ToBencode)))
    }
}

impl<T: ToBencode> ToBencode for Option<T> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        match self {
            Some(value) => value.to_bencode(),
            None => Err(EncodeError::UnsupportedType(type_name::<Self>())),
        }
    }

    fn is_absent(&self) -> bool {
        self.as_ref().map_or(true, ToBencode::is_absent)
    }
}

impl<T: ToBencode + ?Sized> ToBencode for &T {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        (**self).to_bencode()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: ToBencode + ?Sized> ToBencode for Box<T> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        (**self).to_bencode()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: ToBencode + ?Sized> ToBencode for Rc<T> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        (**self).to_bencode()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: ToBencode + ?Sized> ToBencode for Arc<T> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        (**self).to_bencode()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl DictKey for str {
    fn to_key(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }
}

impl DictKey for String {
    fn to_key(&self) -> Bytes {
        self.as_str().to_key()
    }
}

impl DictKey for Cow<'_, str> {
    fn to_key(&self) -> Bytes {
        self.as_ref().to_key()
    }
}

impl DictKey for Bytes {
    fn to_key(&self) -> Bytes {
        self.clone()
    }
}

impl<T: AsRef<[u8]>> DictKey for ByteStr<T> {
    fn to_key(&self) -> Bytes {
        Bytes::copy_from_slice(self.0.as_ref())
    }
}

impl<K: DictKey + ?Sized> DictKey for &K {
    fn to_key(&self) -> Bytes {
        (**self).to_key()
    }
}

impl<K: DictKey + ?Sized> DictKey for Box<K> {
    fn to_key(&self) -> Bytes {
        (**self).to_key()
    }
}

impl<K: DictKey + ?Sized> DictKey for Rc<K> {
    fn to_key(&self) -> Bytes {
        (**self).to_key()
    }
}

impl<K: DictKey + ?Sized> DictKey for Arc<K> {
    fn to_key(&self) -> Bytes {
        (**self).to_key()
    }
}
