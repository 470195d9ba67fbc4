//! Records encoded as dictionaries from an explicit field list.

use crate::constants::TAG_SEPARATOR;
use crate::error::EncodeError;
use crate::to_bencode::{collect_dict, ToBencode};
use crate::value::Value;
use bytes::Bytes;
use std::fmt;

/// One field of a record: its declared name, an optional annotation and the value.
///
/// The dictionary key is the first comma-separated segment of the annotation when
/// that segment is non-empty, otherwise the declared name. Anything after the first
/// comma is ignored.
///
/// ```
/// use bencode_encoder::Field;
///
/// let port = 6881u16;
/// assert_eq!(Field::new("Port", &port).key(), "Port");
/// assert_eq!(Field::new("Port", &port).tag("port").key(), "port");
/// assert_eq!(Field::new("Port", &port).tag(",omitempty").key(), "Port");
/// ```
#[derive(Clone, Copy)]
pub struct Field<'a> {
    name: &'static str,
    tag: &'static str,
    value: &'a dyn ToBencode,
}

impl<'a> Field<'a> {
    pub fn new<T: ToBencode>(name: &'static str, value: &'a T) -> Self {
        Self {
            name,
            tag: "",
            value,
        }
    }

    /// Attaches an annotation whose first segment renames the field.
    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> &'static str {
        match self.tag.split(TAG_SEPARATOR).next() {
            Some(rename) if !rename.is_empty() => rename,
            _ => self.name,
        }
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

impl Value {
    /// Builds a dictionary from a record's field list.
    ///
    /// Fields are emitted in key order whatever order they are listed in. Fields
    /// whose value is absent (`None`) are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::DuplicateKey`] if two fields resolve to the same key,
    /// or any error raised while converting a field value.
    pub fn from_fields<'a, I>(fields: I) -> Result<Value, EncodeError>
    where
        I: IntoIterator<Item = Field<'a>>,
    {
        collect_dict(
            fields
                .into_iter()
                .map(|field| (Bytes::from_static(field.key().as_bytes()), field.value)),
        )
    }
}

/// Implements [`ToBencode`] for a struct by listing the fields to encode.
///
/// Only the listed fields are visible in the output. A field may be renamed with
/// `as "annotation"`; the first comma-separated segment of the annotation becomes
/// the key, and an empty segment keeps the field's own name.
///
/// ```
/// use bencode_encoder::{bencode_record, encode};
///
/// struct Announce {
///     info_hash: String,
///     port: u16,
///     left: Option<u64>,
///     secret: String,
/// }
///
/// bencode_record!(Announce {
///     port,
///     info_hash as "info hash",
///     left,
/// });
///
/// let announce = Announce {
///     info_hash: "abc".into(),
///     port: 6881,
///     left: None,
///     secret: "hidden".into(),
/// };
/// assert_eq!(encode(&announce).unwrap(), b"d9:info hash3:abc4:porti6881ee");
/// ```
#[macro_export]
macro_rules! bencode_record {
    ($ty:ty { $($field:ident $(as $tag:literal)?),* $(,)? }) => {
        impl $crate::ToBencode for $ty {
            fn to_bencode(&self) -> ::core::result::Result<$crate::Value, $crate::EncodeError> {
                $crate::Value::from_fields([
                    $(
                        $crate::Field::new(::core::stringify!($field), &self.$field)
                            $(.tag($tag))?
                    ),*
                ])
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefers_non_empty_tag() {
        let v = 1i64;
        assert_eq!(Field::new("X", &v).key(), "X");
        assert_eq!(Field::new("X", &v).tag("x").key(), "x");
        assert_eq!(Field::new("X", &v).tag("x,omitempty").key(), "x");
        assert_eq!(Field::new("X", &v).tag("").key(), "X");
        assert_eq!(Field::new("X", &v).tag(",omitempty").key(), "X");
    }

    #[test]
    fn test_field_debug_omits_value() {
        let v = 1i64;
        let field = Field::new("X", &v).tag("x");
        assert_eq!(format!("{:?}", field), r#"Field { name: "X", tag: "x", .. }"#);
    }
}
