//! bencode-encoder - canonical bencode serialization ([BEP-3])
//!
//! Bencode is the self-delimiting format BitTorrent uses for `.torrent` files,
//! tracker responses and peer metadata exchange. This crate only encodes; every
//! value has exactly one encoding, so equal values always produce equal bytes.
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `-10` → `i-10e` |
//! | Byte String | `<length>:<data>` | `"test"` → `4:test` |
//! | List | `l<items>e` | `[1, 2, 3]` → `li1ei2ei3ee` |
//! | Dictionary | `d<key><value>...e` | `{"a": "b"}` → `d1:a1:be` |
//!
//! Dictionary keys are always written in ascending byte order, whatever order the
//! source map iterates in or a record lists its fields in.
//!
//! # Examples
//!
//! ```
//! use bencode_encoder::{bencode_record, encode, ByteStr, Encoder};
//!
//! assert_eq!(encode(&0).unwrap(), b"i0e");
//! assert_eq!(encode("test").unwrap(), b"4:test");
//! assert_eq!(encode(&ByteStr(b"abc")).unwrap(), b"3:abc");
//! assert_eq!(encode(&vec![1, 2, 3]).unwrap(), b"li1ei2ei3ee");
//!
//! struct Point {
//!     z: String,
//!     x: i64,
//!     y: i64,
//! }
//!
//! bencode_record!(Point { z as "Z", x as "X", y as "Y" });
//!
//! let point = Point { z: "hello".into(), x: 1, y: 2 };
//! let mut encoder = Encoder::new(Vec::new());
//! encoder.encode(&point).unwrap();
//! assert_eq!(encoder.into_inner(), b"d1:Xi1e1:Yi2e1:Z5:helloe");
//! ```
//!
//! # Error Handling
//!
//! - [`EncodeError::UnsupportedType`] - A value has no bencode form (e.g. a bare `None`)
//! - [`EncodeError::DuplicateKey`] - Two dictionary entries share a key
//! - [`EncodeError::NestingTooDeep`] - Nesting exceeds a limit set with [`Encoder::with_max_depth`]
//! - [`EncodeError::Write`] - The output sink failed
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod constants;
mod encode;
mod error;
mod record;
mod to_bencode;
mod value;

pub use encode::{encode, encode_to, Encoder};
pub use error::EncodeError;
pub use record::Field;
pub use to_bencode::{ByteStr, DictKey, ToBencode};
pub use value::Value;
