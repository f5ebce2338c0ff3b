use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::format::tiff::ByteOrder;

/// A formatted tag value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExifValue {
    /// Unsigned integer (byte, short, long) or an unmapped enumerated value
    Integer(u64),
    /// Derived result of a single rational
    Float(f64),
    /// Text, enumerated display strings and composite renderings
    Text(String),
}

impl ExifValue {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ExifValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ExifValue::Integer(v) => Some(*v as f64),
            ExifValue::Float(v) => Some(*v),
            ExifValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ExifValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ExifValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExifValue::Integer(v) => write!(f, "{}", v),
            ExifValue::Float(v) => write!(f, "{}", v),
            ExifValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ExifValue {
    fn from(v: u64) -> Self {
        ExifValue::Integer(v)
    }
}

impl From<f64> for ExifValue {
    fn from(v: f64) -> Self {
        ExifValue::Float(v)
    }
}

impl From<String> for ExifValue {
    fn from(s: String) -> Self {
        ExifValue::Text(s)
    }
}

impl From<&str> for ExifValue {
    fn from(s: &str) -> Self {
        ExifValue::Text(s.to_string())
    }
}

/// Result of a decode: tag name to formatted value.
///
/// Built once by [`decode`](crate::decode) and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ExifDataset {
    byte_order: ByteOrder,
    values: HashMap<String, ExifValue>,
}

impl ExifDataset {
    pub(crate) fn new(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            values: HashMap::new(),
        }
    }

    /// Later writes for the same name replace earlier ones.
    pub(crate) fn insert(&mut self, name: &str, value: ExifValue) -> Option<ExifValue> {
        self.values.insert(name.to_string(), value)
    }

    /// Byte order declared by the TIFF header.
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn get(&self, name: &str) -> Option<&ExifValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExifValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries sorted by tag name.
    pub fn sorted(&self) -> Vec<(&str, &ExifValue)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|&(name, _)| name);
        entries
    }
}

impl Serialize for ExifDataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.sorted())
    }
}
