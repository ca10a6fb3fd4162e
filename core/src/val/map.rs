use std::fmt;
use std::sync::Arc;

use crate::util::fast_map::{FastHashMap, fast_hash_map_new};

use super::{Kind, Val};

/// Hashable projection of the values that may key a map.
///
/// Integers of every width share one key space, so `1u8` and `1i64` address
/// the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Bool(bool),
    Int(i128),
    Str(Arc<str>),
}

impl MapKey {
    /// Returns `None` for kinds that cannot key a map.
    pub fn from_val(val: &Val) -> Option<MapKey> {
        match val {
            Val::Bool(b) => Some(MapKey::Bool(*b)),
            Val::Int(i) => Some(MapKey::Int(i.to_i128())),
            Val::Str(s) => Some(MapKey::Str(s.clone())),
            _ => None,
        }
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey::Str(Arc::from(s))
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        MapKey::Str(Arc::from(s))
    }
}

impl From<i64> for MapKey {
    fn from(i: i64) -> Self {
        MapKey::Int(i as i128)
    }
}

impl From<bool> for MapKey {
    fn from(b: bool) -> Self {
        MapKey::Bool(b)
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Bool(b) => write!(f, "{b}"),
            MapKey::Int(i) => write!(f, "{i}"),
            MapKey::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Associative map with a declared value kind and, optionally, a declared
/// key kind. `Kind::Any` keys accept every hashable value.
#[derive(Debug, Clone)]
pub struct MapVal {
    key_kind: Kind,
    value_kind: Kind,
    entries: FastHashMap<MapKey, Val>,
}

impl MapVal {
    pub fn new(value_kind: Kind) -> Self {
        Self {
            key_kind: Kind::Any,
            value_kind,
            entries: fast_hash_map_new(),
        }
    }

    /// Restricts lookups to keys of `key_kind` (`Bool`, `Str` or any `Int`
    /// width).
    pub fn with_key_kind(mut self, key_kind: Kind) -> Self {
        self.key_kind = key_kind;
        self
    }

    pub fn with_entries<K, V, I>(value_kind: Kind, entries: I) -> Self
    where
        K: Into<MapKey>,
        V: Into<Val>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new(value_kind);
        for (k, v) in entries {
            map.insert(k, v);
        }
        map
    }

    pub fn insert(&mut self, key: impl Into<MapKey>, value: impl Into<Val>) -> Option<Val> {
        self.entries.insert(key.into(), value.into())
    }

    #[inline]
    pub fn get(&self, key: &MapKey) -> Option<&Val> {
        self.entries.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &MapKey) -> bool {
        self.entries.contains_key(key)
    }

    #[inline]
    pub fn key_kind(&self) -> &Kind {
        &self.key_kind
    }

    /// Projects `key` into this map's key space. `None` when the value cannot
    /// key a map at all or does not match the declared key kind.
    pub fn key_for(&self, key: &Val) -> Option<MapKey> {
        let k = MapKey::from_val(key)?;
        let fits = matches!(
            (&self.key_kind, &k),
            (Kind::Any, _) | (Kind::Bool, MapKey::Bool(_)) | (Kind::Int(_), MapKey::Int(_)) | (Kind::Str, MapKey::Str(_))
        );
        fits.then_some(k)
    }

    #[inline]
    pub fn value_kind(&self) -> &Kind {
        &self.value_kind
    }

    /// Zero value returned for a key that has no entry.
    #[inline]
    pub fn missing(&self) -> Val {
        self.value_kind.zero()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MapKey, &Val)> {
        self.entries.iter()
    }

    /// Entries ordered by the rendered key, for deterministic output.
    pub fn sorted_entries(&self) -> Vec<(&MapKey, &Val)> {
        let mut out: Vec<_> = self.entries.iter().collect();
        out.sort_by_cached_key(|(k, _)| k.to_string());
        out
    }
}

impl PartialEq for MapVal {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
