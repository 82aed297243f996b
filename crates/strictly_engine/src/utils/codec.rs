//! Explicit wire formats for containers JSON cannot express directly.
//!
//! Use with `#[serde(with = "...")]` on board fields:
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use std::collections::BTreeMap;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Board {
//!     #[serde(with = "strictly_engine::utils::codec::pairs")]
//!     owners: BTreeMap<String, usize>,
//! }
//!
//! let mut owners = BTreeMap::new();
//! owners.insert("b2".to_string(), 1);
//! let json = serde_json::to_string(&Board { owners }).unwrap();
//! assert_eq!(json, r#"{"owners":[["b2",1]]}"#);
//! ```

/// Ordered map ⇄ array of `[key, value]` pairs.
///
/// Keys need not be strings, and a duplicate key on input is an error
/// rather than a silent overwrite.
pub mod pairs {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    /// Writes the map as a sequence of pairs in key order.
    pub fn serialize<K, V, S>(map: &BTreeMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        K: Serialize,
        V: Serialize,
        S: Serializer,
    {
        serializer.collect_seq(map.iter())
    }

    /// Reads a sequence of pairs back into a map.
    pub fn deserialize<'de, K, V, D>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
    where
        K: Deserialize<'de> + Ord,
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let pairs = Vec::<(K, V)>::deserialize(deserializer)?;
        let expected = pairs.len();
        let map: BTreeMap<K, V> = pairs.into_iter().collect();
        if map.len() != expected {
            return Err(D::Error::custom("duplicate key in pair list"));
        }
        Ok(map)
    }
}

/// Hash set ⇄ sorted array, so serialized state is byte-stable.
pub mod sorted_set {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashSet;
    use std::hash::Hash;

    /// Writes the set as an ascending array.
    pub fn serialize<T, S>(set: &HashSet<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize + Ord,
        S: Serializer,
    {
        let mut items: Vec<&T> = set.iter().collect();
        items.sort();
        serializer.collect_seq(items)
    }

    /// Reads an array back into a set.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<HashSet<T>, D::Error>
    where
        T: Deserialize<'de> + Eq + Hash,
        D: Deserializer<'de>,
    {
        Ok(Vec::<T>::deserialize(deserializer)?.into_iter().collect())
    }
}
