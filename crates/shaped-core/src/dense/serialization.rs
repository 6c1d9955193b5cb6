//! Serde support (feature `serde`)
//!
//! An array encodes as `{ "shape": [..], "scalars": [..] }`. Decoding checks
//! the scalar count against the shape, so a decoded array always upholds the
//! buffer-length invariant.

use super::types::ShapedArray;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize)]
struct ArrayRef<'a, T> {
    shape: &'a [usize],
    scalars: &'a [T],
}

#[derive(Deserialize)]
struct ArrayOwned<T> {
    shape: Vec<usize>,
    scalars: Vec<T>,
}

impl<T: Serialize> Serialize for ShapedArray<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ArrayRef {
            shape: self.shape(),
            scalars: self.scalars(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ShapedArray<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ArrayOwned { shape, scalars } = ArrayOwned::deserialize(deserializer)?;
        ShapedArray::from_vec(scalars, &shape).map_err(serde::de::Error::custom)
    }
}
