use serde::{Deserialize, Deserializer};

/// Tell an absent field (`None`) from an explicit `null` (`Some(None)`).
/// Pair with `#[serde(default)]`.
pub fn double_option<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
