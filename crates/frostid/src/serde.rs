use ::serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::SnowflakeId;

impl Serialize for SnowflakeId {
    /// Serializes the ID as its native `i64` representation.
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_raw().serialize(s)
    }
}

impl<'de> Deserialize<'de> for SnowflakeId {
    /// Deserializes an ID from its native `i64` representation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The value falls outside the packable range (negative or beyond
    ///   [`SnowflakeId::MAX`])
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(d)?;
        let id = SnowflakeId::from_raw(raw);
        if !id.is_valid() {
            return Err(::serde::de::Error::custom(format_args!(
                "snowflake id out of range: {raw}"
            )));
        }
        Ok(id)
    }
}
