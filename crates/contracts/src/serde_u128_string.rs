use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(value: &u128, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum U128Input {
        String(String),
        Number(u64),
    }

    match U128Input::deserialize(deserializer)? {
        U128Input::String(raw) => raw.parse::<u128>().map_err(D::Error::custom),
        U128Input::Number(value) => Ok(u128::from(value)),
    }
}
