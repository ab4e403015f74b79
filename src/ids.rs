use serde::{Deserialize, Deserializer};

/// Row identifier, as issued by `INTEGER PRIMARY KEY AUTOINCREMENT`.
pub type Id = i64;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(Id),
    Text(String),
}

/// Reads an id sent either as a JSON number or as a numeric string.
/// Blank strings and `null` read as absent.
pub fn flexible<'de, D>(deserializer: D) -> Result<Option<Id>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(id)),
        Some(RawId::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawId::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid id {text:?}"))),
    }
}
