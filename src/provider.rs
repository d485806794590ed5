use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

use crate::{bitbucket, event::PushEvent, github};

/// Hosting platform a push hook came from, selected by route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    GitHub,
    BitBucket,
}

#[derive(Debug, thiserror::Error)]
#[error("malformed {provider} push payload: {source}")]
pub struct MalformedPayload {
    pub provider: Provider,
    #[source]
    pub source: serde_json::Error,
}

impl Provider {
    /// Display name, used as the notification title.
    pub fn who(self) -> &'static str {
        match self {
            Provider::GitHub => "GitHub",
            Provider::BitBucket => "BitBucket",
        }
    }

    /// Decodes a raw push payload into the canonical event.
    ///
    /// Keys match case-insensitively and a repeated key keeps its last
    /// value. Absent fields, `null` fields and a top-level `null` become
    /// empty values; only JSON that fails to parse or has the wrong shape
    /// (e.g. a string where commits are expected) is rejected.
    pub fn normalize(self, raw: &[u8]) -> Result<PushEvent, MalformedPayload> {
        let decoded = serde_json::from_slice(raw)
            .map(fold_keys)
            .and_then(|value| match self {
                Provider::GitHub => decode::<github::PushPayload>(value),
                Provider::BitBucket => decode::<bitbucket::PushPayload>(value),
            });
        decoded.map_err(|source| MalformedPayload {
            provider: self,
            source,
        })
    }
}

fn decode<P>(value: Value) -> serde_json::Result<PushEvent>
where
    P: DeserializeOwned + Into<PushEvent>,
{
    serde_json::from_value::<Option<P>>(value)
        .map(|payload| payload.map(Into::into).unwrap_or_default())
}

/// Lower-cases every object key, keeping document order so that the last
/// of several keys differing only in case wins.
fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), fold_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.who())
    }
}

/// Treats an explicit `null` like an absent field.
pub(crate) fn nullable<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(de).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_json() {
        for provider in [Provider::GitHub, Provider::BitBucket].iter().copied() {
            let err = provider.normalize(b"{not json").unwrap_err();
            assert_eq!(err.provider, provider);
        }
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(Provider::GitHub
            .normalize(br#"{"commits":"three"}"#)
            .is_err());
        assert!(Provider::BitBucket.normalize(b"[1, 2]").is_err());
    }

    #[test]
    fn empty_object_is_an_empty_event() {
        let event = Provider::BitBucket.normalize(b"{}").unwrap();
        assert_eq!(event, PushEvent::default());
    }

    #[test]
    fn top_level_null_is_an_empty_event() {
        for provider in [Provider::GitHub, Provider::BitBucket].iter().copied() {
            assert_eq!(provider.normalize(b"null").unwrap(), PushEvent::default());
        }
    }

    #[test]
    fn keys_match_case_insensitively() {
        let event = Provider::BitBucket
            .normalize(br#"{"USER":"marcus","Repository":{"SLUG":"x","Owner":"o"}}"#)
            .unwrap();
        assert_eq!(event.pusher_name, "marcus");
        assert_eq!(event.repo_name, "x");
        assert_eq!(event.repo_owner, "o");
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let event = Provider::GitHub
            .normalize(br#"{"pusher":{"name":"first","Name":"second"}}"#)
            .unwrap();
        assert_eq!(event.pusher_name, "second");

        let event = Provider::GitHub
            .normalize(br#"{"pusher":{"Name":"first","name":"second"}}"#)
            .unwrap();
        assert_eq!(event.pusher_name, "second");
    }

    #[test]
    fn provider_names() {
        assert_eq!(Provider::GitHub.who(), "GitHub");
        assert_eq!(Provider::BitBucket.to_string(), "BitBucket");
    }
}
