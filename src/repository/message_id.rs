use std::fmt::Display;

use serde::{Deserialize, Deserializer};

/// Identifier of a single message as reported by the mail client.
///
/// The mail client sends these either as JSON strings or as integers; both are
/// kept in their textual form so that `42` and `"42"` name the same message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMessageId {
    Text(String),
    Integer(i64),
}

impl<'de> Deserialize<'de> for MessageId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawMessageId::deserialize(deserializer)? {
            RawMessageId::Text(text) => Self(text),
            RawMessageId::Integer(number) => Self(number.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use assertables::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case(r#""m1""#, "m1")]
    #[case("42", "42")]
    #[case(r#""42""#, "42")]
    fn test_message_id_deserializes_from_string_or_integer(
        #[case] json: &str,
        #[case] expected: &str,
    ) {
        let id: MessageId = assert_ok!(serde_json::from_str(json));
        assert_eq!(MessageId::from(expected), id);
        assert_eq!(expected, id.to_string());
    }

    #[rstest]
    #[case("null")]
    #[case("1.5")]
    #[case("[]")]
    fn test_message_id_rejects_other_json_values(#[case] json: &str) {
        assert_err!(serde_json::from_str::<MessageId>(json));
    }
}
