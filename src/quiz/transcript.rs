use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
}

impl TranscriptEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A prior transcript item in any of the shapes callers hand us.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum TranscriptItem {
    /// A `(user, bot)` exchange. Listed first so that `["user", "hi"]` is
    /// read as a pair rather than as a struct in sequence form.
    Pair(Value, Value),
    /// Already in `{role, content}` form.
    Message(TranscriptEntry),
    /// Anything else; kept as an assistant line.
    Bare(Value),
}

impl TranscriptItem {
    pub fn into_entries(self) -> Vec<TranscriptEntry> {
        match self {
            TranscriptItem::Message(entry) => vec![entry],
            TranscriptItem::Pair(user, bot) => vec![
                TranscriptEntry::user(display_value(user)),
                TranscriptEntry::assistant(display_value(bot)),
            ],
            TranscriptItem::Bare(value) => vec![TranscriptEntry::assistant(display_value(value))],
        }
    }
}

impl From<TranscriptEntry> for TranscriptItem {
    fn from(entry: TranscriptEntry) -> Self {
        TranscriptItem::Message(entry)
    }
}

impl From<(String, String)> for TranscriptItem {
    fn from((user, bot): (String, String)) -> Self {
        TranscriptItem::Pair(Value::String(user), Value::String(bot))
    }
}

impl From<String> for TranscriptItem {
    fn from(text: String) -> Self {
        TranscriptItem::Bare(Value::String(text))
    }
}

impl From<&str> for TranscriptItem {
    fn from(text: &str) -> Self {
        TranscriptItem::Bare(Value::String(text.to_string()))
    }
}

// Strings are taken verbatim; everything else in its JSON text form.
fn display_value(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Flattens mixed-shape items into canonical entries, keeping their order.
pub fn normalize_transcript<I>(items: I) -> Vec<TranscriptEntry>
where
    I: IntoIterator,
    I::Item: Into<TranscriptItem>,
{
    items
        .into_iter()
        .flat_map(|item| item.into().into_entries())
        .collect()
}
