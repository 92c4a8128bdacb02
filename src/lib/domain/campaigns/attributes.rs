//! Recipient attributes and campaign metadata

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{value::deserialize_fields, Value};

/// One addressee and the attributes available to templates as `User`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipient(
    #[serde(deserialize_with = "deserialize_fields")] BTreeMap<String, Value>,
);

impl Recipient {
    /// Key holding the destination address
    pub const EMAIL: &'static str = "email";

    /// Key holding the display name
    pub const USERNAME: &'static str = "username";

    /// Looks up an attribute
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// An attribute as text, empty if absent
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(Value::to_text).unwrap_or_default()
    }

    /// The destination address, empty if absent
    pub fn email(&self) -> String {
        self.text(Self::EMAIL)
    }

    /// The display name, empty if absent
    pub fn username(&self) -> String {
        self.text(Self::USERNAME)
    }

    /// Returns `true` if the recipient carries a non-null email attribute
    pub fn has_email(&self) -> bool {
        self.get(Self::EMAIL).is_some_and(|v| !v.is_null())
    }

    /// Iterates over the attributes in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Recipient {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Campaign-wide fields from the template's frontmatter, available to
/// templates as `Campaign`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignMetadata(
    #[serde(deserialize_with = "deserialize_fields")] BTreeMap<String, Value>,
);

impl CampaignMetadata {
    /// Key holding the subject line
    pub const SUBJECT: &'static str = "subject";

    /// Key holding the sender address
    pub const FROM: &'static str = "from";

    /// Looks up a field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// A field as text, empty if absent
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(Value::to_text).unwrap_or_default()
    }

    /// The subject line, empty if absent
    pub fn subject(&self) -> String {
        self.text(Self::SUBJECT)
    }

    /// The sender address, empty if absent
    pub fn sender(&self) -> String {
        self.text(Self::FROM)
    }

    /// Returns `true` if there are no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for CampaignMetadata {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
