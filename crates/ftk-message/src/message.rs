use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use ftk_maybe::Maybe;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::property::{fold_key, merge_properties, MergePolicy, Property};
use crate::severity::Severity;

/// Opaque state attached to a message.
///
/// Ownership is shared with the caller; the message stores the handle and
/// never inspects or mutates what it points at. Thread-safety of the payload
/// itself is the caller's responsibility.
pub type StateRef = Arc<dyn Any + Send + Sync>;

/// An immutable structured message.
///
/// A `Message` is simultaneously a fixed record (timestamp, severity, text,
/// optional event name, optional opaque state) and a read-only ordered map
/// over its properties. Both views are sourced from the same backing list,
/// so they cannot diverge: iterate `&Message` for the ordered pairs, call
/// [`get_property`](Message::get_property) for keyed lookup.
///
/// All fields are fixed at construction. Every `with_*` operation returns a
/// new instance and leaves the original untouched.
#[derive(Clone, Serialize, Deserialize)]
pub struct Message {
    timestamp: DateTime<FixedOffset>,
    severity: Severity,
    text: String,
    event_name: Maybe<String>,
    // Opaque attachments do not travel; deserialized messages come back
    // with no state.
    #[serde(skip)]
    state: Maybe<StateRef>,
    properties: Vec<Property>,
}

impl Message {
    /// A message with no event name, no state, and no properties.
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        severity: Severity,
        text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            severity,
            text: text.into(),
            event_name: Maybe::absent(),
            state: Maybe::absent(),
            properties: Vec::new(),
        }
    }

    /// Start building a message with all optional parts.
    pub fn builder(
        timestamp: DateTime<FixedOffset>,
        severity: Severity,
        text: impl Into<String>,
    ) -> MessageBuilder {
        MessageBuilder {
            message: Self::new(timestamp, severity, text),
        }
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn event_name(&self) -> Maybe<&str> {
        self.event_name.as_ref().map(String::as_str)
    }

    /// The attached state handle, if any. Cloning the handle shares
    /// ownership; it never copies the payload.
    pub fn state(&self) -> Maybe<StateRef> {
        self.state.clone()
    }

    /// The ordered property list. Keys are unique under case-insensitive
    /// comparison whenever the list was produced by this crate's operations.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// The property names in list order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }

    /// Same message with a different timestamp.
    pub fn with_timestamp(&self, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            timestamp,
            ..self.clone()
        }
    }

    /// Same message with a different severity.
    pub fn with_severity(&self, severity: Severity) -> Self {
        Self {
            severity,
            ..self.clone()
        }
    }

    /// Same message with different text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    /// Same message with the event name set.
    pub fn with_event_name(&self, event_name: impl Into<String>) -> Self {
        Self {
            event_name: Maybe::present(event_name.into()),
            ..self.clone()
        }
    }

    /// Same message with the event name cleared.
    pub fn without_event_name(&self) -> Self {
        Self {
            event_name: Maybe::absent(),
            ..self.clone()
        }
    }

    /// Same message with the state handle set.
    pub fn with_state(&self, state: StateRef) -> Self {
        Self {
            state: Maybe::present(state),
            ..self.clone()
        }
    }

    /// Same message with the state handle cleared.
    pub fn without_state(&self) -> Self {
        Self {
            state: Maybe::absent(),
            ..self.clone()
        }
    }

    /// Upsert a single property against the current list.
    ///
    /// Uses the same case-insensitive key comparison as the merge engine:
    /// an existing key keeps its position and takes the new pair (name
    /// casing included); a new key appends.
    pub fn with_property(&self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let property = Property::new(name, value);
        let key = property.key();
        let mut properties = self.properties.clone();
        match properties.iter().position(|p| p.key() == key) {
            Some(at) => properties[at] = property,
            None => properties.push(property),
        }
        Self {
            properties,
            ..self.clone()
        }
    }

    /// Combine an incoming property list with the current one under the
    /// given [`MergePolicy`].
    pub fn with_properties(
        &self,
        incoming: impl IntoIterator<Item = Property>,
        policy: MergePolicy,
    ) -> Self {
        Self {
            properties: merge_properties(&self.properties, incoming, policy),
            ..self.clone()
        }
    }

    /// Keyed lookup over the property list, case-insensitive. Present with
    /// a clone of the stored value when the key exists, absent otherwise.
    pub fn get_property(&self, name: &str) -> Maybe<Value> {
        let key = fold_key(name);
        Maybe::from_nullable(
            self.properties
                .iter()
                .find(|p| p.key() == key)
                .map(|p| p.value.clone()),
        )
    }

    /// Generic copy: override any subset of fields in one derivation.
    pub fn update(&self) -> MessageUpdate<'_> {
        MessageUpdate {
            source: self,
            timestamp: None,
            severity: None,
            text: None,
            event_name: None,
            state: None,
            properties: None,
        }
    }
}

impl PartialEq for Message {
    /// Structural on every field except `state`, which is opaque and
    /// compares by handle identity (two absent states are equal).
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
            && self.severity == other.severity
            && self.text == other.text
            && self.event_name == other.event_name
            && state_eq(&self.state, &other.state)
            && self.properties == other.properties
    }
}

fn state_eq(a: &Maybe<StateRef>, b: &Maybe<StateRef>) -> bool {
    match (a, b) {
        (Maybe::Absent, Maybe::Absent) => true,
        (Maybe::Present(x), Maybe::Present(y)) => Arc::ptr_eq(x, y),
        _ => false,
    }
}

/// The ordered list view: iterating a message yields its property pairs in
/// list order, the same pairs [`Message::get_property`] resolves.
impl<'a> IntoIterator for &'a Message {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("timestamp", &self.timestamp)
            .field("severity", &self.severity)
            .field("text", &self.text)
            .field("event_name", &self.event_name)
            .field("has_state", &self.state.is_present())
            .field("properties", &self.properties)
            .finish()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.timestamp.to_rfc3339(),
            self.severity,
            self.text
        )?;
        if let Maybe::Present(event_name) = &self.event_name {
            write!(f, " <{event_name}>")?;
        }
        for property in &self.properties {
            write!(f, " {property}")?;
        }
        Ok(())
    }
}

/// Builder for constructing a [`Message`] with all optional parts in one go.
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    pub fn event_name(mut self, event_name: impl Into<String>) -> Self {
        self.message.event_name = Maybe::present(event_name.into());
        self
    }

    pub fn state(mut self, state: StateRef) -> Self {
        self.message.state = Maybe::present(state);
        self
    }

    /// Add one property, upserting under case-insensitive comparison.
    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.message = self.message.with_property(name, value);
        self
    }

    /// Replace the whole property list.
    pub fn properties(mut self, properties: Vec<Property>) -> Self {
        self.message.properties = properties;
        self
    }

    pub fn finish(self) -> Message {
        self.message
    }
}

/// One-shot derivation of a new [`Message`] from a source, overriding any
/// subset of fields. Fields without an override are copied from the source
/// unchanged, properties included.
pub struct MessageUpdate<'a> {
    source: &'a Message,
    timestamp: Option<DateTime<FixedOffset>>,
    severity: Option<Severity>,
    text: Option<String>,
    event_name: Option<Maybe<String>>,
    state: Option<Maybe<StateRef>>,
    properties: Option<(Vec<Property>, MergePolicy)>,
}

impl MessageUpdate<'_> {
    pub fn timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn event_name(mut self, event_name: impl Into<String>) -> Self {
        self.event_name = Some(Maybe::present(event_name.into()));
        self
    }

    pub fn clear_event_name(mut self) -> Self {
        self.event_name = Some(Maybe::absent());
        self
    }

    pub fn state(mut self, state: StateRef) -> Self {
        self.state = Some(Maybe::present(state));
        self
    }

    pub fn clear_state(mut self) -> Self {
        self.state = Some(Maybe::absent());
        self
    }

    /// Replace the property list wholesale (a [`MergePolicy::Set`] merge).
    pub fn properties(mut self, properties: Vec<Property>) -> Self {
        self.properties = Some((properties, MergePolicy::Set));
        self
    }

    /// Combine an incoming list with the source's properties under `policy`.
    pub fn merge_properties(
        mut self,
        incoming: impl IntoIterator<Item = Property>,
        policy: MergePolicy,
    ) -> Self {
        self.properties = Some((incoming.into_iter().collect(), policy));
        self
    }

    pub fn apply(self) -> Message {
        let properties = match self.properties {
            Some((incoming, policy)) => {
                merge_properties(&self.source.properties, incoming, policy)
            }
            None => self.source.properties.clone(),
        };
        Message {
            timestamp: self.timestamp.unwrap_or(self.source.timestamp),
            severity: self.severity.unwrap_or(self.source.severity),
            text: self.text.unwrap_or_else(|| self.source.text.clone()),
            event_name: self
                .event_name
                .unwrap_or_else(|| self.source.event_name.clone()),
            state: self.state.unwrap_or_else(|| self.source.state.clone()),
            properties,
        }
    }
}
