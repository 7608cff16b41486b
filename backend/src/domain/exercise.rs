//! Exercise records and the outcomes of owner-scoped mutations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Username;

/// Keys callers may never set through attributes.
///
/// They are stripped from create, edit and clone payloads before anything
/// is stored or merged, so ownership and completion state can only change
/// through their dedicated operations.
pub const RESERVED_ATTRIBUTE_KEYS: [&str; 4] = ["id", "_id", "owner", "complete"];

/// Stable exercise identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(Uuid);

impl ExerciseId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ExerciseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Validation failures for exercise attribute payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExerciseValidationError {
    #[error("exercise attributes must be a JSON object")]
    NotAnObject,
}

/// Open attribute document for an exercise (name, target muscle,
/// equipment, weight or distance, and so on).
///
/// ## Invariants
/// - Never contains any of [`RESERVED_ATTRIBUTE_KEYS`].
///
/// # Examples
/// ```
/// use serde_json::json;
/// use workout_planner::domain::ExerciseAttributes;
///
/// let attrs = ExerciseAttributes::from_value(json!({
///     "name": "squat",
///     "owner": "mallory",
///     "complete": true,
/// }))
/// .unwrap();
/// assert_eq!(attrs.into_value(), json!({ "name": "squat" }));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct ExerciseAttributes(Map<String, Value>);

impl ExerciseAttributes {
    /// Accept a JSON object, dropping reserved keys.
    pub fn from_value(value: Value) -> Result<Self, ExerciseValidationError> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            _ => Err(ExerciseValidationError::NotAnObject),
        }
    }

    /// Accept a JSON map, dropping reserved keys.
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        for key in RESERVED_ATTRIBUTE_KEYS {
            map.remove(key);
        }
        Self(map)
    }

    /// Overlay `overrides` onto these attributes, key by key.
    pub fn merge(&mut self, overrides: &ExerciseAttributes) {
        for (key, value) in &overrides.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the attributes as a JSON map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into a JSON object value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl<'de> Deserialize<'de> for ExerciseAttributes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_map(map))
    }
}

/// A logged exercise.
///
/// ## Invariants
/// - `owner` is the creator and never changes; cloning produces a new
///   record owned by the cloner.
/// - `complete` starts `false`, and only the owner may flip it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[schema(value_type = String, format = Uuid)]
    id: ExerciseId,
    #[schema(value_type = String, example = "alice")]
    owner: Username,
    attributes: ExerciseAttributes,
    complete: bool,
    created_at: DateTime<Utc>,
}

impl Exercise {
    /// Build a new, incomplete exercise owned by `owner`.
    pub fn new(
        id: ExerciseId,
        owner: Username,
        attributes: ExerciseAttributes,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            attributes,
            complete: false,
            created_at,
        }
    }

    /// Rehydrate a stored exercise.
    pub fn from_parts(
        id: ExerciseId,
        owner: Username,
        attributes: ExerciseAttributes,
        complete: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            attributes,
            complete,
            created_at,
        }
    }

    /// Copy this exercise into a new record owned by `owner`.
    ///
    /// The copy gets a fresh identity, starts incomplete and carries this
    /// exercise's attributes overlaid with `overrides`.
    pub fn clone_for(
        &self,
        id: ExerciseId,
        owner: Username,
        overrides: &ExerciseAttributes,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut attributes = self.attributes.clone();
        attributes.merge(overrides);
        Self::new(id, owner, attributes, created_at)
    }

    /// Stable identifier.
    pub fn id(&self) -> ExerciseId {
        self.id
    }

    /// User whose log holds this exercise.
    pub fn owner(&self) -> &Username {
        &self.owner
    }

    /// User-defined fields.
    pub fn attributes(&self) -> &ExerciseAttributes {
        &self.attributes
    }

    /// Completion flag.
    pub fn complete(&self) -> bool {
        self.complete
    }

    /// Creation time; listings sort on it.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `requester` may edit, toggle or delete this exercise.
    pub fn is_owned_by(&self, requester: &Username) -> bool {
        &self.owner == requester
    }

    pub(crate) fn merge_attributes(&mut self, overrides: &ExerciseAttributes) {
        self.attributes.merge(overrides);
    }

    pub(crate) fn flip_complete(&mut self) -> bool {
        self.complete = !self.complete;
        self.complete
    }
}

/// Result of an edit. `applied` is false when the exercise is missing or
/// owned by someone else; the two cases are indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditOutcome {
    pub applied: bool,
}

/// Result of a completion toggle. `new_value` is present only when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOutcome {
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<bool>,
}

impl ToggleOutcome {
    /// The flag was flipped to `new_value`.
    pub fn applied(new_value: bool) -> Self {
        Self {
            applied: true,
            new_value: Some(new_value),
        }
    }

    /// Missing exercise or another user's.
    pub fn rejected() -> Self {
        Self {
            applied: false,
            new_value: None,
        }
    }
}

/// Result of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub applied: bool,
}
