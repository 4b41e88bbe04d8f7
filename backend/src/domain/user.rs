//! User record and the payload shapes that create or modify it.
//!
//! Wire contract (shared with the browser client):
//!
//! ```text
//! {"_id": "...", "firstname": "Martha", "lastname": "Peach", "age": 32, "gender": "Female"}
//! ```
//!
//! `_id` is server-assigned; `id` is accepted as an input alias. Unknown keys
//! are ignored on input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Rejections raised when constructing a [`UserId`] or [`Gender`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifiers must carry at least one character.
    #[error("user id must not be empty")]
    EmptyId,
    /// Gender literal other than `Male` or `Female`.
    #[error("gender must be Male or Female, got {0:?}")]
    UnknownGender(String),
}

/// Opaque user identifier.
///
/// Server-generated identifiers are UUID v4 strings, but lookups accept any
/// non-empty text: an identifier that is not stored is "not found", never
/// invalid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and wrap an identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Mint a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Enumerated gender; exactly two literals are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    /// `"Male"`
    Male,
    /// `"Female"`
    Female,
}

impl Gender {
    /// Wire literal for this variant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            other => Err(UserValidationError::UnknownGender(other.to_owned())),
        }
    }
}

/// A stored user.
///
/// ## Invariants
/// - `id` never changes after creation; [`User::apply`] cannot touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    #[schema(value_type = String, example = "72398210-5dbb-4566-ada9-e992d8df1b09")]
    id: UserId,
    #[schema(example = "Martha")]
    firstname: String,
    #[schema(example = "Peach")]
    lastname: String,
    #[schema(example = 32)]
    age: u32,
    gender: Gender,
}

impl User {
    /// Assemble a record from an identifier and its fields.
    #[must_use]
    pub fn new(id: UserId, fields: NewUser) -> Self {
        let NewUser {
            firstname,
            lastname,
            age,
            gender,
        } = fields;
        Self {
            id,
            firstname,
            lastname,
            age,
            gender,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Given name.
    #[must_use]
    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    /// Family name.
    #[must_use]
    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    /// Age in whole years.
    #[must_use]
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Gender.
    #[must_use]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Shallow-merge `patch` over this record. Absent fields are retained.
    #[must_use]
    pub fn apply(mut self, patch: UserPatch) -> Self {
        let UserPatch {
            firstname,
            lastname,
            age,
            gender,
        } = patch;
        if let Some(firstname) = firstname {
            self.firstname = firstname;
        }
        if let Some(lastname) = lastname {
            self.lastname = lastname;
        }
        if let Some(age) = age {
            self.age = age;
        }
        if let Some(gender) = gender {
            self.gender = gender;
        }
        self
    }
}

/// Body of `POST /api/users`: every domain field, no identifier.
///
/// An `_id` sent by the caller is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewUser {
    /// Given name.
    #[schema(example = "Timmy")]
    pub firstname: String,
    /// Family name.
    #[schema(example = "Timmerson")]
    pub lastname: String,
    /// Age in whole years.
    #[schema(example = 19)]
    pub age: u32,
    /// Gender.
    pub gender: Gender,
}

/// Body of `PATCH /api/users/{id}`: any subset of the domain fields.
///
/// An `_id` sent by the caller is ignored; the stored identifier wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserPatch {
    /// Replacement given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    /// Replacement family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    /// Replacement age.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 34)]
    pub age: Option<u32>,
    /// Replacement gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl UserPatch {
    /// True when the patch would leave a record unchanged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.firstname.is_none()
            && self.lastname.is_none()
            && self.age.is_none()
            && self.gender.is_none()
    }
}

impl From<NewUser> for UserPatch {
    fn from(value: NewUser) -> Self {
        let NewUser {
            firstname,
            lastname,
            age,
            gender,
        } = value;
        Self {
            firstname: Some(firstname),
            lastname: Some(lastname),
            age: Some(age),
            gender: Some(gender),
        }
    }
}

/// Envelope of the full user listing: `{"data": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserList {
    /// Stored users in insertion order.
    pub data: Vec<User>,
}
