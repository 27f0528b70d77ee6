use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

const REDACTED: &str = "[REDACTED]";

/// User entity as held by storage
///
/// `id` is `None` until the store assigns one on create and never changes
/// afterwards. `password_hash` is opaque and never leaves the service.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: Option<String>,
    pub username: String,
    pub password_hash: String,
    pub email: String,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            password_hash: password_hash.into(),
            email: email.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &REDACTED)
            .field("email", &self.email)
            .finish()
    }
}

/// Partial update; only the fields that are `Some` are written
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password_hash.is_none() && self.email.is_none()
    }
}

impl fmt::Debug for UserPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPatch")
            .field("username", &self.username)
            .field("password_hash", &self.password_hash.as_ref().map(|_| REDACTED))
            .field("email", &self.email)
            .finish()
    }
}

/// Request body for creating a user
///
/// Any `id` in the body is ignored; the store assigns one.
#[derive(Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "jdoe")]
    pub username: String,
    #[validate(email)]
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[validate(length(min = 1))]
    pub password_hash: String,
}

impl From<CreateUser> for User {
    fn from(input: CreateUser) -> Self {
        User::new(input.username, input.password_hash, input.email)
    }
}

/// Request body for replacing a user's fields
#[derive(Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password_hash: String,
}

impl UpdateUser {
    /// Build the user to write under `id`, the path identifier
    pub fn into_user(self, id: impl Into<String>) -> User {
        User::new(self.username, self.password_hash, self.email).with_id(id)
    }
}

/// Request body for a partial update; at least one field is required
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_patch_not_empty"))]
pub struct PatchUser {
    #[validate(length(min = 1, max = 100))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub password_hash: Option<String>,
}

fn validate_patch_not_empty(patch: &PatchUser) -> Result<(), ValidationError> {
    if patch.username.is_none() && patch.email.is_none() && patch.password_hash.is_none() {
        return Err(ValidationError::new("empty_patch")
            .with_message("at least one field must be provided".into()));
    }
    Ok(())
}

impl From<PatchUser> for UserPatch {
    fn from(input: PatchUser) -> Self {
        UserPatch {
            username: input.username,
            password_hash: input.password_hash,
            email: input.email,
        }
    }
}

/// User as returned by the API (no credential material)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "65f1c0ffee0000000000abcd")]
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            username: user.username,
            email: user.email,
        }
    }
}

/// Body returned by a successful create
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    #[schema(example = "65f1c0ffee0000000000abcd")]
    pub id: String,
}
