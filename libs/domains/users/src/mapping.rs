//! Field mapping between [`User`] and its stored document
//!
//! | field           | key             | BSON     |
//! |-----------------|-----------------|----------|
//! | `id`            | `_id`           | ObjectId |
//! | `username`      | `username`      | string   |
//! | `password_hash` | `password_hash` | string   |
//! | `email`         | `email`         | string   |

use mongodb::bson::{Document, oid::ObjectId};

use crate::error::{UserError, UserResult};
use crate::models::{User, UserPatch};

pub const ID: &str = "_id";
pub const USERNAME: &str = "username";
pub const PASSWORD_HASH: &str = "password_hash";
pub const EMAIL: &str = "email";

/// Stored fields of `user`. Never contains `_id`, so it is safe as a `$set`.
pub fn to_document(user: &User) -> Document {
    let mut document = Document::new();
    document.insert(USERNAME, user.username.as_str());
    document.insert(PASSWORD_HASH, user.password_hash.as_str());
    document.insert(EMAIL, user.email.as_str());
    document
}

/// `$set` body holding only the fields present in `patch`
pub fn to_set_document(patch: &UserPatch) -> Document {
    let mut document = Document::new();
    if let Some(username) = &patch.username {
        document.insert(USERNAME, username.as_str());
    }
    if let Some(password_hash) = &patch.password_hash {
        document.insert(PASSWORD_HASH, password_hash.as_str());
    }
    if let Some(email) = &patch.email {
        document.insert(EMAIL, email.as_str());
    }
    document
}

pub fn from_document(document: &Document) -> UserResult<User> {
    let id = document
        .get_object_id(ID)
        .map_err(|e| decoding(ID, e))?;

    Ok(User {
        id: Some(id.to_hex()),
        username: string_field(document, USERNAME)?,
        password_hash: string_field(document, PASSWORD_HASH)?,
        email: string_field(document, EMAIL)?,
    })
}

/// Parse the hex form of an ObjectId
pub fn parse_object_id(id: &str) -> UserResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| UserError::InvalidIdentifier(id.to_string()))
}

/// Filter matching a single document by `_id`
pub fn id_filter(id: ObjectId) -> Document {
    let mut filter = Document::new();
    filter.insert(ID, id);
    filter
}

fn string_field(document: &Document, key: &str) -> UserResult<String> {
    document
        .get_str(key)
        .map(str::to_owned)
        .map_err(|e| decoding(key, e))
}

fn decoding(key: &str, err: impl std::fmt::Display) -> UserError {
    UserError::Decoding(format!("field '{}': {}", key, err))
}
