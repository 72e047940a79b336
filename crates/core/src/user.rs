//! User record model and request DTOs.

use serde::{Deserialize, Serialize};

use crate::error::DirectoryError;
use crate::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub group: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// A create request that passed validation: `name` and `email` trimmed and
/// non-empty, an empty `group` normalized to `None`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub group: Option<String>,
}

impl CreateUser {
    pub fn validate(&self) -> Result<NewUser, DirectoryError> {
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(DirectoryError::Validation(
                "name and email are required".to_string(),
            ));
        }
        Ok(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            group: normalize_group(self.group.as_deref()),
        })
    }
}

/// DTO for partially updating a user. All fields are optional.
///
/// `group` distinguishes an absent field (outer `None`, leave unchanged)
/// from an explicit `"group": null` (inner `None`, clear the group).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub group: Option<Option<String>>,
}

/// A patch that passed validation: supplied fields are trimmed, a blank
/// `group` collapses to an explicit clear.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub group: Option<Option<String>>,
}

impl UpdateUser {
    /// Validate the patch.
    ///
    /// A patch with no fields at all is [`DirectoryError::EmptyPatch`].
    /// Persisted `name` and `email` must never become empty, so a supplied
    /// but blank value is a validation error rather than a silent blank-out.
    pub fn validate(&self) -> Result<UserPatch, DirectoryError> {
        if self.name.is_none() && self.email.is_none() && self.group.is_none() {
            return Err(DirectoryError::EmptyPatch);
        }

        let name = self
            .name
            .as_deref()
            .map(|n| require_non_blank("name", n))
            .transpose()?;
        let email = self
            .email
            .as_deref()
            .map(|e| require_non_blank("email", e))
            .transpose()?;
        let group = self
            .group
            .as_ref()
            .map(|g| normalize_group(g.as_deref()));

        Ok(UserPatch { name, email, group })
    }
}

fn require_non_blank(field: &str, value: &str) -> Result<String, DirectoryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DirectoryError::Validation(format!(
            "{field} must not be blank"
        )));
    }
    Ok(trimmed.to_string())
}

/// An empty or whitespace-only group is stored as `None`, never as `""`.
fn normalize_group(group: Option<&str>) -> Option<String> {
    let trimmed = group?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Deserialize a patch field so an explicit `null` becomes `Some(None)`
/// while an absent field (via `#[serde(default)]`) stays `None`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn create_trims_and_normalizes_group() {
        let input = CreateUser {
            name: "  Ann  ".to_string(),
            email: " a@x.com ".to_string(),
            group: Some("  ".to_string()),
        };
        let new_user = input.validate().unwrap();
        assert_eq!(new_user.name, "Ann");
        assert_eq!(new_user.email, "a@x.com");
        assert_eq!(new_user.group, None);
    }

    #[test]
    fn create_rejects_blank_name_or_email() {
        let blank_name = CreateUser {
            name: "   ".to_string(),
            email: "a@x.com".to_string(),
            group: None,
        };
        assert_matches!(blank_name.validate(), Err(DirectoryError::Validation(_)));

        let blank_email = CreateUser {
            name: "Ann".to_string(),
            email: String::new(),
            group: None,
        };
        assert_matches!(blank_email.validate(), Err(DirectoryError::Validation(_)));
    }

    #[test]
    fn update_with_no_fields_is_empty_patch() {
        assert_matches!(
            UpdateUser::default().validate(),
            Err(DirectoryError::EmptyPatch)
        );
    }

    #[test]
    fn update_rejects_blank_supplied_fields() {
        let patch = UpdateUser {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert_matches!(patch.validate(), Err(DirectoryError::Validation(_)));
    }

    #[test]
    fn update_blank_group_becomes_explicit_clear() {
        let patch = UpdateUser {
            group: Some(Some("  ".to_string())),
            ..Default::default()
        };
        assert_eq!(patch.validate().unwrap().group, Some(None));
    }

    #[test]
    fn group_null_deserializes_as_explicit_clear() {
        let patch: UpdateUser = serde_json::from_str(r#"{"group": null}"#).unwrap();
        assert_eq!(patch.group, Some(None));

        let absent: UpdateUser = serde_json::from_str(r#"{"name": "Bo"}"#).unwrap();
        assert_eq!(absent.group, None);
    }
}
