//! Job authorization metadata.

use serde::{Deserialize, Deserializer, Serialize};

/// Owner assigned when `set_owner` receives an empty member.
pub const DEFAULT_OWNER: &str = "admin";

/// Owner and members of a job.
///
/// `owner` holds administrative authorization; every member (the owner
/// included, once assigned through [`JobAdmin::set_owner`]) holds plain
/// authorization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobAdmin {
    /// Member with administrative authorization.
    pub owner: String,

    /// Authorized members, without duplicates.
    #[serde(deserialize_with = "null_as_empty")]
    pub members: Vec<String>,
}

impl JobAdmin {
    /// Set the owner, falling back to `default_owner` when `member` is empty,
    /// and make sure the owner is listed among the members.
    pub fn set_owner(&mut self, member: &str, default_owner: &str) {
        let owner = if member.is_empty() { default_owner } else { member };

        self.owner = owner.to_string();
        self.add_member(owner);
    }

    /// Append a member unless already present. Returns whether it was added.
    pub fn add_member(&mut self, member: &str) -> bool {
        if self.members.iter().any(|m| m == member) {
            return false;
        }
        self.members.push(member.to_string());
        true
    }

    /// Whether `member` is the owner.
    pub fn has_admin_authorization(&self, member: &str) -> bool {
        self.owner == member
    }

    /// Whether `member` is the owner or one of the members.
    pub fn has_authorization(&self, member: &str) -> bool {
        self.has_admin_authorization(member) || self.members.iter().any(|m| m == member)
    }
}

// Older records were written with `"members": null` for an empty list.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
