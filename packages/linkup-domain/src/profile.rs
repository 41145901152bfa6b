use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub const MAX_DISPLAY_NAME_CHARS: usize = 50;
pub const MAX_BIO_CHARS: usize = 140;
pub const MAX_SKILLS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactType {
	Wechat,
	Phone,
	Qr,
}
impl ContactType {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Wechat => "WECHAT",
			Self::Phone => "PHONE",
			Self::Qr => "QR",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"WECHAT" => Some(Self::Wechat),
			"PHONE" => Some(Self::Phone),
			"QR" => Some(Self::Qr),
			_ => None,
		}
	}
}

/// Private contact payload. Only released through the disclosure gate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
	pub contact_type: Option<ContactType>,
	pub contact_value: Option<String>,
	pub contact_qr: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
	pub id: Uuid,
	pub display_name: String,
	pub avatar_url: Option<String>,
	pub bio: String,
	pub skills: Vec<String>,
	pub looking_for_teammates: bool,
	pub social_links: BTreeMap<String, String>,
	pub contact: ContactInfo,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
	#[error("{field} must not be empty.")]
	Empty { field: String },
	#[error("{field} exceeds {max} characters.")]
	TooLong { field: String, max: usize },
	#[error("{field} must contain at most {max} entries.")]
	TooMany { field: String, max: usize },
	#[error("{field} duplicates an earlier entry.")]
	Duplicate { field: String },
}
impl ProfileError {
	pub fn field(&self) -> &str {
		match self {
			Self::Empty { field }
			| Self::TooLong { field, .. }
			| Self::TooMany { field, .. }
			| Self::Duplicate { field } => field,
		}
	}
}

/// Checks the invariants every stored profile must satisfy.
pub fn validate(profile: &UserProfile) -> Result<(), ProfileError> {
	if profile.display_name.trim().is_empty() {
		return Err(ProfileError::Empty { field: "$.displayName".to_string() });
	}
	if profile.display_name.chars().count() > MAX_DISPLAY_NAME_CHARS {
		return Err(ProfileError::TooLong {
			field: "$.displayName".to_string(),
			max: MAX_DISPLAY_NAME_CHARS,
		});
	}
	if profile.bio.chars().count() > MAX_BIO_CHARS {
		return Err(ProfileError::TooLong { field: "$.bio".to_string(), max: MAX_BIO_CHARS });
	}
	if profile.skills.len() > MAX_SKILLS {
		return Err(ProfileError::TooMany { field: "$.skills".to_string(), max: MAX_SKILLS });
	}

	let mut seen = HashSet::with_capacity(profile.skills.len());

	for (idx, skill) in profile.skills.iter().enumerate() {
		if skill.trim().is_empty() {
			return Err(ProfileError::Empty { field: format!("$.skills[{idx}]") });
		}
		if !seen.insert(skill.as_str()) {
			return Err(ProfileError::Duplicate { field: format!("$.skills[{idx}]") });
		}
	}
	for key in profile.social_links.keys() {
		if key.trim().is_empty() {
			return Err(ProfileError::Empty { field: "$.socialLinks".to_string() });
		}
	}

	Ok(())
}
