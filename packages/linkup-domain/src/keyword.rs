//! Free-text narrowing of the candidate set.

use crate::profile::UserProfile;

/// A normalized, non-empty search keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
	raw: String,
	folded: String,
}
impl Keyword {
	/// Returns `None` when the input is absent or blank, meaning "no filtering".
	pub fn parse(raw: Option<&str>) -> Option<Self> {
		let trimmed = raw?.trim();

		if trimmed.is_empty() {
			return None;
		}

		Some(Self { raw: trimmed.to_string(), folded: trimmed.to_lowercase() })
	}

	/// The trimmed keyword as typed.
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Case-insensitive substring match against the display name, the bio, or any skill.
	pub fn matches(&self, profile: &UserProfile) -> bool {
		contains_folded(&profile.display_name, &self.folded)
			|| contains_folded(&profile.bio, &self.folded)
			|| profile.skills.iter().any(|skill| contains_folded(skill, &self.folded))
	}
}

pub fn filter(candidates: Vec<UserProfile>, keyword: Option<&Keyword>) -> Vec<UserProfile> {
	match keyword {
		Some(keyword) => candidates.into_iter().filter(|c| keyword.matches(c)).collect(),
		None => candidates,
	}
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
	haystack.to_lowercase().contains(folded_needle)
}
