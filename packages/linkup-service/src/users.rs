use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, LinkupService, Result};
use linkup_domain::{
	disclosure::{self, Disclosure, Viewer},
	profile::{ContactInfo, ContactType, UserProfile},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
	pub id: Uuid,
	pub display_name: String,
	pub avatar_url: Option<String>,
	pub bio: String,
	pub skills: Vec<String>,
	pub looking_for_teammates: bool,
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
	pub social_links: BTreeMap<String, String>,
}
impl From<UserProfile> for PublicProfile {
	fn from(profile: UserProfile) -> Self {
		Self {
			id: profile.id,
			display_name: profile.display_name,
			avatar_url: profile.avatar_url,
			bio: profile.bio,
			skills: profile.skills,
			looking_for_teammates: profile.looking_for_teammates,
			updated_at: profile.updated_at,
			social_links: profile.social_links,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
	pub contact_type: Option<ContactType>,
	pub contact_value: Option<String>,
	pub contact_qr: Option<String>,
}
impl From<ContactInfo> for ContactDetails {
	fn from(contact: ContactInfo) -> Self {
		Self {
			contact_type: contact.contact_type,
			contact_value: contact.contact_value,
			contact_qr: contact.contact_qr,
		}
	}
}

/// The viewer's own record, contact details included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnProfile {
	#[serde(flatten)]
	pub profile: PublicProfile,
	#[serde(flatten)]
	pub contact: ContactDetails,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

impl LinkupService {
	pub async fn public_profile(&self, user_id: Uuid) -> Result<PublicProfile> {
		let profile = self
			.directory
			.find_by_id(user_id)
			.await?
			.ok_or(Error::CandidateNotFound { user_id })?;

		Ok(profile.into())
	}

	/// Authentication is checked first, then existence, then the candidate's flag as
	/// currently stored.
	pub async fn contact(&self, viewer: Viewer, user_id: Uuid) -> Result<ContactDetails> {
		if viewer == Viewer::Anonymous {
			return Err(Error::Unauthenticated);
		}

		let candidate = self
			.directory
			.find_by_id(user_id)
			.await?
			.ok_or(Error::CandidateNotFound { user_id })?;

		match disclosure::check(&viewer, &candidate) {
			Disclosure::Allowed => {
				tracing::info!(
					viewer_id = ?viewer.user_id(),
					%user_id,
					"Contact details disclosed."
				);

				Ok(candidate.contact.into())
			},
			Disclosure::Unauthenticated => Err(Error::Unauthenticated),
			Disclosure::NotDisclosing => Err(Error::DisclosureDenied { user_id }),
		}
	}

	/// `None` for anonymous viewers and for ids the directory does not know.
	pub async fn me(&self, viewer: Viewer) -> Result<Option<OwnProfile>> {
		let Some(user_id) = viewer.user_id() else {
			return Ok(None);
		};
		let Some(profile) = self.directory.find_by_id(user_id).await? else {
			return Ok(None);
		};
		let created_at = profile.created_at;
		let contact = profile.contact.clone().into();

		Ok(Some(OwnProfile { profile: profile.into(), contact, created_at }))
	}
}
