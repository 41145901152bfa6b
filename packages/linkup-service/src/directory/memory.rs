use std::{
	collections::HashMap,
	sync::{PoisonError, RwLock},
};

use uuid::Uuid;

use crate::{
	BoxFuture, Result,
	directory::{CandidateQuery, UserDirectory},
};
use linkup_domain::{
	cursor::FeedPosition,
	keyword,
	profile::{self, UserProfile},
};

/// Process-local directory with the same semantics as the Postgres one.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
	profiles: RwLock<HashMap<Uuid, UserProfile>>,
}
impl MemoryDirectory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a directory from trusted fixtures, validating each profile.
	pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Result<Self> {
		let directory = Self::new();

		for profile in profiles {
			directory.store(profile)?;
		}

		Ok(directory)
	}

	pub fn len(&self) -> usize {
		self.profiles.read().unwrap_or_else(PoisonError::into_inner).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn store(&self, mut profile: UserProfile) -> Result<()> {
		profile::validate(&profile)?;

		let mut profiles = self.profiles.write().unwrap_or_else(PoisonError::into_inner);

		if let Some(existing) = profiles.get(&profile.id) {
			profile.created_at = existing.created_at;
			profile.updated_at = profile.updated_at.max(existing.updated_at);
		}

		profiles.insert(profile.id, profile);

		Ok(())
	}

	fn eligible_window(&self, query: &CandidateQuery) -> Vec<UserProfile> {
		let eligible: Vec<UserProfile> = {
			let profiles = self.profiles.read().unwrap_or_else(PoisonError::into_inner);

			profiles
				.values()
				.filter(|profile| profile.looking_for_teammates)
				.filter(|profile| query.exclude_id != Some(profile.id))
				.filter(|profile| {
					query.after.is_none_or(|after| FeedPosition::of(profile).is_after(&after))
				})
				.cloned()
				.collect()
		};
		let mut matched = keyword::filter(eligible, query.keyword.as_ref());

		matched.sort_by_key(FeedPosition::of);
		matched.truncate(query.limit as usize);

		matched
	}
}
impl UserDirectory for MemoryDirectory {
	fn find_eligible_candidates<'a>(
		&'a self,
		query: &'a CandidateQuery,
	) -> BoxFuture<'a, Result<Vec<UserProfile>>> {
		Box::pin(async move { Ok(self.eligible_window(query)) })
	}

	fn find_by_id<'a>(&'a self, user_id: Uuid) -> BoxFuture<'a, Result<Option<UserProfile>>> {
		Box::pin(async move {
			let profiles = self.profiles.read().unwrap_or_else(PoisonError::into_inner);

			Ok(profiles.get(&user_id).cloned())
		})
	}

	fn upsert_profile<'a>(&'a self, profile: &'a UserProfile) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { self.store(profile.clone()) })
	}

	fn delete_profile<'a>(&'a self, user_id: Uuid) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move {
			let mut profiles = self.profiles.write().unwrap_or_else(PoisonError::into_inner);

			Ok(profiles.remove(&user_id).is_some())
		})
	}
}
