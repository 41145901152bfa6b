//! The read/write boundary around stored user profiles.

mod memory;
mod postgres;

pub use memory::MemoryDirectory;
pub use postgres::PgDirectory;

use uuid::Uuid;

use crate::{BoxFuture, Result};
use linkup_domain::{cursor::FeedPosition, keyword::Keyword, profile::UserProfile};

/// One keyset window over the eligible candidate set.
#[derive(Debug, Clone)]
pub struct CandidateQuery {
	pub exclude_id: Option<Uuid>,
	pub keyword: Option<Keyword>,
	/// Only candidates strictly after this position are returned.
	pub after: Option<FeedPosition>,
	pub limit: u32,
}

/// Storage of user profiles, the only holder of persisted state.
///
/// `find_eligible_candidates` returns users with `looking_for_teammates = true` that match
/// the query, in feed order (`updated_at` descending, then id ascending), capped at
/// `query.limit`. Writes validate the profile and never move `updated_at` backwards.
pub trait UserDirectory
where
	Self: Send + Sync,
{
	fn find_eligible_candidates<'a>(
		&'a self,
		query: &'a CandidateQuery,
	) -> BoxFuture<'a, Result<Vec<UserProfile>>>;

	fn find_by_id<'a>(&'a self, user_id: Uuid) -> BoxFuture<'a, Result<Option<UserProfile>>>;

	fn upsert_profile<'a>(&'a self, profile: &'a UserProfile) -> BoxFuture<'a, Result<()>>;

	fn delete_profile<'a>(&'a self, user_id: Uuid) -> BoxFuture<'a, Result<bool>>;
}
