//! Feed positions and the opaque resumption token built from them.
//!
//! The feed is ordered by `updated_at` descending, then by user id ascending. A cursor
//! records a position in that order rather than a row, so it stays usable after the user it
//! was taken from is deleted or stops looking for teammates.

use std::{cmp::Ordering, fmt};

use time::OffsetDateTime;
use uuid::Uuid;

use crate::profile::UserProfile;

const SEPARATOR: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
	#[error("Cursor is malformed.")]
	Malformed,
	#[error("Cursor timestamp is out of range.")]
	TimestampOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedPosition {
	pub updated_at: OffsetDateTime,
	pub user_id: Uuid,
}
impl FeedPosition {
	pub fn of(profile: &UserProfile) -> Self {
		Self { updated_at: profile.updated_at, user_id: profile.id }
	}

	/// True when `self` comes strictly after `other` in feed order.
	pub fn is_after(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Greater
	}
}
impl Ord for FeedPosition {
	fn cmp(&self, other: &Self) -> Ordering {
		other.updated_at.cmp(&self.updated_at).then_with(|| self.user_id.cmp(&other.user_id))
	}
}
impl PartialOrd for FeedPosition {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
	position: FeedPosition,
}
impl Cursor {
	pub fn new(position: FeedPosition) -> Self {
		Self { position }
	}

	pub fn position(&self) -> FeedPosition {
		self.position
	}

	/// Identifier of the last candidate seen before this cursor was issued.
	pub fn user_id(&self) -> Uuid {
		self.position.user_id
	}

	pub fn encode(&self) -> String {
		self.to_string()
	}

	pub fn decode(raw: &str) -> Result<Self, CursorError> {
		let (nanos, user_id) = raw.trim().split_once(SEPARATOR).ok_or(CursorError::Malformed)?;
		let nanos: i128 = nanos.parse().map_err(|_| CursorError::Malformed)?;
		let user_id = Uuid::try_parse(user_id).map_err(|_| CursorError::Malformed)?;
		let updated_at = OffsetDateTime::from_unix_timestamp_nanos(nanos)
			.map_err(|_| CursorError::TimestampOutOfRange)?;

		Ok(Self { position: FeedPosition { updated_at, user_id } })
	}
}
impl fmt::Display for Cursor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}{SEPARATOR}{}",
			self.position.updated_at.unix_timestamp_nanos(),
			self.position.user_id.simple()
		)
	}
}
