use uuid::Uuid;

use crate::profile::UserProfile;

/// Identity of the caller as resolved by the authentication layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
	Anonymous,
	Authenticated(Uuid),
}
impl Viewer {
	pub fn from_id(user_id: Option<Uuid>) -> Self {
		match user_id {
			Some(user_id) => Self::Authenticated(user_id),
			None => Self::Anonymous,
		}
	}

	pub fn user_id(&self) -> Option<Uuid> {
		match self {
			Self::Anonymous => None,
			Self::Authenticated(user_id) => Some(*user_id),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disclosure {
	Allowed,
	Unauthenticated,
	NotDisclosing,
}

/// Evaluate against a freshly read profile; a recommendation-list copy may be stale.
pub fn check(viewer: &Viewer, candidate: &UserProfile) -> Disclosure {
	if matches!(viewer, Viewer::Anonymous) {
		return Disclosure::Unauthenticated;
	}
	if !candidate.looking_for_teammates {
		return Disclosure::NotDisclosing;
	}

	Disclosure::Allowed
}

pub fn can_disclose(viewer: &Viewer, candidate: &UserProfile) -> bool {
	check(viewer, candidate) == Disclosure::Allowed
}
