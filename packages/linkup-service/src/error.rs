use uuid::Uuid;

use linkup_domain::profile::ProfileError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String, field: Option<String> },
	#[error("Authentication is required.")]
	Unauthenticated,
	#[error("User {user_id} was not found.")]
	CandidateNotFound { user_id: Uuid },
	#[error("User {user_id} is not sharing contact details.")]
	DisclosureDenied { user_id: Uuid },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<linkup_storage::Error> for Error {
	fn from(err: linkup_storage::Error) -> Self {
		match err {
			linkup_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			linkup_storage::Error::InvalidArgument(message) =>
				Self::InvalidRequest { message, field: None },
		}
	}
}

impl From<ProfileError> for Error {
	fn from(err: ProfileError) -> Self {
		Self::InvalidRequest { message: err.to_string(), field: Some(err.field().to_string()) }
	}
}
