use std::num::IntErrorKind;

use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::{HeaderMap, StatusCode, header},
	response::{IntoResponse, Response},
	routing::get,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::state::AppState;
use linkup_config::Security;
use linkup_domain::disclosure::Viewer;
use linkup_service::{
	ContactDetails, Error as ServiceError, OwnProfile, PublicProfile, RecommendationPage,
	RecommendationRequest,
};

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationsQuery {
	pub q: Option<String>,
	/// Kept as text so a non-numeric value falls back to the default page size.
	/// Out-of-range integers are clamped.
	pub limit: Option<String>,
	pub cursor: Option<String>,
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/recommendations", get(recommendations))
		.route("/users/{id}", get(user_profile))
		.route("/users/{id}/contact", get(user_contact))
		.route("/me", get(me))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn recommendations(
	State(state): State<AppState>,
	headers: HeaderMap,
	Query(query): Query<RecommendationsQuery>,
) -> Result<Json<RecommendationPage>, ApiError> {
	let viewer = resolve_viewer(&headers, &state.service.cfg.security)?;
	let limit = query.limit.as_deref().and_then(parse_limit);
	let req = RecommendationRequest {
		viewer_id: viewer.user_id(),
		keyword: query.q,
		cursor: query.cursor,
		limit,
	};
	let page = state.service.recommendations(req, OffsetDateTime::now_utc()).await?;

	Ok(Json(page))
}

async fn user_profile(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(id): Path<String>,
) -> Result<Json<PublicProfile>, ApiError> {
	resolve_viewer(&headers, &state.service.cfg.security)?;

	let user_id = parse_user_id(&id)?;
	let profile = state.service.public_profile(user_id).await?;

	Ok(Json(profile))
}

async fn user_contact(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(id): Path<String>,
) -> Result<Json<ContactDetails>, ApiError> {
	let viewer = resolve_viewer(&headers, &state.service.cfg.security)?;

	if viewer == Viewer::Anonymous {
		return Err(ServiceError::Unauthenticated.into());
	}

	let user_id = parse_user_id(&id)?;
	let contact = state.service.contact(viewer, user_id).await?;

	Ok(Json(contact))
}

async fn me(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<Option<OwnProfile>>, ApiError> {
	let viewer = resolve_viewer(&headers, &state.service.cfg.security)?;
	let profile = state.service.me(viewer).await?;

	Ok(Json(profile))
}

/// Reads the gateway-forwarded viewer id. A missing or blank header means an anonymous
/// viewer; a present id must carry the gateway token when one is configured.
fn resolve_viewer(headers: &HeaderMap, security: &Security) -> Result<Viewer, ApiError> {
	let invalid = || {
		json_error(
			StatusCode::BAD_REQUEST,
			"INVALID_REQUEST",
			"Viewer id must be a UUID.",
			Some(vec![security.viewer_header.clone()]),
		)
	};
	let raw = match headers.get(security.viewer_header.as_str()) {
		Some(value) => value.to_str().map_err(|_| invalid())?.trim(),
		None => "",
	};

	if raw.is_empty() {
		return Ok(Viewer::from_id(None));
	}
	if let Some(token) = security.gateway_auth_token.as_deref() {
		let presented = headers
			.get(header::AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
			.and_then(|value| value.strip_prefix("Bearer "))
			.map(str::trim)
			.unwrap_or_default();

		if !tokens_match(presented, token) {
			return Err(json_error(
				StatusCode::UNAUTHORIZED,
				"UNAUTHENTICATED",
				"Gateway credentials are missing or invalid.",
				None,
			));
		}
	}

	let viewer_id = Uuid::try_parse(raw).map_err(|_| invalid())?;

	Ok(Viewer::from_id(Some(viewer_id)))
}

/// Compares every byte regardless of where the first mismatch is.
fn tokens_match(presented: &str, expected: &str) -> bool {
	let (presented, expected) = (presented.as_bytes(), expected.as_bytes());

	presented.len() == expected.len()
		&& presented.iter().zip(expected).fold(0_u8, |diff, (a, b)| diff | (a ^ b)) == 0
}

/// Integers beyond `i64` saturate so the service clamps them; anything else is ignored.
fn parse_limit(raw: &str) -> Option<i64> {
	match raw.trim().parse::<i64>() {
		Ok(limit) => Some(limit),
		Err(err) => match err.kind() {
			IntErrorKind::PosOverflow => Some(i64::MAX),
			IntErrorKind::NegOverflow => Some(i64::MIN),
			_ => None,
		},
	}
}

/// An id that cannot name a user is reported the same way as an unknown user.
fn parse_user_id(raw: &str) -> Result<Uuid, ApiError> {
	Uuid::try_parse(raw.trim())
		.map_err(|_| json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "User not found.", None))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message, field } => json_error(
				StatusCode::BAD_REQUEST,
				"INVALID_REQUEST",
				message,
				field.map(|field| vec![field]),
			),
			ServiceError::Unauthenticated => json_error(
				StatusCode::UNAUTHORIZED,
				"UNAUTHENTICATED",
				"Sign in to view contact details.",
				None,
			),
			ServiceError::CandidateNotFound { .. } =>
				json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "User not found.", None),
			ServiceError::DisclosureDenied { .. } => json_error(
				StatusCode::FORBIDDEN,
				"DISCLOSURE_DENIED",
				"This user is not sharing contact details.",
				None,
			),
			ServiceError::Storage { message } => {
				tracing::error!(error = %message, "Request failed on a storage error.");

				json_error(
					StatusCode::INTERNAL_SERVER_ERROR,
					"INTERNAL_ERROR",
					"Internal error.",
					None,
				)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}
