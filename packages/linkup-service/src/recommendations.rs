//! The ranked, cursor-paginated recommendation feed.
//!
//! Each page is one keyset window of eligible candidates in feed order (`updated_at`
//! descending, id ascending). The keyword is part of the directory query, so filtering
//! never under-fills a window. Candidates inside a window are then ranked by match score.
//! Pages are not a consistent snapshot: users may appear, disappear, or move between two
//! cursor calls.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{CandidateQuery, LinkupService, Result};
use linkup_config::Recommendations;
use linkup_domain::{
	cursor::{Cursor, FeedPosition},
	keyword::Keyword,
	scoring::{self, ScoredCandidate},
};

#[derive(Debug, Clone, Default)]
pub struct RecommendationRequest {
	pub viewer_id: Option<Uuid>,
	pub keyword: Option<String>,
	pub cursor: Option<String>,
	/// Clamped into `1..=max_limit`; `None` selects the configured default.
	pub limit: Option<i64>,
}

/// Public recommendation shape. Contact details and social links are never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
	pub id: Uuid,
	pub display_name: String,
	pub avatar_url: Option<String>,
	pub bio: String,
	pub skills: Vec<String>,
	pub looking_for_teammates: bool,
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
	pub score: u32,
}
impl From<ScoredCandidate> for RecommendationItem {
	fn from(candidate: ScoredCandidate) -> Self {
		let ScoredCandidate { profile, score } = candidate;

		Self {
			id: profile.id,
			display_name: profile.display_name,
			avatar_url: profile.avatar_url,
			bio: profile.bio,
			skills: profile.skills,
			looking_for_teammates: profile.looking_for_teammates,
			updated_at: profile.updated_at,
			score,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationPage {
	pub items: Vec<RecommendationItem>,
	pub next_cursor: Option<String>,
}

impl LinkupService {
	pub async fn recommendations(
		&self,
		req: RecommendationRequest,
		now: OffsetDateTime,
	) -> Result<RecommendationPage> {
		let limit = clamp_limit(req.limit, &self.cfg.recommendations);
		let keyword = Keyword::parse(req.keyword.as_deref());
		let after = resume_position(req.cursor.as_deref());
		let viewer = match req.viewer_id {
			Some(viewer_id) => self.directory.find_by_id(viewer_id).await?,
			None => None,
		};
		let exclude_id =
			if self.cfg.recommendations.exclude_self { req.viewer_id } else { None };
		let query = CandidateQuery { exclude_id, keyword, after, limit: limit + 1 };
		let mut window = self.directory.find_eligible_candidates(&query).await?;
		let has_more = window.len() > limit as usize;

		window.truncate(limit as usize);

		let next_cursor = if has_more {
			window.last().map(|last| Cursor::new(FeedPosition::of(last)).encode())
		} else {
			None
		};
		let items: Vec<RecommendationItem> = scoring::rank(viewer.as_ref(), window, now)
			.into_iter()
			.map(RecommendationItem::from)
			.collect();

		tracing::debug!(
			viewer_known = viewer.is_some(),
			keyword = query.keyword.as_ref().map(|keyword| keyword.as_str()),
			resumed = after.is_some(),
			limit,
			items = items.len(),
			has_more,
			"Recommendation page served."
		);

		Ok(RecommendationPage { items, next_cursor })
	}
}

pub(crate) fn clamp_limit(requested: Option<i64>, cfg: &Recommendations) -> u32 {
	let max = i64::from(cfg.max_limit.max(1));

	match requested {
		Some(limit) => limit.clamp(1, max) as u32,
		None => cfg.default_limit.clamp(1, max as u32),
	}
}

/// A malformed cursor restarts the feed rather than failing the request.
fn resume_position(raw: Option<&str>) -> Option<FeedPosition> {
	let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;

	match Cursor::decode(raw) {
		Ok(cursor) => Some(cursor.position()),
		Err(err) => {
			tracing::warn!(error = %err, "Ignoring invalid recommendation cursor.");

			None
		},
	}
}
