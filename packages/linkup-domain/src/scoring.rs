//! Viewer/candidate compatibility scoring and the feed's ranking order.

use std::{cmp::Ordering, collections::HashSet};

use time::OffsetDateTime;

use crate::profile::UserProfile;

pub const SKILL_WEIGHT: u32 = 10;
pub const MAX_RECENCY_SCORE: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
	pub profile: UserProfile,
	pub score: u32,
}

/// Number of distinct skills both profiles list. Zero for anonymous viewers.
pub fn skill_overlap(viewer: Option<&UserProfile>, candidate: &UserProfile) -> u32 {
	let Some(viewer) = viewer else {
		return 0;
	};
	let viewer_skills: HashSet<&str> = viewer.skills.iter().map(String::as_str).collect();
	let candidate_skills: HashSet<&str> = candidate.skills.iter().map(String::as_str).collect();

	viewer_skills.intersection(&candidate_skills).count() as u32
}

/// Linear decay from 5 for a profile updated within the last day to 0 after five days.
///
/// An `updated_at` ahead of `now` counts as updated today.
pub fn recency_score(updated_at: OffsetDateTime, now: OffsetDateTime) -> u32 {
	let days = (now - updated_at).whole_days().max(0);

	(MAX_RECENCY_SCORE as i64 - days).max(0) as u32
}

pub fn score(viewer: Option<&UserProfile>, candidate: &UserProfile, now: OffsetDateTime) -> u32 {
	skill_overlap(viewer, candidate) * SKILL_WEIGHT + recency_score(candidate.updated_at, now)
}

/// Score descending, then `updated_at` descending, then id ascending.
pub fn rank_order(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
	b.score
		.cmp(&a.score)
		.then_with(|| b.profile.updated_at.cmp(&a.profile.updated_at))
		.then_with(|| a.profile.id.cmp(&b.profile.id))
}

pub fn rank(
	viewer: Option<&UserProfile>,
	candidates: Vec<UserProfile>,
	now: OffsetDateTime,
) -> Vec<ScoredCandidate> {
	let mut scored: Vec<ScoredCandidate> = candidates
		.into_iter()
		.map(|profile| {
			let score = score(viewer, &profile, now);

			ScoredCandidate { profile, score }
		})
		.collect();

	scored.sort_by(rank_order);

	scored
}
