use std::collections::BTreeMap;

use time::{Duration, OffsetDateTime, macros::datetime};
use uuid::Uuid;

use linkup_domain::{
	cursor::{Cursor, CursorError, FeedPosition},
	disclosure::{self, Disclosure, Viewer},
	keyword::{self, Keyword},
	profile::{ContactInfo, UserProfile},
	scoring::{self, ScoredCandidate},
};

const NOW: OffsetDateTime = datetime!(2026-03-10 12:00 UTC);

fn profile(id: u128, skills: &[&str], updated_at: OffsetDateTime) -> UserProfile {
	UserProfile {
		id: Uuid::from_u128(id),
		display_name: format!("user-{id}"),
		avatar_url: None,
		bio: String::new(),
		skills: skills.iter().map(|skill| skill.to_string()).collect(),
		looking_for_teammates: true,
		social_links: BTreeMap::new(),
		contact: ContactInfo::default(),
		created_at: updated_at,
		updated_at,
	}
}

#[test]
fn shared_skills_outweigh_recency() {
	let viewer = profile(1, &["go", "rust"], NOW);
	let a = profile(2, &["go", "python"], NOW);
	let b = profile(3, &["go", "rust"], NOW - Duration::days(3));

	assert_eq!(scoring::score(Some(&viewer), &a, NOW), 15);
	assert_eq!(scoring::score(Some(&viewer), &b, NOW), 22);

	let ranked = scoring::rank(Some(&viewer), vec![a, b], NOW);

	assert_eq!(ranked[0].profile.id, Uuid::from_u128(3));
	assert_eq!(ranked[1].profile.id, Uuid::from_u128(2));
}

#[test]
fn anonymous_viewers_only_get_recency() {
	let candidate = profile(2, &["go", "rust"], NOW - Duration::hours(30));

	assert_eq!(scoring::skill_overlap(None, &candidate), 0);
	assert_eq!(scoring::score(None, &candidate, NOW), 4);
}

#[test]
fn recency_decays_by_whole_days_and_clamps() {
	assert_eq!(scoring::recency_score(NOW, NOW), 5);
	assert_eq!(scoring::recency_score(NOW - Duration::hours(23), NOW), 5);
	assert_eq!(scoring::recency_score(NOW - Duration::days(1), NOW), 4);
	assert_eq!(scoring::recency_score(NOW - Duration::days(4), NOW), 1);
	assert_eq!(scoring::recency_score(NOW - Duration::days(5), NOW), 0);
	assert_eq!(scoring::recency_score(NOW - Duration::days(400), NOW), 0);
	assert_eq!(scoring::recency_score(NOW + Duration::days(2), NOW), 5);
}

#[test]
fn duplicate_skills_collapse_before_counting() {
	let mut viewer = profile(1, &["go"], NOW);
	let mut candidate = profile(2, &["go"], NOW);

	viewer.skills.push("go".to_string());
	candidate.skills.push("go".to_string());

	assert_eq!(scoring::skill_overlap(Some(&viewer), &candidate), 1);
}

#[test]
fn score_stays_within_bounds() {
	let skill_sets: [&[&str]; 4] =
		[&[], &["go"], &["go", "rust", "zig"], &["rust", "zig", "c", "go", "ocaml"]];

	for viewer_skills in skill_sets {
		for candidate_skills in skill_sets {
			for age_hours in [-48_i64, 0, 20, 50, 100, 200] {
				let viewer = profile(1, viewer_skills, NOW);
				let candidate = profile(2, candidate_skills, NOW - Duration::hours(age_hours));
				let skill_score =
					scoring::skill_overlap(Some(&viewer), &candidate) * scoring::SKILL_WEIGHT;
				let recency = scoring::recency_score(candidate.updated_at, NOW);
				let bound = 10 * viewer_skills.len().min(candidate_skills.len()) as u32;

				assert_eq!(skill_score % 10, 0);
				assert!(skill_score <= bound);
				assert!(recency <= scoring::MAX_RECENCY_SCORE);
				assert_eq!(scoring::score(Some(&viewer), &candidate, NOW), skill_score + recency);
			}
		}
	}
}

#[test]
fn equal_scores_break_ties_by_recency_then_id() {
	let older = profile(1, &[], NOW - Duration::minutes(10));
	let newer_high_id = profile(9, &[], NOW);
	let newer_low_id = profile(4, &[], NOW);
	let ranked = scoring::rank(None, vec![older, newer_high_id, newer_low_id], NOW);
	let ids: Vec<u128> = ranked.iter().map(|c| c.profile.id.as_u128()).collect();

	assert_eq!(ids, vec![4, 9, 1]);
}

#[test]
fn rank_order_is_total() {
	let a = ScoredCandidate { profile: profile(1, &[], NOW), score: 3 };
	let b = ScoredCandidate { profile: profile(1, &[], NOW), score: 3 };

	assert_eq!(scoring::rank_order(&a, &b), std::cmp::Ordering::Equal);
}

#[test]
fn keyword_matches_name_bio_and_skills_case_insensitively() {
	let mut by_name = profile(1, &[], NOW);
	let mut by_bio = profile(2, &[], NOW);
	let by_skill = profile(3, &["GoLang"], NOW);
	let unrelated = profile(4, &["rust"], NOW);

	by_name.display_name = "Gopher Grace".to_string();
	by_bio.bio = "Backend work in GO and SQL".to_string();

	let keyword = Keyword::parse(Some("  go ")).expect("Keyword must parse.");
	let filtered = keyword::filter(vec![by_name, by_bio, by_skill, unrelated], Some(&keyword));
	let ids: Vec<u128> = filtered.iter().map(|c| c.id.as_u128()).collect();

	assert_eq!(keyword.as_str(), "go");
	assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn blank_keyword_means_no_filter() {
	assert!(Keyword::parse(None).is_none());
	assert!(Keyword::parse(Some("   ")).is_none());

	let candidates = vec![profile(1, &[], NOW), profile(2, &[], NOW)];

	assert_eq!(keyword::filter(candidates.clone(), None), candidates);
}

#[test]
fn cursor_round_trips_position() {
	let position = FeedPosition {
		updated_at: datetime!(2026-03-10 12:00:00.123456789 UTC),
		user_id: Uuid::from_u128(42),
	};
	let encoded = Cursor::new(position).encode();
	let decoded = Cursor::decode(&encoded).expect("Cursor must decode.");

	assert_eq!(decoded.position(), position);
	assert_eq!(decoded.user_id(), Uuid::from_u128(42));
}

#[test]
fn malformed_cursors_are_rejected() {
	for raw in ["", "abc", "12.not-a-uuid", "x.00000000000000000000000000000001"] {
		assert_eq!(Cursor::decode(raw), Err(CursorError::Malformed), "Input: {raw:?}");
	}

	let huge = format!("{}.{}", i128::MAX, Uuid::from_u128(1).simple());

	assert_eq!(Cursor::decode(&huge), Err(CursorError::TimestampOutOfRange));
}

#[test]
fn feed_order_is_newest_first_then_lowest_id() {
	let newest = FeedPosition { updated_at: NOW, user_id: Uuid::from_u128(9) };
	let same_time_higher_id = FeedPosition { updated_at: NOW, user_id: Uuid::from_u128(10) };
	let older =
		FeedPosition { updated_at: NOW - Duration::seconds(1), user_id: Uuid::from_u128(1) };

	assert!(same_time_higher_id.is_after(&newest));
	assert!(older.is_after(&same_time_higher_id));
	assert!(!newest.is_after(&newest));
}

#[test]
fn disclosure_requires_authentication_and_an_open_profile() {
	let mut candidate = profile(2, &[], NOW);
	let viewer = Viewer::from_id(Some(Uuid::from_u128(1)));

	assert_eq!(disclosure::check(&Viewer::Anonymous, &candidate), Disclosure::Unauthenticated);
	assert!(disclosure::can_disclose(&viewer, &candidate));

	candidate.looking_for_teammates = false;

	assert_eq!(disclosure::check(&viewer, &candidate), Disclosure::NotDisclosing);
	assert!(!disclosure::can_disclose(&viewer, &candidate));
}

#[test]
fn contact_type_serializes_as_screaming_label() {
	let json = serde_json::to_string(&linkup_domain::profile::ContactType::Wechat)
		.expect("Contact type must serialize.");

	assert_eq!(json, "\"WECHAT\"");
}
