use sqlx::{Postgres, QueryBuilder, types::Json};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, Result, db::Db, models::UserProfileRow};

const PROFILE_COLUMNS: &str = "\
user_id, display_name, avatar_url, bio, skills, looking_for_teammates, social_links, \
contact_type, contact_value, contact_qr, created_at, updated_at";

pub struct EligibleUsersArgs<'a> {
	pub exclude_user_id: Option<Uuid>,
	/// Raw keyword; matched case-insensitively as a substring.
	pub keyword: Option<&'a str>,
	/// Keyset position; only rows strictly after it in feed order are returned.
	pub after: Option<(OffsetDateTime, Uuid)>,
	pub limit: i64,
}

/// Eligible users in feed order: `updated_at` descending, then `user_id` ascending.
pub async fn find_eligible_users(
	db: &Db,
	args: EligibleUsersArgs<'_>,
) -> Result<Vec<UserProfileRow>> {
	let EligibleUsersArgs { exclude_user_id, keyword, after, limit } = args;

	if limit <= 0 {
		return Err(Error::InvalidArgument("limit must be greater than zero.".to_string()));
	}

	let mut builder = QueryBuilder::<Postgres>::new("SELECT ");

	builder.push(PROFILE_COLUMNS);
	builder.push(" FROM user_profiles WHERE looking_for_teammates");

	if let Some(user_id) = exclude_user_id {
		builder.push(" AND user_id <> ");
		builder.push_bind(user_id);
	}
	if let Some(keyword) = keyword {
		let pattern = like_pattern(keyword);

		builder.push(" AND (display_name ILIKE ");
		builder.push_bind(pattern.clone());
		builder.push(" ESCAPE '\\' OR bio ILIKE ");
		builder.push_bind(pattern.clone());
		builder.push(" ESCAPE '\\' OR EXISTS (SELECT 1 FROM unnest(skills) AS skill");
		builder.push(" WHERE skill ILIKE ");
		builder.push_bind(pattern);
		builder.push(" ESCAPE '\\'))");
	}
	if let Some((updated_at, user_id)) = after {
		builder.push(" AND (updated_at < ");
		builder.push_bind(updated_at);
		builder.push(" OR (updated_at = ");
		builder.push_bind(updated_at);
		builder.push(" AND user_id > ");
		builder.push_bind(user_id);
		builder.push("))");
	}

	builder.push(" ORDER BY updated_at DESC, user_id ASC LIMIT ");
	builder.push_bind(limit);

	let rows: Vec<UserProfileRow> = builder.build_query_as().fetch_all(&db.pool).await?;

	Ok(rows)
}

pub async fn find_user(db: &Db, user_id: Uuid) -> Result<Option<UserProfileRow>> {
	let sql = format!("SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE user_id = $1");
	let row: Option<UserProfileRow> =
		sqlx::query_as(&sql).bind(user_id).fetch_optional(&db.pool).await?;

	Ok(row)
}

/// Inserts or replaces a profile. `updated_at` never moves backwards.
pub async fn upsert_user(db: &Db, row: &UserProfileRow) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO user_profiles (
	user_id,
	display_name,
	avatar_url,
	bio,
	skills,
	looking_for_teammates,
	social_links,
	contact_type,
	contact_value,
	contact_qr,
	created_at,
	updated_at
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12)
ON CONFLICT (user_id) DO UPDATE
SET
	display_name = EXCLUDED.display_name,
	avatar_url = EXCLUDED.avatar_url,
	bio = EXCLUDED.bio,
	skills = EXCLUDED.skills,
	looking_for_teammates = EXCLUDED.looking_for_teammates,
	social_links = EXCLUDED.social_links,
	contact_type = EXCLUDED.contact_type,
	contact_value = EXCLUDED.contact_value,
	contact_qr = EXCLUDED.contact_qr,
	updated_at = GREATEST(user_profiles.updated_at, EXCLUDED.updated_at)",
	)
	.bind(row.user_id)
	.bind(row.display_name.as_str())
	.bind(row.avatar_url.as_deref())
	.bind(row.bio.as_str())
	.bind(row.skills.as_slice())
	.bind(row.looking_for_teammates)
	.bind(Json(&row.social_links.0))
	.bind(row.contact_type.as_deref())
	.bind(row.contact_value.as_deref())
	.bind(row.contact_qr.as_deref())
	.bind(row.created_at)
	.bind(row.updated_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn delete_user(db: &Db, user_id: Uuid) -> Result<bool> {
	let result = sqlx::query("DELETE FROM user_profiles WHERE user_id = $1")
		.bind(user_id)
		.execute(&db.pool)
		.await?;

	Ok(result.rows_affected() > 0)
}

/// Escapes `LIKE` metacharacters so the keyword is matched literally.
pub fn like_pattern(keyword: &str) -> String {
	let mut out = String::with_capacity(keyword.len() + 2);

	out.push('%');

	for ch in keyword.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			out.push('\\');
		}
		out.push(ch);
	}

	out.push('%');

	out
}
