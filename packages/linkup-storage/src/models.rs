use std::collections::BTreeMap;

use sqlx::types::Json;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserProfileRow {
	pub user_id: Uuid,
	pub display_name: String,
	pub avatar_url: Option<String>,
	pub bio: String,
	pub skills: Vec<String>,
	pub looking_for_teammates: bool,
	pub social_links: Json<BTreeMap<String, String>>,
	pub contact_type: Option<String>,
	pub contact_value: Option<String>,
	pub contact_qr: Option<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
