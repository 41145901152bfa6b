use sqlx::types::Json;
use uuid::Uuid;

use crate::{
	BoxFuture, Error, Result,
	directory::{CandidateQuery, UserDirectory},
};
use linkup_domain::profile::{self, ContactInfo, ContactType, UserProfile};
use linkup_storage::{
	db::Db,
	models::UserProfileRow,
	queries::{self, EligibleUsersArgs},
};

pub struct PgDirectory {
	pub db: Db,
}
impl PgDirectory {
	pub fn new(db: Db) -> Self {
		Self { db }
	}

	async fn eligible_window(&self, query: &CandidateQuery) -> Result<Vec<UserProfile>> {
		let rows = queries::find_eligible_users(
			&self.db,
			EligibleUsersArgs {
				exclude_user_id: query.exclude_id,
				keyword: query.keyword.as_ref().map(|keyword| keyword.as_str()),
				after: query.after.map(|after| (after.updated_at, after.user_id)),
				limit: i64::from(query.limit),
			},
		)
		.await?;

		rows.into_iter().map(profile_from_row).collect()
	}

	async fn lookup(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
		queries::find_user(&self.db, user_id).await?.map(profile_from_row).transpose()
	}

	async fn store(&self, profile: &UserProfile) -> Result<()> {
		profile::validate(profile)?;
		queries::upsert_user(&self.db, &row_from_profile(profile)).await?;

		Ok(())
	}

	async fn remove(&self, user_id: Uuid) -> Result<bool> {
		Ok(queries::delete_user(&self.db, user_id).await?)
	}
}
impl UserDirectory for PgDirectory {
	fn find_eligible_candidates<'a>(
		&'a self,
		query: &'a CandidateQuery,
	) -> BoxFuture<'a, Result<Vec<UserProfile>>> {
		Box::pin(self.eligible_window(query))
	}

	fn find_by_id<'a>(&'a self, user_id: Uuid) -> BoxFuture<'a, Result<Option<UserProfile>>> {
		Box::pin(self.lookup(user_id))
	}

	fn upsert_profile<'a>(&'a self, profile: &'a UserProfile) -> BoxFuture<'a, Result<()>> {
		Box::pin(self.store(profile))
	}

	fn delete_profile<'a>(&'a self, user_id: Uuid) -> BoxFuture<'a, Result<bool>> {
		Box::pin(self.remove(user_id))
	}
}

fn profile_from_row(row: UserProfileRow) -> Result<UserProfile> {
	let contact_type = match row.contact_type.as_deref() {
		Some(raw) => Some(ContactType::parse(raw).ok_or_else(|| Error::Storage {
			message: format!("Stored contact_type {raw:?} is not recognized."),
		})?),
		None => None,
	};

	Ok(UserProfile {
		id: row.user_id,
		display_name: row.display_name,
		avatar_url: row.avatar_url,
		bio: row.bio,
		skills: row.skills,
		looking_for_teammates: row.looking_for_teammates,
		social_links: row.social_links.0,
		contact: ContactInfo {
			contact_type,
			contact_value: row.contact_value,
			contact_qr: row.contact_qr,
		},
		created_at: row.created_at,
		updated_at: row.updated_at,
	})
}

fn row_from_profile(profile: &UserProfile) -> UserProfileRow {
	UserProfileRow {
		user_id: profile.id,
		display_name: profile.display_name.clone(),
		avatar_url: profile.avatar_url.clone(),
		bio: profile.bio.clone(),
		skills: profile.skills.clone(),
		looking_for_teammates: profile.looking_for_teammates,
		social_links: Json(profile.social_links.clone()),
		contact_type: profile.contact.contact_type.map(|kind| kind.as_str().to_string()),
		contact_value: profile.contact.contact_value.clone(),
		contact_qr: profile.contact.contact_qr.clone(),
		created_at: profile.created_at,
		updated_at: profile.updated_at,
	}
}
