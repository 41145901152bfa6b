use std::collections::BTreeMap;

use sqlx::types::Json;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use linkup_config::Postgres;
use linkup_storage::{
	db::Db,
	models::UserProfileRow,
	queries::{self, EligibleUsersArgs},
};
use linkup_testkit::TestDatabase;

fn row(
	user_id: Uuid,
	display_name: &str,
	skills: &[&str],
	updated_at: OffsetDateTime,
) -> UserProfileRow {
	UserProfileRow {
		user_id,
		display_name: display_name.to_string(),
		avatar_url: None,
		bio: String::new(),
		skills: skills.iter().map(|skill| skill.to_string()).collect(),
		looking_for_teammates: true,
		social_links: Json(BTreeMap::new()),
		contact_type: None,
		contact_value: None,
		contact_qr: None,
		created_at: updated_at,
		updated_at,
	}
}

async fn bootstrapped(test_db: &TestDatabase) -> Db {
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	db
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set LINKUP_PG_DSN to run."]
async fn db_connects_and_bootstraps_twice() {
	let Some(test_db) = TestDatabase::from_env().await.expect("Failed to create test database.")
	else {
		eprintln!("Skipping db_connects_and_bootstraps_twice; set LINKUP_PG_DSN to run it.");

		return;
	};
	let db = bootstrapped(&test_db).await;

	db.ensure_schema().await.expect("Schema bootstrap must be idempotent.");

	let count: i64 = sqlx::query_scalar(
		"SELECT count(*) FROM information_schema.tables WHERE table_name = 'user_profiles'",
	)
	.fetch_one(&db.pool)
	.await
	.expect("Failed to query schema tables.");

	assert_eq!(count, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set LINKUP_PG_DSN to run."]
async fn eligible_users_follow_keyset_order() {
	let Some(test_db) = TestDatabase::from_env().await.expect("Failed to create test database.")
	else {
		eprintln!("Skipping eligible_users_follow_keyset_order; set LINKUP_PG_DSN to run it.");

		return;
	};
	let db = bootstrapped(&test_db).await;
	let now = OffsetDateTime::now_utc().replace_nanosecond(0).expect("Valid nanosecond.");
	let first = Uuid::from_u128(1);
	let second = Uuid::from_u128(2);
	let third = Uuid::from_u128(3);
	let hidden = Uuid::from_u128(4);

	queries::upsert_user(&db, &row(second, "Second", &["go"], now)).await.expect("Insert failed.");
	queries::upsert_user(&db, &row(first, "First", &[], now)).await.expect("Insert failed.");
	queries::upsert_user(&db, &row(third, "Third 100%", &["GoLang"], now - Duration::hours(1)))
		.await
		.expect("Insert failed.");

	let mut hidden_row = row(hidden, "Hidden go", &["go"], now + Duration::hours(1));

	hidden_row.looking_for_teammates = false;

	queries::upsert_user(&db, &hidden_row).await.expect("Insert failed.");

	let all = queries::find_eligible_users(
		&db,
		EligibleUsersArgs { exclude_user_id: None, keyword: None, after: None, limit: 10 },
	)
	.await
	.expect("Query failed.");
	let ids: Vec<Uuid> = all.iter().map(|row| row.user_id).collect();

	assert_eq!(ids, vec![first, second, third]);

	let after_first = queries::find_eligible_users(
		&db,
		EligibleUsersArgs {
			exclude_user_id: None,
			keyword: None,
			after: Some((now, first)),
			limit: 10,
		},
	)
	.await
	.expect("Query failed.");
	let ids: Vec<Uuid> = after_first.iter().map(|row| row.user_id).collect();

	assert_eq!(ids, vec![second, third]);

	let by_keyword = queries::find_eligible_users(
		&db,
		EligibleUsersArgs {
			exclude_user_id: Some(second),
			keyword: Some("GO"),
			after: None,
			limit: 10,
		},
	)
	.await
	.expect("Query failed.");
	let ids: Vec<Uuid> = by_keyword.iter().map(|row| row.user_id).collect();

	assert_eq!(ids, vec![third]);

	let literal_percent = queries::find_eligible_users(
		&db,
		EligibleUsersArgs { exclude_user_id: None, keyword: Some("0%"), after: None, limit: 10 },
	)
	.await
	.expect("Query failed.");

	assert_eq!(literal_percent.len(), 1);
	assert_eq!(literal_percent[0].user_id, third);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set LINKUP_PG_DSN to run."]
async fn upsert_never_moves_updated_at_backwards() {
	let Some(test_db) = TestDatabase::from_env().await.expect("Failed to create test database.")
	else {
		eprintln!("Skipping upsert_never_moves_updated_at_backwards; set LINKUP_PG_DSN to run it.");

		return;
	};
	let db = bootstrapped(&test_db).await;
	let now = OffsetDateTime::now_utc().replace_nanosecond(0).expect("Valid nanosecond.");
	let user_id = Uuid::new_v4();

	queries::upsert_user(&db, &row(user_id, "Before", &[], now)).await.expect("Insert failed.");
	queries::upsert_user(&db, &row(user_id, "After", &[], now - Duration::days(1)))
		.await
		.expect("Update failed.");

	let stored = queries::find_user(&db, user_id)
		.await
		.expect("Query failed.")
		.expect("User must exist.");

	assert_eq!(stored.display_name, "After");
	assert_eq!(stored.updated_at, now);
	assert!(queries::delete_user(&db, user_id).await.expect("Delete failed."));
	assert!(!queries::delete_user(&db, user_id).await.expect("Delete failed."));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
