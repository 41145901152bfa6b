use std::sync::Arc;

use linkup_service::LinkupService;
use linkup_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<LinkupService>,
}
impl AppState {
	pub async fn new(config: linkup_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::with_service(LinkupService::new(config, db)))
	}

	pub fn with_service(service: LinkupService) -> Self {
		Self { service: Arc::new(service) }
	}
}
