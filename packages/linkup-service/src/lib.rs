pub mod directory;
pub mod recommendations;
pub mod users;

mod error;

pub use directory::{CandidateQuery, MemoryDirectory, PgDirectory, UserDirectory};
pub use error::{Error, Result};
pub use recommendations::{RecommendationItem, RecommendationPage, RecommendationRequest};
pub use users::{ContactDetails, OwnProfile, PublicProfile};

use std::{future::Future, pin::Pin, sync::Arc};

use linkup_config::Config;
use linkup_storage::db::Db;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub struct LinkupService {
	pub cfg: Config,
	pub directory: Arc<dyn UserDirectory>,
}
impl LinkupService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, directory: Arc::new(PgDirectory::new(db)) }
	}

	pub fn with_directory(cfg: Config, directory: Arc<dyn UserDirectory>) -> Self {
		Self { cfg, directory }
	}
}
