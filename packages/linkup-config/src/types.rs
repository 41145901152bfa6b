use serde::Deserialize;

/// Hard ceiling for `recommendations.max_limit`.
pub const MAX_PAGE_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub recommendations: Recommendations,
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Recommendations {
	/// Page size used when the request carries no usable `limit`.
	pub default_limit: u32,
	/// Requested limits are clamped into `1..=max_limit`.
	pub max_limit: u32,
	/// Keep the viewer out of their own feed.
	pub exclude_self: bool,
}
impl Default for Recommendations {
	fn default() -> Self {
		Self { default_limit: 20, max_limit: MAX_PAGE_LIMIT, exclude_self: true }
	}
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
	/// Header carrying the viewer id resolved by the authentication gateway.
	#[serde(default = "default_viewer_header")]
	pub viewer_header: String,
	/// Optional. When set, the viewer header is trusted only alongside
	/// `Authorization: Bearer <token>`.
	pub gateway_auth_token: Option<String>,
}

fn default_viewer_header() -> String {
	"x-linkup-viewer-id".to_string()
}
