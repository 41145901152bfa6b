mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, MAX_PAGE_LIMIT, Postgres, Recommendations, Security, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let recommendations = &cfg.recommendations;
	let security = &cfg.security;

	if cfg.service.http_bind.trim().is_empty() {
		return Err(invalid("service.http_bind", "must be non-empty."));
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(invalid("storage.postgres.dsn", "must be non-empty."));
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(invalid("storage.postgres.pool_max_conns", "must be greater than zero."));
	}
	if !(1..=MAX_PAGE_LIMIT).contains(&recommendations.max_limit) {
		return Err(invalid(
			"recommendations.max_limit",
			format!("must be in the range 1-{MAX_PAGE_LIMIT}."),
		));
	}
	if !(1..=recommendations.max_limit).contains(&recommendations.default_limit) {
		return Err(invalid("recommendations.default_limit", "must be in the range 1-max_limit."));
	}
	if security.viewer_header.is_empty() {
		return Err(invalid("security.viewer_header", "must be non-empty."));
	}
	if !is_header_name(&security.viewer_header) {
		return Err(invalid("security.viewer_header", "must be a valid HTTP header name."));
	}

	Ok(())
}

fn invalid(key: &'static str, message: impl Into<String>) -> Error {
	Error::Validation { key, message: message.into() }
}

fn normalize(cfg: &mut Config) {
	cfg.security.viewer_header = cfg.security.viewer_header.trim().to_ascii_lowercase();

	cfg.security.gateway_auth_token = cfg
		.security
		.gateway_auth_token
		.take()
		.map(|token| token.trim().to_string())
		.filter(|token| !token.is_empty());
}

fn is_header_name(name: &str) -> bool {
	name.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
}
