//! Schema bootstrap SQL, assembled from `sql/init.sql` and the files it includes.

const INIT: &str = include_str!("../../../sql/init.sql");
const INCLUDES: [(&str, &str); 2] = [
	("00_extensions.sql", include_str!("../../../sql/00_extensions.sql")),
	("tables/001_user_profiles.sql", include_str!("../../../sql/tables/001_user_profiles.sql")),
];

pub fn render_schema() -> String {
	let mut out = String::with_capacity(
		INIT.len() + INCLUDES.iter().map(|(_, sql)| sql.len()).sum::<usize>(),
	);

	for line in INIT.lines() {
		let included = line
			.trim()
			.strip_prefix("\\ir ")
			.and_then(|path| INCLUDES.iter().find(|(name, _)| *name == path.trim()))
			.map(|(_, sql)| *sql);

		out.push_str(included.unwrap_or(line));
		out.push('\n');
	}

	out
}

/// Splits rendered SQL into executable statements. The schema files contain no `;` inside
/// literals or function bodies.
pub fn statements(sql: &str) -> impl Iterator<Item = &str> {
	sql.split(';').map(str::trim).filter(|statement| !statement.is_empty())
}
