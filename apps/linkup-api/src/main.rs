use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = linkup_api::Args::parse();

	linkup_api::run(args).await
}
