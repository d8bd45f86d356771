// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vanilla_bot::config::{DEFAULT_CONFIG_PATH, parse_config};
use vanilla_bot::discord::{run_bot, set_up_client};
use vanilla_bot::registry::ChannelRegistry;

#[tokio::main]
async fn main() -> miette::Result<()> {
	// A missing .env is fine; the token can come from the real environment.
	let _ = dotenvy::dotenv();

	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let config_path = std::env::args().nth(1).unwrap_or_else(|| String::from(DEFAULT_CONFIG_PATH));
	let config = Arc::new(parse_config(&config_path).await?);
	let registry = ChannelRegistry::open(config.channels_file.clone()).await?;

	let http_client = set_up_client(&config);
	run_bot(config, registry, http_client).await
}
