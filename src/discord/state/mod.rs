// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use crate::platform::Platform;
use crate::registry::ChannelRegistry;
use std::sync::Arc;

pub mod tickets;

use tickets::ClosingTickets;

/// Everything event handlers share.
pub struct BotState {
	pub platform: Arc<dyn Platform>,
	pub registry: ChannelRegistry,
	pub config: Arc<ConfigData>,
	pub closing_tickets: ClosingTickets,
}

impl BotState {
	pub fn new(platform: Arc<dyn Platform>, registry: ChannelRegistry, config: Arc<ConfigData>) -> Self {
		Self {
			platform,
			registry,
			config,
			closing_tickets: ClosingTickets::default(),
		}
	}
}
