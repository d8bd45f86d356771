// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::CommandInvocation;
use crate::discord::state::BotState;
use crate::discord::utils::messages::suggestion_prompt_message;
use crate::error::CommandError;

pub async fn handle_command(state: &BotState, invocation: &CommandInvocation) -> Result<Option<String>, CommandError> {
	state
		.platform
		.send_message(invocation.channel_id, &suggestion_prompt_message())
		.await?;
	Ok(None)
}
