// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::PlatformError;
use crate::platform::{ChannelOverwrite, PermissionGrant, PermissionState, Principal};
use std::collections::HashMap;
use std::future::IntoFuture;
use twilight_http::client::Client;
use twilight_model::guild::Permissions;
use twilight_model::channel::permission_overwrite::{PermissionOverwrite, PermissionOverwriteType};
use twilight_model::id::Id;
use twilight_model::id::marker::{GuildMarker, RoleMarker, UserMarker};
use twilight_util::permission_calculator::PermissionCalculator;

/// Gets the server-wide permissions a member has, taking server ownership and the administrator permission into
/// account.
pub async fn member_permissions(
	guild_id: Id<GuildMarker>,
	user_id: Id<UserMarker>,
	http_client: &Client,
) -> Result<Permissions, PlatformError> {
	let member_future = http_client.guild_member(guild_id, user_id).into_future();
	let guild_future = http_client.guild(guild_id).into_future();
	let guild_roles_future = http_client.roles(guild_id).into_future();
	let (member, guild, guild_roles) = tokio::join!(member_future, guild_future, guild_roles_future);

	let member = member?.model().await?;
	let guild = guild?.model().await?;
	let guild_roles = guild_roles?.models().await?;

	let guild_everyone_role_id: Id<RoleMarker> = guild_id.cast();
	let role_permissions: HashMap<Id<RoleMarker>, Permissions> =
		guild_roles.iter().map(|role| (role.id, role.permissions)).collect();
	let everyone_role_permissions = role_permissions
		.get(&guild_everyone_role_id)
		.copied()
		.unwrap_or_else(Permissions::empty);
	let member_roles: Vec<(Id<RoleMarker>, Permissions)> = member
		.roles
		.iter()
		.map(|role_id| {
			(
				*role_id,
				role_permissions
					.get(role_id)
					.copied()
					.unwrap_or_else(Permissions::empty),
			)
		})
		.collect();

	let calculator = PermissionCalculator::new(guild_id, user_id, everyone_role_permissions, &member_roles)
		.owner_id(guild.owner_id);
	Ok(calculator.root())
}

fn grant_bits(grant: &PermissionGrant, state: PermissionState) -> Permissions {
	let mut permissions = Permissions::empty();
	if grant.view == state {
		permissions |= Permissions::VIEW_CHANNEL;
	}
	if grant.send == state {
		permissions |= Permissions::SEND_MESSAGES;
	}
	if grant.attach == state {
		permissions |= Permissions::ATTACH_FILES;
	}
	permissions
}

/// Turns an overwrite into the form the Discord API takes when creating a channel.
pub fn discord_overwrite(overwrite: &ChannelOverwrite) -> PermissionOverwrite {
	let (id, kind) = match overwrite.principal {
		Principal::Role(role_id) => (role_id.cast(), PermissionOverwriteType::Role),
		Principal::Member(user_id) => (user_id.cast(), PermissionOverwriteType::Member),
	};
	PermissionOverwrite {
		allow: grant_bits(&overwrite.grant, PermissionState::Allow),
		deny: grant_bits(&overwrite.grant, PermissionState::Deny),
		id,
		kind,
	}
}
