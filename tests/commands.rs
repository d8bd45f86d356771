// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod common;

use common::{FakePlatform, GUILD, USER, bot_state};
use std::sync::Arc;
use tempfile::tempdir;
use twilight_model::guild::Permissions;
use twilight_model::id::Id;
use vanilla_bot::discord::commands::{CommandInvocation, dispatch};
use vanilla_bot::error::PERMISSION_DENIED_MESSAGE;
use vanilla_bot::poll::{POLL_MARKERS, POLL_TITLE};

const COMMAND_CHANNEL: u64 = 77;

fn invocation() -> CommandInvocation {
	CommandInvocation {
		guild_id: Some(Id::new(GUILD)),
		channel_id: Id::new(COMMAND_CHANNEL),
		author_id: Id::new(USER),
	}
}

#[tokio::test]
async fn registered_channel_receives_announcement() {
	let dir = tempdir().unwrap();
	let platform = Arc::new(FakePlatform::new());
	platform.add_channel(555, "anuncios");
	let state = bot_state(&platform, &dir).await;

	let reply = dispatch(
		&state,
		&invocation(),
		"registrar_canal",
		"555 anuncios",
		Permissions::ADMINISTRATOR,
	)
	.await;
	assert_eq!(reply.as_deref(), Some("Canal registrado: **anuncios** con ID `555`."));

	let reply = dispatch(&state, &invocation(), "enviar", "anuncios Hola", Permissions::empty()).await;
	assert_eq!(reply.as_deref(), Some("Mensaje enviado al canal **anuncios**."));

	let sent = platform.sent_to(555);
	assert_eq!(sent.len(), 1);
	let embed = &sent[0].embeds[0];
	assert_eq!(embed.title.as_deref(), Some("[LATAMRUST] VANILLA #1"));
	assert_eq!(embed.description.as_deref(), Some("Hola"));

	let saved = std::fs::read_to_string(dir.path().join("channels.json")).unwrap();
	assert_eq!(saved, "{\n    \"anuncios\": 555\n}");
}

#[tokio::test]
async fn english_aliases_work() {
	let dir = tempdir().unwrap();
	let platform = Arc::new(FakePlatform::new());
	platform.add_channel(555, "anuncios");
	let state = bot_state(&platform, &dir).await;

	let reply = dispatch(
		&state,
		&invocation(),
		"register-channel",
		"555 anuncios",
		Permissions::ADMINISTRATOR,
	)
	.await;
	assert!(reply.is_some_and(|reply| reply.starts_with("Canal registrado")));
	assert_eq!(state.registry.get("anuncios").await, Some(Id::new(555)));
}

#[tokio::test]
async fn registering_requires_administrator() {
	let dir = tempdir().unwrap();
	let platform = Arc::new(FakePlatform::new());
	platform.add_channel(555, "anuncios");
	let state = bot_state(&platform, &dir).await;

	let reply = dispatch(
		&state,
		&invocation(),
		"registrar_canal",
		"555 anuncios",
		Permissions::MANAGE_MESSAGES,
	)
	.await;
	assert_eq!(reply.as_deref(), Some(PERMISSION_DENIED_MESSAGE));
	assert!(state.registry.entries().await.is_empty());
	assert!(!dir.path().join("channels.json").exists());
}

#[tokio::test]
async fn registering_unknown_channel_changes_nothing() {
	let dir = tempdir().unwrap();
	let platform = Arc::new(FakePlatform::new());
	let state = bot_state(&platform, &dir).await;

	let reply = dispatch(
		&state,
		&invocation(),
		"registrar_canal",
		"999 fantasma",
		Permissions::ADMINISTRATOR,
	)
	.await;
	assert_eq!(reply.as_deref(), Some("El canal no existe o el ID no es válido."));
	assert!(state.registry.get("fantasma").await.is_none());
}

#[tokio::test]
async fn malformed_channel_id_is_rejected() {
	let dir = tempdir().unwrap();
	let platform = Arc::new(FakePlatform::new());
	let state = bot_state(&platform, &dir).await;

	let reply = dispatch(
		&state,
		&invocation(),
		"registrar_canal",
		"abc anuncios",
		Permissions::ADMINISTRATOR,
	)
	.await;
	assert_eq!(reply.as_deref(), Some("`abc` no es un ID de canal válido."));
}

#[tokio::test]
async fn missing_arguments_reply_with_usage() {
	let dir = tempdir().unwrap();
	let platform = Arc::new(FakePlatform::new());
	let state = bot_state(&platform, &dir).await;

	let reply = dispatch(&state, &invocation(), "enviar", "anuncios", Permissions::empty()).await;
	assert_eq!(reply.as_deref(), Some("Uso: `!enviar <nombre> <mensaje...>`"));

	let reply = dispatch(&state, &invocation(), "panel", "extra", Permissions::ADMINISTRATOR).await;
	assert_eq!(reply.as_deref(), Some("Uso: `!panel`"));
	assert!(platform.state().sent.is_empty());
}

#[tokio::test]
async fn sending_to_unregistered_name_fails() {
	let dir = tempdir().unwrap();
	let platform = Arc::new(FakePlatform::new());
	let state = bot_state(&platform, &dir).await;

	let reply = dispatch(&state, &invocation(), "enviar", "noticias Hola", Permissions::empty()).await;
	assert_eq!(
		reply.as_deref(),
		Some("No hay ningún canal registrado con el nombre **noticias**.")
	);
	assert!(platform.state().sent.is_empty());
}

#[tokio::test]
async fn sending_to_vanished_channel_fails() {
	let dir = tempdir().unwrap();
	let platform = Arc::new(FakePlatform::new());
	platform.add_channel(555, "anuncios");
	let state = bot_state(&platform, &dir).await;
	dispatch(
		&state,
		&invocation(),
		"registrar_canal",
		"555 anuncios",
		Permissions::ADMINISTRATOR,
	)
	.await;
	platform.state().channels.clear();

	let reply = dispatch(&state, &invocation(), "enviar", "anuncios Hola", Permissions::empty()).await;
	assert_eq!(reply.as_deref(), Some("No se pudo encontrar el canal."));
}

#[tokio::test]
async fn platform_failures_get_a_generic_reply() {
	let dir = tempdir().unwrap();
	let platform = Arc::new(FakePlatform::new());
	let state = bot_state(&platform, &dir).await;
	platform.state().fail_sends = true;

	let reply = dispatch(&state, &invocation(), "sugerencia", "", Permissions::empty()).await;
	assert_eq!(reply.as_deref(), Some("Ocurrió un error al procesar el comando."));
}

#[tokio::test]
async fn poll_is_posted_with_markers_in_order() {
	let dir = tempdir().unwrap();
	let platform = Arc::new(FakePlatform::new());
	let state = bot_state(&platform, &dir).await;

	let reply = dispatch(
		&state,
		&invocation(),
		"encuesta",
		"\"¿Color favorito?\" Rojo Azul Verde",
		Permissions::empty(),
	)
	.await;
	assert_eq!(reply.as_deref(), Some("Encuesta creada exitosamente."));

	let sent = platform.sent_to(COMMAND_CHANNEL);
	assert_eq!(sent.len(), 1);
	let embed = &sent[0].embeds[0];
	assert_eq!(embed.title.as_deref(), Some(POLL_TITLE));
	assert_eq!(embed.description.as_deref(), Some("¿Color favorito?"));
	let field_names: Vec<&str> = embed.fields.iter().map(|field| field.name.as_str()).collect();
	assert_eq!(field_names, ["1️⃣ Rojo", "2️⃣ Azul", "3️⃣ Verde"]);

	let reactions: Vec<String> = platform
		.state()
		.reactions
		.iter()
		.map(|(_, _, emoji)| emoji.clone())
		.collect();
	assert_eq!(reactions, POLL_MARKERS[..3]);
}

#[tokio::test]
async fn poll_option_count_is_checked() {
	let dir = tempdir().unwrap();
	let platform = Arc::new(FakePlatform::new());
	let state = bot_state(&platform, &dir).await;

	let reply = dispatch(&state, &invocation(), "encuesta", "¿Sí? Sí", Permissions::empty()).await;
	assert_eq!(reply.as_deref(), Some("¡Debes proporcionar al menos dos opciones!"));

	let options: Vec<String> = (1..=11).map(|n| n.to_string()).collect();
	let raw_args = format!("¿Número? {}", options.join(" "));
	let reply = dispatch(&state, &invocation(), "encuesta", &raw_args, Permissions::empty()).await;
	assert_eq!(reply.as_deref(), Some("¡No puedes proporcionar más de 10 opciones!"));

	assert!(platform.state().sent.is_empty());
	assert!(platform.state().reactions.is_empty());
}

#[tokio::test]
async fn panel_and_suggestion_prompt_carry_buttons() {
	let dir = tempdir().unwrap();
	let platform = Arc::new(FakePlatform::new());
	let state = bot_state(&platform, &dir).await;

	let reply = dispatch(&state, &invocation(), "panel", "", Permissions::ADMINISTRATOR).await;
	assert!(reply.is_none());
	let reply = dispatch(&state, &invocation(), "sugerencia", "", Permissions::empty()).await;
	assert!(reply.is_none());

	let sent = platform.sent_to(COMMAND_CHANNEL);
	assert_eq!(sent.len(), 2);
	assert_eq!(sent[0].embeds[0].title.as_deref(), Some("Sistema de Tickets"));
	assert_eq!(sent[0].components.len(), 1);
	assert_eq!(sent[1].components.len(), 1);
}

#[tokio::test]
async fn unknown_commands_are_ignored() {
	let dir = tempdir().unwrap();
	let platform = Arc::new(FakePlatform::new());
	let state = bot_state(&platform, &dir).await;

	let reply = dispatch(&state, &invocation(), "ayuda", "", Permissions::ADMINISTRATOR).await;
	assert!(reply.is_none());
	assert!(platform.state().sent.is_empty());
}
