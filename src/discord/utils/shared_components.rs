// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::interactions::InteractionKind;
use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};

fn button_row(kind: InteractionKind, label: &str, style: ButtonStyle) -> Component {
	let button = Button {
		custom_id: Some(String::from(kind.custom_id())),
		disabled: false,
		emoji: None,
		label: Some(String::from(label)),
		style,
		url: None,
		sku_id: None,
	};
	Component::ActionRow(ActionRow {
		components: vec![Component::Button(button)],
	})
}

pub fn open_ticket_button() -> Component {
	button_row(InteractionKind::OpenTicket, "Abrir Ticket", ButtonStyle::Primary)
}

pub fn close_ticket_button() -> Component {
	button_row(InteractionKind::CloseTicket, "Cerrar Ticket", ButtonStyle::Danger)
}

pub fn send_suggestion_button() -> Component {
	button_row(InteractionKind::RequestSuggestion, "Enviar Sugerencia", ButtonStyle::Primary)
}
