//! Interactive selection prompts.

use std::io::IsTerminal as _;

use dialoguer::{Input, MultiSelect, Select, theme::ColorfulTheme};

use dockwright_core::domain::{DatabaseVariant, Extra};

use super::selection::SelectionDraft;
use crate::error::{CliError, CliResult};

/// Ask for every selection value, offering `draft` as the defaults.
pub fn ask(draft: SelectionDraft) -> CliResult<SelectionDraft> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::InvalidInput {
            message: "--interactive needs a terminal on stdin".into(),
            source: None,
        });
    }

    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Base name for containers")
        .default(draft.name)
        .interact_text()
        .map_err(prompt_failed)?;

    let nginx_port: u16 = Input::with_theme(&theme)
        .with_prompt("Nginx port")
        .default(draft.nginx_port)
        .interact_text()
        .map_err(prompt_failed)?;

    let databases: Vec<&str> = DatabaseVariant::ALL.iter().map(|d| d.description()).collect();
    let current = DatabaseVariant::ALL
        .iter()
        .position(|d| *d == draft.database)
        .unwrap_or(0);
    let database = Select::with_theme(&theme)
        .with_prompt("Database")
        .items(databases.as_slice())
        .default(current)
        .interact()
        .map_err(prompt_failed)?;
    let database = DatabaseVariant::ALL.get(database).copied().unwrap_or_default();

    let labels: Vec<&str> = Extra::ALL.iter().map(|e| e.description()).collect();
    let checked: Vec<bool> = Extra::ALL.iter().map(|e| draft.extras.contains(e)).collect();
    let extras: Vec<Extra> = MultiSelect::with_theme(&theme)
        .with_prompt("Extra services (space to toggle)")
        .items(labels.as_slice())
        .defaults(checked.as_slice())
        .interact()
        .map_err(prompt_failed)?
        .into_iter()
        .filter_map(|i| Extra::ALL.get(i).copied())
        .collect();

    let mut answer = SelectionDraft {
        name,
        nginx_port,
        database,
        extras,
        ..draft
    };

    if answer.extras.contains(&Extra::Notifications) {
        answer.notifications_port = Input::with_theme(&theme)
            .with_prompt("Notifications port")
            .default(answer.notifications_port)
            .interact_text()
            .map_err(prompt_failed)?;
        answer.notifications_path = Input::with_theme(&theme)
            .with_prompt("Notifications app path")
            .default(answer.notifications_path)
            .interact_text()
            .map_err(prompt_failed)?;
    }

    if answer.extras.contains(&Extra::Adminer) {
        answer.adminer_port = Input::with_theme(&theme)
            .with_prompt("Adminer port")
            .default(answer.adminer_port)
            .interact_text()
            .map_err(prompt_failed)?;
    }

    Ok(answer)
}

fn prompt_failed(err: dialoguer::Error) -> CliError {
    CliError::InvalidInput {
        message: format!("prompt failed: {err}"),
        source: Some(Box::new(err)),
    }
}
