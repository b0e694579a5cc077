use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bonfire_core::{PublisherChanges, PublisherForm};

use crate::app::App;
use crate::cli_types::PublisherFields;
use crate::error::CliError;

use super::display::{log_done, log_empty, log_heading};

pub(crate) fn run_publishers_list(app: &App) -> Result<(), CliError> {
    let mut publishers = app.run("Loading publishers...", app.client.list_publishers())?;
    publishers.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    log_heading("Publishers");
    if publishers.is_empty() {
        log_empty("No publishers.");
    }
    for p in &publishers {
        let mut details = Vec::new();
        if let Some(country) = &p.country {
            details.push(country.clone());
        }
        if let Some(year) = p.founded_year {
            details.push(format!("since {}", year));
        }
        if let Some(site) = &p.website {
            details.push(site.clone());
        }
        log::info!(
            "  {} {}  {}",
            p.id.if_supports_color(Stdout, |t| t.dimmed()),
            p.name.if_supports_color(Stdout, |t| t.bold()),
            details.join(" | ").if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

fn publisher_form(name: String, fields: PublisherFields) -> PublisherForm {
    PublisherForm {
        name,
        country: fields.country,
        founded_year: fields.founded_year,
        website: fields.website,
        description: fields.description,
    }
}

pub(crate) fn run_publishers_create(
    app: &App,
    name: String,
    fields: PublisherFields,
) -> Result<(), CliError> {
    let new = publisher_form(name, fields).validate()?;
    let created = app.run("Creating publisher...", app.client.create_publisher(&new))?;
    log_done(&format!("Created publisher {} ({})", created.name, created.id));
    Ok(())
}

/// Blank optional fields are left as they are on the backend.
pub(crate) fn run_publishers_update(
    app: &App,
    id: &str,
    name: String,
    fields: PublisherFields,
) -> Result<(), CliError> {
    let new = publisher_form(name, fields).validate()?;
    let changes = PublisherChanges {
        name: Some(new.name),
        description: new.description,
        website: new.website,
        founded_year: new.founded_year,
        country: new.country,
    };
    let updated = app.run(
        "Updating publisher...",
        app.client.update_publisher(id, &changes),
    )?;
    log_done(&format!("Updated publisher {}", updated.name));
    Ok(())
}

pub(crate) fn run_publishers_delete(app: &App, id: &str) -> Result<(), CliError> {
    let ack = app.run("Deleting publisher...", app.client.delete_publisher(id))?;
    log_done(&ack.message);
    Ok(())
}
