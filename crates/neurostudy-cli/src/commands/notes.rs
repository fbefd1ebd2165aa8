use std::path::PathBuf;

use clap::Subcommand;
use neurostudy_core::notes::{notes_completion_request, read_upload, DetailLevel, NotesClient};
use neurostudy_core::storage::{credentials, Database};
use neurostudy_core::Config;

use super::{mode_state, print_json, runtime, CmdResult};

#[derive(Subcommand)]
pub enum NotesAction {
    /// Summarize a .txt, .md or .pdf file into structured notes
    Generate {
        /// File to summarize (max 5MB)
        file: PathBuf,
        /// brief, standard or comprehensive
        #[arg(long, default_value = "standard")]
        detail: DetailLevel,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the upstream model request for a file, without sending it
    Upstream {
        file: PathBuf,
        #[arg(long, default_value = "standard")]
        detail: DetailLevel,
    },
}

pub fn run(action: NotesAction) -> CmdResult {
    match action {
        NotesAction::Upstream { file, detail } => {
            let (_, content) = read_upload(&file)?;
            let db = Database::open()?;
            let modes = mode_state(&db).preferences().selected_modes.clone();
            let request = notes_completion_request(&content, &modes, detail)
                .ok_or("No content provided")?;
            print_json(&request)?;
        }
        NotesAction::Generate { file, detail, json } => {
            let (kind, content) = read_upload(&file)?;
            tracing::debug!(file = %file.display(), %kind, "read upload");

            let db = Database::open()?;
            let modes = mode_state(&db).preferences().selected_modes.clone();
            let config = Config::load()?;
            let client = NotesClient::new(config.gateway.notes_url()?, credentials::api_key())?;

            let result = runtime()?
                .block_on(client.generate(&content, detail, &modes))
                .map_err(|e| match e {
                    neurostudy_core::CoreError::Gateway(g) => g.user_message(),
                    other => other.to_string(),
                })?;

            if json {
                return print_json(&result);
            }
            println!("Summary\n\n{}\n", result.summary);
            for (title, items) in result.sections() {
                println!("{title}");
                for item in items {
                    println!("  - {item}");
                }
                println!();
            }
        }
    }
    Ok(())
}
