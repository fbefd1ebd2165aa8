use std::io::Write;

use clap::Subcommand;
use neurostudy_core::storage::{credentials, Database};
use neurostudy_core::tutor::{
    build_system_prompt, completion_request, error_reply, greeting, ChatMessage, ChatSession,
    TurnOutcome, TutorClient,
};
use neurostudy_core::Config;

use super::{chapter_context, mode_state, print_json, runtime, CmdResult};

#[derive(Subcommand)]
pub enum TutorAction {
    /// Ask the tutor a question and stream the answer
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
        /// Chapter id to give the tutor as context
        #[arg(long)]
        chapter: Option<String>,
    },
    /// Print the system prompt for the current modes
    Prompt {
        #[arg(long)]
        chapter: Option<String>,
    },
    /// Print the opening greeting for the current modes
    Greeting {
        #[arg(long)]
        chapter: Option<String>,
    },
    /// Print the upstream model request for a question, without sending it
    Upstream {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
        #[arg(long)]
        chapter: Option<String>,
    },
}

pub fn run(action: TutorAction) -> CmdResult {
    let db = Database::open()?;
    let modes = mode_state(&db).preferences().selected_modes.clone();

    match action {
        TutorAction::Ask { message, chapter } => {
            let context = chapter_context(chapter.as_deref())?;
            let config = Config::load()?;
            let client = TutorClient::new(config.gateway.tutor_url()?, credentials::api_key())?;
            let mut chat = ChatSession::new(modes, context);

            let text = message.join(" ");
            let mut streamed = false;
            let outcome = runtime()?.block_on(chat.send(&client, &text, |delta| {
                streamed = true;
                print!("{delta}");
                let _ = std::io::stdout().flush();
            }))?;
            if streamed {
                println!();
            }

            // The session already swapped any partial reply for one error
            // reply; surface that reply as the command's error.
            if let TurnOutcome::Failed(err) = outcome {
                if streamed {
                    eprintln!("(partial reply discarded)");
                }
                let reply = chat
                    .messages()
                    .last()
                    .map(|m| m.content.clone())
                    .unwrap_or_else(|| error_reply(&err));
                return Err(reply.into());
            }
        }
        TutorAction::Prompt { chapter } => {
            let context = chapter_context(chapter.as_deref())?;
            print!("{}", build_system_prompt(&modes, context.as_ref()));
        }
        TutorAction::Greeting { chapter } => {
            let context = chapter_context(chapter.as_deref())?;
            println!("{}", greeting(&modes, context.as_ref()));
        }
        TutorAction::Upstream { message, chapter } => {
            let context = chapter_context(chapter.as_deref())?;
            let history = [ChatMessage::user(message.join(" "))];
            print_json(&completion_request(&modes, context.as_ref(), &history))?;
        }
    }
    Ok(())
}
