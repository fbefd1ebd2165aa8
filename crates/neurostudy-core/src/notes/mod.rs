//! Notes generation: upload handling, the notes prompt and the client.

mod client;
mod prompt;
mod request;
mod upload;

pub use client::NotesClient;
pub use prompt::{
    build_notes_prompt, detail_instructions, is_token_limit_error, notes_completion_request,
    parse_notes_response, style_instructions, truncate_for_model, NotesCompletionRequest,
    NotesMessage, Truncated, MAX_INPUT_CHARS, NOTES_MODEL, TRUNCATION_MARKER, UNPARSED_NOTES,
};
pub use request::{DetailLevel, Notes, NotesRequest, NotesResult};
pub use upload::{
    extract_text, read_upload, validate_upload, UploadKind, MAX_FILE_SIZE, PDF_FALLBACK_TEXT,
};
