use std::time::Duration;

/// How long the event loop waits for a key before checking engine messages.
pub const POLL_PERIOD: Duration = Duration::from_millis(50);

pub const APP_TITLE: &str = "Opsdeck";

pub const TAB_COMMANDS: &str = "Command Runner";
pub const TAB_UPLOAD: &str = "Drive Sync";
pub const TAB_BOOKMARKS: &str = "Bookmark Sync";

pub const NOTE_COMMANDS: &str =
    "Note: simulation only. Commands are never executed on your OS.";
pub const NOTE_UPLOAD: &str = "Note: simulation only. No local files are read or uploaded.";
pub const NOTE_BOOKMARKS: &str =
    "Note: simulation only. Browser bookmark stores are never touched.";

pub const HINT_COMMANDS: &str =
    "r run all | R reset | a add | d delete | j/k select | 1/2/3 panel | q quit";
pub const HINT_COMMANDS_EDITING: &str = "Enter add task | Esc cancel";
pub const HINT_UPLOAD: &str = "f select folder | u upload | 1/2/3 panel | q quit";
pub const HINT_BOOKMARKS: &str = "s sync all | 1/2/3 panel | q quit";

pub const OUTPUT_PLACEHOLDER: &str = "No output yet. Press r to run all.";
pub const FOLDER_PROMPT: &str = "Press f to simulate selecting a local folder.";
pub const UPLOAD_COMPLETE: &str = "Upload complete!";
