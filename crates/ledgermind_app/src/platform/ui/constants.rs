pub const APP_TITLE: &str = "LedgerMind";
pub const APP_SUBTITLE: &str = "Financial intelligence grounded in your data";
pub const EMPTY_TRANSCRIPT_HINT: &str = "Ask questions about trades, holdings, or fund performance.";
pub const THINKING_TEXT: &str = "LedgerMind is thinking…";
pub const INPUT_PLACEHOLDER: &str = "Ask a question…";
pub const INPUT_TITLE: &str = " Question ";
pub const SEND_HINT: &str = " [Enter] Send ";
pub const USER_LABEL: &str = "You";
pub const ASSISTANT_LABEL: &str = "LedgerMind";
pub const STATUS_READY: &str = "Enter send · PgUp/PgDn scroll · Esc quit";
pub const STATUS_PENDING: &str = "Waiting for an answer… · PgUp/PgDn scroll · Esc quit";
pub const SPINNER_FRAMES: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];
/// Lines moved per PgUp/PgDn.
pub const SCROLL_STEP: u16 = 5;
