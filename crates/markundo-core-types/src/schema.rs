//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_NODE_ID: &str = "node_id";

// Command log
pub const FIELD_COMMAND: &str = "command";
pub const FIELD_RANGE_START: &str = "range_start";
pub const FIELD_REPLAYED: &str = "replayed";
pub const FIELD_UNDO_LEN: &str = "undo_len";
pub const FIELD_REDO_LEN: &str = "redo_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_RECORDED: &str = "recorded";
