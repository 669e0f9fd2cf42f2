//! Project-wide constants.

/// Port the HTTP server listens on when none is configured.
pub const DEFAULT_PORT: u16 = 3000;

/// Default Gemini model when none is specified.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Host serving the Gemini `generateContent` API.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Name of the todos table in the hosted store.
pub const DEFAULT_TABLE: &str = "todos";

/// SQLite path used when no hosted store is configured.
pub const DEFAULT_DB_PATH: &str = "todos.db";
