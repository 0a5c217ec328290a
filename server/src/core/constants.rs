// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "Bookshelf";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "bookshelf";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".bookshelf";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "bookshelf.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "BOOKSHELF_CONFIG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "BOOKSHELF_LOG";

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "BOOKSHELF_DATA_DIR";

// =============================================================================
// Environment Variables - Server
// =============================================================================

pub const ENV_HOST: &str = "BOOKSHELF_HOST";
pub const ENV_PORT: &str = "BOOKSHELF_PORT";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5390;

/// Request body limit for the JSON API (queries are short)
pub const API_BODY_LIMIT: usize = 64 * 1024;

// =============================================================================
// Table Service
// =============================================================================

pub const ENV_TABLE_URL: &str = "BOOKSHELF_TABLE_URL";
pub const ENV_TABLE_NAME: &str = "BOOKSHELF_TABLE_NAME";

/// Local Supabase/PostgREST gateway
pub const DEFAULT_TABLE_URL: &str = "http://127.0.0.1:54321";

/// Table holding the book rows
pub const DEFAULT_TABLE_NAME: &str = "BOOK";

/// PostgREST path prefix under the table service URL
pub const TABLE_REST_PATH: &str = "rest/v1";

pub const DEFAULT_TABLE_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Completion Service
// =============================================================================

pub const ENV_COMPLETION_URL: &str = "BOOKSHELF_COMPLETION_URL";
pub const ENV_MODEL: &str = "BOOKSHELF_MODEL";
pub const ENV_TEMPERATURE: &str = "BOOKSHELF_TEMPERATURE";
pub const ENV_JSON_MODE: &str = "BOOKSHELF_JSON_MODE";

pub const DEFAULT_COMPLETION_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

/// Low sampling temperature biases the model toward well-formed JSON
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// Secrets
// =============================================================================

/// Secret holding the completion API key
pub const SECRET_COMPLETION_API_KEY: &str = "completion_api_key";

/// Secret holding the table service key
pub const SECRET_TABLE_API_KEY: &str = "table_api_key";

/// Secrets required before any search can run
pub const REQUIRED_SECRETS: &[&str] = &[SECRET_COMPLETION_API_KEY, SECRET_TABLE_API_KEY];

/// Prefix for env-var secrets (`BOOKSHELF_COMPLETION_API_KEY`)
pub const SECRETS_DEFAULT_ENV_PREFIX: &str = "BOOKSHELF_";

/// Filename of the local secret store inside the data directory
pub const FILE_SECRETS_FILENAME: &str = "secrets.json";

// =============================================================================
// Books
// =============================================================================

/// Books with stock below this count as low stock
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Example queries shown in the shell and help text
pub const EXAMPLE_QUERIES: &[&str] = &[
    "books with price 1000",
    "books cheaper than 500",
    "books with stock more than 10",
    "books with title containing Harry Potter",
];
