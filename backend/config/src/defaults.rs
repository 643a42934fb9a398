//! Config defaults applied when an environment variable is absent.

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5001;

/// Default bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Default generative provider.
pub const DEFAULT_LLM_PROVIDER: &str = "gemini";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

pub const DEFAULT_CLASSIFIER_URL: &str =
    "https://api-inference.huggingface.co/models/google/vit-base-patch16-224";

/// Upstream calls allowed per `/description` request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Maximum accepted upload size (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Edge length of the square image sent to the classifier.
pub const DEFAULT_IMAGE_SIZE: u32 = 224;

pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_LOG_LEVEL: &str = "info";
