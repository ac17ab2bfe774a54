pub mod align;
pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod line;
pub mod meta;
pub mod render;
pub mod sync;
pub mod time;
pub mod tokenizer;

pub use config::{Config, LyricsConfig, RenderConfig, SyncConfig, CONFIG_TEMPLATE};

/// Re-export toml error type for config parsing error handling
pub use toml::de::Error as TomlParseError;
pub use align::align_translation;
pub use document::{LyricDocument, ParseOptions};
pub use error::CoreError;
pub use index::PositionIndex;
pub use line::LyricLine;
pub use meta::LyricMeta;
pub use render::{render_lines, LineEnding, RenderField, RenderOptions};
pub use sync::{SyncEngine, SyncEvent};
pub use time::{format_timestamp, parse_timestamp};
pub use tokenizer::{tokenize, Tokens};
