//! tagspan - incremental highlighting of HTML source
//!
//! Watches edits to a text buffer and restyles only the tags and entity
//! references an edit could have changed.
//!
//! ```
//! use tagspan::{Config, EditableBuffer, HtmlStyleWatcher, SpannedBuffer};
//!
//! let mut watcher = HtmlStyleWatcher::new(&Config::default());
//! let mut buffer = SpannedBuffer::from("say <b");
//! buffer.edit(&mut watcher, 6, 0, ">").unwrap();
//! assert_eq!(buffer.spans().len(), 1);
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod locator;
pub mod logging;
pub mod platform;
pub mod recorder;
pub mod render;
pub mod style;
pub mod styler;
pub mod symbol;
pub mod updater;
pub mod watcher;

pub use buffer::{EditableBuffer, SpannedBuffer};
pub use config::Config;
pub use error::{Error, Result};
pub use locator::{EditShape, HighlightRange};
pub use recorder::{ChangeRecord, ChangeRecorder};
pub use style::{Color, Span, SpanId, SpanKind, SpanStyle, Typeface};
pub use styler::{HtmlStyler, StyleEngine};
pub use symbol::{match_of, Symbol, SymbolPair, SymbolScan};
pub use updater::SpanUpdater;
pub use watcher::{HtmlStyleWatcher, TextWatcher};
