//! Timestamp specification parsing and normalization.
//!
//! User-supplied timestamp JSON arrives in one of three shapes:
//!
//! - array form: a bare list of timestamp tokens
//!
//! ```json
//! ["30", 90, "2:15"]
//! ```
//!
//! - flat form: token -> note mapping
//!
//! ```json
//! {"63": "intro ends", "369": "key diagram"}
//! ```
//!
//! - nested form: keyed by an outer identifier whose value carries an inner
//!   `timestamps` mapping (only the first such entry is used)
//!
//! ```json
//! {"dQw4w9WgXcQ": {"title": "Some Video", "timestamps": {"63": "note"}}}
//! ```
//!
//! [`TimestampSpec`] classifies a raw document into one of these shapes at
//! the boundary, rejecting anything else. [`normalize`] then produces the
//! canonical sorted [`NormalizedTimestamp`] list used for preview and
//! submission.

mod normalize;
mod spec;

pub use normalize::{NormalizedTimestamp, normalize};
pub use spec::{SpecError, SpecShape, TimestampSpec};
