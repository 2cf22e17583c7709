// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer loads tweets through this trait so the
// on-disk format (delimited text today) stays swappable.

use anyhow::Result;
use crate::domain::tweet::LabelledTweet;

// ─── TweetSource ──────────────────────────────────────────────────────────────
/// Any component that can produce labelled tweets.
///
/// Implementations:
///   - DelimitedTweetLoader → reads `label,text` records from a file
pub trait TweetSource {
    /// Load every record in source order.
    fn load_all(&self) -> Result<Vec<LabelledTweet>>;
}

/// In-memory tweets are a source too (handy for tests and demos).
impl TweetSource for Vec<LabelledTweet> {
    fn load_all(&self) -> Result<Vec<LabelledTweet>> {
        Ok(self.clone())
    }
}
