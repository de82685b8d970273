//! Draft composition pipeline.
//!
//! Renders canonical session state into profile-specific text:
//!
//! 1. **Composer** builds a platform-agnostic base draft (hook, bullets,
//!    body, CTA, signature, hashtags)
//! 2. **Formatter** reshapes it for the output profile (email envelope,
//!    memo sections, blog headings, thread posts, or pass-through)
//! 3. **Splitter** cuts long text into numbered posts for threads
//!
//! # Determinism
//!
//! Identical state always produces identical text. Nothing here reads the
//! clock, the environment or any randomness.

pub mod composer;
pub mod formatter;
pub mod report;
pub mod splitter;

pub use composer::compose_base;
pub use formatter::format;
pub use report::{DraftReport, render, render_as};
pub use splitter::split;
