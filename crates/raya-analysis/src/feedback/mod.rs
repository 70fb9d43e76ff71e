//! Feedback vector layout
//!
//! A feedback vector is a per-function array the runtime's inline caches
//! write type observations into. `FeedbackVectorSpec` records the slot kinds
//! in order; `FeedbackSlotAllocator` numbers the sites of a function body.

mod allocator;
mod cache;
mod slot;

pub use allocator::FeedbackSlotAllocator;
pub use cache::FeedbackSlotCache;
pub use slot::{FeedbackSlot, FeedbackSlotKind, FeedbackVectorSpec, LanguageMode, TypeofMode};
