//! Raya Literal & Feedback Analysis
//!
//! This crate runs after parsing, while a function's AST is still mutable, and
//! prepares the artifacts the bytecode generator consumes:
//! - **Boilerplates**: constant templates for object and array literals
//!   (`literal` module)
//! - **Feedback slots**: positional indices into the per-function feedback
//!   vector for every node that observes runtime types (`feedback` module)
//! - **Pattern queries**: read-only matchers used by later optimization
//!   stages (`patterns` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use raya_analysis::{AnalysisConfig, AstValueFactory, FunctionPreparer, Heap};
//!
//! let factory = AstValueFactory::new();
//! let config = AnalysisConfig::default();
//! let heap = Heap::new(&config.policy);
//!
//! let preparer = FunctionPreparer::new(&factory, &config.policy, &heap);
//! let summary = preparer.prepare(&mut function)?;
//! println!("{} feedback slots", summary.slot_count);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![allow(clippy::new_without_default)]

// ============================================================================
// Core Modules
// ============================================================================

/// AST node model, values and scope facts
pub mod ast;

/// Configuration for literal policies and preparation workers
pub mod config;

/// Error types
pub mod error;

/// Feedback vector specs, slot caches and the slot allocator
pub mod feedback;

/// Thread-safe string interning
pub mod interner;

/// Structured literal analysis and boilerplate construction
pub mod literal;

/// Numeric conversions shared by keys and values
pub mod number;

/// Read-only expression pattern matchers
pub mod patterns;

/// Per-function preparation pipeline
pub mod prepare;

/// Source positions
pub mod span;

// ============================================================================
// Re-exports
// ============================================================================

pub use ast::{
    AstValue, AstValueFactory, Expression, FunctionLiteral, NodeType, Statement, Variable,
    VariableId, VariableLocation, VariableMode,
};
pub use config::{AnalysisConfig, LiteralPolicy};
pub use error::{AllocError, AnalysisError, AnalysisResult, ConfigError};
pub use feedback::{
    FeedbackSlot, FeedbackSlotAllocator, FeedbackSlotCache, FeedbackSlotKind, FeedbackVectorSpec,
    LanguageMode, TypeofMode,
};
pub use interner::{Interner, Symbol};
pub use literal::{
    ArrayBoilerplate, BoilerplateAllocator, BoilerplateValue, ElementsKind, Heap, LiteralContext,
    ObjectBoilerplate,
};
pub use prepare::{prepare_program, FunctionPreparer, PreparedFunction};
pub use span::Span;
