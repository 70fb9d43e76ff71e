//! Abstract Syntax Tree consumed by the analysis passes.
//!
//! This module defines the node model the parser hands over:
//! - Statements and expressions as closed enums with narrowing accessors
//! - Structured literals (object, array, regexp, class) with their
//!   memoized analysis cells
//! - Interned literal values and variable facts from the scope resolver
//!
//! Every AST node includes a `Span` for diagnostics. A function's tree is
//! exclusively owned by its `FunctionLiteral`; nested functions are owned by
//! the expression that defines them but are prepared as separate units.

pub mod expression;
pub mod function;
pub mod literal;
pub mod node_type;
pub mod scope;
pub mod statement;
pub mod value;
pub mod visitor;

pub use expression::*;
pub use function::*;
pub use literal::*;
pub use node_type::*;
pub use scope::*;
pub use statement::*;
pub use value::*;
pub use visitor::*;
