//! Per-function preparation pipeline
//!
//! Runs the feedback slot pass, then builds the boilerplate of every
//! structured literal, then records the finished feedback vector spec on the
//! function. Nested functions are prepared as their own units on the way.

use crate::ast::*;
use crate::config::{AnalysisConfig, LiteralPolicy};
use crate::error::{AnalysisError, AnalysisResult};
use crate::feedback::{FeedbackSlotAllocator, FeedbackSlotKind};
use crate::literal::{BoilerplateAllocator, LiteralContext};
use crossbeam_deque::{Injector, Steal};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What preparation produced for one function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedFunction {
    /// Function name, or `<anonymous>`
    pub name: String,
    /// Length of the feedback vector
    pub slot_count: usize,
    /// Kind of every slot, in slot order
    pub slot_kinds: Vec<FeedbackSlotKind>,
    /// Object, array and regexp literal sites
    pub literal_count: usize,
    /// Nested functions, in source order
    pub nested: Vec<PreparedFunction>,
}

impl PreparedFunction {
    /// Total number of functions in this summary tree
    pub fn function_count(&self) -> usize {
        1 + self.nested.iter().map(PreparedFunction::function_count).sum::<usize>()
    }
}

/// Prepares function units for bytecode generation
pub struct FunctionPreparer<'a> {
    ctx: LiteralContext<'a>,
}

impl<'a> FunctionPreparer<'a> {
    /// Preparer sharing one factory, policy and allocator across units
    pub fn new(
        factory: &'a AstValueFactory,
        policy: &'a LiteralPolicy,
        heap: &'a dyn BoilerplateAllocator,
    ) -> Self {
        Self {
            ctx: LiteralContext::new(factory, policy, heap),
        }
    }

    /// Prepare one function and everything nested in it.
    ///
    /// An error aborts this function only; the tree is left partially
    /// annotated and should be discarded.
    pub fn prepare(&self, func: &mut FunctionLiteral) -> AnalysisResult<PreparedFunction> {
        let name = func.debug_name(self.ctx.factory);

        let spec = FeedbackSlotAllocator::new(self.ctx.factory, self.ctx.policy, func.language_mode)
            .allocate(func)?;

        let mut builder = BoilerplateBuilder {
            preparer: self,
            literal_count: 0,
            nested: Vec::new(),
            error: None,
        };
        walk_function_body(&mut builder, func);
        if let Some(err) = builder.error {
            return Err(err);
        }

        let summary = PreparedFunction {
            name,
            slot_count: spec.slot_count(),
            slot_kinds: spec.kinds().to_vec(),
            literal_count: builder.literal_count,
            nested: builder.nested,
        };
        func.set_feedback_spec(spec);

        debug!(
            function = %summary.name,
            slots = summary.slot_count,
            literals = summary.literal_count,
            "prepared function"
        );
        Ok(summary)
    }
}

/// Second pass: materializes boilerplates and prepares nested units
struct BoilerplateBuilder<'p, 'a> {
    preparer: &'p FunctionPreparer<'a>,
    literal_count: usize,
    nested: Vec<PreparedFunction>,
    error: Option<AnalysisError>,
}

impl BoilerplateBuilder<'_, '_> {
    fn record(&mut self, result: AnalysisResult<()>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }
}

impl VisitorMut for BoilerplateBuilder<'_, '_> {
    fn visit_object_literal(&mut self, lit: &mut ObjectLiteral) {
        walk_object_literal(self, lit);
        self.literal_count += 1;
        let result = lit.build_constant_properties(&self.preparer.ctx);
        self.record(result);
    }

    fn visit_array_literal(&mut self, lit: &mut ArrayLiteral) {
        walk_array_literal(self, lit);
        self.literal_count += 1;
        let result = lit.build_constant_elements(&self.preparer.ctx);
        self.record(result);
    }

    fn visit_regexp_literal(&mut self, _lit: &mut RegExpLiteral) {
        self.literal_count += 1;
    }

    fn visit_function_literal(&mut self, func: &mut FunctionLiteral) {
        if self.error.is_some() {
            return;
        }
        match self.preparer.prepare(func) {
            Ok(summary) => self.nested.push(summary),
            Err(err) => self.error = Some(err),
        }
    }
}

// ============================================================================
// Program-level preparation
// ============================================================================

/// Prepare independent top-level units concurrently.
///
/// Each unit is owned by exactly one worker while it is prepared. Results
/// come back in input order; a failing unit does not affect the others.
pub fn prepare_program(
    units: &mut [FunctionLiteral],
    config: &AnalysisConfig,
    factory: &AstValueFactory,
    heap: &dyn BoilerplateAllocator,
) -> Vec<AnalysisResult<PreparedFunction>> {
    let count = units.len();
    let injector = Injector::new();
    for unit in units.iter_mut().enumerate() {
        injector.push(unit);
    }

    let results: Mutex<Vec<Option<AnalysisResult<PreparedFunction>>>> =
        Mutex::new((0..count).map(|_| None).collect());
    let workers = config.worker_count().min(count.max(1));

    debug!(units = count, workers, "preparing program");

    std::thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                let preparer = FunctionPreparer::new(factory, &config.policy, heap);
                while let Some((index, unit)) = next_unit(&injector) {
                    let result = preparer.prepare(unit);
                    results.lock()[index] = Some(result);
                }
            });
        }
    });

    results
        .into_inner()
        .into_iter()
        .flatten()
        .collect()
}

fn next_unit<T>(injector: &Injector<T>) -> Option<T> {
    loop {
        match injector.steal() {
            Steal::Success(unit) => return Some(unit),
            Steal::Empty => return None,
            Steal::Retry => continue,
        }
    }
}
