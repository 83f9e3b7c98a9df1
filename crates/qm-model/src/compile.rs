//! Query compiler.
//!
//! Lowers a parsed [`Query`] into one backend query fragment plus an
//! independent sort specification. Boolean composition follows the classic
//! retrieval occurrence model: required/optional/excluded clauses inside
//! conjunctions, optional-only clauses inside disjunctions, and a match-all
//! anchor injected wherever a group would otherwise consist purely of
//! exclusions (a pure-negative boolean query is undefined in most retrieval
//! models; "match everything, then exclude" restores the intended
//! semantics).

use crate::{
    adaptor::{ExpressionAdaptor, SearchAdaptor},
    argument::Value,
    constraint::{Constraint, ConstraintKind, DEFAULT_BOOST, Occur},
    context::FunctionContext,
    error::CompileError,
    function::{ARG_NOT, ARG_PROPERTY, ARG_VALUE, Arguments, Function},
    ordering::{Ordering, SortDefinition},
    source::Query,
};

/// Running occurrence state for one boolean grouping scope.
///
/// The selector phase and the constraint phase of a top-level compilation
/// share a single instance, so a required selector fragment keeps the
/// match-all anchor out of the whole query.
#[derive(Debug, Default, Clone, Copy)]
struct OccurState {
    /// A required clause has been accumulated in this scope.
    seen_required: bool,
    /// An excluded clause has been accumulated in this scope.
    seen_excluded: bool,
}

/// Compiles query models against one backend adaptor and function context.
///
/// The compiler is stateless across calls: each compilation allocates its
/// own accumulators and mutates nothing shared, so one compiler may serve
/// any number of sequential compilations.
pub struct QueryCompiler<'a, A, C>
where
    A: SearchAdaptor,
    C: FunctionContext + ?Sized,
{
    /// The backend the query is lowered onto.
    adaptor: &'a A,
    /// Property-to-field resolution.
    context: &'a C,
}

impl<'a, A, C> QueryCompiler<'a, A, C>
where
    A: SearchAdaptor,
    C: FunctionContext + ?Sized,
{
    /// Creates a compiler over a backend adaptor and a function context.
    pub fn new(adaptor: &'a A, context: &'a C) -> Self {
        Self { adaptor, context }
    }

    /// Lowers a whole query to one backend fragment.
    ///
    /// Selectors are compiled first, each as a required conjunct regardless
    /// of any occurrence tag (selectors are filters that must all hold).
    /// The root constraint, if present, is then folded in under its own
    /// occurrence tag, and the pure-negative anchor is applied across both
    /// phases together.
    pub fn build_query(&self, query: &Query) -> Result<A::Fragment, CompileError<A::Error>> {
        let mut expr = self.adaptor.expression_adaptor();
        let mut state = OccurState::default();

        for selector in query.source.selectors() {
            let fragment = self
                .adaptor
                .selector_query(selector)
                .map_err(CompileError::Backend)?;
            if let Some(fragment) = fragment {
                expr.add_required(fragment, DEFAULT_BOOST);
                state.seen_required = true;
            }
        }

        if let Some(root) = &query.constraint {
            if let Some(fragment) = self.lower_constraint(root)? {
                self.accumulate(&mut expr, &mut state, root.occur, root.boost, fragment);
            }
        }

        self.anchor_pure_negative(&mut expr, &mut state);
        Ok(expr.into_query())
    }

    /// Lowers one constraint node to a fragment, or to `None` when the node
    /// contributes nothing.
    pub fn lower_constraint(
        &self,
        constraint: &Constraint,
    ) -> Result<Option<A::Fragment>, CompileError<A::Error>> {
        match &constraint.kind {
            ConstraintKind::Conjunction(children) => self.lower_conjunction(children).map(Some),
            ConstraintKind::Disjunction(children) => self.lower_disjunction(children).map(Some),
            ConstraintKind::Functional {
                function,
                arguments,
            } => self.lower_function(*function, arguments),
            ConstraintKind::Selector(selector) => self
                .adaptor
                .selector_query(selector)
                .map_err(CompileError::Backend),
        }
    }

    /// AND composition. Children fold in under their own occurrence tags;
    /// the pure-negative anchor check re-runs after every child to match
    /// the incremental accumulation semantics.
    fn lower_conjunction(
        &self,
        children: &[Constraint],
    ) -> Result<A::Fragment, CompileError<A::Error>> {
        let mut expr = self.adaptor.expression_adaptor();
        let mut state = OccurState::default();

        for child in children {
            if let Some(fragment) = self.lower_constraint(child)? {
                self.accumulate(&mut expr, &mut state, child.occur, child.boost, fragment);
            }
            self.anchor_pure_negative(&mut expr, &mut state);
        }

        Ok(expr.into_query())
    }

    /// OR composition. Every positive child folds to an optional clause:
    /// inside a disjunction, "mandatory" only means "mandatory if chosen".
    /// An excluded child cannot be a top-level exclusion (that would also
    /// suppress matches of unrelated sibling disjuncts), so it becomes a
    /// nested "match all AND NOT child" added as one optional disjunct. No
    /// anchor is needed here: every top-level clause is optional by
    /// construction.
    fn lower_disjunction(
        &self,
        children: &[Constraint],
    ) -> Result<A::Fragment, CompileError<A::Error>> {
        let mut expr = self.adaptor.expression_adaptor();

        for child in children {
            if let Some(fragment) = self.lower_constraint(child)? {
                match child.occur {
                    Occur::Exclude => {
                        let negated = self.negate(fragment, child.boost);
                        expr.add_optional(negated, DEFAULT_BOOST);
                    }
                    Occur::Default | Occur::Mandatory | Occur::Optional => {
                        expr.add_optional(fragment, child.boost);
                    }
                }
            }
        }

        Ok(expr.into_query())
    }

    /// Lowers a functional constraint by evaluating its wrapped function
    /// with the bindings the parser attached to it.
    fn lower_function(
        &self,
        function: Function,
        arguments: &Arguments,
    ) -> Result<Option<A::Fragment>, CompileError<A::Error>> {
        match function {
            Function::Equals => {
                let (field, value) = self.field_and_value(function, arguments)?;
                self.adaptor
                    .term_query(&field, value)
                    .map_err(CompileError::Backend)
            }
            Function::NotEquals => {
                let (field, value) = self.field_and_value(function, arguments)?;
                let term = self
                    .adaptor
                    .term_query(&field, value)
                    .map_err(CompileError::Backend)?;
                Ok(term.map(|fragment| self.negate(fragment, DEFAULT_BOOST)))
            }
            Function::LessThan => self.lower_range(function, arguments, false, false),
            Function::LessThanOrEquals => self.lower_range(function, arguments, false, true),
            Function::GreaterThan => self.lower_range(function, arguments, true, false),
            Function::GreaterThanOrEquals => self.lower_range(function, arguments, true, true),
            Function::Exists => {
                let field = self.required_field(function, arguments)?;
                let fragment = self
                    .adaptor
                    .exists_query(&field)
                    .map_err(CompileError::Backend)?;
                Ok(self.apply_not(arguments, fragment))
            }
            Function::Like => {
                let field = self.required_field(function, arguments)?;
                let pattern = arguments
                    .literal(ARG_VALUE)
                    .and_then(Value::as_str)
                    .ok_or(CompileError::MissingArgument {
                        function: function.name(),
                        argument: ARG_VALUE,
                    })?;
                let fragment = self
                    .adaptor
                    .like_query(&field, pattern)
                    .map_err(CompileError::Backend)?;
                Ok(self.apply_not(arguments, fragment))
            }
            Function::FtsTerm => {
                let text = arguments
                    .literal(ARG_VALUE)
                    .and_then(Value::as_str)
                    .ok_or(CompileError::MissingArgument {
                        function: function.name(),
                        argument: ARG_VALUE,
                    })?;
                let field = match arguments.property(ARG_PROPERTY) {
                    Some(property) => self.context.field_name(property)?,
                    None => self.context.default_field_name().to_string(),
                };
                self.adaptor
                    .text_query(&field, text)
                    .map_err(CompileError::Backend)
            }
            // Column-only functions carry no predicate semantics.
            Function::PropertyAccessor | Function::Score => Err(CompileError::NotLowerable {
                function: function.name(),
            }),
        }
    }

    /// Resolves an ordering list to backend-neutral sort keys, primary key
    /// first.
    ///
    /// Property-accessor columns resolve their bound property through the
    /// function context; the score column maps straight to a score key. Any
    /// other column function yields no key for that entry: downstream
    /// callers rely on the partial list rather than a failure.
    pub fn build_sort_definitions(
        &self,
        orderings: &[Ordering],
    ) -> Result<Vec<SortDefinition>, CompileError<A::Error>> {
        let mut definitions = Vec::with_capacity(orderings.len());

        for ordering in orderings {
            match ordering.column.function {
                Function::PropertyAccessor => {
                    let property = ordering.column.arguments.property(ARG_PROPERTY).ok_or(
                        CompileError::MissingArgument {
                            function: Function::PropertyAccessor.name(),
                            argument: ARG_PROPERTY,
                        },
                    )?;
                    let field = self.context.field_name(property)?;
                    definitions.push(SortDefinition::field(
                        field,
                        ordering.direction.is_ascending(),
                    ));
                }
                Function::Score => {
                    definitions.push(SortDefinition::score(ordering.direction.is_ascending()));
                }
                _ => {}
            }
        }

        Ok(definitions)
    }

    /// Builds the backend-native sort object for an ordering list, or
    /// `None` when there is nothing to sort on.
    pub fn build_sort(
        &self,
        orderings: &[Ordering],
    ) -> Result<Option<A::Sort>, CompileError<A::Error>> {
        if orderings.is_empty() {
            return Ok(None);
        }
        let definitions = self.build_sort_definitions(orderings)?;
        self.adaptor
            .build_sort(&definitions)
            .map_err(CompileError::Backend)
    }

    /// Folds one fragment into an accumulator under its occurrence tag.
    fn accumulate(
        &self,
        expr: &mut A::Expr,
        state: &mut OccurState,
        occur: Occur,
        boost: f32,
        fragment: A::Fragment,
    ) {
        match occur {
            Occur::Default | Occur::Mandatory => {
                expr.add_required(fragment, boost);
                state.seen_required = true;
            }
            Occur::Optional => expr.add_optional(fragment, boost),
            Occur::Exclude => {
                expr.add_excluded(fragment, boost);
                state.seen_excluded = true;
            }
        }
    }

    /// Injects the match-all anchor into a scope that so far holds
    /// exclusions but no required clause.
    fn anchor_pure_negative(&self, expr: &mut A::Expr, state: &mut OccurState) {
        if state.seen_excluded && !state.seen_required {
            expr.add_required(self.adaptor.match_all(), DEFAULT_BOOST);
            state.seen_required = true;
        }
    }

    /// Wraps a fragment as "everything except it": a nested scope holding
    /// match-all as required and the fragment as excluded.
    fn negate(&self, fragment: A::Fragment, boost: f32) -> A::Fragment {
        let mut nested = self.adaptor.expression_adaptor();
        nested.add_required(self.adaptor.match_all(), DEFAULT_BOOST);
        nested.add_excluded(fragment, boost);
        nested.into_query()
    }

    /// Negates a fragment when the arguments carry a truthy `not` flag.
    fn apply_not(
        &self,
        arguments: &Arguments,
        fragment: Option<A::Fragment>,
    ) -> Option<A::Fragment> {
        let negated = arguments
            .literal(ARG_NOT)
            .and_then(Value::as_bool)
            .unwrap_or(false);
        match (negated, fragment) {
            (true, Some(fragment)) => Some(self.negate(fragment, DEFAULT_BOOST)),
            (_, fragment) => fragment,
        }
    }

    /// Lowers a single-bound comparison to a range fragment.
    fn lower_range(
        &self,
        function: Function,
        arguments: &Arguments,
        is_lower_bound: bool,
        inclusive: bool,
    ) -> Result<Option<A::Fragment>, CompileError<A::Error>> {
        let (field, value) = self.field_and_value(function, arguments)?;
        let (lower, upper) = if is_lower_bound {
            (Some(value), None)
        } else {
            (None, Some(value))
        };
        self.adaptor
            .range_query(&field, lower, upper, inclusive, inclusive)
            .map_err(CompileError::Backend)
    }

    /// Resolves the property and literal bindings a binary predicate needs.
    fn field_and_value<'b>(
        &self,
        function: Function,
        arguments: &'b Arguments,
    ) -> Result<(String, &'b Value), CompileError<A::Error>> {
        let field = self.required_field(function, arguments)?;
        let value = arguments
            .literal(ARG_VALUE)
            .ok_or(CompileError::MissingArgument {
                function: function.name(),
                argument: ARG_VALUE,
            })?;
        Ok((field, value))
    }

    /// Resolves the property binding a predicate needs to a field name.
    fn required_field(
        &self,
        function: Function,
        arguments: &Arguments,
    ) -> Result<String, CompileError<A::Error>> {
        let property =
            arguments
                .property(ARG_PROPERTY)
                .ok_or(CompileError::MissingArgument {
                    function: function.name(),
                    argument: ARG_PROPERTY,
                })?;
        Ok(self.context.field_name(property)?)
    }
}
