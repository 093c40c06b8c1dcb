//! Clause-matrix compilation.
//!
//! Rows are clauses, columns are the values still to be inspected. Each step either commits to
//! the first row (when none of its remaining patterns test anything) or switches on the leftmost
//! column the first row needs to test, specializing the matrix once per constructor that appears
//! in that column. Rows keep their original order everywhere, so a more general clause is only
//! reached after every more specific clause declared above it has failed.

use crate::errors::Result;
use crate::function::FunctionEmitter;
use crate::syntax::{Clause, Name, Pattern, QualifiedName, Term};
use gir_core::{ContinuationId, GirType, Ownership, Value};
use tracing::trace;

/// Variables in scope, innermost last.
pub(crate) type Env = Vec<(Name, Value)>;

static WILDCARD: Pattern = Pattern::Wildcard;

#[derive(Debug, Clone)]
pub(crate) struct Row<'s> {
    patterns: Vec<&'s Pattern>,
    body: Option<&'s Term>,
    /// Variables this row bound in columns that were already removed.
    bindings: Env,
}

impl<'s> Row<'s> {
    pub(crate) fn from_clause(clause: &'s Clause) -> Self {
        Self {
            patterns: clause.patterns.iter().collect(),
            body: clause.body.as_ref(),
            bindings: Env::new(),
        }
    }

    fn bind(&mut self, pattern: &Pattern, value: Value) {
        if let Pattern::Var(name) = pattern {
            self.bindings.push((name.clone(), value));
        }
    }

    /// Whether this row matches no matter what the remaining columns hold.
    fn is_irrefutable(&self) -> bool {
        !self.patterns.iter().any(|p| p.is_constructor())
    }
}

/// Rows that survive when `column` holds `constructor`, with its fields spliced in place.
fn specialize<'s>(
    rows: &[Row<'s>],
    column: usize,
    constructor: &QualifiedName,
    arity: usize,
    scrutinee: Value,
) -> Vec<Row<'s>> {
    rows.iter()
        .filter_map(|row| {
            let fields: Vec<&'s Pattern> = match row.patterns[column] {
                Pattern::Con(name, args) if name == constructor => args.iter().collect(),
                Pattern::Con(..) => return None,
                Pattern::Var(_) | Pattern::Wildcard | Pattern::Absurd => vec![&WILDCARD; arity],
            };
            let mut out = row.clone();
            out.bind(row.patterns[column], scrutinee);
            out.patterns.splice(column..=column, fields);
            Some(out)
        })
        .collect()
}

/// Rows that match any constructor in `column`, with the column removed.
fn default_rows<'s>(rows: &[Row<'s>], column: usize, scrutinee: Value) -> Vec<Row<'s>> {
    rows.iter()
        .filter(|row| !row.patterns[column].is_constructor())
        .map(|row| {
            let mut out = row.clone();
            out.bind(row.patterns[column], scrutinee);
            out.patterns.remove(column);
            out
        })
        .collect()
}

/// Constructors tested in `column`, in the order they are first mentioned, with their arity.
fn column_constructors<'s>(rows: &[Row<'s>], column: usize) -> Vec<(&'s QualifiedName, usize)> {
    let mut heads: Vec<(&'s QualifiedName, usize)> = Vec::new();
    for row in rows {
        if let Pattern::Con(name, args) = row.patterns[column] {
            if !heads.iter().any(|(seen, _)| *seen == name) {
                heads.push((name, args.len()));
            }
        }
    }
    heads
}

impl<'g, 's> FunctionEmitter<'g, 's> {
    /// Terminates `at` with the decision procedure for `matrix` over `occurrences`, delivering
    /// the selected body's value to `return_cont`.
    pub(crate) fn emit_pattern_matrix(
        &mut self,
        at: ContinuationId,
        matrix: Vec<Row<'s>>,
        occurrences: Vec<Value>,
        return_cont: Value,
        scope: &Env,
    ) -> Result<()> {
        let Some(first_row) = matrix.first() else {
            trace!(at = %at, "no clause left");
            return Ok(self.builder_at(at)?.create_unreachable()?);
        };

        if first_row.is_irrefutable() {
            let mut env = scope.clone();
            env.extend(first_row.bindings.iter().cloned());
            for (pattern, value) in first_row.patterns.iter().zip(&occurrences) {
                if let Pattern::Var(name) = pattern {
                    env.push((name.clone(), *value));
                }
            }
            return self.emit_clause_body(at, first_row.body, return_cont, &env);
        }

        let column = first_row
            .patterns
            .iter()
            .position(|p| p.is_constructor())
            .unwrap_or_default();
        self.emit_switch(at, matrix, occurrences, column, return_cont, scope)
    }

    fn emit_clause_body(
        &mut self,
        at: ContinuationId,
        body: Option<&'s Term>,
        return_cont: Value,
        env: &Env,
    ) -> Result<()> {
        let Some(body) = body else {
            trace!(at = %at, "absurd clause");
            return Ok(self.builder_at(at)?.create_unreachable()?);
        };

        self.cursor = at;
        let rv = self.emit_rvalue(body, env)?;
        self.builder()?.create_apply(return_cont, vec![rv])?;
        Ok(())
    }

    fn emit_switch(
        &mut self,
        at: ContinuationId,
        matrix: Vec<Row<'s>>,
        occurrences: Vec<Value>,
        column: usize,
        return_cont: Value,
        scope: &Env,
    ) -> Result<()> {
        let scrutinee = occurrences[column];
        let heads = column_constructors(&matrix, column);
        trace!(at = %at, column, cases = heads.len(), "switching on constructor");

        let mut cases = Vec::with_capacity(heads.len());
        for &(constructor, arity) in &heads {
            let k = self.fresh_continuation(constructor.base())?;
            let mut fields = Vec::with_capacity(arity);
            {
                let mut b = self.builder_at(k)?;
                for i in 0..arity {
                    fields.push(b.append_parameter(
                        format!("{}.{}", constructor.base(), i),
                        GirType::Value,
                        Ownership::Owned,
                    )?);
                }
            }

            let mut sub_occurrences = occurrences.clone();
            sub_occurrences.splice(column..=column, fields);
            let sub_matrix = specialize(&matrix, column, constructor, arity, scrutinee);
            cases.push((constructor, k, sub_matrix, sub_occurrences));
        }

        let fallback = default_rows(&matrix, column, scrutinee);
        let default = if !fallback.is_empty() && !self.covers_data_type(&heads) {
            let k = self.fresh_continuation("default")?;
            let mut sub_occurrences = occurrences;
            sub_occurrences.remove(column);
            Some((k, fallback, sub_occurrences))
        } else {
            None
        };

        self.builder_at(at)?.create_switch_constr(
            scrutinee,
            cases
                .iter()
                .map(|(constructor, k, _, _)| (constructor.to_string(), *k))
                .collect(),
            default.as_ref().map(|(k, _, _)| *k),
        )?;

        for (_, k, sub_matrix, sub_occurrences) in cases {
            self.emit_pattern_matrix(k, sub_matrix, sub_occurrences, return_cont, scope)?;
        }
        if let Some((k, sub_matrix, sub_occurrences)) = default {
            self.emit_pattern_matrix(k, sub_matrix, sub_occurrences, return_cont, scope)?;
        }
        Ok(())
    }

    /// Whether `heads` names every declared constructor of their data type. Unknown data types
    /// never count as covered.
    fn covers_data_type(&self, heads: &[(&'s QualifiedName, usize)]) -> bool {
        let Some((first, _)) = heads.first() else {
            return false;
        };
        match self.ggm.signature().constructors_of_data_for(first) {
            Some(all) => all
                .iter()
                .all(|c| heads.iter().any(|(head, _)| *head == c)),
            None => false,
        }
    }
}
