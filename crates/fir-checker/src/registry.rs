//! Checker capability traits and the memoized checker sets.
//!
//! Checkers are stateless values registered as `&'static` references in
//! per-category buckets. A set is resolved once per process and shared by
//! every collection run. Extended sets are built by merging the extended
//! registrations into the common ones, so every common checker (and every
//! sub-checker reached through it) stays part of the extended set.

use fir_semantic::FirElement;
use fir_syntax::SyntaxKind;
use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

use crate::checkers::{control_flow, declaration, expression};
use crate::context::CheckerContext;
use crate::reporter::DiagnosticReporter;

/// Checks one declaration (or the file node for the `file` bucket).
pub trait DeclarationChecker: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(
        &self,
        declaration: &FirElement,
        ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    );

    /// Checkers reached only through this one; run right after it.
    fn sub_checkers(&self) -> &'static [&'static dyn DeclarationChecker] {
        &[]
    }
}

pub trait ExpressionChecker: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(
        &self,
        expression: &FirElement,
        ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    );
}

/// Flow-sensitive checks over the body of a function.
pub trait ControlFlowChecker: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(
        &self,
        function: &FirElement,
        ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    );
}

type Bucket<T> = Vec<&'static T>;

/// Registration identity used to deduplicate merged buckets.
trait Registered {
    fn registered_name(&self) -> &'static str;
}

impl Registered for dyn DeclarationChecker {
    fn registered_name(&self) -> &'static str {
        self.name()
    }
}

impl Registered for dyn ExpressionChecker {
    fn registered_name(&self) -> &'static str {
        self.name()
    }
}

impl Registered for dyn ControlFlowChecker {
    fn registered_name(&self) -> &'static str {
        self.name()
    }
}

/// Append the entries of `other` not already present, keeping order.
fn merge_bucket<T: ?Sized + Registered>(bucket: &mut Bucket<T>, other: &[&'static T]) {
    for &checker in other {
        let name = checker.registered_name();
        if !bucket.iter().any(|existing| existing.registered_name() == name) {
            bucket.push(checker);
        }
    }
}

#[derive(Clone, Default)]
pub struct DeclarationCheckers {
    /// Every declaration kind.
    pub basic: Bucket<dyn DeclarationChecker>,
    pub file: Bucket<dyn DeclarationChecker>,
    /// Classes and objects.
    pub class: Bucket<dyn DeclarationChecker>,
    pub function: Bucket<dyn DeclarationChecker>,
    pub property: Bucket<dyn DeclarationChecker>,
    pub type_alias: Bucket<dyn DeclarationChecker>,
    pub control_flow: Bucket<dyn ControlFlowChecker>,
    pub variable_assignment: Bucket<dyn ControlFlowChecker>,
}

impl DeclarationCheckers {
    /// Additive merge: registrations of `other` are appended to each bucket,
    /// duplicates (by name) are ignored.
    #[must_use]
    pub fn merge(mut self, other: &DeclarationCheckers) -> Self {
        merge_bucket(&mut self.basic, &other.basic);
        merge_bucket(&mut self.file, &other.file);
        merge_bucket(&mut self.class, &other.class);
        merge_bucket(&mut self.function, &other.function);
        merge_bucket(&mut self.property, &other.property);
        merge_bucket(&mut self.type_alias, &other.type_alias);
        merge_bucket(&mut self.control_flow, &other.control_flow);
        merge_bucket(&mut self.variable_assignment, &other.variable_assignment);
        self
    }

    fn kind_bucket(&self, kind: SyntaxKind) -> &[&'static dyn DeclarationChecker] {
        match kind {
            SyntaxKind::File => &self.file,
            SyntaxKind::Class | SyntaxKind::Object => &self.class,
            SyntaxKind::Function => &self.function,
            SyntaxKind::Property => &self.property,
            SyntaxKind::TypeAlias => &self.type_alias,
            _ => &[],
        }
    }

    /// Checkers to run for an element of `kind`: `basic` (for declarations)
    /// then the kind's bucket, each followed depth-first by its sub-checkers.
    pub fn for_kind(&self, kind: SyntaxKind) -> Vec<&'static dyn DeclarationChecker> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        let basic: &[_] = if kind.is_declaration() { &self.basic } else { &[] };
        for &checker in basic.iter().chain(self.kind_bucket(kind)) {
            expand(checker, &mut out, &mut seen);
        }
        out
    }

    /// Control-flow and variable-assignment checkers, in that order.
    pub fn flow_checkers(&self) -> impl Iterator<Item = &'static dyn ControlFlowChecker> + '_ {
        self.control_flow
            .iter()
            .chain(&self.variable_assignment)
            .copied()
    }

    /// Names of every declaration checker, sub-checkers included.
    pub fn names(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        for bucket in [
            &self.basic,
            &self.file,
            &self.class,
            &self.function,
            &self.property,
            &self.type_alias,
        ] {
            for &checker in bucket {
                expand(checker, &mut out, &mut seen);
            }
        }
        let mut names: Vec<_> = out.iter().map(|c| c.name()).collect();
        names.extend(self.flow_checkers().map(|c| c.name()));
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().iter().any(|&n| n == name)
    }
}

fn expand(
    checker: &'static dyn DeclarationChecker,
    out: &mut Vec<&'static dyn DeclarationChecker>,
    seen: &mut FxHashSet<&'static str>,
) {
    if !seen.insert(checker.name()) {
        return;
    }
    out.push(checker);
    for &sub in checker.sub_checkers() {
        expand(sub, out, seen);
    }
}

#[derive(Clone, Default)]
pub struct ExpressionCheckers {
    /// Every expression kind.
    pub basic: Bucket<dyn ExpressionChecker>,
    pub call: Bucket<dyn ExpressionChecker>,
    pub name_reference: Bucket<dyn ExpressionChecker>,
    /// `if` expressions.
    pub condition: Bucket<dyn ExpressionChecker>,
}

impl ExpressionCheckers {
    #[must_use]
    pub fn merge(mut self, other: &ExpressionCheckers) -> Self {
        merge_bucket(&mut self.basic, &other.basic);
        merge_bucket(&mut self.call, &other.call);
        merge_bucket(&mut self.name_reference, &other.name_reference);
        merge_bucket(&mut self.condition, &other.condition);
        self
    }

    pub fn for_kind(
        &self,
        kind: SyntaxKind,
    ) -> impl Iterator<Item = &'static dyn ExpressionChecker> + '_ {
        let specific: &[_] = match kind {
            SyntaxKind::Call => &self.call,
            SyntaxKind::NameReference => &self.name_reference,
            SyntaxKind::If => &self.condition,
            _ => &[],
        };
        self.basic.iter().chain(specific).copied()
    }

    pub fn names(&self) -> Vec<&'static str> {
        [&self.basic, &self.call, &self.name_reference, &self.condition]
            .into_iter()
            .flatten()
            .map(|c| c.name())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().iter().any(|&n| n == name)
    }
}

// =============================================================================
// Registrations
// =============================================================================

fn common_declaration_checkers() -> DeclarationCheckers {
    DeclarationCheckers {
        basic: vec![declaration::CONFLICTING_TYPE_PARAMETERS],
        file: vec![declaration::REDECLARATION],
        class: vec![declaration::REDECLARATION],
        function: vec![declaration::FUNCTION_BODY],
        property: vec![declaration::PROPERTY_INITIALIZER],
        type_alias: vec![declaration::TOP_LEVEL_TYPE_ALIAS],
        control_flow: vec![control_flow::UNREACHABLE_CODE, control_flow::MISSING_RETURN],
        variable_assignment: vec![control_flow::UNINITIALIZED_VARIABLE],
    }
}

fn extended_declaration_checkers() -> DeclarationCheckers {
    DeclarationCheckers {
        basic: vec![declaration::REDUNDANT_VISIBILITY],
        class: vec![declaration::CLASS_NAMING],
        control_flow: vec![control_flow::UNUSED_VARIABLE],
        ..DeclarationCheckers::default()
    }
}

fn common_expression_checkers() -> ExpressionCheckers {
    ExpressionCheckers {
        basic: vec![expression::RETURN_NOT_ALLOWED],
        call: vec![expression::ARGUMENT_COUNT],
        ..ExpressionCheckers::default()
    }
}

fn extended_expression_checkers() -> ExpressionCheckers {
    ExpressionCheckers {
        condition: vec![expression::CONSTANT_CONDITION],
        ..ExpressionCheckers::default()
    }
}

static COMMON_DECLARATIONS: Lazy<DeclarationCheckers> = Lazy::new(common_declaration_checkers);
static EXTENDED_DECLARATIONS: Lazy<DeclarationCheckers> =
    Lazy::new(|| common_declaration_checkers().merge(&extended_declaration_checkers()));
static COMMON_EXPRESSIONS: Lazy<ExpressionCheckers> = Lazy::new(common_expression_checkers);
static EXTENDED_EXPRESSIONS: Lazy<ExpressionCheckers> =
    Lazy::new(|| common_expression_checkers().merge(&extended_expression_checkers()));

/// Declaration checkers for the given mode, built once per process.
pub fn declaration_checkers(extended: bool) -> &'static DeclarationCheckers {
    if extended {
        &EXTENDED_DECLARATIONS
    } else {
        &COMMON_DECLARATIONS
    }
}

/// Expression checkers for the given mode, built once per process.
pub fn expression_checkers(extended: bool) -> &'static ExpressionCheckers {
    if extended {
        &EXTENDED_EXPRESSIONS
    } else {
        &COMMON_EXPRESSIONS
    }
}
