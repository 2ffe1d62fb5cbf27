//! Declaration checkers.

use fir_common::diagnostic_messages;
use fir_semantic::{ElementCategory, FirElement};
use fir_syntax::{ModifierFlags, SyntaxKind};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use super::{body_expression, name_of};
use crate::context::CheckerContext;
use crate::registry::DeclarationChecker;
use crate::reporter::DiagnosticReporter;

pub const REDECLARATION: &dyn DeclarationChecker = &RedeclarationChecker;
pub const CONFLICTING_TYPE_PARAMETERS: &dyn DeclarationChecker = &ConflictingTypeParametersChecker;
pub const FUNCTION_BODY: &dyn DeclarationChecker = &FunctionBodyChecker;
pub const PROPERTY_INITIALIZER: &dyn DeclarationChecker = &PropertyInitializerChecker;
pub const ABSTRACT_MEMBER: &dyn DeclarationChecker = &AbstractMemberChecker;
pub const TOP_LEVEL_TYPE_ALIAS: &dyn DeclarationChecker = &TopLevelTypeAliasChecker;
pub const REDUNDANT_VISIBILITY: &dyn DeclarationChecker = &RedundantVisibilityChecker;
pub const CLASS_NAMING: &dyn DeclarationChecker = &ClassNamingChecker;

const MEMBER_SUB_CHECKERS: &[&dyn DeclarationChecker] = &[ABSTRACT_MEMBER];

// =============================================================================
// Redeclarations
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Namespace {
    Function,
    Property,
    Classifier,
}

/// Duplicate member or top-level names.
///
/// Classes, objects and type aliases share one namespace, properties another.
/// Functions may share a name when their parameter counts differ.
pub struct RedeclarationChecker;

impl DeclarationChecker for RedeclarationChecker {
    fn name(&self) -> &'static str {
        "redeclaration"
    }

    fn check(
        &self,
        container: &FirElement,
        _ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) {
        let mut groups: IndexMap<(&str, Namespace, usize), Vec<&FirElement>> = IndexMap::new();
        for member in container.children() {
            let Some(name) = member.name() else {
                continue;
            };
            let key = match member.kind {
                SyntaxKind::Function => (
                    name,
                    Namespace::Function,
                    member.children_of_kind(SyntaxKind::Parameter).count(),
                ),
                SyntaxKind::Property => (name, Namespace::Property, 0),
                SyntaxKind::Class | SyntaxKind::Object | SyntaxKind::TypeAlias => {
                    (name, Namespace::Classifier, 0)
                }
                _ => continue,
            };
            groups.entry(key).or_default().push(member);
        }

        for ((name, namespace, _), members) in groups {
            if members.len() < 2 {
                continue;
            }
            let message = if namespace == Namespace::Function {
                &diagnostic_messages::CONFLICTING_OVERLOADS
            } else {
                &diagnostic_messages::REDECLARATION
            };
            let first = members[0];
            reporter.report_on(first, message, &[name]);
            for member in &members[1..] {
                reporter.report_related(
                    member,
                    message,
                    &[name],
                    first.range,
                    format!("'{name}' is first declared here."),
                );
            }
        }
    }
}

pub struct ConflictingTypeParametersChecker;

impl DeclarationChecker for ConflictingTypeParametersChecker {
    fn name(&self) -> &'static str {
        "conflicting-type-parameters"
    }

    fn check(
        &self,
        declaration: &FirElement,
        _ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) {
        let mut seen = FxHashSet::default();
        for parameter in declaration.children_of_kind(SyntaxKind::TypeParameter) {
            let name = name_of(parameter);
            if !seen.insert(name) {
                reporter.report_on(
                    parameter,
                    &diagnostic_messages::CONFLICTING_TYPE_PARAMETERS,
                    &[name],
                );
            }
        }
    }
}

// =============================================================================
// Functions and properties
// =============================================================================

/// Abstract functions have no body; every other function has one.
pub struct FunctionBodyChecker;

impl DeclarationChecker for FunctionBodyChecker {
    fn name(&self) -> &'static str {
        "function-body"
    }

    fn check(
        &self,
        function: &FirElement,
        _ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) {
        let has_body = body_expression(function).is_some();
        let is_abstract = function.has_modifier(ModifierFlags::ABSTRACT);
        let name = name_of(function);
        if is_abstract && has_body {
            reporter.report_on(function, &diagnostic_messages::ABSTRACT_FUNCTION_WITH_BODY, &[name]);
        } else if !is_abstract && !has_body {
            reporter.report_on(
                function,
                &diagnostic_messages::NON_ABSTRACT_FUNCTION_WITH_NO_BODY,
                &[name],
            );
        }
    }

    fn sub_checkers(&self) -> &'static [&'static dyn DeclarationChecker] {
        MEMBER_SUB_CHECKERS
    }
}

/// Member and top-level properties need an initializer unless abstract.
/// Local variables are covered by the variable-assignment checkers.
pub struct PropertyInitializerChecker;

impl DeclarationChecker for PropertyInitializerChecker {
    fn name(&self) -> &'static str {
        "property-initializer"
    }

    fn check(
        &self,
        property: &FirElement,
        _ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) {
        if property.is_local || property.has_modifier(ModifierFlags::ABSTRACT) {
            return;
        }
        if body_expression(property).is_none() {
            reporter.report_on(
                property,
                &diagnostic_messages::MUST_BE_INITIALIZED,
                &[name_of(property)],
            );
        }
    }

    fn sub_checkers(&self) -> &'static [&'static dyn DeclarationChecker] {
        MEMBER_SUB_CHECKERS
    }
}

/// Abstract members are only allowed in abstract classes.
pub struct AbstractMemberChecker;

impl DeclarationChecker for AbstractMemberChecker {
    fn name(&self) -> &'static str {
        "abstract-member-in-non-abstract-class"
    }

    fn check(
        &self,
        member: &FirElement,
        ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) {
        if !member.has_modifier(ModifierFlags::ABSTRACT) {
            return;
        }
        let Some(class) = ctx.parent().filter(|parent| parent.kind.is_class_like()) else {
            return;
        };
        if class.kind == SyntaxKind::Class && class.has_modifier(ModifierFlags::ABSTRACT) {
            return;
        }
        reporter.report_on(
            member,
            &diagnostic_messages::ABSTRACT_MEMBER_NOT_IN_ABSTRACT_CLASS,
            &[name_of(member), name_of(class)],
        );
    }
}

pub struct TopLevelTypeAliasChecker;

impl DeclarationChecker for TopLevelTypeAliasChecker {
    fn name(&self) -> &'static str {
        "top-level-type-alias"
    }

    fn check(
        &self,
        alias: &FirElement,
        ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) {
        let top_level = ctx
            .parent()
            .is_some_and(|parent| parent.category() == ElementCategory::File);
        if !top_level {
            reporter.report_on(alias, &diagnostic_messages::TOPLEVEL_TYPEALIASES_ONLY, &[]);
        }
    }
}

// =============================================================================
// Extended
// =============================================================================

/// `public` is the default visibility.
pub struct RedundantVisibilityChecker;

impl DeclarationChecker for RedundantVisibilityChecker {
    fn name(&self) -> &'static str {
        "redundant-visibility-modifier"
    }

    fn check(
        &self,
        declaration: &FirElement,
        _ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) {
        if declaration.has_modifier(ModifierFlags::PUBLIC)
            && !declaration.has_modifier(ModifierFlags::OVERRIDE)
        {
            reporter.report_on(
                declaration,
                &diagnostic_messages::REDUNDANT_VISIBILITY_MODIFIER,
                &[],
            );
        }
    }
}

pub struct ClassNamingChecker;

impl DeclarationChecker for ClassNamingChecker {
    fn name(&self) -> &'static str {
        "class-naming"
    }

    fn check(
        &self,
        class: &FirElement,
        _ctx: &CheckerContext<'_>,
        reporter: &mut DiagnosticReporter,
    ) {
        let Some(name) = class.name() else {
            return;
        };
        if name.chars().next().is_some_and(|c| !c.is_uppercase()) {
            reporter.report_on(class, &diagnostic_messages::CLASS_NAMING_CONVENTION, &[name]);
        }
    }
}
