//! End-to-end what-if requests: derive a dependent state for an edited copy
//! and collect its diagnostics.

use std::sync::Arc;

use fir_analysis::tracing_config::init_tracing;
use fir_analysis::{
    AnalysisOptions, BufferedSink, CancellationToken, DeclRef, DeliveryMode, DiagnosticsCollector,
    LowLevelFacade, NodeIndex, ResolutionSession, ResolutionState, ResolveError, SyntaxKind,
    SyntaxTree, TreeBuilder, analyze_copy_at_offset,
};
use fir_common::diagnostic_codes::{NO_VALUE_FOR_PARAMETER, UNRESOLVED_REFERENCE};
use rayon::prelude::*;

#[derive(Clone, Copy)]
struct Nodes {
    f: NodeIndex,
    g: NodeIndex,
    /// First statement of `g`'s body.
    edit: NodeIndex,
}

/// fun helper(a: Int) {}
/// class A {
///   fun m(): Int { return }
/// }
/// fun f(x: Int) {
///   fun g() { x }
/// }
///
/// The edited copy appends `; helper(); missing` to the body of `g`.
fn source(edited: bool) -> (SyntaxTree, Nodes) {
    let mut b = TreeBuilder::new("what_if.kt");
    b.named(SyntaxKind::Function, "helper", |b| {
        b.text("fun helper(");
        b.named(SyntaxKind::Parameter, "a", |b| {
            b.text("a: ");
            b.leaf(SyntaxKind::TypeReference, "Int");
        });
        b.text(") ");
        b.node(SyntaxKind::Block, |b| {
            b.text("{}");
        });
    });
    b.text("\n");
    b.named(SyntaxKind::Class, "A", |b| {
        b.text("class A {\n  ");
        b.named(SyntaxKind::Function, "m", |b| {
            b.text("fun m(): ");
            b.leaf(SyntaxKind::TypeReference, "Int");
            b.text(" ");
            b.node(SyntaxKind::Block, |b| {
                b.text("{ ");
                b.node(SyntaxKind::Return, |b| {
                    b.text("return");
                });
                b.text(" }");
            });
        });
        b.text("\n}");
    });
    b.text("\n");

    let mut g = NodeIndex::NONE;
    let mut edit = NodeIndex::NONE;
    let f = b.named(SyntaxKind::Function, "f", |b| {
        b.text("fun f(");
        b.named(SyntaxKind::Parameter, "x", |b| {
            b.text("x: ");
            b.leaf(SyntaxKind::TypeReference, "Int");
        });
        b.text(") ");
        b.node(SyntaxKind::Block, |b| {
            b.text("{\n  ");
            g = b.named(SyntaxKind::Function, "g", |b| {
                b.text("fun g() ");
                b.node(SyntaxKind::Block, |b| {
                    b.text("{ ");
                    edit = b.leaf(SyntaxKind::NameReference, "x");
                    if edited {
                        b.text("; ");
                        b.named(SyntaxKind::Call, "helper", |b| {
                            b.text("helper()");
                        });
                        b.text("; ");
                        b.leaf(SyntaxKind::NameReference, "missing");
                    }
                    b.text(" }");
                });
            });
            b.text("\n}");
        });
    });
    (b.finish(), Nodes { f, g, edit })
}

struct Scenario {
    original: Arc<ResolutionState>,
    original_nodes: Nodes,
    copy: Arc<SyntaxTree>,
    copy_nodes: Nodes,
}

impl Scenario {
    fn new() -> Scenario {
        init_tracing();
        let (original, original_nodes) = source(false);
        let (copy, copy_nodes) = source(true);
        Scenario {
            original: Arc::new(ResolutionState::new(Arc::new(original))),
            original_nodes,
            copy: Arc::new(copy),
            copy_nodes,
        }
    }

    fn edit_offset(&self) -> u32 {
        self.copy
            .range(self.copy_nodes.edit)
            .map(|range| range.start)
            .expect("edit node")
    }
}

fn codes(diagnostics: &[fir_analysis::Diagnostic]) -> Vec<u32> {
    diagnostics.iter().map(|d| d.code).collect()
}

#[test]
fn local_function_maps_to_the_enclosing_top_level_function() {
    let s = Scenario::new();
    let facade = LowLevelFacade::default();
    let enclosing = facade
        .find_enclosing_non_local_declaration(&s.copy, s.copy_nodes.g)
        .expect("enclosing declaration");
    assert_eq!(enclosing, s.copy_nodes.f);

    let map = facade
        .resolve_correspondence(&s.copy, s.original.tree(), s.copy_nodes.edit)
        .expect("correspondence");
    assert_eq!(map.len(), 1);
    assert_eq!(map.deepest().copy, s.copy_nodes.f);
    assert_eq!(map.deepest().original, s.original_nodes.f);
}

#[test]
fn original_file_is_clean() {
    let s = Scenario::new();
    let mut collector = DiagnosticsCollector::pull(AnalysisOptions::default().collector_options());
    let stats = collector.collect_file(s.original.as_ref()).expect("not cancelled");
    assert!(collector.collected_diagnostics().is_empty());
    assert_eq!(stats.unhandled, 0);
}

#[test]
fn edited_copy_reports_only_the_new_problems() {
    let s = Scenario::new();
    let report = analyze_copy_at_offset(
        &s.original,
        &s.copy,
        s.edit_offset(),
        &AnalysisOptions::default(),
        None,
        None,
    )
    .expect("what-if analysis");

    assert_eq!(
        report.state.replaced_record().declaration,
        DeclRef::new(s.copy.id(), s.copy_nodes.f)
    );
    assert_eq!(
        codes(&report.diagnostics),
        [NO_VALUE_FOR_PARAMETER, UNRESOLVED_REFERENCE]
    );
    assert!(report.diagnostics.iter().all(|d| d.file == "what_if.kt"));
    assert_eq!(report.diagnostics[1].message_text, "Unresolved reference: missing.");
    assert_eq!(report.stats.unhandled, 0);
    assert_eq!(report.stats.reported, 2);

    // The dependent session still answers for declarations outside the edit.
    let helper = s.original.file_record().top_level[0];
    let record = report
        .state
        .record_for(DeclRef::new(s.original.tree().id(), helper))
        .expect("helper record from the original");
    assert_eq!(record.name, "helper");
}

#[test]
fn push_delivery_through_options() {
    let s = Scenario::new();
    let options =
        AnalysisOptions::from_json(r#"{ "delivery": "push", "extendedCheckers": true }"#)
            .expect("options");
    assert_eq!(options.delivery, DeliveryMode::Push);

    let mut sink = BufferedSink::new();
    let report = analyze_copy_at_offset(
        &s.original,
        &s.copy,
        s.edit_offset(),
        &options,
        Some(&mut sink),
        None,
    )
    .expect("what-if analysis");
    assert!(report.diagnostics.is_empty());
    assert_eq!(sink.codes(), [NO_VALUE_FOR_PARAMETER, UNRESOLVED_REFERENCE]);

    let missing_sink = analyze_copy_at_offset(
        &s.original,
        &s.copy,
        s.edit_offset(),
        &options,
        None,
        None,
    );
    assert!(missing_sink.is_err());
}

#[test]
fn diagnostics_are_grouped_under_the_rebuilt_declaration() {
    let s = Scenario::new();
    let state = LowLevelFacade::default()
        .dependent_state_at_offset(&s.original, &s.copy, s.edit_offset())
        .expect("dependent state");
    let mut collector = DiagnosticsCollector::pull(AnalysisOptions::default().collector_options());
    collector.collect_file(&state).expect("not cancelled");

    let grouped = collector.diagnostics_by_element();
    assert!(grouped.file_level.is_empty());
    assert_eq!(grouped.by_declaration.len(), 1);
    let rebuilt = DeclRef::new(s.copy.id(), s.copy_nodes.f);
    assert_eq!(grouped.for_declaration(rebuilt).len(), 2);
}

/// fun f() {  }
/// fun h() { zzz }
/// @Suppress("UNRESOLVED_REFERENCE") fun q() { yyy }
///
/// The edited copy types a literal into the body of `f`, which moves `h` and
/// `q` further down the file. Returns the tree and the `f`, `h` and literal nodes.
fn lengthening_source(edited: bool) -> (SyntaxTree, [NodeIndex; 3]) {
    let mut b = TreeBuilder::new("shifted.kt");
    let mut literal = NodeIndex::NONE;
    let f = b.named(SyntaxKind::Function, "f", |b| {
        b.text("fun f() ");
        b.node(SyntaxKind::Block, |b| {
            b.text("{ ");
            if edited {
                literal = b.leaf(SyntaxKind::Literal, "1234567890");
            }
            b.text(" }");
        });
    });
    b.text("\n");
    let h = b.named(SyntaxKind::Function, "h", |b| {
        b.text("fun h() ");
        b.node(SyntaxKind::Block, |b| {
            b.text("{ ");
            b.leaf(SyntaxKind::NameReference, "zzz");
            b.text(" }");
        });
    });
    b.text("\n");
    b.named(SyntaxKind::Function, "q", |b| {
        b.suppress("UNRESOLVED_REFERENCE");
        b.text("@Suppress(\"UNRESOLVED_REFERENCE\") fun q() ");
        b.node(SyntaxKind::Block, |b| {
            b.text("{ ");
            b.leaf(SyntaxKind::NameReference, "yyy");
            b.text(" }");
        });
    });
    (b.finish(), [f, h, literal])
}

#[test]
fn diagnostics_after_a_lengthening_edit_point_into_the_copy() {
    init_tracing();
    let (original, [original_f, ..]) = lengthening_source(false);
    let original = Arc::new(ResolutionState::new(Arc::new(original)));
    let (copy, [f, h, literal]) = lengthening_source(true);
    let copy = Arc::new(copy);
    let offset = copy.range(literal).map(|r| r.start).expect("edit node");

    let report = analyze_copy_at_offset(
        &original,
        &copy,
        offset,
        &AnalysisOptions::default(),
        None,
        None,
    )
    .expect("what-if analysis");
    assert_eq!(report.state.correspondence().deepest().original, original_f);
    assert_eq!(
        report.state.replaced_record().declaration,
        DeclRef::new(copy.id(), f)
    );

    assert_eq!(codes(&report.diagnostics), [UNRESOLVED_REFERENCE]);
    let unresolved = &report.diagnostics[0];
    assert_eq!(unresolved.message_text, "Unresolved reference: zzz.");
    assert_eq!(
        copy.text().get(unresolved.start as usize..unresolved.end() as usize),
        Some("zzz")
    );
    assert_eq!(report.stats.suppressed, 1);

    let moved = report
        .state
        .record_for(DeclRef::new(copy.id(), h))
        .expect("record for the moved sibling");
    assert_eq!(moved.name, "h");
}

#[test]
fn cancelled_request_surfaces_the_cancellation() {
    let s = Scenario::new();
    let token = CancellationToken::new();
    token.cancel();
    let err = analyze_copy_at_offset(
        &s.original,
        &s.copy,
        s.edit_offset(),
        &AnalysisOptions::default(),
        None,
        Some(&token),
    )
    .err()
    .expect("cancelled");
    let cause = err.downcast_ref::<ResolveError>().expect("resolve error");
    assert!(cause.is_cancellation());
}

#[test]
fn concurrent_requests_share_the_original_state() {
    let s = Scenario::new();
    let offsets: Vec<u32> = (0..16).map(|_| s.edit_offset()).collect();
    let replaced: Vec<DeclRef> = offsets
        .par_iter()
        .map(|&offset| {
            analyze_copy_at_offset(
                &s.original,
                &s.copy,
                offset,
                &AnalysisOptions::default(),
                None,
                None,
            )
            .map(|report| report.state.replaced_record().declaration)
            .expect("what-if analysis")
        })
        .collect();
    let expected = DeclRef::new(s.copy.id(), s.copy_nodes.f);
    assert!(replaced.iter().all(|&d| d == expected));
}
