//! Checker Context
//!
//! The containing-element stack of the traversal, shared read-only with every
//! checker invoked at the current element.

use fir_semantic::FirElement;
use fir_syntax::SyntaxKind;

pub struct CheckerContext<'a> {
    file_name: &'a str,
    /// Ancestors of the element being checked, outermost first.
    containing: Vec<&'a FirElement>,
}

impl<'a> CheckerContext<'a> {
    pub fn new(file_name: &'a str) -> Self {
        CheckerContext {
            file_name,
            containing: Vec::new(),
        }
    }

    #[inline]
    pub fn file_name(&self) -> &'a str {
        self.file_name
    }

    pub(crate) fn push(&mut self, element: &'a FirElement) {
        self.containing.push(element);
    }

    pub(crate) fn pop(&mut self) {
        self.containing.pop();
    }

    pub fn containing_elements(&self) -> &[&'a FirElement] {
        &self.containing
    }

    /// Direct parent of the element being checked.
    pub fn parent(&self) -> Option<&'a FirElement> {
        self.containing.last().copied()
    }

    fn innermost(&self, pred: impl Fn(&FirElement) -> bool) -> Option<&'a FirElement> {
        self.containing.iter().rev().copied().find(|e| pred(e))
    }

    pub fn containing_declaration(&self) -> Option<&'a FirElement> {
        self.innermost(|e| e.kind.is_declaration())
    }

    pub fn containing_class(&self) -> Option<&'a FirElement> {
        self.innermost(|e| e.kind.is_class_like())
    }

    /// Innermost function or lambda, not looking past a class boundary.
    pub fn enclosing_callable(&self) -> Option<&'a FirElement> {
        for element in self.containing.iter().rev().copied() {
            if element.kind.is_callable() {
                return Some(element);
            }
            if element.kind.is_class_like() || element.kind == SyntaxKind::File {
                return None;
            }
        }
        None
    }

    pub fn depth(&self) -> usize {
        self.containing.len()
    }
}
