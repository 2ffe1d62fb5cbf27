//! Structural node kinds.

/// Kind of a syntax node.
///
/// Declaration kinds are compared exactly when matching a copy against its
/// original: a function never corresponds to a property at the same offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyntaxKind {
    File,
    Import,

    // Declarations
    Class,
    Object,
    Function,
    Property,
    TypeAlias,

    // Declaration parts
    Parameter,
    TypeParameter,
    TypeReference,

    // Statements and expressions
    Block,
    NameReference,
    Call,
    Literal,
    Lambda,
    Return,
    Assignment,
    If,
    ThisReference,

    /// Placeholder produced by the parser for unparsable input.
    ErrorElement,
}

impl SyntaxKind {
    /// Named declarations that may own a semantic record.
    #[inline]
    pub const fn is_declaration(self) -> bool {
        matches!(
            self,
            SyntaxKind::Class
                | SyntaxKind::Object
                | SyntaxKind::Function
                | SyntaxKind::Property
                | SyntaxKind::TypeAlias
        )
    }

    #[inline]
    pub const fn is_class_like(self) -> bool {
        matches!(self, SyntaxKind::Class | SyntaxKind::Object)
    }

    #[inline]
    pub const fn is_callable(self) -> bool {
        matches!(self, SyntaxKind::Function | SyntaxKind::Lambda)
    }

    /// Kinds whose subtree is executable code. A class declared below one of
    /// these is local.
    #[inline]
    pub const fn is_code_container(self) -> bool {
        matches!(
            self,
            SyntaxKind::Function | SyntaxKind::Property | SyntaxKind::Lambda | SyntaxKind::Block
        )
    }

    #[inline]
    pub const fn is_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::NameReference
                | SyntaxKind::Call
                | SyntaxKind::Literal
                | SyntaxKind::Lambda
                | SyntaxKind::Return
                | SyntaxKind::Assignment
                | SyntaxKind::If
                | SyntaxKind::ThisReference
                | SyntaxKind::Block
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SyntaxKind::File => "file",
            SyntaxKind::Import => "import",
            SyntaxKind::Class => "class",
            SyntaxKind::Object => "object",
            SyntaxKind::Function => "function",
            SyntaxKind::Property => "property",
            SyntaxKind::TypeAlias => "type alias",
            SyntaxKind::Parameter => "parameter",
            SyntaxKind::TypeParameter => "type parameter",
            SyntaxKind::TypeReference => "type reference",
            SyntaxKind::Block => "block",
            SyntaxKind::NameReference => "name reference",
            SyntaxKind::Call => "call",
            SyntaxKind::Literal => "literal",
            SyntaxKind::Lambda => "lambda",
            SyntaxKind::Return => "return",
            SyntaxKind::Assignment => "assignment",
            SyntaxKind::If => "if",
            SyntaxKind::ThisReference => "this",
            SyntaxKind::ErrorElement => "error element",
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
