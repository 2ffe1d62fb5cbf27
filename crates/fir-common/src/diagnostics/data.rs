//! Diagnostic message table.
//!
//! Codes 1xxx belong to the common checker set, 2xxx to the extended set.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const UNRESOLVED_REFERENCE: u32 = 1001;
    pub const NO_THIS: u32 = 1002;
    pub const SYNTAX: u32 = 1003;
    pub const REDECLARATION: u32 = 1101;
    pub const CONFLICTING_OVERLOADS: u32 = 1102;
    pub const NON_ABSTRACT_FUNCTION_WITH_NO_BODY: u32 = 1103;
    pub const ABSTRACT_FUNCTION_WITH_BODY: u32 = 1104;
    pub const ABSTRACT_MEMBER_NOT_IN_ABSTRACT_CLASS: u32 = 1105;
    pub const MUST_BE_INITIALIZED: u32 = 1106;
    pub const CONFLICTING_TYPE_PARAMETERS: u32 = 1107;
    pub const TOPLEVEL_TYPEALIASES_ONLY: u32 = 1108;
    pub const RETURN_NOT_ALLOWED: u32 = 1201;
    pub const TOO_MANY_ARGUMENTS: u32 = 1202;
    pub const NO_VALUE_FOR_PARAMETER: u32 = 1203;
    pub const UNREACHABLE_CODE: u32 = 1301;
    pub const NO_RETURN_IN_FUNCTION_WITH_BLOCK_BODY: u32 = 1302;
    pub const UNINITIALIZED_VARIABLE: u32 = 1303;
    pub const REDUNDANT_VISIBILITY_MODIFIER: u32 = 2001;
    pub const CLASS_NAMING_CONVENTION: u32 = 2002;
    pub const CONDITION_ALWAYS_CONSTANT: u32 = 2003;
    pub const UNUSED_VARIABLE: u32 = 2004;
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage};

    pub const UNRESOLVED_REFERENCE: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::UNRESOLVED_REFERENCE,
        name: "UNRESOLVED_REFERENCE",
        category: DiagnosticCategory::Error,
        message: "Unresolved reference: {0}.",
    };
    pub const NO_THIS: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::NO_THIS,
        name: "NO_THIS",
        category: DiagnosticCategory::Error,
        message: "'this' is not defined in this context.",
    };
    pub const SYNTAX: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::SYNTAX,
        name: "SYNTAX",
        category: DiagnosticCategory::Error,
        message: "Syntax error: {0}.",
    };
    pub const REDECLARATION: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::REDECLARATION,
        name: "REDECLARATION",
        category: DiagnosticCategory::Error,
        message: "Redeclaration: {0}.",
    };
    pub const CONFLICTING_OVERLOADS: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::CONFLICTING_OVERLOADS,
        name: "CONFLICTING_OVERLOADS",
        category: DiagnosticCategory::Error,
        message: "Conflicting overloads: {0}.",
    };
    pub const NON_ABSTRACT_FUNCTION_WITH_NO_BODY: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::NON_ABSTRACT_FUNCTION_WITH_NO_BODY,
        name: "NON_ABSTRACT_FUNCTION_WITH_NO_BODY",
        category: DiagnosticCategory::Error,
        message: "Function '{0}' without a body must be abstract.",
    };
    pub const ABSTRACT_FUNCTION_WITH_BODY: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::ABSTRACT_FUNCTION_WITH_BODY,
        name: "ABSTRACT_FUNCTION_WITH_BODY",
        category: DiagnosticCategory::Error,
        message: "A function '{0}' with body cannot be abstract.",
    };
    pub const ABSTRACT_MEMBER_NOT_IN_ABSTRACT_CLASS: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::ABSTRACT_MEMBER_NOT_IN_ABSTRACT_CLASS,
        name: "ABSTRACT_MEMBER_NOT_IN_ABSTRACT_CLASS",
        category: DiagnosticCategory::Error,
        message: "Abstract member '{0}' in non-abstract class '{1}'.",
    };
    pub const MUST_BE_INITIALIZED: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::MUST_BE_INITIALIZED,
        name: "MUST_BE_INITIALIZED",
        category: DiagnosticCategory::Error,
        message: "Property '{0}' must be initialized or be abstract.",
    };
    pub const CONFLICTING_TYPE_PARAMETERS: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::CONFLICTING_TYPE_PARAMETERS,
        name: "CONFLICTING_TYPE_PARAMETERS",
        category: DiagnosticCategory::Error,
        message: "Conflicting type parameter name '{0}'.",
    };
    pub const TOPLEVEL_TYPEALIASES_ONLY: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::TOPLEVEL_TYPEALIASES_ONLY,
        name: "TOPLEVEL_TYPEALIASES_ONLY",
        category: DiagnosticCategory::Error,
        message: "Nested and local type aliases are not supported.",
    };
    pub const RETURN_NOT_ALLOWED: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::RETURN_NOT_ALLOWED,
        name: "RETURN_NOT_ALLOWED",
        category: DiagnosticCategory::Error,
        message: "'return' is not allowed here.",
    };
    pub const TOO_MANY_ARGUMENTS: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::TOO_MANY_ARGUMENTS,
        name: "TOO_MANY_ARGUMENTS",
        category: DiagnosticCategory::Error,
        message: "Too many arguments for '{0}': expected {1}, found {2}.",
    };
    pub const NO_VALUE_FOR_PARAMETER: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::NO_VALUE_FOR_PARAMETER,
        name: "NO_VALUE_FOR_PARAMETER",
        category: DiagnosticCategory::Error,
        message: "No value passed for parameter of '{0}': expected {1}, found {2}.",
    };
    pub const UNREACHABLE_CODE: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::UNREACHABLE_CODE,
        name: "UNREACHABLE_CODE",
        category: DiagnosticCategory::Warning,
        message: "Unreachable code.",
    };
    pub const NO_RETURN_IN_FUNCTION_WITH_BLOCK_BODY: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::NO_RETURN_IN_FUNCTION_WITH_BLOCK_BODY,
        name: "NO_RETURN_IN_FUNCTION_WITH_BLOCK_BODY",
        category: DiagnosticCategory::Error,
        message: "A 'return' expression is required in function '{0}' with a block body.",
    };
    pub const UNINITIALIZED_VARIABLE: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::UNINITIALIZED_VARIABLE,
        name: "UNINITIALIZED_VARIABLE",
        category: DiagnosticCategory::Error,
        message: "Variable '{0}' must be initialized.",
    };
    pub const REDUNDANT_VISIBILITY_MODIFIER: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::REDUNDANT_VISIBILITY_MODIFIER,
        name: "REDUNDANT_VISIBILITY_MODIFIER",
        category: DiagnosticCategory::Warning,
        message: "Redundant visibility modifier.",
    };
    pub const CLASS_NAMING_CONVENTION: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::CLASS_NAMING_CONVENTION,
        name: "CLASS_NAMING_CONVENTION",
        category: DiagnosticCategory::Warning,
        message: "Class name '{0}' should start with an uppercase letter.",
    };
    pub const CONDITION_ALWAYS_CONSTANT: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::CONDITION_ALWAYS_CONSTANT,
        name: "CONDITION_ALWAYS_CONSTANT",
        category: DiagnosticCategory::Warning,
        message: "Condition is always '{0}'.",
    };
    pub const UNUSED_VARIABLE: DiagnosticMessage = DiagnosticMessage {
        code: super::diagnostic_codes::UNUSED_VARIABLE,
        name: "UNUSED_VARIABLE",
        category: DiagnosticCategory::Warning,
        message: "Variable '{0}' is never used.",
    };
}

pub static DIAGNOSTIC_MESSAGES: [DiagnosticMessage; 21] = [
    diagnostic_messages::UNRESOLVED_REFERENCE,
    diagnostic_messages::NO_THIS,
    diagnostic_messages::SYNTAX,
    diagnostic_messages::REDECLARATION,
    diagnostic_messages::CONFLICTING_OVERLOADS,
    diagnostic_messages::NON_ABSTRACT_FUNCTION_WITH_NO_BODY,
    diagnostic_messages::ABSTRACT_FUNCTION_WITH_BODY,
    diagnostic_messages::ABSTRACT_MEMBER_NOT_IN_ABSTRACT_CLASS,
    diagnostic_messages::MUST_BE_INITIALIZED,
    diagnostic_messages::CONFLICTING_TYPE_PARAMETERS,
    diagnostic_messages::TOPLEVEL_TYPEALIASES_ONLY,
    diagnostic_messages::RETURN_NOT_ALLOWED,
    diagnostic_messages::TOO_MANY_ARGUMENTS,
    diagnostic_messages::NO_VALUE_FOR_PARAMETER,
    diagnostic_messages::UNREACHABLE_CODE,
    diagnostic_messages::NO_RETURN_IN_FUNCTION_WITH_BLOCK_BODY,
    diagnostic_messages::UNINITIALIZED_VARIABLE,
    diagnostic_messages::REDUNDANT_VISIBILITY_MODIFIER,
    diagnostic_messages::CLASS_NAMING_CONVENTION,
    diagnostic_messages::CONDITION_ALWAYS_CONSTANT,
    diagnostic_messages::UNUSED_VARIABLE,
];
