//! Documentation content for rql CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Literals,
    Errors,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "grammar" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "literals" | "values" | "types" => Some(Self::Literals),
            "errors" | "diagnostics" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"RQL DOCUMENTATION

RQL is a resource query language for filter predicates. Statements are
written in prefix form: an operator followed by a parenthesized operand list.

DOCUMENTATION CATEGORIES

  syntax            Statement structure, lists, and whitespace
  operators         The nine operator keywords and their operands
  literals          Identifiers, strings, numbers, booleans, and null
  errors            How parse errors are reported

QUICK REFERENCE

  eq(id,12)                         Comparison
  and(eq(a,1),or(lt(b,2),gt(b,9)))  Nesting
  in(name,("Jason","Kevin"))        Membership with a value list

Run 'rql doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Literals) => Ok(LITERALS_DOC),
        Some(DocCategory::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Statement Structure

STATEMENT
  statement := operator? EOF
    A statement is a single operator, or nothing at all. Empty and
    whitespace-only statements are valid and have no operator.

OPERATOR
  operator := OPERATOR '(' list ')'

    Example:
      eq(id,12)

LIST
  list := (value (',' value)*)? ','?
    Values are separated by commas. A trailing comma before ')' is allowed.
    An operator may have no operands at all: and()

VALUE
  value := IDENT | STRING | NUMBER | BOOL | NULL | operator | '(' list ')'
    A parenthesized list not preceded by an operator is a value list:
      in(id,(1,2,3))

WHITESPACE
    Spaces, tabs, and newlines may appear between any two tokens and are
    ignored. Carriage returns are not whitespace.

NESTING
    At most 128 lists may be open at once. Operator operand lists and
    value lists both count.

CANONICAL FORM
    'rql check' prints statements without whitespace and with bare commas:
      and( eq(id, 12) )   ->   and(eq(id,12))
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

LOGICAL
  and(p1, p2, ...)    All predicates hold
  or(p1, p2, ...)     At least one predicate holds

COMPARISON
  eq(field, value)    Equal
  ne(field, value)    Not equal
  lt(field, value)    Less than
  gt(field, value)    Greater than
  le(field, value)    Less than or equal
  ge(field, value)    Greater than or equal

MEMBERSHIP
  in(field, (v1, v2, ...))
    Operand 0 is the field; the remaining operands form the candidate set.

Operator keywords are lowercase and case-sensitive.
"#;

const LITERALS_DOC: &str = r#"LITERALS

IDENTIFIERS
  first_name   user.age   _id
    Letters, digits, '_' and '.'. Must not start with a digit or '.'.

STRINGS
  "Jason"   "say \"hi\""   "tab\there"
    Double quotes only. Escapes: \a \b \f \n \r \t \v \\ \" \xHH \NNN
    \uHHHH \UHHHHHHHH. A raw newline inside a string is an error.

NUMBERS
  12   -12.3   +1.2   .50   073
    Optional sign, digits, optional fraction. Each number is stored as
    every representation that holds it exactly: 100 is int, uint and
    float; -73 has no uint form; 18446744073709551615 only fits uint.
    A leading 0 means octal. An integer too large for 64 bits is an error
    unless written with a fraction.

BOOLEANS AND NULL
  true   false   null
"#;

const ERRORS_DOC: &str = r#"ERRORS

The first problem aborts the parse. Errors print as

  statement: <name>:<line>: <message>

followed by the location <name>:<line>:<column> of the offending token.

CATEGORIES
  lexical   unrecognized character, unterminated string, bad number,
            unbalanced parentheses
  syntax    a token in a position the grammar does not allow, a token
            after the operator, lists nested deeper than 128 levels
  literal   number that fits no representation, bad string escape

EXAMPLE
  $ rql check 'eq(id 12)'
  statement: root:1: unexpected "12" in comma or right parentheses
    at root:1:7

  $ rql check 'eq(id,12) x'
  statement: root:1: unexpected token after operator: "x"
    at root:1:11
"#;
