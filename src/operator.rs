//! Operator tags, semirings and the operator policy

use std::fmt;

use log::warn;

use crate::error::{GenError, GenResult};

/// Monoid tags the GraphBLAS library defines built-in monoids for
pub const KNOWN_MONOIDS: &[&str] = &[
    "PLUS", "TIMES", "MIN", "MAX", "ANY", "LOR", "LAND", "LXOR", "LXNOR", "EQ",
];

/// Binary operator tags the GraphBLAS library defines
pub const KNOWN_BINOPS: &[&str] = &[
    "FIRST", "SECOND", "ONEB", "PAIR", "PLUS", "MINUS", "RMINUS", "TIMES", "DIV", "RDIV", "MIN",
    "MAX", "ANY", "LOR", "LAND", "LXOR", "LXNOR", "EQ", "NE", "GT", "LT", "GE", "LE",
];

/// Role an operator tag plays in a semiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Monoid,
    BinaryOp,
}

impl OperatorKind {
    fn known(&self) -> &'static [&'static str] {
        match self {
            OperatorKind::Monoid => KNOWN_MONOIDS,
            OperatorKind::BinaryOp => KNOWN_BINOPS,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            OperatorKind::Monoid => "monoid",
            OperatorKind::BinaryOp => "binary",
        }
    }
}

/// Operator name as it appears in library symbols (`PLUS`, `TIMES`, ...)
///
/// Any non-empty string is accepted; whether it names a real operator is
/// decided by the `OperatorPolicy`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperatorTag(String);

impl OperatorTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the library defines this tag for the given role
    pub fn is_known(&self, kind: OperatorKind) -> bool {
        kind.known().contains(&self.0.as_str())
    }
}

impl From<&str> for OperatorTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for OperatorTag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for OperatorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How operator tags outside the known sets are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperatorPolicy {
    /// Interpolate verbatim, warn about unknown tags
    #[default]
    Permissive,
    /// Reject unknown tags
    Strict,
}

impl OperatorPolicy {
    /// Apply the policy to one tag
    pub fn check(&self, tag: &OperatorTag, kind: OperatorKind) -> GenResult<()> {
        if tag.is_known(kind) {
            return Ok(());
        }
        match self {
            OperatorPolicy::Permissive => {
                warn!(
                    "{} operator '{}' is not a known library operator; generated code may not compile",
                    kind.label(),
                    tag
                );
                Ok(())
            }
            OperatorPolicy::Strict => Err(GenError::UnknownOperator {
                kind: kind.label(),
                tag: tag.to_string(),
            }),
        }
    }

    /// Apply the policy to both halves of a semiring
    pub fn check_semiring(&self, semiring: &Semiring) -> GenResult<()> {
        self.check(&semiring.monoid, OperatorKind::Monoid)?;
        self.check(&semiring.binop, OperatorKind::BinaryOp)
    }
}

/// A (monoid, binary op) pair, written `<monoid>_<binop>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Semiring {
    pub monoid: OperatorTag,
    pub binop: OperatorTag,
}

impl Semiring {
    /// Both tags must be non-empty and free of `_`, so the written form
    /// splits back into the same pair.
    pub fn new(monoid: impl Into<String>, binop: impl Into<String>) -> GenResult<Self> {
        let monoid = monoid.into();
        let binop = binop.into();
        let valid = |tag: &str| !tag.is_empty() && !tag.contains('_');
        if !valid(&monoid) || !valid(&binop) {
            return Err(GenError::InvalidSemiring(format!("{}_{}", monoid, binop)));
        }
        Ok(Self {
            monoid: OperatorTag::new(monoid),
            binop: OperatorTag::new(binop),
        })
    }

    /// Parse `<monoid>_<binop>`; exactly one separator, both halves non-empty
    pub fn parse(s: &str) -> GenResult<Self> {
        match s.split_once('_') {
            Some((monoid, binop)) => Self::new(monoid, binop),
            None => Err(GenError::InvalidSemiring(s.to_string())),
        }
    }
}

impl fmt::Display for Semiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.monoid, self.binop)
    }
}

/// Split a semicolon-delimited operator list
pub fn parse_operator_list(list: &str) -> Vec<OperatorTag> {
    list.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(OperatorTag::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("PLUS_TIMES", "PLUS", "TIMES")]
    #[case("MIN_PLUS", "MIN", "PLUS")]
    #[case("ANY_PAIR", "ANY", "PAIR")]
    fn test_semiring_parse(#[case] input: &str, #[case] monoid: &str, #[case] binop: &str) {
        let semiring = Semiring::parse(input).unwrap();
        assert_eq!(semiring.monoid.as_str(), monoid);
        assert_eq!(semiring.binop.as_str(), binop);
        assert_eq!(semiring.to_string(), input);
    }

    #[rstest]
    #[case("PLUS")]
    #[case("PLUS_TIMES_MIN")]
    #[case("_TIMES")]
    #[case("PLUS_")]
    #[case("")]
    fn test_semiring_parse_invalid(#[case] input: &str) {
        assert!(matches!(
            Semiring::parse(input),
            Err(GenError::InvalidSemiring(_))
        ));
    }

    #[rstest]
    #[case("PLUS_MIN", "TIMES")]
    #[case("PLUS", "MIN_TIMES")]
    #[case("", "TIMES")]
    #[case("PLUS", "")]
    fn test_semiring_new_invalid(#[case] monoid: &str, #[case] binop: &str) {
        match Semiring::new(monoid, binop) {
            Err(GenError::InvalidSemiring(s)) => assert_eq!(s, format!("{}_{}", monoid, binop)),
            other => panic!("expected InvalidSemiring, got {:?}", other),
        }
    }

    #[test]
    fn test_permissive_policy_accepts_unknown() {
        let tag = OperatorTag::new("FROB");
        assert!(!tag.is_known(OperatorKind::Monoid));
        assert!(OperatorPolicy::Permissive
            .check(&tag, OperatorKind::Monoid)
            .is_ok());
    }

    #[test]
    fn test_strict_policy_rejects_unknown() {
        let semiring = Semiring::new("PLUS", "FROB").unwrap();
        let err = OperatorPolicy::Strict.check_semiring(&semiring).unwrap_err();
        match err {
            GenError::UnknownOperator { kind, tag } => {
                assert_eq!(kind, "binary");
                assert_eq!(tag, "FROB");
            }
            other => panic!("expected UnknownOperator, got {:?}", other),
        }
        assert!(OperatorPolicy::Strict
            .check_semiring(&Semiring::new("PLUS", "TIMES").unwrap())
            .is_ok());
    }

    #[test]
    fn test_monoid_and_binop_sets_differ() {
        let first = OperatorTag::new("FIRST");
        assert!(first.is_known(OperatorKind::BinaryOp));
        assert!(!first.is_known(OperatorKind::Monoid));
    }

    #[test]
    fn test_parse_operator_list() {
        let ops = parse_operator_list("PLUS;MIN; MAX;");
        assert_eq!(
            ops,
            vec![
                OperatorTag::new("PLUS"),
                OperatorTag::new("MIN"),
                OperatorTag::new("MAX")
            ]
        );
    }
}
