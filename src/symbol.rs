//! Library operator symbol names
//!
//! Every operator reference in generated code goes through here so that it
//! matches the library naming convention: `GrB_<OP>_MONOID_<TAG>` for
//! monoids and `GrB_<OP>_<TAG>` for binary operators.

use std::fmt;

use crate::dtype::{ElementType, TypeRegistry};
use crate::error::GenResult;
use crate::operator::OperatorTag;

/// Namespace prefix of library symbols
pub const SYMBOL_PREFIX: &str = "GrB";
/// Infix marking a monoid symbol
pub const MONOID_INFIX: &str = "MONOID";
/// Delimiter between symbol parts
pub const SYMBOL_DELIMITER: &str = "_";

/// Name of a built-in monoid, e.g. `GrB_PLUS_MONOID_INT32`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MonoidSymbol(String);

/// Name of a built-in binary operator, e.g. `GrB_TIMES_INT32`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryOpSymbol(String);

macro_rules! impl_symbol {
    ($($name:ident),*) => {
        $(
            impl $name {
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    self.as_str()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

impl_symbol!(MonoidSymbol, BinaryOpSymbol);

fn join(parts: &[&str]) -> String {
    parts.join(SYMBOL_DELIMITER)
}

/// Build the monoid symbol for `op` specialised to `ty`
pub fn monoid_symbol(
    registry: &TypeRegistry,
    ty: ElementType,
    op: &OperatorTag,
) -> GenResult<MonoidSymbol> {
    let tag = registry.tag(ty)?;
    Ok(MonoidSymbol(join(&[
        SYMBOL_PREFIX,
        op.as_str(),
        MONOID_INFIX,
        tag,
    ])))
}

/// Build the binary operator symbol for `op` specialised to `ty`
pub fn binary_op_symbol(
    registry: &TypeRegistry,
    ty: ElementType,
    op: &OperatorTag,
) -> GenResult<BinaryOpSymbol> {
    let tag = registry.tag(ty)?;
    Ok(BinaryOpSymbol(join(&[SYMBOL_PREFIX, op.as_str(), tag])))
}
