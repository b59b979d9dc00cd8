//! Element types and the type registry
//!
//! `ElementType` is the closed set of value types the mxm kernels are
//! instantiated for. The `TypeRegistry` maps each of them to the tag the
//! GraphBLAS library uses when selecting type-specialised operators.

use std::fmt;

use crate::error::{GenError, GenResult};

/// Element type of a matrix or scalar in a generated test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
    I32,
    U32,
    I64,
    U64,
    Bool,
    F32,
    F64,
}

impl ElementType {
    /// All element types, in registry order
    pub const ALL: [ElementType; 7] = [
        ElementType::I32,
        ElementType::U32,
        ElementType::I64,
        ElementType::U64,
        ElementType::Bool,
        ElementType::F32,
        ElementType::F64,
    ];

    /// C++ spelling used in template arguments and test names
    pub fn cpp_name(&self) -> &'static str {
        match self {
            ElementType::I32 => "int32_t",
            ElementType::U32 => "uint32_t",
            ElementType::I64 => "int64_t",
            ElementType::U64 => "uint64_t",
            ElementType::Bool => "bool",
            ElementType::F32 => "float",
            ElementType::F64 => "double",
        }
    }

    /// Library tag suffix (`GrB_PLUS_MONOID_<tag>`)
    pub fn library_tag(&self) -> &'static str {
        match self {
            ElementType::I32 => "INT32",
            ElementType::U32 => "UINT32",
            ElementType::I64 => "INT64",
            ElementType::U64 => "UINT64",
            ElementType::Bool => "BOOL",
            ElementType::F32 => "FP32",
            ElementType::F64 => "FP64",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.cpp_name())
    }
}

/// Registry entry: an element type and its library tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    pub ty: ElementType,
    pub tag: &'static str,
}

/// Immutable mapping from element types to library tags
///
/// Built once at start-up and passed by reference to everything that
/// needs to resolve a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    entries: Vec<TypeEntry>,
}

impl TypeRegistry {
    /// Registry holding every supported element type
    pub fn standard() -> Self {
        Self::with_types(&ElementType::ALL)
    }

    /// Registry restricted to the given types
    pub fn with_types(types: &[ElementType]) -> Self {
        let mut entries: Vec<TypeEntry> = Vec::with_capacity(types.len());
        for &ty in types {
            if entries.iter().all(|e| e.ty != ty) {
                entries.push(TypeEntry {
                    ty,
                    tag: ty.library_tag(),
                });
            }
        }
        Self { entries }
    }

    /// Resolve a C++ type name to a registered element type
    pub fn resolve(&self, name: &str) -> GenResult<ElementType> {
        self.entries
            .iter()
            .find(|e| e.ty.cpp_name() == name)
            .map(|e| e.ty)
            .ok_or_else(|| GenError::UnknownType(name.to_string()))
    }

    /// Library tag of a registered element type
    pub fn tag(&self, ty: ElementType) -> GenResult<&'static str> {
        self.entries
            .iter()
            .find(|e| e.ty == ty)
            .map(|e| e.tag)
            .ok_or_else(|| GenError::UnknownType(ty.cpp_name().to_string()))
    }

    /// Resolve a semicolon-delimited type list, keeping its order
    ///
    /// One trailing `;` is allowed. An empty entry anywhere else is an
    /// unknown type. Types must be distinct.
    pub fn parse_list(&self, list: &str) -> GenResult<Vec<ElementType>> {
        let list = list.trim();
        let list = list.strip_suffix(';').unwrap_or(list);
        if list.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut types: Vec<ElementType> = Vec::new();
        for name in list.split(';').map(str::trim) {
            let ty = self.resolve(name)?;
            if types.contains(&ty) {
                return Err(GenError::InvalidArgument(format!(
                    "duplicate type in type list: {}",
                    name
                )));
            }
            types.push(ty);
        }
        Ok(types)
    }

    pub fn entries(&self) -> &[TypeEntry] {
        &self.entries
    }

    pub fn contains(&self, ty: ElementType) -> bool {
        self.entries.iter().any(|e| e.ty == ty)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
