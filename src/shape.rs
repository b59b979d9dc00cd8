//! Problem shape presets.

use std::fmt;

use crate::error::{GenError, GenResult};

/// Named problem size: matrix dimension and nonzero counts of A, B and C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapePreset {
    pub name: &'static str,
    pub n: u64,
    pub anz: u64,
    pub bnz: u64,
    pub cnz: u64,
}

impl ShapePreset {
    pub const fn new(name: &'static str, n: u64, anz: u64, bnz: u64, cnz: u64) -> Self {
        Self {
            name,
            n,
            anz,
            bnz,
            cnz,
        }
    }
}

impl fmt::Display for ShapePreset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} (N={}, Anz={}, Bnz={}, Cnz={})",
            self.name, self.n, self.anz, self.bnz, self.cnz
        )
    }
}

/// Shapes every run generates by default.
// medxmed (N=4096) and largexlarge (N=65536) go here once their Cnz is settled.
pub const STANDARD_SHAPES: [ShapePreset; 3] = [
    ShapePreset::new("nanoxnano", 32, 64, 56, 256),
    ShapePreset::new("tinyxtiny", 128, 1256, 1028, 1640),
    ShapePreset::new("smallxsmall", 1024, 65_536, 65_536, 10_000),
];

/// Ordered, immutable set of shape presets.
///
/// Declaration order is the order the expansion driver emits shapes in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeCatalog {
    presets: Vec<ShapePreset>,
}

impl ShapeCatalog {
    pub fn standard() -> Self {
        Self {
            presets: STANDARD_SHAPES.to_vec(),
        }
    }

    pub fn from_presets(presets: Vec<ShapePreset>) -> Self {
        Self { presets }
    }

    /// Looks up a preset by name.
    pub fn lookup(&self, name: &str) -> GenResult<&ShapePreset> {
        self.presets
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| GenError::UnknownShape(name.to_string()))
    }

    /// Builds a sub-catalog holding `names` in the given order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> GenResult<ShapeCatalog> {
        let mut presets: Vec<ShapePreset> = Vec::with_capacity(names.len());
        for name in names {
            let preset = *self.lookup(name.as_ref())?;
            if presets.iter().any(|p| p.name == preset.name) {
                return Err(GenError::InvalidArgument(format!(
                    "shape '{}' selected twice",
                    preset.name
                )));
            }
            presets.push(preset);
        }
        Ok(ShapeCatalog { presets })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapePreset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("nanoxnano", 32, 64, 56, 256)]
    #[case("tinyxtiny", 128, 1256, 1028, 1640)]
    #[case("smallxsmall", 1024, 65536, 65536, 10000)]
    fn test_lookup_standard(
        #[case] name: &str,
        #[case] n: u64,
        #[case] anz: u64,
        #[case] bnz: u64,
        #[case] cnz: u64,
    ) {
        let catalog = ShapeCatalog::standard();
        let preset = catalog.lookup(name).unwrap();
        assert_eq!((preset.n, preset.anz, preset.bnz, preset.cnz), (n, anz, bnz, cnz));
    }

    #[test]
    fn test_lookup_unknown() {
        let catalog = ShapeCatalog::standard();
        assert!(matches!(
            catalog.lookup("medxmed"),
            Err(GenError::UnknownShape(ref n)) if n == "medxmed"
        ));
    }

    #[test]
    fn test_declaration_order() {
        let names: Vec<_> = ShapeCatalog::standard().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["nanoxnano", "tinyxtiny", "smallxsmall"]);
    }

    #[test]
    fn test_select_keeps_caller_order() {
        let catalog = ShapeCatalog::standard();
        let selected = catalog.select(&["smallxsmall", "nanoxnano"]).unwrap();
        let names: Vec<_> = selected.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["smallxsmall", "nanoxnano"]);
    }

    #[test]
    fn test_select_rejects_duplicates_and_unknown() {
        let catalog = ShapeCatalog::standard();
        assert!(matches!(
            catalog.select(&["nanoxnano", "nanoxnano"]),
            Err(GenError::InvalidArgument(_))
        ));
        assert!(matches!(
            catalog.select(&["hugexhuge"]),
            Err(GenError::UnknownShape(_))
        ));
    }

    #[test]
    fn test_display() {
        let preset = ShapeCatalog::standard().lookup("nanoxnano").copied().unwrap();
        assert_eq!(
            preset.to_string(),
            "nanoxnano (N=32, Anz=64, Bnz=56, Cnz=256)"
        );
    }
}
