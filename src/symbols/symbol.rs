use std::fmt::{self, Display};

/// Bytes occupied by one scalar word, also the size of a reference and of a procedure's slot
pub const WORD_SIZE: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int,
    Float,
}

impl ScalarType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
        }
    }
}

impl Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element type and reference-ness are independent fields, so an array parameter keeps its
/// element type after being marked as passed by reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Scalar {
        ty: ScalarType,
        is_reference: bool,
    },
    /// `extents` is empty for array parameters, which only carry a reference
    Array {
        element: ScalarType,
        extents: Vec<u64>,
        is_reference: bool,
    },
    Procedure {
        return_type: ScalarType,
    },
}

/// One declared name inside a scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol<'src> {
    pub name: &'src str,
    pub kind: SymbolKind,
    /// In bytes
    pub storage_size: u64,
    /// Position inside the owning scope's storage region, in bytes
    pub offset: u64,
}

impl<'src> Symbol<'src> {
    pub fn scalar(name: &'src str, ty: ScalarType, offset: u64) -> Self {
        Self {
            name,
            kind: SymbolKind::Scalar {
                ty,
                is_reference: false,
            },
            storage_size: WORD_SIZE,
            offset,
        }
    }

    /// An array whose extents are not known yet, it occupies nothing until they are filled in
    pub fn array(name: &'src str, element: ScalarType, offset: u64) -> Self {
        Self {
            name,
            kind: SymbolKind::Array {
                element,
                extents: Vec::new(),
                is_reference: false,
            },
            storage_size: 0,
            offset,
        }
    }

    pub fn procedure(name: &'src str, return_type: ScalarType, offset: u64) -> Self {
        Self {
            name,
            kind: SymbolKind::Procedure { return_type },
            storage_size: WORD_SIZE,
            offset,
        }
    }

    /// Turns a freshly built scalar or array into a by-reference parameter.
    /// A parameter only holds an address, so it occupies one word whatever it points to.
    pub fn into_reference(mut self) -> Self {
        match &mut self.kind {
            SymbolKind::Scalar { is_reference, .. } | SymbolKind::Array { is_reference, .. } => {
                *is_reference = true;
                self.storage_size = WORD_SIZE;
            }
            SymbolKind::Procedure { .. } => (),
        }
        self
    }

    pub fn is_reference(&self) -> bool {
        match self.kind {
            SymbolKind::Scalar { is_reference, .. } | SymbolKind::Array { is_reference, .. } => {
                is_reference
            }
            SymbolKind::Procedure { .. } => false,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, SymbolKind::Array { .. })
    }

    /// Scalar type of a scalar, element type of an array, return type of a procedure
    pub fn scalar_type(&self) -> ScalarType {
        match self.kind {
            SymbolKind::Scalar { ty, .. } => ty,
            SymbolKind::Array { element, .. } => element,
            SymbolKind::Procedure { return_type } => return_type,
        }
    }

    pub fn extents(&self) -> Option<&[u64]> {
        match &self.kind {
            SymbolKind::Array { extents, .. } => Some(extents),
            _ => None,
        }
    }
}

impl Display for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        if self.is_reference() {
            write!(f, "var ")?;
        }
        match &self.kind {
            SymbolKind::Scalar { ty, .. } => write!(f, "{ty}")?,
            SymbolKind::Array {
                element, extents, ..
            } => {
                write!(f, "array")?;
                if !extents.is_empty() {
                    write!(f, " [")?;
                    for (i, extent) in extents.iter().enumerate() {
                        if i != 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{extent}")?;
                    }
                    write!(f, "]")?;
                }
                write!(f, " of {element}")?;
            }
            SymbolKind::Procedure { return_type } => write!(f, "procedure -> {return_type}")?,
        }
        write!(f, ", size {}, offset {}", self.storage_size, self.offset)
    }
}
