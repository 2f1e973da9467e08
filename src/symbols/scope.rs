use std::collections::{hash_map::Entry, HashMap};
use std::fmt::{self, Display};

use index_vec::IndexVec;

use crate::error::ErrorContent;

use super::symbol::{ScalarType, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(usize);
impl index_vec::Idx for SymbolId {
    fn from_usize(idx: usize) -> Self {
        Self(idx)
    }
    fn index(self) -> usize {
        self.0
    }
}

/// The symbol table of one program or procedure.
/// Symbols are kept in declaration order, names are unique within the scope.
#[derive(Debug, Clone)]
pub struct Scope<'src> {
    name: &'src str,
    outer: Option<&'src str>,
    return_type: Option<ScalarType>,
    params: Vec<&'src str>,
    symbols: IndexVec<SymbolId, Symbol<'src>>,
    by_name: HashMap<&'src str, SymbolId>,
    storage_size: u64,
}

impl<'src> Scope<'src> {
    pub fn new(name: &'src str, outer: Option<&'src str>, return_type: Option<ScalarType>) -> Self {
        Self {
            name,
            outer,
            return_type,
            params: Vec::new(),
            symbols: IndexVec::new(),
            by_name: HashMap::new(),
            storage_size: 0,
        }
    }

    pub fn name(&self) -> &'src str {
        self.name
    }

    /// Name of the lexically enclosing scope, `None` for the program
    pub fn outer(&self) -> Option<&'src str> {
        self.outer
    }

    /// `None` for the program
    pub fn return_type(&self) -> Option<ScalarType> {
        self.return_type
    }

    /// Formal parameter names in declaration order
    pub fn params(&self) -> &[&'src str] {
        &self.params
    }

    pub fn argc(&self) -> usize {
        self.params.len()
    }

    /// Frame size in bytes, known once the scope has been closed
    pub fn storage_size(&self) -> u64 {
        self.storage_size
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Adds a symbol, fails if the name is already declared in this scope
    pub fn declare(&mut self, symbol: Symbol<'src>) -> Result<SymbolId, ErrorContent<'src>> {
        match self.by_name.entry(symbol.name) {
            Entry::Occupied(_) => Err(ErrorContent::DuplicateSymbol {
                name: symbol.name,
                scope: self.name,
            }),
            Entry::Vacant(v) => {
                let id = self.symbols.push(symbol);
                v.insert(id);
                Ok(id)
            }
        }
    }

    pub fn get(&self, name: &'src str) -> Result<&Symbol<'src>, ErrorContent<'src>> {
        self.find(name).ok_or_else(|| self.unknown(name))
    }

    /// Like `get`, for names that do not live as long as the source
    pub fn find(&self, name: &str) -> Option<&Symbol<'src>> {
        self.by_name.get(name).map(|&id| &self.symbols[id])
    }

    pub fn symbol_mut(&mut self, name: &'src str) -> Result<&mut Symbol<'src>, ErrorContent<'src>> {
        match self.by_name.get(name) {
            Some(&id) => Ok(&mut self.symbols[id]),
            None => Err(self.unknown(name)),
        }
    }

    /// Changes fields of an already declared symbol
    pub fn update(
        &mut self,
        name: &'src str,
        f: impl FnOnce(&mut Symbol<'src>),
    ) -> Result<(), ErrorContent<'src>> {
        f(self.symbol_mut(name)?);
        Ok(())
    }

    /// Symbols in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&'src str, &Symbol<'src>)> + '_ {
        self.symbols.iter().map(|symbol| (symbol.name, symbol))
    }

    pub(crate) fn push_param(&mut self, name: &'src str) {
        self.params.push(name);
    }

    pub(crate) fn set_storage_size(&mut self, size: u64) {
        self.storage_size = size;
    }

    fn unknown(&self, name: &'src str) -> ErrorContent<'src> {
        ErrorContent::UnknownSymbol {
            name,
            scope: self.name,
        }
    }
}

impl Display for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}_table:", self.name)?;
        writeln!(f, "{{")?;
        writeln!(f, "    name: {}", self.name)?;
        match self.outer {
            Some(outer) => writeln!(f, "    outer: {outer}_table")?,
            None => writeln!(f, "    outer: none")?,
        }
        writeln!(f, "    argc: {}", self.argc())?;
        writeln!(f, "    arglist: ({})", self.params.join(", "))?;
        match self.return_type {
            Some(ty) => writeln!(f, "    rtype: {ty}")?,
            None => writeln!(f, "    rtype: none")?,
        }
        writeln!(f, "    size: {}", self.storage_size)?;
        for symbol in self.symbols.iter() {
            writeln!(f, "    {symbol}")?;
        }
        write!(f, "}}")
    }
}
