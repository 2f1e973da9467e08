use std::collections::{hash_map::Entry, HashMap};
use std::fmt::{self, Display};

use index_vec::IndexVec;

use crate::error::ErrorContent;

use super::{scope::Scope, symbol::ScalarType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(usize);
impl index_vec::Idx for ScopeId {
    fn from_usize(idx: usize) -> Self {
        Self(idx)
    }
    fn index(self) -> usize {
        self.0
    }
}

/// Every scope produced by one recognition run, in creation order.
/// Scope names are unique across the whole collection, not just among siblings, so two
/// procedures in unrelated branches of the program still can't share a name.
#[derive(Debug, Clone, Default)]
pub struct ScopeCollection<'src> {
    scopes: IndexVec<ScopeId, Scope<'src>>,
    by_name: HashMap<&'src str, ScopeId>,
}

impl<'src> ScopeCollection<'src> {
    pub fn create(
        &mut self,
        name: &'src str,
        outer: Option<&'src str>,
        return_type: Option<ScalarType>,
    ) -> Result<ScopeId, ErrorContent<'src>> {
        match self.by_name.entry(name) {
            Entry::Occupied(_) => Err(ErrorContent::DuplicateScope(name)),
            Entry::Vacant(v) => {
                let id = self.scopes.push(Scope::new(name, outer, return_type));
                v.insert(id);
                Ok(id)
            }
        }
    }

    pub fn lookup(&self, name: &'src str) -> Result<&Scope<'src>, ErrorContent<'src>> {
        self.find(name).ok_or(ErrorContent::UnknownScope(name))
    }

    /// Like `lookup`, for names that do not live as long as the source
    pub fn find(&self, name: &str) -> Option<&Scope<'src>> {
        self.id_of(name).map(|id| &self.scopes[id])
    }

    pub fn id_of(&self, name: &str) -> Option<ScopeId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope<'src>> {
        self.scopes.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: ScopeId) -> Option<&mut Scope<'src>> {
        self.scopes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Scopes in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Scope<'src>> + '_ {
        self.scopes.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'src str> + '_ {
        self.scopes.iter().map(Scope::name)
    }
}

impl Display for ScopeCollection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, scope) in self.scopes.iter().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            write!(f, "{scope}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_names_are_global() {
        let mut scopes = ScopeCollection::default();
        scopes.create("p", None, None).unwrap();
        scopes.create("a", Some("p"), Some(ScalarType::Int)).unwrap();
        scopes.create("b", Some("p"), Some(ScalarType::Int)).unwrap();
        // `c` under `b` would never see a `c` under `a`, it still collides
        scopes.create("c", Some("a"), Some(ScalarType::Int)).unwrap();
        assert_eq!(
            scopes.create("c", Some("b"), Some(ScalarType::Float)),
            Err(ErrorContent::DuplicateScope("c"))
        );
        assert_eq!(scopes.lookup("c").unwrap().outer(), Some("a"));
        assert_eq!(scopes.find(&String::from("b")).map(Scope::name), Some("b"));
        assert_eq!(scopes.names().collect::<Vec<_>>(), ["p", "a", "b", "c"]);
    }

    #[test]
    fn unknown_scope() {
        let scopes = ScopeCollection::default();
        assert_eq!(scopes.lookup("q").unwrap_err(), ErrorContent::UnknownScope("q"));
        assert!(scopes.is_empty());
    }
}
