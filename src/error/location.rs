use std::{
    fmt::{Debug, Display},
    ops::Deref,
};

/// Describes the location of a token in source code
/// A location with an empty `file_name` is unknown, it is what tokens built without a source get
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceLocation<'a> {
    pub file_name: &'a str,
    pub range: (usize, usize),
}

impl SourceLocation<'_> {
    pub fn is_known(&self) -> bool {
        !self.file_name.is_empty()
    }
}

impl Debug for SourceLocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.is_known() {
            return write!(f, "<unknown>");
        }
        write!(
            f,
            "`{}` #{}~{}",
            self.file_name.escape_debug(),
            self.range.0,
            self.range.1
        )
    }
}

impl Display for SourceLocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.is_known() {
            return write!(f, "<unknown>");
        }
        write!(
            f,
            "{}:{}:{}",
            self.file_name.escape_debug(),
            self.range.0,
            self.range.1
        )
    }
}

pub trait IntoSourceLoc<'a> {
    fn into_source_location(self) -> SourceLocation<'a>;
}
impl<'a> IntoSourceLoc<'a> for SourceLocation<'a> {
    fn into_source_location(self) -> SourceLocation<'a> {
        self
    }
}
impl<'a> IntoSourceLoc<'a> for (&'a str, usize, usize) {
    fn into_source_location(self) -> SourceLocation<'a> {
        SourceLocation {
            file_name: self.0,
            range: (self.1, self.2),
        }
    }
}

/// A wrapper for attaching a source location to a token
#[derive(Clone, PartialEq)]
pub struct Traced<'a, T>(T, SourceLocation<'a>);

impl<'a, T> Traced<'a, T> {
    pub fn new(inner: T, source_location: impl IntoSourceLoc<'a>) -> Self {
        Self(inner, source_location.into_source_location())
    }
    pub fn inner(&self) -> &T {
        &self.0
    }
    pub fn src_loc(&self) -> SourceLocation<'a> {
        self.1
    }
}

/// Tokens handed over without a source are traced to an unknown location
impl<'a, T> From<T> for Traced<'a, T> {
    fn from(inner: T) -> Self {
        Self(inner, SourceLocation::default())
    }
}

impl<'a, T> Deref for Traced<'a, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl<'a, T> Debug for Traced<'a, T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner().fmt(f)
    }
}
impl<'a, T> Display for Traced<'a, T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner().fmt(f)
    }
}
