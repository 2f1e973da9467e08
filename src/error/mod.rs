pub mod location;

use std::fmt::{self, Display, Write};

use colored::Colorize;
use location::{IntoSourceLoc, SourceLocation};

use crate::token::TokenKind;

/// What the recognizer was looking for when it hit a mismatching token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Token(TokenKind),
    OneOf(Vec<TokenKind>),
    EndOfInput,
}

impl Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(kind) => write!(f, "{kind}"),
            Self::OneOf(kinds) => {
                write!(f, "one of ")?;
                for (i, kind) in kinds.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{kind}")?;
                }
                Ok(())
            }
            Self::EndOfInput => write!(f, "end of input"),
        }
    }
}

impl From<TokenKind> for Expected {
    fn from(kind: TokenKind) -> Self {
        Self::Token(kind)
    }
}

fn found_or_eof(found: &Option<TokenKind>) -> String {
    match found {
        Some(kind) => kind.to_string(),
        None => "end of input".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorContent<'src> {
    // --- Recognizer stage
    /// `found` is `None` when the token source ran out
    #[error("expected {expected}, found {}", found_or_eof(.found))]
    SyntaxMismatch {
        expected: Expected,
        found: Option<TokenKind>,
    },
    #[error("a `begin ... end` closed more scopes than were open")]
    UnbalancedScope,

    // --- Symbol tables
    #[error("scope `{0}` has already been defined")]
    DuplicateScope(&'src str),
    #[error("`{name}` has already been defined in scope `{scope}`")]
    DuplicateSymbol { name: &'src str, scope: &'src str },
    #[error("scope `{0}` is not found")]
    UnknownScope(&'src str),
    #[error("`{name}` is not found in scope `{scope}`")]
    UnknownSymbol { name: &'src str, scope: &'src str },
    #[error("storage size of `{0}` overflows")]
    StorageOverflow(&'src str),
}

impl<'src> ErrorContent<'src> {
    #[must_use]
    pub fn wrap(self, loc: impl IntoSourceLoc<'src>) -> Error<'src> {
        Error {
            location: loc.into_source_location(),
            content: self,
        }
    }

    pub fn mismatch(expected: impl Into<Expected>, found: Option<TokenKind>) -> Self {
        Self::SyntaxMismatch {
            expected: expected.into(),
            found,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::SyntaxMismatch { found: None, .. } => "unexpected end of input",
            Self::SyntaxMismatch { .. } => "unexpected token",
            Self::UnbalancedScope => "unbalanced scope",
            Self::DuplicateScope(_) => "scope redefinition",
            Self::DuplicateSymbol { .. } => "symbol redefinition",
            Self::UnknownScope(_) => "scope not found",
            Self::UnknownSymbol { .. } => "symbol not found",
            Self::StorageOverflow(_) => "storage overflow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error<'src> {
    pub location: SourceLocation<'src>,
    pub content: ErrorContent<'src>,
}

impl Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_known() {
            write!(f, "{}: {}", self.location, self.content)
        } else {
            write!(f, "{}", self.content)
        }
    }
}

impl std::error::Error for Error<'_> {}

impl<'src> Error<'src> {
    /// Format the error in its final presentation form.
    /// `file_content` is the text the location's byte range points into; if the location is
    /// unknown or doesn't fit in `file_content` only the header and the message are rendered.
    pub fn render(&self, file_content: &str) -> String {
        let mut out = String::new();
        let (start, end) = self.location.range;
        let fits = self.location.is_known()
            && start <= file_content.len()
            && file_content.is_char_boundary(start);
        if !fits {
            _ = write!(
                out,
                "{} {}\n    {}\n\n{}\n",
                "-->".blue().bold(),
                self.location.to_string().bold(),
                self.content.name(),
                self.content.to_string().red().bold(),
            );
            return out;
        }
        let line_start = file_content[..start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = file_content[start..]
            .find('\n')
            .map_or(file_content.len(), |i| start + i);
        let line_num = file_content[..line_start].matches('\n').count();
        let line_text = &file_content[line_start..line_end];
        let col_num = file_content[line_start..start].chars().count();
        _ = write!(
            out,
            "{} {}\n    {}\n\n",
            "-->".blue().bold(),
            format!(
                "{}:{}:{}",
                self.location.file_name.escape_default(),
                line_num + 1,
                col_num + 1,
            )
            .bold(),
            self.content.name(),
        );
        _ = writeln!(out, "{line_text}");
        for c in file_content[line_start..start].chars() {
            out.push(if c == '\t' { '\t' } else { ' ' });
        }
        let len = file_content
            .get(start..end.min(line_end).max(start))
            .map_or(0, |token| token.chars().count());
        if len == 0 {
            _ = write!(out, "{}", "^".red().bold());
        } else {
            _ = write!(out, "{}", "~".repeat(len).red().bold());
        }
        _ = writeln!(out, " {}", self.content.to_string().red().bold());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_messages() {
        let e = ErrorContent::mismatch(TokenKind::Semicolon, Some(TokenKind::Var));
        assert_eq!(e.to_string(), "expected `;`, found `var`");
        let e = ErrorContent::mismatch(
            Expected::OneOf(vec![TokenKind::Int, TokenKind::Float]),
            None,
        );
        assert_eq!(e.to_string(), "expected one of `int`, `float`, found end of input");
        assert_eq!(e.name(), "unexpected end of input");
    }

    #[test]
    fn render_points_at_the_token() {
        colored::control::set_override(false);
        let source = "program p;\nvar int x\nbegin x := 1; end";
        let begin = source.find("begin").unwrap();
        let error = ErrorContent::mismatch(TokenKind::Semicolon, Some(TokenKind::Begin))
            .wrap(("test.pl0", begin, begin + 5));
        let rendered = error.render(source);
        assert!(rendered.starts_with("--> test.pl0:3:1\n    unexpected token\n"));
        assert!(rendered.contains("begin x := 1; end\n~~~~~ expected `;`, found `begin`"));
    }

    #[test]
    fn underline_counts_chars() {
        colored::control::set_override(false);
        let source = "program p ;\nbegin schön := 1 ; end";
        let name = source.find("schön").unwrap();
        let error = ErrorContent::DuplicateScope("schön")
            .wrap(("umlaut.pl0", name, name + "schön".len()));
        let rendered = error.render(source);
        assert!(rendered.contains("begin schön := 1 ; end\n      ~~~~~ scope"));
    }

    #[test]
    fn render_without_location() {
        colored::control::set_override(false);
        let error = ErrorContent::DuplicateScope("f").wrap(SourceLocation::default());
        let rendered = error.render("");
        assert!(rendered.contains("<unknown>"));
        assert!(rendered.contains("scope `f` has already been defined"));
        assert_eq!(error.to_string(), "scope `f` has already been defined");
    }
}
