//! Recognizer for a small PL/0-style language that builds per-scope symbol tables.
//!
//! Input is an already tokenized program, output is a [`ScopeCollection`] with one
//! [`Scope`] per program and procedure:
//!
//! ```
//! use pl0c::token::Token;
//!
//! let source = "program p ; var int x ; begin x := 1 ; end";
//! let tokens = source.split_whitespace().map(|w| Token::from_word(w).unwrap());
//! let scopes = pl0c::recognize(tokens).unwrap();
//! assert_eq!(scopes.lookup("p").unwrap().get("x").unwrap().storage_size, 4);
//! ```

pub mod error;
pub mod options;
pub mod parser;
pub mod symbols;
pub mod token;

pub use error::{location::SourceLocation, location::Traced, Error, ErrorContent, Expected};
pub use options::{BlockScoping, RecognizerOptions};
pub use parser::Recognizer;
pub use symbols::{ScalarType, Scope, ScopeCollection, ScopeId, Symbol, SymbolKind, WORD_SIZE};
pub use token::{RelOp, Token, TokenKind};

/// Recognize a program with the default options
pub fn recognize<'src, T>(
    tokens: impl IntoIterator<Item = T>,
) -> Result<ScopeCollection<'src>, Error<'src>>
where
    T: Into<Traced<'src, Token<'src>>>,
{
    recognize_with(tokens, RecognizerOptions::default())
}

pub fn recognize_with<'src, T>(
    tokens: impl IntoIterator<Item = T>,
    options: RecognizerOptions,
) -> Result<ScopeCollection<'src>, Error<'src>>
where
    T: Into<Traced<'src, Token<'src>>>,
{
    let tokens = tokens
        .into_iter()
        .map(Into::<Traced<'src, Token<'src>>>::into);
    Recognizer::with_options(tokens, options).parse()
}
