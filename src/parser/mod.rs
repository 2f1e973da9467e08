use std::iter::Peekable;

use log::{debug, trace};

mod declarations;
mod expressions;
mod statements;

use crate::{
    error::{location::SourceLocation, location::Traced, Error, ErrorContent, Expected},
    options::RecognizerOptions,
    symbols::{ScalarType, Scope, ScopeCollection, ScopeStack, Symbol},
    token::{Token, TokenKind},
};

pub type ParseResult<'src, T> = Result<T, Error<'src>>;

/// Recursive-descent recognizer, one method per nonterminal.
///
/// Pulls tokens on demand with one token of lookahead and builds the symbol tables as
/// declarations go by. The first error aborts the whole run, nothing is recovered.
#[derive(Debug)]
pub struct Recognizer<'src, I>
where
    I: Iterator<Item = Traced<'src, Token<'src>>>,
{
    token_stream: Peekable<I>,
    /// Location of the last consumed token, errors at end of input point here
    last_location: SourceLocation<'src>,
    scopes: ScopeCollection<'src>,
    stack: ScopeStack,
    options: RecognizerOptions,
}

impl<'src, I> Recognizer<'src, I>
where
    I: Iterator<Item = Traced<'src, Token<'src>>>,
{
    #[must_use]
    pub fn new<T>(tokens: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self::with_options(tokens, RecognizerOptions::default())
    }

    #[must_use]
    pub fn with_options<T>(tokens: T, options: RecognizerOptions) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            token_stream: tokens.into_iter().peekable(),
            last_location: SourceLocation::default(),
            scopes: ScopeCollection::default(),
            stack: ScopeStack::default(),
            options,
        }
    }

    /// Recognize a whole program, every token must be consumed.
    pub fn parse(mut self) -> ParseResult<'src, ScopeCollection<'src>> {
        self.program()?;
        if let Some(token) = self.token_stream.peek() {
            return Err(ErrorContent::mismatch(Expected::EndOfInput, Some(token.kind()))
                .wrap(token.src_loc()));
        }
        debug!("recognized program with {} scopes", self.scopes.len());
        Ok(self.scopes)
    }

    // --- Tokens

    fn peek_kind(&mut self) -> Option<TokenKind> {
        self.token_stream.peek().map(|t| t.kind())
    }

    fn peek_is(&mut self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Location of the lookahead token, or of the last consumed one at end of input
    fn location_here(&mut self) -> SourceLocation<'src> {
        let last = self.last_location;
        self.token_stream.peek().map_or(last, |t| t.src_loc())
    }

    fn advance(&mut self) -> Option<Traced<'src, Token<'src>>> {
        let token = self.token_stream.next()?;
        trace!("consume {:?} at {:?}", token.inner(), token.src_loc());
        self.last_location = token.src_loc();
        Some(token)
    }

    /// Consumes the lookahead if it is of kind `kind`
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// A mismatch error against the current lookahead
    fn mismatch(&mut self, expected: impl Into<Expected>) -> Error<'src> {
        let found = self.peek_kind();
        ErrorContent::mismatch(expected, found).wrap(self.location_here())
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<'src, SourceLocation<'src>> {
        let loc = self.location_here();
        if self.eat(kind) {
            Ok(loc)
        } else {
            Err(self.mismatch(kind))
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<'src, (&'src str, SourceLocation<'src>)> {
        let peeked = self
            .token_stream
            .peek()
            .and_then(|t| Some((t.expect_identifier()?, t.src_loc())));
        match peeked {
            Some(id) => {
                self.advance();
                Ok(id)
            }
            None => Err(self.mismatch(TokenKind::Identifier)),
        }
    }

    fn expect_integer(&mut self) -> ParseResult<'src, u64> {
        match self.token_stream.peek().and_then(|t| t.expect_integer()) {
            Some(value) => {
                self.advance();
                Ok(value)
            }
            None => Err(self.mismatch(TokenKind::Integer)),
        }
    }

    /// "int" | "float"
    fn expect_scalar_type(&mut self) -> ParseResult<'src, ScalarType> {
        let ty = match self.peek_kind() {
            Some(TokenKind::Int) => ScalarType::Int,
            Some(TokenKind::Float) => ScalarType::Float,
            _ => {
                return Err(self.mismatch(Expected::OneOf(vec![
                    TokenKind::Int,
                    TokenKind::Float,
                ])))
            }
        };
        self.advance();
        Ok(ty)
    }

    // --- Scopes

    fn current_scope(&self, loc: SourceLocation<'src>) -> ParseResult<'src, &Scope<'src>> {
        self.stack
            .current()
            .and_then(|id| self.scopes.get(id))
            .ok_or(ErrorContent::UnbalancedScope.wrap(loc))
    }

    fn current_scope_mut(
        &mut self,
        loc: SourceLocation<'src>,
    ) -> ParseResult<'src, &mut Scope<'src>> {
        let id = self
            .stack
            .current()
            .ok_or(ErrorContent::UnbalancedScope.wrap(loc))?;
        self.scopes
            .get_mut(id)
            .ok_or(ErrorContent::UnbalancedScope.wrap(loc))
    }

    /// Reserves `size` bytes for `name` in the innermost scope, returns its offset
    fn allocate(
        &mut self,
        size: u64,
        name: &'src str,
        loc: SourceLocation<'src>,
    ) -> ParseResult<'src, u64> {
        self.stack
            .allocate(size)
            .ok_or(ErrorContent::StorageOverflow(name).wrap(loc))
    }

    fn declare(&mut self, symbol: Symbol<'src>, loc: SourceLocation<'src>) -> ParseResult<'src, ()> {
        let scope = self.current_scope_mut(loc)?;
        debug!("declare {symbol} in `{}`", scope.name());
        scope.declare(symbol).map_err(|e| e.wrap(loc))?;
        Ok(())
    }

    /// Pops the innermost scope and records its frame size
    fn close_scope(&mut self, loc: SourceLocation<'src>) -> ParseResult<'src, ()> {
        let (id, frame_size) = self
            .stack
            .close()
            .ok_or(ErrorContent::UnbalancedScope.wrap(loc))?;
        if let Some(scope) = self.scopes.get_mut(id) {
            scope.set_storage_size(frame_size);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolKind;

    fn recognizer<'a>(
        words: &'a str,
    ) -> Recognizer<'a, impl Iterator<Item = Traced<'a, Token<'a>>>> {
        let tokens = words
            .split_whitespace()
            .filter_map(Token::from_word)
            .map(Traced::from);
        Recognizer::new(tokens)
    }

    #[test]
    fn expect_consumes_only_on_match() {
        let mut r = recognizer("program p");
        assert!(r.expect(TokenKind::Semicolon).is_err());
        assert!(r.expect(TokenKind::Program).is_ok());
        assert_eq!(r.expect_identifier().map(|(id, _)| id), Ok("p"));
        assert_eq!(
            r.expect(TokenKind::Semicolon).unwrap_err().content,
            ErrorContent::mismatch(TokenKind::Semicolon, None)
        );
    }

    #[test]
    fn declarations_need_an_open_scope() {
        let mut r = recognizer("var int x ;");
        assert_eq!(
            r.var_declaration().unwrap_err().content,
            ErrorContent::UnbalancedScope
        );
    }

    #[test]
    fn array_size_overflow() {
        let big = u64::MAX / 2;
        let source = format!("program p ; arr int a [ {big} ] ; begin ; end");
        let err = recognizer(&source).parse().unwrap_err();
        assert_eq!(err.content, ErrorContent::StorageOverflow("a"));
    }

    #[test]
    fn array_declaration_fills_in_extents() {
        let scopes = recognizer("program p ; arr float m [ 2 , 3 , 4 ] ; begin ; end")
            .parse()
            .unwrap();
        let m = scopes.lookup("p").unwrap().get("m").unwrap();
        assert_eq!(m.extents(), Some(&[2, 3, 4][..]));
        assert_eq!(m.storage_size, 96);
        assert!(matches!(
            m.kind,
            SymbolKind::Array {
                element: ScalarType::Float,
                is_reference: false,
                ..
            }
        ));
    }
}
