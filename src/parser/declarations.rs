use log::debug;

use crate::{
    error::{location::Traced, ErrorContent, Expected},
    symbols::{Symbol, SymbolKind, WORD_SIZE},
    token::{Token, TokenKind},
};

use super::{ParseResult, Recognizer};

impl<'src, I> Recognizer<'src, I>
where
    I: Iterator<Item = Traced<'src, Token<'src>>>,
{
    /// program → "program" id ";" block
    pub(super) fn program(&mut self) -> ParseResult<'src, ()> {
        self.expect(TokenKind::Program)?;
        let (name, loc) = self.expect_identifier()?;
        let id = self
            .scopes
            .create(name, None, None)
            .map_err(|e| e.wrap(loc))?;
        self.stack.open_root(id);
        self.expect(TokenKind::Semicolon)?;
        self.block()
    }

    /// block → { var_decl } { arr_decl } { procedure } statement_block
    ///
    /// The statement block closes the scope the enclosing program or procedure header opened.
    fn block(&mut self) -> ParseResult<'src, ()> {
        while self.peek_is(TokenKind::Var) {
            self.var_declaration()?;
        }
        while self.peek_is(TokenKind::Arr) {
            self.array_declaration()?;
        }
        while self.peek_is(TokenKind::Procedure) {
            self.procedure()?;
        }
        self.statement_block(true)
    }

    /// var_decl → "var" scalar ";"
    pub(super) fn var_declaration(&mut self) -> ParseResult<'src, ()> {
        self.expect(TokenKind::Var)?;
        self.scalar(false)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(())
    }

    /// scalar → ("int" | "float") id
    ///
    /// Declares the scalar in the innermost scope and returns its name.
    fn scalar(&mut self, by_reference: bool) -> ParseResult<'src, &'src str> {
        let ty = self.expect_scalar_type()?;
        let (name, loc) = self.expect_identifier()?;
        let offset = self.allocate(WORD_SIZE, name, loc)?;
        let symbol = Symbol::scalar(name, ty, offset);
        let symbol = if by_reference {
            symbol.into_reference()
        } else {
            symbol
        };
        self.declare(symbol, loc)?;
        Ok(name)
    }

    /// arr_decl → "arr" ("int" | "float") id "[" integer { "," integer } "]" ";"
    ///
    /// The array is declared as soon as its name is read, its extents and size are filled in
    /// once the brackets are closed.
    fn array_declaration(&mut self) -> ParseResult<'src, ()> {
        self.expect(TokenKind::Arr)?;
        let element = self.expect_scalar_type()?;
        let (name, loc) = self.expect_identifier()?;
        let offset = self.stack.offset();
        self.declare(Symbol::array(name, element, offset), loc)?;
        let extents = self.integer_list()?;
        let size = extents
            .iter()
            .try_fold(WORD_SIZE, |size, &extent| size.checked_mul(extent))
            .ok_or(ErrorContent::StorageOverflow(name).wrap(loc))?;
        self.allocate(size, name, loc)?;
        debug!("array `{name}` has extents {extents:?}, {size} bytes");
        self.current_scope_mut(loc)?
            .update(name, |symbol| {
                symbol.storage_size = size;
                if let SymbolKind::Array { extents: e, .. } = &mut symbol.kind {
                    *e = extents;
                }
            })
            .map_err(|e| e.wrap(loc))?;
        self.expect(TokenKind::Semicolon)?;
        Ok(())
    }

    /// "[" integer { "," integer } "]"
    ///
    /// Used for array extents and for subscripts, which only take integer literals.
    pub(super) fn integer_list(&mut self) -> ParseResult<'src, Vec<u64>> {
        self.expect(TokenKind::RectParenOpen)?;
        let mut values = vec![self.expect_integer()?];
        while self.eat(TokenKind::Comma) {
            values.push(self.expect_integer()?);
        }
        self.expect(TokenKind::RectParenClose)?;
        Ok(values)
    }

    /// procedure → "procedure" ("int" | "float") id "(" [ param { "," param } ] ")" ";"
    ///             block [ ";" procedure ]
    ///
    /// The procedure takes a word in the enclosing scope, then gets a scope of its own that
    /// stays open until its block ends.
    fn procedure(&mut self) -> ParseResult<'src, ()> {
        self.expect(TokenKind::Procedure)?;
        let return_type = self.expect_scalar_type()?;
        let (name, loc) = self.expect_identifier()?;
        let outer = self.current_scope(loc)?.name();
        let offset = self.allocate(WORD_SIZE, name, loc)?;
        self.declare(Symbol::procedure(name, return_type, offset), loc)?;
        let id = self
            .scopes
            .create(name, Some(outer), Some(return_type))
            .map_err(|e| e.wrap(loc))?;
        self.stack.open_nested(id);
        self.expect(TokenKind::RoundParenOpen)?;
        self.parameter_list()?;
        self.expect(TokenKind::RoundParenClose)?;
        self.expect(TokenKind::Semicolon)?;
        self.block()?;
        // `;` between two procedures is optional, but if it is there a procedure has to follow
        if self.eat(TokenKind::Semicolon) && !self.peek_is(TokenKind::Procedure) {
            return Err(self.mismatch(TokenKind::Procedure));
        }
        Ok(())
    }

    /// [ param { "," param } ], stops in front of ")"
    ///
    /// param → "var" scalar | array_parameter
    ///
    /// Every parameter is passed by reference.
    fn parameter_list(&mut self) -> ParseResult<'src, ()> {
        if self.peek_is(TokenKind::RoundParenClose) {
            return Ok(());
        }
        loop {
            let loc = self.location_here();
            let name = match self.peek_kind() {
                Some(TokenKind::Var) => {
                    self.advance();
                    self.scalar(true)?
                }
                Some(TokenKind::Arr) => self.array_parameter()?,
                _ => {
                    return Err(self.mismatch(Expected::OneOf(vec![
                        TokenKind::Var,
                        TokenKind::Arr,
                    ])))
                }
            };
            self.current_scope_mut(loc)?.push_param(name);
            if !self.eat(TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    /// array_parameter → "arr" ("int" | "float") id
    ///
    /// Only a reference is stored, the element type is kept.
    fn array_parameter(&mut self) -> ParseResult<'src, &'src str> {
        self.expect(TokenKind::Arr)?;
        let element = self.expect_scalar_type()?;
        let (name, loc) = self.expect_identifier()?;
        let offset = self.allocate(WORD_SIZE, name, loc)?;
        self.declare(Symbol::array(name, element, offset).into_reference(), loc)?;
        Ok(name)
    }
}
