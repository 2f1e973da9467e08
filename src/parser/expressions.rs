use crate::{
    error::{location::Traced, Expected},
    token::{Token, TokenKind},
};

use super::{ParseResult, Recognizer};

impl<'src, I> Recognizer<'src, I>
where
    I: Iterator<Item = Traced<'src, Token<'src>>>,
{
    /// lexpr → "odd" expr | expr relop expr
    pub(super) fn logical_expression(&mut self) -> ParseResult<'src, ()> {
        if self.eat(TokenKind::Odd) {
            return self.expression();
        }
        self.expression()?;
        self.expect(TokenKind::RelOp)?;
        self.expression()
    }

    /// expr → [ "+" | "-" ] term { ("+" | "-") term }
    pub(super) fn expression(&mut self) -> ParseResult<'src, ()> {
        if matches!(self.peek_kind(), Some(TokenKind::Add | TokenKind::Sub)) {
            self.advance();
        }
        self.term()?;
        while matches!(self.peek_kind(), Some(TokenKind::Add | TokenKind::Sub)) {
            self.advance();
            self.term()?;
        }
        Ok(())
    }

    /// term → factor { ("*" | "/") factor }
    fn term(&mut self) -> ParseResult<'src, ()> {
        self.factor()?;
        while matches!(self.peek_kind(), Some(TokenKind::Mul | TokenKind::Div)) {
            self.advance();
            self.factor()?;
        }
        Ok(())
    }

    /// factor → id | integer | "(" expr ")"
    fn factor(&mut self) -> ParseResult<'src, ()> {
        match self.peek_kind() {
            Some(TokenKind::Identifier | TokenKind::Integer) => {
                self.advance();
                Ok(())
            }
            Some(TokenKind::RoundParenOpen) => {
                self.advance();
                self.expression()?;
                self.expect(TokenKind::RoundParenClose)?;
                Ok(())
            }
            _ => Err(self.mismatch(Expected::OneOf(vec![
                TokenKind::Identifier,
                TokenKind::Integer,
                TokenKind::RoundParenOpen,
            ]))),
        }
    }
}
