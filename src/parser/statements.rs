use crate::{error::location::Traced, options::BlockScoping, token::Token, token::TokenKind};

use super::{ParseResult, Recognizer};

impl<'src, I> Recognizer<'src, I>
where
    I: Iterator<Item = Traced<'src, Token<'src>>>,
{
    /// statement_block → "begin" statement ";" { statement ";" } "end"
    ///
    /// `closes_scope` is set for the body of a program or procedure.
    pub(super) fn statement_block(&mut self, closes_scope: bool) -> ParseResult<'src, ()> {
        self.expect(TokenKind::Begin)?;
        self.statement()?;
        self.expect(TokenKind::Semicolon)?;
        while !self.peek_is(TokenKind::End) {
            self.statement()?;
            self.expect(TokenKind::Semicolon)?;
        }
        let end = self.expect(TokenKind::End)?;
        if closes_scope {
            self.close_scope(end)?;
        }
        Ok(())
    }

    /// statement → assignment
    ///           | "if" lexpr "then" statement [ "else" statement ]
    ///           | "while" lexpr "do" statement
    ///           | statement_block
    ///           | "read" "(" id { "," id } ")"
    ///           | "write" "(" expr { "," expr } ")"
    ///           | "return" expr
    ///           | ε
    fn statement(&mut self) -> ParseResult<'src, ()> {
        match self.peek_kind() {
            Some(TokenKind::Identifier) => self.assignment(),
            Some(TokenKind::If) => {
                self.advance();
                self.logical_expression()?;
                self.expect(TokenKind::Then)?;
                self.statement()?;
                if self.eat(TokenKind::Else) {
                    self.statement()?;
                }
                Ok(())
            }
            Some(TokenKind::While) => {
                self.advance();
                self.logical_expression()?;
                self.expect(TokenKind::Do)?;
                self.statement()
            }
            Some(TokenKind::Begin) => {
                let closes_scope = self.options.block_scoping == BlockScoping::EveryBlock;
                self.statement_block(closes_scope)
            }
            Some(TokenKind::Read) => {
                self.advance();
                self.expect(TokenKind::RoundParenOpen)?;
                self.expect_identifier()?;
                while self.eat(TokenKind::Comma) {
                    self.expect_identifier()?;
                }
                self.expect(TokenKind::RoundParenClose)?;
                Ok(())
            }
            Some(TokenKind::Write) => {
                self.advance();
                self.expect(TokenKind::RoundParenOpen)?;
                self.expression_list()?;
                self.expect(TokenKind::RoundParenClose)?;
                Ok(())
            }
            Some(TokenKind::Return) => {
                self.advance();
                self.expression()
            }
            // empty statement
            _ => Ok(()),
        }
    }

    /// assignment → id [ "[" integer { "," integer } "]" ] ":="
    ///              ( "call" id "(" [ expr { "," expr } ] ")" | expr )
    fn assignment(&mut self) -> ParseResult<'src, ()> {
        self.expect_identifier()?;
        if self.peek_is(TokenKind::RectParenOpen) {
            self.integer_list()?;
        }
        self.expect(TokenKind::Assign)?;
        if self.eat(TokenKind::Call) {
            self.expect_identifier()?;
            self.expect(TokenKind::RoundParenOpen)?;
            if !self.peek_is(TokenKind::RoundParenClose) {
                self.expression_list()?;
            }
            self.expect(TokenKind::RoundParenClose)?;
            Ok(())
        } else {
            self.expression()
        }
    }

    /// expr { "," expr }
    fn expression_list(&mut self) -> ParseResult<'src, ()> {
        self.expression()?;
        while self.eat(TokenKind::Comma) {
            self.expression()?;
        }
        Ok(())
    }
}
