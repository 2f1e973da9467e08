/// Which `begin ... end` blocks close a scope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockScoping {
    /// Only the body of a program or procedure closes the scope its header opened.
    /// A `begin ... end` used as a statement just groups statements.
    #[default]
    Declarations,
    /// Every `begin ... end` closes the innermost open scope, including one nested inside an
    /// `if` or `while`. This closes a procedure's scope at the first nested block and makes the
    /// surplus `end`s fail with `UnbalancedScope`. Kept for compatibility with tables produced
    /// by older tooling.
    EveryBlock,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecognizerOptions {
    pub block_scoping: BlockScoping,
}

impl RecognizerOptions {
    #[must_use]
    pub fn with_block_scoping(mut self, block_scoping: BlockScoping) -> Self {
        self.block_scoping = block_scoping;
        self
    }
}
