use crate::lexer::{Lexer, Token, TokenKind};
use std::path::{Path, PathBuf};

/// One program invocation: its argument list, where its output goes, and whether the shell
/// waits for it right away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    args: Vec<String>,
    redirect: Option<PathBuf>,
    deferred: bool,
}

impl Command {
    /// Returns `None` for an empty argument list; a command always names a program.
    pub fn new(args: Vec<String>) -> Option<Self> {
        if args.is_empty() {
            return None;
        }

        Some(Self {
            args,
            redirect: None,
            deferred: false,
        })
    }

    pub fn with_redirect(mut self, target: impl Into<PathBuf>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    pub fn with_deferred(mut self, deferred: bool) -> Self {
        self.deferred = deferred;
        self
    }

    pub fn program(&self) -> &str {
        &self.args[0]
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn redirect(&self) -> Option<&Path> {
        self.redirect.as_deref()
    }

    pub fn is_deferred(&self) -> bool {
        self.deferred
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("redirection without a command")]
    MissingCommand,
    #[error("redirection without a target")]
    MissingTarget,
    #[error("too many redirection targets")]
    TooManyTargets,
    #[error("more than one redirection")]
    MultipleRedirects,
}

pub struct Parser<'a> {
    input: &'a [Token],
    position: usize,
    args: Vec<String>,
    redirected: bool,
    target: Option<String>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [Token]) -> Self {
        Self {
            input,
            position: 0,
            args: Vec::new(),
            redirected: false,
            target: None,
        }
    }

    /// Parses a single command segment. `Ok(None)` means the segment holds no words at all.
    pub fn parse(mut self) -> Result<Option<Command>, ParseError> {
        while !self.is_eof() {
            self.next_token()?;
        }

        if self.redirected && self.target.is_none() {
            return Err(ParseError::MissingTarget);
        }

        let Some(command) = Command::new(self.args) else {
            return Ok(None);
        };

        Ok(Some(match self.target {
            Some(target) => command.with_redirect(target),
            None => command,
        }))
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn next_token(&mut self) -> Result<(), ParseError> {
        let input = self.input;
        let token = &input[self.position];
        self.position += 1;

        match token.kind {
            TokenKind::Whitespace | TokenKind::EOF => Ok(()),
            TokenKind::Redirect => self.handle_redirect(),
            TokenKind::Word | TokenKind::Ampersand => self.handle_word(token.lexeme.clone()),
        }
    }

    fn handle_redirect(&mut self) -> Result<(), ParseError> {
        if self.redirected {
            return Err(ParseError::MultipleRedirects);
        }
        if self.args.is_empty() {
            return Err(ParseError::MissingCommand);
        }

        self.redirected = true;
        Ok(())
    }

    fn handle_word(&mut self, lexeme: String) -> Result<(), ParseError> {
        if !self.redirected {
            self.args.push(lexeme);
            return Ok(());
        }
        if self.target.is_some() {
            return Err(ParseError::TooManyTargets);
        }

        self.target = Some(lexeme);
        Ok(())
    }
}

/// Lexes and parses one line as a single command.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let tokens = Lexer::new(line).lex();
    Parser::new(&tokens).parse()
}
