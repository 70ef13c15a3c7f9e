use crate::lexer::{Lexer, Token, TokenKind};
use crate::parser::{Command, ParseError, Parser};

/// The commands a line breaks into, in textual order, plus the segments that failed to parse.
#[derive(Debug, Default)]
pub struct SplitLine {
    pub commands: Vec<Command>,
    pub errors: Vec<ParseError>,
}

impl SplitLine {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.errors.is_empty()
    }
}

pub fn split(line: &str) -> SplitLine {
    let tokens = Lexer::new(line).lex();
    let mut result = SplitLine::default();

    for segment in tokens.split(|token| token.kind == TokenKind::Ampersand) {
        if segment.iter().all(Token::is_blank) {
            continue;
        }

        match Parser::new(segment).parse() {
            Ok(Some(command)) => result.commands.push(command.with_deferred(true)),
            Ok(None) => {}
            Err(err) => result.errors.push(err),
        }
    }

    let trailing = ends_with_operator(&tokens);
    if let Some(last) = result.commands.pop() {
        result.commands.push(last.with_deferred(trailing));
    }

    result
}

fn ends_with_operator(tokens: &[Token]) -> bool {
    tokens
        .iter()
        .rev()
        .find(|token| !token.is_blank())
        .is_some_and(|token| token.kind == TokenKind::Ampersand)
}
