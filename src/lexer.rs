pub const REDIRECT: char = '>';
pub const AMPERSAND: char = '&';

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    pub fn lex(&mut self) -> Vec<Token> {
        let mut tokens: Vec<Token> = Vec::new();
        while !self.is_eof() {
            tokens.push(self.next_token());
        }
        tokens.push(Token::eof());
        tokens
    }

    fn next_token(&mut self) -> Token {
        match self.input[self.position] {
            REDIRECT => self.handle_operator(TokenKind::Redirect),
            AMPERSAND => self.handle_operator(TokenKind::Ampersand),
            char if is_blank_char(char) => self.handle_whitespace(),
            _ => self.handle_word(),
        }
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn handle_operator(&mut self, kind: TokenKind) -> Token {
        let lexeme = String::from(self.input[self.position]);
        self.position += 1;

        Token { kind, lexeme }
    }

    fn handle_word(&mut self) -> Token {
        let lexeme = self.take_while(is_word_char);

        Token {
            kind: TokenKind::Word,
            lexeme,
        }
    }

    fn handle_whitespace(&mut self) -> Token {
        let lexeme = self.take_while(is_blank_char);

        Token {
            kind: TokenKind::Whitespace,
            lexeme,
        }
    }

    fn take_while(&mut self, pred: fn(char) -> bool) -> String {
        let mut end_position = self.position;
        while end_position < self.input.len() && pred(self.input[end_position]) {
            end_position += 1;
        }
        let lexeme: String = self.input[self.position..end_position].iter().collect();
        self.position = end_position;

        lexeme
    }
}

/// Only spaces and tabs separate arguments.
fn is_blank_char(char: char) -> bool {
    char == ' ' || char == '\t'
}

fn is_word_char(char: char) -> bool {
    char != REDIRECT && char != AMPERSAND && !is_blank_char(char)
}

#[derive(PartialEq, Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    fn eof() -> Self {
        Self {
            kind: TokenKind::EOF,
            lexeme: String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::EOF)
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum TokenKind {
    Word,
    Whitespace,
    Redirect,
    Ampersand,
    EOF,
}
