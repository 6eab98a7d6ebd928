use super::ast::Index;
use super::token::Token;
use super::Error;
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// Split the code part of a line into tokens.
pub fn lex(code: &str) -> Result<Vec<Token>> {
    code.split_whitespace().map(lex_word).collect()
}

fn lex_word(word: &str) -> Result<Token> {
    if is_integer(word) {
        return Ok(Token::Literal(literal(word)?));
    }
    if word.contains('[') || word.contains(']') {
        return WordLexer::new(word).element();
    }
    Ok(Token::Name(word.into()))
}

fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn literal(s: &str) -> Result<i32> {
    s.parse::<i32>()
        .map_err(|_| error!(Overflow; format!("{} does not fit in 32 bits", s)))
}

struct WordLexer<'a> {
    word: &'a str,
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> WordLexer<'a> {
    fn new(word: &'a str) -> WordLexer<'a> {
        WordLexer {
            word,
            chars: word.chars().peekable(),
        }
    }

    fn malformed(&self) -> Error {
        error!(MalformedOperand; format!("cannot read {} as name[index]", self.word))
    }

    fn take_until(&mut self, stop: char) -> Result<String> {
        let mut s = String::new();
        loop {
            match self.chars.next() {
                Some(ch) if ch == stop => return Ok(s),
                Some('[') | Some(']') | None => return Err(self.malformed()),
                Some(ch) => s.push(ch),
            }
        }
    }

    fn element(&mut self) -> Result<Token> {
        let name = self.take_until('[')?;
        let index = self.take_until(']')?;
        if name.is_empty() || index.is_empty() || self.chars.peek().is_some() {
            return Err(self.malformed());
        }
        let index = if is_integer(&index) {
            Index::Literal(literal(&index)?)
        } else {
            Index::Scalar(index.as_str().into())
        };
        Ok(Token::Element(name.as_str().into(), index))
    }
}
