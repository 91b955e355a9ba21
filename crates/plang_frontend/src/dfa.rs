//! The automaton that classifies an extracted lexeme.
//!
//! Transitions live in a constant table indexed by `(state, character class)`.
//! A pair with no transition leaves the state unchanged. The lexer runs a
//! fresh automaton over each lexeme and hands the resulting state to
//! [`classify`].

use crate::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Between tokens. Also reached after a complete punctuation character or
    /// two-character operator.
    Start,

    Minus,
    Bang,
    Equal,
    Less,
    Greater,

    Ident,

    Int,
    /// Digits followed by a dot, with no fraction digits yet.
    IntDot,
    Float,

    CharOpen,
    CharBody,
    CharDone,

    StrBody,
    StrDone,
}

impl State {
    const COUNT: usize = 15;

    const ALL: [State; Self::COUNT] = [
        State::Start,
        State::Minus,
        State::Bang,
        State::Equal,
        State::Less,
        State::Greater,
        State::Ident,
        State::Int,
        State::IntDot,
        State::Float,
        State::CharOpen,
        State::CharBody,
        State::CharDone,
        State::StrBody,
        State::StrDone,
    ];

    pub fn is_final(self) -> bool {
        matches!(
            self,
            State::Start
                | State::Minus
                | State::Equal
                | State::Less
                | State::Greater
                | State::Ident
                | State::Int
                | State::Float
                | State::CharDone
                | State::StrDone
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Colon,
    Comma,
    Star,
    Slash,
    Plus,
    Minus,
    Bang,
    Equal,
    Less,
    Greater,

    Letter,
    Digit,
    Dot,
    SingleQuote,
    DoubleQuote,

    Other,
}

impl CharClass {
    const COUNT: usize = 21;

    pub fn of(ch: char) -> Self {
        match ch {
            '(' => CharClass::LParen,
            ')' => CharClass::RParen,
            '{' => CharClass::LBrace,
            '}' => CharClass::RBrace,
            ';' => CharClass::Semicolon,
            ':' => CharClass::Colon,
            ',' => CharClass::Comma,
            '*' => CharClass::Star,
            '/' => CharClass::Slash,
            '+' => CharClass::Plus,
            '-' => CharClass::Minus,
            '!' => CharClass::Bang,
            '=' => CharClass::Equal,
            '<' => CharClass::Less,
            '>' => CharClass::Greater,
            '0'..='9' => CharClass::Digit,
            '.' => CharClass::Dot,
            '\'' => CharClass::SingleQuote,
            '"' => CharClass::DoubleQuote,
            ch if is_ident_start(ch) => CharClass::Letter,
            _ => CharClass::Other,
        }
    }
}

pub fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

pub fn is_ident(ch: char) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}

type Table = [[State; CharClass::COUNT]; State::COUNT];

static TRANSITIONS: Table = build_table();

const fn build_table() -> Table {
    use CharClass as C;
    use State as S;

    let mut table = [[S::Start; C::COUNT]; S::COUNT];

    // every state stays put unless a transition says otherwise
    let mut s = 0;
    while s < S::COUNT {
        let mut c = 0;
        while c < C::COUNT {
            table[s][c] = S::ALL[s];
            c += 1;
        }
        s += 1;
    }

    macro_rules! on {
        ($from:expr, [$($class:expr),+] => $to:expr) => {
            $(table[$from as usize][$class as usize] = $to;)+
        };
    }

    macro_rules! otherwise {
        ($from:expr => $to:expr) => {{
            let mut c = 0;
            while c < C::COUNT {
                table[$from as usize][c] = $to;
                c += 1;
            }
        }};
    }

    // single-character punctuation completes immediately
    on!(S::Start, [
        C::LParen, C::RParen, C::LBrace, C::RBrace, C::Semicolon,
        C::Colon, C::Comma, C::Star, C::Slash, C::Plus
    ] => S::Start);

    on!(S::Start, [C::Minus] => S::Minus);
    on!(S::Start, [C::Bang] => S::Bang);
    on!(S::Start, [C::Equal] => S::Equal);
    on!(S::Start, [C::Less] => S::Less);
    on!(S::Start, [C::Greater] => S::Greater);
    on!(S::Start, [C::Letter] => S::Ident);
    on!(S::Start, [C::Digit] => S::Int);
    on!(S::Start, [C::SingleQuote] => S::CharOpen);
    on!(S::Start, [C::DoubleQuote] => S::StrBody);

    // `->`, `!=`, `==`, `<=`, `>=`; any other follower ends the operator
    otherwise!(S::Minus => S::Start);
    otherwise!(S::Bang => S::Start);
    otherwise!(S::Equal => S::Start);
    otherwise!(S::Less => S::Start);
    otherwise!(S::Greater => S::Start);

    otherwise!(S::Ident => S::Start);
    on!(S::Ident, [C::Letter, C::Digit] => S::Ident);

    otherwise!(S::Int => S::Start);
    on!(S::Int, [C::Digit] => S::Int);
    on!(S::Int, [C::Dot] => S::IntDot);

    on!(S::IntDot, [C::Digit] => S::Float);

    otherwise!(S::Float => S::Start);
    on!(S::Float, [C::Digit] => S::Float);

    otherwise!(S::CharOpen => S::CharBody);
    on!(S::CharOpen, [C::SingleQuote] => S::CharDone);
    on!(S::CharBody, [C::SingleQuote] => S::CharDone);

    otherwise!(S::StrBody => S::StrBody);
    on!(S::StrBody, [C::DoubleQuote] => S::StrDone);

    table
}

pub fn step(state: State, ch: char) -> State {
    TRANSITIONS[state as usize][CharClass::of(ch) as usize]
}

/// Runs a fresh automaton over the whole lexeme.
pub fn run(lexeme: &str) -> State {
    lexeme.chars().fold(State::Start, step)
}

pub fn classify(state: State, lexeme: &str) -> TokenKind {
    if let Some(kind) = TokenKind::two_char_operator(lexeme) {
        return kind;
    }

    if !state.is_final() {
        return TokenKind::Unknown;
    }

    match state {
        State::Start => {
            let mut chars = lexeme.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => TokenKind::punctuation(ch).unwrap_or(TokenKind::Unknown),
                _ => TokenKind::Unknown,
            }
        }

        State::Minus => TokenKind::Minus,
        State::Equal => TokenKind::Assign,
        State::Less => TokenKind::Lt,
        State::Greater => TokenKind::Gt,

        State::Ident => TokenKind::keyword(lexeme).unwrap_or(TokenKind::Id),

        State::Int => TokenKind::IntConst,
        State::Float => TokenKind::FloatConst,

        State::CharDone => TokenKind::CharLiteral,
        State::StrDone => TokenKind::FmtString,

        State::Bang | State::IntDot | State::CharOpen | State::CharBody | State::StrBody => {
            TokenKind::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(lexeme: &str) -> TokenKind {
        classify(run(lexeme), lexeme)
    }

    #[test]
    fn two_char_operators_win() {
        for (lexeme, kind) in [
            ("->", TokenKind::Arrow),
            ("==", TokenKind::Eq),
            ("!=", TokenKind::Ne),
            ("<=", TokenKind::Le),
            (">=", TokenKind::Ge),
        ] {
            assert_eq!(kind_of(lexeme), kind, "{lexeme}");
        }
    }

    #[test]
    fn single_characters() {
        assert_eq!(kind_of("("), TokenKind::LBracket);
        assert_eq!(kind_of("}"), TokenKind::RBrace);
        assert_eq!(kind_of("-"), TokenKind::Minus);
        assert_eq!(kind_of("="), TokenKind::Assign);
        assert_eq!(kind_of("<"), TokenKind::Lt);
        assert_eq!(kind_of(">"), TokenKind::Gt);
        assert_eq!(kind_of("!"), TokenKind::Unknown);
        assert_eq!(kind_of("@"), TokenKind::Unknown);
        assert_eq!(kind_of("."), TokenKind::Unknown);
    }

    #[test]
    fn keywords_take_priority_over_identifiers() {
        assert_eq!(kind_of("fn"), TokenKind::Fn);
        assert_eq!(kind_of("println"), TokenKind::Println);
        assert_eq!(kind_of("while"), TokenKind::While);
        assert_eq!(kind_of("fnord"), TokenKind::Id);
        assert_eq!(kind_of("_x1"), TokenKind::Id);
    }

    #[test]
    fn numbers() {
        assert_eq!(run("123"), State::Int);
        assert_eq!(run("3."), State::IntDot);
        assert_eq!(run("3.14"), State::Float);

        assert_eq!(kind_of("123"), TokenKind::IntConst);
        assert_eq!(kind_of("3.14"), TokenKind::FloatConst);
        assert_eq!(kind_of("3."), TokenKind::Unknown);
    }

    #[test]
    fn literals() {
        assert_eq!(kind_of("'a'"), TokenKind::CharLiteral);
        assert_eq!(kind_of("''"), TokenKind::CharLiteral);
        assert_eq!(kind_of("'a"), TokenKind::Unknown);
        assert_eq!(kind_of("\"{} {}\""), TokenKind::FmtString);
        assert_eq!(kind_of("\"open"), TokenKind::Unknown);
    }

    #[test]
    fn missing_transition_keeps_state() {
        assert_eq!(step(State::Start, '@'), State::Start);
        assert_eq!(step(State::IntDot, 'x'), State::IntDot);
        assert_eq!(step(State::Ident, ' '), State::Start);
    }

    #[test]
    fn table_rows_line_up_with_states() {
        for (i, state) in State::ALL.iter().enumerate() {
            assert_eq!(*state as usize, i);
        }
        assert_eq!(CharClass::Other as usize + 1, CharClass::COUNT);
    }
}
