//! Single-pass comment removal for JSON-with-comments and JS/TS source text.

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Str(char),
}

/// Removes `//` line comments and `/* */` block comments in one traversal.
///
/// String literals (`"`, `'` and backtick) are copied verbatim, so comment
/// markers inside them survive. A block comment is replaced by a single space
/// so tokens on either side never fuse; a line comment is dropped up to, but
/// not including, its newline. An unterminated block comment swallows the rest
/// of the input.
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut state = State::Code;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match state {
            State::Code => match ch {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                '"' | '\'' | '`' => {
                    out.push(ch);
                    state = State::Str(ch);
                }
                _ => out.push(ch),
            },
            State::LineComment => {
                if ch == '\n' || ch == '\r' {
                    out.push(ch);
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push(' ');
                    state = State::Code;
                }
            }
            State::Str(quote) => {
                out.push(ch);
                if ch == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if ch == quote {
                    state = State::Code;
                } else if ch == '\n' && quote != '`' {
                    // Unterminated single-line string; recover at the line break.
                    state = State::Code;
                }
            }
        }
    }

    out
}
