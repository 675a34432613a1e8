//! POSIX `sh` quoting for forwarded arguments.
//!
//! Every argument handed to [`quote`] comes back as exactly one word when the
//! result is read by a POSIX shell, whatever whitespace, quotes, globs, `$`
//! expansions or backticks it contains. Words made only of characters the
//! shell never treats specially are left bare so dry-run output stays
//! readable.

/// Characters that never need quoting in an unquoted `sh` word. `=` is not
/// one of them: a bare `X=1` in command position is an assignment.
fn is_plain(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ',' | ':' | '@' | '%' | '+')
}

/// Quote one argument for `sh -c`.
pub fn quote(arg: &str) -> String {
    if !arg.is_empty() && arg.chars().all(is_plain) {
        return arg.to_string();
    }
    // Inside single quotes nothing is special except the closing quote itself,
    // which is spliced in as '\''.
    let mut out = String::with_capacity(arg.len() + 2);
    out.push('\'');
    for c in arg.chars() {
        if c == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    out
}

/// Quote each argument and join them with single spaces.
pub fn join<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|a| quote(a.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
