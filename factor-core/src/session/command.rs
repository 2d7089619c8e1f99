//! Classification of a submitted line.

use std::sync::LazyLock;

use regex::Regex;

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.+)$").expect("assignment pattern is valid")
});

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*$").expect("identifier pattern is valid")
});

/// What a trimmed input line asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Quit,
    Help,
    Clear,
    Case,
    EndCase,
    Assignment { name: &'a str, rhs: &'a str },
    Lookup(&'a str),
    Expression(&'a str),
}

/// Classifies `line`, which the caller has already trimmed.
///
/// Keywords are checked first and ignore ASCII case, so a variable can
/// never be named `help` or `case`.
pub fn classify(line: &str) -> Line<'_> {
    match line.to_ascii_lowercase().as_str() {
        "" | "quit" | "exit" => return Line::Quit,
        "help" => return Line::Help,
        "cls" => return Line::Clear,
        "case" => return Line::Case,
        "endcase" => return Line::EndCase,
        _ => {}
    }

    if let Some(captures) = ASSIGNMENT.captures(line) {
        if let (Some(name), Some(rhs)) = (captures.get(1), captures.get(2)) {
            return Line::Assignment {
                name: name.as_str(),
                rhs: rhs.as_str(),
            };
        }
    }
    if let Some(name) = IDENTIFIER.captures(line).and_then(|c| c.get(1)) {
        return Line::Lookup(name.as_str());
    }
    Line::Expression(line)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn classify_keywords_ignore_case() {
        assert_eq!(classify(""), Line::Quit);
        assert_eq!(classify("EXIT"), Line::Quit);
        assert_eq!(classify("Help"), Line::Help);
        assert_eq!(classify("CLS"), Line::Clear);
        assert_eq!(classify("case"), Line::Case);
        assert_eq!(classify("EndCase"), Line::EndCase);
    }

    #[test]
    fn classify_assignment() {
        assert_eq!(
            classify("rate = 5% * 2"),
            Line::Assignment {
                name: "rate",
                rhs: "5% * 2"
            }
        );
    }

    #[test]
    fn classify_lookup() {
        assert_eq!(classify("x_1"), Line::Lookup("x_1"));
    }

    #[test]
    fn classify_everything_else_is_an_expression() {
        assert_eq!(classify("A_P(5, 10)"), Line::Expression("A_P(5, 10)"));
        assert_eq!(classify("1 + x"), Line::Expression("1 + x"));
        assert_eq!(classify("2x = 3"), Line::Expression("2x = 3"));
    }

    #[test]
    fn classify_equality_is_an_assignment_with_a_bad_rhs() {
        assert_eq!(
            classify("x == 1"),
            Line::Assignment {
                name: "x",
                rhs: "= 1"
            }
        );
    }
}
