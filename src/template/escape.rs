/// A literal segment laid out for a template literal.
///
/// `quasis` hold text that reads the same through `raw` and `cooked`;
/// `literals` hold the runs in between that a template literal cannot carry
/// verbatim. `quasis.len() == literals.len() + 1` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SplitSegment {
    pub quasis: Vec<String>,
    pub literals: Vec<String>,
}

/// Splits text at every character a template literal cannot hold as is.
///
/// Backticks end the literal and `${` opens an interpolation. A backslash
/// starts an escape sequence, so `raw` and `cooked` would disagree. Carriage
/// returns are normalized to line feeds in both.
pub(crate) fn split_tpl_segment(input: &str) -> SplitSegment {
    let mut quasis = Vec::new();
    let mut literals = Vec::new();
    let mut current = String::new();
    let mut in_literal = false;
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        let unrepresentable = match c {
            '`' | '\\' | '\r' => true,
            '$' => chars.peek() == Some(&'{'),
            _ => false,
        };
        if unrepresentable != in_literal {
            let run = std::mem::take(&mut current);
            if in_literal {
                literals.push(run);
            } else {
                quasis.push(run);
            }
            in_literal = unrepresentable;
        }
        current.push(c);
    }
    if in_literal {
        literals.push(current);
        quasis.push(String::new());
    } else {
        quasis.push(current);
    }
    SplitSegment { quasis, literals }
}
