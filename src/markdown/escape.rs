//! Markdown escaping and code-span sizing.

/// Escape characters that would otherwise start Markdown syntax.
///
/// Escapes backslash, emphasis (`*`, `_`), links (`[`, `]`), code spans,
/// table pipes, raw HTML (`<`, `>`), `!` before `[` and `&` that would read
/// as a character reference. At line start it also escapes `#`, list
/// markers (`-`, `+`, `1.`, `1)`) and setext underlines (`=`).
///
/// # Examples
///
/// ```
/// use chapnb::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
/// assert_eq!(escape_markdown("a_b"), "a\\_b");
/// assert_eq!(escape_markdown("1. first"), "1\\. first");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);
    let mut at_line_start = true;
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        match c {
            '\\' | '*' | '_' | '[' | ']' | '`' | '|' | '<' | '>' => {
                result.push('\\');
                result.push(c);
            }
            '#' | '-' | '+' | '=' if at_line_start => {
                result.push('\\');
                result.push(c);
            }
            '!' if iter.peek().is_some_and(|&(_, next)| next == '[') => result.push_str("\\!"),
            '&' if is_char_reference(&text[i + 1..]) => result.push_str("\\&"),
            '0'..='9' if at_line_start => {
                result.push(c);
                while let Some(&(_, d)) = iter.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    result.push(d);
                    iter.next();
                }
                if let Some(&(_, marker @ ('.' | ')'))) = iter.peek() {
                    result.push('\\');
                    result.push(marker);
                    iter.next();
                }
                at_line_start = false;
                continue;
            }
            _ => result.push(c),
        }
        // Up to three leading spaces still allow block syntax; flushed
        // lines are trimmed anyway.
        at_line_start = c == '\n' || (at_line_start && (c == ' ' || c == '\t'));
    }

    result
}

/// True when `rest` (the text after an `&`) reads as `name;`, `#123;` or
/// `#x1F;`.
fn is_char_reference(rest: &str) -> bool {
    let Some(end) = rest.find(';') else {
        return false;
    };
    let body = &rest[..end];
    if let Some(num) = body.strip_prefix('#') {
        match num.strip_prefix(['x', 'X']) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()),
        }
    } else {
        body.starts_with(|c: char| c.is_ascii_alphabetic())
            && body.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

/// Smallest fence (at least 3 characters) longer than any run of
/// `fence_char` in `content`.
///
/// ```
/// use chapnb::markdown::calculate_fence_length;
///
/// assert_eq!(calculate_fence_length("let x = 1;", '`'), 3);
/// assert_eq!(calculate_fence_length("```rust\ncode\n```", '`'), 4);
/// ```
pub fn calculate_fence_length(content: &str, fence_char: char) -> usize {
    longest_run(content, fence_char).max(2) + 1
}

/// Number of backticks needed to delimit an inline code span.
pub fn calculate_inline_code_ticks(content: &str) -> usize {
    longest_run(content, '`') + 1
}

fn longest_run(content: &str, target: char) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;
    for c in content.chars() {
        if c == target {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }
    max_run
}
