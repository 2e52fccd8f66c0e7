//! The scanner that splits template source text into segments and values.

use super::{Substitution, Tag, TaggedTemplate, TemplateLiteral};
use crate::error::{Error, Result};
use tracing::trace;

/// Scans template source into a [`TemplateLiteral`].
///
/// Three forms are accepted:
///
/// - a bare body, `I have ${2} cats.`, rendered with the `roman` tag
/// - an untagged literal, `` `I have ${2} cats.` ``, rendered verbatim
/// - a tagged literal, `` roman`I have ${2} cats.` ``
///
/// # Examples
///
/// ```rust
/// use numerus_core::template::{Tag, parse_template};
///
/// let literal = parse_template("I have ${2} cats. But my neighbour has ${4}")?;
/// assert_eq!(literal.tag, Tag::Roman);
/// assert_eq!(literal.template.values().len(), 2);
/// # Ok::<(), numerus_core::Error>(())
/// ```
pub fn parse_template(source: &str) -> Result<TemplateLiteral> {
    Scanner::new(source).scan()
}

/// A scanner over template source text.
pub struct Scanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
        }
    }

    /// Scans the whole source.
    pub fn scan(mut self) -> Result<TemplateLiteral> {
        let Some((tag, open)) = self.scan_head()? else {
            let template = self.scan_body(None)?;
            return Ok(TemplateLiteral {
                tag: Tag::Roman,
                template,
            });
        };

        let template = self.scan_body(Some(open))?;
        self.expect_end()?;
        trace!(tag = %tag, values = template.values().len(), "scanned template literal");
        Ok(TemplateLiteral { tag, template })
    }

    /// Looks for an optional tag name followed by an opening backtick.
    ///
    /// Returns the tag and the backtick offset, or `None` for a bare body.
    /// A bare body is scanned from the very start, leading whitespace included.
    fn scan_head(&mut self) -> Result<Option<(Tag, usize)>> {
        let head = self.source.trim_start();
        let skipped = self.source.len() - head.len();
        let name_len = head
            .find(|c: char| !is_tag_char(c))
            .unwrap_or(head.len());

        if !head[name_len..].starts_with('`') {
            return Ok(None);
        }

        let tag = match &head[..name_len] {
            "" => Tag::Plain,
            name => name.parse()?,
        };

        let open = skipped + name_len;
        while self.current_pos <= open {
            if self.advance().is_none() {
                break;
            }
        }
        Ok(Some((tag, open)))
    }

    /// Scans literal text and `${...}` placeholders.
    ///
    /// With `open` set, the body ends at the matching backtick; otherwise it
    /// runs to the end of the source and backticks are ordinary text.
    fn scan_body(&mut self, open: Option<usize>) -> Result<TaggedTemplate> {
        let mut segments = Vec::new();
        let mut values = Vec::new();
        let mut current = String::new();

        loop {
            match self.advance() {
                None => {
                    if let Some(offset) = open {
                        return Err(Error::UnterminatedTemplate { offset });
                    }
                    break;
                }
                Some((_, '`')) if open.is_some() => break,
                Some((pos, '$')) if self.peek() == Some('{') => {
                    self.advance();
                    values.push(self.scan_substitution(pos)?);
                    segments.push(std::mem::take(&mut current));
                }
                Some((_, '\\')) => match self.advance() {
                    Some((_, escaped)) => current.push(unescape(escaped)),
                    None => current.push('\\'),
                },
                Some((_, ch)) => current.push(ch),
            }
        }

        segments.push(current);
        TaggedTemplate::new(segments, values)
    }

    /// Scans the expression of a placeholder whose `${` starts at `start`.
    fn scan_substitution(&mut self, start: usize) -> Result<Substitution> {
        let body_start = self.current_pos;
        let mut depth = 0usize;

        loop {
            match self.advance() {
                None => return Err(Error::UnterminatedSubstitution { offset: start }),
                Some((_, '{')) => depth += 1,
                Some((pos, '}')) => {
                    if depth == 0 {
                        let expr = self.source[body_start..pos].trim();
                        if expr.is_empty() {
                            return Err(Error::EmptySubstitution { offset: start });
                        }
                        return Ok(Substitution::Text(expr.to_string()));
                    }
                    depth -= 1;
                }
                Some(_) => {}
            }
        }
    }

    /// Only whitespace and an optional `;` may follow the closing backtick.
    fn expect_end(&mut self) -> Result<()> {
        let rest = self.source[self.current_pos..].trim();
        if rest.is_empty() || rest == ";" {
            return Ok(());
        }
        Err(Error::TrailingInput {
            offset: self.current_pos,
        })
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let result = self.chars.next();
        if let Some((pos, ch)) = result {
            self.current_pos = pos + ch.len_utf8();
        }
        result
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn unescape(escaped: char) -> char {
    match escaped {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> TemplateLiteral {
        parse_template(source).unwrap()
    }

    #[test]
    fn test_bare_body() {
        let literal = scan("I have ${2} cats.");
        assert_eq!(literal.tag, Tag::Roman);
        assert_eq!(literal.template.segments(), ["I have ", " cats."]);
        assert_eq!(literal.template.values(), [Substitution::from("2")]);
    }

    #[test]
    fn test_bare_body_keeps_whitespace_and_backticks() {
        let literal = scan("  a `b` ${1} ");
        assert_eq!(literal.template.segments(), ["  a `b` ", " "]);
    }

    #[test]
    fn test_trailing_substitution() {
        let literal = scan("I have ${2} cats. But my neighbour has ${4}");
        assert_eq!(
            literal.template.segments(),
            ["I have ", " cats. But my neighbour has ", ""]
        );
        assert_eq!(literal.template.values().len(), 2);
    }

    #[test]
    fn test_untagged_literal_is_plain() {
        let literal = scan("`Hello ${ cur_name }. `");
        assert_eq!(literal.tag, Tag::Plain);
        assert_eq!(literal.template.segments(), ["Hello ", ". "]);
        assert_eq!(literal.template.values(), [Substitution::from("cur_name")]);
    }

    #[test]
    fn test_tagged_literal() {
        let literal = scan("romeNumerize`I have ${2} cats.`;");
        assert_eq!(literal.tag, Tag::Roman);
        assert_eq!(literal.template.segments(), ["I have ", " cats."]);
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(
            parse_template("html`<p>${1}</p>`").unwrap_err(),
            Error::UnknownTag("html".into())
        );
    }

    #[test]
    fn test_escapes() {
        let literal = scan(r"`a\`b\${1}\n\\`");
        assert_eq!(literal.template.segments(), ["a`b${1}\n\\"]);
        assert!(literal.template.values().is_empty());
    }

    #[test]
    fn test_dollar_without_brace_is_text() {
        let literal = scan("costs $5 or ${5}");
        assert_eq!(literal.template.segments(), ["costs $5 or ", ""]);
    }

    #[test]
    fn test_nested_braces() {
        let literal = scan("${ {a: 1}.a }!");
        assert_eq!(literal.template.values(), [Substitution::from("{a: 1}.a")]);
        assert_eq!(literal.template.segments(), ["", "!"]);
    }

    #[test]
    fn test_unterminated_literal() {
        assert_eq!(
            parse_template("  roman`abc").unwrap_err(),
            Error::UnterminatedTemplate { offset: 7 }
        );
    }

    #[test]
    fn test_unterminated_substitution() {
        assert_eq!(
            parse_template("ab ${12").unwrap_err(),
            Error::UnterminatedSubstitution { offset: 3 }
        );
    }

    #[test]
    fn test_empty_substitution() {
        assert_eq!(
            parse_template("x${ }").unwrap_err(),
            Error::EmptySubstitution { offset: 1 }
        );
    }

    #[test]
    fn test_trailing_input() {
        assert_eq!(
            parse_template("`a` b").unwrap_err(),
            Error::TrailingInput { offset: 3 }
        );
    }

    #[test]
    fn test_empty_source() {
        let literal = scan("");
        assert_eq!(literal.template.segments(), [""]);
    }
}
