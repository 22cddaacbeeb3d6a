//! Whitespace-preserving stylesheet parser using the `cssparser` crate.
//!
//! The tokenizer does the lexing (strings, comments, nested parentheses and
//! functions), while the tree is built from raw source slices between token
//! positions. Nothing is normalized: every byte of the input ends up in exactly
//! one field of the tree, so [`Root`]'s `Display` output equals the input.
//!
//! The grammar is the loose one SCSS authors expect:
//!
//! - `prop: value;` is a declaration (`$var` and `--custom` included)
//! - `prelude { ... }` is a rule, parsed recursively
//! - `@name params;` and `@name params { ... }` are at-rules
//! - a `/* */` or `//` comment at statement start is a comment node
//!
//! Declarations may appear at the top level.
//!
//! CSS has no `//` comments, so they are found up front and blanked out of
//! the text handed to the tokenizer. Blanking keeps byte offsets intact, and
//! every slice that ends up in the tree is taken from the original text.

use std::ops::Range;

use cssparser::{
    ParseError as CssParseError, ParseErrorKind, Parser, ParserInput, SourceLocation,
    SourcePosition, Token,
};

use super::{ParseError, SyntaxError};
use crate::Result;
use crate::ast::{AtRule, Block, Declaration, Node, NodeKind, Rule, Root};
use crate::logging::targets;

type BlockResult<'i, T> = std::result::Result<T, CssParseError<'i, SyntaxError>>;

/// How a statement ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Semicolon,
    Block,
    End,
}

/// Token positions collected while scanning one statement.
struct Statement {
    /// Position just before the terminating token.
    end: SourcePosition,
    /// Positions around the first top-level colon.
    colon: Option<(SourcePosition, SourcePosition)>,
    /// Position after the leading at-keyword, for at-rules.
    at_name_end: Option<SourcePosition>,
    terminator: Terminator,
}

/// The text being parsed and the byte ranges of its `//` comments.
struct Source<'a> {
    css: &'a str,
    line_comments: Vec<Range<usize>>,
}

impl<'a> Source<'a> {
    fn new(css: &'a str) -> Self {
        Self {
            css,
            line_comments: find_line_comments(css),
        }
    }

    /// The text handed to the tokenizer: every `//` comment replaced by as
    /// many spaces as it has bytes.
    fn masked(&self) -> String {
        let mut masked = String::with_capacity(self.css.len());
        let mut cursor = 0;

        for comment in &self.line_comments {
            masked.push_str(&self.css[cursor..comment.start]);
            masked.extend(std::iter::repeat_n(' ', comment.len()));
            cursor = comment.end;
        }

        masked.push_str(&self.css[cursor..]);
        masked
    }

    fn slice<'i>(&self, parser: &Parser<'i, '_>, start: SourcePosition, end: SourcePosition) -> Slice<'a, 'i> {
        Slice {
            text: &self.css[start.byte_index()..end.byte_index()],
            masked: parser.slice(start..end),
        }
    }
}

/// A source range both as written and as the tokenizer saw it.
///
/// The two always have the same length. Splitting decisions are made on
/// `masked`, where `//` comments count as whitespace.
#[derive(Debug, Clone, Copy)]
struct Slice<'a, 'i> {
    text: &'a str,
    masked: &'i str,
}

impl<'a, 'i> Slice<'a, 'i> {
    fn split_at(self, mid: usize) -> (Self, Self) {
        let (text_head, text_tail) = self.text.split_at(mid);
        let (masked_head, masked_tail) = self.masked.split_at(mid);
        (
            Self {
                text: text_head,
                masked: masked_head,
            },
            Self {
                text: text_tail,
                masked: masked_tail,
            },
        )
    }

    fn split_trailing_whitespace(self) -> (Self, Self) {
        self.split_at(self.masked.trim_end_matches(is_css_whitespace).len())
    }

    fn split_leading_whitespace(self) -> (Self, Self) {
        let content = self.masked.trim_start_matches(is_css_whitespace);
        self.split_at(self.masked.len() - content.len())
    }
}

/// Parse a CSS or SCSS stylesheet into a whitespace-preserving tree.
///
/// Unlike a cascading parser this does not recover from errors: a formatter
/// must not silently drop input, so the first syntax error aborts the parse.
///
/// # Example
///
/// ```ignore
/// let root = parse(".a { color: red; }")?;
/// assert_eq!(root.to_string(), ".a { color: red; }");
/// ```
pub fn parse(css: &str) -> Result<Root> {
    let source = Source::new(css);
    let masked = source.masked();
    let mut input = ParserInput::new(&masked);
    let mut parser = Parser::new(&mut input);

    let body = parse_block(&mut parser, &source).map_err(to_parse_error)?;

    tracing::debug!(
        target: targets::PARSER,
        nodes = body.len(),
        bytes = css.len(),
        line_comments = source.line_comments.len(),
        "parsed stylesheet"
    );

    Ok(Root {
        body,
        source_path: None,
    })
}

/// Parse statements until the current block (or the input) is exhausted.
fn parse_block<'i>(parser: &mut Parser<'i, '_>, source: &Source<'_>) -> BlockResult<'i, Block> {
    let mut block = Block::new();

    loop {
        let before = consume_before(parser, source, &mut block);
        let start = parser.position();
        let location = parser.current_source_location();
        let state = parser.state();

        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => {
                block.after = before;
                return Ok(block);
            }
        };

        match token {
            Token::Comment(text) => {
                block.push(Node::comment(before, &*text));
                continue;
            }
            Token::CloseCurlyBracket => {
                return Err(custom_error(location, SyntaxError::UnexpectedCloseBrace));
            }
            _ => parser.reset(&state),
        }

        let statement = scan_statement(parser)?;

        match statement.terminator {
            Terminator::Block => {
                let (body, content_end) = parser.parse_nested_block(|nested| {
                    let body = parse_block(nested, source)?;
                    Ok((body, nested.position()))
                })?;
                if parser.slice_from(content_end) != "}" {
                    return Err(custom_error(location, SyntaxError::UnclosedBlock));
                }

                let kind = match statement.at_name_end {
                    Some(name_end) => {
                        let (mut at_rule, between) =
                            at_rule_head(source, parser, start, name_end, statement.end);
                        at_rule.between = between.text.to_string();
                        at_rule.body = Some(body);
                        NodeKind::AtRule(at_rule)
                    }
                    None => {
                        let prelude = source.slice(parser, start, statement.end);
                        let (selector, between) = prelude.split_trailing_whitespace();
                        NodeKind::Rule(Rule {
                            selector: selector.text.to_string(),
                            between: between.text.to_string(),
                            body,
                        })
                    }
                };
                block.push(Node::new(before, kind));
            }

            Terminator::Semicolon | Terminator::End => {
                let terminated = statement.terminator == Terminator::Semicolon;

                let (kind, trailing) = match (statement.at_name_end, statement.colon) {
                    (Some(name_end), _) => {
                        let (at_rule, between) =
                            at_rule_head(source, parser, start, name_end, statement.end);
                        (NodeKind::AtRule(at_rule), between)
                    }
                    (None, Some((colon_start, colon_end))) => {
                        let (prop, space) = source
                            .slice(parser, start, colon_start)
                            .split_trailing_whitespace();
                        if prop.text.is_empty() {
                            return Err(custom_error(location, SyntaxError::MissingProperty));
                        }

                        let rest = source.slice(parser, colon_end, statement.end);
                        let (leading, rest) = rest.split_leading_whitespace();
                        let (value, after) = rest.split_trailing_whitespace();

                        let decl = Declaration {
                            prop: prop.text.to_string(),
                            between: format!("{}:{}", space.text, leading.text),
                            value: value.text.to_string(),
                            after: String::new(),
                        };
                        (NodeKind::Declaration(decl), after)
                    }
                    (None, None) => {
                        return Err(custom_error(location, SyntaxError::UnknownWord));
                    }
                };

                block.semicolon = terminated;

                if terminated {
                    let kind = attach_trailing(kind, trailing.text);
                    block.push(Node::new(before, kind));
                } else {
                    // Whitespace after the final unterminated statement belongs
                    // to the block, ahead of its closing brace. A `//` comment
                    // there still becomes a node of its own.
                    block.push(Node::new(before, kind));
                    let end = statement.end.byte_index();
                    let trailing = (end - trailing.text.len())..end;
                    let after = push_line_comments(&mut block, source, trailing);
                    block.after = after;
                    return Ok(block);
                }
            }
        }
    }
}

/// Consume whitespace, stray semicolons and `//` comments ahead of the next
/// statement, returning the whitespace that directly precedes it.
///
/// `//` comments are pushed as nodes. Stray semicolons are kept with the node
/// they follow, or in the returned text at the start of a block.
fn consume_before(parser: &mut Parser<'_, '_>, source: &Source<'_>, block: &mut Block) -> String {
    let start = parser.position();

    loop {
        let state = parser.state();
        match parser.next_including_whitespace_and_comments() {
            Ok(Token::WhiteSpace(_)) | Ok(Token::Semicolon) => {}
            _ => {
                parser.reset(&state);
                break;
            }
        }
    }

    let end = parser.position().byte_index();
    let mut from = start.byte_index();

    if let Some(last) = block.nodes.last_mut()
        && let Some(semicolon) = parser.slice_from(start).rfind(';')
    {
        let to = from + semicolon + 1;
        last.after.push_str(&source.css[from..to]);
        from = to;
    }

    push_line_comments(block, source, from..end)
}

/// Push a comment node for every `//` comment inside the whitespace run
/// `range`. Returns the whitespace after the last one.
fn push_line_comments(block: &mut Block, source: &Source<'_>, range: Range<usize>) -> String {
    let mut cursor = range.start;

    for comment in source
        .line_comments
        .iter()
        .filter(|comment| range.start <= comment.start && comment.end <= range.end)
    {
        block.push(Node::line_comment(
            &source.css[cursor..comment.start],
            &source.css[comment.start + 2..comment.end],
        ));
        cursor = comment.end;
    }

    source.css[cursor..range.end].to_string()
}

/// Scan one statement up to its terminator.
///
/// On a `{` the block is left unconsumed so the caller can descend into it.
fn scan_statement<'i>(parser: &mut Parser<'i, '_>) -> BlockResult<'i, Statement> {
    let mut colon = None;
    let mut at_name_end = None;
    let mut first = true;

    loop {
        let position = parser.position();
        let location = parser.current_source_location();

        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => {
                return Ok(Statement {
                    end: position,
                    colon,
                    at_name_end,
                    terminator: Terminator::End,
                });
            }
        };

        let terminator = match token {
            Token::Semicolon => Terminator::Semicolon,
            Token::CurlyBracketBlock => Terminator::Block,
            Token::CloseCurlyBracket => {
                return Err(custom_error(location, SyntaxError::UnexpectedCloseBrace));
            }
            Token::AtKeyword(_) if first => {
                at_name_end = Some(parser.position());
                first = false;
                continue;
            }
            Token::Colon if colon.is_none() => {
                colon = Some((position, parser.position()));
                first = false;
                continue;
            }
            _ => {
                first = false;
                continue;
            }
        };

        return Ok(Statement {
            end: position,
            colon,
            at_name_end,
            terminator,
        });
    }
}

/// Split an at-rule prelude into its parts. Returns the rule (without
/// body) and the whitespace between the parameters and the terminator.
fn at_rule_head<'a, 'i>(
    source: &Source<'a>,
    parser: &Parser<'i, '_>,
    start: SourcePosition,
    name_end: SourcePosition,
    end: SourcePosition,
) -> (AtRule, Slice<'a, 'i>) {
    let keyword = source.slice(parser, start, name_end).text;
    let name = keyword.strip_prefix('@').unwrap_or(keyword);

    let rest = source.slice(parser, name_end, end);
    let (after_name, rest) = rest.split_leading_whitespace();
    let (params, between) = rest.split_trailing_whitespace();

    let at_rule = AtRule {
        name: name.to_string(),
        after_name: after_name.text.to_string(),
        params: params.text.to_string(),
        between: String::new(),
        body: None,
    };
    (at_rule, between)
}

/// Store whitespace that precedes a `;` on the node it belongs to.
fn attach_trailing(kind: NodeKind, trailing: &str) -> NodeKind {
    match kind {
        NodeKind::Declaration(mut decl) => {
            decl.after = trailing.to_string();
            NodeKind::Declaration(decl)
        }
        NodeKind::AtRule(mut at_rule) => {
            at_rule.between = trailing.to_string();
            NodeKind::AtRule(at_rule)
        }
        other => other,
    }
}

/// Byte ranges of the `//` comments in `css`, each running up to (not
/// including) its line break.
///
/// Strings, `/* */` comments and unquoted `url()` arguments are skipped, so
/// `url(//cdn/a.png)` and `"a//b"` are not comments.
fn find_line_comments(css: &str) -> Vec<Range<usize>> {
    let bytes = css.as_bytes();
    let mut comments = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            quote @ (b'"' | b'\'') => i = skip_string(bytes, i + 1, quote),
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = css[i + 2..]
                    .find("*/")
                    .map_or(bytes.len(), |offset| i + 2 + offset + 2);
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let end = css[i..]
                    .find(is_newline)
                    .map_or(bytes.len(), |offset| i + offset);
                comments.push(i..end);
                i = end;
            }
            b'(' if is_unquoted_url(css, i) => {
                i = css[i..].find(')').map_or(bytes.len(), |offset| i + offset + 1);
            }
            _ => i += 1,
        }
    }

    comments
}

/// Index just past the string starting before `i`. Unterminated strings
/// stop at the line break, as in CSS.
fn skip_string(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' | b'\r' | b'\x0C' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn is_unquoted_url(css: &str, open: usize) -> bool {
    let head = &css.as_bytes()[..open];
    let is_url = head.len() >= 3 && head[head.len() - 3..].eq_ignore_ascii_case(b"url");

    is_url
        && !css[open + 1..]
            .trim_start_matches(is_css_whitespace)
            .starts_with(['"', '\''])
}

fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\x0C')
}

fn is_css_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

fn custom_error<'i>(location: SourceLocation, error: SyntaxError) -> CssParseError<'i, SyntaxError> {
    CssParseError {
        kind: ParseErrorKind::Custom(error),
        location,
    }
}

fn to_parse_error(error: CssParseError<'_, SyntaxError>) -> ParseError {
    let error = ParseError::from(error);
    tracing::warn!(target: targets::PARSER, %error, "CSS parse error");
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn round_trip(css: &str) {
        let root = parse(css).unwrap();
        assert_eq!(root.to_string(), css);
    }

    #[test]
    fn parse_simple_rule() {
        let root = parse(".sel { color: red; }").unwrap();

        assert_eq!(root.body.len(), 1);
        let NodeKind::Rule(rule) = &root.body.nodes[0].kind else {
            panic!("expected a rule");
        };
        assert_eq!(rule.selector, ".sel");
        assert_eq!(rule.body.props(), vec!["color"]);
        assert_eq!(rule.body.nodes[0].value(), Some("red"));
        assert!(rule.body.semicolon);
    }

    #[test]
    fn parse_variables_and_annotations() {
        let root = parse(".sel {\n  $var: 10px;\n  z-index: 10 !ignore;\n}").unwrap();
        let NodeKind::Rule(rule) = &root.body.nodes[0].kind else {
            panic!("expected a rule");
        };

        assert_eq!(rule.body.props(), vec!["$var", "z-index"]);
        assert_eq!(rule.body.nodes[1].value(), Some("10 !ignore"));
        assert_eq!(rule.body.nodes[1].before, "\n  ");
        assert_eq!(rule.body.after, "\n");
    }

    #[test]
    fn parse_nested_rules() {
        let css = "a {\n  z-index: 1;\n  &:hover {\n    color: red;\n  }\n}";
        let root = parse(css).unwrap();
        let NodeKind::Rule(rule) = &root.body.nodes[0].kind else {
            panic!("expected a rule");
        };

        assert_eq!(rule.body.len(), 2);
        let NodeKind::Rule(nested) = &rule.body.nodes[1].kind else {
            panic!("expected a nested rule");
        };
        assert_eq!(nested.selector, "&:hover");
        assert_eq!(nested.body.props(), vec!["color"]);
    }

    #[test]
    fn parse_missing_final_semicolon() {
        let root = parse(".sel {\n  a: 1;\n  b: 2\n}").unwrap();
        let NodeKind::Rule(rule) = &root.body.nodes[0].kind else {
            panic!("expected a rule");
        };

        assert!(!rule.body.semicolon);
        assert_eq!(rule.body.after, "\n");
    }

    #[test]
    fn parse_at_rules() {
        let root = parse("@import 'a';\n@media print {\n  .a { color: black; }\n}").unwrap();

        let NodeKind::AtRule(import) = &root.body.nodes[0].kind else {
            panic!("expected an at-rule");
        };
        assert_eq!(import.name, "import");
        assert_eq!(import.params, "'a'");
        assert!(import.body.is_none());

        let NodeKind::AtRule(media) = &root.body.nodes[1].kind else {
            panic!("expected an at-rule");
        };
        assert_eq!(media.name, "media");
        assert_eq!(media.params, "print");
        assert_eq!(media.body.as_ref().map(Block::len), Some(1));
    }

    #[test]
    fn parse_comments() {
        let root = parse("/* head */\n.a {\n  /* note */\n  color: red /* inline */;\n}").unwrap();

        assert!(root.body.nodes[0].is_comment());
        let NodeKind::Rule(rule) = &root.body.nodes[1].kind else {
            panic!("expected a rule");
        };
        assert!(rule.body.nodes[0].is_comment());
        assert_eq!(rule.body.nodes[1].value(), Some("red /* inline */"));
    }

    #[test]
    fn parse_line_comments() {
        let css = ".a {\n  z-index: 1;\n  // note: spacing\n  margin: 0; // trailing\n}";
        let root = parse(css).unwrap();
        let NodeKind::Rule(rule) = &root.body.nodes[0].kind else {
            panic!("expected a rule");
        };

        assert_eq!(rule.body.props(), vec!["z-index", "margin"]);
        assert_eq!(rule.body.len(), 4);
        assert!(rule.body.nodes[1].is_line_comment());
        assert_eq!(rule.body.nodes[1].before, "\n  ");
        assert_eq!(rule.body.nodes[2].before, "\n  ");
        assert!(rule.body.nodes[3].is_line_comment());
        assert_eq!(rule.body.nodes[3].before, " ");
        assert_eq!(rule.body.after, "\n");
        assert_eq!(root.to_string(), css);
    }

    #[test]
    fn parse_line_comment_after_unterminated_declaration() {
        let root = parse(".a {\n  color: red // note\n}").unwrap();
        let NodeKind::Rule(rule) = &root.body.nodes[0].kind else {
            panic!("expected a rule");
        };

        assert_eq!(rule.body.nodes[0].value(), Some("red"));
        assert!(rule.body.nodes[1].is_line_comment());
        assert_eq!(rule.body.nodes[1].before, " ");
        assert!(!rule.body.semicolon);
        assert_eq!(rule.body.after, "\n");
    }

    #[test]
    fn double_slash_in_strings_and_urls() {
        let css = ".a {\n  background: url(//cdn.example.com/a.png);\n  content: \"a//b\";\n}";
        let root = parse(css).unwrap();
        let NodeKind::Rule(rule) = &root.body.nodes[0].kind else {
            panic!("expected a rule");
        };

        assert_eq!(rule.body.props(), vec!["background", "content"]);
        assert_eq!(rule.body.nodes[0].value(), Some("url(//cdn.example.com/a.png)"));
        assert_eq!(rule.body.nodes[1].value(), Some("\"a//b\""));
    }

    #[test]
    fn find_line_comment_ranges() {
        let css = "a // one\r\nb /* // no */ 'it//s' url( //x ) // two";
        let comments = find_line_comments(css);

        let texts: Vec<_> = comments.iter().map(|range| &css[range.clone()]).collect();
        assert_eq!(texts, vec!["// one", "// two"]);
    }

    #[test]
    fn stray_semicolons_stay_with_previous_node() {
        let root = parse(".a { z: 1; --x: { a: b }; a: 1;; }").unwrap();
        let NodeKind::Rule(rule) = &root.body.nodes[0].kind else {
            panic!("expected a rule");
        };

        assert_eq!(rule.body.nodes[1].after, ";");
        assert_eq!(rule.body.nodes[2].before, " ");
        assert_eq!(rule.body.nodes[2].after, ";");
        assert_eq!(rule.body.after, " ");
    }

    #[test]
    fn round_trip_preserves_input() {
        round_trip("");
        round_trip("   \n");
        round_trip(".a{color:red}");
        round_trip(".a {\n\tcolor : red ;\n\n\n\tdisplay: block\n}\n");
        round_trip("$top: 1px;\n.a { margin: $top  !important; ; }");
        round_trip("a:hover,\na:focus {\n  background: url(data:image/png;base64,xyz);\n}");
        round_trip("@media (min-width: 10px) {\n  .a { b: c; }\n}\n/* tail */");
        round_trip(".a { @include mixin($x, $y); color: rgba(0, 0, 0, .5); }");
        round_trip(".a { font: 12px/1.5 \"Helvetica Neue\", sans-serif; }");
        round_trip("@font-face{font-family:x}");
        round_trip("// head\n.a {\n  // x { y\n  b: c; // it's\n}\n// tail");
        round_trip(".a { ; b: 1;; c: 2 ; }\r\n// crlf\r\n");
    }

    #[test]
    fn error_unknown_word() {
        let err = parse(".a {\n  color red;\n}").unwrap_err();
        assert!(
            matches!(err, Error::Parse { ref message, line: 2, column: 3 } if message == "Unknown word"),
            "{err:?}"
        );
    }

    #[test]
    fn error_missing_property() {
        let err = parse(".a { : red; }").unwrap_err();
        assert!(matches!(err, Error::Parse { ref message, .. } if message.starts_with("Missing")));
    }

    #[test]
    fn error_unexpected_close_brace() {
        let err = parse(".a { color: red; } }").unwrap_err();
        assert!(matches!(err, Error::Parse { ref message, line: 1, .. } if message == "Unexpected '}'"));
    }

    #[test]
    fn error_unclosed_block() {
        let err = parse(".a { .b { color: red; }").unwrap_err();
        assert!(matches!(err, Error::Parse { ref message, .. } if message == "Unclosed block"));
    }
}
