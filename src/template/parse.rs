//! Template parsing.

use super::{TemplateError, is_identifier};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const COMMENT_OPEN: &str = "/*";
const COMMENT_CLOSE: &str = "*/";

/// A parsed template, ready to render against any configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub(super) nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Node {
    /// Literal text, copied verbatim.
    Text(String),
    /// A field reference such as `.Dims.Width`.
    Field { path: Vec<String>, position: usize },
}

/// Whitespace as understood by trim markers.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

impl Template {
    /// Parse template text.
    ///
    /// # Returns
    ///
    /// * `Ok(Template)` - The parsed template
    /// * `Err(TemplateError)` - The first syntax error found, with its position
    ///
    /// # Examples
    ///
    /// ```
    /// use factory::config::Configuration;
    /// use factory::template::Template;
    ///
    /// let template = Template::parse("{{.Count}} items of {{ .Material }}").unwrap();
    /// let config = Configuration {
    ///     count: 3,
    ///     material: "oak".to_string(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(template.render(&config).unwrap(), "3 items of oak");
    /// ```
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let mut nodes = Vec::new();
        let mut cursor = 0;
        let mut trim_next = false;

        while let Some(offset) = text[cursor..].find(OPEN) {
            let open = cursor + offset;
            let mut body_start = open + OPEN.len();

            // `{{-` followed by whitespace trims the text before the action.
            let trim_prev = {
                let mut after = text[body_start..].chars();
                after.next() == Some('-') && after.next().is_some_and(is_space)
            };
            if trim_prev {
                body_start += 1;
            }

            let mut literal = &text[cursor..open];
            if trim_next {
                literal = literal.trim_start_matches(is_space);
            }
            if trim_prev {
                literal = literal.trim_end_matches(is_space);
            }
            push_text(&mut nodes, literal);

            let (action, end, is_comment) = split_action(text, open, body_start, trim_prev)?;
            let (action, trim_after) = strip_trim_marker(action);

            if let Some(path) = parse_action(action, is_comment, open)? {
                nodes.push(Node::Field {
                    path,
                    position: open,
                });
            }

            trim_next = trim_after;
            cursor = end;
        }

        let mut tail = &text[cursor..];
        if trim_next {
            tail = tail.trim_start_matches(is_space);
        }
        push_text(&mut nodes, tail);

        Ok(Self { nodes })
    }

    /// The dotted field paths this template references, in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = String> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            Node::Field { path, .. } => Some(path.join(".")),
            Node::Text(_) => None,
        })
    }
}

fn push_text(nodes: &mut Vec<Node>, literal: &str) {
    if literal.is_empty() {
        return;
    }
    match nodes.last_mut() {
        Some(Node::Text(prev)) => prev.push_str(literal),
        _ => nodes.push(Node::Text(literal.to_string())),
    }
}

/// Locate the end of the action opened at `open`.
///
/// Returns the text between the delimiters (after any leading trim marker),
/// the byte offset just past the closing `}}` and whether the action is a
/// comment. A comment opens with `/*` directly after `{{`, or after `{{- `
/// and its single whitespace character. Comments may contain `}}`, so their
/// close is searched for after `*/`.
fn split_action(
    text: &str,
    open: usize,
    body_start: usize,
    trim_prev: bool,
) -> Result<(&str, usize, bool), TemplateError> {
    // The trim marker's whitespace is ASCII, so it is one byte wide.
    let comment_start = if trim_prev { body_start + 1 } else { body_start };
    let is_comment = text[comment_start..].starts_with(COMMENT_OPEN);
    let search_from = if is_comment {
        let comment_end = text[comment_start + COMMENT_OPEN.len()..]
            .find(COMMENT_CLOSE)
            .ok_or(TemplateError::UnclosedComment { position: open })?;
        comment_start + COMMENT_OPEN.len() + comment_end + COMMENT_CLOSE.len()
    } else {
        body_start
    };

    let close = text[search_from..]
        .find(CLOSE)
        .map(|offset| search_from + offset)
        .ok_or(TemplateError::Unclosed { position: open })?;

    Ok((&text[body_start..close], close + CLOSE.len(), is_comment))
}

/// Strip a trailing ` -` marker, reporting whether one was present.
fn strip_trim_marker(action: &str) -> (&str, bool) {
    match action.strip_suffix('-') {
        Some(rest) if rest.ends_with(is_space) => (rest, true),
        _ => (action, false),
    }
}

/// Interpret the inside of an action.
///
/// Returns `Ok(None)` for comments and the field path for field references.
fn parse_action(
    action: &str,
    is_comment: bool,
    position: usize,
) -> Result<Option<Vec<String>>, TemplateError> {
    let action = action.trim_matches(is_space);

    if action.is_empty() {
        return Err(TemplateError::EmptyAction { position });
    }

    if is_comment {
        // Nothing may follow the comment inside the delimiters.
        return if action.ends_with(COMMENT_CLOSE) {
            Ok(None)
        } else {
            Err(TemplateError::UnsupportedAction {
                action: action.to_string(),
                position,
            })
        };
    }

    let Some(reference) = action.strip_prefix('.') else {
        return Err(TemplateError::UnsupportedAction {
            action: action.to_string(),
            position,
        });
    };

    if reference.contains(is_space) {
        return Err(TemplateError::UnsupportedAction {
            action: action.to_string(),
            position,
        });
    }

    let path: Vec<String> = reference.split('.').map(str::to_string).collect();
    if !path.iter().all(|segment| is_identifier(segment)) {
        return Err(TemplateError::InvalidFieldName {
            name: action.to_string(),
            position,
        });
    }

    Ok(Some(path))
}
