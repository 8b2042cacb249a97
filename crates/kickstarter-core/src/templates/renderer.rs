//! Placeholder substitution and loop rendering for template text
//!
//! The syntax is deliberately small:
//!
//! - `{name}` / `{record.field}` is replaced with a text value from the
//!   context. Anything the context cannot resolve is kept verbatim, so Fusion
//!   blocks, Eel expressions and Fluid view helpers pass through untouched.
//! - `{% for item in collection %} ... {% endfor %}` repeats its body once per
//!   element of a list value.
//!
//! A block tag on a line of its own swallows that line, so loops in XML or
//! YAML templates don't leave blank lines behind.

use super::context::{Context, Value};
use super::source::TemplateSource;
use crate::error::TemplateError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Text(String),
    Var { raw: String, path: Vec<String> },
    Tag { content: String, line: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Placeholder {
        raw: String,
        path: Vec<String>,
    },
    For {
        binding: String,
        collection: Vec<String>,
        body: Vec<Node>,
    },
}

/// A parsed template, ready to be rendered against any number of contexts
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template text; `name` is only used in error messages
    pub fn parse(name: &str, source: &str) -> Result<Self, TemplateError> {
        let tokens = tokenize(name, source)?;
        let nodes = build_tree(name, tokens)?;
        Ok(Self {
            name: name.to_string(),
            nodes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render against a context. Rendering itself cannot fail.
    pub fn render(&self, context: &Context) -> String {
        let mut out = String::new();
        let mut scopes = Vec::new();
        render_nodes(&self.nodes, context, &mut scopes, &mut out);
        out
    }
}

/// Loads templates from a [`TemplateSource`] and renders them
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    source: TemplateSource,
}

impl TemplateRenderer {
    pub fn new(source: TemplateSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Render the template at `template_path` with the given context
    pub fn render(&self, template_path: &str, context: &Context) -> Result<String, TemplateError> {
        let text = self.source.read(template_path)?;
        render_str(template_path, &text, context)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new(TemplateSource::Bundled)
    }
}

/// Parse and render template text in one go
pub fn render_str(name: &str, text: &str, context: &Context) -> Result<String, TemplateError> {
    Ok(Template::parse(name, text)?.render(context))
}

fn syntax_error(template: &str, line: usize, message: impl Into<String>) -> TemplateError {
    TemplateError::Syntax {
        template: template.to_string(),
        line,
        message: message.into(),
    }
}

fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

/// Split `record.field` into segments, rejecting anything that is not a
/// dotted identifier.
fn parse_path(inner: &str) -> Option<Vec<String>> {
    let segments: Vec<String> = inner.split('.').map(str::to_string).collect();
    let valid = segments.iter().all(|segment| {
        let mut chars = segment.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    });
    valid.then_some(segments)
}

/// If the tag spanning `start..end` sits alone on its line, return the offset
/// just past that line's newline.
fn standalone_line_end(source: &str, start: usize, end: usize) -> Option<usize> {
    let line_start = source[..start].rfind('\n').map_or(0, |pos| pos + 1);
    if !source[line_start..start]
        .chars()
        .all(|c| c == ' ' || c == '\t')
    {
        return None;
    }

    let rest = &source[end..];
    let newline = rest.find('\n');
    let tail = newline.map_or(rest, |pos| &rest[..pos]);
    if !tail.chars().all(|c| c == ' ' || c == '\t' || c == '\r') {
        return None;
    }

    Some(newline.map_or(source.len(), |pos| end + pos + 1))
}

fn tokenize(name: &str, source: &str) -> Result<Vec<Token>, TemplateError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut literal_start = 0;
    let mut i = 0;

    let flush = |text: &mut String, tokens: &mut Vec<Token>| {
        if !text.is_empty() {
            tokens.push(Token::Text(std::mem::take(text)));
        }
    };

    while i < bytes.len() {
        if bytes[i] != b'{' {
            i += 1;
            continue;
        }

        if bytes.get(i + 1) == Some(&b'%') {
            let line = line_of(source, i);
            let close = source[i + 2..]
                .find("%}")
                .map(|offset| i + 2 + offset)
                .ok_or_else(|| syntax_error(name, line, "unterminated block tag"))?;
            let content = source[i + 2..close].trim().to_string();
            let mut end = close + 2;

            text.push_str(&source[literal_start..i]);
            if let Some(line_end) = standalone_line_end(source, i, end) {
                let line_start = source[..i].rfind('\n').map_or(0, |pos| pos + 1);
                text.truncate(text.len() - (i - line_start));
                end = line_end;
            }
            flush(&mut text, &mut tokens);
            tokens.push(Token::Tag { content, line });

            i = end;
            literal_start = end;
            continue;
        }

        let name_end = i
            + 1
            + bytes[i + 1..]
                .iter()
                .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_' || **b == b'.')
                .count();
        if bytes.get(name_end) == Some(&b'}') {
            if let Some(path) = parse_path(&source[i + 1..name_end]) {
                text.push_str(&source[literal_start..i]);
                flush(&mut text, &mut tokens);
                tokens.push(Token::Var {
                    raw: source[i..=name_end].to_string(),
                    path,
                });
                i = name_end + 1;
                literal_start = i;
                continue;
            }
        }

        i += 1;
    }

    text.push_str(&source[literal_start..]);
    flush(&mut text, &mut tokens);
    Ok(tokens)
}

struct OpenLoop {
    binding: String,
    collection: Vec<String>,
    line: usize,
    parent: Vec<Node>,
}

fn build_tree(name: &str, tokens: Vec<Token>) -> Result<Vec<Node>, TemplateError> {
    let mut open: Vec<OpenLoop> = Vec::new();
    let mut current: Vec<Node> = Vec::new();

    for token in tokens {
        match token {
            Token::Text(text) => current.push(Node::Text(text)),
            Token::Var { raw, path } => current.push(Node::Placeholder { raw, path }),
            Token::Tag { content, line } => {
                let words: Vec<&str> = content.split_whitespace().collect();
                match words.as_slice() {
                    ["for", binding, "in", collection] => {
                        let binding = parse_path(binding)
                            .filter(|path| path.len() == 1)
                            .and_then(|mut path| path.pop())
                            .ok_or_else(|| {
                                syntax_error(name, line, format!("invalid loop variable '{}'", binding))
                            })?;
                        let collection = parse_path(collection).ok_or_else(|| {
                            syntax_error(name, line, format!("invalid collection '{}'", collection))
                        })?;
                        open.push(OpenLoop {
                            binding,
                            collection,
                            line,
                            parent: std::mem::take(&mut current),
                        });
                    }
                    ["for", ..] => {
                        return Err(syntax_error(
                            name,
                            line,
                            format!("malformed for tag '{}', expected 'for <item> in <collection>'", content),
                        ));
                    }
                    ["endfor"] => {
                        let frame = open.pop().ok_or_else(|| {
                            syntax_error(name, line, "endfor without matching for")
                        })?;
                        let body = std::mem::replace(&mut current, frame.parent);
                        current.push(Node::For {
                            binding: frame.binding,
                            collection: frame.collection,
                            body,
                        });
                    }
                    _ => {
                        return Err(syntax_error(name, line, format!("unknown tag '{}'", content)));
                    }
                }
            }
        }
    }

    if let Some(frame) = open.pop() {
        return Err(syntax_error(
            name,
            frame.line,
            format!("for loop over '{}' is never closed", frame.collection.join(".")),
        ));
    }

    Ok(current)
}

/// Resolve a dotted path, checking loop bindings (innermost first) before
/// the context
fn resolve<'a>(
    context: &'a Context,
    scopes: &[(&'a str, &'a Value)],
    path: &[String],
) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let scoped = scopes
        .iter()
        .rev()
        .find(|(binding, _)| *binding == first.as_str())
        .map(|(_, value)| *value);

    match scoped {
        None => context.lookup(path),
        Some(value) if rest.is_empty() => Some(value),
        Some(Value::Record(record)) => record.lookup(rest),
        Some(_) => None,
    }
}

fn render_nodes<'a>(
    nodes: &'a [Node],
    context: &'a Context,
    scopes: &mut Vec<(&'a str, &'a Value)>,
    out: &mut String,
) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Placeholder { raw, path } => match resolve(context, scopes, path) {
                Some(Value::Text(text)) => out.push_str(text),
                _ => out.push_str(raw),
            },
            Node::For {
                binding,
                collection,
                body,
            } => match resolve(context, scopes, collection) {
                Some(Value::List(items)) => {
                    for item in items {
                        scopes.push((binding.as_str(), item));
                        render_nodes(body, context, scopes, out);
                        scopes.pop();
                    }
                }
                _ => {
                    tracing::warn!(
                        collection = %collection.join("."),
                        "loop collection is missing or not a list, rendering nothing"
                    );
                }
            },
        }
    }
}
