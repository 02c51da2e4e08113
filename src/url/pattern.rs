use crate::error::{HtmxViewError, Result};
use crate::url::param::{ConverterTag, UrlParameter};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::str::FromStr;

/// Characters left as-is when a reversed argument is written into a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(UrlParameter),
}

/// A named route template such as `todos/toggle/<int:todo_id>/`.
///
/// Templates carry no leading slash. They are mounted under `/` and every
/// `<tag:name>` placeholder must fill a whole path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    name: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a template written by hand. `<name>` without a tag is a `str` parameter.
    pub fn parse(name: impl Into<String>, template: &str) -> Result<Self> {
        let invalid = |message: String| HtmxViewError::InvalidTemplate {
            template: template.to_string(),
            message,
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(start) = rest.find('<') {
            literal.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after
                .find('>')
                .ok_or_else(|| invalid("unclosed '<'".to_string()))?;

            let placeholder = &after[..end];
            let (converter, name) = match placeholder.split_once(':') {
                Some((tag, name)) => {
                    let tag = ConverterTag::from_str(tag)
                        .map_err(|_| invalid(format!("unknown converter '{tag}'")))?;
                    (tag, name)
                }
                None => (ConverterTag::Str, placeholder),
            };
            if !is_identifier(name) {
                return Err(invalid(format!("'{name}' is not a valid parameter name")));
            }

            let starts_segment =
                (segments.is_empty() && literal.is_empty()) || literal.ends_with('/');
            let remainder = &after[end + 1..];
            if !starts_segment || !(remainder.is_empty() || remainder.starts_with('/')) {
                return Err(invalid(format!("<{placeholder}> must span a whole path segment")));
            }

            let duplicate = segments
                .iter()
                .any(|s| matches!(s, Segment::Param(p) if p.name() == name));
            if duplicate {
                return Err(invalid(format!("parameter '{name}' appears twice")));
            }

            if !literal.is_empty() {
                check_literal(&literal).map_err(invalid)?;
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Param(UrlParameter::new(name, converter)));
            rest = remainder;
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            check_literal(&literal).map_err(invalid)?;
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            name: name.into(),
            segments,
        })
    }

    /// Synthesize the template of an action route.
    ///
    /// `todos` + `toggle` + `[<int:todo_id>]` gives `todos/toggle/<int:todo_id>/`.
    pub fn for_action(
        base_path: &str,
        route_name: impl Into<String>,
        action: &str,
        params: &[UrlParameter],
    ) -> Self {
        let mut head = String::from(base_path);
        if !base_path.ends_with('/') {
            head.push('/');
        }
        head.push_str(action);
        head.push('/');

        let mut segments = vec![Segment::Literal(head)];
        for param in params {
            segments.push(Segment::Param(param.clone()));
            segments.push(Segment::Literal("/".to_string()));
        }

        Self {
            name: route_name.into(),
            segments,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> impl Iterator<Item = &UrlParameter> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(param) => Some(param),
            Segment::Literal(_) => None,
        })
    }

    pub fn template(&self) -> String {
        self.render(|param| param.build_url_param())
    }

    /// The path handed to the axum router, e.g. `/todos/toggle/{todo_id}/`.
    pub fn router_path(&self) -> String {
        absolute(&self.render(|param| param.capture()))
    }

    /// Router path with capture names erased; two patterns with the same shape
    /// would shadow each other.
    pub(crate) fn shape(&self) -> String {
        absolute(&self.render(|_| "{}".to_string()))
    }

    /// Build a concrete path from positional arguments, in parameter order.
    pub fn reverse<I>(&self, args: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let args: Vec<String> = args.into_iter().map(|arg| arg.to_string()).collect();
        let expected = self.params().count();
        if args.len() != expected {
            return Err(HtmxViewError::no_reverse_match(
                &self.name,
                format!("expected {expected} argument(s), got {}", args.len()),
            ));
        }

        let mut values = args.iter();
        let mut body = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => body.push_str(text),
                Segment::Param(param) => {
                    let value = values.next().map(String::as_str).unwrap_or_default();
                    if !param.converter().accepts(value) {
                        return Err(HtmxViewError::no_reverse_match(
                            &self.name,
                            format!("'{value}' does not match {}", param.build_url_param()),
                        ));
                    }
                    body.extend(utf8_percent_encode(value, SEGMENT));
                }
            }
        }
        Ok(absolute(&body))
    }

    fn render(&self, placeholder: impl Fn(&UrlParameter) -> String) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Param(param) => placeholder(param),
            })
            .collect()
    }
}

fn absolute(body: &str) -> String {
    format!("/{}", body.trim_start_matches('/'))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn check_literal(literal: &str) -> std::result::Result<(), String> {
    match literal.chars().find(|c| matches!(c, '{' | '}' | '*' | '>')) {
        Some(c) => Err(format!("'{c}' is reserved in route templates")),
        None => Ok(()),
    }
}
