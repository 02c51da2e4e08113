use strum_macros::{AsRefStr, Display, EnumString};

/// How a path segment is matched and parsed.
///
/// The textual forms (`str`, `int`, `uuid`) are the ones used inside route
/// templates, e.g. `todos/toggle/<int:todo_id>/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ConverterTag {
    #[default]
    Str,
    Int,
    Uuid,
}

impl ConverterTag {
    /// Whether a raw (already percent-decoded) segment is matched by this converter.
    pub fn accepts(&self, segment: &str) -> bool {
        match self {
            ConverterTag::Str => !segment.is_empty() && !segment.contains('/'),
            ConverterTag::Int => !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()),
            ConverterTag::Uuid => is_canonical_uuid(segment),
        }
    }
}

// Lowercase, hyphenated 8-4-4-4-12 only; `Uuid::parse_str` alone would also take
// the simple and braced forms.
fn is_canonical_uuid(segment: &str) -> bool {
    if segment.len() != 36 {
        return false;
    }
    let shape_ok = segment.char_indices().all(|(i, c)| match i {
        8 | 13 | 18 | 23 => c == '-',
        _ => matches!(c, '0'..='9' | 'a'..='f'),
    });
    shape_ok && uuid::Uuid::parse_str(segment).is_ok()
}

/// A named, typed placeholder inside a route template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlParameter {
    name: String,
    converter: ConverterTag,
}

impl UrlParameter {
    pub fn new(name: impl Into<String>, converter: ConverterTag) -> Self {
        Self {
            name: name.into(),
            converter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn converter(&self) -> ConverterTag {
        self.converter
    }

    /// Template form: `<int:todo_id>`.
    pub fn build_url_param(&self) -> String {
        format!("<{}:{}>", self.converter, self.name)
    }

    /// Router capture form: `{todo_id}`.
    pub fn capture(&self) -> String {
        format!("{{{}}}", self.name)
    }
}
