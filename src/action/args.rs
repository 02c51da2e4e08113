use crate::error::{HtmxViewError, Result};
use crate::url::UrlParameter;
use axum::extract::{FromRequestParts, RawPathParams};
use axum::http::request::Parts;
use std::str::FromStr;

/// Path segments captured for a route, already checked against their converters.
#[derive(Debug, Clone, Default)]
pub struct PathArgs {
    values: Vec<(String, String)>,
}

impl PathArgs {
    /// Pair each declared parameter with its captured segment.
    ///
    /// Captures without a declared parameter are ignored.
    pub fn resolve<'a, I>(params: &[UrlParameter], captured: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let captured: Vec<(&str, &str)> = captured.into_iter().collect();
        let mut values = Vec::with_capacity(params.len());
        for param in params {
            let value = captured
                .iter()
                .find(|(name, _)| *name == param.name())
                .map(|(_, value)| *value)
                .ok_or_else(|| HtmxViewError::MissingPathArgument {
                    name: param.name().to_string(),
                })?;
            if !param.converter().accepts(value) {
                return Err(HtmxViewError::InvalidPathArgument {
                    name: param.name().to_string(),
                    value: value.to_string(),
                });
            }
            values.push((param.name().to_string(), value.to_string()));
        }
        Ok(Self { values })
    }

    /// Read the router captures from request parts and resolve them.
    pub async fn extract(params: &[UrlParameter], parts: &mut Parts) -> Result<Self> {
        if params.is_empty() {
            return Ok(Self::default());
        }
        let raw = RawPathParams::from_request_parts(parts, &())
            .await
            .map_err(|rejection| HtmxViewError::InvalidPathArgument {
                name: "path".to_string(),
                value: rejection.body_text(),
            })?;
        Self::resolve(params, raw.iter())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Convert one argument; failure means the URL does not resolve.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<T> {
        let value = self.get(name).ok_or_else(|| HtmxViewError::MissingPathArgument {
            name: name.to_string(),
        })?;
        value.parse().map_err(|_| HtmxViewError::InvalidPathArgument {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::ConverterTag;
    use uuid::Uuid;

    fn params() -> Vec<UrlParameter> {
        vec![
            UrlParameter::new("todo_id", ConverterTag::Int),
            UrlParameter::new("owner", ConverterTag::Uuid),
        ]
    }

    #[test]
    fn test_resolve_and_parse() {
        let owner = Uuid::new_v4().to_string();
        let args = PathArgs::resolve(&params(), [("owner", owner.as_str()), ("todo_id", "5")]).unwrap();
        assert_eq!(args.len(), 2);
        assert_eq!(args.parse::<i64>("todo_id").unwrap(), 5);
        assert_eq!(args.parse::<Uuid>("owner").unwrap().to_string(), owner);
    }

    #[test]
    fn test_iter_follows_declared_order() {
        let owner = Uuid::new_v4().to_string();
        let args = PathArgs::resolve(&params(), [("owner", owner.as_str()), ("todo_id", "5")]).unwrap();
        let pairs: Vec<(&str, &str)> = args.iter().collect();
        assert_eq!(pairs, vec![("todo_id", "5"), ("owner", owner.as_str())]);
    }

    #[test]
    fn test_converter_mismatch_is_rejected() {
        let owner = Uuid::new_v4().to_string();
        let err = PathArgs::resolve(&params(), [("todo_id", "five"), ("owner", owner.as_str())]).unwrap_err();
        assert!(matches!(err, HtmxViewError::InvalidPathArgument { ref name, .. } if name == "todo_id"));
    }

    #[test]
    fn test_missing_capture_is_rejected() {
        let err = PathArgs::resolve(&params(), [("todo_id", "5")]).unwrap_err();
        assert!(matches!(err, HtmxViewError::MissingPathArgument { .. }));
    }

    #[test]
    fn test_overflowing_int_fails_to_parse() {
        let only_id = vec![UrlParameter::new("todo_id", ConverterTag::Int)];
        let args = PathArgs::resolve(&only_id, [("todo_id", "99999999999999999999999")]).unwrap();
        assert!(args.parse::<i64>("todo_id").is_err());
    }
}
