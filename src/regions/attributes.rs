use crate::utils::Result;
use itertools::Itertools;
use std::fmt;

/// Ordered GFF3 column 9 attributes (`key=value;key=value`).
///
/// Order is preserved so that rewriting identifiers only touches the values of the
/// rewritten keys. A segment without `=` is kept verbatim as a bare key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes {
    fields: Vec<(String, Option<String>)>,
}

impl Attributes {
    /// Parses attributes, rejecting segments that are not in `name=value` form.
    pub fn parse(encoding: &str) -> Result<Self> {
        let mut fields = Vec::new();
        for field_encoding in segments(encoding) {
            let (name, value) = decode_attribute(field_encoding)?;
            fields.push((name.to_string(), Some(value.to_string())));
        }
        Ok(Self { fields })
    }

    /// Parses attributes without validation; malformed segments survive a rewrite unchanged.
    pub fn parse_lenient(encoding: &str) -> Self {
        let fields = segments(encoding)
            .map(|segment| match segment.split_once('=') {
                Some((name, value)) => (name.to_string(), Some(value.to_string())),
                None => (segment.to_string(), None),
            })
            .collect();
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = Some(value.into());
        match self.fields.iter_mut().find(|(name, _)| name == key) {
            Some(field) => field.1 = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = self
            .fields
            .iter()
            .map(|(name, value)| match value {
                Some(value) => format!("{}={}", name, value),
                None => name.clone(),
            })
            .join(";");
        f.write_str(&encoded)
    }
}

/// Rewrites `ID`, `Name` and `Parent` of an attribute string into the `new_id` namespace.
///
/// `ID` and `Name` become `<new_id>.<suffix>` where `<suffix>` is the last dotted component
/// of the current `Name`; `Parent` becomes `new_id`.
pub fn rewrite_info_id(info: &str, new_id: &str) -> String {
    let mut attributes = Attributes::parse_lenient(info);
    let suffix = attributes
        .get("Name")
        .and_then(|name| name.rsplit('.').next())
        .unwrap_or("")
        .to_string();
    let new_name = format!("{}.{}", new_id, suffix);
    attributes.set("ID", new_name.clone());
    attributes.set("Name", new_name);
    attributes.set("Parent", new_id);
    attributes.to_string()
}

fn segments(encoding: &str) -> impl Iterator<Item = &str> {
    encoding
        .trim()
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn decode_attribute(encoding: &str) -> Result<(&str, &str)> {
    let error_message = || format!("Attribute must be in 'name=value' format: '{}'", encoding);
    let parts: Vec<&str> = encoding.splitn(2, '=').collect();
    if parts.len() != 2 || parts[0].is_empty() {
        Err(error_message())
    } else {
        Ok((parts[0], parts[1]))
    }
}
