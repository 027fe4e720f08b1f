//! Input validation: raw text to [`AdjacencyMap`].

use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::entities::AdjacencyMap;
use crate::domain::error::{DomainError, DomainResult};

/// Parse and validate user supplied text.
///
/// Blank text is [`DomainError::EmptyInput`], unparsable text is
/// [`DomainError::Parse`], and anything that parses but is not an object of
/// arrays is [`DomainError::Schema`].
#[instrument(level = "debug", skip(input), fields(len = input.len()))]
pub fn parse_input(input: &str) -> DomainResult<AdjacencyMap> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DomainError::EmptyInput);
    }

    let value: Value = serde_json::from_str(input).map_err(|e| DomainError::Parse {
        message: e.to_string(),
    })?;

    validate(&value)
}

/// Check that `value` is an object whose every value is an array.
///
/// Element types are not checked: string elements are taken as names,
/// anything else is named by its JSON text.
pub fn validate(value: &Value) -> DomainResult<AdjacencyMap> {
    let object = match value {
        Value::Object(object) => object,
        Value::Array(_) => {
            return Err(DomainError::Schema {
                reason: "top-level value is an array".to_string(),
            })
        }
        Value::Null => {
            return Err(DomainError::Schema {
                reason: "top-level value is null".to_string(),
            })
        }
        _ => {
            return Err(DomainError::Schema {
                reason: "top-level value is not an object".to_string(),
            })
        }
    };

    let mut map = AdjacencyMap::with_capacity(object.len());
    for (name, children) in object {
        let Value::Array(children) = children else {
            return Err(DomainError::Schema {
                reason: format!("value of '{}' is not an array", name),
            });
        };
        let children = children.iter().map(element_name).collect();
        map.insert(name.clone(), children);
    }
    debug!("validated {} entries", map.len());
    Ok(map)
}

fn element_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
