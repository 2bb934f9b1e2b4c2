use std::collections::HashMap;

use async_trait::async_trait;
use types::Value;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Resolve variables referenced in templates
///
/// `name` is lowercased and trimmed. `specifier` is the text after the first
/// `#` of the reference (`order#total`), it can be empty (`order#`).
/// `Ok(None)` lets the next resolver try.
#[async_trait]
pub trait VarResolver: Send + Sync {
    async fn resolve(
        &self,
        name: &str,
        specifier: Option<&str>,
    ) -> Result<Option<Value>, BoxError>;
}

#[async_trait]
impl<F> VarResolver for F
where
    F: Fn(&str, Option<&str>) -> Option<Value> + Send + Sync,
{
    async fn resolve(
        &self,
        name: &str,
        specifier: Option<&str>,
    ) -> Result<Option<Value>, BoxError> {
        Ok(self(name, specifier))
    }
}

/// Resolve variables from the properties of an object
///
/// Keys match case insensitively. A specifier indexes one more level in to
/// the property: object keys, or list positions. Resolved scalars are
/// stringified, lists, objects and dates are left to the processor to format.
#[derive(Debug, Clone, Default)]
pub struct PropsResolver {
    props: HashMap<String, Value>,
}

impl PropsResolver {
    pub fn new(props: Value) -> Self {
        Self {
            props: lowercase_keys(props),
        }
    }

    pub fn lookup(&self, name: &str, specifier: Option<&str>) -> Option<Value> {
        let value = self.props.get(&name.to_lowercase())?;

        match specifier {
            Some(specifier) if !specifier.is_empty() => {
                if value.is_null() {
                    return None;
                }
                index(value, specifier).map(stringify)
            }
            _ => Some(stringify(value.clone())),
        }
    }
}

impl From<serde_json::Value> for PropsResolver {
    fn from(value: serde_json::Value) -> Self {
        Self::new(value.into())
    }
}

impl From<Value> for PropsResolver {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[async_trait]
impl VarResolver for PropsResolver {
    async fn resolve(
        &self,
        name: &str,
        specifier: Option<&str>,
    ) -> Result<Option<Value>, BoxError> {
        Ok(self.lookup(name, specifier))
    }
}

/// First key wins when two keys only differ by case
fn lowercase_keys(props: Value) -> HashMap<String, Value> {
    let mut map = HashMap::new();

    if let Value::Object(object) = props {
        for (key, value) in object {
            map.entry(key.to_lowercase()).or_insert(value);
        }
    }

    map
}

fn index(value: &Value, key: &str) -> Option<Value> {
    match value {
        Value::Object(object) => {
            let key = key.to_lowercase();
            object
                .iter()
                .find(|(candidate, _)| candidate.to_lowercase() == key)
                .map(|(_, value)| value.clone())
        }
        Value::List(items) => key
            .parse::<usize>()
            .ok()
            .and_then(|position| items.get(position))
            .cloned(),
        _ => None,
    }
}

fn stringify(value: Value) -> Value {
    match value {
        Value::Null | Value::Bool(_) | Value::Integer(_) | Value::Float(_) => {
            Value::String(value.to_string())
        }
        value => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn resolver() -> PropsResolver {
        PropsResolver::from(json!({
            "var": "some value",
            "UC_var": "some value",
            "count": 3,
            "nothing": null,
            "obj": { "Prop": "prop value", "empty": null },
            "arr": ["first", "second", "third"]
        }))
    }

    #[test]
    fn plain_names() {
        let resolver = resolver();

        assert_eq!(Some(Value::from("some value")), resolver.lookup("var", None));
        assert_eq!(Some(Value::from("some value")), resolver.lookup("uc_var", None));
        assert_eq!(Some(Value::from("3")), resolver.lookup("count", None));
        assert_eq!(Some(Value::from("")), resolver.lookup("nothing", None));
        assert_eq!(None, resolver.lookup("missing", None));
    }

    #[test]
    fn specifiers() {
        let resolver = resolver();

        assert_eq!(
            Some(Value::from("prop value")),
            resolver.lookup("obj", Some("prop"))
        );
        assert_eq!(Some(Value::from("")), resolver.lookup("obj", Some("empty")));
        assert_eq!(None, resolver.lookup("obj", Some("missing")));
        assert_eq!(Some(Value::from("second")), resolver.lookup("arr", Some("1")));
        assert_eq!(None, resolver.lookup("arr", Some("4")));
        assert_eq!(None, resolver.lookup("arr", Some("x")));
        assert_eq!(None, resolver.lookup("nothing", Some("prop")));
        assert_eq!(None, resolver.lookup("var", Some("prop")));
    }

    #[test]
    fn empty_specifier_is_ignored() {
        assert_eq!(
            Some(Value::from(vec!["first", "second", "third"])),
            resolver().lookup("arr", Some(""))
        );
    }

    #[test]
    fn structured_values_are_kept() {
        let resolver = PropsResolver::from(json!({
            "nested": { "list": [1, true], "inner": { "a": 1.5 } }
        }));

        assert_eq!(
            Some(Value::List(vec![Value::Integer(1), Value::Bool(true)])),
            resolver.lookup("nested", Some("list"))
        );
        assert_eq!(
            Some(Value::from(json!({ "a": 1.5 }))),
            resolver.lookup("nested", Some("inner"))
        );
        assert!(matches!(
            resolver.lookup("nested", None),
            Some(Value::Object(_))
        ));
    }

    #[test]
    fn not_an_object() {
        assert_eq!(None, PropsResolver::from(json!([1, 2])).lookup("0", None));
    }

    #[tokio::test]
    async fn closures_are_resolvers() {
        let resolver = |name: &str, specifier: Option<&str>| match (name, specifier) {
            ("answer", None) => Some(Value::Integer(42)),
            _ => None,
        };

        assert_eq!(
            Some(Value::Integer(42)),
            resolver.resolve("answer", None).await.unwrap()
        );
        assert_eq!(None, resolver.resolve("answer", Some("")).await.unwrap());
    }
}
