use serde::{Deserialize, Deserializer, Serialize};

/// 一个显著文本候选节点，按优先级排序（下标越小优先级越高）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextCandidate {
    /// 节点的可见文本（textContent）
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,

    /// 结构路径，例如 `html > body > main#content > h1.hero`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub path: String,
}

impl TextCandidate {
    pub fn new(text: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            path: path.into(),
        }
    }
}

// textContent 在部分节点上可能是 null
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_text_becomes_empty() {
        let c: TextCandidate =
            serde_json::from_str(r#"{"text":null,"path":"html > body > h1"}"#).unwrap();
        assert_eq!(c.text, "");
        assert_eq!(c.path, "html > body > h1");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let c: TextCandidate =
            serde_json::from_str(r#"{"text":"Acme","path":"p","html":"<b>Acme</b>"}"#).unwrap();
        assert_eq!(c, TextCandidate::new("Acme", "p"));
    }
}
