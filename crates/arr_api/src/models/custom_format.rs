use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A custom format, either as stored by an instance or as the body sent to create/update one.
/// Only the synchronized properties are modelled; `id` is absent until the instance assigns it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    #[serde(default)]
    pub include_custom_format_when_renaming: bool,
    #[serde(default)]
    pub specifications: Vec<Specification>,
}

/// One condition of a [CustomFormat].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Specification {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub implementation: String,
    #[serde(default)]
    pub negate: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A `{name, value}` setting of a [Specification]. The instance returns extra presentation
/// properties (label, help text, ...) which are dropped.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

impl Field {
    pub fn new(name: &str, value: Value) -> Self {
        Field {
            name: String::from(name),
            value,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::models::{CustomFormat, Field, Specification};
    use serde_json::json;

    const RADARR_BODY: &str = r#"{
    "id": 12,
    "name": "x265",
    "includeCustomFormatWhenRenaming": false,
    "specifications": [
        {
            "name": "x265",
            "implementation": "ReleaseTitleSpecification",
            "implementationName": "Release Title",
            "infoLink": "https://wiki.servarr.com/radarr/settings#custom-formats-2",
            "negate": false,
            "required": true,
            "fields": [
                {
                    "order": 0,
                    "name": "value",
                    "label": "Regular Expression",
                    "helpText": "Custom Format RegEx is Case Insensitive",
                    "value": "[xh][ .]?265|\\bHEVC(\\b|\\d)",
                    "type": "textbox",
                    "advanced": false,
                    "privacy": "normal",
                    "isFloat": false
                }
            ]
        }
    ]
}"#;

    #[test]
    fn serde_deserialize_custom_format_ignores_presentation_properties() {
        // Arrange
        let expected = CustomFormat {
            id: Some(12),
            name: String::from("x265"),
            include_custom_format_when_renaming: false,
            specifications: vec![Specification {
                name: String::from("x265"),
                implementation: String::from("ReleaseTitleSpecification"),
                negate: false,
                required: true,
                fields: vec![Field::new("value", json!("[xh][ .]?265|\\bHEVC(\\b|\\d)"))],
            }],
        };

        // Act
        let actual: CustomFormat = serde_json::from_str(RADARR_BODY).unwrap();

        // Assert
        assert_eq!(expected, actual);
    }

    #[test]
    fn serde_serialize_custom_format_omits_missing_id() {
        // Arrange
        let input = CustomFormat {
            id: None,
            name: String::from("x265"),
            include_custom_format_when_renaming: true,
            specifications: vec![],
        };

        // Act
        let actual = serde_json::to_value(&input).unwrap();

        // Assert
        assert_eq!(
            json!({
                "name": "x265",
                "includeCustomFormatWhenRenaming": true,
                "specifications": []
            }),
            actual
        );
    }
}
