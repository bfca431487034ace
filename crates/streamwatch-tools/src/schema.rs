use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSchema {
    pub properties: serde_json::Map<String, Value>,
    pub required: Vec<String>,
    #[serde(rename = "type")]
    pub schema_type: String,
}

impl From<schemars::Schema> for InputSchema {
    fn from(schema: schemars::Schema) -> Self {
        let value = serde_json::to_value(&schema).unwrap_or(Value::Null);
        let obj = value.as_object();

        let properties = obj
            .and_then(|o| o.get("properties"))
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let required = obj
            .and_then(|o| o.get("required"))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(ToOwned::to_owned))
                    .collect()
            })
            .unwrap_or_default();

        let schema_type = obj
            .and_then(|o| o.get("type"))
            .and_then(Value::as_str)
            .unwrap_or("object")
            .to_string();

        Self {
            properties,
            required,
            schema_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

/// Static description of one tool: its wire name and parameter type.
pub trait ToolSpec {
    type Params: DeserializeOwned + JsonSchema + Send;

    const NAME: &'static str;
    const DISPLAY_NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn schema() -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            display_name: Self::DISPLAY_NAME.to_string(),
            description: Self::DESCRIPTION.to_string(),
            input_schema: schemars::schema_for!(Self::Params).into(),
        }
    }

    fn parse_params(arguments: Value) -> Result<Self::Params, crate::ToolError> {
        serde_json::from_value(arguments)
            .map_err(|e| crate::ToolError::invalid_params(Self::NAME, e.to_string()))
    }
}
