use serde::{Deserialize, Serialize};
use toml::Value;

/// Names a membership strategy and carries its raw `params = { ... }` table.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct StrategyConfig {
    pub name: String,
    #[serde(default = "default_params")]
    pub params: Value,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            name: "hysteresis".to_string(),
            params: default_params(),
        }
    }
}

fn default_params() -> Value {
    Value::Table(Default::default())
}
