use anyhow::Result;

use crate::domain::MethodologyResponse;

pub struct SchemaController;

impl SchemaController {
    pub fn new() -> Self {
        Self
    }

    pub async fn schema(&self) -> Result<String> {
        let schema = schemars::schema_for!(MethodologyResponse);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

impl Default for SchemaController {
    fn default() -> Self {
        Self::new()
    }
}
