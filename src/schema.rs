//! JSON Schema check for emitted record files.
//!
//! The schema ships inside the binary so a directory can be checked without
//! the source tree around it.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::sync::OnceLock;

const BUNDLED_SCHEMA: &str = include_str!("../schema/dex_record.json");

fn bundled_schema_value() -> Result<&'static Value> {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    if let Some(value) = SCHEMA.get() {
        return Ok(value);
    }
    let value: Value =
        serde_json::from_str(BUNDLED_SCHEMA).context("parsing bundled dex record schema")?;
    Ok(SCHEMA.get_or_init(|| value))
}

/// Compiled validator for a single dex record.
pub struct RecordSchema {
    compiled: JSONSchema,
}

impl RecordSchema {
    pub fn bundled() -> Result<Self> {
        let schema = bundled_schema_value()?;
        let compiled = JSONSchema::compile(schema)
            .map_err(|err| anyhow!("compiling bundled dex record schema: {err}"))?;
        Ok(Self { compiled })
    }

    /// Validate `value`, reporting every violation on its own line.
    pub fn validate(&self, value: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(value) {
            let details = errors
                .map(|err| format!("{} at {}", err, err.instance_path))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("record failed schema validation:\n{details}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ArtifactSet;
    use crate::registry::Registry;
    use serde_json::json;

    #[test]
    fn generated_records_satisfy_schema() {
        let schema = RecordSchema::bundled().unwrap();
        for artifact in ArtifactSet::generate(&Registry::builtin()).iter() {
            let value = serde_json::to_value(&artifact.record).unwrap();
            schema.validate(&value).unwrap();
        }
    }

    #[test]
    fn extra_and_missing_keys_fail() {
        let schema = RecordSchema::bundled().unwrap();
        let extra = json!({"mint": "m", "mainAccount": "a", "ty": "Spl", "note": "x"});
        assert!(schema.validate(&extra).is_err());
        let missing = json!({"aTy": "Spl", "bTy": "Spl", "aMint": "m"});
        assert!(schema.validate(&missing).is_err());
        let wrong_type = json!({"mint": 1, "mainAccount": "a", "ty": "Spl"});
        let err = schema.validate(&wrong_type).unwrap_err();
        assert!(err.to_string().contains("schema validation"));
    }

    #[test]
    fn unknown_pool_tag_fails() {
        let schema = RecordSchema::bundled().unwrap();
        let unknown = json!({"mint": "m", "mainAccount": "a", "ty": "Bogus"});
        assert!(schema.validate(&unknown).is_err());
        let known = json!({"mint": "m", "mainAccount": "a", "ty": "Unstakeit"});
        schema.validate(&known).unwrap();
    }
}
