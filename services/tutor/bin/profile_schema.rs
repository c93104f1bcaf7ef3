use edubridge_core::profile::LearnerProfile;

/// Generates the JSON Schema for learner profile files and writes it to a file.
fn generate_schema(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let schema = schemars::schema_for!(LearnerProfile);
    let schema_json = serde_json::to_string_pretty(&schema)?;
    std::fs::write(path, schema_json)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "profile.schema.json".to_string());
    generate_schema(&path)?;
    Ok(())
}
