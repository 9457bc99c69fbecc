use shared_types::generate_typescript_definitions;
use std::fs;
use std::path::Path;

const API_TYPES: &[&str] = &[
    "ChatRequest",
    "ChatResponse",
    "SessionMessage",
    "SessionHistoryResponse",
    "LabReportRequest",
    "LabReportResponse",
    "HealthResponse",
    "VersionResponse",
    "ErrorResponse",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("web/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = format!("{}\n", generate_typescript_definitions(API_TYPES)?);

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}
