/**
 * Generates Rust types for the numbering-plan schema and makes sure the
 * embedded datasets are present before the crate tries to `include_str!` them.
 */

use std::path::Path;

use thiserror::Error;

const SCHEMA: &str = "resources/phonemetadata.proto";

const DATASETS: [&str; 2] = [
    "resources/PhoneNumberMetadata.textproto",
    "resources/ShortNumberMetadata.textproto",
];

#[derive(Debug, Error)]
enum BuildError {
    #[error("Required resource '{path}' is missing")]
    MissingResource { path: String },

    #[error("Resource '{path}' is empty")]
    EmptyResource { path: String },

    #[error("IO error occurred: {0}")]
    IO(#[from] std::io::Error),
}

fn check_resource(path: &str) -> Result<(), BuildError> {
    if !Path::new(path).exists() {
        return Err(BuildError::MissingResource { path: path.to_string() });
    }
    if std::fs::metadata(path)?.len() == 0 {
        return Err(BuildError::EmptyResource { path: path.to_string() });
    }
    println!("cargo:rerun-if-changed={}", path);
    Ok(())
}

fn main() -> Result<(), BuildError> {
    check_resource(SCHEMA)?;
    for dataset in DATASETS {
        check_resource(dataset)?;
    }

    protobuf_codegen::Codegen::new()
        .pure()
        .includes(["resources"])
        .input(SCHEMA)
        .cargo_out_dir("proto_gen")
        .run_from_script();
    Ok(())
}
