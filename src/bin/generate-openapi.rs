use clap::Parser;
use std::fs;
use std::path::PathBuf;

use surfs_up_api::api::generate_openapi_spec;

#[derive(Parser, Debug)]
#[command(about = "Write the OpenAPI document for the climate API")]
struct Args {
    /// Destination file
    #[arg(short, long, env = "OPENAPI_OUTPUT", default_value = "openapi.json")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let spec = generate_openapi_spec();
    let json = serde_json::to_string_pretty(&spec)?;

    fs::write(&args.output, json)?;
    println!("Generated {}", args.output.display());
    Ok(())
}
