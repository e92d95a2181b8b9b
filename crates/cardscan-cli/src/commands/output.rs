//! Output formatting shared by the scanning commands.

use std::fs;
use std::path::Path;

use console::style;

use cardscan_core::{ContactField, ScanResponse};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_response(
    response: &ScanResponse,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Json => Ok(serde_json::to_string(response)?),
        OutputFormat::Csv => format_csv(response),
        OutputFormat::Text => Ok(format_text(response)),
    }
}

/// Write to `output` if given, otherwise print to stdout.
pub fn emit(content: &str, output: Option<&Path>) -> anyhow::Result<()> {
    if let Some(output_path) = output {
        fs::write(output_path, content)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn format_csv(response: &ScanResponse) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["name", "email", "phone", "company", "file_url"])?;

    let record = &response.extracted_data;
    wtr.write_record([
        record.name.as_str(),
        record.email.as_str(),
        record.phone.as_str(),
        record.company.as_str(),
        response.file_url.as_deref().unwrap_or(""),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(response: &ScanResponse) -> String {
    let mut output = String::new();

    for field in ContactField::ALL {
        let value = response.extracted_data.get(field).replace('\n', " ");
        let label = format!("{}:", capitalize(field.as_str()));
        output.push_str(&format!("{:<9}{}", label, value));

        if let Some(bbox) = response.boxes.get(field) {
            output.push_str(&format!(
                "  [x={} y={} w={} h={}]",
                bbox.x, bbox.y, bbox.width, bbox.height
            ));
        }
        output.push('\n');
    }

    if let Some(url) = &response.file_url {
        output.push_str(&format!("\nStored at: {}\n", url));
    }

    for warning in &response.warnings {
        output.push_str(&format!("\n! {}", warning));
    }

    output
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
