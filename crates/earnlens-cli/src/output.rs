use crate::cli::OutputFormat;
use crate::commands::CommandReport;
use crate::error::CliError;

pub fn render(
    report: &CommandReport,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(&report.data)?
            } else {
                serde_json::to_string(&report.data)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => {
            for line in &report.lines {
                println!("{line}");
            }
        }
    }

    Ok(())
}
