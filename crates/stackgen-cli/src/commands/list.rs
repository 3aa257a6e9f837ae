//! Implementation of the `stackgen list` command.

use stackgen_adapters::{LocalFilesystem, YamlRegistry};
use stackgen_core::prelude::{RegistryService, ServiceRecord};

use crate::{
    cli::{ListArgs, ListFormat},
    commands::generate::ensure_root,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

const COLUMNS: [&str; 6] = ["name", "path", "language", "port", "namespace", "team"];

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    ensure_root(&args.target.root)?;
    let settings = config.pipeline_settings(&args.target.root, args.target.registry.as_deref())?;

    let service = RegistryService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(YamlRegistry::new()),
    );
    let records = service.load(&settings.resolved_registry_path())?;

    // `--output-format json` wins over the table default.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header(&format!("Services ({}):", records.len()))?;
            for line in table_lines(&records) {
                output.print(&format!("  {line}"))?;
            }
        }
        // Serialised to stdout even in quiet mode: JSON must stay parseable
        // in non-TTY pipes.
        ListFormat::Json => output.json(&records)?,
        ListFormat::List => {
            for record in &records {
                output.print(&record.name)?;
            }
        }
        ListFormat::Csv => {
            for line in csv_lines(&records) {
                output.print(&line)?;
            }
        }
    }

    Ok(())
}

fn fields(record: &ServiceRecord) -> [String; 6] {
    [
        record.name.clone(),
        record.path.display().to_string(),
        record.language.clone(),
        record.port.to_string(),
        record.namespace.clone(),
        record.team.clone(),
    ]
}

fn table_lines(records: &[ServiceRecord]) -> Vec<String> {
    let rows: Vec<[String; 6]> = records.iter().map(fields).collect();
    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: &[String]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };

    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_uppercase()).collect();
    let mut lines = vec![render(&header)];
    lines.extend(rows.iter().map(|row| render(row)));
    lines
}

fn csv_lines(records: &[ServiceRecord]) -> Vec<String> {
    let mut lines = vec![COLUMNS.join(",")];
    lines.extend(records.iter().map(|r| {
        fields(r)
            .iter()
            .map(|cell| csv_escape(cell))
            .collect::<Vec<_>>()
            .join(",")
    }));
    lines
}

fn csv_escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<ServiceRecord> {
        vec![
            ServiceRecord::new("foo", "services/foo", "go", 8080, "core", "x"),
            ServiceRecord::new("billing-api", "services/billing", "node", 3000, "data", "payments"),
        ]
    }

    #[test]
    fn table_columns_are_aligned() {
        let lines = table_lines(&records());
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME         PATH"));
        assert!(lines[1].starts_with("foo          services/foo"));
        assert!(lines[2].ends_with("payments"));
    }

    #[test]
    fn csv_has_header_and_rows() {
        let lines = csv_lines(&records());
        assert_eq!(lines[0], "name,path,language,port,namespace,team");
        assert_eq!(lines[1], "foo,services/foo,go,8080,core,x");
    }

    #[test]
    fn csv_quotes_separators() {
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("plain"), "plain");
    }
}
