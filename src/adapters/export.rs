use crate::core::render::ResultRow;
use crate::utils::error::Result;
use std::io::Write;
use std::path::Path;

const HEADER: [&str; 6] = ["company", "employees", "region", "source", "url", "other_sources"];

pub fn write_results_csv<W: Write>(writer: W, rows: &[ResultRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for row in rows {
        csv_writer.write_record([
            row.company.as_str(),
            row.employees.as_str(),
            row.region.as_str(),
            row.source.label.as_str(),
            row.source.detail.as_str(),
            row.other_sources_text().as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_results_csv<P: AsRef<Path>>(path: P, rows: &[ResultRow]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_results_csv(file, rows)?;
    tracing::debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
