use crate::output::OutputError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header of the single CSV column
pub const CSV_HEADER: &str = "Gefundene Unterseiten";

/// Writes the URL list as a single-column, UTF-8 CSV
///
/// # Example
///
/// ```
/// use luna_crawler::output::write_csv;
///
/// let mut buffer = Vec::new();
/// write_csv(&["https://example.com/".to_string()], &mut buffer).unwrap();
/// assert_eq!(String::from_utf8(buffer).unwrap(), "Gefundene Unterseiten\nhttps://example.com/\n");
/// ```
pub fn write_csv<W: Write>(urls: &[String], writer: W) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([CSV_HEADER])?;
    for url in urls {
        writer.write_record([url])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the URL list to a CSV file, replacing any existing file
pub fn export_csv(urls: &[String], path: &Path) -> Result<(), OutputError> {
    let file = File::create(path)?;
    write_csv(urls, file)?;
    tracing::info!("Exported {} URLs to {}", urls.len(), path.display());
    Ok(())
}
