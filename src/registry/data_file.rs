use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::warn;

use crate::registry::model::{local_now, CompanyRecord};

/// Durable home of the whole collection: one JSON array document,
/// overwritten wholesale after every mutation.
#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
    export_dir: PathBuf,
}

impl DataFile {
    pub fn new() -> anyhow::Result<Self> {
        let mut dir = dirs::config_dir().context("could not resolve XDG config dir")?;
        dir.push("company-registry");
        fs::create_dir_all(&dir).context("failed to create config directory")?;

        Ok(Self {
            path: dir.join("companies.json"),
            // Exports are user-facing documents, so they land in the
            // working directory rather than under XDG config.
            export_dir: PathBuf::from("."),
        })
    }

    pub fn with_root(dir: &Path) -> Self {
        Self {
            path: dir.join("companies.json"),
            export_dir: dir.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the collection document. Any failure is non-fatal: the error is
    /// logged and an empty collection comes back.
    pub fn load(&self) -> Vec<CompanyRecord> {
        if !self.path.exists() {
            return Vec::new();
        }
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                warn!("failed to read {}: {err}", self.path.display());
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(err) => {
                warn!("failed to parse {}: {err}", self.path.display());
                Vec::new()
            }
        }
    }

    /// Overwrites the document with the full collection. A failed save
    /// leaves the previous file content on disk untouched.
    pub fn save(&self, records: &[CompanyRecord]) -> bool {
        let content = match serde_json::to_string_pretty(records) {
            Ok(content) => content,
            Err(err) => {
                warn!("failed to serialize collection: {err}");
                return false;
            }
        };
        match fs::write(&self.path, content) {
            Ok(()) => true,
            Err(err) => {
                warn!("failed to write {}: {err}", self.path.display());
                false
            }
        }
    }

    /// Writes a timestamp-named plain-text snapshot and returns its path.
    pub fn export_text(&self, records: &[CompanyRecord]) -> Option<PathBuf> {
        let now = local_now();
        let stamp = now
            .format(format_description!(
                "[year][month][day]_[hour][minute][second]"
            ))
            .unwrap_or_default();
        let path = self.export_dir.join(format!("companies_export_{stamp}.txt"));

        match fs::write(&path, render_report(records, now)) {
            Ok(()) => Some(path),
            Err(err) => {
                warn!("failed to write export {}: {err}", path.display());
                None
            }
        }
    }
}

// The report keeps the Spanish labels of the original export format; it is
// an external document, not UI copy.
fn render_report(records: &[CompanyRecord], exported_at: OffsetDateTime) -> String {
    let rule = "=".repeat(50);
    let separator = "-".repeat(50);

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str("LISTADO DE EMPRESAS REGISTRADAS\n");
    out.push_str(&rule);
    out.push_str("\n\n");

    for (index, record) in records.iter().enumerate() {
        out.push_str(&format!("EMPRESA #{}\n", index + 1));
        out.push_str(&format!("ID: {}\n", record.id));
        out.push_str(&format!("Nombre: {}\n", record.name));
        out.push_str(&format!("Servicio: {}\n", record.service));
        out.push_str(&format!("Teléfono: {}\n", record.phone));
        out.push_str(&format!("Dirección: {}\n", record.address));
        out.push_str(&format!("Detalles: {}\n", record.details));
        out.push_str(&format!("Fecha de registro: {}\n", record.created_at));
        out.push_str(&separator);
        out.push_str("\n\n");
    }

    let stamp = exported_at
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_default();
    out.push_str(&format!("\nTotal de empresas: {}\n", records.len()));
    out.push_str(&format!("Exportado el: {stamp}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::DataFile;
    use crate::registry::model::CompanyRecord;

    fn record(id: &str, name: &str) -> CompanyRecord {
        CompanyRecord {
            id: id.to_string(),
            name: name.to_string(),
            service: "Plumbing".to_string(),
            phone: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            details: "emergency callouts".to_string(),
            photo: None,
            created_at: "2026-08-30 12:00".to_string(),
        }
    }

    #[test]
    fn load_returns_empty_when_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let data_file = DataFile::with_root(dir.path());
        assert!(data_file.load().is_empty());
    }

    #[test]
    fn load_returns_empty_on_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let data_file = DataFile::with_root(dir.path());
        std::fs::write(data_file.path(), "{ not json").unwrap();
        assert!(data_file.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let data_file = DataFile::with_root(dir.path());

        for count in [0usize, 1, 3] {
            let records: Vec<_> = (0..count)
                .map(|i| record(&format!("id-{i}"), &format!("Company {i}")))
                .collect();
            assert!(data_file.save(&records));
            assert_eq!(data_file.load(), records);
        }
    }

    #[test]
    fn load_applies_wire_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let data_file = DataFile::with_root(dir.path());
        std::fs::write(
            data_file.path(),
            r#"[{"id":"20240101120000","nombre":"Acme","servicio":"Plumbing",
                "telefono":"555-0100","direccion":"1 Main St","detalles":"x"}]"#,
        )
        .unwrap();

        let records = data_file.load();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].photo, None);
        assert_eq!(records[0].created_at, "");
    }

    #[test]
    fn export_writes_labeled_blocks_and_totals() {
        let dir = tempfile::tempdir().unwrap();
        let data_file = DataFile::with_root(dir.path());
        let records = vec![record("id-1", "Acme"), record("id-2", "Bolt Co")];

        let path = data_file.export_text(&records).unwrap();
        let report = std::fs::read_to_string(&path).unwrap();

        assert!(path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("companies_export_"));
        assert!(report.contains("LISTADO DE EMPRESAS REGISTRADAS"));
        assert!(report.contains("EMPRESA #1\nID: id-1\nNombre: Acme"));
        assert!(report.contains("EMPRESA #2"));
        assert!(report.contains("Total de empresas: 2"));
        assert!(report.contains("Exportado el: "));
    }
}
