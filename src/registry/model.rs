use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::OffsetDateTime;

/// One company entry. Field names on the wire stay in Spanish for
/// compatibility with the existing `companies.json` documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "servicio")]
    pub service: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "detalles")]
    pub details: String,
    /// Base64-encoded image bytes, passed through unchanged.
    #[serde(rename = "foto", default)]
    pub photo: Option<String>,
    /// Set once at creation, never touched by edits.
    #[serde(rename = "fecha_registro", default)]
    pub created_at: String,
}

/// Form input for create/update. `photo: None` on update means "keep the
/// current photo", not "remove it".
#[derive(Debug, Clone, Default)]
pub struct CompanyDraft {
    pub name: String,
    pub service: String,
    pub phone: String,
    pub address: String,
    pub details: String,
    pub photo: Option<String>,
}

pub(crate) fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

pub(crate) fn registration_timestamp() -> String {
    local_now()
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_default()
}
