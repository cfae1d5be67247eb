use crate::domain::ports::Storage;
use crate::utils::error::{ArcadeError, Result};
use serde::Serialize;

pub const SUPPORTED_FORMATS: &[&str] = &["csv", "json"];

pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.into_inner().map_err(|e| ArcadeError::IoError(e.into_error()))
}

pub fn to_json<T: Serialize>(rows: &[T]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(rows)?)
}

pub fn render<T: Serialize>(format: &str, rows: &[T]) -> Result<Vec<u8>> {
    match format {
        "csv" => to_csv(rows),
        "json" => to_json(rows),
        other => Err(ArcadeError::InvalidConfigValueError {
            field: "export.formats".to_string(),
            value: other.to_string(),
            reason: format!("Valid formats: {}", SUPPORTED_FORMATS.join(", ")),
        }),
    }
}

/// Writes `<stem>.<format>` for every requested format and returns the written paths.
pub async fn write_exports<S: Storage, T: Serialize>(
    storage: &S,
    stem: &str,
    rows: &[T],
    formats: &[String],
) -> Result<Vec<String>> {
    let mut written = Vec::new();
    for format in formats {
        let data = render(format, rows)?;
        let path = format!("{}.{}", stem, format);
        storage.write_file(&path, &data).await?;
        tracing::info!("📁 Exported {} rows to {}", rows.len(), path);
        written.push(path);
    }
    Ok(written)
}
