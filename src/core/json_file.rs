use crate::domain::ports::Storage;
use crate::utils::error::{PlannerError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read a JSON document, treating a missing or unreadable file as empty.
pub async fn read_or_default<S, T>(storage: &S, path: &str) -> T
where
    S: Storage,
    T: DeserializeOwned + Default,
{
    let data = match storage.read_file(path).await {
        Ok(data) => data,
        Err(PlannerError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return T::default();
        }
        Err(e) => {
            tracing::warn!("Could not read {}: {}", path, e);
            return T::default();
        }
    };

    serde_json::from_slice(&data).unwrap_or_else(|e| {
        tracing::warn!("Ignoring malformed {}: {}", path, e);
        T::default()
    })
}

/// Four-space indented, UTF-8 without escaping non-ASCII characters.
pub async fn write_pretty<S, T>(storage: &S, path: &str, value: &T) -> Result<()>
where
    S: Storage,
    T: Serialize + ?Sized,
{
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    storage.write_file(path, &buffer).await
}
