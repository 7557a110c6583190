//! JSON profile reader and writer.
//!
//! Profiles are written pretty-printed, in the same camelCase shape they
//! are read in.

use crate::parser::schema::Profile;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write a profile to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `profile` - Profile data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::Io` - I/O error during write
/// * `OutputError::Serialization` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_profile(profile: &Profile, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing profile to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, profile)?;
    writer.flush()?;

    info!(
        "Profile written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a profile to a pretty JSON string
pub fn profile_to_string(profile: &Profile) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(profile)?)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a profile from a JSON file
///
/// **Public** - used by every command
///
/// # Errors
/// * `OutputError::Io` - File read error
/// * `OutputError::Serialization` - JSON parse error
pub fn read_profile(input_path: impl AsRef<Path>) -> Result<Profile, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading profile from: {}", input_path.display());

    let file = File::open(input_path)?;
    let profile: Profile = serde_json::from_reader(BufReader::new(file))?;

    debug!(
        "Profile loaded: version {}, {} names, {} levels",
        profile.version,
        profile.flamebearer.names.len(),
        profile.flamebearer.levels.len()
    );

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{Flamebearer, Metadata};
    use tempfile::NamedTempFile;

    fn create_test_profile() -> Profile {
        Profile {
            version: 1,
            flamebearer: Flamebearer {
                names: vec!["total".to_string(), "main".to_string()],
                levels: vec![vec![0, 5, 0, 0], vec![0, 5, 5, 1]],
                num_ticks: 5,
                max_self: 5,
                format: None,
            },
            metadata: Metadata {
                units: Some("samples".to_string()),
                sample_rate: Some(100),
                ..Metadata::default()
            },
            left_ticks: None,
            right_ticks: None,
        }
    }

    #[test]
    fn test_write_and_read_profile() {
        let profile = create_test_profile();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_profile(&profile, path).unwrap();
        let loaded = read_profile(path).unwrap();

        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_output_is_camel_case() {
        let json = profile_to_string(&create_test_profile()).unwrap();
        assert!(json.contains("\"numTicks\": 5"));
        assert!(json.contains("\"sampleRate\": 100"));
        assert!(!json.contains("leftTicks"));
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/profile.json");

        write_profile(&create_test_profile(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_profile("/definitely/not/here.json"),
            Err(OutputError::Io(_))
        ));
    }
}
