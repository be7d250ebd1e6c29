//! Persist a version string into a destination file

use crate::error::{Result, VersionerError};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Serialization of the version file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The bare version and a newline
    Plain,
    /// A Go source file declaring `const Version`
    Go,
    /// A C/C++ header defining `VERSION`
    Cpp,
    /// A YAML mapping with a `version` key
    Yaml,
}

#[derive(Serialize)]
struct VersionDocument<'a> {
    version: &'a str,
}

impl OutputFormat {
    /// File name used when no path, or only a directory, is given
    pub fn default_filename(&self) -> &'static str {
        match self {
            OutputFormat::Plain => ".VERSION",
            OutputFormat::Go => "version.go",
            OutputFormat::Cpp => "version.h",
            OutputFormat::Yaml => "version.yaml",
        }
    }

    /// Resolve the destination path from an optional user-supplied one
    ///
    /// A path ending in `/` names a directory.
    pub fn destination(&self, provided: Option<&str>) -> PathBuf {
        match provided {
            None | Some("") => PathBuf::from(self.default_filename()),
            Some(path) if path.ends_with('/') => Path::new(path).join(self.default_filename()),
            Some(path) => PathBuf::from(path),
        }
    }

    /// Render the file contents for `version`
    pub fn render(&self, version: &str) -> Result<String> {
        match self {
            OutputFormat::Plain => Ok(format!("{}\n", version)),
            OutputFormat::Go => Ok(format!(
                "package main\n\nconst Version = \"{}\"\n",
                version
            )),
            OutputFormat::Cpp => Ok(format!("#define VERSION \"{}\"\n", version)),
            OutputFormat::Yaml => serde_yaml::to_string(&VersionDocument { version })
                .map_err(|e| VersionerError::output(format!("Cannot serialize YAML: {}", e))),
        }
    }
}

/// A format plus where to write it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub format: OutputFormat,
    pub path: PathBuf,
}

impl OutputTarget {
    pub fn new(format: OutputFormat, provided: Option<&str>) -> Self {
        OutputTarget {
            format,
            path: format.destination(provided),
        }
    }
}

/// Write `version` to the target, creating parent directories as needed
///
/// The destination is replaced atomically: contents go to a temporary file
/// in the same directory which is then renamed over it.
pub fn write_version(target: &OutputTarget, version: &str) -> Result<()> {
    let contents = target.format.render(version)?;
    let path = &target.path;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let context = |e: std::io::Error| {
        VersionerError::output(format!("Cannot write '{}': {}", path.display(), e))
    };

    fs::create_dir_all(dir).map_err(context)?;

    let mut file = NamedTempFile::new_in(dir).map_err(context)?;
    file.write_all(contents.as_bytes()).map_err(context)?;
    file.flush().map_err(context)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(file.path(), fs::Permissions::from_mode(0o644)).map_err(context)?;
    }

    file.persist(path).map_err(|e| context(e.error))?;
    info!(path = %path.display(), "wrote version file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_formats() {
        assert_eq!(OutputFormat::Plain.render("v1.2.3").unwrap(), "v1.2.3\n");
        assert_eq!(
            OutputFormat::Go.render("v1.2.3").unwrap(),
            "package main\n\nconst Version = \"v1.2.3\"\n"
        );
        assert_eq!(
            OutputFormat::Cpp.render("v1.2.3").unwrap(),
            "#define VERSION \"v1.2.3\"\n"
        );
    }

    #[test]
    fn test_render_yaml_is_a_mapping() {
        let yaml = OutputFormat::Yaml.render("v1.2.3+5").unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["version"].as_str(), Some("v1.2.3+5"));
    }

    #[test]
    fn test_destination() {
        assert_eq!(OutputFormat::Go.destination(None), PathBuf::from("version.go"));
        assert_eq!(OutputFormat::Plain.destination(Some("")), PathBuf::from(".VERSION"));
        assert_eq!(
            OutputFormat::Cpp.destination(Some("include/")),
            PathBuf::from("include/version.h")
        );
        assert_eq!(
            OutputFormat::Yaml.destination(Some("meta/app.yaml")),
            PathBuf::from("meta/app.yaml")
        );
    }

    #[test]
    fn test_write_creates_parents_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/.VERSION");
        let target = OutputTarget {
            format: OutputFormat::Plain,
            path: path.clone(),
        };

        write_version(&target, "v1.0.0").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "v1.0.0\n");

        write_version(&target, "v1.0.0+1").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "v1.0.0+1\n");
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let target = OutputTarget {
            format: OutputFormat::Go,
            path: dir.path().join("version.go"),
        };
        write_version(&target, "v2.0.0").unwrap();

        let mode = fs::metadata(&target.path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_write_into_file_as_directory_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let target = OutputTarget {
            format: OutputFormat::Plain,
            path: blocker.join(".VERSION"),
        };
        assert!(matches!(
            write_version(&target, "v1.0.0"),
            Err(VersionerError::OutputWrite(_))
        ));
    }
}
