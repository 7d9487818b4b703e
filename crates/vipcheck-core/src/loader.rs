//! Declared state from a directory of declaration files

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use vipcheck_content::{DeclarationFormat, read_declaration};

use crate::config::{NameConvention, ValidatorConfig};
use crate::error::{Error, Result};
use crate::state::{ResourceName, RuleSequence, StateMapping};

/// Builds the declared [`StateMapping`] from declaration files.
///
/// Every immediate entry of the directory is treated as one declaration;
/// nothing is filtered by name or extension. Any unreadable or unparsable
/// entry aborts the whole load.
#[derive(Debug, Clone, Default)]
pub struct DeclarationLoader {
    naming: NameConvention,
}

impl DeclarationLoader {
    pub fn new(naming: NameConvention) -> Self {
        Self { naming }
    }

    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new(config.naming.clone())
    }

    /// Load every declaration in `dir`.
    ///
    /// Entries are processed in file-name order; when two files declare the
    /// same resource, the later one wins.
    pub fn load(&self, dir: &Path) -> Result<StateMapping> {
        let files = declaration_files(dir)?;
        let mut entries: BTreeMap<ResourceName, (PathBuf, RuleSequence)> = BTreeMap::new();

        for path in files {
            let (name, rules) = self.load_file(&path)?;
            if let Some((previous, _)) = entries.get(&name) {
                warn!(
                    resource = %name,
                    previous = %previous.display(),
                    current = %path.display(),
                    "Resource declared more than once, keeping the later file"
                );
            }
            entries.insert(name, (path, rules));
        }

        info!(count = entries.len(), dir = %dir.display(), "Loaded declared state");
        Ok(entries
            .into_iter()
            .map(|(name, (_, rules))| (name, rules))
            .collect())
    }

    /// Load one declaration file as a `(device name, rules)` pair
    pub fn load_file(&self, path: &Path) -> Result<(ResourceName, RuleSequence)> {
        let source = fs::read_to_string(path).map_err(|e| Error::unreadable(path, e))?;
        let format = DeclarationFormat::from_path(path);

        let declaration =
            read_declaration(format, &source).map_err(|source| Error::UnparsableDeclaration {
                path: path.to_path_buf(),
                source,
            })?;

        if declaration.is_unnamed() {
            return Err(Error::UnnamedDeclaration {
                path: path.to_path_buf(),
            });
        }

        let name = self
            .naming
            .resource_name(&declaration.name)
            .ok_or_else(|| Error::InvalidResourceName {
                path: path.to_path_buf(),
                name: declaration.name.clone(),
                convention: self.naming.clone(),
            })?
            .to_owned();

        debug!(
            file = %path.display(),
            format = format.name(),
            resource = %name,
            rules = declaration.rules.len(),
            "Parsed declaration"
        );
        Ok((name, declaration.rules))
    }
}

/// Immediate entries of `dir`, sorted by file name
pub fn declaration_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::unreadable(dir, e))? {
        let entry = entry.map_err(|e| Error::unreadable(dir, e))?;
        files.push(entry.path());
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, file: &str, content: &str) -> PathBuf {
        let path = dir.join(file);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_file_strips_partition() {
        let temp = TempDir::new().unwrap();
        let path = write(
            temp.path(),
            "web.tf",
            "resource \"bigip_ltm_virtual_server\" \"web\" {\n  name = \"/Common/web\"\n  irules = [\"/Common/a\"]\n}\n",
        );

        let (name, rules) = DeclarationLoader::default().load_file(&path).unwrap();
        assert_eq!(name, "web");
        assert_eq!(rules, vec!["/Common/a"]);
    }

    #[test]
    fn test_load_file_unnamed() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "anon.tf", "irules = [\"/Common/a\"]\n");

        let err = DeclarationLoader::default().load_file(&path).unwrap_err();
        assert!(matches!(err, Error::UnnamedDeclaration { .. }));
    }

    #[test]
    fn test_load_file_name_too_short() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "short.tf", "name = \"web\"\n");

        let err = DeclarationLoader::default().load_file(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidResourceName { ref name, .. } if name == "web"));
    }

    #[test]
    fn test_declaration_files_sorted() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b.tf", "");
        write(temp.path(), "a.tf", "");
        write(temp.path(), "c.tf.json", "");

        let names: Vec<_> = declaration_files(temp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.tf", "b.tf", "c.tf.json"]);
    }
}
