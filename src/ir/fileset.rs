use crate::ir::{EdamFile, FileType, SourceFile};
use crate::utils::{force_slash, parent_dir};

/// Source files and include directories resolved from an EDAM file list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fileset {
    pub files: Vec<SourceFile>,
    pub incdirs: Vec<String>,
}

impl Fileset {
    /// Include files contribute their directory instead of being compiled.
    pub fn resolve(files: &[EdamFile], force_slash_paths: bool) -> Self {
        let normalize = |path: &str| {
            if force_slash_paths {
                force_slash(path)
            } else {
                path.to_string()
            }
        };

        let mut fileset = Fileset::default();
        for f in files {
            if f.is_include_file {
                let incdir = match f.include_path.as_deref() {
                    Some(path) if !path.is_empty() => path.to_string(),
                    _ => parent_dir(&f.name),
                };
                let incdir = normalize(&incdir);
                if !fileset.incdirs.contains(&incdir) {
                    fileset.incdirs.push(incdir);
                }
            } else {
                fileset.files.push(SourceFile::new(
                    normalize(&f.name),
                    FileType::parse(&f.file_type),
                    f.logical_name.as_deref(),
                ));
            }
        }

        fileset
    }

    pub fn has_file_type<F>(&self, predicate: F) -> bool
    where
        F: Fn(&FileType) -> bool,
    {
        self.files.iter().any(|f| predicate(&f.file_type))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.has_file_type(|t| t.tag() == tag)
    }
}
