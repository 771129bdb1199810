// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! XML manifest parser.
//!
//! ```text
//! <manifest>                      depth 0 -> 1
//!   <remote name fetch/>          -> remotes
//!   <default remote revision/>    -> defaults for this file
//!   <project name remote? revision? path?>
//!     <copyfile src dest/>        -> project.copyfiles
//!   </project>                    -> projects
//!   <include name/>               -> includes
//! </manifest>
//! ```
//!
//! Repeated and single elements both land in a `Vec`, so nothing downstream
//! checks cardinality. Unknown elements are ignored.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{CopyFile, IncludeRef, ProjectRef};
use crate::error::{InitResult, ManifestError};

/// A remote as declared in one manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub fetch: String,
}

/// `<default>` values applied to projects of the same file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDefaults {
    pub remote: Option<String>,
    pub revision: Option<String>,
}

/// One manifest file, parsed but not yet merged with its includes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestFile {
    pub remotes: Vec<Remote>,
    pub defaults: ManifestDefaults,
    pub projects: Vec<ProjectRef>,
    pub includes: Vec<IncludeRef>,
}

/// A `<project>` before `<default>` values are applied.
#[derive(Debug, Default)]
struct RawProject {
    name: Option<String>,
    remote: Option<String>,
    revision: Option<String>,
    path: Option<String>,
    copyfiles: Vec<CopyFile>,
}

/// Parse state shared by start and empty tags.
struct ParseContext<'a> {
    file: &'a str,
    manifest: ManifestFile,
    raw_projects: Vec<RawProject>,
    current_project: Option<RawProject>,
}

impl ManifestFile {
    /// Parse one manifest document. `file` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns a `ManifestError` if the XML is malformed, the root element is
    /// not `<manifest>`, no `<remote>` is declared, or a required attribute is
    /// missing.
    pub fn parse(file: &str, xml: &str) -> InitResult<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut ctx = ParseContext {
            file,
            manifest: Self::default(),
            raw_projects: Vec::new(),
            current_project: None,
        };
        let mut depth = 0usize;
        let mut saw_root = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    if depth == 0 {
                        ctx.check_root(e, saw_root)?;
                        saw_root = true;
                    } else {
                        ctx.element(e, depth, true)?;
                    }
                    depth += 1;
                }
                Ok(Event::Empty(ref e)) => {
                    if depth == 0 {
                        ctx.check_root(e, saw_root)?;
                        saw_root = true;
                    } else {
                        ctx.element(e, depth, false)?;
                    }
                }
                Ok(Event::End(ref e)) => {
                    depth = depth.saturating_sub(1);
                    if depth == 1
                        && e.name().as_ref() == b"project"
                        && let Some(project) = ctx.current_project.take()
                    {
                        ctx.raw_projects.push(project);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ManifestError::Parse {
                        file: file.to_string(),
                        message: format!(
                            "error at position {}: {e}",
                            reader.error_position()
                        ),
                    }
                    .into());
                }
                _ => {}
            }
        }

        if !saw_root {
            return Err(ManifestError::MissingRoot {
                file: file.to_string(),
            }
            .into());
        }
        if depth != 0 {
            return Err(ManifestError::Parse {
                file: file.to_string(),
                message: "unexpected end of document".to_string(),
            }
            .into());
        }

        ctx.finish()
    }
}

impl ParseContext<'_> {
    fn check_root(&self, e: &BytesStart<'_>, saw_root: bool) -> InitResult<()> {
        if saw_root {
            return Err(ManifestError::Parse {
                file: self.file.to_string(),
                message: "multiple root elements".to_string(),
            }
            .into());
        }
        if e.name().as_ref() != b"manifest" {
            return Err(ManifestError::MissingRoot {
                file: self.file.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Handle a start (`has_children`) or empty tag at `depth` (root = 0).
    fn element(&mut self, e: &BytesStart<'_>, depth: usize, has_children: bool) -> InitResult<()> {
        match (depth, e.name().as_ref()) {
            (1, b"remote") => {
                let remote = Remote {
                    name: self.require_attr(e, "remote", b"name")?,
                    fetch: self.require_attr(e, "remote", b"fetch")?,
                };
                self.manifest.remotes.push(remote);
            }
            (1, b"default") => {
                self.manifest.defaults = ManifestDefaults {
                    remote: self.get_attr(e, b"remote")?,
                    revision: self.get_attr(e, b"revision")?,
                };
            }
            (1, b"project") => {
                let project = RawProject {
                    name: self.get_attr(e, b"name")?,
                    remote: self.get_attr(e, b"remote")?,
                    revision: self.get_attr(e, b"revision")?,
                    path: self.get_attr(e, b"path")?,
                    copyfiles: Vec::new(),
                };
                if has_children {
                    self.current_project = Some(project);
                } else {
                    self.raw_projects.push(project);
                }
            }
            (1, b"include") => {
                let include = IncludeRef {
                    name: self.require_attr(e, "include", b"name")?,
                };
                self.manifest.includes.push(include);
            }
            (2, b"copyfile") if self.current_project.is_some() => {
                let copyfile = CopyFile {
                    src: self.require_attr(e, "copyfile", b"src")?,
                    dest: self.require_attr(e, "copyfile", b"dest")?,
                };
                if let Some(project) = self.current_project.as_mut() {
                    project.copyfiles.push(copyfile);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(mut self) -> InitResult<ManifestFile> {
        if self.manifest.remotes.is_empty() {
            return Err(ManifestError::MissingRemote {
                file: self.file.to_string(),
            }
            .into());
        }

        let projects = std::mem::take(&mut self.raw_projects)
            .into_iter()
            .map(|raw| self.apply_defaults(raw))
            .collect::<InitResult<Vec<_>>>()?;
        self.manifest.projects = projects;
        Ok(self.manifest)
    }

    fn apply_defaults(&self, raw: RawProject) -> InitResult<ProjectRef> {
        let defaults = &self.manifest.defaults;
        let name = raw.name.ok_or_else(|| self.missing("project", "name"))?;
        let remote = raw
            .remote
            .or_else(|| defaults.remote.clone())
            .ok_or_else(|| self.missing("project", "remote"))?;
        let revision = raw
            .revision
            .or_else(|| defaults.revision.clone())
            .ok_or_else(|| self.missing("project", "revision"))?;
        let path = raw.path.unwrap_or_else(|| name.clone());

        Ok(ProjectRef {
            name,
            remote,
            revision,
            path,
            copyfiles: raw.copyfiles,
        })
    }

    fn missing(&self, element: &str, attribute: &str) -> ManifestError {
        ManifestError::MissingAttribute {
            file: self.file.to_string(),
            element: element.to_string(),
            attribute: attribute.to_string(),
        }
    }

    fn get_attr(&self, e: &BytesStart<'_>, name: &[u8]) -> InitResult<Option<String>> {
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.invalid_attr(&err.to_string()))?;
            if attr.key.as_ref() == name {
                let value = attr
                    .unescape_value()
                    .map_err(|err| self.invalid_attr(&err.to_string()))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    fn require_attr(&self, e: &BytesStart<'_>, element: &str, name: &[u8]) -> InitResult<String> {
        self.get_attr(e, name)?
            .ok_or_else(|| self.missing(element, &String::from_utf8_lossy(name)).into())
    }

    fn invalid_attr(&self, message: &str) -> ManifestError {
        ManifestError::Parse {
            file: self.file.to_string(),
            message: format!("invalid attribute: {message}"),
        }
    }
}
