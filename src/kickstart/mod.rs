//! Generated kickstart include files.
//!
//! The installer `%include`s these from the output directory:
//!
//! | Artifact               | File                      |
//! |------------------------|---------------------------|
//! | Kickstart              | `stig-fix`                |
//! | PreInstall             | `stig-fix-post-nochroot`  |
//! | PostInstall            | `stig-fix-post`           |
//! | Packages               | `stig-fix-packages`       |
//! | ClassificationBanner   | `classification-banner`   |
//! | SiteChoice             | `system-choice`           |

pub mod emitter;

pub use emitter::emit;

use crate::error::Result;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter};

/// Where the installer looks for the include files.
pub const DEFAULT_OUTPUT_DIR: &str = "/tmp";

/// One generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, EnumIter)]
pub enum Artifact {
    Kickstart,
    PreInstall,
    PostInstall,
    Packages,
    ClassificationBanner,
    SiteChoice,
}

impl Artifact {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Kickstart => "stig-fix",
            Self::PreInstall => "stig-fix-post-nochroot",
            Self::PostInstall => "stig-fix-post",
            Self::Packages => "stig-fix-packages",
            Self::ClassificationBanner => "classification-banner",
            Self::SiteChoice => "system-choice",
        }
    }
}

/// Rendered artifacts in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    files: Vec<(Artifact, String)>,
}

impl ArtifactSet {
    pub(crate) fn push(&mut self, artifact: Artifact, content: String) {
        self.files.push((artifact, content));
    }

    pub fn get(&self, artifact: Artifact) -> Option<&str> {
        self.files
            .iter()
            .find(|(a, _)| *a == artifact)
            .map(|(_, content)| content.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Artifact, &str)> {
        self.files.iter().map(|(a, c)| (*a, c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write every artifact into `dir`, replacing existing files.
    pub fn write_all<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.files.len());
        for (artifact, content) in &self.files {
            let path = dir.join(artifact.file_name());
            let mut file = create_private(&path)?;
            file.write_all(content.as_bytes())?;
            tracing::debug!("Wrote {} ({} bytes) to {:?}", artifact, content.len(), path);
            written.push(path);
        }
        tracing::info!("Wrote {} kickstart artifact(s) to {:?}", written.len(), dir);
        Ok(written)
    }
}

/// Open `path` for writing, owner-only before any byte lands in it: the
/// kickstart carries the password hash and LUKS passphrase.
#[cfg(unix)]
fn create_private(path: &Path) -> Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> Result<File> {
    Ok(OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?)
}
