//! Locating the grid font on disk.
//!
//! One resolution order for every platform:
//!
//! 1. `family` itself, when it is an absolute path to a file.
//! 2. Configured search directories, scanned recursively.
//! 3. Platform font directories (DirectWrite first on Windows).
//! 4. Configured fallback paths, in order.
//!
//! Within a set of directories, `.ttf`/`.otf` files are ranked by how well
//! their stem matches the family: exact, then `<family>-Regular`, then any
//! stem containing the family. Ties go to the lexically smallest path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::FontConfig;

use super::FontError;

/// Font bytes read from disk, shared by every session built from them.
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
    data: Arc<Vec<u8>>,
}

impl FontFile {
    /// Read a font file into memory.
    pub fn read(path: &Path) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self::from_bytes(path.to_owned(), data))
    }

    /// Wrap bytes that are already in memory.
    pub fn from_bytes(path: PathBuf, data: Vec<u8>) -> Self {
        Self {
            path,
            data: Arc::new(data),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &Arc<Vec<u8>> {
        &self.data
    }
}

/// Font lookup settings taken from `[font]` config.
#[derive(Debug, Clone)]
pub struct FontSource {
    family: String,
    search_dirs: Vec<PathBuf>,
    fallback_paths: Vec<PathBuf>,
    /// Whether to scan the platform directories. Off in tests.
    system_fonts: bool,
}

impl FontSource {
    pub fn new(config: &FontConfig) -> Self {
        Self {
            family: config.family.clone(),
            search_dirs: config.search_dirs.clone(),
            fallback_paths: config.fallback_paths.clone(),
            system_fonts: true,
        }
    }

    /// Skip platform font directories; only configured locations are used.
    pub fn without_system_fonts(mut self) -> Self {
        self.system_fonts = false;
        self
    }

    /// Resolve and read the font file.
    pub fn locate(&self) -> Result<FontFile, FontError> {
        let path = self.resolve().ok_or_else(|| FontError::NotFound {
            family: self.family.clone(),
        })?;
        log::info!("font: using {}", path.display());
        FontFile::read(&path)
    }

    /// Resolve the font path without reading it.
    pub fn resolve(&self) -> Option<PathBuf> {
        let direct = Path::new(&self.family);
        if direct.is_absolute() && direct.is_file() {
            return Some(direct.to_owned());
        }

        if let Some(path) = find_in_dirs(&self.search_dirs, &self.family) {
            return Some(path);
        }

        if self.system_fonts {
            #[cfg(target_os = "windows")]
            if let Some(path) = resolve_font_dwrite(&self.family) {
                return Some(path);
            }
            if let Some(path) = find_in_dirs(&platform_font_dirs(), &self.family) {
                return Some(path);
            }
        }

        let fallback = self.fallback_paths.iter().find(|p| p.is_file()).cloned();
        if fallback.is_some() {
            log::warn!(
                "font: family {:?} not found, using fallback path",
                self.family
            );
        }
        fallback
    }
}

/// How well a file stem matches a family name. Lower is better.
fn match_rank(stem: &str, family: &str) -> Option<u8> {
    let stem = normalize(stem);
    let family = normalize(family);
    if family.is_empty() {
        return None;
    }
    if stem == family {
        Some(0)
    } else if stem.strip_prefix(family.as_str()) == Some("-regular") {
        Some(1)
    } else if stem.contains(family.as_str()) {
        Some(2)
    } else {
        None
    }
}

/// Lowercase with spaces removed, so "DejaVu Sans Mono" matches `DejaVuSansMono.ttf`.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"))
}

/// Best-ranked font file for `family` under any of `dirs`.
fn find_in_dirs(dirs: &[PathBuf], family: &str) -> Option<PathBuf> {
    let mut files = Vec::new();
    for dir in dirs {
        collect_font_files(dir, &mut files);
    }
    files
        .into_iter()
        .filter_map(|path| {
            let rank = match_rank(path.file_stem()?.to_str()?, family)?;
            Some((rank, path))
        })
        .min()
        .map(|(_, path)| path)
}

fn collect_font_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };
    // `file_type` does not follow symlinks, so linked directories are never
    // entered and a link cycle cannot recurse. Linked font files still count.
    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        if file_type.is_dir() {
            collect_font_files(&path, out);
        } else if is_font_file(&path) && (file_type.is_file() || path.is_file()) {
            out.push(path);
        } else {
            // Not a scalable outline font.
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn platform_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join(".fonts"));
        #[cfg(target_os = "macos")]
        dirs.push(home.join("Library/Fonts"));
    }
    dirs.push(PathBuf::from("/usr/share/fonts"));
    dirs.push(PathBuf::from("/usr/local/share/fonts"));
    #[cfg(target_os = "macos")]
    {
        dirs.push(PathBuf::from("/Library/Fonts"));
        dirs.push(PathBuf::from("/System/Library/Fonts"));
    }
    dirs
}

#[cfg(target_os = "windows")]
fn platform_font_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from(r"C:\Windows\Fonts")];
    if let Some(local) = std::env::var_os("LOCALAPPDATA") {
        dirs.push(PathBuf::from(local).join(r"Microsoft\Windows\Fonts"));
    }
    dirs
}

/// Resolve the regular face of a family via DirectWrite.
#[cfg(target_os = "windows")]
fn resolve_font_dwrite(family_name: &str) -> Option<PathBuf> {
    let collection = dwrote::FontCollection::system();
    let descriptor = dwrote::FontDescriptor {
        family_name: family_name.to_string(),
        weight: dwrote::FontWeight::Regular,
        stretch: dwrote::FontStretch::Normal,
        style: dwrote::FontStyle::Normal,
    };
    let font = collection
        .font_from_descriptor(&descriptor)
        .ok()
        .flatten()?;
    let face = font.create_font_face();
    let files = face.files().ok()?;
    let file = files.first()?;
    file.font_file_path().ok()
}
