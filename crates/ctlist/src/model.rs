use crate::Result;
use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const NONE_FOUND: &str = "Alt domain bulunamadı.";
pub const TERMINAL_SEPARATOR: &str = "*********************";

// region:        --- Models

/// Unique subdomains collected for one queried domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    domain: String,
    subdomains: BTreeSet<String>,
}

impl ResultSet {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            subdomains: BTreeSet::new(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Stores the trimmed name. Blank names are rejected, returns `true` only
    /// when the name was not already present.
    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.subdomains.insert(name.to_string())
    }

    pub fn len(&self) -> usize {
        self.subdomains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subdomains.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.subdomains.iter().map(String::as_str)
    }
}

// endregion:     --- Models

// region:        --- Exporting utils

/// `<domain>.txt` inside `output_dir`, or the working directory when none.
pub fn result_path(domain: &str, output_dir: Option<&Path>) -> PathBuf {
    let filename = format!("{}.txt", domain.replace(['/', '\\'], "_"));
    match output_dir {
        Some(dir) => dir.join(filename),
        None => PathBuf::from(filename),
    }
}

pub fn render_text(result: &ResultSet) -> Result<String> {
    let mut content = String::new();
    writeln!(
        &mut content,
        "# {} domain adresi için bulunan benzersiz subdomainler:",
        result.domain()
    )?;
    writeln!(&mut content)?;

    if result.is_empty() {
        writeln!(&mut content, "{}", NONE_FOUND)?;
    } else {
        for subdomain in result.iter() {
            writeln!(&mut content, "{}", subdomain)?;
        }
    }

    Ok(content)
}

/// Writes the result file, truncating any previous one, and returns its path.
pub fn export_to_text(result: &ResultSet, output_dir: Option<&Path>) -> Result<PathBuf> {
    let path = result_path(result.domain(), output_dir);
    let content = render_text(result)?;

    let mut file = File::create(&path)?;
    file.write_all(content.as_bytes())?;
    Ok(path)
}

pub fn render_terminal(result: &ResultSet) -> String {
    if result.is_empty() {
        return format!("{}\n", NONE_FOUND);
    }

    let mut lines: Vec<&str> = result.iter().collect();
    lines.push(TERMINAL_SEPARATOR);
    lines.join("\n") + "\n"
}

pub fn display_terminal(result: &ResultSet) {
    print!("{}", render_terminal(result));
}

// endregion:     --- Exporting utils
