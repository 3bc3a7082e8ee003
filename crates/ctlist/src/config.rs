use crate::{Error, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "https://crt.sh";

// region:        --- Config

/// How the lookup response is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// `<endpoint>/json?q=<domain>`, one common name per certificate record.
    Json,
    /// `<endpoint>/?q=<domain>`, names scraped from the results table.
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Domain(String),
    File(PathBuf),
}

/// Everything a run needs, built once from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: Input,
    pub output_dir: Option<PathBuf>,
    pub mode: ParseMode,
    pub endpoint: String,
    pub write_files: bool,
    pub save_logs: bool,
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let domain = matches
            .get_one::<String>("domain")
            .map(|domain| domain.trim())
            .filter(|domain| !domain.is_empty());
        let file = matches.get_one::<PathBuf>("file");

        let input = match (domain, file) {
            (Some(domain), _) => Input::Domain(domain.to_string()),
            (None, Some(file)) => Input::File(file.clone()),
            (None, None) => {
                return Err(Error::CliUsage(
                    "Hata: Dosya yolu ya da domain adresi belirtilmedi!".to_string(),
                ))
            }
        };

        let mode = match matches.get_one::<String>("mode").map(String::as_str) {
            Some("html") => ParseMode::Html,
            _ => ParseMode::Json,
        };

        let endpoint = matches
            .get_one::<String>("endpoint")
            .map(|endpoint| endpoint.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Ok(Self {
            input,
            output_dir: matches.get_one::<PathBuf>("output").cloned(),
            mode,
            endpoint,
            write_files: !matches.get_flag("no-file"),
            save_logs: matches.get_flag("logs"),
        })
    }

    /// The domains to query, in input order.
    pub fn domains(&self) -> Result<Vec<String>> {
        match &self.input {
            Input::Domain(domain) => Ok(vec![domain.clone()]),
            Input::File(path) => read_domains(path),
        }
    }
}

// endregion:     --- Config

// region:        --- Command line

pub fn command() -> Command {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about("List subdomains seen in certificate transparency logs")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("Domain listesi içeren dosya yolu")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("domain")
                .short('d')
                .long("domain")
                .help("Domain adı")
                .value_name("DOMAIN")
                .conflicts_with("file"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Sonuçların yazılacağı dizin (boş bırakılırsa mevcut dizin kullanılır)")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .help("How the lookup response is parsed")
                .value_name("MODE")
                .value_parser(["json", "html"])
                .default_value("json"),
        )
        .arg(
            Arg::new("endpoint")
                .short('e')
                .long("endpoint")
                .help("Certificate transparency lookup service")
                .value_name("URL")
                .default_value(DEFAULT_ENDPOINT),
        )
        .arg(
            Arg::new("no-file")
                .long("no-file")
                .action(ArgAction::SetTrue)
                .help("Only print results, do not write <domain>.txt files"),
        )
        .arg(
            Arg::new("logs")
                .short('s')
                .long("logs")
                .action(ArgAction::SetTrue)
                .help("Save logs into a .log file"),
        )
}

// endregion:     --- Command line

// region:        --- Domain list

pub fn read_domains(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    domains_from_reader(BufReader::new(file))
}

/// One domain per line, trimmed. Blank lines are skipped.
pub fn domains_from_reader<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut domains = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let domain = line.trim();
        if !domain.is_empty() {
            domains.push(domain.to_string());
        }
    }
    Ok(domains)
}

// endregion:     --- Domain list

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn config_from(args: &[&str]) -> Result<Config> {
        let matches = command().try_get_matches_from(args.iter().copied()).unwrap();
        Config::from_matches(&matches)
    }

    #[test]
    fn single_domain_with_defaults() {
        let config = config_from(&["ctlist", "-d", "  example.com "]).unwrap();

        assert_eq!(config.input, Input::Domain("example.com".to_string()));
        assert_eq!(config.mode, ParseMode::Json);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.output_dir, None);
        assert!(config.write_files);
        assert!(!config.save_logs);
        assert_eq!(config.domains().unwrap(), vec!["example.com"]);
    }

    #[test]
    fn batch_file_with_all_options() {
        let config = config_from(&[
            "ctlist",
            "--file",
            "domains.txt",
            "-o",
            "./out",
            "--mode",
            "html",
            "-e",
            "http://127.0.0.1:8080/",
            "--no-file",
            "--logs",
        ])
        .unwrap();

        assert_eq!(config.input, Input::File(PathBuf::from("domains.txt")));
        assert_eq!(config.output_dir, Some(PathBuf::from("./out")));
        assert_eq!(config.mode, ParseMode::Html);
        assert_eq!(config.endpoint, "http://127.0.0.1:8080");
        assert!(!config.write_files);
        assert!(config.save_logs);
    }

    #[test]
    fn missing_input_is_a_usage_error() {
        assert!(matches!(config_from(&["ctlist"]), Err(Error::CliUsage(_))));
        assert!(matches!(
            config_from(&["ctlist", "-d", "   ", "-o", "out"]),
            Err(Error::CliUsage(_))
        ));
    }

    #[test]
    fn domain_and_file_conflict() {
        let res = command().try_get_matches_from(["ctlist", "-d", "a.com", "-f", "list.txt"]);
        assert!(res.is_err());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let res = command().try_get_matches_from(["ctlist", "-d", "a.com", "-m", "xml"]);
        assert!(res.is_err());
    }

    #[test]
    fn domain_list_skips_blank_lines() {
        let input = "example.com\n\n   \n  example.org  \n\t\nexample.net";
        let domains = domains_from_reader(Cursor::new(input)).unwrap();

        assert_eq!(domains, vec!["example.com", "example.org", "example.net"]);
    }

    #[test]
    fn domain_list_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domains.txt");
        std::fs::write(&path, "a.example\r\n\r\nb.example\r\n").unwrap();

        let config = config_from(&["ctlist", "-f", path.to_str().unwrap()]).unwrap();

        assert_eq!(config.domains().unwrap(), vec!["a.example", "b.example"]);
    }

    #[test]
    fn missing_domain_list_is_an_error() {
        let config = config_from(&["ctlist", "-f", "/nonexistent/ctlist/domains.txt"]).unwrap();
        assert!(matches!(config.domains(), Err(Error::File(_))));
    }
}
