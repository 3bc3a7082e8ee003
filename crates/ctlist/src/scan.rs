use crate::config::Config;
use crate::model::{display_terminal, export_to_text, ResultSet};
use crate::sources::{self, CtSource, Module};
use crate::Result;
use reqwest::Client;
use std::fmt::Write as FmtWrite;
use tracing::{error, info, instrument, warn};

// region:        --- Summary

/// Counters over one run. Failures never stop the run, they end up here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub domains: usize,
    pub subdomains: usize,
    pub fetch_failures: usize,
    pub decode_warnings: usize,
    pub write_failures: usize,
}

impl Summary {
    pub fn render(&self) -> Result<String> {
        let mut content = String::new();
        writeln!(&mut content, "****** ÖZET ******")?;
        writeln!(&mut content, "Sorgulanan domain   : {}", self.domains)?;
        writeln!(&mut content, "Bulunan subdomain   : {}", self.subdomains)?;
        writeln!(&mut content, "İstek hatası        : {}", self.fetch_failures)?;
        writeln!(&mut content, "Çözümleme uyarısı   : {}", self.decode_warnings)?;
        writeln!(&mut content, "Yazma hatası        : {}", self.write_failures)?;
        Ok(content)
    }

    pub fn display(&self) -> Result<()> {
        print!("{}", self.render()?);
        Ok(())
    }
}

// endregion:     --- Summary

// region:        --- Run

/// Queries every domain in order. One domain is fetched, parsed, written and
/// printed before the next one starts.
#[instrument(name = "run", level = "info", skip_all, fields(mode = ?config.mode))]
pub async fn run(config: &Config, domains: &[String]) -> Result<Summary> {
    let http_client = sources::new_http_client()?;
    let source = sources::source_for(config.mode, &config.endpoint);
    info!("Using {} ({})", source.name(), source.description());

    let mut summary = Summary::default();

    println!("****** SONUÇLAR ******");
    for domain in domains {
        println!("Domain: {} için veri çekiliyor...", domain);

        let result = scan_domain(&http_client, source.as_ref(), domain, &mut summary).await;

        if config.write_files {
            match export_to_text(&result, config.output_dir.as_deref()) {
                Ok(path) => info!(
                    "{} için sonuçlar {} dosyasına kaydedildi.",
                    domain,
                    path.display()
                ),
                Err(err) => {
                    error!("Writing result of {}: {}", domain, err);
                    summary.write_failures += 1;
                }
            }
        }

        display_terminal(&result);

        summary.domains += 1;
        summary.subdomains += result.len();
    }

    info!("{} domains done", summary.domains);
    Ok(summary)
}

/// Fetch and parse one domain. A failure leaves the result empty and is
/// counted in `summary`.
#[instrument(name = "domain", level = "info", skip_all, fields(domain = domain))]
pub async fn scan_domain(
    http_client: &Client,
    source: &dyn CtSource,
    domain: &str,
    summary: &mut Summary,
) -> ResultSet {
    let mut result = ResultSet::new(domain);

    let body = match source.fetch(http_client, domain).await {
        Ok(body) => body,
        Err(err) => {
            error!("{}: {}", source.name(), err);
            summary.fetch_failures += 1;
            return result;
        }
    };

    match source.parse(&body, &mut result) {
        Ok(collected) => info!("{} subdomains collected", collected),
        Err(err) => {
            warn!("{}: {}", source.name(), err);
            summary.decode_warnings += 1;
        }
    }

    result
}

// endregion:     --- Run
