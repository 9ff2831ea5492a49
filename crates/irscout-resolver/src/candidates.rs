//! Candidate IR URL generation.

/// Subdomains guessed on `<ticker>.com`.
pub const GUESSED_SUBDOMAINS: [&str; 3] = ["investor", "ir", "investors"];

/// Paths appended to a discovered company website.
pub const IR_PATHS: [&str; 4] = ["/investors", "/ir", "/investor-relations", "/newsroom"];

/// Candidate URLs for `ticker`, in generation order.
///
/// Always includes the three subdomain guesses of `<ticker>.com`. When a
/// company website is known, it is added bare and with each IR path.
#[must_use]
pub fn candidate_urls(ticker: &str, company_site: Option<&str>) -> Vec<String> {
    let domain = format!("{}.com", ticker.trim().to_lowercase());
    let mut urls: Vec<String> = GUESSED_SUBDOMAINS
        .iter()
        .map(|sub| format!("https://{sub}.{domain}"))
        .collect();

    if let Some(site) = company_site {
        let site = site.trim().trim_end_matches('/');
        if !site.is_empty() {
            urls.push(site.to_string());
            urls.extend(IR_PATHS.iter().map(|path| format!("{site}{path}")));
        }
    }

    urls
}
