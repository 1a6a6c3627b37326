//! Boundary validation for site registration input. Probe calls do their
//! own parsing; this only guards what enters a stored collection.

use anyhow::{Result, anyhow, bail};
use url::Url;

/// Validate a registration URL: absolute, http or https, with a host.
///
/// Private and internal hosts are deliberately allowed; intranet targets
/// are a primary use case.
pub fn validate_site_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|err| anyhow!("invalid URL: {err}"))?;

    match url.scheme() {
        "http" | "https" => {}
        other => bail!("unsupported scheme for a watched site: {other}"),
    }

    if url.host_str().is_none() {
        bail!("URL has no host");
    }

    Ok(url)
}
