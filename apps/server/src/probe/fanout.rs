use futures::future::join_all;

use super::executor::ProbeExecutor;
use super::types::{ProbeMethod, SiteCheckReport};
use crate::models::Site;

/// Check every site concurrently and merge each with its outcome.
///
/// The result vector mirrors the input: same length, same positions,
/// regardless of the order in which the probes complete. Checks are fully
/// independent; one site timing out neither delays nor taints the others,
/// and because single probes self-resolve to values the batch as a whole
/// cannot fail. An empty collection resolves immediately.
pub async fn check_all(executor: &ProbeExecutor, sites: &[Site]) -> Vec<SiteCheckReport> {
    join_all(sites.iter().map(|site| async move {
        let result = executor.probe(&site.url, ProbeMethod::Head).await;
        SiteCheckReport { site: site.clone(), result }
    }))
    .await
}
