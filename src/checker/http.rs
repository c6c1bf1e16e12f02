// src/checker/http.rs
// =============================================================================
// External link integrity checking.
//
// How it works:
// 1. Take every distinct link discovered during the crawl
// 2. Keep only external ones (different host than the seed)
// 3. Sort them and check at most `cap` of them with a HEAD request
//    (servers that reject HEAD with 405/501 are asked again with GET)
// 4. Status >= 400 -> BrokenLinkRecord "external"
//    Transport failure (timeout, DNS, TLS...) -> "external_error"
//
// Checks run one at a time with a short pause in between so third-party
// hosts are never hammered. Internal links are not re-checked here: the
// crawler already recorded the ones that failed.
// =============================================================================

use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::{is_internal, BrokenLinkRecord, LinkKind};
use crate::crawl::CancelFlag;
use crate::error::FetchError;
use crate::fetch::Fetcher;

/// Outcome of the link-integrity phase.
#[derive(Debug, Clone, Default)]
pub struct ExternalCheck {
    /// Distinct external links found in the corpus.
    pub external_found: usize,
    /// How many of them were actually requested.
    pub checked: usize,
    pub broken: Vec<BrokenLinkRecord>,
}

/// Checks up to `cap` external links.
///
/// `links` may contain internal links and duplicates; both are filtered here.
pub async fn check_external_links<'a, F, I>(
    fetcher: &F,
    seed: &Url,
    links: I,
    cap: usize,
    delay: Duration,
    cancel: &CancelFlag,
) -> ExternalCheck
where
    F: Fetcher + ?Sized,
    I: IntoIterator<Item = &'a Url>,
{
    let external: BTreeSet<&Url> = links
        .into_iter()
        .filter(|link| !is_internal(seed, link))
        .collect();

    let mut outcome = ExternalCheck {
        external_found: external.len(),
        ..ExternalCheck::default()
    };

    info!(
        "Checking {} of {} external link(s)",
        external.len().min(cap),
        external.len()
    );

    for link in external.into_iter().take(cap) {
        if cancel.is_cancelled() {
            info!("Link check cancelled after {} request(s)", outcome.checked);
            break;
        }

        if outcome.checked > 0 {
            tokio::time::sleep(delay).await;
        }
        outcome.checked += 1;

        match check_link(fetcher, link).await {
            Ok(status) if status >= 400 => {
                warn!(%link, status, "External link is broken");
                outcome
                    .broken
                    .push(BrokenLinkRecord::with_status(link, LinkKind::External, status));
            }
            Ok(status) => {
                debug!(%link, status, "External link ok");
            }
            Err(e) => {
                warn!(%link, error = %e, "External link check failed");
                outcome
                    .broken
                    .push(BrokenLinkRecord::with_error(link, LinkKind::ExternalError, &e));
            }
        }
    }

    outcome
}

// HEAD first; falls back to GET when the server does not support HEAD.
async fn check_link<F>(fetcher: &F, link: &Url) -> Result<u16, FetchError>
where
    F: Fetcher + ?Sized,
{
    match fetcher.head(link).await? {
        405 | 501 => {
            debug!(%link, "HEAD not supported, retrying with GET");
            fetcher.get(link).await.map(|page| page.status)
        }
        status => Ok(status),
    }
}
