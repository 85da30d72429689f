//! Tracked search URL construction.
//!
//! The marketplace's search endpoint only behaves like an organic search
//! when the URL carries the full set of referral parameters a real session
//! would have: static campaign/channel identifiers plus per-request session
//! ids in the site's own format (base-36-ish lowercase alphanumerics).
//! Missing session parameters get the request bounced to the landing page.

use crate::search::SearchError;
use rand::Rng;
use url::Url;

/// Search endpoint on the comparison marketplace.
pub const SEARCH_ENDPOINT: &str = "https://www.temu.com/search_result.html";

/// Affiliate channel identifiers. Fixed per deployment, not per request.
const ADS_CHANNEL: &str = "kol_affiliate";
const CAMPAIGN: &str = "affiliate";
const CAMPAIGN_ID: &str = "2000534466kol_affiliate";

/// Referrer-page constants observed in organic search sessions.
const REFER_PAGE_NAME: &str = "kuiper";
const REFER_PAGE_EL_SN: &str = "200010";
const REFER_PAGE_SN: &str = "13870";
const ENTER_SOURCE: &str = "top_search_entrance_13870";

/// Build the tracked search URL for a non-empty query.
pub fn build_search_url(query: &str) -> Result<Url, SearchError> {
    if query.trim().is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let mut url = Url::parse(SEARCH_ENDPOINT)?;
    let refer_page_id = format!(
        "{}_{}_{}",
        REFER_PAGE_SN,
        chrono::Utc::now().timestamp_millis(),
        session_token(11)
    );

    url.query_pairs_mut()
        .append_pair("search_key", query)
        .append_pair("_x_ads_channel", ADS_CHANNEL)
        .append_pair("_x_campaign", CAMPAIGN)
        .append_pair("_x_cid", CAMPAIGN_ID)
        .append_pair("search_method", "user")
        .append_pair("refer_page_name", REFER_PAGE_NAME)
        .append_pair("refer_page_el_sn", REFER_PAGE_EL_SN)
        .append_pair("srch_enter_source", ENTER_SOURCE)
        .append_pair("refer_page_sn", REFER_PAGE_SN)
        .append_pair("refer_page_id", &refer_page_id)
        .append_pair("_x_sessn_id", &session_token(10));

    Ok(url)
}

/// Random lowercase-alphanumeric token in the site's session-id format.
fn session_token(len: usize) -> String {
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_rejects_empty_query() {
        assert!(matches!(build_search_url(""), Err(SearchError::EmptyQuery)));
        assert!(matches!(build_search_url("   "), Err(SearchError::EmptyQuery)));
    }

    #[test]
    fn test_url_carries_query_and_tracking() {
        let url = build_search_url("wireless earbuds").expect("valid query");
        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(params.get("search_key").map(String::as_str), Some("wireless earbuds"));
        assert_eq!(params.get("_x_ads_channel").map(String::as_str), Some(ADS_CHANNEL));
        assert_eq!(params.get("search_method").map(String::as_str), Some("user"));
        assert!(params.get("refer_page_id").is_some_and(|v| v.starts_with("13870_")));
        assert_eq!(params.get("_x_sessn_id").map(|v| v.len()), Some(10));
    }

    #[test]
    fn test_session_token_format() {
        let token = session_token(10);
        assert_eq!(token.len(), 10);
        assert!(token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
