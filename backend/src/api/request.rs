//! XML request documents sent to VIS

use crate::errors::Endpoint;

pub const LIST_FIELDS: &str = "Code Name CountryCode StartDate EndDate Gender Type";
pub const DETAIL_FIELDS: &str = "No Code Name CountryCode StartDate EndDate Gender Type \
Title City Venue Status PrizeMoney Season FederationCode";
const FALLBACK_FIELDS: &str = "No Code Name CountryCode StartDate EndDate Gender Type";

pub fn tournament_list_request(year: Option<i32>) -> String {
    let filter = year
        .map(|y| format!("<Filter Year=\"{}\" />", y))
        .unwrap_or_default();
    build_request(Endpoint::TournamentList, "", LIST_FIELDS, &filter)
}

pub fn tournament_detail_request(number: u32) -> String {
    let attrs = format!(" No=\"{}\"", number);
    build_request(Endpoint::TournamentDetail, &attrs, DETAIL_FIELDS, "")
}

pub fn tournament_fallback_request(number: u32) -> String {
    let filter = format!("<Filter No=\"{}\" />", number);
    build_request(Endpoint::TournamentFallback, "", FALLBACK_FIELDS, &filter)
}

fn build_request(endpoint: Endpoint, attrs: &str, fields: &str, inner: &str) -> String {
    let open = format!(
        "<Request Type=\"{}\"{} Fields=\"{}\"",
        endpoint.request_type(),
        attrs,
        fields
    );

    if inner.is_empty() {
        format!("<Requests>{} /></Requests>", open)
    } else {
        format!("<Requests>{}>{}</Request></Requests>", open, inner)
    }
}
