use roxmltree::{Document, Node};

use super::fields::{field, parse_date};
use super::tournament::TOURNAMENT_TAG;
use crate::domain::TournamentDetail;

/// Parse the `BeachTournament` element for `number` from a detail or fallback response.
///
/// Unlike the list parser nothing is required except the element itself: the
/// caller decides how complete the record is. An element without `No` is
/// accepted only when it is the sole tournament in the response. `Ok(None)`
/// means no element matched.
pub fn parse_tournament_detail(xml: &str, number: u32) -> Result<Option<TournamentDetail>, String> {
    let document = Document::parse(xml).map_err(|e| format!("Invalid VIS XML: {}", e))?;

    let nodes: Vec<Node> = document
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == TOURNAMENT_TAG)
        .collect();

    let matching = nodes
        .iter()
        .find(|n| record_number(**n) == Some(number))
        .or_else(|| match nodes.as_slice() {
            [only] if field(*only, "No").is_none() => Some(only),
            _ => None,
        });

    Ok(matching.map(|n| detail_from_node(*n, number)))
}

fn record_number(node: Node) -> Option<u32> {
    field(node, "No").and_then(|no| no.parse().ok())
}

fn detail_from_node(node: Node, number: u32) -> TournamentDetail {
    TournamentDetail {
        number,
        code: field(node, "Code"),
        name: field(node, "Name"),
        country_code: field(node, "CountryCode"),
        start_date: field(node, "StartDate").and_then(|d| parse_date(&d)),
        end_date: field(node, "EndDate").and_then(|d| parse_date(&d)),
        gender: field(node, "Gender").and_then(|g| g.parse().ok()),
        tournament_type: field(node, "Type"),
        title: field(node, "Title"),
        city: field(node, "City"),
        venue: field(node, "Venue"),
        status: field(node, "Status"),
        prize_money: field(node, "PrizeMoney"),
        season: field(node, "Season"),
        federation_code: field(node, "FederationCode"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;

    #[test]
    fn test_full_detail() {
        let xml = r#"<Responses><BeachTournament No="502" Code="WGSTAAD2025" Name="Gstaad" CountryCode="SUI"
            StartDate="2025-07-08" EndDate="2025-07-13" Gender="Women" Type="Elite16"
            Title="Beach Pro Tour Elite16 Gstaad" City="Gstaad" Venue="Roy Emerson Arena"
            Status="Running" PrizeMoney="300000" Season="2025" FederationCode="SUI" /></Responses>"#;

        let detail = parse_tournament_detail(xml, 502).unwrap().unwrap();

        assert_eq!(detail.number, 502);
        assert_eq!(detail.gender, Some(Gender::Women));
        assert_eq!(detail.city.as_deref(), Some("Gstaad"));
        assert_eq!(detail.prize_money.as_deref(), Some("300000"));
        assert!(detail.has_basic_fields());
    }

    #[test]
    fn test_partial_detail_keeps_requested_number() {
        let xml = r#"<Responses><BeachTournament Code="X1" Name="Somewhere Open" /></Responses>"#;

        let detail = parse_tournament_detail(xml, 77).unwrap().unwrap();

        assert_eq!(detail.number, 77);
        assert_eq!(detail.code.as_deref(), Some("X1"));
        assert!(!detail.has_basic_fields());
        assert_eq!(detail.title, None);
    }

    #[test]
    fn test_picks_record_with_requested_number() {
        let xml = r#"<Responses><BeachTournaments>
            <BeachTournament No="1" Code="OTHER" Name="Other Open" />
            <BeachTournament No="12" Code="MINE" Name="Mine Open" />
        </BeachTournaments></Responses>"#;

        let detail = parse_tournament_detail(xml, 12).unwrap().unwrap();

        assert_eq!(detail.number, 12);
        assert_eq!(detail.code.as_deref(), Some("MINE"));
    }

    #[test]
    fn test_other_numbers_only_is_none() {
        let xml = r#"<Responses><BeachTournament No="1" Code="OTHER" Name="Other Open" /></Responses>"#;
        assert_eq!(parse_tournament_detail(xml, 12).unwrap(), None);
    }

    #[test]
    fn test_unnumbered_record_needs_to_be_alone() {
        let xml = r#"<Responses><BeachTournaments>
            <BeachTournament Code="A" Name="First" />
            <BeachTournament Code="B" Name="Second" />
        </BeachTournaments></Responses>"#;
        assert_eq!(parse_tournament_detail(xml, 12).unwrap(), None);
    }

    #[test]
    fn test_no_tournament_element() {
        assert_eq!(parse_tournament_detail("<Responses />", 1).unwrap(), None);
    }
}
