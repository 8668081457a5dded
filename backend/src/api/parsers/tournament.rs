use log::debug;
use roxmltree::Document;

use super::fields::{field, parse_date};
use crate::domain::{Gender, Tournament};

pub const TOURNAMENT_TAG: &str = "BeachTournament";

/// Tournaments accepted from one VIS list response
#[derive(Debug, Default)]
pub struct ParsedTournaments {
    pub tournaments: Vec<Tournament>,
    pub dropped: usize,
}

/// Parse a GetBeachTournamentList response.
///
/// Records with a missing field, an unknown gender or an unparseable date are
/// skipped; only malformed XML fails the whole batch. The result is sorted by
/// start date.
pub fn parse_tournament_list(xml: &str) -> Result<ParsedTournaments, String> {
    let document = Document::parse(xml).map_err(|e| format!("Invalid VIS XML: {}", e))?;

    let mut parsed = ParsedTournaments::default();

    for node in document
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == TOURNAMENT_TAG)
    {
        match parse_tournament(node) {
            Some(tournament) => parsed.tournaments.push(tournament),
            None => parsed.dropped += 1,
        }
    }

    if parsed.dropped > 0 {
        debug!("Dropped {} incomplete tournament records", parsed.dropped);
    }

    parsed.tournaments.sort_by_key(|t| t.start_date);
    Ok(parsed)
}

fn parse_tournament(node: roxmltree::Node) -> Option<Tournament> {
    let code = field(node, "Code")?;
    let name = field(node, "Name")?;
    let country_code = field(node, "CountryCode")?;
    let start_date = parse_date(&field(node, "StartDate")?)?;
    let end_date = parse_date(&field(node, "EndDate")?)?;
    let gender: Gender = field(node, "Gender")?.parse().ok()?;
    let tournament_type = field(node, "Type")?;

    Some(Tournament {
        code,
        name,
        country_code,
        start_date,
        end_date,
        gender,
        tournament_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(code: &str, start: &str, gender: &str) -> String {
        format!(
            r#"<BeachTournament Code="{code}" Name="Open {code}" CountryCode="BRA" StartDate="{start}" EndDate="{start}" Gender="{gender}" Type="Elite16" />"#
        )
    }

    fn response(records: &[String]) -> String {
        format!(
            "<Responses><BeachTournaments>{}</BeachTournaments></Responses>",
            records.join("")
        )
    }

    #[test]
    fn test_valid_records_sorted_by_start_date() {
        let xml = response(&[
            record("C", "2025-09-01", "Women"),
            record("A", "2025-03-15", "Men"),
            record("B", "2025-05-20", "Mixed"),
        ]);

        let parsed = parse_tournament_list(&xml).unwrap();
        let codes: Vec<&str> = parsed.tournaments.iter().map(|t| t.code.as_str()).collect();

        assert_eq!(codes, vec!["A", "B", "C"]);
        assert_eq!(parsed.dropped, 0);
        assert_eq!(parsed.tournaments[0].start_date, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        assert_eq!(parsed.tournaments[1].gender, Gender::Mixed);
        assert_eq!(parsed.tournaments[0].tournament_type, "Elite16");
    }

    #[test]
    fn test_invalid_records_dropped_without_failing_batch() {
        let xml = response(&[
            record("OK", "2025-04-01", "Men"),
            record("BADGENDER", "2025-04-02", "Juniors"),
            record("BADDATE", "2025-13-40", "Women"),
            r#"<BeachTournament Code="NONAME" CountryCode="USA" StartDate="2025-01-01" EndDate="2025-01-02" Gender="Men" Type="Open" />"#.to_string(),
            r#"<BeachTournament Code="EMPTYTYPE" Name="x" CountryCode="USA" StartDate="2025-01-01" EndDate="2025-01-02" Gender="Men" Type="" />"#.to_string(),
        ]);

        let parsed = parse_tournament_list(&xml).unwrap();

        assert_eq!(parsed.tournaments.len(), 1);
        assert_eq!(parsed.tournaments[0].code, "OK");
        assert_eq!(parsed.dropped, 4);
    }

    #[test]
    fn test_child_element_fields() {
        let xml = r#"<Responses><BeachTournament>
                <Code>MGSTAAD2025</Code>
                <Name>Gstaad Elite16</Name>
                <CountryCode>SUI</CountryCode>
                <StartDate>2025-07-08</StartDate>
                <EndDate>2025-07-13</EndDate>
                <Gender>Men</Gender>
                <Type>Elite16</Type>
            </BeachTournament></Responses>"#;

        let parsed = parse_tournament_list(xml).unwrap();
        assert_eq!(parsed.tournaments.len(), 1);
        assert_eq!(parsed.tournaments[0].country_code, "SUI");
    }

    #[test]
    fn test_empty_and_malformed_documents() {
        let empty = parse_tournament_list("<Responses><BeachTournaments /></Responses>").unwrap();
        assert!(empty.tournaments.is_empty());

        assert!(parse_tournament_list("<Responses><BeachTournament").is_err());
        assert!(parse_tournament_list("").is_err());
    }
}
