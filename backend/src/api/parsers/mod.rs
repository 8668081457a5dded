mod detail;
mod fields;
mod tournament;

pub use detail::parse_tournament_detail;
pub use tournament::{parse_tournament_list, ParsedTournaments};
