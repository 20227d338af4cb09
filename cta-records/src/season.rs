/// Map a calendar month (1-12) to a season id (1-4).
///
/// December-February map to 1 (Winter), March-May to 2 (Spring),
/// June-August to 3 (Summer), September-November to 4 (Autumn).
pub fn season_of(month: u32) -> u32 {
    (month % 12) / 3 + 1
}

/// Human-readable name for a season id. Ids outside 1-4 yield "Unknown".
pub fn name_of(season: u32) -> &'static str {
    match season {
        1 => "Winter",
        2 => "Spring",
        3 => "Summer",
        4 => "Autumn",
        _ => "Unknown",
    }
}
