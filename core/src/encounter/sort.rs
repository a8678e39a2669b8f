use relink_types::{ComputedPlayer, MeterColumn, SortDirection};

/// Numeric value a column sorts by.
pub fn column_value(player: &ComputedPlayer, column: MeterColumn) -> f64 {
    match column {
        MeterColumn::PartySlot => player.party_slot as f64,
        MeterColumn::Dps => player.player.dps,
        MeterColumn::TotalDamage => player.player.total_damage as f64,
        MeterColumn::Percentage => player.percentage,
        MeterColumn::Gauge => player.player.gauge,
    }
}

/// Return a new ordering of `players` by one column.
///
/// Stable in both directions: players with equal keys keep their relative
/// order. Which column is "currently selected" is the caller's concern.
pub fn sort_players(
    players: &[ComputedPlayer],
    column: MeterColumn,
    direction: SortDirection,
) -> Vec<ComputedPlayer> {
    let mut sorted = players.to_vec();
    sorted.sort_by(|a, b| {
        let ord = column_value(a, column).total_cmp(&column_value(b, column));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}
