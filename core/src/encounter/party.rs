use std::collections::HashMap;

use relink_types::{ComputedPlayer, PlayerRecord};

/// Assign party slots by ascending player id.
///
/// The slot is fixed by id order and survives any later sort or filter of the
/// returned list. Percentages start at 0.
pub fn order_party(players: &HashMap<u32, PlayerRecord>) -> Vec<ComputedPlayer> {
    let mut ordered: Vec<&PlayerRecord> = players.values().collect();
    ordered.sort_by_key(|p| p.id);

    ordered
        .into_iter()
        .enumerate()
        .map(|(slot, player)| ComputedPlayer {
            player: player.clone(),
            percentage: 0.0,
            party_slot: slot,
        })
        .collect()
}
