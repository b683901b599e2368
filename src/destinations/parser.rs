use super::entities::{Destination, DestinationId};
use crate::presence::entities::AccountId;

/// Parse the compact `destination:id1,id2` format, one destination per line.
///
/// Blank lines, lines without a `:` and lines that end up without a
/// destination or without any account are skipped. A destination listed on
/// several lines keeps the accounts of all of them.
pub fn parse_destination_lines(text: &str) -> Vec<Destination> {
    let mut destinations: Vec<Destination> = Vec::new();

    for line in text.lines() {
        let Some((destination_part, accounts_part)) = line.split_once(':') else {
            continue;
        };

        let destination_id = destination_part.trim();
        let accounts = accounts_part
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(AccountId::from)
            .collect::<Vec<_>>();

        if destination_id.is_empty() || accounts.is_empty() {
            continue;
        }

        merge_destination(
            &mut destinations,
            Destination::new(DestinationId::new(destination_id), accounts),
        );
    }

    destinations
}

/// Add `destination` to `destinations`, merging watch lists on a repeated id.
pub fn merge_destination(destinations: &mut Vec<Destination>, destination: Destination) {
    match destinations.iter_mut().find(|d| d.id == destination.id) {
        Some(existing) => existing.extend(destination.accounts().iter().cloned()),
        None => destinations.push(destination),
    }
}
