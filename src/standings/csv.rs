use super::models::Standing;
use crate::attendee::MAX_AWARDS;

const HEADER: [&str; 12] = [
    "rank",
    "name",
    "faction",
    "allies",
    "wins",
    "draws",
    "losses",
    "routed",
    "army_list",
    "award_1",
    "award_2",
    "award_3",
];

/// Quotes a cell containing a quote, comma or line break, doubling inner quotes
pub fn escape_cell(cell: &str) -> String {
    if cell.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn write_row(out: &mut String, cells: &[String]) {
    let line: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

/// Results submission file, one line per standing in rank order
pub fn render_results_csv(standings: &[Standing]) -> String {
    let mut out = String::new();
    write_row(&mut out, &HEADER.map(String::from));

    for standing in standings {
        let mut cells = vec![
            standing.rank.to_string(),
            standing.name.clone(),
            standing.faction.clone(),
            standing.allies.clone().unwrap_or_default(),
            standing.totals.wins.to_string(),
            standing.totals.draws.to_string(),
            standing.totals.losses.to_string(),
            standing.totals.routed_points.to_string(),
            standing.army_list_url.clone().unwrap_or_default(),
        ];
        cells.extend(
            (0..MAX_AWARDS).map(|i| standing.awards.get(i).cloned().unwrap_or_default()),
        );
        write_row(&mut out, &cells);
    }

    out
}
