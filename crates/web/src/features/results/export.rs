use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use storage::models::ScopeLabel;
use storage::services::result_projection::{ResultRow, format_score};
use uuid::Uuid;

const HEADERS: [&str; 6] = [
    "Rank",
    "Participant ID",
    "Participant Name",
    "Final Score",
    "Jury Count",
    "Remarks",
];

/// `<Event>_<Category>_Results_<date>.csv` with every non-alphanumeric
/// character replaced by `_`.
pub fn export_file_name(label: &ScopeLabel, date: NaiveDate) -> String {
    format!(
        "{}_{}_Results_{}.csv",
        sanitize(&label.event_title),
        sanitize(&label.display_category()),
        date.format("%Y-%m-%d")
    )
}

fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Renders the results table as CSV, one line per row in ranked order.
///
/// Remarks are a JSON object keyed by jury name, empty when there are none.
pub fn render_csv(rows: &[ResultRow], remarks: &HashMap<Uuid, BTreeMap<String, String>>) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(HEADERS.join(","));

    for row in rows {
        let remarks = remarks
            .get(&row.participant_id)
            .filter(|r| !r.is_empty())
            .and_then(|r| serde_json::to_string(r).ok())
            .unwrap_or_default();

        let fields = [
            row.rank_label.clone(),
            row.participant_id.to_string(),
            row.participant_name.clone(),
            format_score(row.average_score),
            row.score_count.to_string(),
            remarks,
        ];

        lines.push(
            fields
                .iter()
                .map(|field| escape_field(field))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    lines.join("\n")
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn row(position: usize, name: &str, prize: Option<&str>, score: Option<i64>) -> ResultRow {
        ResultRow {
            position,
            rank_label: prize.map(str::to_string).unwrap_or_else(|| format!("#{}", position)),
            participant_id: Uuid::from_u128(position as u128),
            participant_name: name.to_string(),
            average_score: score.map(Decimal::from),
            score_count: if score.is_some() { 2 } else { 0 },
            prize_level: prize.map(str::to_string),
            prize_display_order: prize.map(|_| 1),
            is_finalized: false,
            jury_scores: Vec::new(),
        }
    }

    #[test]
    fn test_file_name_is_sanitized() {
        let label = ScopeLabel {
            event_title: "Spring Piano Cup 2025".to_string(),
            category_name: "Junior".to_string(),
            subcategory_name: "Age 8-10".to_string(),
        };
        let date = NaiveDate::from_ymd_opt(2025, 4, 12).unwrap();

        assert_eq!(
            export_file_name(&label, date),
            "Spring_Piano_Cup_2025_Junior___Age_8_10_Results_2025-04-12.csv"
        );
    }

    #[test]
    fn test_csv_rows_and_quoting() {
        let rows = vec![
            row(1, "Chopin, Frederic", Some("1st Place"), Some(95)),
            row(2, "Clara", None, None),
        ];
        let mut remarks = HashMap::new();
        remarks.insert(
            Uuid::from_u128(1),
            BTreeMap::from([("Jury A".to_string(), "Lovely \"rubato\"".to_string())]),
        );

        let csv = render_csv(&rows, &remarks);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Rank,Participant ID,Participant Name,Final Score,Jury Count,Remarks"
        );
        assert!(lines[1].starts_with(
            "1st Place,00000000-0000-0000-0000-000000000001,\"Chopin, Frederic\",95.00,2,"
        ));
        assert!(lines[1].ends_with(r#""{""Jury A"":""Lovely \""rubato\""""}""#));
        assert_eq!(
            lines[2],
            "#2,00000000-0000-0000-0000-000000000002,Clara,No Score,0,"
        );
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a\nb"), "\"a\nb\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
