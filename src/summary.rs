use chrono::DateTime;

const HEADER: &str = "Item,Duration";

// Re-derives per-item totals straight from the raw note text, without going
// through the typed decode path. Rows that do not carry two parseable
// timestamps (including the active record's open row) are skipped.
pub fn summarize(note: &str) -> String {
    let mut totals: Vec<(String, f64)> = Vec::new();

    for line in note.split('\n') {
        if line.trim().is_empty() {
            continue;
        }

        let fields = line.split(',').collect::<Vec<_>>();
        if fields.len() < 4 {
            continue;
        }

        let item = fields[1];
        let (Ok(start), Ok(end)) = (
            DateTime::parse_from_rfc3339(fields[2]),
            DateTime::parse_from_rfc3339(fields[3]),
        ) else {
            continue;
        };

        let seconds = (end - start).num_milliseconds() as f64 / 1000.0;
        match totals.iter_mut().find(|(name, _)| name == item) {
            Some((_, total)) => *total += seconds,
            None => totals.push((item.to_string(), seconds)),
        }
    }

    totals.sort_by(|left, right| {
        right
            .1
            .partial_cmp(&left.1)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut output = String::from(HEADER);
    for (item, seconds) in totals {
        output.push('\n');
        output.push_str(&item);
        output.push(',');
        output.push_str(&(seconds.round() as i64).to_string());
    }

    output
}

#[cfg(test)]
mod tests {
    use super::summarize;

    #[test]
    fn computes_per_item_durations_sorted_descending() {
        let input = "5,3715,2023-04-03T13:50:03.357Z,2023-04-03T14:30:10.645Z
4,reviews,2023-04-03T13:29:32.027Z,2023-04-03T13:50:00.974Z
3,3659,2023-04-03T10:07:29.829Z,2023-04-03T10:19:54.459Z
2,meetings,2023-04-02T18:14:45.318Z,2023-04-02T18:39:26.453Z
1,reviews,2023-04-02T15:57:53.194Z,2023-04-02T16:26:54.916Z";

        let expected = "Item,Duration
reviews,2971
3715,2407
meetings,1481
3659,745";

        assert_eq!(summarize(input), expected);
    }

    #[test]
    fn skips_the_open_row_of_an_active_record() {
        let input = "2,xtra,2022-06-24T18:38:31Z,
1,libp2p,2022-06-24T16:35:15.000Z,2022-06-24T17:35:15.000Z";

        assert_eq!(summarize(input), "Item,Duration\nlibp2p,3600");
    }

    #[test]
    fn summarizes_an_empty_note_to_a_bare_header() {
        assert_eq!(summarize(""), "Item,Duration");
        assert_eq!(summarize("\n\n"), "Item,Duration");
    }
}
