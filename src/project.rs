use chrono::Duration;

use crate::record::CompletedRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub total_time: Duration,
}

pub fn aggregate(records: &[CompletedRecord]) -> Vec<Project> {
    let mut projects: Vec<Project> = Vec::new();

    for record in records {
        let duration = record.end - record.start;
        match projects
            .iter_mut()
            .find(|project| project.name == record.project)
        {
            Some(project) => project.total_time += duration,
            None => projects.push(Project {
                name: record.project.clone(),
                total_time: duration,
            }),
        }
    }

    // Stable sort: projects with equal totals keep first-encounter order.
    projects.sort_by(|left, right| right.total_time.cmp(&left.total_time));
    projects
}

pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.num_seconds();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if seconds > 0 {
        parts.push(format!("{seconds}s"));
    }

    if parts.is_empty() {
        return "0s".to_string();
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

    use crate::record::CompletedRecord;

    use super::{Project, aggregate, format_duration};

    fn a_timestamp(hour: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2022, 10, 8, hour, 0, 0)
            .single()
            .expect("timestamp should be valid")
            .fixed_offset()
    }

    fn a_record(id: u64, project: &str, start_hour: u32, end_hour: u32) -> CompletedRecord {
        CompletedRecord {
            id,
            project: project.to_string(),
            start: a_timestamp(start_hour),
            end: a_timestamp(end_hour),
        }
    }

    #[test]
    fn sums_records_by_project() {
        let records = [
            a_record(1, "foo", 0, 2),
            a_record(2, "bar", 2, 4),
            a_record(3, "foo", 4, 7),
        ];

        let projects = aggregate(&records);

        assert_eq!(
            projects,
            vec![
                Project {
                    name: "foo".to_string(),
                    total_time: Duration::hours(5),
                },
                Project {
                    name: "bar".to_string(),
                    total_time: Duration::hours(2),
                },
            ]
        );
    }

    #[test]
    fn sorts_projects_by_total_time() {
        let records = [
            a_record(1, "foo", 0, 2),
            a_record(2, "bar", 2, 7),
            a_record(3, "foo", 7, 8),
        ];

        let projects = aggregate(&records);

        assert_eq!(
            projects,
            vec![
                Project {
                    name: "bar".to_string(),
                    total_time: Duration::hours(5),
                },
                Project {
                    name: "foo".to_string(),
                    total_time: Duration::hours(3),
                },
            ]
        );
    }

    #[test]
    fn equal_totals_keep_first_encounter_order() {
        let records = [
            a_record(1, "foo", 0, 2),
            a_record(2, "bar", 2, 4),
            a_record(3, "baz", 4, 6),
        ];

        let projects = aggregate(&records);
        let names = projects
            .iter()
            .map(|project| project.name.as_str())
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["foo", "bar", "baz"]);
    }

    #[test]
    fn project_names_match_case_sensitively() {
        let records = [a_record(1, "Foo", 0, 2), a_record(2, "foo", 2, 3)];

        let projects = aggregate(&records);

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "Foo");
        assert_eq!(projects[1].name, "foo");
    }

    #[test]
    fn aggregates_nothing_from_no_records() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn formats_durations_without_zero_components() {
        let cases = [
            (10, "10s"),
            (70, "1m 10s"),
            (230, "3m 50s"),
            (3680, "1h 1m 20s"),
            (3601, "1h 1s"),
            (7200, "2h"),
            (0, "0s"),
        ];

        for (seconds, expected) in cases {
            assert_eq!(format_duration(Duration::seconds(seconds)), expected);
        }
    }
}
