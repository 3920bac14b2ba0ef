use time::{Date, OffsetDateTime};

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Project as it appears in the archive name: trimmed, spaces turned into `_`.
/// `None` when blank.
pub fn project_slug(project_name: Option<&str>) -> Option<String> {
    project_name
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| p.replace(' ', "_"))
}

/// `photos_{project}_{YYYY-MM-DD}.zip` with the project slug;
/// `photos_{YYYY-MM-DD}.zip` without a (non-blank) project.
pub fn archive_file_name(project_name: Option<&str>, date: Date) -> String {
    match project_slug(project_name) {
        Some(project) => format!("photos_{project}_{date}.zip"),
        None => format!("photos_{date}.zip"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn with_project() {
        let name = archive_file_name(Some("Chantier Nord 2"), date!(2024 - 03 - 07));
        assert_eq!(name, "photos_Chantier_Nord_2_2024-03-07.zip");
    }

    #[test]
    fn without_project() {
        assert_eq!(
            archive_file_name(None, date!(2024 - 12 - 31)),
            "photos_2024-12-31.zip"
        );
        assert_eq!(
            archive_file_name(Some("   "), date!(2024 - 12 - 31)),
            "photos_2024-12-31.zip"
        );
    }

    #[test]
    fn slug_matches_file_name() {
        assert_eq!(
            project_slug(Some(" Chantier Nord ")).as_deref(),
            Some("Chantier_Nord")
        );
        assert_eq!(project_slug(Some("")), None);
    }
}
