use serde::Deserialize;

/// Language reported for repositories that GitHub could not classify.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// A repository item as it appears in the search API payload.
///
/// The nullable fields are exactly the ones GitHub omits or sends as `null` in practice.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepository {
    pub name: String,
    pub html_url: String,
    pub fork: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    pub archived: bool,
    #[serde(default)]
    pub visibility: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub pushed_at: Option<String>,
    pub size: u64,
}

/// A normalized repository record. Every field is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRecord {
    pub name: String,
    pub url: String,
    pub is_fork: bool,
    pub is_archived: bool,
    pub description: String,
    /// Primary language, or [`UNKNOWN_LANGUAGE`].
    pub language: String,
    pub visibility: String,
    pub created_at: String,
    pub updated_at: String,
    pub pushed_at: String,
    /// Storage size in KiB, as reported by the server.
    pub size_kib: u64,
}

/// Fill in the defaults for a raw repository item.
///
/// A missing or empty language becomes [`UNKNOWN_LANGUAGE`]; the other nullable fields become empty strings.
#[must_use]
pub fn normalize(raw: RawRepository) -> RepositoryRecord {
    let language = raw
        .language
        .filter(|language| !language.is_empty())
        .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string());

    RepositoryRecord {
        name: raw.name,
        url: raw.html_url,
        is_fork: raw.fork,
        is_archived: raw.archived,
        description: raw.description.unwrap_or_default(),
        language,
        visibility: raw.visibility.unwrap_or_default(),
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        pushed_at: raw.pushed_at.unwrap_or_default(),
        size_kib: raw.size,
    }
}

impl From<RawRepository> for RepositoryRecord {
    fn from(raw: RawRepository) -> Self {
        normalize(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RawRepository {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_normalize_complete_item() {
        let raw = parse(
            r#"{
                "name": "gh-langs",
                "html_url": "https://github.com/octocat/gh-langs",
                "fork": false,
                "description": "Language statistics",
                "language": "Rust",
                "archived": true,
                "visibility": "public",
                "created_at": "2023-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z",
                "pushed_at": "2024-02-01T00:00:00Z",
                "size": 512
            }"#,
        );

        let record = normalize(raw);
        assert_eq!(record.name, "gh-langs");
        assert_eq!(record.url, "https://github.com/octocat/gh-langs");
        assert!(!record.is_fork);
        assert!(record.is_archived);
        assert_eq!(record.description, "Language statistics");
        assert_eq!(record.language, "Rust");
        assert_eq!(record.visibility, "public");
        assert_eq!(record.created_at, "2023-01-01T00:00:00Z");
        assert_eq!(record.updated_at, "2024-01-01T00:00:00Z");
        assert_eq!(record.pushed_at, "2024-02-01T00:00:00Z");
        assert_eq!(record.size_kib, 512);
    }

    #[test]
    fn test_normalize_null_fields() {
        let raw = parse(
            r#"{
                "name": "dotfiles",
                "html_url": "https://github.com/octocat/dotfiles",
                "fork": true,
                "description": null,
                "language": null,
                "archived": false,
                "visibility": null,
                "created_at": "2023-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z",
                "pushed_at": null,
                "size": 0
            }"#,
        );

        let record = normalize(raw);
        assert_eq!(record.language, UNKNOWN_LANGUAGE);
        assert_eq!(record.description, "");
        assert_eq!(record.visibility, "");
        assert_eq!(record.pushed_at, "");
        assert!(record.is_fork);
    }

    #[test]
    fn test_normalize_absent_fields() {
        let raw = parse(
            r#"{
                "name": "notes",
                "html_url": "https://github.com/octocat/notes",
                "fork": false,
                "archived": false,
                "created_at": "2023-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z",
                "size": 3
            }"#,
        );

        let record = normalize(raw);
        assert_eq!(record.language, "Unknown");
        assert_eq!(record.description, "");
        assert_eq!(record.visibility, "");
        assert_eq!(record.pushed_at, "");
    }

    #[test]
    fn test_normalize_empty_language_is_unknown() {
        let raw = parse(
            r#"{
                "name": "empty",
                "html_url": "https://github.com/octocat/empty",
                "fork": false,
                "language": "",
                "archived": false,
                "created_at": "2023-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z",
                "size": 0
            }"#,
        );

        assert_eq!(normalize(raw).language, UNKNOWN_LANGUAGE);
    }

    #[test]
    fn test_normalize_keeps_language_case() {
        let raw = parse(
            r#"{
                "name": "shell",
                "html_url": "https://github.com/octocat/shell",
                "fork": false,
                "language": "Shell",
                "archived": false,
                "created_at": "2023-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z",
                "size": 1
            }"#,
        );

        assert_eq!(RepositoryRecord::from(raw).language, "Shell");
    }

    #[test]
    fn test_raw_repository_requires_size() {
        let result = serde_json::from_str::<RawRepository>(
            r#"{
                "name": "broken",
                "html_url": "https://github.com/octocat/broken",
                "fork": false,
                "archived": false,
                "created_at": "2023-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z"
            }"#,
        );

        assert!(result.is_err());
    }
}
