use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use webmaker_compose::{compose, FragmentKind};

use crate::util::write_atomic;

/// Content-type marker recorded for saved project artifacts.
/// 儲存專案成品時記錄的內容類型標記。
pub const PROJECT_MIME_TYPE: &str = "application/json+webtest";

/// Persisted project record: the three source texts.
/// 持久化的專案紀錄，內含三段來源文字。
///
/// All three keys are required. A record missing any of them is rejected as
/// malformed instead of being padded with blanks; empty strings are valid
/// values for every field.
/// 三個欄位皆為必填。缺少任一欄位的紀錄會被判定為格式錯誤，不會以空字串補齊；
/// 各欄位允許空字串。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl ProjectFile {
    pub fn new(
        html: impl Into<String>,
        css: impl Into<String>,
        js: impl Into<String>,
    ) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            js: js.into(),
        }
    }

    /// Builds the placeholder project a fresh editor starts from.
    /// 建立新編輯器起始用的預設專案。
    pub fn starter() -> Self {
        Self::new(
            FragmentKind::Html.starter_text(),
            FragmentKind::Css.starter_text(),
            FragmentKind::Js.starter_text(),
        )
    }

    /// Combines the stored fragments into one renderable document.
    /// 將儲存的片段組合成單一可渲染文件。
    pub fn compose(&self) -> String {
        compose(&self.html, &self.css, &self.js)
    }
}

/// Error type for project persistence.
/// 專案持久化時可能出現的錯誤。
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project file IO error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid project payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Reads and writes one project record at a fixed location.
/// 在固定位置讀寫單一專案紀錄。
#[derive(Debug)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the project record from disk. An unreadable location is an I/O
    /// error; invalid JSON or a missing key is an invalid payload.
    /// 從磁碟載入專案紀錄。位置無法讀取屬於 I/O 錯誤；
    /// JSON 無效或欄位缺漏則屬於內容格式錯誤。
    pub fn load(&self) -> Result<ProjectFile, ProjectError> {
        let contents = fs::read_to_string(&self.path)?;
        let project = serde_json::from_str(&contents)?;
        Ok(project)
    }

    /// Persists the project record using atomic writes. An interrupted save
    /// leaves the previous file intact; the new payload only replaces it on
    /// rename.
    /// 以原子寫入方式儲存專案紀錄。寫入中斷時舊檔案保持原狀，
    /// 新內容僅在 rename 時取代舊檔。
    pub fn save(&self, project: &ProjectFile) -> Result<(), ProjectError> {
        let json = serde_json::to_vec_pretty(project)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn project_round_trips() {
        let tmp = tempdir().unwrap();
        let store = ProjectStore::new(tmp.path().join("project.json"));

        let project = ProjectFile::new("<p>Hi</p>", "p{color:red}", "alert(1)");
        store.save(&project).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, project);
    }

    #[test]
    fn round_trip_preserves_metacharacters_and_unicode() {
        let tmp = tempdir().unwrap();
        let store = ProjectStore::new(tmp.path().join("project.json"));

        let project = ProjectFile::new(
            "\"quoted\" {braced} \\backslash",
            "body::after { content: \"第一行\\n\"; }",
            "let s = '<\u{1F600}>';\n\t// tab",
        );
        store.save(&project).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, project);
    }

    #[test]
    fn empty_fragments_are_valid() {
        let tmp = tempdir().unwrap();
        let store = ProjectStore::new(tmp.path().join("project.json"));

        store.save(&ProjectFile::new("", "", "")).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, ProjectFile::new("", "", ""));
    }

    #[test]
    fn missing_key_is_invalid_payload() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("project.json");
        std::fs::write(&path, r#"{"html": "<p></p>", "js": "alert(1)"}"#).unwrap();

        let err = ProjectStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ProjectError::InvalidPayload(_)));
    }

    #[test]
    fn non_json_contents_are_invalid_payload() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("project.json");
        std::fs::write(&path, "not a structured record").unwrap();

        let err = ProjectStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ProjectError::InvalidPayload(_)));
    }

    #[test]
    fn unreadable_location_is_io_error() {
        let tmp = tempdir().unwrap();
        let store = ProjectStore::new(tmp.path().join("missing.json"));

        let err = store.load().unwrap_err();
        assert!(matches!(err, ProjectError::Io(_)));
    }

    #[test]
    fn save_overwrites_previous_record() {
        let tmp = tempdir().unwrap();
        let store = ProjectStore::new(tmp.path().join("project.json"));

        store.save(&ProjectFile::starter()).unwrap();
        let replacement = ProjectFile::new("<h1></h1>", "", "");
        store.save(&replacement).unwrap();

        assert_eq!(store.load().unwrap(), replacement);
    }

    #[test]
    fn starter_project_uses_kind_placeholders() {
        let starter = ProjectFile::starter();
        assert_eq!(starter.html, "<!-- Add your HTML Content here -->");
        assert_eq!(starter.css, "/* Add your CSS Styles here */");
        assert_eq!(starter.js, "// Add your JavaScript Code here");
    }

    #[test]
    fn composed_project_embeds_fragments() {
        let project = ProjectFile::new("<p>Hi</p>", "p{color:red}", "alert(1)");
        let document = project.compose();
        assert!(document.contains("<style>p{color:red}</style>"));
        assert!(document.contains("<script>alert(1)</script>"));
        assert!(document.contains("<p>Hi</p>"));
    }
}
