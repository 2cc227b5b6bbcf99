use std::collections::BTreeMap;

use tempfile::tempdir;
use webmaker_project::{
    EditableTextRegion, EditorSession, FragmentRegions, HostMetadataStore, LoadOutcome,
    ProjectStore, RenderSurface, MIME_METADATA_KEY, PROJECT_MIME_TYPE,
};

#[derive(Default)]
struct Pane {
    text: String,
    modified: bool,
}

impl EditableTextRegion for Pane {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.modified = false;
    }

    fn is_modified(&self) -> bool {
        self.modified
    }
}

#[derive(Default)]
struct Preview {
    last_document: Option<String>,
}

impl RenderSurface for Preview {
    fn render_html(&mut self, document: &str) {
        self.last_document = Some(document.to_string());
    }
}

#[derive(Default)]
struct Journal {
    fields: BTreeMap<String, String>,
}

impl HostMetadataStore for Journal {
    fn set_field(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), value.to_string());
    }
}

/// 完整流程：儲存、重新載入、執行，並驗證組合結果的區塊順序。 /
/// Full edit cycle: save, reload into fresh panes, run, and verify the
/// composed document's block order.
#[test]
fn save_reload_run_cycle() {
    let tmp = tempdir().unwrap();
    let store = ProjectStore::new(tmp.path().join("project.json"));

    let mut html = Pane {
        text: "<p>Hi</p>".into(),
        modified: true,
    };
    let mut css = Pane {
        text: "p{color:red}".into(),
        modified: true,
    };
    let mut js = Pane {
        text: "alert(1)".into(),
        modified: true,
    };
    let mut journal = Journal::default();

    let session = EditorSession::new();
    let regions = FragmentRegions {
        html: &mut html,
        css: &mut css,
        js: &mut js,
    };
    session.save(&store, &regions, &mut journal).unwrap();
    assert_eq!(
        journal.fields.get(MIME_METADATA_KEY).map(String::as_str),
        Some(PROJECT_MIME_TYPE)
    );

    // A new session opens the record into fresh panes.
    let mut html = Pane::default();
    let mut css = Pane::default();
    let mut js = Pane::default();
    let mut regions = FragmentRegions {
        html: &mut html,
        css: &mut css,
        js: &mut js,
    };
    let mut session = EditorSession::new();
    let outcome = session.open(&store, &mut regions).unwrap();
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(html.text, "<p>Hi</p>");
    assert_eq!(css.text, "p{color:red}");
    assert_eq!(js.text, "alert(1)");

    let regions = FragmentRegions {
        html: &mut html,
        css: &mut css,
        js: &mut js,
    };
    let mut preview = Preview::default();
    session.run(&regions, &mut preview);

    let document = preview.last_document.unwrap();
    assert!(document.contains("<style>p{color:red}</style>"));
    assert!(document.contains("<script>alert(1)</script>"));
    let body = document.find("<body>").unwrap();
    let content = document.find("<p>Hi</p>").unwrap();
    let script = document.find("<script>").unwrap();
    assert!(body < content && content < script);
}
