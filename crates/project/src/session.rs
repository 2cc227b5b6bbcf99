use webmaker_compose::compose;

use crate::store::{ProjectError, ProjectFile, ProjectStore, PROJECT_MIME_TYPE};

/// Metadata key the content-type marker is recorded under.
/// 內容類型標記所使用的中繼資料欄位名稱。
pub const MIME_METADATA_KEY: &str = "mime_type";

/// One editable text region supplied by the host editor widget.
/// 宿主編輯元件提供的單一可編輯文字區域。
pub trait EditableTextRegion {
    /// Current contents of the region.
    fn text(&self) -> String;

    /// Replaces the contents and clears the modified flag.
    /// 取代內容並清除修改旗標。
    fn set_text(&mut self, text: &str);

    /// Whether the user edited the region since the last `set_text`.
    fn is_modified(&self) -> bool;
}

/// Surface able to display a composed HTML document. Fire and forget.
/// 能顯示組合後 HTML 文件的渲染表面；呼叫後不回傳任何結果。
pub trait RenderSurface {
    fn render_html(&mut self, document: &str);
}

/// Host-side metadata store (journal entry fields and the like).
/// 宿主端的中繼資料儲存（例如日誌項目的欄位）。
pub trait HostMetadataStore {
    fn set_field(&mut self, key: &str, value: &str);
}

/// The three live text regions, one per fragment kind.
/// 三個即時文字區域，各對應一種片段。
pub struct FragmentRegions<'a> {
    pub html: &'a mut dyn EditableTextRegion,
    pub css: &'a mut dyn EditableTextRegion,
    pub js: &'a mut dyn EditableTextRegion,
}

/// Outcome of an open request.
/// 開啟要求的結果。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The record was read and pushed into the text regions.
    Loaded,
    /// A project was already loaded this session; nothing was touched.
    /// 本工作階段已載入過專案，未進行任何變更。
    AlreadyLoaded,
}

/// Per-session editor state driving the run/save/open triggers.
/// 驅動「執行／儲存／開啟」三種動作的工作階段狀態。
///
/// The host may re-enter `open` several times for one logical "open project"
/// event, so the first successful load arms a one-shot latch and every later
/// call is a no-op. The latch is an idempotence guard, not a lock; all
/// triggers run on the host's single event thread.
/// 宿主可能針對同一個「開啟專案」事件重複呼叫 `open`，因此第一次成功載入會
/// 設下一次性閂鎖，其後的呼叫一律不做事。此閂鎖是冪等防護而非鎖；
/// 所有動作都在宿主的單一事件執行緒上執行。
#[derive(Debug, Default)]
pub struct EditorSession {
    has_read_file: bool,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a project record has been loaded this session.
    pub fn has_loaded(&self) -> bool {
        self.has_read_file
    }

    /// Composes the current region texts and hands the result to the surface.
    /// 將目前各區域的內容組合後交給渲染表面。
    pub fn run(&self, regions: &FragmentRegions<'_>, surface: &mut dyn RenderSurface) {
        let document = compose(
            &regions.html.text(),
            &regions.css.text(),
            &regions.js.text(),
        );
        surface.render_html(&document);
    }

    /// Persists the current region texts, then records the content-type
    /// marker in the host metadata store.
    /// 儲存目前各區域的內容，並於宿主中繼資料記錄內容類型標記。
    pub fn save(
        &self,
        store: &ProjectStore,
        regions: &FragmentRegions<'_>,
        metadata: &mut dyn HostMetadataStore,
    ) -> Result<(), ProjectError> {
        let project = ProjectFile::new(
            regions.html.text(),
            regions.css.text(),
            regions.js.text(),
        );
        store.save(&project)?;
        metadata.set_field(MIME_METADATA_KEY, PROJECT_MIME_TYPE);
        Ok(())
    }

    /// Loads the project record once per session and pushes the three texts
    /// into the regions. A failed load leaves both the regions and the latch
    /// untouched, so the next explicit open attempt starts fresh.
    /// 每個工作階段僅載入一次專案紀錄，並將三段文字推入各區域。
    /// 載入失敗時區域與閂鎖皆維持原狀，下一次明確的開啟動作可重新嘗試。
    pub fn open(
        &mut self,
        store: &ProjectStore,
        regions: &mut FragmentRegions<'_>,
    ) -> Result<LoadOutcome, ProjectError> {
        if self.has_read_file {
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        let project = store.load()?;
        regions.html.set_text(&project.html);
        regions.css.set_text(&project.css);
        regions.js.set_text(&project.js);
        self.has_read_file = true;
        Ok(LoadOutcome::Loaded)
    }
}
