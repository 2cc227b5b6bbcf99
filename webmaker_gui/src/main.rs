use std::collections::BTreeMap;
use std::path::PathBuf;

use eframe::{egui, App, Frame, NativeOptions};
use egui::{RichText, TextStyle};
use once_cell::sync::Lazy;
use webmaker_compose::FragmentKind;
use webmaker_project::{
    EditableTextRegion, EditorSession, FragmentRegions, HostMetadataStore, LoadOutcome,
    ProjectStore, RenderSurface,
};

const APP_TITLE: &str = "WebMaker";
const PROJECT_FILE_FILTER: (&str, &[&str]) = ("WebMaker project", &["json"]);

/// Pane headers in the grid order of the editor window.
/// 編輯視窗網格順序的面板標題。
static PANE_TITLES: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut titles = BTreeMap::new();
    titles.insert(FragmentKind::Html.language_id(), "HTML");
    titles.insert(FragmentKind::Css.language_id(), "CSS");
    titles.insert(FragmentKind::Js.language_id(), "JavaScript");
    titles
});

/// Live text buffer behind one editor pane.
/// 單一編輯面板背後的即時文字緩衝。
struct PaneBuffer {
    kind: FragmentKind,
    text: String,
    modified: bool,
}

impl PaneBuffer {
    fn starter(kind: FragmentKind) -> Self {
        Self {
            kind,
            text: kind.starter_text().to_string(),
            modified: false,
        }
    }

    fn title(&self) -> &'static str {
        PANE_TITLES
            .get(self.kind.language_id())
            .copied()
            .unwrap_or("Source")
    }
}

impl EditableTextRegion for PaneBuffer {
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

/// Render surface backed by a read-only source view. An embedded browser
/// engine is a host capability this shell does not ship, so the preview
/// quadrant shows the composed document source instead.
/// 以唯讀原始碼視圖實作的渲染表面。本外殼不內建瀏覽器引擎，
/// 因此預覽象限改為顯示組合後的文件原始碼。
#[derive(Default)]
struct PreviewPane {
    document: Option<String>,
}

impl RenderSurface for PreviewPane {
    fn render_html(&mut self, document: &str) {
        self.document = Some(document.to_string());
    }
}

/// Journal-style metadata fields recorded alongside saves.
/// 隨儲存動作記錄的日誌式中繼資料欄位。
#[derive(Default)]
struct JournalMetadata {
    fields: BTreeMap<String, String>,
}

impl HostMetadataStore for JournalMetadata {
    fn set_field(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), value.to_string());
    }
}

struct WebMakerApp {
    session: EditorSession,
    html: PaneBuffer,
    css: PaneBuffer,
    js: PaneBuffer,
    preview: PreviewPane,
    metadata: JournalMetadata,
    project_path: Option<PathBuf>,
    status: Option<String>,
}

impl Default for WebMakerApp {
    fn default() -> Self {
        Self {
            session: EditorSession::new(),
            html: PaneBuffer::starter(FragmentKind::Html),
            css: PaneBuffer::starter(FragmentKind::Css),
            js: PaneBuffer::starter(FragmentKind::Js),
            preview: PreviewPane::default(),
            metadata: JournalMetadata::default(),
            project_path: None,
            status: None,
        }
    }
}

impl WebMakerApp {
    fn run_clicked(&mut self) {
        let regions = FragmentRegions {
            html: &mut self.html,
            css: &mut self.css,
            js: &mut self.js,
        };
        self.session.run(&regions, &mut self.preview);
        self.status = None;
    }

    fn save_clicked(&mut self, path: PathBuf) {
        let store = ProjectStore::new(&path);
        let regions = FragmentRegions {
            html: &mut self.html,
            css: &mut self.css,
            js: &mut self.js,
        };
        match self.session.save(&store, &regions, &mut self.metadata) {
            Ok(()) => {
                self.html.modified = false;
                self.css.modified = false;
                self.js.modified = false;
                self.status = Some(format!("Saved {}", path.display()));
                self.project_path = Some(path);
            }
            Err(err) => self.status = Some(format!("Save failed: {err}")),
        }
    }

    fn open_clicked(&mut self, path: PathBuf) {
        let store = ProjectStore::new(&path);
        let mut regions = FragmentRegions {
            html: &mut self.html,
            css: &mut self.css,
            js: &mut self.js,
        };
        match self.session.open(&store, &mut regions) {
            Ok(LoadOutcome::Loaded) => {
                self.status = Some(format!("Opened {}", path.display()));
                self.project_path = Some(path);
            }
            Ok(LoadOutcome::AlreadyLoaded) => {
                self.status = Some("A project is already loaded in this session".to_string());
            }
            Err(err) => self.status = Some(format!("Open failed: {err}")),
        }
    }

    fn any_modified(&self) -> bool {
        self.html.is_modified() || self.css.is_modified() || self.js.is_modified()
    }

    fn show_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Run").clicked() {
                    self.run_clicked();
                }
                ui.separator();
                if ui.button("Open…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter(PROJECT_FILE_FILTER.0, PROJECT_FILE_FILTER.1)
                        .pick_file()
                    {
                        self.open_clicked(path);
                    }
                }
                if ui.button("Save").clicked() {
                    let target = self.project_path.clone().or_else(|| {
                        rfd::FileDialog::new()
                            .add_filter(PROJECT_FILE_FILTER.0, PROJECT_FILE_FILTER.1)
                            .save_file()
                    });
                    if let Some(path) = target {
                        self.save_clicked(path);
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.any_modified() {
                        ui.label(RichText::new("●").weak());
                    }
                });
            });
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.status {
                    Some(message) => ui.label(message.as_str()),
                    None => ui.label(RichText::new("Ready").weak()),
                };
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(path) = &self.project_path {
                        ui.label(RichText::new(path.display().to_string()).weak());
                    }
                });
            });
        });
    }

    fn show_pane(ui: &mut egui::Ui, pane: &mut PaneBuffer, rows: usize) {
        ui.label(RichText::new(pane.title()).strong());
        let text_edit = egui::TextEdit::multiline(&mut pane.text)
            .font(TextStyle::Monospace)
            .desired_rows(rows)
            .desired_width(f32::INFINITY);
        let response = ui.add(text_edit);
        if response.changed() {
            pane.modified = true;
        }
    }

    fn show_preview(ui: &mut egui::Ui, preview: &PreviewPane, rows: usize) {
        ui.label(RichText::new("Preview (document source)").strong());
        match &preview.document {
            Some(document) => {
                let mut shown = document.as_str();
                let viewer = egui::TextEdit::multiline(&mut shown)
                    .font(TextStyle::Monospace)
                    .desired_rows(rows)
                    .desired_width(f32::INFINITY);
                ui.add(viewer);
            }
            None => {
                ui.label(RichText::new("Press Run to compose the document").weak());
            }
        }
    }
}

impl App for WebMakerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.show_toolbar(ctx);
        self.show_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let rows = 14;
            ui.columns(2, |columns| {
                // Grid order of the editor window: HTML over JS on the left,
                // CSS over the preview surface on the right.
                Self::show_pane(&mut columns[0], &mut self.html, rows);
                columns[0].separator();
                Self::show_pane(&mut columns[0], &mut self.js, rows);

                Self::show_pane(&mut columns[1], &mut self.css, rows);
                columns[1].separator();
                Self::show_preview(&mut columns[1], &self.preview, rows);
            });
        });
    }
}

fn main() -> eframe::Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_title(APP_TITLE),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|_cc| Box::<WebMakerApp>::default()),
    )
}
