//! Fragment model and document composition for WebMaker.
//! WebMaker 的來源片段模型與文件組裝功能。
//!
//! The composer is a total function: any three strings are accepted and
//! embedded verbatim, without escaping or validation. A CSS or JS fragment
//! that contains its own closing tag therefore ends the embedded block early
//! once a browser parses the document; existing saved projects rely on the
//! verbatim embedding, so the composer keeps it.
//! 組裝函式可接受任意字串：三段文字一律原樣嵌入，不做跳脫或驗證。
//! 若 CSS 或 JS 片段本身含有結尾標籤，瀏覽器解析時嵌入區塊會提早結束；
//! 既存的專案檔依賴原樣嵌入，因此組裝器保留此行為。

use serde::{Deserialize, Serialize};

/// The three editable source kinds, in pane order.
/// 三種可編輯的來源類型（依面板順序排列）。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Html,
    Css,
    Js,
}

impl FragmentKind {
    pub const ALL: [FragmentKind; 3] = [FragmentKind::Html, FragmentKind::Css, FragmentKind::Js];

    /// Language identifier handed to the syntax-highlighting widget.
    /// 交給語法上色元件的語言代號。
    pub fn language_id(self) -> &'static str {
        match self {
            FragmentKind::Html => "html",
            FragmentKind::Css => "css",
            FragmentKind::Js => "javascript",
        }
    }

    /// MIME type used to resolve the highlight language.
    /// 用於查詢上色語言的 MIME 類型。
    pub fn mime_type(self) -> &'static str {
        match self {
            FragmentKind::Html => "text/html",
            FragmentKind::Css => "text/css",
            FragmentKind::Js => "text/javascript",
        }
    }

    /// Placeholder contents a freshly created project shows.
    /// 新建立的專案顯示的預設提示文字。
    pub fn starter_text(self) -> &'static str {
        match self {
            FragmentKind::Html => "<!-- Add your HTML Content here -->",
            FragmentKind::Css => "/* Add your CSS Styles here */",
            FragmentKind::Js => "// Add your JavaScript Code here",
        }
    }
}

/// One editable source text together with its kind.
/// 單一可編輯來源文字與其類型。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFragment {
    pub kind: FragmentKind,
    pub text: String,
}

impl SourceFragment {
    pub fn new(kind: FragmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Builds the placeholder fragment for a fresh project.
    /// 建立新專案用的預設片段。
    pub fn starter(kind: FragmentKind) -> Self {
        Self::new(kind, kind.starter_text())
    }
}

/// Combines the three fragments into one renderable HTML document.
/// 將三段來源組合成單一可渲染的 HTML 文件。
///
/// The CSS lands in a `<style>` block inside `<head>`; the HTML content goes
/// into `<body>`, followed by the JS in a `<script>` block. Fragment text is
/// embedded verbatim.
/// CSS 置於 `<head>` 內的 `<style>` 區塊；HTML 內容放進 `<body>`，
/// 其後接著含 JS 的 `<script>` 區塊。片段文字一律原樣嵌入。
pub fn compose(html: &str, css: &str, js: &str) -> String {
    format!(
        "<html><head>\n<style>{css}</style>\n</head><body>\n{html}\n<script>{js}</script>\n</body></html>\n"
    )
}
