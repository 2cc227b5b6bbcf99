//! Project persistence and editor-session lifecycle for WebMaker.
//! 管理 WebMaker 專案持久化與編輯工作階段的核心模組。

mod util;

pub mod session;
pub mod store;

pub use session::{
    EditableTextRegion, EditorSession, FragmentRegions, HostMetadataStore, LoadOutcome,
    RenderSurface, MIME_METADATA_KEY,
};
pub use store::{ProjectError, ProjectFile, ProjectStore, PROJECT_MIME_TYPE};
