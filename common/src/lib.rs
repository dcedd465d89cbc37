//! Photo PDF Common Library
//!
//! 入出力を持たない型とロジック（選択リスト・ドキュメント名・生成状態・マークアップ・配置計算）

pub mod types;
pub mod error;
pub mod name;
pub mod selection;
pub mod state;
pub mod markup;
pub mod layout;

pub use types::ImageRef;
pub use error::{Error, Result};
pub use name::{DocumentName, MAX_NAME_CHARS};
pub use selection::Selection;
pub use state::{GenerationGate, GenerationState, GenerationTicket};
pub use markup::{build_markup, count_image_blocks, encode_image, EmbeddedImage, IMAGE_BLOCK_CLASS};
pub use layout::{flow_layout, PageLayout, Placement};
