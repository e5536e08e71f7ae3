pub mod js_executor;
pub mod render;

pub use js_executor::JsExecutor;
pub use render::{RenderPage, Renderer, WaitUntil};
