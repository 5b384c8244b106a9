pub mod init;
pub mod publish;
pub mod render;
pub mod serve;
pub mod upload;

pub use init::{init, InitArgs};
pub use publish::{publish, PublishArgs};
pub use render::{render, RenderArgs};
pub use serve::{serve, ServeArgs};
pub use upload::{upload, UploadArgs};
