mod backend;
mod eventstream;

pub use backend::{app_backend, AbstractBackendClient};
pub use eventstream::{AbstractUnreadSource, AppEventDispatcher};
