pub mod document;
pub mod name;
pub mod service;

pub use document::{GraphDocument, SaveGraphInput};
pub use name::GraphName;
pub use service::GraphService;
