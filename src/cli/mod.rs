pub mod orchestration;

pub use orchestration::{run_generate, GenerateArgs};
