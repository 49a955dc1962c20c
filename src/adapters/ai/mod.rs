//! AI adapters - implementations of the generative provider port.

mod gemini;
mod mock;

pub use gemini::{GeminiConfig, GeminiProvider, DEFAULT_MODEL};
pub use mock::MockGenerativeProvider;
