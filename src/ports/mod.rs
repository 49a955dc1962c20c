//! Ports - trait interfaces between the core and the outside world.

mod generative;

pub use generative::{
    GenerationConfig, GenerationRequest, GenerationResponse, GenerativeError, GenerativeProvider,
    ProviderInfo, ResponseSchema, SchemaType,
};
