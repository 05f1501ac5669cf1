pub mod registry;
pub mod resolver;
pub mod types;
pub mod validation;

pub use registry::{BetTypeRegistry, BetTypeSpec};
pub use resolver::{
    color_of, FixedNumber, NumberSource, ResolutionPolicy, RoundResolver, SecureNumberSource,
};
pub use types::*;
pub use validation::{TableValidator, WagerValidator};
