mod bcd_encoding;
mod boolean_basic;
mod boolean_simplify;
mod complement;
mod demorgan;
mod fixed;
mod number_conversion;
mod number_representation;
mod sop_pos;

pub use bcd_encoding::BcdEncoding;
pub use boolean_basic::BooleanBasic;
pub use boolean_simplify::BooleanSimplify;
pub use complement::Complement;
pub use demorgan::DeMorgan;
pub use fixed::{
    AlgebraAlgorithm, CombinationalSimplify, GateConversion, KMAP_PLACEHOLDER_ANSWER,
    KMapPlaceholder,
};
pub use number_conversion::NumberConversion;
pub use number_representation::NumberRepresentation;
pub use sop_pos::SopPos;
