pub mod cast;
pub mod outcome;
pub mod user;

pub use outcome::*;
pub use user::*;
pub use cast::cast_user_fields;
