mod lookup_expiry;

pub use lookup_expiry::*;
