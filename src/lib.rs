/// The account entity: balance, currency and overdraft-limit state,
/// with every mutation guarded so invalid input leaves the state untouched.
pub mod account;

/// The closed set of currencies an account can be denominated in.
pub mod currency;

/// Moving the whole balance of one account into another.
pub mod transfer;
