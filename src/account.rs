use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::currency::Currency;

// `Display`/`Error` are written by hand: thiserror's derive would treat the
// `CurrencyMismatch::source` field as the error's source, but it is a plain
// `Currency`, not a cause.
#[derive(Debug, PartialEq, Eq)]
pub enum AccountError {
    NegativeAmount { amount: Decimal },
    OverdraftExceeded { requested: Decimal, floor: Decimal },
    NonPositiveRate { rate: Decimal },
    CurrencyMismatch { source: Currency, target: Currency },
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount { amount } => {
                write!(f, "Amount must not be negative, got {amount}")
            }
            Self::OverdraftExceeded { requested, floor } => {
                write!(f, "Balance {requested} would breach the overdraft floor {floor}")
            }
            Self::NonPositiveRate { rate } => {
                write!(f, "Conversion rate must be positive, got {rate}")
            }
            Self::CurrencyMismatch { source, target } => {
                write!(f, "Account currencies differ: {source} vs {target}")
            }
        }
    }
}

impl std::error::Error for AccountError {}

/// A bank account: a decimal balance in a single currency, allowed to go
/// negative down to the overdraft floor `-max_overdrawn`.
///
/// Every fallible operation either applies fully or returns an error with
/// the state untouched; there is no partial mutation. Invariants held after
/// every call: `max_overdrawn >= 0` and `balance >= -max_overdrawn`.
///
/// The type carries no internal synchronization. All mutation goes through
/// `&mut self`, so a concurrent host has to serialize access per account
/// (and acquire both sides in a fixed order when transferring).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAccount")]
pub struct Account {
    balance: Decimal,
    currency: Currency,
    max_overdrawn: Decimal,
}

/// Wire shape of an account. The currency comes in as a free-form string so
/// untrusted input goes through the same clamping as [`Account::with_limits`].
#[derive(Debug, Deserialize)]
struct RawAccount {
    balance: Decimal,
    currency: String,
    max_overdrawn: Decimal,
}

impl From<RawAccount> for Account {
    fn from(raw: RawAccount) -> Self {
        Account::with_limits(
            raw.balance,
            Currency::from_code(&raw.currency).unwrap_or_default(),
            raw.max_overdrawn,
        )
    }
}

impl Account {
    /// Builds an account from possibly out-of-range inputs.
    ///
    /// Fields are clamped independently instead of rejecting the whole
    /// call: a negative starting balance becomes 0 (it is not checked
    /// against the overdraft floor), and a non-positive overdraft limit
    /// becomes 0.
    pub fn with_limits(
        initial_balance: Decimal,
        currency: Currency,
        max_overdrawn: Decimal,
    ) -> Self {
        Self {
            balance: initial_balance.max(Decimal::ZERO),
            currency,
            max_overdrawn: max_overdrawn.max(Decimal::ZERO),
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn max_overdrawn(&self) -> Decimal {
        self.max_overdrawn
    }

    /// The lowest balance this account may reach, `-max_overdrawn`.
    pub fn overdraft_floor(&self) -> Decimal {
        -self.max_overdrawn
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    /// Replaces the overdraft limit. Never fails: a non-positive limit is
    /// clamped to 0.
    pub fn set_max_overdrawn(&mut self, limit: Decimal) {
        self.max_overdrawn = limit.max(Decimal::ZERO);
    }

    /// Replaces the balance outright.
    ///
    /// Rejected when `new_balance` is below the overdraft floor. Zero and
    /// anything at or above the floor, including negative values down to
    /// the floor itself, are accepted.
    pub fn set_balance(&mut self, new_balance: Decimal) -> Result<(), AccountError> {
        let floor = self.overdraft_floor();
        if new_balance < floor {
            debug!(%new_balance, %floor, "balance update rejected");
            return Err(AccountError::OverdraftExceeded {
                requested: new_balance,
                floor,
            });
        }
        self.balance = new_balance;
        Ok(())
    }

    /// Adds `amount` to the balance and returns the new balance.
    ///
    /// Negative amounts are rejected. There is no upper bound.
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        if amount < Decimal::ZERO {
            debug!(%amount, "deposit rejected");
            return Err(AccountError::NegativeAmount { amount });
        }
        self.balance += amount;
        Ok(self.balance)
    }

    /// Subtracts `amount` from the balance and returns the new balance.
    ///
    /// Rejected when `amount` is negative or when the projected balance
    /// would sink below the overdraft floor. Withdrawing exactly down to
    /// the floor is allowed.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        if amount < Decimal::ZERO {
            debug!(%amount, "withdrawal rejected");
            return Err(AccountError::NegativeAmount { amount });
        }
        let projected = self.balance - amount;
        let floor = self.overdraft_floor();
        if projected < floor {
            debug!(%amount, %projected, %floor, "withdrawal rejected");
            return Err(AccountError::OverdraftExceeded {
                requested: projected,
                floor,
            });
        }
        self.balance = projected;
        Ok(self.balance)
    }

    /// Withdraws the entire positive balance and returns the resulting
    /// balance. An account already at or below zero is left untouched.
    pub fn withdraw_all(&mut self) -> Decimal {
        if self.balance > Decimal::ZERO {
            // withdrawing the full positive balance can never breach the
            // floor, which is at most zero
            self.balance = Decimal::ZERO;
        }
        self.balance
    }

    /// Re-denominates the account: sets the currency and multiplies the
    /// balance by `rate`.
    ///
    /// This is a unit reinterpretation with a caller-supplied factor, not
    /// a value-preserving exchange against some rate feed. Rejected when
    /// `rate` is not positive.
    pub fn convert_to(&mut self, currency: Currency, rate: Decimal) -> Result<(), AccountError> {
        if rate <= Decimal::ZERO {
            debug!(%rate, "conversion rejected");
            return Err(AccountError::NonPositiveRate { rate });
        }
        self.currency = currency;
        self.balance *= rate;
        Ok(())
    }
}
