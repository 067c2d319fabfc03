use rust_decimal::Decimal;
use tracing::warn;

use crate::account::{Account, AccountError};

/// Moves the entire balance of `source` into `target` and returns the
/// amount credited to the target.
///
/// Both accounts must share a currency; a mismatch changes neither side.
/// On a match, the whole source balance goes through the target's own
/// deposit guard, then the source is reset to zero through its balance
/// setter. Taking both accounts as exclusive borrows keeps the two-sided
/// mutation visible at the call site and rules out aliasing; a concurrent
/// host still has to lock both accounts in a fixed order before calling.
///
/// An overdrawn source is a known wart kept for compatibility: the target
/// rejects the negative deposit, yet the source is still reset to zero, so
/// the overdrawn part vanishes from both accounts. The call then returns
/// `Ok(0)` and emits a warning.
pub fn transfer_all(source: &mut Account, target: &mut Account) -> Result<Decimal, AccountError> {
    if source.currency() != target.currency() {
        return Err(AccountError::CurrencyMismatch {
            source: source.currency(),
            target: target.currency(),
        });
    }

    let amount = source.balance();
    let credited = match target.deposit(amount) {
        Ok(_) => amount,
        Err(AccountError::NegativeAmount { .. }) => {
            warn!(%amount, "overdrawn balance dropped during transfer");
            Decimal::ZERO
        }
        Err(err) => return Err(err),
    };

    // zero always satisfies the source's overdraft floor
    source.set_balance(Decimal::ZERO)?;

    Ok(credited)
}
