use konto::account::{Account, AccountError};
use konto::currency::Currency;
use konto::transfer::transfer_all;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn account_lifecycle() {
    // a salary account with a 500 SEK overdraft facility
    let mut salary = Account::with_limits(dec!(1000), Currency::Sek, dec!(500));
    let mut savings = Account::default();

    salary.withdraw(dec!(500)).unwrap();
    assert_eq!(salary.balance(), dec!(500));

    // rejections leave the state as it was
    assert!(matches!(
        salary.withdraw(dec!(-5)),
        Err(AccountError::NegativeAmount { .. })
    ));
    assert!(matches!(
        salary.withdraw(dec!(1001)),
        Err(AccountError::OverdraftExceeded { .. })
    ));
    assert_eq!(salary.balance(), dec!(500));

    salary.deposit(dec!(700)).unwrap();
    assert_eq!(salary.balance(), dec!(1200));

    let credited = transfer_all(&mut salary, &mut savings).unwrap();
    assert_eq!(credited, dec!(1200));
    assert_eq!(salary.balance(), Decimal::ZERO);
    assert_eq!(savings.balance(), dec!(1200));

    // a euro account cannot receive the savings as-is
    let mut abroad = Account::with_limits(Decimal::ZERO, Currency::Eur, Decimal::ZERO);
    assert!(matches!(
        transfer_all(&mut savings, &mut abroad),
        Err(AccountError::CurrencyMismatch { .. })
    ));
    assert_eq!(savings.balance(), dec!(1200));

    // re-denominate the savings first, then move them
    savings.convert_to(Currency::Eur, dec!(0.09)).unwrap();
    assert_eq!(savings.balance(), dec!(108));
    assert_eq!(savings.currency(), Currency::Eur);

    transfer_all(&mut savings, &mut abroad).unwrap();
    assert_eq!(abroad.balance(), dec!(108));

    assert_eq!(abroad.withdraw_all(), Decimal::ZERO);
    assert_eq!(abroad.balance(), Decimal::ZERO);
}

#[test]
fn untrusted_snapshots_are_clamped_on_load() {
    let loaded: Account = serde_json::from_str(
        r#"{"balance": 250, "currency": "NOK", "max_overdrawn": -10}"#,
    )
    .unwrap();

    // unknown currency falls back to SEK, the bad limit to zero
    assert_eq!(loaded.currency(), Currency::Sek);
    assert_eq!(loaded.max_overdrawn(), Decimal::ZERO);
    assert_eq!(loaded.balance(), dec!(250));

    // invariants hold on the loaded account like on any other
    let mut acc = loaded;
    assert!(acc.withdraw(dec!(251)).is_err());
    assert_eq!(acc.withdraw(dec!(250)).unwrap(), Decimal::ZERO);
}
