use small_arcade::app::console::ScriptedConsole;
use small_arcade::app::sessions::AtmSession;
use small_arcade::core::bank::Bank;
use small_arcade::domain::ports::Session;
use small_arcade::Money;

fn session(max_login_attempts: u32) -> AtmSession {
    AtmSession::new(Bank::new(Money::ZERO), max_login_attempts)
}

#[tokio::test]
async fn test_register_login_deposit_and_withdraw() {
    let mut atm = session(3);
    let mut console = ScriptedConsole::new([
        "2", // nobody registered yet
        "1", "bob1", "bob", "12a4", "1234",
        "1", "bob", "1234", "n",
        "2", "bob", "0000", "bob", "1234",
        "3", // balance is zero
        "2", "-5", "100",
        "3", "150", "100",
        "2", "40",
        "5",
        "3",
    ]);

    atm.run(&mut console).await.unwrap();

    assert!(console.contains("Currently there are no users enrolled in the system."));
    assert!(console.contains("The username must consist of 1-10 letters."));
    assert!(console.contains("The PIN must contain exactly four digits."));
    assert!(console.contains("bob has been registered with a starting balance of $0.00."));
    assert!(console.contains("A user with these credentials already exists in the system."));
    assert!(console.contains("Please login with an existing set of credentials."));
    assert!(console.contains("Invalid credentials!"));
    assert!(console.contains("Login successful!"));
    assert!(console.contains("You have insufficient funds to make any withdrawal."));
    assert!(console.contains("The deposit amount is invalid. Please try again."));
    assert!(console.contains("Current Balance: $100.00"));
    assert!(console.contains("does not exceed your current balance ($100.00)."));
    assert!(console.contains("Current Balance: $0.00"));
    assert!(console.contains("Goodbye bob!"));
    assert!(console.contains("Thank you for using this ATM service."));

    assert_eq!(atm.bank().len(), 1);
    assert_eq!(atm.bank().customer("bob").unwrap().balance, Money::dollars(40));
}

#[tokio::test]
async fn test_transfer_requires_pin_and_moves_both_balances() {
    let mut atm = session(3);
    let mut console = ScriptedConsole::new([
        "1", "alice", "1111",
        "1", "bob", "2222",
        "2", "alice", "1111",
        "2", "50",
        "4", "carl",
        "4", "BOB", "70",
        "4", "BOB", "20", "9999",
        "4", "bob", "20", "1111",
        "5",
        "3",
    ]);

    atm.run(&mut console).await.unwrap();

    assert!(console.contains("Operation cancelled! User does not exist."));
    assert!(console.contains("Operation cancelled! Amount invalid."));
    assert!(console.contains("You are transferring $20.00 to bob"));
    assert!(console.contains("Invalid PIN. Transaction canceled."));
    assert_eq!(console.count("Transfer authorized"), 1);

    let bank = atm.bank();
    assert_eq!(bank.customer("alice").unwrap().balance, Money::dollars(30));
    assert_eq!(bank.customer("bob").unwrap().balance, Money::dollars(20));
}

#[tokio::test]
async fn test_repeated_login_failures_offer_a_way_out() {
    let mut atm = session(2);
    let mut console = ScriptedConsole::new([
        "1", "dana", "4321",
        "2", "dana", "1111", "dana", "2222", "q",
        "3",
    ]);

    atm.run(&mut console).await.unwrap();

    assert!(console.contains("You had 2 unsuccessful login attempts."));
    assert!(!console.contains("Login successful!"));
    assert!(console.contains("Thank you for using this ATM service."));
}

#[tokio::test]
async fn test_deposit_near_the_balance_limit_asks_again() {
    let mut atm = AtmSession::new(Bank::new(Money::from_cents(u64::MAX - 150)), 3);
    let mut console = ScriptedConsole::new([
        "1", "bob", "1234",
        "2", "bob", "1234",
        "2", "999999999999999999", "2", "1",
        "5",
        "3",
    ]);

    atm.run(&mut console).await.unwrap();

    assert!(console.contains("The deposit amount is invalid. Please try again."));
    assert!(console.contains("This deposit would exceed the maximum account balance."));
    assert!(console.contains("Goodbye bob!"));
    assert!(console.contains("Thank you for using this ATM service."));
    assert_eq!(
        atm.bank().customer("bob").unwrap().balance,
        Money::from_cents(u64::MAX - 50)
    );
}
