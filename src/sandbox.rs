//! Sandbox fixtures
//!
//! Cards and mobile wallets the Chapa test environment accepts. They only
//! work with `CHASECK_TEST-` keys.

use serde::Serialize;

/// A test card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TestCard {
    pub brand: &'static str,
    pub card_number: &'static str,
    pub cvv: &'static str,
    pub expiry: &'static str,
}

/// A test mobile wallet account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TestMobile {
    pub bank: &'static str,
    pub phone: &'static str,
    pub otp: &'static str,
}

const EXPIRY: &str = "12/34";
const OTP: &str = "12345";

const fn card(brand: &'static str, card_number: &'static str, cvv: &'static str) -> TestCard {
    TestCard {
        brand,
        card_number,
        cvv,
        expiry: EXPIRY,
    }
}

const fn mobile(bank: &'static str, phone: &'static str) -> TestMobile {
    TestMobile {
        bank,
        phone,
        otp: OTP,
    }
}

pub static TEST_CARDS: [TestCard; 5] = [
    card("Visa", "4200 0000 0000 0000", "123"),
    card("Amex", "3700 0000 0000 0000", "1234"),
    card("Mastercard", "5400 0000 0000 0000", "123"),
    card("Union Pay", "6200 0000 0000 0000", "123"),
    card("Diners", "3800 0000 0000 0000", "123"),
];

pub static TEST_MOBILES: [TestMobile; 15] = [
    mobile("Awash Bank", "0900123456"),
    mobile("Awash Bank", "0900112233"),
    mobile("Awash Bank", "0900881111"),
    mobile("Amole", "0900123456"),
    mobile("Amole", "0900112233"),
    mobile("Amole", "0900881111"),
    mobile("telebirr", "0900123456"),
    mobile("telebirr", "0900112233"),
    mobile("telebirr", "0900881111"),
    mobile("CBEBirr", "0900123456"),
    mobile("CBEBirr", "0900112233"),
    mobile("CBEBirr", "0900881111"),
    mobile("COOPPay-ebirr", "0900123456"),
    mobile("COOPPay-ebirr", "0900112233"),
    mobile("COOPPay-ebirr", "0900881111"),
];

/// All sandbox test cards
pub fn testing_cards() -> &'static [TestCard] {
    &TEST_CARDS
}

/// All sandbox mobile wallet accounts
pub fn testing_mobiles() -> &'static [TestMobile] {
    &TEST_MOBILES
}

/// Test card for a brand, matched case-insensitively
pub fn card_for(brand: &str) -> Option<&'static TestCard> {
    TEST_CARDS
        .iter()
        .find(|card| card.brand.eq_ignore_ascii_case(brand))
}

/// Test accounts for one wallet provider
pub fn mobiles_for(bank: &str) -> impl Iterator<Item = &'static TestMobile> + '_ {
    TEST_MOBILES
        .iter()
        .filter(move |mobile| mobile.bank.eq_ignore_ascii_case(bank))
}
